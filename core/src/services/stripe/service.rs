//! Stripe Connect account creation

use std::sync::Arc;

use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::UserRepository;

use super::gateway::ConnectAccountGateway;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingLink {
    pub account_id: String,
    pub onboarding_url: String,
}

pub struct StripeService {
    users: Arc<dyn UserRepository>,
    gateway: Arc<dyn ConnectAccountGateway>,
}

impl StripeService {
    pub fn new(users: Arc<dyn UserRepository>, gateway: Arc<dyn ConnectAccountGateway>) -> Self {
        Self { users, gateway }
    }

    /// Creates (or reuses) the admin's express account and returns a fresh
    /// onboarding link
    ///
    /// The account id is saved before the link is requested so a failed
    /// link call does not leave an untracked account behind.
    pub async fn create_connect_account(&self, admin_email: &str) -> DomainResult<OnboardingLink> {
        if !self.gateway.is_configured() {
            return Err(DomainError::NotConfigured {
                service: "Stripe".to_string(),
            });
        }

        let mut admin = self
            .users
            .find_by_email(admin_email)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        if !admin.is_admin() {
            return Err(AuthError::InsufficientPermissions.into());
        }

        let account_id = match admin.stripe_account_id.clone() {
            Some(existing) => existing,
            None => {
                let account_id = self.gateway.create_express_account(&admin.email).await?;
                admin.link_stripe_account(account_id.clone());
                admin = self.users.update(admin).await?;
                tracing::info!(user_id = admin.id, "Stripe Connect account created");
                account_id
            }
        };

        let onboarding_url = self.gateway.create_onboarding_link(&account_id).await?;
        Ok(OnboardingLink {
            account_id,
            onboarding_url,
        })
    }
}
