//! Tenant administration

use std::sync::Arc;

use nbj_shared::{Page, PageRequest};

use crate::domain::entities::tenant::{Tenant, TenantStatus};
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{TenantRepository, UserRepository};

/// A tenant profile joined with its login account
#[derive(Debug, Clone, PartialEq)]
pub struct TenantDetails {
    pub tenant: Tenant,
    /// `None` only if the account row vanished underneath the profile
    pub user: Option<User>,
}

/// Partial update; `None` leaves a field untouched
#[derive(Debug, Clone, Default)]
pub struct TenantUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub property_address: Option<String>,
    /// "ACTIVE" (any case) activates, anything else deactivates
    pub status: Option<String>,
}

pub struct TenantService {
    tenants: Arc<dyn TenantRepository>,
    users: Arc<dyn UserRepository>,
}

impl TenantService {
    pub fn new(tenants: Arc<dyn TenantRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { tenants, users }
    }

    pub async fn list(&self, page: &PageRequest) -> DomainResult<Page<TenantDetails>> {
        let tenants = self.tenants.find_page(page).await?;
        let mut items = Vec::with_capacity(tenants.items.len());
        for tenant in &tenants.items {
            items.push(self.details(tenant.clone()).await?);
        }
        Ok(Page {
            items,
            page: tenants.page,
            size: tenants.size,
            total_items: tenants.total_items,
            total_pages: tenants.total_pages,
        })
    }

    pub async fn get(&self, id: i64) -> DomainResult<TenantDetails> {
        let tenant = self.find(id).await?;
        self.details(tenant).await
    }

    /// The caller's own profile
    pub async fn for_user(&self, user_id: i64) -> DomainResult<Tenant> {
        self.tenants
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| AuthError::TenantProfileRequired.into())
    }

    /// Applies the present fields to the profile and its account
    pub async fn update(&self, id: i64, update: TenantUpdate) -> DomainResult<TenantDetails> {
        let mut tenant = self.find(id).await?;
        let mut user = self
            .users
            .find_by_id(tenant.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User {}", tenant.user_id)))?;

        if let Some(first_name) = update.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            user.last_name = last_name;
        }
        if let Some(email) = update.email {
            let email = email.trim().to_lowercase();
            if email != user.email && self.users.exists_by_email(&email).await? {
                return Err(AuthError::EmailAlreadyExists.into());
            }
            user.email = email;
        }
        if let Some(phone) = update.phone_number {
            user.phone_number = Some(phone);
        }
        if let Some(address) = update.property_address {
            tenant.property_address = address;
        }
        if let Some(status) = update.status {
            if status.eq_ignore_ascii_case(TenantStatus::Active.as_str()) {
                tenant.activate();
            } else {
                tenant.deactivate();
            }
        }

        user.updated_at = chrono::Utc::now();
        tenant.touch();
        let user = self.users.update(user).await?;
        let tenant = self.tenants.update(tenant).await?;

        tracing::info!(tenant_id = tenant.id, "Tenant updated");
        Ok(TenantDetails {
            tenant,
            user: Some(user),
        })
    }

    /// Hard delete; child rows cascade in the schema
    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        if !self.tenants.delete(id).await? {
            return Err(DomainError::not_found(format!("Tenant {}", id)));
        }
        tracing::info!(tenant_id = id, "Tenant deleted");
        Ok(())
    }

    /// Creates the single tenant profile a user may own
    pub async fn create_for_user(
        &self,
        user_id: i64,
        property_address: &str,
        unit_number: Option<String>,
    ) -> DomainResult<Tenant> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(AuthError::UserNotFound.into());
        }
        if self.tenants.find_by_user_id(user_id).await?.is_some() {
            return Err(AuthError::TenantProfileExists.into());
        }
        let tenant = Tenant::new(user_id, property_address).with_unit(unit_number);
        self.tenants.create(tenant).await
    }

    async fn find(&self, id: i64) -> DomainResult<Tenant> {
        self.tenants
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Tenant {}", id)))
    }

    async fn details(&self, tenant: Tenant) -> DomainResult<TenantDetails> {
        let user = self.users.find_by_id(tenant.user_id).await?;
        Ok(TenantDetails { tenant, user })
    }
}
