//! Seam over the Stripe Connect HTTP API

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::{DomainError, DomainResult};

/// The two Connect calls onboarding needs
#[async_trait]
pub trait ConnectAccountGateway: Send + Sync {
    /// False when no API key is available
    fn is_configured(&self) -> bool;

    /// Creates an express account requesting card payments and transfers,
    /// returning its id (`acct_...`)
    async fn create_express_account(&self, email: &str) -> DomainResult<String>;

    /// Creates an `account_onboarding` link and returns its URL
    async fn create_onboarding_link(&self, account_id: &str) -> DomainResult<String>;
}

/// Scriptable gateway for tests
#[derive(Debug, Clone)]
pub struct MockConnectAccountGateway {
    configured: bool,
    fail: bool,
    accounts_created: Arc<AtomicUsize>,
}

impl MockConnectAccountGateway {
    pub fn new() -> Self {
        Self {
            configured: true,
            fail: false,
            accounts_created: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::new()
        }
    }

    /// Every call answers with an upstream error
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn accounts_created(&self) -> usize {
        self.accounts_created.load(Ordering::SeqCst)
    }

    fn upstream_error() -> DomainError {
        DomainError::ExternalService {
            service: "Stripe".to_string(),
            message: "card_declined".to_string(),
        }
    }
}

impl Default for MockConnectAccountGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConnectAccountGateway for MockConnectAccountGateway {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn create_express_account(&self, _email: &str) -> DomainResult<String> {
        if self.fail {
            return Err(Self::upstream_error());
        }
        let n = self.accounts_created.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("acct_test{:04}", n))
    }

    async fn create_onboarding_link(&self, account_id: &str) -> DomainResult<String> {
        if self.fail {
            return Err(Self::upstream_error());
        }
        Ok(format!("https://connect.stripe.test/setup/{}", account_id))
    }
}
