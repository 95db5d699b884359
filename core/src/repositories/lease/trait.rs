//! Lease agreement repository trait

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::entities::lease::{LeaseAgreement, LeaseStatus};
use crate::errors::DomainError;

#[async_trait]
pub trait LeaseRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<LeaseAgreement>, DomainError>;

    /// Leases of one tenant, newest start date first
    async fn find_by_tenant(&self, tenant_id: i64) -> Result<Vec<LeaseAgreement>, DomainError>;

    /// Leases in `status`, or every lease when `None`; newest first
    async fn find_by_status(
        &self,
        status: Option<LeaseStatus>,
    ) -> Result<Vec<LeaseAgreement>, DomainError>;

    /// ACTIVE leases whose end date falls in `from..=to`, soonest first
    async fn find_expiring(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<LeaseAgreement>, DomainError>;

    async fn create(&self, lease: LeaseAgreement) -> Result<LeaseAgreement, DomainError>;

    async fn update(&self, lease: LeaseAgreement) -> Result<LeaseAgreement, DomainError>;

    async fn count_by_status(&self, status: LeaseStatus) -> Result<u64, DomainError>;
}
