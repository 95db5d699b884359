//! Tenant repository trait

use async_trait::async_trait;
use nbj_shared::{Page, PageRequest};

use crate::domain::entities::tenant::Tenant;
use crate::errors::DomainError;

/// Persistence for tenant profiles
///
/// Sort fields understood by `find_page`: `id`, `createdAt`, `updatedAt`,
/// `propertyAddress`, `status`, `leaseEndDate`. Anything else falls back to
/// `createdAt`.
#[async_trait]
pub trait TenantRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Tenant>, DomainError>;

    /// The profile owned by `user_id`, if any
    async fn find_by_user_id(&self, user_id: i64) -> Result<Option<Tenant>, DomainError>;

    async fn find_by_user_ids(&self, user_ids: &[i64]) -> Result<Vec<Tenant>, DomainError>;

    async fn find_page(&self, page: &PageRequest) -> Result<Page<Tenant>, DomainError>;

    /// Persist a new profile
    ///
    /// Fails with `DomainError::Conflict` when the user already has one.
    async fn create(&self, tenant: Tenant) -> Result<Tenant, DomainError>;

    async fn update(&self, tenant: Tenant) -> Result<Tenant, DomainError>;

    async fn delete(&self, id: i64) -> Result<bool, DomainError>;

    async fn exists(&self, id: i64) -> Result<bool, DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;

    /// Tenants linked to a managed property
    async fn count_by_property(&self, property_id: i64) -> Result<u64, DomainError>;
}
