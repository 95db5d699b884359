//! Maintenance request repository trait

use async_trait::async_trait;
use nbj_shared::{Page, PageRequest};

use crate::domain::entities::maintenance::{
    MaintenancePriority, MaintenanceRequest, MaintenanceStatus,
};
use crate::errors::DomainError;

/// Optional filters for the admin listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaintenanceFilter {
    pub status: Option<MaintenanceStatus>,
    pub priority: Option<MaintenancePriority>,
}

impl MaintenanceFilter {
    pub fn matches(&self, request: &MaintenanceRequest) -> bool {
        self.status.map_or(true, |s| request.status == s)
            && self.priority.map_or(true, |p| request.priority == p)
    }
}

/// Persistence for maintenance requests
///
/// Sort fields: `id`, `createdAt`, `updatedAt`, `title`, `status`,
/// `priority`, `category`, `scheduledDate`, `completedAt`; unknown fields
/// sort by `createdAt`.
#[async_trait]
pub trait MaintenanceRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<MaintenanceRequest>, DomainError>;

    async fn find_page(
        &self,
        filter: &MaintenanceFilter,
        page: &PageRequest,
    ) -> Result<Page<MaintenanceRequest>, DomainError>;

    async fn find_by_tenant_page(
        &self,
        tenant_id: i64,
        page: &PageRequest,
    ) -> Result<Page<MaintenanceRequest>, DomainError>;

    /// The `limit` newest requests of a tenant
    async fn find_recent_by_tenant(
        &self,
        tenant_id: i64,
        limit: usize,
    ) -> Result<Vec<MaintenanceRequest>, DomainError>;

    async fn create(&self, request: MaintenanceRequest) -> Result<MaintenanceRequest, DomainError>;

    async fn update(&self, request: MaintenanceRequest) -> Result<MaintenanceRequest, DomainError>;

    async fn delete(&self, id: i64) -> Result<bool, DomainError>;

    async fn count_by_status(&self, status: MaintenanceStatus) -> Result<u64, DomainError>;

    async fn count_by_tenant_and_status(
        &self,
        tenant_id: i64,
        status: MaintenanceStatus,
    ) -> Result<u64, DomainError>;
}
