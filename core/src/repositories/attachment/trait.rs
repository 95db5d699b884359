//! Maintenance attachment repository trait

use async_trait::async_trait;

use crate::domain::entities::attachment::MaintenanceRequestFile;
use crate::errors::DomainError;

#[async_trait]
pub trait AttachmentRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<MaintenanceRequestFile>, DomainError>;

    /// Files of one request in upload order
    async fn find_by_request(
        &self,
        request_id: i64,
    ) -> Result<Vec<MaintenanceRequestFile>, DomainError>;

    async fn create(&self, file: MaintenanceRequestFile) -> Result<MaintenanceRequestFile, DomainError>;

    /// Removes every row of a request and returns how many were removed
    async fn delete_by_request(&self, request_id: i64) -> Result<u64, DomainError>;

    /// Files not linked to any request
    async fn find_orphaned(&self) -> Result<Vec<MaintenanceRequestFile>, DomainError>;
}
