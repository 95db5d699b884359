//! In-memory implementation of AttachmentRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::attachment::MaintenanceRequestFile;
use crate::errors::DomainError;
use crate::repositories::IdSequence;

use super::trait_::AttachmentRepository;

/// In-memory attachment repository
pub struct MockAttachmentRepository {
    files: Arc<RwLock<HashMap<i64, MaintenanceRequestFile>>>,
    ids: IdSequence,
}

impl MockAttachmentRepository {
    pub fn new() -> Self {
        Self {
            files: Arc::new(RwLock::new(HashMap::new())),
            ids: IdSequence::new(),
        }
    }
}

impl Default for MockAttachmentRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AttachmentRepository for MockAttachmentRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<MaintenanceRequestFile>, DomainError> {
        Ok(self.files.read().await.get(&id).cloned())
    }

    async fn find_by_request(
        &self,
        request_id: i64,
    ) -> Result<Vec<MaintenanceRequestFile>, DomainError> {
        let files = self.files.read().await;
        let mut found: Vec<MaintenanceRequestFile> = files
            .values()
            .filter(|f| f.maintenance_request_id == Some(request_id))
            .cloned()
            .collect();
        found.sort_by_key(|f| f.id);
        Ok(found)
    }

    async fn create(&self, mut file: MaintenanceRequestFile) -> Result<MaintenanceRequestFile, DomainError> {
        file.id = self.ids.next();
        self.files.write().await.insert(file.id, file.clone());
        Ok(file)
    }

    async fn delete_by_request(&self, request_id: i64) -> Result<u64, DomainError> {
        let mut files = self.files.write().await;
        let before = files.len();
        files.retain(|_, f| f.maintenance_request_id != Some(request_id));
        Ok((before - files.len()) as u64)
    }

    async fn find_orphaned(&self) -> Result<Vec<MaintenanceRequestFile>, DomainError> {
        let files = self.files.read().await;
        let mut found: Vec<MaintenanceRequestFile> = files
            .values()
            .filter(|f| f.maintenance_request_id.is_none())
            .cloned()
            .collect();
        found.sort_by_key(|f| f.id);
        Ok(found)
    }
}
