//! Storage seam for attachment bytes

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::attachment::file_extension;
use crate::errors::{DomainError, DomainResult};

/// Where a stored upload ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Generated name: a UUID plus the original extension
    pub file_name: String,
    /// Location handed back to `read` and `delete`
    pub file_path: String,
    pub size: i64,
}

/// Byte store for uploaded files
///
/// The local-disk implementation lives in `nbj_infra`.
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Writes `bytes` under a fresh generated name
    async fn store(&self, original_name: &str, bytes: &[u8]) -> DomainResult<StoredFile>;

    async fn read(&self, file_path: &str) -> DomainResult<Vec<u8>>;

    /// Missing files are not an error
    async fn delete(&self, file_path: &str) -> DomainResult<()>;
}

/// Generated storage name keeping the original extension
pub fn generated_file_name(original_name: &str) -> String {
    match file_extension(original_name) {
        Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
        None => Uuid::new_v4().to_string(),
    }
}

/// In-memory store for tests
#[derive(Debug, Clone, Default)]
pub struct MockFileStorage {
    files: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MockFileStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn contains(&self, file_path: &str) -> bool {
        self.files.read().await.contains_key(file_path)
    }

    pub async fn len(&self) -> usize {
        self.files.read().await.len()
    }
}

#[async_trait]
impl FileStorage for MockFileStorage {
    async fn store(&self, original_name: &str, bytes: &[u8]) -> DomainResult<StoredFile> {
        let file_name = generated_file_name(original_name);
        let file_path = format!("memory/maintenance/{}", file_name);
        self.files
            .write()
            .await
            .insert(file_path.clone(), bytes.to_vec());
        Ok(StoredFile {
            file_name,
            file_path,
            size: bytes.len() as i64,
        })
    }

    async fn read(&self, file_path: &str) -> DomainResult<Vec<u8>> {
        self.files
            .read()
            .await
            .get(file_path)
            .cloned()
            .ok_or_else(|| DomainError::storage(format!("No stored file at {}", file_path)))
    }

    async fn delete(&self, file_path: &str) -> DomainResult<()> {
        self.files.write().await.remove(file_path);
        Ok(())
    }
}
