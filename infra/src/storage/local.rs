//! Maintenance attachments on the local filesystem

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use nbj_core::errors::{DomainError, DomainResult};
use nbj_core::services::file::generated_file_name;
use nbj_core::services::{FileStorage, StoredFile};
use nbj_shared::StorageConfig;

use crate::InfrastructureError;

const SUBDIRECTORY: &str = "maintenance";

/// Writes uploads to `<upload_dir>/maintenance/<uuid>.<ext>`
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    root: PathBuf,
}

impl LocalFileStorage {
    /// Creates the attachment directory if it does not exist yet
    pub async fn new(config: &StorageConfig) -> Result<Self, InfrastructureError> {
        let root = Path::new(&config.upload_dir).join(SUBDIRECTORY);
        fs::create_dir_all(&root).await?;
        tracing::info!(path = %root.display(), "File storage ready");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Rejects paths that escape the attachment directory
    fn resolve(&self, file_path: &str) -> DomainResult<PathBuf> {
        let path = PathBuf::from(file_path);
        let escapes = path
            .components()
            .any(|c| matches!(c, Component::ParentDir));
        if escapes || !path.starts_with(&self.root) {
            tracing::warn!(file_path, "Rejected attachment path outside storage root");
            return Err(DomainError::not_found("File"));
        }
        Ok(path)
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn store(&self, original_name: &str, bytes: &[u8]) -> DomainResult<StoredFile> {
        let file_name = generated_file_name(original_name);
        let path = self.root.join(&file_name);

        fs::write(&path, bytes).await.map_err(|e| {
            tracing::error!(error = %e, path = %path.display(), "Failed to write attachment");
            DomainError::storage(format!("Could not store file {}", original_name))
        })?;

        tracing::debug!(file_name = %file_name, size = bytes.len(), "Attachment stored");
        Ok(StoredFile {
            file_name,
            file_path: path.to_string_lossy().into_owned(),
            size: bytes.len() as i64,
        })
    }

    async fn read(&self, file_path: &str) -> DomainResult<Vec<u8>> {
        let path = self.resolve(file_path)?;
        fs::read(&path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => DomainError::not_found("File"),
            _ => {
                tracing::error!(error = %e, path = %path.display(), "Failed to read attachment");
                DomainError::storage("Could not read file")
            }
        })
    }

    async fn delete(&self, file_path: &str) -> DomainResult<()> {
        let path = self.resolve(file_path)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                tracing::error!(error = %e, path = %path.display(), "Failed to delete attachment");
                Err(DomainError::storage("Could not delete file"))
            }
        }
    }
}
