//! Attachment metadata and downloads

use std::sync::Arc;

use crate::domain::entities::attachment::MaintenanceRequestFile;
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::AttachmentRepository;

use super::storage::FileStorage;

/// Bytes of an attachment together with its metadata
#[derive(Debug, Clone)]
pub struct FileDownload {
    pub file: MaintenanceRequestFile,
    pub bytes: Vec<u8>,
}

pub struct FileService {
    attachments: Arc<dyn AttachmentRepository>,
    storage: Arc<dyn FileStorage>,
    max_file_size: usize,
}

impl FileService {
    pub fn new(
        attachments: Arc<dyn AttachmentRepository>,
        storage: Arc<dyn FileStorage>,
        max_file_size: usize,
    ) -> Self {
        Self {
            attachments,
            storage,
            max_file_size,
        }
    }

    pub async fn get_metadata(&self, id: i64) -> DomainResult<MaintenanceRequestFile> {
        self.attachments
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("File {}", id)))
    }

    /// Metadata plus content; a metadata row whose bytes are gone reads as
    /// not found
    pub async fn download(&self, id: i64) -> DomainResult<FileDownload> {
        let file = self.get_metadata(id).await?;
        let bytes = self.storage.read(&file.file_path).await.map_err(|e| {
            tracing::error!(file_id = id, path = %file.file_path, error = %e, "Stored file unreadable");
            DomainError::not_found(format!("File {}", id))
        })?;
        Ok(FileDownload { file, bytes })
    }

    /// Stores an upload and records it against a maintenance request
    pub async fn store_for_request(
        &self,
        request_id: i64,
        original_name: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> DomainResult<MaintenanceRequestFile> {
        let original_name = original_name.trim();
        if original_name.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "filename".to_string(),
            }
            .into());
        }
        if bytes.is_empty() {
            return Err(DomainError::validation("Uploaded file is empty"));
        }
        if bytes.len() > self.max_file_size {
            return Err(DomainError::validation(format!(
                "File exceeds the {} byte limit",
                self.max_file_size
            )));
        }

        let stored = self.storage.store(original_name, bytes).await?;
        let record = MaintenanceRequestFile::new(
            Some(request_id),
            original_name,
            stored.file_name,
            stored.file_path.clone(),
            content_type,
            stored.size,
        );

        match self.attachments.create(record).await {
            Ok(file) => {
                tracing::info!(file_id = file.id, request_id, "Attachment stored");
                Ok(file)
            }
            Err(e) => {
                // keep disk and table in step
                if let Err(cleanup) = self.storage.delete(&stored.file_path).await {
                    tracing::error!(path = %stored.file_path, error = %cleanup, "Failed to remove orphaned upload");
                }
                Err(e)
            }
        }
    }

    pub async fn list_for_request(&self, request_id: i64) -> DomainResult<Vec<MaintenanceRequestFile>> {
        self.attachments.find_by_request(request_id).await
    }

    /// Removes the stored bytes and metadata of every attachment of a request
    pub async fn delete_for_request(&self, request_id: i64) -> DomainResult<u64> {
        let files = self.attachments.find_by_request(request_id).await?;
        for file in &files {
            if let Err(e) = self.storage.delete(&file.file_path).await {
                tracing::error!(file_id = file.id, error = %e, "Failed to delete stored attachment");
            }
        }
        self.attachments.delete_by_request(request_id).await
    }

    /// Attachment rows no longer linked to a request
    pub async fn orphaned(&self) -> DomainResult<Vec<MaintenanceRequestFile>> {
        self.attachments.find_orphaned().await
    }
}
