use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use nbj_core::entities::MaintenanceRequestFile;

#[derive(Debug, Clone, Deserialize)]
pub struct UploadQuery {
    pub filename: Option<String>,
}

/// Attachment as embedded in a maintenance request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentDto {
    pub id: i64,
    pub original_filename: String,
    pub file_type: String,
    pub file_size: i64,
    pub uploaded_at: DateTime<Utc>,
    pub download_url: String,
    pub thumbnail_url: Option<String>,
    pub view_url: String,
}

impl From<&MaintenanceRequestFile> for AttachmentDto {
    fn from(file: &MaintenanceRequestFile) -> Self {
        Self {
            id: file.id,
            original_filename: file.original_file_name.clone(),
            file_type: file.content_type.clone(),
            file_size: file.file_size,
            uploaded_at: file.uploaded_at,
            download_url: file.download_url(),
            thumbnail_url: file.thumbnail_url(),
            view_url: file.view_url(),
        }
    }
}

/// Metadata returned by `GET /files/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadataDto {
    pub id: i64,
    pub maintenance_request_id: Option<i64>,
    pub original_filename: String,
    pub stored_filename: String,
    pub file_type: String,
    pub attachment_type: String,
    pub file_size: i64,
    pub uploaded_at: DateTime<Utc>,
    pub download_url: String,
    pub thumbnail_url: Option<String>,
}

impl From<&MaintenanceRequestFile> for FileMetadataDto {
    fn from(file: &MaintenanceRequestFile) -> Self {
        Self {
            id: file.id,
            maintenance_request_id: file.maintenance_request_id,
            original_filename: file.original_file_name.clone(),
            stored_filename: file.file_name.clone(),
            file_type: file.content_type.clone(),
            attachment_type: file.attachment_type.to_string(),
            file_size: file.file_size,
            uploaded_at: file.uploaded_at,
            download_url: file.download_url(),
            thumbnail_url: file.thumbnail_url(),
        }
    }
}
