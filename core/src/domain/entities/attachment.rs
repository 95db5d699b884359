//! File attached to a maintenance request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttachmentType {
    Image,
    Document,
    Video,
    Audio,
    Other,
}

text_enum!(AttachmentType {
    Image => "IMAGE",
    Document => "DOCUMENT",
    Video => "VIDEO",
    Audio => "AUDIO",
    Other => "OTHER",
});

impl AttachmentType {
    /// Classifies a MIME type
    pub fn from_content_type(content_type: &str) -> Self {
        let content_type = content_type.trim().to_ascii_lowercase();
        if content_type.starts_with("image/") {
            AttachmentType::Image
        } else if content_type.starts_with("video/") {
            AttachmentType::Video
        } else if content_type.starts_with("audio/") {
            AttachmentType::Audio
        } else if content_type.starts_with("application/") || content_type.starts_with("text/") {
            AttachmentType::Document
        } else {
            AttachmentType::Other
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceRequestFile {
    pub id: i64,

    /// Owning request; `None` for uploads never linked to a request
    pub maintenance_request_id: Option<i64>,

    /// Name the client uploaded
    pub original_file_name: String,

    /// Name on disk
    pub file_name: String,

    pub file_path: String,
    pub content_type: String,
    pub file_size: i64,
    pub file_extension: Option<String>,
    pub attachment_type: AttachmentType,
    pub description: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

impl MaintenanceRequestFile {
    pub fn new(
        maintenance_request_id: Option<i64>,
        original_file_name: impl Into<String>,
        file_name: impl Into<String>,
        file_path: impl Into<String>,
        content_type: impl Into<String>,
        file_size: i64,
    ) -> Self {
        let original_file_name = original_file_name.into();
        let content_type = content_type.into();
        Self {
            id: 0,
            maintenance_request_id,
            file_extension: file_extension(&original_file_name),
            attachment_type: AttachmentType::from_content_type(&content_type),
            original_file_name,
            file_name: file_name.into(),
            file_path: file_path.into(),
            content_type,
            file_size,
            description: None,
            uploaded_at: Utc::now(),
        }
    }

    pub fn download_url(&self) -> String {
        format!("/api/files/{}/download", self.id)
    }

    pub fn view_url(&self) -> String {
        format!("/api/files/{}", self.id)
    }

    /// Images are their own thumbnail
    pub fn thumbnail_url(&self) -> Option<String> {
        (self.attachment_type == AttachmentType::Image).then(|| self.download_url())
    }

    pub fn is_image(&self) -> bool {
        self.attachment_type == AttachmentType::Image
    }
}

/// Lower-case extension without the dot
pub fn file_extension(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
