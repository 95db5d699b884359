//! Attachment storage configuration

use serde::{Deserialize, Serialize};

/// Where uploaded maintenance attachments are written
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Root directory for uploads; attachments go in `<upload_dir>/maintenance`
    pub upload_dir: String,

    /// Largest accepted upload in bytes
    #[serde(default = "default_max_file_size")]
    pub max_file_size: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: String::from("./uploads"),
            max_file_size: default_max_file_size(),
        }
    }
}

fn default_max_file_size() -> usize {
    10 * 1024 * 1024 // 10 MB
}
