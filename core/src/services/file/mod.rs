//! Maintenance attachments: byte storage behind a trait plus metadata
//! bookkeeping.

mod service;
mod storage;

pub use service::{FileDownload, FileService};
pub use storage::{generated_file_name, FileStorage, MockFileStorage, StoredFile};
