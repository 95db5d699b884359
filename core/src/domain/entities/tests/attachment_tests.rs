//! Unit tests for maintenance attachments

use crate::domain::entities::attachment::{file_extension, AttachmentType, MaintenanceRequestFile};

#[test]
fn test_attachment_type_from_content_type() {
    assert_eq!(AttachmentType::from_content_type("image/png"), AttachmentType::Image);
    assert_eq!(AttachmentType::from_content_type("VIDEO/mp4"), AttachmentType::Video);
    assert_eq!(AttachmentType::from_content_type("audio/mpeg"), AttachmentType::Audio);
    assert_eq!(AttachmentType::from_content_type("application/pdf"), AttachmentType::Document);
    assert_eq!(AttachmentType::from_content_type("text/plain"), AttachmentType::Document);
    assert_eq!(AttachmentType::from_content_type("font/woff"), AttachmentType::Other);
}

#[test]
fn test_file_extension() {
    assert_eq!(file_extension("photo.JPG"), Some("jpg".to_string()));
    assert_eq!(file_extension("archive.tar.gz"), Some("gz".to_string()));
    assert_eq!(file_extension("README"), None);
    assert_eq!(file_extension(".env"), None);
}

#[test]
fn test_urls() {
    let mut file = MaintenanceRequestFile::new(
        Some(2),
        "sink.jpg",
        "0b9c.jpg",
        "uploads/maintenance/0b9c.jpg",
        "image/jpeg",
        2048,
    );
    file.id = 17;
    assert_eq!(file.download_url(), "/api/files/17/download");
    assert_eq!(file.view_url(), "/api/files/17");
    assert_eq!(file.thumbnail_url().as_deref(), Some("/api/files/17/download"));
    assert_eq!(file.file_extension.as_deref(), Some("jpg"));
    assert!(file.is_image());
}
