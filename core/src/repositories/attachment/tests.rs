//! Tests for the in-memory attachment repository

use crate::domain::entities::attachment::MaintenanceRequestFile;
use crate::repositories::{AttachmentRepository, MockAttachmentRepository};

fn file(request_id: Option<i64>, name: &str) -> MaintenanceRequestFile {
    MaintenanceRequestFile::new(request_id, name, name, format!("/tmp/{}", name), "image/png", 10)
}

#[tokio::test]
async fn test_delete_by_request_leaves_others() {
    let repo = MockAttachmentRepository::new();
    repo.create(file(Some(1), "a.png")).await.unwrap();
    repo.create(file(Some(1), "b.png")).await.unwrap();
    repo.create(file(Some(2), "c.png")).await.unwrap();
    repo.create(file(None, "stray.png")).await.unwrap();

    assert_eq!(repo.delete_by_request(1).await.unwrap(), 2);
    assert!(repo.find_by_request(1).await.unwrap().is_empty());
    assert_eq!(repo.find_by_request(2).await.unwrap().len(), 1);

    let orphaned = repo.find_orphaned().await.unwrap();
    assert_eq!(orphaned.len(), 1);
    assert_eq!(orphaned[0].original_file_name, "stray.png");
}
