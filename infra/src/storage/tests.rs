//! Tests for the local attachment store

use nbj_core::errors::DomainError;
use nbj_core::services::FileStorage;
use nbj_shared::StorageConfig;

use super::LocalFileStorage;

async fn temp_storage() -> LocalFileStorage {
    let dir = std::env::temp_dir().join(format!("nbj-storage-{}", uuid::Uuid::new_v4()));
    let config = StorageConfig {
        upload_dir: dir.to_string_lossy().into_owned(),
        ..Default::default()
    };
    LocalFileStorage::new(&config).await.unwrap()
}

#[tokio::test]
async fn test_store_read_delete() {
    let storage = temp_storage().await;

    let stored = storage.store("leak photo.JPG", b"jpeg-bytes").await.unwrap();
    assert!(stored.file_name.ends_with(".jpg"));
    assert_eq!(stored.size, 10);
    assert!(stored.file_path.starts_with(storage.root().to_str().unwrap()));

    let bytes = storage.read(&stored.file_path).await.unwrap();
    assert_eq!(bytes, b"jpeg-bytes");

    storage.delete(&stored.file_path).await.unwrap();
    assert!(matches!(
        storage.read(&stored.file_path).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_delete_missing_file_is_ok() {
    let storage = temp_storage().await;
    let missing = storage.root().join("gone.pdf");
    assert!(storage.delete(missing.to_str().unwrap()).await.is_ok());
}

#[tokio::test]
async fn test_paths_outside_root_are_rejected() {
    let storage = temp_storage().await;
    let escape = storage.root().join("..").join("..").join("etc-passwd");

    assert!(storage.read(escape.to_str().unwrap()).await.is_err());
    assert!(storage.read("/etc/hostname").await.is_err());
}

#[tokio::test]
async fn test_generated_names_are_unique() {
    let storage = temp_storage().await;
    let a = storage.store("invoice.pdf", b"a").await.unwrap();
    let b = storage.store("invoice.pdf", b"b").await.unwrap();
    assert_ne!(a.file_name, b.file_name);
}
