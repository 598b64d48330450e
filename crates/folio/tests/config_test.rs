//! Tests for configuration loading.

use folio::{
    ConfigErrorKind, FolioConfig, FolioErrorKind, MemoryStore, ObjectStore, ObjectStoreAdapter, PathPrefix,
    StorageBackend, StorageConfigBuilder,
};
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn test_load_bundled_defaults() {
    let config = FolioConfig::load().unwrap();

    assert_eq!(*config.storage().backend(), StorageBackend::Filesystem);
    assert_eq!(config.logging().level(), "info");
    assert!(!config.logging().json());
    assert_eq!(config.upload().default_prefix(), "media");
}

#[test]
fn test_from_file_with_partial_sections() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("folio.toml");
    std::fs::write(
        &path,
        r#"
[storage]
backend = "memory"
public_base_url = "memory://preview"

[upload]
default_prefix = "projects/images"
"#,
    )
    .unwrap();

    let config = FolioConfig::from_file(&path).unwrap();

    assert_eq!(*config.storage().backend(), StorageBackend::Memory);
    assert_eq!(config.storage().public_base_url(), "memory://preview");
    assert_eq!(config.upload().default_prefix(), "projects/images");
    // Missing section falls back to defaults
    assert_eq!(config.logging().level(), "info");
}

#[test]
fn test_from_file_rejects_unknown_backend() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("folio.toml");
    std::fs::write(&path, "[storage]\nbackend = \"s3\"\n").unwrap();

    let err = FolioConfig::from_file(&path).unwrap_err();
    match err.kind() {
        FolioErrorKind::Config(e) => {
            assert!(matches!(e.kind(), ConfigErrorKind::Parse(_)));
            assert_eq!(e.path(), Some(path.as_path()));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_from_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let err = FolioConfig::from_file(temp_dir.path().join("absent.toml")).unwrap_err();
    match err.kind() {
        FolioErrorKind::Config(e) => assert!(matches!(e.kind(), ConfigErrorKind::Read(_))),
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_build_filesystem_store() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("media");
    let storage = StorageConfigBuilder::default()
        .backend(StorageBackend::Filesystem)
        .root(root.clone())
        .public_base_url("https://media.example")
        .build()
        .unwrap();

    let adapter = ObjectStoreAdapter::new(storage.build_store().unwrap());
    let prefix = PathPrefix::new("profile").unwrap();
    let url = adapter
        .store_inline_payload(&prefix, "data:image/png;base64,iVBORw0KGgo=")
        .await
        .unwrap();

    assert!(root.is_dir());
    assert!(url.starts_with("https://media.example/profile/"));
    assert_eq!(adapter.backend_name(), "filesystem");
}

#[test]
fn test_build_memory_store() {
    let storage = FolioConfig::default()
        .storage()
        .clone()
        .with_backend(StorageBackend::Memory);

    let store = storage.build_store().unwrap();
    assert_eq!(store.backend_name(), "memory");

    // Same backend name as a directly constructed store
    let direct: Arc<MemoryStore> = Arc::new(MemoryStore::new("memory://x"));
    assert_eq!(ObjectStoreAdapter::new(direct).backend_name(), "memory");
}
