//! Tests for the normalize and store-file command handlers.

use folio::{
    FolioConfig, FolioErrorKind, JsonErrorKind, OutputFormat, StorageBackend, StorageErrorKind,
    normalize_references, store_file,
};
use tempfile::TempDir;

const PNG: &str = "data:image/png;base64,iVBORw0KGgo=";

fn memory_config() -> FolioConfig {
    let storage = FolioConfig::default()
        .storage()
        .clone()
        .with_backend(StorageBackend::Memory)
        .with_public_base_url("memory://preview".to_string());
    FolioConfig::default().with_storage(storage)
}

fn input(references: &[&str]) -> String {
    serde_json::to_string(references).unwrap()
}

#[tokio::test]
async fn test_normalize_prints_one_url_per_line() {
    let config = memory_config();
    let mut out = Vec::new();

    let urls = normalize_references(
        &config,
        Some("projects/images"),
        &input(&["https://cdn.example/a.png", PNG]),
        OutputFormat::Human,
        &mut out,
    )
    .await
    .unwrap();

    assert_eq!(urls.len(), 2);
    assert_eq!(urls[0], "https://cdn.example/a.png");
    assert!(urls[1].starts_with("memory://preview/projects/images/"));
    assert!(urls[1].ends_with(".png"));

    let printed = String::from_utf8(out).unwrap();
    assert_eq!(printed.lines().collect::<Vec<_>>(), urls);
}

#[tokio::test]
async fn test_normalize_uses_default_prefix() {
    let config = memory_config();
    let mut out = Vec::new();

    let urls = normalize_references(&config, None, &input(&[PNG]), OutputFormat::Human, &mut out)
        .await
        .unwrap();

    assert!(urls[0].starts_with("memory://preview/media/"));
}

#[tokio::test]
async fn test_normalize_json_report_on_success() {
    let config = memory_config();
    let mut out = Vec::new();

    normalize_references(
        &config,
        Some("profile"),
        &input(&[PNG, "https://cdn.example/me.jpg"]),
        OutputFormat::Json,
        &mut out,
    )
    .await
    .unwrap();

    let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(report["urls"].as_array().unwrap().len(), 2);
    assert_eq!(report["urls"][1], "https://cdn.example/me.jpg");
    assert_eq!(report["progress"]["phase"], "completed");
    assert_eq!(report["progress"]["progress"], 100);
    assert!(report["progress"]["error"].is_null());
}

#[tokio::test]
async fn test_normalize_json_report_on_failure() {
    let config = memory_config();
    let mut out = Vec::new();

    let err = normalize_references(
        &config,
        Some("profile"),
        &input(&[PNG, "data:image/png,not-base64"]),
        OutputFormat::Json,
        &mut out,
    )
    .await
    .unwrap_err();

    assert!(matches!(err.kind(), FolioErrorKind::Upload(_)));

    let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert!(report["urls"].is_null());
    assert_eq!(report["progress"]["phase"], "failed");
    assert_eq!(report["progress"]["completedFiles"], 1);
    assert_eq!(report["progress"]["progress"], 50);
    assert!(
        report["progress"]["error"]
            .as_str()
            .unwrap()
            .starts_with("failed to upload file 2 of 2")
    );
}

#[tokio::test]
async fn test_normalize_failure_prints_nothing_in_human_mode() {
    let config = memory_config();
    let mut out = Vec::new();

    let result = normalize_references(
        &config,
        Some("profile"),
        &input(&["data:image/png,not-base64"]),
        OutputFormat::Human,
        &mut out,
    )
    .await;

    assert!(result.is_err());
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_normalize_rejects_non_array_input() {
    let config = memory_config();
    let mut out = Vec::new();

    let err = normalize_references(
        &config,
        None,
        r#"{"images": []}"#,
        OutputFormat::Json,
        &mut out,
    )
    .await
    .unwrap_err();

    match err.kind() {
        FolioErrorKind::Json(e) => assert!(matches!(e.kind(), JsonErrorKind::Decode { .. })),
        other => panic!("unexpected error: {}", other),
    }
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_store_file_prints_url() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("cover.jpg");
    std::fs::write(&path, b"jpeg bytes").unwrap();
    let config = memory_config();
    let mut out = Vec::new();

    let url = store_file(&config, Some("projects/covers"), &path, &mut out)
        .await
        .unwrap();

    assert!(url.starts_with("memory://preview/projects/covers/"));
    assert!(url.ends_with("_cover.jpg"));
    assert_eq!(String::from_utf8(out).unwrap(), format!("{}\n", url));
}

#[tokio::test]
async fn test_store_file_missing_path_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config = memory_config();
    let mut out = Vec::new();

    let err = store_file(&config, None, &temp_dir.path().join("absent.png"), &mut out)
        .await
        .unwrap_err();

    match err.kind() {
        FolioErrorKind::Storage(e) => assert!(matches!(e.kind, StorageErrorKind::FileRead(_))),
        other => panic!("unexpected error: {}", other),
    }
    assert!(out.is_empty());
}
