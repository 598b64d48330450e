//! Tests for batch normalization.

use folio_core::{PathPrefix, ProgressUpdate};
use folio_error::{
    FolioError, FolioErrorKind, FolioResult, JsonError, JsonErrorKind, PayloadErrorKind, StorageError,
    StorageErrorKind, UploadErrorKind,
};
use folio_storage::{ObjectStore, ObjectStoreAdapter};
use folio_upload::BatchNormalizer;
use std::error::Error;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

const PNG: &str = "data:image/png;base64,iVBORw0KGgo=";
const GIF: &str = "data:image/gif;base64,R0lGODlh";

/// Store that counts calls and can fail on a given call number (zero-based).
#[derive(Default)]
struct CountingStore {
    calls: AtomicUsize,
    fail_on_call: Option<usize>,
}

impl CountingStore {
    fn failing_on(call: usize) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_on_call: Some(call),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ObjectStore for CountingStore {
    async fn put(&self, path: &str, _bytes: &[u8], _content_type: &str) -> FolioResult<String> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_on_call == Some(call) {
            return Err(
                StorageError::new(StorageErrorKind::Unavailable("network down".to_string())).into(),
            );
        }
        Ok(format!("https://store.example/{}", path))
    }

    fn backend_name(&self) -> &'static str {
        "counting"
    }
}

fn setup(store: CountingStore) -> (Arc<CountingStore>, BatchNormalizer) {
    let store = Arc::new(store);
    let normalizer = BatchNormalizer::new(ObjectStoreAdapter::new(store.clone()));
    (store, normalizer)
}

fn prefix() -> PathPrefix {
    PathPrefix::new("projects/images").unwrap()
}

fn refs(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_mixed_batch_scenario() {
    let (store, normalizer) = setup(CountingStore::default());
    let references = refs(&["https://cdn.example/a.png", PNG]);

    let urls = normalizer.normalize(&prefix(), &references, None).await.unwrap();

    assert_eq!(store.calls(), 1);
    assert_eq!(urls.len(), 2);
    assert_eq!(urls[0], "https://cdn.example/a.png");
    assert!(urls[1].starts_with("https://store.example/projects/images/"));
    assert!(urls[1].ends_with(".png"));
}

#[tokio::test]
async fn test_order_and_length_preserved() {
    let (store, normalizer) = setup(CountingStore::default());
    let references = refs(&[
        PNG,
        "https://cdn.example/1.jpg",
        GIF,
        "https://cdn.example/2.jpg",
        PNG,
    ]);

    let urls = normalizer.normalize(&prefix(), &references, None).await.unwrap();

    assert_eq!(urls.len(), references.len());
    assert_eq!(store.calls(), 3);
    assert!(urls[0].ends_with(".png"));
    assert_eq!(urls[1], "https://cdn.example/1.jpg");
    assert!(urls[2].ends_with(".gif"));
    assert_eq!(urls[3], "https://cdn.example/2.jpg");
    assert!(urls[4].ends_with(".png"));
    assert_ne!(urls[0], urls[4]);
}

#[tokio::test]
async fn test_external_only_batch_is_pass_through() {
    let (store, normalizer) = setup(CountingStore::default());
    let references = refs(&[
        "https://cdn.example/a.png",
        "https://cdn.example/b.png",
        "not even a url",
    ]);

    let urls = normalizer.normalize(&prefix(), &references, None).await.unwrap();

    assert_eq!(urls, references);
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn test_renormalizing_output_is_idempotent() {
    let (store, normalizer) = setup(CountingStore::default());
    let references = refs(&[PNG, "https://cdn.example/a.png"]);

    let first = normalizer.normalize(&prefix(), &references, None).await.unwrap();
    let second = normalizer.normalize(&prefix(), &first, None).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(store.calls(), 1);
}

#[tokio::test]
async fn test_single_inline_uses_adapter_url() {
    let (store, normalizer) = setup(CountingStore::default());

    let urls = normalizer.normalize(&prefix(), &refs(&[PNG]), None).await.unwrap();

    assert_eq!(store.calls(), 1);
    assert_ne!(urls[0], PNG);
    assert!(urls[0].starts_with("https://store.example/"));
}

#[tokio::test]
async fn test_empty_batch_reports_nothing() {
    let (store, normalizer) = setup(CountingStore::default());
    let mut reports = 0;
    let mut sink = |_: &ProgressUpdate| -> FolioResult<()> {
        reports += 1;
        Ok(())
    };

    let urls = normalizer.normalize(&prefix(), &[], Some(&mut sink)).await.unwrap();

    assert!(urls.is_empty());
    assert_eq!(reports, 0);
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn test_progress_is_monotonic() {
    let (_store, normalizer) = setup(CountingStore::default());
    let references = refs(&[PNG, "https://cdn.example/a.png", GIF]);
    let mut updates = Vec::new();
    let mut sink = |update: &ProgressUpdate| -> FolioResult<()> {
        updates.push(update.clone());
        Ok(())
    };

    normalizer
        .normalize(&prefix(), &references, Some(&mut sink))
        .await
        .unwrap();

    let completed: Vec<_> = updates.iter().map(|u| u.completed_files).collect();
    assert_eq!(completed, vec![0, 1, 2, 3]);

    let labels: Vec<_> = updates.iter().map(|u| u.current_file.as_str()).collect();
    assert_eq!(labels, vec!["File 1", "URL 2", "File 3", "Completed"]);

    assert!(updates.iter().all(|u| u.total_files == 3));
    let last = updates.last().unwrap();
    assert_eq!(last.completed_files, last.total_files);
}

#[tokio::test]
async fn test_malformed_inline_fails_fast() {
    let (store, normalizer) = setup(CountingStore::default());
    let references = refs(&[
        "https://cdn.example/a.png",
        "data:image/png,iVBORw0KGgo=",
        PNG,
    ]);
    let mut updates = Vec::new();
    let mut sink = |update: &ProgressUpdate| -> FolioResult<()> {
        updates.push(update.clone());
        Ok(())
    };

    let err = normalizer
        .normalize(&prefix(), &references, Some(&mut sink))
        .await
        .unwrap_err();

    match err.kind() {
        FolioErrorKind::Upload(e) => {
            assert_eq!(
                e.kind(),
                &UploadErrorKind::MalformedPayload(PayloadErrorKind::MissingBase64Marker)
            );
            assert_eq!(e.index(), 1);
            assert_eq!(e.total(), 3);
        }
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(store.calls(), 0);
    assert_eq!(updates.len(), 2);
    assert_eq!(updates[1].current_file, "File 2");
}

#[tokio::test]
async fn test_store_failure_aborts_with_position() {
    let (store, normalizer) = setup(CountingStore::failing_on(1));
    let references = refs(&[PNG, GIF, PNG, PNG]);

    let err = normalizer
        .normalize(&prefix(), &references, None)
        .await
        .unwrap_err();

    match err.kind() {
        FolioErrorKind::Upload(e) => {
            assert!(matches!(e.kind(), UploadErrorKind::StoreUnavailable(_)));
            assert_eq!(e.index(), 1);
            assert!(e.summary().starts_with("failed to upload file 2 of 4"));
            assert!(e.summary().contains("network down"));

            let cause = e
                .source()
                .and_then(|source| source.downcast_ref::<FolioError>())
                .expect("store error kept as source");
            match cause.kind() {
                FolioErrorKind::Storage(storage) => assert_eq!(
                    storage.kind,
                    StorageErrorKind::Unavailable("network down".to_string())
                ),
                other => panic!("unexpected cause: {}", other),
            }
        }
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(store.calls(), 2);
}

#[tokio::test]
async fn test_retry_reuploads_everything() {
    let (store, normalizer) = setup(CountingStore::failing_on(1));
    let references = refs(&[PNG, GIF]);

    assert!(normalizer.normalize(&prefix(), &references, None).await.is_err());
    let urls = normalizer.normalize(&prefix(), &references, None).await.unwrap();

    assert_eq!(urls.len(), 2);
    // Two calls from the failed attempt, two more from the retry.
    assert_eq!(store.calls(), 4);
}

#[tokio::test]
async fn test_callback_error_aborts_batch() {
    let (store, normalizer) = setup(CountingStore::default());
    let references = refs(&[PNG, PNG, PNG]);
    let mut sink = |update: &ProgressUpdate| -> FolioResult<()> {
        if update.completed_files == 1 {
            Err(JsonError::new(JsonErrorKind::encode("progress event", "ui went away")))?
        }
        Ok(())
    };

    let err = normalizer
        .normalize(&prefix(), &references, Some(&mut sink))
        .await
        .unwrap_err();

    match err.kind() {
        FolioErrorKind::Upload(e) => {
            assert!(matches!(e.kind(), UploadErrorKind::CallbackFault(_)));
            assert_eq!(e.index(), 1);
            let cause = e
                .source()
                .and_then(|source| source.downcast_ref::<FolioError>())
                .expect("callback error kept as source");
            assert!(matches!(cause.kind(), FolioErrorKind::Json(_)));
        }
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(store.calls(), 1);
}
