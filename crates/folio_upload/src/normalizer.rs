//! Batch Normalizer: ordered media references in, ordered durable URLs out.

use crate::{ProgressSink, ProgressTracker};
use folio_core::{MediaReference, PathPrefix, ProgressUpdate};
use folio_error::{FolioResult, UploadError, UploadErrorKind};
use folio_storage::ObjectStoreAdapter;
use tracing::{debug, info, instrument, warn};

/// Uploads the inline references of a batch and passes external URLs through.
///
/// The normalizer keeps no state between calls. Retrying a failed batch with the
/// original references uploads every inline item again as a new object.
///
/// # Example
///
/// ```
/// use folio_core::PathPrefix;
/// use folio_storage::{MemoryStore, ObjectStoreAdapter};
/// use folio_upload::BatchNormalizer;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let adapter = ObjectStoreAdapter::new(Arc::new(MemoryStore::new("memory://media")));
/// let normalizer = BatchNormalizer::new(adapter);
/// let prefix = PathPrefix::new("projects/images")?;
///
/// let references = vec![
///     "https://cdn.example/a.png".to_string(),
///     "data:image/png;base64,iVBORw0KGgo=".to_string(),
/// ];
/// let urls = normalizer.normalize(&prefix, &references, None).await?;
///
/// assert_eq!(urls.len(), 2);
/// assert_eq!(urls[0], "https://cdn.example/a.png");
/// assert!(urls[1].starts_with("memory://media/projects/images/"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BatchNormalizer {
    adapter: ObjectStoreAdapter,
}

impl BatchNormalizer {
    /// Create a normalizer that uploads through `adapter`.
    pub fn new(adapter: ObjectStoreAdapter) -> Self {
        Self { adapter }
    }

    /// The adapter inline payloads are uploaded through.
    pub fn adapter(&self) -> &ObjectStoreAdapter {
        &self.adapter
    }

    /// Normalize `references` into durable URLs under `prefix`.
    ///
    /// For each item, in order, `progress` first receives a report labelled
    /// `"File k"` (inline) or `"URL k"` (external) with `completed_files` equal to
    /// the number of items already done. After the last item it receives a single
    /// `"Completed"` report. An empty batch returns immediately without reports.
    ///
    /// # Errors
    ///
    /// Returns `FolioErrorKind::Upload` carrying the failing position and one of:
    /// - `UploadErrorKind::MalformedPayload` for a `data:` reference that does not parse
    /// - `UploadErrorKind::StoreUnavailable` when the store write fails
    /// - `UploadErrorKind::CallbackFault` when `progress` returns an error
    ///
    /// Items after the failing one are never touched.
    #[instrument(skip(self, references, progress), fields(prefix = %prefix, total = references.len()))]
    pub async fn normalize(
        &self,
        prefix: &PathPrefix,
        references: &[String],
        mut progress: Option<&mut dyn ProgressSink>,
    ) -> FolioResult<Vec<String>> {
        let total = references.len();
        if total == 0 {
            debug!("Empty batch, nothing to normalize");
            return Ok(Vec::new());
        }

        let mut urls = Vec::with_capacity(total);
        let mut uploaded = 0;

        for (index, raw) in references.iter().enumerate() {
            let update = ProgressUpdate::item(index, total, MediaReference::looks_inline(raw));
            emit(&mut progress, &update, index, total)?;

            let reference = MediaReference::classify(raw).map_err(|e| {
                warn!(index, total, error = %e.kind(), "Malformed inline payload");
                UploadError::new(UploadErrorKind::MalformedPayload(e.kind().clone()), index, total)
            })?;

            match reference {
                MediaReference::Inline(payload) => {
                    let url = self
                        .adapter
                        .store_inline(prefix, &payload)
                        .await
                        .map_err(|e| {
                            warn!(index, total, error = %e, "Upload failed, aborting batch");
                            UploadError::new(
                                UploadErrorKind::StoreUnavailable(e.user_message()),
                                index,
                                total,
                            )
                            .with_source(e)
                        })?;
                    debug!(index, url = %url, "Uploaded inline payload");
                    uploaded += 1;
                    urls.push(url);
                }
                MediaReference::External(url) => {
                    debug!(index, "Passing external URL through");
                    urls.push(url);
                }
            }
        }

        emit(&mut progress, &ProgressUpdate::finished(total), total - 1, total)?;

        info!(total, uploaded, passed_through = total - uploaded, "Normalized batch");
        Ok(urls)
    }

    /// Normalize while driving `tracker` through its lifecycle.
    ///
    /// Starts the tracker with the batch size, feeds it every progress report, and
    /// finishes with `complete` on success or `fail` with a user-facing message on error.
    ///
    /// # Errors
    ///
    /// Everything [`normalize`](Self::normalize) returns, plus `FolioErrorKind::Tracker`
    /// when the `single-flight` feature rejects the start.
    pub async fn normalize_tracked(
        &self,
        prefix: &PathPrefix,
        references: &[String],
        tracker: &mut ProgressTracker,
    ) -> FolioResult<Vec<String>> {
        tracker.start(references.len())?;

        let sink: &mut dyn ProgressSink = &mut *tracker;
        match self.normalize(prefix, references, Some(sink)).await {
            Ok(urls) => {
                tracker.complete();
                Ok(urls)
            }
            Err(e) => {
                tracker.fail(e.user_message());
                Err(e)
            }
        }
    }
}

fn emit(
    progress: &mut Option<&mut dyn ProgressSink>,
    update: &ProgressUpdate,
    index: usize,
    total: usize,
) -> FolioResult<()> {
    if let Some(sink) = progress.as_deref_mut() {
        sink.on_progress(update).map_err(|e| {
            UploadError::new(UploadErrorKind::CallbackFault(e.user_message()), index, total)
                .with_source(e)
        })?;
    }
    Ok(())
}
