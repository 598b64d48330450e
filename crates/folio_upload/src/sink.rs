//! Progress callback seam.

use folio_core::ProgressUpdate;
use folio_error::FolioResult;

/// Receives progress reports while a batch runs.
///
/// Sinks run inline with the upload loop. Returning an error aborts the batch
/// with `UploadErrorKind::CallbackFault`.
///
/// Closures taking `&ProgressUpdate` and returning `FolioResult<()>` are sinks:
///
/// ```
/// use folio_core::ProgressUpdate;
/// use folio_error::FolioResult;
/// use folio_upload::ProgressSink;
///
/// let mut seen = Vec::new();
/// let mut sink = |update: &ProgressUpdate| -> FolioResult<()> {
///     seen.push(update.completed_files);
///     Ok(())
/// };
/// sink.on_progress(&ProgressUpdate::finished(2)).unwrap();
/// assert_eq!(seen, vec![2]);
/// ```
pub trait ProgressSink: Send {
    /// Handle one progress report.
    fn on_progress(&mut self, update: &ProgressUpdate) -> FolioResult<()>;
}

impl<F> ProgressSink for F
where
    F: FnMut(&ProgressUpdate) -> FolioResult<()> + Send,
{
    fn on_progress(&mut self, update: &ProgressUpdate) -> FolioResult<()> {
        self(update)
    }
}
