//! Batch upload errors.

use crate::PayloadErrorKind;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Reasons a batch upload aborts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum UploadErrorKind {
    /// An inline-looking reference failed to parse
    #[display("malformed payload: {}", _0)]
    MalformedPayload(PayloadErrorKind),
    /// The object store rejected or failed the write
    #[display("store unavailable: {}", _0)]
    StoreUnavailable(String),
    /// The progress callback returned an error
    #[display("progress callback failed: {}", _0)]
    CallbackFault(String),
}

/// Batch upload error carrying the position of the failing item.
///
/// `index` is zero-based; messages use one-based numbering. Store and callback
/// failures keep the original error as [`source`](Error::source).
///
/// # Examples
///
/// ```
/// use folio_error::{UploadError, UploadErrorKind};
///
/// let err = UploadError::new(
///     UploadErrorKind::StoreUnavailable("connection reset".to_string()),
///     1,
///     3,
/// );
/// assert_eq!(
///     err.summary(),
///     "failed to upload file 2 of 3: store unavailable: connection reset"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct UploadError {
    kind: UploadErrorKind,
    index: usize,
    total: usize,
    source: Option<Arc<dyn Error + Send + Sync>>,
    line: u32,
    file: &'static str,
}

impl UploadError {
    /// Create a new upload error with caller location tracking.
    #[track_caller]
    pub fn new(kind: UploadErrorKind, index: usize, total: usize) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            index,
            total,
            source: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Attach the error that caused the abort.
    pub fn with_source(mut self, source: impl Error + Send + Sync + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    /// Get the error kind.
    pub fn kind(&self) -> &UploadErrorKind {
        &self.kind
    }

    /// Zero-based position of the failing reference.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of references in the batch.
    pub fn total(&self) -> usize {
        self.total
    }

    /// User-facing message without source location.
    pub fn summary(&self) -> String {
        format!(
            "failed to upload file {} of {}: {}",
            self.index + 1,
            self.total,
            self.kind
        )
    }
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Upload Error: {} at line {} in {}",
            self.summary(),
            self.line,
            self.file
        )
    }
}

impl Error for UploadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_deref()
            .map(|source| source as &(dyn Error + 'static))
    }
}
