//! Top-level error wrapper types.

use crate::{
    ConfigError, JsonError, PayloadError, StorageError, TrackerError, UploadError,
};

/// Every error condition the Folio crates can report.
///
/// # Examples
///
/// ```
/// use folio_error::{FolioError, PayloadError, PayloadErrorKind};
///
/// let err: FolioError = PayloadError::new(PayloadErrorKind::EmptyBody).into();
/// assert!(format!("{}", err).contains("Malformed Payload"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum FolioErrorKind {
    /// Object storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Malformed inline payload
    #[from(PayloadError)]
    Payload(PayloadError),
    /// Batch upload aborted
    #[from(UploadError)]
    Upload(UploadError),
    /// Progress tracker misuse
    #[from(TrackerError)]
    Tracker(TrackerError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
}

/// Folio error with kind discrimination.
///
/// # Examples
///
/// ```
/// use folio_error::{ConfigError, ConfigErrorKind, FolioErrorKind, FolioResult};
///
/// fn might_fail() -> FolioResult<()> {
///     Err(ConfigError::new(ConfigErrorKind::Parse("missing field `storage`".into())))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), FolioErrorKind::Config(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Folio Error: {}", _0)]
pub struct FolioError(Box<FolioErrorKind>);

impl FolioError {
    /// Create a new error from a kind.
    pub fn new(kind: FolioErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &FolioErrorKind {
        &self.0
    }

    /// Message suitable for showing to the person who started the upload.
    ///
    /// Batch failures are reported with their position and cause, without
    /// source location noise.
    pub fn user_message(&self) -> String {
        match self.kind() {
            FolioErrorKind::Upload(e) => e.summary(),
            FolioErrorKind::Payload(e) => format!("malformed payload: {}", e.kind()),
            FolioErrorKind::Storage(e) => e.kind.to_string(),
            other => other.to_string(),
        }
    }
}

// Generic From implementation for any type that converts to FolioErrorKind
impl<T> From<T> for FolioError
where
    T: Into<FolioErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Folio operations.
pub type FolioResult<T> = std::result::Result<T, FolioError>;
