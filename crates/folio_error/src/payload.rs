//! Inline payload parsing errors.

/// Ways an inline (`data:`) media reference can be malformed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PayloadErrorKind {
    /// The descriptor does not start with the `data:` scheme
    #[display("missing data: scheme")]
    MissingScheme,
    /// No `;base64,` marker separates the header from the body
    #[display("missing ;base64, marker")]
    MissingBase64Marker,
    /// The declared MIME type is empty or not of the form `type/subtype`
    #[display("invalid MIME type '{}'", _0)]
    InvalidMimeType(String),
    /// The body is not valid standard base64
    #[display("invalid base64 body: {}", _0)]
    InvalidBase64(String),
    /// The body decodes to zero bytes
    #[display("empty payload body")]
    EmptyBody,
}

/// Malformed inline payload error with location tracking.
///
/// # Examples
///
/// ```
/// use folio_error::{PayloadError, PayloadErrorKind};
///
/// let err = PayloadError::new(PayloadErrorKind::MissingBase64Marker);
/// assert_eq!(err.kind(), &PayloadErrorKind::MissingBase64Marker);
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Malformed Payload: {} at line {} in {}", kind, line, file)]
pub struct PayloadError {
    kind: PayloadErrorKind,
    line: u32,
    file: &'static str,
}

impl PayloadError {
    /// Create a new payload error with caller location tracking.
    #[track_caller]
    pub fn new(kind: PayloadErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &PayloadErrorKind {
        &self.kind
    }
}
