//! JSON error types.

/// Direction of the failed JSON conversion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum JsonErrorKind {
    /// Input did not have the expected shape
    #[display("cannot decode {}: {}", what, message)]
    Decode {
        /// The document being read, e.g. "reference list"
        what: &'static str,
        /// Parser message
        message: String,
    },
    /// A value could not be rendered as JSON
    #[display("cannot encode {}: {}", what, message)]
    Encode {
        /// The document being written
        what: &'static str,
        /// Serializer message
        message: String,
    },
}

impl JsonErrorKind {
    /// Decode failure for `what`.
    pub fn decode(what: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Decode {
            what,
            message: err.to_string(),
        }
    }

    /// Encode failure for `what`.
    pub fn encode(what: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Encode {
            what,
            message: err.to_string(),
        }
    }
}

/// JSON error with location tracking.
///
/// # Examples
///
/// ```
/// use folio_error::{JsonError, JsonErrorKind};
///
/// let err = JsonError::new(JsonErrorKind::decode("reference list", "expected `[` at line 1"));
/// assert!(err.to_string().contains("cannot decode reference list"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("JSON Error: {} at line {} in {}", kind, line, file)]
pub struct JsonError {
    kind: JsonErrorKind,
    line: u32,
    file: &'static str,
}

impl JsonError {
    /// Create a JSON error at the caller's location.
    #[track_caller]
    pub fn new(kind: JsonErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// What went wrong.
    pub fn kind(&self) -> &JsonErrorKind {
        &self.kind
    }
}
