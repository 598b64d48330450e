//! Progress tracker errors.

/// Kinds of progress tracker errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum TrackerErrorKind {
    /// A batch is already uploading on this tracker
    #[display("a batch of {} files is already uploading", _0)]
    AlreadyUploading(usize),
}

/// Progress tracker error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Tracker Error: {} at line {} in {}", kind, line, file)]
pub struct TrackerError {
    kind: TrackerErrorKind,
    line: u32,
    file: &'static str,
}

impl TrackerError {
    /// Create a new tracker error with caller location tracking.
    #[track_caller]
    pub fn new(kind: TrackerErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &TrackerErrorKind {
        &self.kind
    }
}
