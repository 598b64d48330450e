//! Configuration error types.

use std::path::PathBuf;

/// Stage of configuration loading that failed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ConfigErrorKind {
    /// A configuration source could not be read or merged
    #[display("cannot read configuration: {}", _0)]
    Read(String),
    /// The merged sources do not match the expected settings
    #[display("invalid configuration: {}", _0)]
    Parse(String),
}

/// Configuration error, optionally tied to the file that caused it.
///
/// # Examples
///
/// ```
/// use folio_error::{ConfigError, ConfigErrorKind};
///
/// let err = ConfigError::new(ConfigErrorKind::Parse("unknown variant `s3` for storage.backend".into()))
///     .with_path("/etc/folio/folio.toml");
/// assert!(err.to_string().contains("storage.backend"));
/// assert!(err.to_string().contains("/etc/folio/folio.toml"));
/// ```
#[derive(Debug, Clone, derive_more::Error)]
pub struct ConfigError {
    kind: ConfigErrorKind,
    path: Option<PathBuf>,
    line: u32,
    file: &'static str,
}

impl ConfigError {
    /// Create a configuration error at the caller's location.
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            path: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Attach the configuration file the error came from.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// What went wrong.
    pub fn kind(&self) -> &ConfigErrorKind {
        &self.kind
    }

    /// The offending file, when a single file was loaded.
    pub fn path(&self) -> Option<&std::path::Path> {
        self.path.as_deref()
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Config Error: {}", self.kind)?;
        if let Some(path) = &self.path {
            write!(f, " ({})", path.display())?;
        }
        write!(f, " at line {} in {}", self.line, self.file)
    }
}
