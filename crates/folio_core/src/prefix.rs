//! Destination namespace for stored objects.

use folio_error::{StorageError, StorageErrorKind};

/// Logical namespace segment (e.g. `projects/images`) under which new objects are grouped.
///
/// Surrounding slashes are trimmed and repeated slashes collapse. Empty prefixes
/// and `.`/`..` segments are rejected.
///
/// ```
/// use folio_core::PathPrefix;
///
/// let prefix = PathPrefix::new("/projects//images/").unwrap();
/// assert_eq!(prefix.as_str(), "projects/images");
/// assert_eq!(prefix.join("a.png"), "projects/images/a.png");
/// assert!(PathPrefix::new("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
#[display("{}", _0)]
pub struct PathPrefix(String);

impl PathPrefix {
    /// Validate and normalize a path prefix.
    pub fn new(prefix: impl AsRef<str>) -> Result<Self, StorageError> {
        let raw = prefix.as_ref().trim();
        let segments: Vec<&str> = raw.split('/').filter(|segment| !segment.is_empty()).collect();
        if segments.is_empty() {
            return Err(StorageError::new(StorageErrorKind::InvalidPath(
                "empty path prefix".to_string(),
            )));
        }
        if segments
            .iter()
            .any(|segment| *segment == "." || *segment == "..")
        {
            return Err(StorageError::new(StorageErrorKind::InvalidPath(format!(
                "invalid segment in path prefix '{}'",
                raw
            ))));
        }
        Ok(Self(segments.join("/")))
    }

    /// The normalized prefix.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Object path for `name` under this prefix.
    pub fn join(&self, name: &str) -> String {
        format!("{}/{}", self.0, name)
    }
}

impl std::str::FromStr for PathPrefix {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
