//! Error types for the Folio media pipeline.
//!
//! This crate provides the foundation error types used throughout the Folio workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use folio_error::{FolioResult, StorageError, StorageErrorKind};
//!
//! fn write_object() -> FolioResult<String> {
//!     Err(StorageError::new(StorageErrorKind::Unavailable("quota exceeded".to_string())))?
//! }
//!
//! match write_object() {
//!     Ok(url) => println!("Stored at: {}", url),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod json;
mod payload;
mod storage;
mod tracker;
mod upload;

pub use config::{ConfigError, ConfigErrorKind};
pub use error::{FolioError, FolioErrorKind, FolioResult};
pub use json::{JsonError, JsonErrorKind};
pub use payload::{PayloadError, PayloadErrorKind};
pub use storage::{StorageError, StorageErrorKind};
pub use tracker::{TrackerError, TrackerErrorKind};
pub use upload::{UploadError, UploadErrorKind};
