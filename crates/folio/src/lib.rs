//! Folio - media pipeline for a portfolio content editor.
//!
//! Content entities (projects, profile, education entries, ...) carry ordered lists of
//! media references. Some are inline `data:` payloads picked in the editor, others are
//! URLs that are already hosted. Folio uploads the inline ones to durable object
//! storage, leaves the rest untouched, and reports progress along the way.
//!
//! # Quick Start
//!
//! ```rust
//! use folio::{BatchNormalizer, MemoryStore, ObjectStoreAdapter, PathPrefix, ProgressTracker};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let adapter = ObjectStoreAdapter::new(Arc::new(MemoryStore::new("memory://media")));
//! let normalizer = BatchNormalizer::new(adapter);
//! let mut tracker = ProgressTracker::new();
//!
//! let references = vec![
//!     "https://cdn.example/a.png".to_string(),
//!     "data:image/png;base64,iVBORw0KGgo=".to_string(),
//! ];
//! let prefix = PathPrefix::new("projects/images")?;
//! let urls = normalizer
//!     .normalize_tracked(&prefix, &references, &mut tracker)
//!     .await?;
//!
//! assert_eq!(urls.len(), 2);
//! assert_eq!(tracker.percent(), 100);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - `folio-error` - Error types
//! - `folio-core` - Media references, inline payloads, path prefixes
//! - `folio-storage` - Object store trait, backends, and the upload adapter
//! - `folio-upload` - Batch normalizer and progress tracker
//!
//! This crate re-exports everything and adds configuration, logging setup, the
//! command handlers and the CLI.

mod config;
mod handlers;
mod observability;

pub use config::{
    FolioConfig, LoggingConfig, StorageBackend, StorageConfig, StorageConfigBuilder, UploadConfig,
};
pub use handlers::{OutputFormat, normalize_references, store_file};
pub use observability::init_observability;

// Re-export workspace crates
pub use folio_core::*;
pub use folio_error::*;
pub use folio_storage::{
    FileSystemStore, MemoryStore, ObjectMetadata, ObjectStore, ObjectStoreAdapter, StoredObject,
};
pub use folio_upload::*;
