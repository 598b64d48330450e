//! Object storage for the Folio media pipeline.
//!
//! This crate turns media payloads into durable, publicly retrievable URLs.
//!
//! # Features
//!
//! - **Pluggable backends**: [`ObjectStore`] abstracts the external storage service
//! - **Atomic writes**: a failed put leaves no partial object behind
//! - **Explicit wiring**: [`ObjectStoreAdapter`] is constructed and injected, never global
//!
//! # Example
//!
//! ```rust
//! use folio_core::PathPrefix;
//! use folio_storage::{MemoryStore, ObjectStoreAdapter};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let adapter = ObjectStoreAdapter::new(Arc::new(MemoryStore::new("memory://media")));
//! let prefix = PathPrefix::new("projects/images")?;
//!
//! let url = adapter
//!     .store_inline_payload(&prefix, "data:image/png;base64,iVBORw0KGgo=")
//!     .await?;
//! assert!(url.starts_with("memory://media/projects/images/"));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod adapter;
mod filesystem;
mod memory;
mod store;

pub use adapter::ObjectStoreAdapter;
pub use filesystem::{FileSystemStore, ObjectMetadata};
pub use folio_error::{StorageError, StorageErrorKind};
pub use memory::{MemoryStore, StoredObject};
pub use store::ObjectStore;
