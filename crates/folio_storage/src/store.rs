//! Object storage capability.

use folio_error::FolioResult;

/// The external object-storage service.
///
/// Implementations persist bytes at a path and hand back a durable URL that is
/// retrievable as soon as `put` returns. A single write must be atomic: on error,
/// no object may be left at `path`.
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `bytes` at `path` with the given content type.
    ///
    /// # Arguments
    ///
    /// * `path` - Object path, relative to the store root (e.g. `projects/images/<uuid>.png`)
    /// * `bytes` - Object contents
    /// * `content_type` - MIME type, persisted as object metadata
    ///
    /// # Returns
    ///
    /// The durable URL of the new object
    async fn put(&self, path: &str, bytes: &[u8], content_type: &str) -> FolioResult<String>;

    /// Short backend name for logs (e.g. "filesystem").
    fn backend_name(&self) -> &'static str;
}
