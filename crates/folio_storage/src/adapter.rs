//! Object Store Adapter: payloads in, durable URLs out.

use crate::ObjectStore;
use chrono::Utc;
use folio_core::{InlinePayload, PathPrefix, content_type_for_extension};
use folio_error::{FolioResult, StorageError, StorageErrorKind};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Translates payloads plus a path prefix into durable URLs.
///
/// The adapter is a pass-through: one call, one object, one attempt. Retry policy
/// belongs to the caller. Clones share the same underlying store.
#[derive(Clone)]
pub struct ObjectStoreAdapter {
    store: Arc<dyn ObjectStore>,
}

impl ObjectStoreAdapter {
    /// Wrap an object store.
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// Name of the wrapped backend.
    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    /// Persist an inline `data:` descriptor under `prefix`.
    ///
    /// # Errors
    ///
    /// - `FolioErrorKind::Payload` if the descriptor is malformed; nothing is stored
    /// - `FolioErrorKind::Storage` if the store rejects the write
    #[instrument(skip(self, descriptor), fields(prefix = %prefix, descriptor_len = descriptor.len()))]
    pub async fn store_inline_payload(
        &self,
        prefix: &PathPrefix,
        descriptor: &str,
    ) -> FolioResult<String> {
        let payload = InlinePayload::parse(descriptor)?;
        self.store_inline(prefix, &payload).await
    }

    /// Persist an already-decoded inline payload under `prefix`.
    ///
    /// The object is named `{prefix}/{uuid}[.{ext}]`.
    #[instrument(
        skip(self, payload),
        fields(prefix = %prefix, size = payload.len(), mime_type = %payload.mime_type())
    )]
    pub async fn store_inline(
        &self,
        prefix: &PathPrefix,
        payload: &InlinePayload,
    ) -> FolioResult<String> {
        let id = Uuid::new_v4();
        let name = match payload.extension() {
            Some(ext) => format!("{}.{}", id, ext),
            None => id.to_string(),
        };
        let path = prefix.join(&name);

        let url = self
            .store
            .put(&path, payload.bytes(), payload.mime_type())
            .await?;

        info!(path = %path, url = %url, backend = self.store.backend_name(), "Stored inline payload");
        Ok(url)
    }

    /// Persist a file from disk under `prefix`.
    ///
    /// The object is named `{prefix}/{unix millis}_{file name}` so that re-uploading a
    /// same-named file does not overwrite the earlier object. The content type is
    /// derived from the file extension.
    ///
    /// # Errors
    ///
    /// - `StorageErrorKind::InvalidPath` if `file` has no UTF-8 file name
    /// - `StorageErrorKind::FileRead` if the file cannot be read
    /// - any error from the underlying store
    #[instrument(skip(self, file), fields(prefix = %prefix, file = %file.display()))]
    pub async fn store_file(&self, prefix: &PathPrefix, file: &Path) -> FolioResult<String> {
        let file_name = file
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                StorageError::new(StorageErrorKind::InvalidPath(file.display().to_string()))
            })?;

        let bytes = tokio::fs::read(file).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                file.display(),
                e
            )))
        })?;

        let content_type = file
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or("application/octet-stream", content_type_for_extension);

        let path = prefix.join(&format!("{}_{}", Utc::now().timestamp_millis(), file_name));
        let url = self.store.put(&path, &bytes, content_type).await?;

        info!(path = %path, url = %url, size = bytes.len(), "Stored file");
        Ok(url)
    }
}

impl std::fmt::Debug for ObjectStoreAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectStoreAdapter")
            .field("backend", &self.store.backend_name())
            .finish()
    }
}
