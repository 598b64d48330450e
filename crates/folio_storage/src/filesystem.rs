//! Filesystem-backed object store.
//!
//! Objects are written below a root directory and served from a public base URL,
//! e.g. a static file server or a CDN origin mounted on the same directory.

use crate::ObjectStore;
use derive_getters::Getters;
use folio_error::{FolioResult, JsonError, JsonErrorKind, StorageError, StorageErrorKind};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};
use uuid::Uuid;

/// Metadata persisted beside each object as a hidden `.{name}.meta` JSON sidecar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMetadata {
    /// Declared MIME type of the object
    content_type: String,
    /// Object size in bytes
    size: u64,
}

/// Filesystem storage backend.
///
/// Stores objects at `{base_path}/{object path}` and returns
/// `{public_base_url}/{object path}`.
///
/// # Example Structure
///
/// ```text
/// /var/folio/media/
/// ├── projects/
/// │   └── images/
/// │       ├── 5b1c0e7a-....png
/// │       ├── .5b1c0e7a-....png.meta
/// │       ├── 1729250000000_cover.jpg
/// │       └── .1729250000000_cover.jpg.meta
/// └── profile/
///     ├── 9f03a2d4-....webp
///     └── .9f03a2d4-....webp.meta
/// ```
///
/// Writes go to temp files first and are renamed into place, so readers never
/// observe a half-written object. The metadata sidecar lands before the object,
/// so every visible object has its content type recorded. Object names may not
/// start with `.`; that namespace belongs to sidecars and temp files.
pub struct FileSystemStore {
    base_path: PathBuf,
    public_base_url: String,
}

impl FileSystemStore {
    /// Create a new filesystem store.
    ///
    /// Creates the base directory if it doesn't exist.
    ///
    /// # Arguments
    ///
    /// * `base_path` - Root directory for stored objects
    /// * `public_base_url` - URL under which `base_path` is served
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created or accessed.
    #[tracing::instrument(skip(base_path, public_base_url))]
    pub fn new(
        base_path: impl Into<PathBuf>,
        public_base_url: impl Into<String>,
    ) -> FolioResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        let public_base_url = public_base_url.into().trim_end_matches('/').to_string();
        tracing::info!(
            path = %base_path.display(),
            public_base_url = %public_base_url,
            "Created filesystem store"
        );
        Ok(Self {
            base_path,
            public_base_url,
        })
    }

    /// Root directory of this store.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Map an object path onto the filesystem, rejecting anything that could escape the root.
    fn resolve(&self, path: &str) -> FolioResult<PathBuf> {
        let relative = Path::new(path);
        let contained = !path.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));
        let hidden = relative
            .file_name()
            .is_some_and(|name| name.to_string_lossy().starts_with('.'));
        if !contained || hidden {
            return Err(StorageError::new(StorageErrorKind::InvalidPath(path.to_string())).into());
        }
        Ok(self.base_path.join(relative))
    }

    /// Read the metadata recorded for the object at `path`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPath` for paths outside the root, `FileRead` when the object
    /// has no sidecar, and a JSON error when the sidecar is corrupt.
    #[tracing::instrument(skip(self))]
    pub async fn metadata(&self, path: &str) -> FolioResult<ObjectMetadata> {
        let sidecar = sidecar_path(&self.resolve(path)?);
        let raw = tokio::fs::read(&sidecar).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                sidecar.display(),
                e
            )))
        })?;
        let metadata: ObjectMetadata = serde_json::from_slice(&raw)
            .map_err(|e| JsonError::new(JsonErrorKind::decode("object metadata", e)))?;
        Ok(metadata)
    }
}

fn sidecar_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{}.meta", name))
}

fn temp_path(target: &Path) -> PathBuf {
    target.with_file_name(format!(".{}.tmp", Uuid::new_v4().simple()))
}

async fn write_file(path: &Path, bytes: &[u8]) -> FolioResult<()> {
    tokio::fs::write(path, bytes).await.map_err(|e| {
        StorageError::new(StorageErrorKind::FileWrite(format!(
            "{}: {}",
            path.display(),
            e
        )))
    })?;
    Ok(())
}

async fn remove_quietly(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        tracing::warn!(path = %path.display(), error = %e, "Failed to remove leftover file");
    }
}

async fn rename_into_place(from: &Path, to: &Path) -> FolioResult<()> {
    if let Err(e) = tokio::fs::rename(from, to).await {
        remove_quietly(from).await;
        return Err(StorageError::new(StorageErrorKind::FileWrite(format!(
            "rename {} to {}: {}",
            from.display(),
            to.display(),
            e
        )))
        .into());
    }
    Ok(())
}

#[async_trait::async_trait]
impl ObjectStore for FileSystemStore {
    #[tracing::instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn put(&self, path: &str, bytes: &[u8], content_type: &str) -> FolioResult<String> {
        let target = self.resolve(path)?;

        // Create parent directories
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        let metadata = ObjectMetadata {
            content_type: content_type.to_string(),
            size: bytes.len() as u64,
        };
        let sidecar_json = serde_json::to_vec(&metadata)
            .map_err(|e| JsonError::new(JsonErrorKind::encode("object metadata", e)))?;

        // Stage both files, then publish the sidecar before the object
        let object_temp = temp_path(&target);
        let sidecar_temp = temp_path(&target);
        if let Err(e) = write_file(&object_temp, bytes).await {
            remove_quietly(&object_temp).await;
            return Err(e);
        }
        if let Err(e) = write_file(&sidecar_temp, &sidecar_json).await {
            remove_quietly(&object_temp).await;
            remove_quietly(&sidecar_temp).await;
            return Err(e);
        }

        let sidecar = sidecar_path(&target);
        if let Err(e) = rename_into_place(&sidecar_temp, &sidecar).await {
            remove_quietly(&object_temp).await;
            return Err(e);
        }
        if let Err(e) = rename_into_place(&object_temp, &target).await {
            remove_quietly(&sidecar).await;
            return Err(e);
        }

        let url = format!("{}/{}", self.public_base_url, path);
        tracing::info!(
            path = %target.display(),
            size = bytes.len(),
            content_type,
            url = %url,
            "Stored object"
        );

        Ok(url)
    }

    fn backend_name(&self) -> &'static str {
        "filesystem"
    }
}
