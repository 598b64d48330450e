//! In-process object store for dry runs and tests.

use crate::ObjectStore;
use derive_getters::Getters;
use folio_error::FolioResult;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// An object held by [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct StoredObject {
    bytes: Vec<u8>,
    content_type: String,
}

/// Object store that keeps everything in memory.
///
/// URLs are `{base_url}/{path}`; nothing is retrievable outside the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    base_url: String,
    objects: RwLock<HashMap<String, StoredObject>>,
}

impl MemoryStore {
    /// Create an empty store that mints URLs under `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Look up a stored object by path.
    pub async fn get(&self, path: &str) -> Option<StoredObject> {
        self.objects.read().await.get(path).cloned()
    }

    /// Number of stored objects.
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    /// Whether the store holds no objects.
    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }

    /// Paths of all stored objects, sorted.
    pub async fn paths(&self) -> Vec<String> {
        let mut paths: Vec<_> = self.objects.read().await.keys().cloned().collect();
        paths.sort();
        paths
    }
}

#[async_trait::async_trait]
impl ObjectStore for MemoryStore {
    #[tracing::instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn put(&self, path: &str, bytes: &[u8], content_type: &str) -> FolioResult<String> {
        self.objects.write().await.insert(
            path.to_string(),
            StoredObject {
                bytes: bytes.to_vec(),
                content_type: content_type.to_string(),
            },
        );
        tracing::debug!(path, "Stored object in memory");
        Ok(format!("{}/{}", self.base_url, path))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
