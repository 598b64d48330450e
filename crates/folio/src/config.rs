//! Layered configuration.
//!
//! Sources, later ones overriding earlier ones:
//! - Bundled defaults (include_str! from folio.toml)
//! - `~/.config/folio/folio.toml`
//! - `./folio.toml`

use config::{Config, File, FileFormat};
use derive_getters::Getters;
use folio_error::{ConfigError, ConfigErrorKind, FolioError, FolioResult};
use folio_storage::{FileSystemStore, MemoryStore, ObjectStore};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Which object store backs uploads.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Objects written below `storage.root`
    #[default]
    #[display("filesystem")]
    Filesystem,
    /// Objects kept in process memory (dry runs)
    #[display("memory")]
    Memory,
}

/// Object storage settings.
///
/// ```toml
/// [storage]
/// backend = "filesystem"
/// root = "/var/folio/media"
/// public_base_url = "https://media.example.com"
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
pub struct StorageConfig {
    /// Backend kind
    #[serde(default)]
    #[builder(default)]
    backend: StorageBackend,

    /// Root directory for the filesystem backend
    #[serde(default = "default_root")]
    #[builder(default = "default_root()", setter(into))]
    root: PathBuf,

    /// URL under which stored objects are served
    #[serde(default = "default_public_base_url")]
    #[builder(default = "default_public_base_url()", setter(into))]
    public_base_url: String,
}

fn default_root() -> PathBuf {
    PathBuf::from("media")
}

fn default_public_base_url() -> String {
    "http://localhost:8080/media".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            root: default_root(),
            public_base_url: default_public_base_url(),
        }
    }
}

impl StorageConfig {
    /// Construct the configured object store.
    ///
    /// # Errors
    ///
    /// Returns an error if the filesystem root cannot be created.
    #[instrument(skip(self), fields(backend = %self.backend))]
    pub fn build_store(&self) -> FolioResult<Arc<dyn ObjectStore>> {
        let store: Arc<dyn ObjectStore> = match self.backend {
            StorageBackend::Filesystem => Arc::new(FileSystemStore::new(
                self.root.clone(),
                self.public_base_url.clone(),
            )?),
            StorageBackend::Memory => Arc::new(MemoryStore::new(self.public_base_url.clone())),
        };
        debug!(backend = store.backend_name(), "Built object store");
        Ok(store)
    }
}

/// Logging settings.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters,
)]
#[setters(prefix = "with_")]
pub struct LoggingConfig {
    /// Filter directive (e.g. "info", "folio_upload=debug")
    #[serde(default = "default_level")]
    #[setters(into)]
    level: String,

    /// Emit JSON lines instead of text
    #[serde(default)]
    json: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

/// Upload settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct UploadConfig {
    /// Prefix used when the caller does not name one
    #[serde(default = "default_prefix")]
    default_prefix: String,
}

fn default_prefix() -> String {
    "media".to_string()
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            default_prefix: default_prefix(),
        }
    }
}

/// Top-level Folio configuration.
///
/// # Example
///
/// ```no_run
/// use folio::FolioConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = FolioConfig::load()?;
/// println!("Uploading to {}", config.storage().public_base_url());
/// # Ok(())
/// # }
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Getters, derive_setters::Setters,
)]
#[setters(prefix = "with_")]
pub struct FolioConfig {
    /// Object storage settings
    #[serde(default)]
    storage: StorageConfig,

    /// Logging settings
    #[serde(default)]
    logging: LoggingConfig,

    /// Upload settings
    #[serde(default)]
    upload: UploadConfig,
}

impl FolioConfig {
    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> FolioResult<Self> {
        debug!("Loading configuration from file");

        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                FolioError::from(
                    ConfigError::new(ConfigErrorKind::Read(e.to_string())).with_path(path.as_ref()),
                )
            })?
            .try_deserialize()
            .map_err(|e| {
                FolioError::from(
                    ConfigError::new(ConfigErrorKind::Parse(e.to_string())).with_path(path.as_ref()),
                )
            })
    }

    /// Load configuration with precedence: current dir > home dir > bundled default.
    ///
    /// User config files are optional and silently skipped if not found.
    #[instrument]
    pub fn load() -> FolioResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        const DEFAULT_CONFIG: &str = include_str!("../../../folio.toml");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/folio/folio.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("folio").required(false));

        builder
            .build()
            .map_err(|e| FolioError::from(ConfigError::new(ConfigErrorKind::Read(e.to_string()))))?
            .try_deserialize()
            .map_err(|e| FolioError::from(ConfigError::new(ConfigErrorKind::Parse(e.to_string()))))
    }
}
