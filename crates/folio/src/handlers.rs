//! Command handlers behind the `folio` binary.
//!
//! Handlers render to any [`Write`] so the same code serves stdout and tests.

use crate::FolioConfig;
use folio_core::PathPrefix;
use folio_error::{FolioResult, JsonError, JsonErrorKind, StorageError, StorageErrorKind};
use folio_storage::ObjectStoreAdapter;
use folio_upload::{BatchNormalizer, ProgressState, ProgressTracker};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::{info, instrument};

/// How command results are rendered.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One URL per line
    #[default]
    Human,
    /// JSON object with URLs and final progress state
    Json,
}

/// JSON rendering of a normalize run. `urls` is `null` when the batch failed.
#[derive(Debug, Serialize)]
struct NormalizeReport<'a> {
    urls: Option<&'a [String]>,
    progress: &'a ProgressState,
}

fn resolve_prefix(config: &FolioConfig, prefix: Option<&str>) -> FolioResult<PathPrefix> {
    let prefix = prefix.unwrap_or(config.upload().default_prefix());
    Ok(PathPrefix::new(prefix)?)
}

fn output_error(e: std::io::Error) -> StorageError {
    StorageError::new(StorageErrorKind::FileWrite(format!("output: {}", e)))
}

/// Normalize the JSON array of references in `input` and render the URLs to `out`.
///
/// Uploads go to the store described by `config.storage()`. With
/// [`OutputFormat::Json`] a report is written even when the batch fails.
///
/// # Errors
///
/// Returns a JSON error when `input` is not an array of strings, and any error
/// of [`BatchNormalizer::normalize_tracked`].
#[instrument(skip(config, input, out))]
pub async fn normalize_references(
    config: &FolioConfig,
    prefix: Option<&str>,
    input: &str,
    format: OutputFormat,
    out: &mut impl Write,
) -> FolioResult<Vec<String>> {
    let prefix = resolve_prefix(config, prefix)?;
    let references: Vec<String> = serde_json::from_str(input)
        .map_err(|e| JsonError::new(JsonErrorKind::decode("reference list", e)))?;

    let adapter = ObjectStoreAdapter::new(config.storage().build_store()?);
    let normalizer = BatchNormalizer::new(adapter);
    let mut tracker = ProgressTracker::new();

    info!(prefix = %prefix, total = references.len(), "Normalizing references");
    let result = normalizer
        .normalize_tracked(&prefix, &references, &mut tracker)
        .await;

    match format {
        OutputFormat::Human => {
            if let Ok(urls) = &result {
                for url in urls {
                    writeln!(out, "{}", url).map_err(output_error)?;
                }
            }
        }
        OutputFormat::Json => {
            let report = NormalizeReport {
                urls: result.as_deref().ok(),
                progress: tracker.state(),
            };
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| JsonError::new(JsonErrorKind::encode("normalize report", e)))?;
            writeln!(out, "{}", json).map_err(output_error)?;
        }
    }

    let urls = result?;
    info!(count = urls.len(), progress = tracker.percent(), "Normalized references");
    Ok(urls)
}

/// Upload the file at `path` and write its URL to `out`.
///
/// # Errors
///
/// Returns an error if the prefix is invalid, the file cannot be read, or the
/// store rejects the write.
#[instrument(skip(config, path, out), fields(path = %path.display()))]
pub async fn store_file(
    config: &FolioConfig,
    prefix: Option<&str>,
    path: &Path,
    out: &mut impl Write,
) -> FolioResult<String> {
    let prefix = resolve_prefix(config, prefix)?;
    let adapter = ObjectStoreAdapter::new(config.storage().build_store()?);

    let url = adapter.store_file(&prefix, path).await?;
    writeln!(out, "{}", url).map_err(output_error)?;
    Ok(url)
}
