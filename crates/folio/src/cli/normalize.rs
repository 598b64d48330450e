//! Input plumbing for the normalize and store-file commands.

use folio::{FolioConfig, FolioResult, OutputFormat, StorageError, StorageErrorKind};
use std::path::Path;
use tokio::io::AsyncReadExt;

async fn read_input(input: Option<&Path>) -> FolioResult<String> {
    let raw = match input {
        Some(path) => tokio::fs::read_to_string(path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?,
        None => {
            let mut raw = String::new();
            tokio::io::stdin()
                .read_to_string(&mut raw)
                .await
                .map_err(|e| StorageError::new(StorageErrorKind::FileRead(format!("stdin: {}", e))))?;
            raw
        }
    };
    Ok(raw)
}

/// Normalize references from a file or stdin and print the resulting URLs.
pub async fn normalize_references(
    config: &FolioConfig,
    prefix: Option<&str>,
    input: Option<&Path>,
    format: OutputFormat,
) -> FolioResult<()> {
    let raw = read_input(input).await?;
    let mut stdout = std::io::stdout();
    folio::normalize_references(config, prefix, &raw, format, &mut stdout).await?;
    Ok(())
}

/// Upload a single file and print its URL.
pub async fn store_file(config: &FolioConfig, prefix: Option<&str>, path: &Path) -> FolioResult<()> {
    let mut stdout = std::io::stdout();
    folio::store_file(config, prefix, path, &mut stdout).await?;
    Ok(())
}
