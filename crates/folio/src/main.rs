//! Folio CLI binary.
//!
//! - Normalize a JSON list of media references into durable URLs
//! - Upload a single file from disk

use clap::Parser;
use folio::{FolioConfig, init_observability};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, normalize_references, store_file};

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => FolioConfig::from_file(path)?,
        None => FolioConfig::load()?,
    };

    let logging = if cli.verbose {
        config.logging().clone().with_level("debug")
    } else {
        config.logging().clone()
    };
    init_observability(&logging)?;

    match cli.command {
        Commands::Normalize {
            prefix,
            input,
            format,
        } => {
            normalize_references(&config, prefix.as_deref(), input.as_deref(), format).await?;
        }

        Commands::StoreFile { prefix, path } => {
            store_file(&config, prefix.as_deref(), &path).await?;
        }
    }

    Ok(())
}
