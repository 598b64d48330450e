//! CLI command definitions.

use clap::{Parser, Subcommand};
use folio::OutputFormat;
use std::path::PathBuf;

/// Folio - upload inline media and normalize reference lists into durable URLs
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(about = "Upload inline media and normalize reference lists into durable URLs", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (skips the default lookup)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Normalize a JSON array of media references
    Normalize {
        /// Destination prefix (defaults to upload.default_prefix)
        #[arg(long)]
        prefix: Option<String>,

        /// JSON file holding the references; reads stdin when omitted
        #[arg(long)]
        input: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Upload one file and print its URL
    StoreFile {
        /// Destination prefix (defaults to upload.default_prefix)
        #[arg(long)]
        prefix: Option<String>,

        /// File to upload
        path: PathBuf,
    },
}
