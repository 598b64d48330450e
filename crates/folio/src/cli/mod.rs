//! Command-line interface module.

mod commands;
mod normalize;

pub use commands::{Cli, Commands};
pub use normalize::{normalize_references, store_file};
