//! Progress report emitted by the batch normalizer.

use serde::{Deserialize, Serialize};

/// Label of the final progress report of a successful batch.
pub const COMPLETED_LABEL: &str = "Completed";

/// One progress report.
///
/// Reports are emitted before each item is processed, so `completed_files`
/// counts the items already finished, plus once after the last item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    /// Human label of the item being worked on ("File 2", "URL 3", "Completed")
    pub current_file: String,
    /// Items finished so far
    pub completed_files: usize,
    /// Items in the batch
    pub total_files: usize,
}

impl ProgressUpdate {
    /// Report for the item at zero-based `index`, before it is processed.
    pub fn item(index: usize, total: usize, inline: bool) -> Self {
        let kind = if inline { "File" } else { "URL" };
        Self {
            current_file: format!("{} {}", kind, index + 1),
            completed_files: index,
            total_files: total,
        }
    }

    /// Final report after every item succeeded.
    pub fn finished(total: usize) -> Self {
        Self {
            current_file: COMPLETED_LABEL.to_string(),
            completed_files: total,
            total_files: total,
        }
    }
}
