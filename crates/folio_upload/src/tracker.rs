//! Upload progress state machine.

use crate::ProgressSink;
use derive_getters::Getters;
use folio_core::ProgressUpdate;
use folio_error::{FolioResult, TrackerError, TrackerErrorKind};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Lifecycle phase of a tracked batch.
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
pub enum UploadPhase {
    /// No batch started, or reset after one
    #[default]
    #[display("idle")]
    Idle,
    /// A batch is in flight
    #[display("uploading")]
    Uploading,
    /// The batch finished successfully
    #[display("completed")]
    Completed,
    /// The batch aborted; `error` holds the message
    #[display("failed")]
    Failed,
}

/// Snapshot of upload progress, serialized in camelCase for the editor UI.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct ProgressState {
    /// Current lifecycle phase
    phase: UploadPhase,
    /// Whether a batch is in flight
    is_uploading: bool,
    /// Percentage complete, 0 to 100
    progress: u8,
    /// Label of the item being worked on
    current_file: String,
    /// Items in the batch
    total_files: usize,
    /// Items finished so far
    completed_files: usize,
    /// Failure message of the last batch
    error: Option<String>,
}

/// Percentage of `completed` out of `total`, rounded half up and capped at 100.
///
/// A zero total yields 0.
///
/// ```
/// use folio_upload::percent_complete;
///
/// assert_eq!(percent_complete(2, 4), 50);
/// assert_eq!(percent_complete(1, 3), 33);
/// assert_eq!(percent_complete(2, 3), 67);
/// assert_eq!(percent_complete(5, 0), 0);
/// ```
pub fn percent_complete(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = completed as u128;
    let total = total as u128;
    let percent = (completed * 200 + total) / (total * 2);
    percent.min(100) as u8
}

/// Tracks one batch at a time for the UI session that owns it.
///
/// ```text
/// Idle --start--> Uploading --complete--> Completed
///                     |
///                     +------fail------> Failed
/// (any) --reset--> Idle
/// ```
///
/// `update` only applies while `Uploading`.
///
/// Without the `single-flight` feature, calling `start` while a batch is uploading
/// silently re-initializes the counters.
#[derive(Debug, Clone, Default)]
pub struct ProgressTracker {
    state: ProgressState,
}

impl ProgressTracker {
    /// Create an idle tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot.
    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    /// Current phase.
    pub fn phase(&self) -> UploadPhase {
        self.state.phase
    }

    /// Percentage complete.
    pub fn percent(&self) -> u8 {
        self.state.progress
    }

    /// Begin a batch of `total_files` items.
    ///
    /// # Errors
    ///
    /// With the `single-flight` feature, returns `TrackerErrorKind::AlreadyUploading`
    /// if a batch is still in flight. Never fails otherwise.
    pub fn start(&mut self, total_files: usize) -> FolioResult<()> {
        if self.state.phase == UploadPhase::Uploading {
            if cfg!(feature = "single-flight") {
                return Err(TrackerError::new(TrackerErrorKind::AlreadyUploading(
                    self.state.total_files,
                ))
                .into());
            }
            warn!(
                previous_total = self.state.total_files,
                previous_completed = self.state.completed_files,
                "Starting a batch while another is uploading; counters overwritten"
            );
        }

        self.state.phase = UploadPhase::Uploading;
        self.state.is_uploading = true;
        self.state.total_files = total_files;
        self.state.completed_files = 0;
        self.state.progress = 0;
        self.state.current_file.clear();
        self.state.error = None;
        debug!(total_files, "Upload started");
        Ok(())
    }

    /// Record progress. `total_files` replaces the stored total when given.
    ///
    /// Only an uploading batch moves; reports arriving in any other phase are
    /// dropped so a finished or failed batch keeps its final numbers.
    pub fn update(
        &mut self,
        current_file: impl Into<String>,
        completed_files: usize,
        total_files: Option<usize>,
    ) {
        if self.state.phase != UploadPhase::Uploading {
            warn!(
                phase = %self.state.phase,
                completed_files,
                "Ignoring progress report outside an upload"
            );
            return;
        }
        if let Some(total) = total_files {
            self.state.total_files = total;
        }
        self.state.current_file = current_file.into();
        self.state.completed_files = completed_files;
        self.state.progress = percent_complete(completed_files, self.state.total_files);
        debug!(
            current_file = %self.state.current_file,
            completed_files,
            total_files = self.state.total_files,
            progress = self.state.progress,
            "Upload progress"
        );
    }

    /// Mark the batch failed. Progress keeps its last value.
    pub fn fail(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!(error = %message, progress = self.state.progress, "Upload failed");
        self.state.phase = UploadPhase::Failed;
        self.state.is_uploading = false;
        self.state.error = Some(message);
    }

    /// Mark the batch completed.
    pub fn complete(&mut self) {
        self.state.phase = UploadPhase::Completed;
        self.state.is_uploading = false;
        self.state.progress = 100;
        self.state.current_file.clear();
        debug!(total_files = self.state.total_files, "Upload completed");
    }

    /// Return to idle, clearing counters and any error.
    pub fn reset(&mut self) {
        self.state = ProgressState::default();
        debug!("Upload tracker reset");
    }
}

impl ProgressSink for ProgressTracker {
    fn on_progress(&mut self, update: &ProgressUpdate) -> FolioResult<()> {
        self.update(
            update.current_file.as_str(),
            update.completed_files,
            Some(update.total_files),
        );
        Ok(())
    }
}
