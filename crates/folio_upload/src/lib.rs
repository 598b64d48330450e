//! Batch media normalization for Folio.
//!
//! A content entity (project, profile, education entry, ...) carries an ordered list of
//! media references. [`BatchNormalizer`] turns that list into durable URLs: inline
//! `data:` payloads are uploaded through the [`ObjectStoreAdapter`](folio_storage::ObjectStoreAdapter),
//! external URLs pass through untouched, and progress is reported before every item.
//!
//! [`ProgressTracker`] is the state machine a UI drives from those reports.
//!
//! # Guarantees
//!
//! - Output length and order mirror the input
//! - Items are processed strictly one after another
//! - The first failure aborts the batch; no partial list is returned
//! - Re-normalizing a list of external URLs is a no-op
//!
//! # Cargo Features
//!
//! - `single-flight` - `ProgressTracker::start` fails while a batch is still uploading

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod normalizer;
mod sink;
mod tracker;

pub use normalizer::BatchNormalizer;
pub use sink::ProgressSink;
pub use tracker::{ProgressState, ProgressTracker, UploadPhase, percent_complete};
