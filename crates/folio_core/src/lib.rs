//! Core data types for the Folio media pipeline.
//!
//! - [`MediaReference`] - an inline payload or an external URL, classified once at the boundary
//! - [`InlinePayload`] - decoded bytes and MIME type of a `data:` reference
//! - [`PathPrefix`] - validated namespace under which new objects are grouped
//! - [`ProgressUpdate`] - one progress report emitted while a batch runs

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod mime;
mod prefix;
mod progress;
mod reference;

pub use mime::{content_type_for_extension, extension_for_mime};
pub use prefix::PathPrefix;
pub use progress::{COMPLETED_LABEL, ProgressUpdate};
pub use reference::{DATA_SCHEME, InlinePayload, MediaReference};
