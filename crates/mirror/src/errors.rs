//! Top-level error type for a docs mirror run.
//!
//! [`MirrorError`] covers every condition that aborts a sync run. Failures of
//! the remote tracker itself are described by [`crate::TrackerError`] and
//! wrapped here unchanged.
//!
//! There is no retry classification: every variant is fatal for the run, and
//! updates already written before the failure are left in place.

use std::path::PathBuf;

use thiserror::Error;

use crate::TrackerError;

/// Errors that abort a sync run.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// Required configuration is missing or invalid.
    ///
    /// Produced before any filesystem or network activity.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },

    /// One or more local documents have no issue declaring their path.
    ///
    /// This is an all-or-nothing gate: no update is attempted when it fires.
    #[error("{} local document(s) have no mirrored issue", paths.len())]
    UnmappedDocuments {
        /// Every unmapped path, in sorted order.
        paths: Vec<String>,
    },

    /// The documentation root could not be walked.
    #[error("Failed to discover documents: {message}")]
    Discovery {
        /// Description of the walk failure.
        message: String,
    },

    /// A local document could not be read as UTF-8 text.
    #[error("Failed to read '{}': {source}", path.display())]
    DocumentRead {
        /// Path of the unreadable document.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The remote tracker rejected or failed a request.
    #[error(transparent)]
    Tracker(#[from] TrackerError),
}
