//! Shared value types for the docs mirror domain.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types carry
//! the records that flow between the tracker port, the mapping builder, and
//! the sync orchestrator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CollectionId, IssueId, SourcePath};

// ---------------------------------------------------------------------------
// Remote records
// ---------------------------------------------------------------------------

/// A named remote grouping of issues.
///
/// The set of collections is fixed at compile time; see
/// [`crate::collections::DOC_COLLECTIONS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collection {
    name: &'static str,
    id: &'static str,
}

impl Collection {
    /// Declares a collection.
    ///
    /// # Panics
    ///
    /// Panics if `id` is empty. In a `static` or `const` item this is a
    /// compile-time error.
    pub const fn new(name: &'static str, id: &'static str) -> Self {
        assert!(!id.is_empty(), "collection identifier must not be empty");
        Self { name, id }
    }

    /// Human-readable collection name, used only for logging.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Stable tracker identifier of the collection.
    pub fn collection_id(&self) -> CollectionId {
        CollectionId::from_static(self.id)
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

// ---------------------------------------------------------------------------

/// An issue as returned by the tracker.
///
/// Owned entirely by the remote service. The tool reads all three fields and
/// only ever overwrites `description`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Tracker-assigned identifier.
    pub id: IssueId,
    /// Issue title.
    pub title: String,
    /// Markdown description; `None` when the issue has never had one.
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------

/// One page of issues from a paginated listing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IssuePage {
    /// Issues on this page, in the order the tracker returned them.
    pub issues: Vec<Issue>,
    /// Whether another page follows this one.
    pub has_next_page: bool,
    /// Cursor to pass as `after` when requesting the next page.
    pub end_cursor: Option<String>,
}

// ---------------------------------------------------------------------------
// Sync records
// ---------------------------------------------------------------------------

/// Whether a sync run only reports what it would change or performs the writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    /// Compute and report updates; never write to the tracker.
    #[default]
    Preview,
    /// Write every prepared update to the tracker.
    Apply,
}

impl std::fmt::Display for SyncMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncMode::Preview => f.write_str("preview"),
            SyncMode::Apply => f.write_str("apply"),
        }
    }
}

// ---------------------------------------------------------------------------

/// A pending description overwrite for one local document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparedUpdate {
    /// Local document path (identical to the declared source path).
    pub path: SourcePath,
    /// Issue whose description will be replaced.
    pub issue_id: IssueId,
    /// Full replacement description: metadata block plus transformed content.
    pub description: String,
}

// ---------------------------------------------------------------------------

/// Outcome of a successful sync run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncReport {
    /// Mode the run executed in.
    pub mode: SyncMode,
    /// Every prepared update, in sorted path order.
    pub prepared: Vec<PreparedUpdate>,
    /// Paths whose issue was updated. Always empty in preview mode.
    pub applied: Vec<SourcePath>,
    /// When the run started.
    pub started_at: Timestamp,
    /// When the run finished.
    pub finished_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current UTC time as a [`Timestamp`].
    pub fn now() -> Self {
        Self(Utc::now())
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
