//! Core domain for docs-mirror.
//!
//! Mirrors the repository's markdown documentation into issue-tracker
//! records. Every list item is rewritten as a checkbox, and the `mirror-meta`
//! block that links an issue to its source document is preserved across
//! updates.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate performs no network I/O.
//! The tracker is reached only through [`IssueTracker`]; the `linear` crate
//! supplies the production implementation.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`IssueId`, `SourcePath`, etc.) |
//! | [`types`] | Shared records (`Issue`, `IssuePage`, `PreparedUpdate`, `SyncReport`) |
//! | [`errors`] | Run-level error type |
//! | [`collections`] | The static table of documentation projects |
//! | [`markdown`] | List-to-checkbox transformation |
//! | [`meta`] | `mirror-meta` block extraction |
//! | [`tracker`] | The [`IssueTracker`] port and its error type |
//! | [`mapping`] | Source path to issue mapping |
//! | [`sync`] | The sync orchestrator |

pub mod collections;
pub mod errors;
pub mod identifiers;
pub mod mapping;
pub mod markdown;
pub mod meta;
pub mod sync;
pub mod tracker;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use collections::DOC_COLLECTIONS;
pub use errors::MirrorError;
pub use identifiers::{CollectionId, EmptyIdentifier, IssueId, SourcePath, SyncRunId};
pub use mapping::{build_mapping, MappedIssue, Mapping};
pub use markdown::transform_markdown;
pub use meta::{extract_meta_block, MetaBlock};
pub use sync::{
    build_description, discover_documents, sync_docs, sync_docs_with_progress, SyncOptions,
    SyncProgress, PREVIEW_LISTING_LIMIT,
};
pub use tracker::{IssueTracker, TrackerError, ISSUE_PAGE_SIZE};
pub use types::{Collection, Issue, IssuePage, PreparedUpdate, SyncMode, SyncReport, Timestamp};
