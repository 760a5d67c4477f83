//! Reconciles local documents with their mirrored issues.
//!
//! A run builds the mapping, refuses to continue if any local document is
//! unmapped, rewrites every document into a new issue description, and then
//! either reports the prepared updates or writes them in sorted path order.

use std::path::{Path, PathBuf};

use tracing::{info, info_span, instrument, Instrument};
use walkdir::WalkDir;

use crate::mapping::build_mapping;
use crate::markdown::transform_markdown;
use crate::meta::MetaBlock;
use crate::tracker::IssueTracker;
use crate::{
    Collection, MirrorError, PreparedUpdate, SourcePath, SyncMode, SyncReport, SyncRunId,
    Timestamp,
};

/// Extension of the documents that are mirrored.
pub const DOC_EXTENSION: &str = "md";

/// Number of prepared updates listed when previewing.
pub const PREVIEW_LISTING_LIMIT: usize = 5;

/// Inputs for one sync run.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Directory scanned for documents. Document paths include this prefix.
    pub docs_root: PathBuf,
    /// Collections searched for mirrored issues.
    pub collections: &'static [Collection],
    /// Whether to write updates or only prepare them.
    pub mode: SyncMode,
    /// Maximum number of documents to process. `None` or `Some(0)` means all.
    pub limit: Option<usize>,
}

/// Receives progress events while a sync runs.
///
/// Events arrive as they happen, so an observer sees every write that
/// completed even when a later one aborts the run.
pub trait SyncProgress {
    /// Called once all updates are prepared, before any is written.
    fn prepared(&mut self, _updates: &[PreparedUpdate]) {}

    /// Called after each successful write in apply mode.
    fn applied(&mut self, _update: &PreparedUpdate) {}
}

impl SyncProgress for () {}

/// Runs one sync.
///
/// Fails with [`MirrorError::UnmappedDocuments`] before any write when a
/// local document has no issue. In apply mode the first failing update
/// aborts the run; updates written before it stay applied.
pub async fn sync_docs(
    tracker: &dyn IssueTracker,
    options: &SyncOptions,
) -> Result<SyncReport, MirrorError> {
    sync_docs_with_progress(tracker, options, &mut ()).await
}

/// Same as [`sync_docs`], reporting each stage to `progress`.
pub async fn sync_docs_with_progress(
    tracker: &dyn IssueTracker,
    options: &SyncOptions,
    progress: &mut dyn SyncProgress,
) -> Result<SyncReport, MirrorError> {
    let run_id = SyncRunId::new_random();
    let span = info_span!("sync_docs", %run_id, mode = %options.mode);
    run(tracker, options, progress).instrument(span).await
}

async fn run(
    tracker: &dyn IssueTracker,
    options: &SyncOptions,
    progress: &mut dyn SyncProgress,
) -> Result<SyncReport, MirrorError> {
    let started_at = Timestamp::now();
    info!(root = %options.docs_root.display(), "Starting sync");

    let mapping = build_mapping(tracker, options.collections).await?;
    let mut documents = discover_documents(&options.docs_root)?;
    info!(mapped = mapping.len(), documents = documents.len(), "Mapping built");

    let missing: Vec<String> = documents
        .iter()
        .filter(|path| !mapping.contains(path))
        .map(|path| path.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(MirrorError::UnmappedDocuments { paths: missing });
    }

    if let Some(limit) = options.limit.filter(|&n| n > 0) {
        documents.truncate(limit);
    }

    let mut prepared = Vec::with_capacity(documents.len());
    for path in documents {
        let Some(mapped) = mapping.get(&path) else {
            // The gate above guarantees every document is mapped.
            continue;
        };
        let text = std::fs::read_to_string(path.as_str()).map_err(|source| {
            MirrorError::DocumentRead {
                path: PathBuf::from(path.as_str()),
                source,
            }
        })?;
        let description = build_description(Some(&mapped.meta_block), &transform_markdown(&text));
        prepared.push(PreparedUpdate {
            path,
            issue_id: mapped.issue_id.clone(),
            description,
        });
    }
    info!(count = prepared.len(), "Prepared updates");
    progress.prepared(&prepared);

    let applied = match options.mode {
        SyncMode::Preview => Vec::new(),
        SyncMode::Apply => apply_updates(tracker, &prepared, progress).await?,
    };

    let finished_at = Timestamp::now();
    info!(%started_at, %finished_at, applied = applied.len(), "Sync finished");
    Ok(SyncReport {
        mode: options.mode,
        prepared,
        applied,
        started_at,
        finished_at,
    })
}

#[instrument(skip_all, fields(count = prepared.len()))]
async fn apply_updates(
    tracker: &dyn IssueTracker,
    prepared: &[PreparedUpdate],
    progress: &mut dyn SyncProgress,
) -> Result<Vec<SourcePath>, MirrorError> {
    let mut applied = Vec::with_capacity(prepared.len());
    for update in prepared {
        tracker
            .update_issue_description(&update.issue_id, &update.description)
            .await?;
        info!(path = %update.path, issue = %update.issue_id, "Updated");
        progress.applied(update);
        applied.push(update.path.clone());
    }
    Ok(applied)
}

/// Assembles an issue description from the preserved metadata block and the
/// transformed document content.
pub fn build_description(meta_block: Option<&MetaBlock>, content: &str) -> String {
    match meta_block {
        Some(block) => format!("{block}\n\n{content}"),
        None => content.to_string(),
    }
}

/// Lists every `.md` file under `root`, recursively, as sorted path strings.
///
/// Paths keep the `root` prefix exactly as given (e.g. `docs/adr/0001.md`
/// for root `docs`). A missing root yields no documents.
pub fn discover_documents(root: &Path) -> Result<Vec<SourcePath>, MirrorError> {
    if !root.exists() {
        return Ok(Vec::new());
    }

    let mut documents = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| MirrorError::Discovery {
            message: e.to_string(),
        })?;
        // Symlinked documents count as files; walkdir reports the link itself.
        if !entry.path().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|e| e.to_str()) != Some(DOC_EXTENSION) {
            continue;
        }
        if let Some(path) = SourcePath::new(entry.path().to_string_lossy()) {
            documents.push(path);
        }
    }
    documents.sort();
    Ok(documents)
}
