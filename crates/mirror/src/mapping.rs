//! Builds the source-path to issue mapping from the tracker's contents.

use std::collections::HashMap;

use tracing::{debug, info, instrument};

use crate::meta::{extract_meta_block, MetaBlock};
use crate::tracker::{IssueTracker, TrackerError};
use crate::{Collection, IssueId, SourcePath};

/// The issue a local document is mirrored into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedIssue {
    /// Issue whose description mirrors the document.
    pub issue_id: IssueId,
    /// The issue's metadata block, reattached to every rewritten description.
    pub meta_block: MetaBlock,
}

/// Association from declared source path to mirrored issue.
///
/// Rebuilt from scratch on every run; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapping {
    entries: HashMap<SourcePath, MappedIssue>,
}

impl Mapping {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `issue` under `path`, replacing any earlier entry.
    ///
    /// Returns the replaced entry, if there was one.
    pub fn insert(&mut self, path: SourcePath, issue: MappedIssue) -> Option<MappedIssue> {
        self.entries.insert(path, issue)
    }

    /// Returns the issue mirroring `path`.
    pub fn get(&self, path: &SourcePath) -> Option<&MappedIssue> {
        self.entries.get(path)
    }

    /// Returns `true` if some issue declares `path`.
    pub fn contains(&self, path: &SourcePath) -> bool {
        self.entries.contains_key(path)
    }

    /// Number of distinct source paths.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no issue declared a source path.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fetches every issue of every collection and indexes them by declared
/// source path.
///
/// Issues without a metadata block, or whose block lacks `source_path`, are
/// skipped. When several issues declare the same path the last one scanned
/// wins.
#[instrument(skip_all, fields(collections = collections.len()))]
pub async fn build_mapping(
    tracker: &dyn IssueTracker,
    collections: &[Collection],
) -> Result<Mapping, TrackerError> {
    let mut mapping = Mapping::new();

    for collection in collections {
        let issues = tracker.list_issues(&collection.collection_id()).await?;
        info!(name = collection.name(), issues = issues.len(), "Fetched collection");

        for issue in issues {
            let Some(meta_block) = extract_meta_block(issue.description.as_deref()) else {
                continue;
            };
            let Some(source_path) = meta_block.source_path() else {
                continue;
            };
            let entry = MappedIssue {
                issue_id: issue.id,
                meta_block,
            };
            if let Some(previous) = mapping.insert(source_path.clone(), entry) {
                debug!(
                    path = %source_path,
                    replaced = %previous.issue_id,
                    "Source path declared by more than one issue; keeping the later one"
                );
            }
        }
    }

    Ok(mapping)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;

    use super::*;
    use crate::{CollectionId, Issue, IssuePage};

    /// Returns every issue of a collection on a single page.
    struct StaticTracker {
        issues: HashMap<String, Vec<Issue>>,
    }

    #[async_trait]
    impl IssueTracker for StaticTracker {
        async fn fetch_issue_page(
            &self,
            collection: &CollectionId,
            _after: Option<&str>,
        ) -> Result<IssuePage, TrackerError> {
            Ok(IssuePage {
                issues: self.issues.get(collection.as_str()).cloned().unwrap_or_default(),
                has_next_page: false,
                end_cursor: None,
            })
        }

        async fn update_issue_description(
            &self,
            _issue: &IssueId,
            _description: &str,
        ) -> Result<(), TrackerError> {
            unreachable!("mapping never writes")
        }
    }

    fn issue(id: &str, description: Option<String>) -> Issue {
        Issue {
            id: IssueId::new(id).unwrap(),
            title: id.to_string(),
            description,
        }
    }

    fn meta(path: &str) -> String {
        format!("```mirror-meta\nsource_path: {path}\n```\n\nbody")
    }

    const FIRST: Collection = Collection::new("First", "c1");
    const SECOND: Collection = Collection::new("Second", "c2");

    fn path(p: &str) -> SourcePath {
        SourcePath::new(p).unwrap()
    }

    #[tokio::test]
    async fn test_indexes_issues_by_source_path() {
        let tracker = StaticTracker {
            issues: HashMap::from([
                (
                    "c1".to_string(),
                    vec![
                        issue("i1", Some(meta("docs/a.md"))),
                        issue("i2", None),
                        issue("i3", Some("no metadata".to_string())),
                        issue("i4", Some("```mirror-meta\nowner: x\n```".to_string())),
                    ],
                ),
                ("c2".to_string(), vec![issue("i5", Some(meta("docs/b.md")))]),
            ]),
        };

        let mapping = build_mapping(&tracker, &[FIRST, SECOND]).await.unwrap();

        assert_eq!(mapping.len(), 2);
        let a = mapping.get(&path("docs/a.md")).unwrap();
        assert_eq!(a.issue_id.as_str(), "i1");
        assert_eq!(a.meta_block.as_str(), "```mirror-meta\nsource_path: docs/a.md\n```");
        assert_eq!(mapping.get(&path("docs/b.md")).unwrap().issue_id.as_str(), "i5");
    }

    #[tokio::test]
    async fn test_duplicate_source_path_last_write_wins() {
        let tracker = StaticTracker {
            issues: HashMap::from([
                ("c1".to_string(), vec![issue("early", Some(meta("docs/a.md")))]),
                ("c2".to_string(), vec![issue("late", Some(meta("docs/a.md")))]),
            ]),
        };

        let mapping = build_mapping(&tracker, &[FIRST, SECOND]).await.unwrap();

        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.get(&path("docs/a.md")).unwrap().issue_id.as_str(), "late");
    }

    #[tokio::test]
    async fn test_no_collections_yields_empty_mapping() {
        let tracker = StaticTracker { issues: HashMap::new() };

        let mapping = build_mapping(&tracker, &[]).await.unwrap();

        assert!(mapping.is_empty());
    }
}
