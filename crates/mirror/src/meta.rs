//! The `mirror-meta` block that links an issue to its source document.
//!
//! Issues that mirror a document carry a fenced block such as:
//!
//! ````text
//! ```mirror-meta
//! source_path: docs/adr/0001-storage.md
//! owner: platform
//! ```
//! ````
//!
//! Only `source_path` is interpreted. The block as a whole is carried over
//! verbatim into every rewritten description so any other keys survive.

use serde::{Deserialize, Serialize};

use crate::SourcePath;

/// Tag on the opening fence of a metadata block.
pub const META_TAG: &str = "mirror-meta";

const FENCE: &str = "```";
const SOURCE_PATH_KEY: &str = "source_path:";

/// A metadata block, re-wrapped as `` ```mirror-meta\n<body>``` ``.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetaBlock(String);

impl MetaBlock {
    /// Returns the block text including both fences.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the value of the first `source_path:` line, trimmed.
    ///
    /// Lines with an empty value are ignored.
    pub fn source_path(&self) -> Option<SourcePath> {
        self.0.lines().find_map(|line| {
            let value = line.trim_start().strip_prefix(SOURCE_PATH_KEY)?;
            SourcePath::new(value.trim())
        })
    }
}

impl std::fmt::Display for MetaBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Finds the first `mirror-meta` block in an issue description.
///
/// The opening tag must be followed by whitespace; whitespace between the tag
/// and the first body character is normalised to a single newline. The body
/// runs up to the next triple backtick. Returns `None` for a missing
/// description or when no terminated block exists.
pub fn extract_meta_block(description: Option<&str>) -> Option<MetaBlock> {
    let description = description?;
    let opening = format!("{FENCE}{META_TAG}");

    for (start, _) in description.match_indices(&opening) {
        let after_tag = &description[start + opening.len()..];
        let body_start = after_tag.trim_start();
        if body_start.len() == after_tag.len() {
            // Tag runs straight into more text, e.g. "mirror-metadata".
            continue;
        }
        if let Some(end) = body_start.find(FENCE) {
            let body = &body_start[..end];
            return Some(MetaBlock(format!("{FENCE}{META_TAG}\n{body}{FENCE}")));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESCRIPTION: &str =
        "Intro text\n\n```mirror-meta\nsource_path:   docs/a.md  \nowner: ops\n```\n\n- [ ] body";

    #[test]
    fn test_extracts_block_and_source_path() {
        let block = extract_meta_block(Some(DESCRIPTION)).expect("block present");

        assert_eq!(
            block.as_str(),
            "```mirror-meta\nsource_path:   docs/a.md  \nowner: ops\n```"
        );
        assert_eq!(block.source_path().unwrap().as_str(), "docs/a.md");
    }

    #[test]
    fn test_missing_or_empty_description() {
        assert!(extract_meta_block(None).is_none());
        assert!(extract_meta_block(Some("")).is_none());
        assert!(extract_meta_block(Some("no block here")).is_none());
    }

    #[test]
    fn test_unterminated_block_is_ignored() {
        assert!(extract_meta_block(Some("```mirror-meta\nsource_path: docs/a.md\n")).is_none());
    }

    #[test]
    fn test_tag_requires_trailing_whitespace() {
        let text = "```mirror-metadata\nsource_path: x.md\n```\n```mirror-meta\nsource_path: y.md\n```";
        let block = extract_meta_block(Some(text)).unwrap();
        assert_eq!(block.source_path().unwrap().as_str(), "y.md");
    }

    #[test]
    fn test_first_block_wins() {
        let text = "```mirror-meta\nsource_path: first.md\n```\n```mirror-meta\nsource_path: second.md\n```";
        let block = extract_meta_block(Some(text)).unwrap();
        assert_eq!(block.source_path().unwrap().as_str(), "first.md");
    }

    #[test]
    fn test_leading_whitespace_is_normalised() {
        let block = extract_meta_block(Some("```mirror-meta \n\n  source_path: a.md\n```")).unwrap();
        assert_eq!(block.as_str(), "```mirror-meta\nsource_path: a.md\n```");
    }

    #[test]
    fn test_block_without_source_path() {
        let block = extract_meta_block(Some("```mirror-meta\nowner: ops\n```")).unwrap();
        assert!(block.source_path().is_none());
    }

    #[test]
    fn test_empty_source_path_value_is_ignored() {
        let block =
            extract_meta_block(Some("```mirror-meta\nsource_path:\nsource_path: b.md\n```")).unwrap();
        assert_eq!(block.source_path().unwrap().as_str(), "b.md");
    }
}
