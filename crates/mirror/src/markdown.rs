//! Markdown list to checkbox conversion.
//!
//! The tracker renders `- [ ]` items as interactive checkboxes, so every list
//! item mirrored from the docs is rewritten into that form. The scanner works
//! one line at a time and carries a single piece of state: whether it is
//! currently inside a fenced code block.

/// Marker written in place of every converted list marker.
pub const CHECKBOX_MARKER: &str = "- [ ] ";

const FENCE_MARKERS: [&str; 2] = ["```", "~~~"];
const CHECKBOX_PREFIXES: [&str; 3] = ["- [ ]", "- [x]", "- [X]"];
const UNORDERED_MARKERS: [&str; 3] = ["- ", "* ", "+ "];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FenceState {
    Outside,
    Inside,
}

impl FenceState {
    fn toggled(self) -> Self {
        match self {
            FenceState::Outside => FenceState::Inside,
            FenceState::Inside => FenceState::Outside,
        }
    }
}

/// Rewrites every unordered or ordered list item outside fenced code blocks
/// into an unchecked checkbox item.
///
/// Leading whitespace and blockquote markers are kept as a prefix. Lines
/// that already hold a checkbox, fence lines, and everything inside a fence
/// are passed through unchanged. An unterminated fence leaves the rest of
/// the document untouched.
///
/// ```
/// use mirror::markdown::transform_markdown;
///
/// assert_eq!(transform_markdown("> 3. step"), "> - [ ] step");
/// ```
pub fn transform_markdown(text: &str) -> String {
    let mut state = FenceState::Outside;
    let mut out: Vec<String> = Vec::new();

    for line in text.split('\n') {
        let stripped = line.trim_start();
        if FENCE_MARKERS.iter().any(|m| stripped.starts_with(m)) {
            state = state.toggled();
            out.push(line.to_string());
            continue;
        }
        if state == FenceState::Inside {
            out.push(line.to_string());
            continue;
        }
        out.push(convert_line(line));
    }

    out.join("\n")
}

fn convert_line(line: &str) -> String {
    let (prefix, rest) = split_quote_prefix(line);

    if CHECKBOX_PREFIXES.iter().any(|p| rest.starts_with(p)) {
        return line.to_string();
    }

    match list_item_content(rest) {
        Some(content) => format!("{prefix}{CHECKBOX_MARKER}{content}"),
        None => line.to_string(),
    }
}

/// Splits `line` into its leading run of whitespace and `>` characters and
/// the remainder.
fn split_quote_prefix(line: &str) -> (&str, &str) {
    let end = line
        .char_indices()
        .find(|(_, c)| !(c.is_whitespace() || *c == '>'))
        .map_or(line.len(), |(i, _)| i);
    line.split_at(end)
}

/// Returns the item content when `rest` opens with a list marker.
fn list_item_content(rest: &str) -> Option<&str> {
    if let Some(content) = UNORDERED_MARKERS
        .iter()
        .find_map(|marker| rest.strip_prefix(marker))
    {
        return Some(content);
    }

    let after_digits = rest.trim_start_matches(|c: char| c.is_ascii_digit());
    if after_digits.len() == rest.len() {
        return None;
    }
    let after_period = after_digits.strip_prefix('.')?;
    let content = after_period.trim_start();
    if content.len() == after_period.len() {
        return None;
    }
    Some(content)
}
