//! Annotation block upsert.
//!
//! The linker owns exactly one region of a pull request description: the text
//! between [`BLOCK_BEGIN`] and [`BLOCK_END`]. Every run strips any existing
//! block and appends a freshly rendered one, so the block always reflects the
//! latest run and never accumulates. Text outside the block is left alone.
//!
//! The line break written after [`BLOCK_END`] belongs to the block; stripping
//! removes it too, and appending only inserts a separating line break when the
//! remaining text does not already end with one. Re-running on an annotated
//! body therefore reproduces it exactly, modulo the timestamp.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

use crate::{ReferenceList, Timestamp};

/// Opening marker of the managed block.
pub const BLOCK_BEGIN: &str = "<!-- BEGIN PR-ISSUE-LINKER -->";

/// Closing marker of the managed block.
pub const BLOCK_END: &str = "<!-- END PR-ISSUE-LINKER -->";

/// Name shown in the block's attribution line.
pub const ATTRIBUTION_NAME: &str = "PR-ISSUE-LINKER";

/// Where the attribution line links to.
pub const DEFAULT_ATTRIBUTION_URL: &str =
    "https://github.com/SpiderStrategies/gh-action-pr-issue-linker";

fn block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let pattern = format!(
            r"(?s){}.*?{}(?:\r?\n)?",
            regex::escape(BLOCK_BEGIN),
            regex::escape(BLOCK_END)
        );
        Regex::new(&pattern).expect("annotation block regex must compile")
    })
}

/// Removes every annotation block from `body`.
///
/// A begin marker without a matching end marker is not a block and is left
/// in place.
pub fn strip_annotation(body: &str) -> Cow<'_, str> {
    block_re().replace_all(body, "")
}

/// Counts the annotation blocks present in `body`.
pub fn annotation_count(body: &str) -> usize {
    block_re().find_iter(body).count()
}

/// Renders the closing clause, e.g. `fixes #1, fixes #2`.
pub fn render_clause(references: &ReferenceList) -> String {
    references
        .iter()
        .map(|reference| format!("fixes {reference}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders a complete annotation block, trailing line break included.
pub fn render_block(
    references: &ReferenceList,
    timestamp: Timestamp,
    attribution_url: &str,
) -> String {
    format!(
        "{BLOCK_BEGIN}\n\
         - - -\n\
         &blacktriangleright; _{clause}_\n\
         <sub>updated {timestamp} by <a href=\"{attribution_url}\">{ATTRIBUTION_NAME}</a></sub>\n\
         {BLOCK_END}\n",
        clause = render_clause(references),
    )
}

/// Replaces the annotation block in `body` with one listing `references`.
///
/// Any existing block is removed first, then the new block is appended to the
/// end of what remains. Callers skip this when `references` is empty; an
/// existing block is never removed by the linker on its own.
pub fn upsert_annotation(
    body: &str,
    references: &ReferenceList,
    timestamp: Timestamp,
    attribution_url: &str,
) -> String {
    let stripped = strip_annotation(body);
    let block = render_block(references, timestamp, attribution_url);

    let mut updated = String::with_capacity(stripped.len() + block.len() + 1);
    updated.push_str(&stripped);
    if !stripped.ends_with('\n') {
        updated.push('\n');
    }
    updated.push_str(&block);
    updated
}
