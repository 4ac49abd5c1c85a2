// SPDX-License-Identifier: GPL-3.0-only

//! Foldable quote-block callouts.
//!
//! The Markdown export wraps metadata and thought segments in
//! Obsidian-style callouts: a `> [!tag]` header line followed by a
//! quote-prefixed body. The transform is pure and total; embedded `>`
//! characters or markdown in the body are passed through unescaped,
//! matching the host's quote-block convention.

use std::fmt::Write;

/// The callout flavors the renderer emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalloutKind {
    /// Metadata blocks (`[!info]`).
    Info,
    /// Thought/reasoning blocks (`[!abstract]`).
    Abstract,
}

impl CalloutKind {
    /// The tag written inside the callout header.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Abstract => "abstract",
        }
    }
}

/// Formats a callout block.
///
/// The first line is `> [!tag]- title` (`-` when `folded`, `+` when
/// expanded by default). Trailing newlines of `body` are stripped, then
/// every remaining line, blank lines included, is prefixed with `> `.
/// The block always ends with exactly one blank line so consecutive
/// blocks concatenate predictably.
#[must_use]
pub fn format_callout(kind: CalloutKind, title: &str, body: &str, folded: bool) -> String {
    let marker = if folded { '-' } else { '+' };

    let mut out = String::new();
    writeln!(out, "> [!{}]{marker} {title}", kind.tag()).unwrap();
    for line in body.trim_end_matches('\n').lines() {
        writeln!(out, "> {line}").unwrap();
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folded_header_ends_with_dash_marker() {
        let block = format_callout(CalloutKind::Info, "Config", "body", true);

        assert!(block.starts_with("> [!info]- Config\n"));
    }

    #[test]
    fn expanded_header_ends_with_plus_marker() {
        let block = format_callout(CalloutKind::Abstract, "Thinking", "body", false);

        assert!(block.starts_with("> [!abstract]+ Thinking\n"));
    }

    #[test]
    fn every_body_line_is_quote_prefixed() {
        let block = format_callout(CalloutKind::Abstract, "T", "first\n\nthird", true);

        assert_eq!(block, "> [!abstract]- T\n> first\n> \n> third\n\n");
    }

    #[test]
    fn trailing_newlines_are_normalized() {
        let bare = format_callout(CalloutKind::Info, "T", "body", true);
        let trailing = format_callout(CalloutKind::Info, "T", "body\n\n\n", true);

        assert_eq!(bare, trailing);
    }

    #[test]
    fn empty_body_yields_header_only() {
        let block = format_callout(CalloutKind::Info, "T", "", true);

        assert_eq!(block, "> [!info]- T\n\n");
    }

    #[test]
    fn block_ends_with_exactly_one_blank_line() {
        let block = format_callout(CalloutKind::Info, "T", "body", true);

        assert!(block.ends_with("body\n\n"));
        assert!(!block.ends_with("\n\n\n"));
    }

    #[test]
    fn embedded_quote_markers_pass_through() {
        let block = format_callout(CalloutKind::Abstract, "T", "> nested", true);

        assert!(block.contains("> > nested\n"));
    }
}
