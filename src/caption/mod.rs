//! Caption rewriting.
//!
//! Turns a raw media caption into cleaned-up `MarkdownV2` text:
//! links and the label line in front of them are dropped, mentions are
//! removed, release-style dots and underscores become spaces, and the
//! result is escaped and wrapped in bold (or italic bold for photos).
//!
//! Everything here is pure and allocation-only, so it can be called from
//! any handler without synchronization.

mod markup;
mod rewriter;

pub use markup::{SPECIAL_CHARACTERS, escape_markdown_v2, wrap_for};
pub use rewriter::{LINK_MARKER, MENTION_SIGIL, clean_lines};

/// Kind of media a caption is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Photo,
    Video,
    OtherDocument,
    TextOnly,
}

/// Outcome of rewriting a caption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteResult {
    /// There was no caption to rewrite.
    Unchanged,

    /// Escaped and wrapped `MarkdownV2` text.
    Rewritten(String),
}

impl RewriteResult {
    /// Returns the rewritten text, if any.
    #[must_use]
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Unchanged => None,
            Self::Rewritten(text) => Some(text),
        }
    }
}

/// Rewrites a caption for republishing.
///
/// An absent or empty caption yields [`RewriteResult::Unchanged`]. Any other
/// input, including one where every line gets dropped, yields wrapped
/// `MarkdownV2` text.
#[must_use]
pub fn rewrite(caption: Option<&str>, kind: MediaKind) -> RewriteResult {
    let Some(caption) = caption.filter(|c| !c.is_empty()) else {
        return RewriteResult::Unchanged;
    };

    let cleaned = clean_lines(caption).join("\n");
    RewriteResult::Rewritten(wrap_for(&escape_markdown_v2(&cleaned), kind))
}
