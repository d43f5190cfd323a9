//! `MarkdownV2` escaping and wrapping.

use super::MediaKind;

/// Characters that get a backslash prefix in `MarkdownV2` output.
pub const SPECIAL_CHARACTERS: &[char] = &[
    '\\', '_', '*', '[', ']', '(', ')', '~', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
];

/// Escapes text for Telegram `MarkdownV2`.
///
/// Single pass: inserted backslashes are never rescanned.
#[must_use]
pub fn escape_markdown_v2(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() * 2);

    for ch in text.chars() {
        if SPECIAL_CHARACTERS.contains(&ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }

    escaped
}

/// Wraps already escaped text in the emphasis used for `kind`.
///
/// Photos get italic bold, everything else plain bold.
#[must_use]
pub fn wrap_for(escaped: &str, kind: MediaKind) -> String {
    match kind {
        MediaKind::Photo => format!("_*{escaped}*_"),
        MediaKind::Video | MediaKind::OtherDocument | MediaKind::TextOnly => {
            format!("*{escaped}*")
        }
    }
}
