//! Line scanner that drops links, mentions, and link labels.
//!
//! The scan is a two-state machine:
//! 1. `Normal` → lines are normalized and emitted
//! 2. A link line switches to `AfterLinkPendingSkip` → the next plain line
//!    is dropped and the state returns to `Normal`
//!
//! A link line also retracts the line emitted just before it, as long as
//! that line was the link's direct predecessor and was itself neither a
//! link nor a mention. Mention lines never consume the pending skip.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Substring that marks a line as carrying a link.
pub const LINK_MARKER: &str = "http";

/// Character that marks a line as carrying a mention.
pub const MENTION_SIGIL: char = '@';

/// A mention with the brackets, dots, and whitespace hugging it.
#[allow(clippy::expect_used)]
static TITLE_MENTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[.(\[{\s]*@\w+[.)\]}\s]*").expect("title mention pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ScanState {
    #[default]
    Normal,
    AfterLinkPendingSkip,
}

/// A line in the output buffer, tagged with the input line it came from.
#[derive(Debug)]
struct Emitted {
    source_index: usize,
    text: String,
}

/// Cleans a caption line by line, before any escaping or wrapping.
///
/// The returned lines are what gets joined, escaped, and wrapped by
/// [`super::rewrite`].
#[must_use]
pub fn clean_lines(caption: &str) -> Vec<String> {
    let lines: Vec<&str> = caption.split('\n').collect();
    let mut output: Vec<Emitted> = Vec::with_capacity(lines.len());
    let mut state = ScanState::Normal;

    for (index, &raw) in lines.iter().enumerate() {
        let line = if index == 0 {
            Cow::Owned(normalize_title_dots(raw))
        } else {
            Cow::Borrowed(raw)
        };

        if contains_link(&line) {
            if index > 0 && !contains_link_or_mention(lines[index - 1]) {
                retract_predecessor(&mut output, index);
            }
            state = ScanState::AfterLinkPendingSkip;
            continue;
        }

        if contains_mention(&line) {
            if index == 0 {
                let cleaned = strip_title_mentions(&line);
                if !cleaned.is_empty() {
                    output.push(Emitted {
                        source_index: index,
                        text: cleaned,
                    });
                }
            }
            continue;
        }

        let line = line.replace('_', " ");

        if state == ScanState::AfterLinkPendingSkip {
            state = ScanState::Normal;
            continue;
        }

        output.push(Emitted {
            source_index: index,
            text: line,
        });
    }

    output.into_iter().map(|emitted| emitted.text).collect()
}

fn contains_link(line: &str) -> bool {
    line.contains(LINK_MARKER)
}

fn contains_mention(line: &str) -> bool {
    line.contains(MENTION_SIGIL)
}

fn contains_link_or_mention(line: &str) -> bool {
    contains_link(line) || contains_mention(line)
}

/// Drops the last emitted line if it came from the line right before `index`.
fn retract_predecessor(output: &mut Vec<Emitted>, index: usize) {
    if output
        .last()
        .is_some_and(|last| last.source_index + 1 == index)
    {
        output.pop();
    }
}

/// Replaces every `.` with a space, except one that starts an `mkv` word.
fn normalize_title_dots(line: &str) -> String {
    let mut normalized = String::with_capacity(line.len());

    for (pos, ch) in line.char_indices() {
        if ch == '.' && !starts_mkv_word(&line[pos + 1..]) {
            normalized.push(' ');
        } else {
            normalized.push(ch);
        }
    }

    normalized
}

fn starts_mkv_word(rest: &str) -> bool {
    rest.strip_prefix("mkv")
        .is_some_and(|after| !after.chars().next().is_some_and(is_word_char))
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

fn strip_title_mentions(line: &str) -> String {
    TITLE_MENTION.replace_all(line, "").trim().to_owned()
}
