//! Text cleanup passes applied before any extraction.

use std::sync::LazyLock;

use regex::Regex;

/// Remove every HTML comment (`<!-- ... -->`), including multi-line ones.
///
/// Matching is non-greedy, so text between two comments survives.
pub fn strip_comments(md: &str) -> String {
    static COMMENT_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid regex"));

    COMMENT_RE.replace_all(md, "").into_owned()
}

/// Level of an ATX heading line (`## Title` is 2), or `None` for other lines.
pub(crate) fn heading_level(line: &str) -> Option<usize> {
    let hashes = line.bytes().take_while(|b| *b == b'#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    match line[hashes..].chars().next() {
        None | Some(' ') | Some('\t') | Some('\r') | Some('\n') => Some(hashes),
        _ => None,
    }
}

/// Whether a line opens or closes a fenced code block.
pub(crate) fn is_fence(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("```") || trimmed.starts_with("~~~")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
