//! Content-to-line lookup
//!
//! Maps a piece of heading content back to the source line that produced it,
//! used when an outline entry is activated.

use super::outline::OutlineNode;
use crate::markdown::header_lines;
use log::debug;

/// Zero-based line of the first occurrence of `fragment` in `raw`.
///
/// Only the first occurrence counts: duplicate heading text under different
/// parents always resolves to the earliest line. Returns `None` for an empty
/// fragment or one that does not occur.
pub fn locate(raw: &str, fragment: &str) -> Option<usize> {
    if fragment.is_empty() {
        return None;
    }
    let pos = raw.find(fragment)?;
    Some(raw[..pos].matches('\n').count())
}

/// Resolve the source line of an outline heading.
///
/// `ordinal` is the node's position among all headings in document order.
/// Tries, in order: the rendered content verbatim, the content with inline
/// markup removed, that text with typographic punctuation folded back to
/// ASCII, then the `ordinal`-th heading line in the source.
pub fn locate_heading(raw: &str, node: &OutlineNode, ordinal: usize) -> Option<usize> {
    if let Some(line) = locate(raw, &node.content) {
        return Some(line);
    }

    let plain = node.plain_text();
    if let Some(line) = locate(raw, plain.trim()) {
        debug!("Heading '{}' matched by plain text", node.id);
        return Some(line);
    }

    let folded = fold_typography(plain.trim());
    if let Some(line) = locate(raw, &folded) {
        debug!("Heading '{}' matched by folded punctuation", node.id);
        return Some(line);
    }

    let line = header_lines(raw).get(ordinal).copied();
    if line.is_some() {
        debug!("Heading '{}' matched by ordinal {}", node.id, ordinal);
    }
    line
}

/// Undo smart punctuation: curly quotes, dashes and ellipses become the ASCII
/// sequences they are typed as.
fn fold_typography(text: &str) -> String {
    let mut folded = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{2018}' | '\u{2019}' => folded.push('\''),
            '\u{201C}' | '\u{201D}' => folded.push('"'),
            '\u{2013}' => folded.push_str("--"),
            '\u{2014}' => folded.push_str("---"),
            '\u{2026}' => folded.push_str("..."),
            other => folded.push(other),
        }
    }
    folded
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
