//! Marker splicing that tolerates inline markup noise
//!
//! [`line_safe_insert`] splices a marker token into a single source line
//! without breaking the construct the line belongs to: images, emoji
//! shortcodes, code fences, footnotes and abbreviations.

use regex::Regex;
use std::sync::OnceLock;

fn word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\w").expect("word pattern is valid"))
}

fn unsafe_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Code fences, footnotes ([^...]) and abbreviations (*[...])
    RE.get_or_init(|| Regex::new(r"```|~~~|\[\^|\*\[").expect("unsafe line pattern is valid"))
}

fn image_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"!\[.*\]\(.*\)").expect("image pattern is valid"))
}

fn shortcode_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r":[\w+-]+:").expect("shortcode pattern is valid"))
}

fn shortcode_or_word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r":[\w+-]+:|\w+").expect("shortcode/word pattern is valid"))
}

// ─────────────────────────────────────────────────────────────────────────────
// Marker Insertion
// ─────────────────────────────────────────────────────────────────────────────

/// Splice `marker` into `line` right after the text that renders as `context`.
///
/// Returns `None` when the line must not be touched: it has no word characters
/// (it renders to nothing, e.g. a table rule) or it belongs to a code fence,
/// footnote or abbreviation definition.
///
/// Placement rules, first match wins:
/// - image syntax: after the closing parenthesis
/// - emoji shortcode present: after the first shortcode or word
/// - `context` present: after its first occurrence
/// - otherwise: after the last word character
pub fn line_safe_insert(line: &str, context: &str, marker: &str) -> Option<String> {
    if !word_regex().is_match(line) {
        return None;
    }
    if unsafe_line_regex().is_match(line) {
        return None;
    }

    let at = if image_regex().is_match(line) {
        line.rfind(')')? + 1
    } else if shortcode_regex().is_match(line) {
        shortcode_or_word_regex().find(line)?.end()
    } else if let Some(start) = line.find(context).filter(|_| !context.is_empty()) {
        start + context.len()
    } else {
        word_regex().find_iter(line).last()?.end()
    };

    let mut spliced = String::with_capacity(line.len() + marker.len());
    spliced.push_str(&line[..at]);
    spliced.push_str(marker);
    spliced.push_str(&line[at..]);
    Some(spliced)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
