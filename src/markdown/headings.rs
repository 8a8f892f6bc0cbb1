//! Heading extraction from rendered markup
//!
//! Scans rendered HTML once, in document order, and yields one
//! [`HeadingAnnotation`] per `<hN id="...">` element. Content is kept exactly
//! as rendered (inner tags included) so an outline entry can later be matched
//! back against the source.

use regex::Regex;
use std::sync::OnceLock;

/// A heading found in rendered markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingAnnotation {
    /// Heading level (1-6 for H1-H6)
    pub level: u8,
    /// Value of the heading's `id` attribute
    pub id: String,
    /// Inner markup of the heading, verbatim
    pub content: String,
}

fn heading_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?s)<h([1-6])[^<>]*?\sid="([^"]*)"[^<>]*>(.*?)</h[1-6]\s*>"#)
            .expect("heading pattern is valid")
    })
}

fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^<>]*>").expect("tag pattern is valid"))
}

/// Extract all headings carrying an `id` from rendered markup.
///
/// A document without headings yields an empty list.
pub fn extract_headings(html: &str) -> Vec<HeadingAnnotation> {
    heading_regex()
        .captures_iter(html)
        .filter_map(|caps| {
            let level = caps[1].parse::<u8>().ok()?;
            Some(HeadingAnnotation {
                level,
                id: caps[2].to_string(),
                content: caps[3].to_string(),
            })
        })
        .collect()
}

/// Strip tags from a markup fragment and decode the common entities.
pub fn plain_text(fragment: &str) -> String {
    let stripped = tag_regex().replace_all(fragment, "");
    decode_entities(&stripped)
}

/// Decode the entities comrak emits when escaping text.
fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
