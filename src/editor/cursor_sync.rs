//! Cursor-to-preview synchronization
//!
//! When the editing cursor moves to a new line, the preview should show where
//! that line ended up. The synchronizer walks up from the cursor to the nearest
//! line that renders visible text (the anchor line), splices a sentinel token
//! into it, re-renders the whole document, and swaps the sentinel for a
//! zero-size marker element the preview surface can locate.

use crate::error::Result;
use crate::markdown::{line_safe_insert, RenderTransform};
use log::debug;
use regex::Regex;
use std::sync::OnceLock;

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Default sentinel spliced into the source. Contains no word characters.
pub const DEFAULT_SENTINEL: &str = "@@@@@";

/// Class of the marker element that replaces the sentinel in rendered output.
pub const CURSOR_MARKER_CLASS: &str = "cursor";

/// Marker element markup.
pub const CURSOR_MARKER_HTML: &str = r#"<span class="cursor">|</span>"#;

fn render_context_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?:<[^<>]*>)*(\w+)").expect("context pattern is valid"))
}

/// First word of visible text in a rendered fragment, skipping leading tags.
///
/// Returns `None` when the fragment renders nothing readable up front (blank
/// lines, rules, pure markup, punctuation-led text).
pub fn render_context(rendered: &str) -> Option<&str> {
    render_context_regex()
        .captures(rendered)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

// ─────────────────────────────────────────────────────────────────────────────
// Outcome Types
// ─────────────────────────────────────────────────────────────────────────────

/// The nearest line at or above the cursor that renders visible content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// Zero-based source line
    pub line: usize,
    /// The source line with the sentinel spliced in
    pub spliced: String,
}

/// Result of a cursor move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The cursor stayed on the cached line; nothing was rendered
    Unchanged,
    /// No line at or above the cursor renders content; plain render, no marker
    NoAnchor { html: String },
    /// Marker injected after the anchor line's first rendered word
    Marked { anchor_line: usize, html: String },
}

impl SyncOutcome {
    /// The rendered markup, if any work was done.
    pub fn html(&self) -> Option<&str> {
        match self {
            SyncOutcome::Unchanged => None,
            SyncOutcome::NoAnchor { html } | SyncOutcome::Marked { html, .. } => Some(html),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// CursorSynchronizer
// ─────────────────────────────────────────────────────────────────────────────

/// Tracks the active source line and produces marked-up previews for it.
#[derive(Debug, Clone)]
pub struct CursorSynchronizer {
    /// Last line handled, if any
    active_line: Option<usize>,
    /// Token spliced into the source to find the cursor in rendered output
    sentinel: String,
}

impl Default for CursorSynchronizer {
    fn default() -> Self {
        Self::new(DEFAULT_SENTINEL)
    }
}

impl CursorSynchronizer {
    /// Create a synchronizer using the given sentinel token.
    pub fn new(sentinel: impl Into<String>) -> Self {
        Self {
            active_line: None,
            sentinel: sentinel.into(),
        }
    }

    /// The cached active line.
    pub fn active_line(&self) -> Option<usize> {
        self.active_line
    }

    /// Forget the cached line so the next cursor event is processed.
    pub fn reset(&mut self) {
        self.active_line = None;
    }

    /// The sentinel token in use.
    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    /// Walk up from `from` (inclusive) to line 0 looking for the anchor line.
    ///
    /// Each candidate is rendered on its own with every newline removed. It
    /// qualifies when the output starts with a word once leading tags are
    /// skipped, and the sentinel can be spliced into it safely.
    pub fn find_anchor<R>(&self, lines: &[&str], from: usize, renderer: &R) -> Result<Option<Anchor>>
    where
        R: RenderTransform + ?Sized,
    {
        find_anchor_with(lines, from, renderer, &self.sentinel)
    }

    /// The sentinel, repeated until it no longer occurs anywhere in `raw`.
    fn splice_token(&self, raw: &str) -> String {
        let mut token = self.sentinel.clone();
        while raw.contains(&token) {
            token.push_str(&self.sentinel);
        }
        token
    }

    /// Handle a cursor move to `new_line` in `raw`.
    ///
    /// Does nothing when `new_line` is the cached line. Otherwise re-renders the
    /// full document, with the cursor marker when an anchor line exists.
    /// Render errors propagate and leave the cached line untouched.
    pub fn on_cursor_move<R>(&mut self, raw: &str, new_line: usize, renderer: &R) -> Result<SyncOutcome>
    where
        R: RenderTransform + ?Sized,
    {
        if self.active_line == Some(new_line) {
            return Ok(SyncOutcome::Unchanged);
        }

        let lines: Vec<&str> = raw.split('\n').collect();
        let token = self.splice_token(raw);
        let outcome = match find_anchor_with(&lines, new_line, renderer, &token)? {
            Some(anchor) => {
                debug!("Cursor line {} anchored at line {}", new_line, anchor.line);
                let mut marked = lines.clone();
                marked[anchor.line] = &anchor.spliced;
                let html = renderer
                    .render(&marked.join("\n"))?
                    .replacen(&token, CURSOR_MARKER_HTML, 1);
                SyncOutcome::Marked {
                    anchor_line: anchor.line,
                    html,
                }
            }
            None => {
                debug!("No anchor line at or above line {}", new_line);
                SyncOutcome::NoAnchor {
                    html: renderer.render(raw)?,
                }
            }
        };

        self.active_line = Some(new_line);
        Ok(outcome)
    }
}

fn find_anchor_with<R>(lines: &[&str], from: usize, renderer: &R, token: &str) -> Result<Option<Anchor>>
where
    R: RenderTransform + ?Sized,
{
    if lines.is_empty() {
        return Ok(None);
    }
    let from = from.min(lines.len() - 1);

    for line in (0..=from).rev() {
        let source = lines[line];
        let rendered = renderer.render(source)?.replace('\n', "");
        let Some(context) = render_context(&rendered) else {
            continue;
        };
        if let Some(spliced) = line_safe_insert(source, context, token) {
            return Ok(Some(Anchor { line, spliced }));
        }
    }

    Ok(None)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
