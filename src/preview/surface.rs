//! Preview surface abstraction
//!
//! The preview is a scrollable container showing rendered markup. In a browser
//! it is a DOM element; [`HeadlessPreview`] stands in for it without a layout
//! engine by estimating element positions block by block.

use super::smooth_scroll::ScrollContainer;
use regex::Regex;
use std::sync::OnceLock;

/// The rendered-preview pane, as seen by the editor shell.
pub trait PreviewSurface: ScrollContainer {
    /// Visible height of the pane in pixels.
    fn viewport_height(&self) -> f64;

    /// Replace the pane's content with `html`.
    fn set_html(&mut self, html: &str);

    /// Top offset (pixels, relative to the content) of the first element
    /// carrying `class`, if present.
    fn marker_offset(&self, class: &str) -> Option<f64>;
}

fn block_open_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"<(?:p|h[1-6]|li|pre|blockquote|tr|hr|dt|dd)[\s/>]")
            .expect("block pattern is valid")
    })
}

/// Preview pane without a layout engine.
///
/// Every block-level element is assumed to be `block_height` pixels tall, so
/// an element's offset is the number of blocks opened before it times that
/// height.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessPreview {
    html: String,
    scroll_offset: f64,
    viewport_height: f64,
    block_height: f64,
}

impl Default for HeadlessPreview {
    fn default() -> Self {
        Self::new(500.0)
    }
}

impl HeadlessPreview {
    /// Default estimated height of one block in pixels.
    pub const DEFAULT_BLOCK_HEIGHT: f64 = 24.0;

    /// Create an empty pane with the given viewport height.
    pub fn new(viewport_height: f64) -> Self {
        Self {
            html: String::new(),
            scroll_offset: 0.0,
            viewport_height,
            block_height: Self::DEFAULT_BLOCK_HEIGHT,
        }
    }

    /// Override the estimated block height.
    pub fn with_block_height(mut self, block_height: f64) -> Self {
        self.block_height = block_height;
        self
    }

    /// The markup currently shown.
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Estimated total content height.
    pub fn content_height(&self) -> f64 {
        block_open_regex().find_iter(&self.html).count() as f64 * self.block_height
    }
}

impl ScrollContainer for HeadlessPreview {
    fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll_offset = offset.max(0.0);
    }
}

impl PreviewSurface for HeadlessPreview {
    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn set_html(&mut self, html: &str) {
        self.html = html.to_string();
    }

    fn marker_offset(&self, class: &str) -> Option<f64> {
        let needle = format!("class=\"{}\"", class);
        let pos = self.html.find(&needle)?;
        // The marker sits inside the last block opened before it
        let blocks = block_open_regex().find_iter(&self.html[..pos]).count();
        Some(blocks.saturating_sub(1) as f64 * self.block_height)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_offset_counts_blocks() {
        let mut preview = HeadlessPreview::new(300.0).with_block_height(10.0);
        preview.set_html(
            "<h1 id=\"a\">A</h1>\n<p>one</p>\n<p>two<span class=\"cursor\">|</span></p>\n",
        );
        assert_eq!(preview.marker_offset("cursor"), Some(20.0));
    }

    #[test]
    fn test_marker_in_first_block() {
        let mut preview = HeadlessPreview::default();
        preview.set_html("<p>x<span class=\"cursor\">|</span></p>");
        assert_eq!(preview.marker_offset("cursor"), Some(0.0));
    }

    #[test]
    fn test_missing_marker() {
        let mut preview = HeadlessPreview::default();
        preview.set_html("<p>nothing</p>");
        assert_eq!(preview.marker_offset("cursor"), None);
    }

    #[test]
    fn test_scroll_offset_not_negative() {
        let mut preview = HeadlessPreview::default();
        preview.set_scroll_offset(-40.0);
        assert_eq!(preview.scroll_offset(), 0.0);
    }

    #[test]
    fn test_content_height() {
        let mut preview = HeadlessPreview::new(100.0).with_block_height(5.0);
        preview.set_html("<p>a</p><ul>\n<li>b</li>\n<li>c</li>\n</ul><hr />");
        assert_eq!(preview.content_height(), 20.0);
    }
}
