//! Editor shell state management for markup-editor
//!
//! This module defines `EditorShell`, which owns the document (raw text,
//! rendered markup, outline, line count) and routes events between the
//! editing surface, the rendering transform, and the preview surface.
//!
//! # Event flow
//!
//! - text changed: re-render, rebuild the outline, push markup to the preview
//! - cursor moved: mark the cursor in the preview and start a scroll animation
//! - outline entry activated: move the editing cursor to the heading's line

use crate::config::{Settings, ViewOptions};
use crate::editor::{
    build_outline, count_lines, find_by_id, locate_heading, Command, CursorSynchronizer,
    EditingSurface, OutlineNode, SyncOutcome, CURSOR_MARKER_CLASS,
};
use crate::error::Result;
use crate::markdown::{MarkdownRenderer, RenderTransform};
use crate::preview::{AnimationHandle, PreviewSurface, ScrollAnimator, TickOutcome};
use log::{debug, info};

// ─────────────────────────────────────────────────────────────────────────────
// Document State
// ─────────────────────────────────────────────────────────────────────────────

/// The document as last seen by the shell. Replaced wholesale on every edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentState {
    /// Raw markdown source
    pub raw: String,
    /// Rendered markup, without the cursor marker
    pub html: String,
    /// Heading tree
    pub outline: Vec<OutlineNode>,
    /// Line count of `raw`
    pub loc: usize,
}

impl DocumentState {
    fn render<R>(raw: &str, renderer: &R) -> Result<Self>
    where
        R: RenderTransform + ?Sized,
    {
        let html = renderer.render(raw)?;
        let outline = build_outline(&html);
        Ok(Self {
            raw: raw.to_string(),
            loc: count_lines(raw),
            html,
            outline,
        })
    }
}

/// Status-bar data. 1-based line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusInfo {
    /// Total lines in the document
    pub loc: usize,
    /// Cursor line
    pub line: usize,
    /// Cursor column
    pub col: usize,
}

// ─────────────────────────────────────────────────────────────────────────────
// EditorShell
// ─────────────────────────────────────────────────────────────────────────────

/// Composes the editing surface, renderer, and preview into one editor.
pub struct EditorShell<E, P, R = MarkdownRenderer>
where
    E: EditingSurface,
    P: PreviewSurface,
    R: RenderTransform,
{
    editing: E,
    preview: P,
    renderer: R,
    settings: Settings,
    document: DocumentState,
    cursor: CursorSynchronizer,
    /// Source line currently carrying the preview's cursor marker
    anchor_line: Option<usize>,
    animator: ScrollAnimator,
}

impl<E, P> EditorShell<E, P, MarkdownRenderer>
where
    E: EditingSurface,
    P: PreviewSurface,
{
    /// Create a shell rendering with comrak, configured from `settings.markdown`.
    pub fn with_settings(editing: E, preview: P, settings: Settings) -> Result<Self> {
        let renderer = MarkdownRenderer::new(settings.markdown.clone());
        Self::new(editing, preview, renderer, settings)
    }
}

impl<E, P, R> EditorShell<E, P, R>
where
    E: EditingSurface,
    P: PreviewSurface,
    R: RenderTransform,
{
    /// Create a shell and render the editing surface's current text.
    pub fn new(editing: E, mut preview: P, renderer: R, settings: Settings) -> Result<Self> {
        let document = DocumentState::render(&editing.text(), &renderer)?;
        preview.set_html(&document.html);

        info!(
            "Editor shell ready: {} lines, {} top-level headings",
            document.loc,
            document.outline.len()
        );

        Ok(Self {
            cursor: CursorSynchronizer::new(settings.cursor_sentinel.clone()),
            anchor_line: None,
            animator: ScrollAnimator::with_config(settings.scroll.to_scroll_config()),
            editing,
            preview,
            renderer,
            settings,
            document,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Event Handlers
    // ─────────────────────────────────────────────────────────────────────────

    /// The editing surface's text changed to `text`.
    ///
    /// On a render error the previous document stays in place.
    pub fn on_change(&mut self, text: &str) -> Result<()> {
        self.document = DocumentState::render(text, &self.renderer)?;
        self.preview.set_html(&self.document.html);
        // Positions are stale after an edit; re-mark on the next cursor event
        self.cursor.reset();
        self.anchor_line = None;

        debug!(
            "Document changed: {} lines, {} headings",
            self.document.loc,
            self.document.outline.iter().map(OutlineNode::count_nodes).sum::<usize>()
        );
        Ok(())
    }

    /// The editing cursor moved to `line` (0-based).
    ///
    /// Returns the handle of the scroll animation to drive with
    /// [`on_timer_tick`](Self::on_timer_tick), or `None` when nothing needs
    /// animating (same line, no anchor, or smooth scrolling disabled).
    pub fn on_cursor_activity(&mut self, line: usize) -> Result<Option<AnimationHandle>> {
        let outcome = self
            .cursor
            .on_cursor_move(&self.document.raw, line, &self.renderer)?;

        let html = match outcome {
            SyncOutcome::Unchanged => return Ok(None),
            SyncOutcome::NoAnchor { html } => {
                self.preview.set_html(&html);
                self.anchor_line = None;
                return Ok(None);
            }
            SyncOutcome::Marked { anchor_line, html } => {
                self.anchor_line = Some(anchor_line);
                html
            }
        };

        self.preview.set_html(&html);
        let Some(marker_top) = self.preview.marker_offset(CURSOR_MARKER_CLASS) else {
            debug!("Cursor marker not found in preview");
            return Ok(None);
        };

        let target =
            (marker_top - self.preview.viewport_height() / self.settings.centering_divisor).max(0.0);

        if self.settings.scroll.smooth {
            Ok(Some(self.animator.animate_to(&mut self.preview, target)))
        } else {
            self.animator.cancel();
            self.preview.set_scroll_offset(target);
            Ok(None)
        }
    }

    /// A scroll timer fired for `handle`.
    pub fn on_timer_tick(&mut self, handle: AnimationHandle) -> TickOutcome {
        self.animator.tick(handle, &mut self.preview)
    }

    /// Drive the running scroll animation to its end without a timer.
    ///
    /// Returns the number of steps taken.
    pub fn finish_scroll(&mut self) -> u32 {
        self.animator.run_to_completion(&mut self.preview)
    }

    /// An outline entry was activated.
    ///
    /// Moves the editing cursor to the heading's source line and focuses the
    /// editor. Returns the line, or `None` if the heading cannot be found.
    pub fn on_outline_click(&mut self, node_id: &str) -> Option<usize> {
        let text = self.editing.text();
        let line = {
            let (ordinal, node) = find_by_id(&self.document.outline, node_id)?;
            locate_heading(&text, node, ordinal)?
        };

        debug!("Outline entry '{}' resolved to line {}", node_id, line);
        self.editing.set_cursor_line(line);
        self.editing.focus();
        Some(line)
    }

    /// Run a command from the command table.
    ///
    /// Returns the new value of the toggled option.
    pub fn on_command(&mut self, command: Command) -> bool {
        let enabled = command.apply(&mut self.settings.view);
        info!("{}: {}", command.label(), if enabled { "on" } else { "off" });
        enabled
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Line count and 1-based cursor position.
    pub fn status(&self) -> StatusInfo {
        StatusInfo {
            loc: self.document.loc,
            line: self.editing.cursor_line() + 1,
            col: self.editing.cursor_column() + 1,
        }
    }

    pub fn document(&self) -> &DocumentState {
        &self.document
    }

    pub fn raw(&self) -> &str {
        &self.document.raw
    }

    pub fn html(&self) -> &str {
        &self.document.html
    }

    pub fn outline(&self) -> &[OutlineNode] {
        &self.document.outline
    }

    /// Last cursor line handled by the synchronizer.
    pub fn active_line(&self) -> Option<usize> {
        self.cursor.active_line()
    }

    /// Source line the preview's cursor marker was spliced into.
    pub fn anchor_line(&self) -> Option<usize> {
        self.anchor_line
    }

    pub fn view(&self) -> &ViewOptions {
        &self.settings.view
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn animator(&self) -> &ScrollAnimator {
        &self.animator
    }

    pub fn editing(&self) -> &E {
        &self.editing
    }

    pub fn editing_mut(&mut self) -> &mut E {
        &mut self.editing
    }

    pub fn preview(&self) -> &P {
        &self.preview
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{TextBuffer, CURSOR_MARKER_HTML};
    use crate::error::Error;
    use crate::preview::{HeadlessPreview, ScrollContainer};

    const VIEWPORT: f64 = 220.0;
    const BLOCK: f64 = 24.0;

    fn paragraphs(count: usize) -> String {
        (0..count)
            .map(|i| format!("para{}", i))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn shell_for(text: &str) -> EditorShell<TextBuffer, HeadlessPreview> {
        shell_with(text, Settings::default())
    }

    fn shell_with(text: &str, settings: Settings) -> EditorShell<TextBuffer, HeadlessPreview> {
        let preview = HeadlessPreview::new(VIEWPORT).with_block_height(BLOCK);
        EditorShell::with_settings(TextBuffer::new(text), preview, settings).unwrap()
    }

    #[test]
    fn test_new_renders_initial_document() {
        let shell = shell_for("# Intro\n\n## Details\n\ntext");
        assert_eq!(shell.document().loc, 5);
        assert_eq!(shell.outline().len(), 1);
        assert_eq!(shell.outline()[0].id, "intro");
        assert_eq!(shell.outline()[0].children[0].id, "details");
        assert_eq!(shell.preview().html(), shell.html());
        assert!(shell.html().contains(r#"<h2 id="details">"#));
    }

    #[test]
    fn test_on_change_rebuilds_outline() {
        let mut shell = shell_for("# One");
        shell.on_change("# One\n\n# Two\n\n### Three").unwrap();

        assert_eq!(shell.raw(), "# One\n\n# Two\n\n### Three");
        assert_eq!(shell.document().loc, 5);
        assert_eq!(shell.outline().len(), 2);
        assert_eq!(shell.outline()[1].children[0].level, 3);
        assert!(shell.preview().html().contains("Three"));
    }

    #[test]
    fn test_on_change_without_headings() {
        let mut shell = shell_for("# One");
        shell.on_change("just text").unwrap();
        assert!(shell.outline().is_empty());
    }

    #[test]
    fn test_on_change_resets_cursor_cache() {
        let mut shell = shell_for("alpha\n\nbeta");
        shell.on_cursor_activity(2).unwrap();
        assert_eq!(shell.active_line(), Some(2));

        shell.on_change("alpha\n\nbeta gamma").unwrap();
        assert_eq!(shell.active_line(), None);
        assert_eq!(shell.anchor_line(), None);
        shell.on_cursor_activity(2).unwrap();
        assert!(shell.preview().html().contains(CURSOR_MARKER_HTML));
    }

    #[test]
    fn test_render_error_keeps_previous_document() {
        let renderer = |src: &str| -> Result<String> {
            if src.contains("bad") {
                Err(Error::Render("rejected".into()))
            } else {
                MarkdownRenderer::default().render(src)
            }
        };
        let mut shell = EditorShell::new(
            TextBuffer::new("# Fine"),
            HeadlessPreview::default(),
            renderer,
            Settings::default(),
        )
        .unwrap();

        assert!(shell.on_change("bad input").is_err());
        assert_eq!(shell.raw(), "# Fine");
        assert_eq!(shell.outline().len(), 1);
    }

    #[test]
    fn test_cursor_activity_scrolls_marker_into_view() {
        let mut shell = shell_for(&paragraphs(30));
        // Line 20 is the eleventh paragraph
        let handle = shell.on_cursor_activity(20).unwrap();
        assert!(handle.is_some());
        assert_eq!(shell.anchor_line(), Some(20));

        let expected = 10.0 * BLOCK - VIEWPORT / 2.2;
        assert_eq!(shell.animator().current_target(), Some(expected));
        assert!(shell.finish_scroll() <= 15);
        assert_eq!(shell.preview().scroll_offset(), expected);
        assert!(shell
            .preview()
            .html()
            .contains(r#"para10<span class="cursor">|</span>"#));
    }

    #[test]
    fn test_cursor_near_top_targets_zero() {
        let mut shell = shell_for(&paragraphs(5));
        shell.on_cursor_activity(2).unwrap();
        assert_eq!(shell.animator().current_target(), Some(0.0));
    }

    #[test]
    fn test_timer_ticks_drive_animation() {
        let mut shell = shell_for(&paragraphs(40));
        let handle = shell.on_cursor_activity(60).unwrap().unwrap();

        let mut ticks = 0;
        while let TickOutcome::Running(_) = shell.on_timer_tick(handle) {
            ticks += 1;
        }
        assert!(ticks < 15);
        assert!(!shell.animator().is_running());
        assert_eq!(shell.on_timer_tick(handle), TickOutcome::Stale);
    }

    #[test]
    fn test_new_cursor_event_supersedes_animation() {
        let mut shell = shell_for(&paragraphs(40));
        let first = shell.on_cursor_activity(40).unwrap().unwrap();
        shell.on_timer_tick(first);
        let second = shell.on_cursor_activity(70).unwrap().unwrap();

        assert_ne!(first, second);
        assert_eq!(shell.on_timer_tick(first), TickOutcome::Stale);
        assert!(shell.animator().is_running());
    }

    #[test]
    fn test_same_line_is_ignored() {
        let mut shell = shell_for(&paragraphs(10));
        assert!(shell.on_cursor_activity(8).unwrap().is_some());
        assert!(shell.on_cursor_activity(8).unwrap().is_none());
    }

    #[test]
    fn test_no_anchor_shows_plain_preview() {
        let mut shell = shell_for("\n\n---\n");
        assert!(shell.on_cursor_activity(3).unwrap().is_none());
        assert_eq!(shell.anchor_line(), None);
        assert!(!shell.preview().html().contains(CURSOR_MARKER_HTML));
        assert_eq!(shell.preview().scroll_offset(), 0.0);
    }

    #[test]
    fn test_smooth_scroll_disabled_jumps() {
        let mut settings = Settings::default();
        settings.scroll.smooth = false;
        let mut shell = shell_with(&paragraphs(30), settings);

        assert!(shell.on_cursor_activity(20).unwrap().is_none());
        assert!(!shell.animator().is_running());
        assert_eq!(shell.preview().scroll_offset(), 10.0 * BLOCK - VIEWPORT / 2.2);
    }

    #[test]
    fn test_custom_sentinel_from_settings() {
        let settings = Settings {
            cursor_sentinel: "%%%%".to_string(),
            ..Settings::default()
        };
        let mut shell = shell_with("hello world", settings);
        shell.on_cursor_activity(0).unwrap();
        assert!(shell.preview().html().contains(CURSOR_MARKER_HTML));
        assert!(!shell.preview().html().contains("%%%%"));
    }

    #[test]
    fn test_outline_click_moves_cursor() {
        let mut shell = shell_for("# Intro\n\ntext\n\n## Details\n\nmore");
        assert!(!shell.editing().is_focused());

        assert_eq!(shell.on_outline_click("details"), Some(4));
        assert_eq!(shell.editing().cursor_line(), 4);
        assert!(shell.editing().is_focused());
    }

    #[test]
    fn test_outline_click_formatted_heading() {
        let mut shell = shell_for("intro\n\n## The *real* title");
        assert_eq!(shell.on_outline_click("the-real-title"), Some(2));
    }

    #[test]
    fn test_outline_click_after_quoted_heading() {
        let mut shell = shell_for("> # Aside\n\n# It's A\n\n# B's");
        assert_eq!(shell.on_outline_click("aside"), Some(0));
        assert_eq!(shell.on_outline_click("its-a"), Some(2));
        assert_eq!(shell.on_outline_click("bs"), Some(4));
    }

    #[test]
    fn test_outline_click_ignores_rule_after_list() {
        let mut shell = shell_for("- item\n---\n\n## Don't panic");
        assert_eq!(shell.on_outline_click("dont-panic"), Some(3));
        assert_eq!(shell.editing().cursor_line(), 3);
    }

    #[test]
    fn test_outline_click_unknown_id() {
        let mut shell = shell_for("# Intro");
        assert_eq!(shell.on_outline_click("missing"), None);
        assert_eq!(shell.editing().cursor_line(), 0);
        assert!(!shell.editing().is_focused());
    }

    #[test]
    fn test_on_command_toggles_view() {
        let mut shell = shell_for("");
        assert!(!shell.view().columns.outline);
        assert!(shell.on_command(Command::ToggleOutlineColumn));
        assert!(shell.view().columns.outline);
        assert!(!shell.on_command(Command::ToggleLineNumbers));
        assert!(!shell.view().line_numbers);
    }

    #[test]
    fn test_status() {
        let mut shell = shell_for("a\nb\nc");
        shell.editing_mut().set_cursor(1, 3);
        assert_eq!(
            shell.status(),
            StatusInfo {
                loc: 3,
                line: 2,
                col: 4
            }
        );
    }
}
