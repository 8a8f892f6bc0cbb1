//! Editing surface abstraction
//!
//! The text-editing widget is an external collaborator. The shell only needs
//! to read its text and cursor, move the cursor, and hand it focus.

use super::line_numbers::clamp_line;

/// The code-editing widget, as seen by the editor shell.
///
/// Change and cursor-move notifications are delivered by calling the shell's
/// `on_change` / `on_cursor_activity` handlers.
pub trait EditingSurface {
    /// Full current text.
    fn text(&self) -> String;

    /// Zero-based line of the cursor.
    fn cursor_line(&self) -> usize;

    /// Zero-based column of the cursor.
    fn cursor_column(&self) -> usize {
        0
    }

    /// Move the cursor to the start of `line`.
    fn set_cursor_line(&mut self, line: usize);

    /// Request keyboard focus.
    fn focus(&mut self);
}

/// Headless in-memory editing surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
    /// Cursor position (line, column), 0-indexed
    cursor: (usize, usize),
    focused: bool,
}

impl TextBuffer {
    /// Create a buffer holding `text` with the cursor at the start.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Replace the text, keeping the cursor inside the document.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor.0 = clamp_line(&self.text, self.cursor.0);
    }

    /// Place the cursor at `(line, column)`; the line is clamped to the document.
    pub fn set_cursor(&mut self, line: usize, column: usize) {
        self.cursor = (clamp_line(&self.text, line), column);
    }

    /// Whether focus has been requested since the last `blur`.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Drop focus.
    pub fn blur(&mut self) {
        self.focused = false;
    }
}

impl EditingSurface for TextBuffer {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn cursor_line(&self) -> usize {
        self.cursor.0
    }

    fn cursor_column(&self) -> usize {
        self.cursor.1
    }

    fn set_cursor_line(&mut self, line: usize) {
        self.set_cursor(line, 0);
    }

    fn focus(&mut self) {
        self.focused = true;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
