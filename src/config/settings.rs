//! User settings and preferences for markup-editor
//!
//! This module defines the `Settings` struct that holds all user-configurable
//! options, with serde support for JSON persistence.

use crate::editor::DEFAULT_SENTINEL;
use crate::markdown::MarkdownOptions;
use crate::preview::ScrollConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

// ─────────────────────────────────────────────────────────────────────────────
// View Options
// ─────────────────────────────────────────────────────────────────────────────

/// Which panes of the split view are visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Columns {
    /// Text-editing pane
    pub editor: bool,
    /// Rendered preview pane
    pub preview: bool,
    /// Outline pane
    pub outline: bool,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            editor: true,
            preview: true,
            outline: false, // Hidden by default
        }
    }
}

impl Columns {
    /// Number of visible panes.
    pub fn visible_count(&self) -> usize {
        [self.editor, self.preview, self.outline]
            .iter()
            .filter(|&&visible| visible)
            .count()
    }
}

/// Toggleable view state, driven by the command table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewOptions {
    /// Whether the editing surface shows line numbers
    pub line_numbers: bool,
    /// Whether the editing surface wraps long lines
    pub line_wrapping: bool,
    /// Pane visibility
    pub columns: Columns,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            line_numbers: true,
            line_wrapping: true,
            columns: Columns::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Scroll Settings
// ─────────────────────────────────────────────────────────────────────────────

/// Smooth-scroll tuning for the preview pane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollSettings {
    /// Animate preview scrolling; when off, the preview jumps
    pub smooth: bool,
    /// Maximum animation steps
    pub iterations: u32,
    /// Milliseconds between steps
    pub interval_ms: u64,
    /// Remaining distance (pixels) at which the animation snaps
    pub snap_threshold: f64,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            smooth: true,
            iterations: 15,
            interval_ms: 30,
            snap_threshold: 2.0,
        }
    }
}

impl ScrollSettings {
    /// Animator configuration for these settings.
    pub fn to_scroll_config(&self) -> ScrollConfig {
        ScrollConfig {
            max_iterations: self.iterations,
            interval: Duration::from_millis(self.interval_ms),
            snap_threshold: self.snap_threshold,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Main Settings Struct
// ─────────────────────────────────────────────────────────────────────────────

/// User preferences and application settings.
///
/// This struct is serialized to JSON and persisted to the user's config directory.
/// All fields have sensible defaults via the `Default` trait and `#[serde(default)]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Line numbers, wrapping, and pane visibility
    pub view: ViewOptions,

    /// Widget width in pixels
    pub width: f32,

    /// Widget height in pixels
    pub height: f32,

    /// Markdown rendering options
    pub markdown: MarkdownOptions,

    /// Preview smooth scrolling
    pub scroll: ScrollSettings,

    /// Token spliced into the source to locate the cursor in the preview
    pub cursor_sentinel: String,

    /// The cursor marker is placed `viewport_height / centering_divisor` below
    /// the top of the preview
    pub centering_divisor: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            view: ViewOptions::default(),
            width: 500.0,
            height: 500.0,
            markdown: MarkdownOptions::default(),
            scroll: ScrollSettings::default(),
            cursor_sentinel: DEFAULT_SENTINEL.to_string(),
            centering_divisor: 2.2,
        }
    }
}

impl Settings {
    // ─────────────────────────────────────────────────────────────────────────
    // Validation Constants and Sanitization
    // ─────────────────────────────────────────────────────────────────────────

    /// Minimum widget dimension.
    pub const MIN_SIZE: f32 = 100.0;
    /// Maximum widget dimension.
    pub const MAX_SIZE: f32 = 10000.0;
    /// Minimum smooth-scroll steps.
    pub const MIN_SCROLL_ITERATIONS: u32 = 1;
    /// Maximum smooth-scroll steps.
    pub const MAX_SCROLL_ITERATIONS: u32 = 100;
    /// Minimum step interval in milliseconds.
    pub const MIN_SCROLL_INTERVAL_MS: u64 = 1;
    /// Maximum step interval in milliseconds.
    pub const MAX_SCROLL_INTERVAL_MS: u64 = 1000;
    /// Minimum centering divisor.
    pub const MIN_CENTERING_DIVISOR: f64 = 1.0;
    /// Maximum centering divisor.
    pub const MAX_CENTERING_DIVISOR: f64 = 10.0;

    /// Sanitize settings by clamping values to valid ranges.
    pub fn sanitize(&mut self) {
        self.width = self.width.clamp(Self::MIN_SIZE, Self::MAX_SIZE);
        self.height = self.height.clamp(Self::MIN_SIZE, Self::MAX_SIZE);

        self.scroll.iterations = self
            .scroll
            .iterations
            .clamp(Self::MIN_SCROLL_ITERATIONS, Self::MAX_SCROLL_ITERATIONS);
        self.scroll.interval_ms = self
            .scroll
            .interval_ms
            .clamp(Self::MIN_SCROLL_INTERVAL_MS, Self::MAX_SCROLL_INTERVAL_MS);
        if !self.scroll.snap_threshold.is_finite() || self.scroll.snap_threshold <= 0.0 {
            self.scroll.snap_threshold = ScrollSettings::default().snap_threshold;
        }

        if !self.centering_divisor.is_finite() {
            self.centering_divisor = Settings::default().centering_divisor;
        }
        self.centering_divisor = self
            .centering_divisor
            .clamp(Self::MIN_CENTERING_DIVISOR, Self::MAX_CENTERING_DIVISOR);

        // A sentinel with word characters could be mistaken for document text
        let sentinel_ok = !self.cursor_sentinel.is_empty()
            && !self
                .cursor_sentinel
                .chars()
                .any(|c| c.is_alphanumeric() || c == '_' || c.is_whitespace());
        if !sentinel_ok {
            self.cursor_sentinel = DEFAULT_SENTINEL.to_string();
        }
    }

    /// Parse settings from JSON and sanitize them.
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
