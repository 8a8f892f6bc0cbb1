//! Editor module for markup-editor
//!
//! This module contains the editor-side core: the outline tree, the
//! content-to-line lookup, the cursor synchronizer, the command table, and the
//! editing surface abstraction.

mod commands;
mod cursor_sync;
mod line_lookup;
mod line_numbers;
mod outline;
mod surface;

pub use commands::Command;
pub use cursor_sync::{
    render_context, Anchor, CursorSynchronizer, SyncOutcome, CURSOR_MARKER_CLASS,
    CURSOR_MARKER_HTML, DEFAULT_SENTINEL,
};
pub use line_lookup::{locate, locate_heading};
pub use line_numbers::{clamp_line, count_lines};
pub use outline::{build_from_headings, build_outline, find_by_id, flatten, OutlineNode};
pub use surface::{EditingSurface, TextBuffer};
