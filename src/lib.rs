//! markup-editor - headless core of a split-pane Markdown editor
//!
//! The crate keeps a document outline, a rendered preview, and the editing
//! cursor in step:
//!
//! - [`markdown`]: comrak rendering with heading ids, heading extraction
//! - [`editor`]: outline tree, content-to-line lookup, cursor synchronizer,
//!   command table, editing surface abstraction
//! - [`preview`]: preview surface abstraction and the smooth-scroll animator
//! - [`state`]: [`EditorShell`], which wires the above together
//! - [`config`]: persisted user settings

pub mod config;
pub mod editor;
pub mod error;
pub mod markdown;
pub mod preview;
pub mod state;

pub use config::{load_config, Settings};
pub use error::{Error, Result};
pub use markdown::{MarkdownRenderer, RenderTransform};
pub use state::{DocumentState, EditorShell, StatusInfo};
