//! Markdown rendering and markup heuristics
//!
//! This module wraps the comrak library behind the [`RenderTransform`] seam and
//! provides the text-level helpers the editor core needs on both sides of it.
//!
//! # Features
//! - Render markdown to HTML with id-carrying headings
//! - Extract heading annotations from rendered HTML
//! - Splice a marker into a source line without corrupting its markup
//! - Locate heading lines in raw source
//!
//! # Example
//! ```ignore
//! use crate::markdown::{extract_headings, MarkdownRenderer, RenderTransform};
//!
//! let renderer = MarkdownRenderer::default();
//! let html = renderer.render("# Hello\n\nThis is **bold** text.")?;
//! let headings = extract_headings(&html);
//! ```

mod headings;
mod line_insert;
mod render;

pub use headings::{extract_headings, plain_text, HeadingAnnotation};
pub use line_insert::line_safe_insert;
pub use render::{
    assign_heading_ids, header_lines, MarkdownOptions, MarkdownRenderer, RenderTransform,
};
