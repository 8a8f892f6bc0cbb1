//! Markdown rendering service built on comrak
//!
//! The editor core never talks to comrak directly. It goes through the
//! [`RenderTransform`] trait so that tests and alternative front ends can plug
//! in their own `render(source) -> html` function. [`MarkdownRenderer`] is the
//! production implementation: it is constructed once from [`MarkdownOptions`]
//! at application start and passed explicitly into the editor shell.

use comrak::nodes::NodeValue;
use comrak::{markdown_to_html, parse_document, Anchorizer, Arena, Options};
use log::debug;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use super::headings::plain_text;
use crate::error::Result;

// ─────────────────────────────────────────────────────────────────────────────
// Rendering Transform
// ─────────────────────────────────────────────────────────────────────────────

/// A pure source-to-markup conversion.
///
/// Implementations must give every heading element an `id` attribute and must
/// pass the cursor sentinel through as literal text.
pub trait RenderTransform {
    /// Render `source` to display markup.
    fn render(&self, source: &str) -> Result<String>;
}

impl<F> RenderTransform for F
where
    F: Fn(&str) -> Result<String>,
{
    fn render(&self, source: &str) -> Result<String> {
        self(source)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Options
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration options for markdown rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownOptions {
    /// Enable GitHub Flavored Markdown tables
    pub tables: bool,
    /// Enable strikethrough syntax (~~text~~)
    pub strikethrough: bool,
    /// Turn bare URLs and emails into links
    pub autolink: bool,
    /// Enable task lists (- [ ] and - [x])
    pub tasklist: bool,
    /// Enable superscript (^text^)
    pub superscript: bool,
    /// Enable footnotes
    pub footnotes: bool,
    /// Enable description lists
    pub description_lists: bool,
    /// Typographic quotes and dashes
    pub smart_punctuation: bool,
    /// Pass raw HTML in the source through to the output
    pub allow_raw_html: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            autolink: true,
            tasklist: false,
            superscript: true,
            footnotes: true,
            description_lists: true,
            smart_punctuation: true,
            allow_raw_html: false,
        }
    }
}

impl MarkdownOptions {
    /// Convert to comrak Options.
    ///
    /// comrak's own `header_ids` extension is left off: it puts the id on an
    /// inner anchor element rather than on the heading tag itself.
    fn to_comrak_options(&self) -> Options<'static> {
        let mut options = Options::default();

        options.extension.strikethrough = self.strikethrough;
        options.extension.table = self.tables;
        options.extension.autolink = self.autolink;
        options.extension.tasklist = self.tasklist;
        options.extension.superscript = self.superscript;
        options.extension.footnotes = self.footnotes;
        options.extension.description_lists = self.description_lists;

        options.parse.smart = self.smart_punctuation;

        options.render.unsafe_ = self.allow_raw_html;

        options
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// MarkdownRenderer
// ─────────────────────────────────────────────────────────────────────────────

/// comrak-backed [`RenderTransform`].
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    options: MarkdownOptions,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new(MarkdownOptions::default())
    }
}

impl MarkdownRenderer {
    /// Build a renderer from the given options.
    pub fn new(options: MarkdownOptions) -> Self {
        debug!("Building markdown renderer with {:?}", options);
        Self { options }
    }

    /// The options this renderer was built from.
    pub fn options(&self) -> &MarkdownOptions {
        &self.options
    }
}

impl RenderTransform for MarkdownRenderer {
    fn render(&self, source: &str) -> Result<String> {
        let html = markdown_to_html(source, &self.options.to_comrak_options());
        Ok(assign_heading_ids(&html))
    }
}

fn bare_heading_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<h([1-6])>(.*?)</h([1-6])>").expect("bare heading pattern is valid")
    })
}

/// Give every attribute-less `<hN>` element a GitHub-style `id`.
///
/// Slugs are deduplicated within one document (`intro`, `intro-1`, ...).
pub fn assign_heading_ids(html: &str) -> String {
    let mut anchorizer = Anchorizer::new();
    bare_heading_regex()
        .replace_all(html, |caps: &Captures| {
            let id = anchorizer.anchorize(plain_text(&caps[2]));
            format!(
                "<h{level} id=\"{id}\">{content}</h{close}>",
                level = &caps[1],
                id = id,
                content = &caps[2],
                close = &caps[3],
            )
        })
        .into_owned()
}

// ─────────────────────────────────────────────────────────────────────────────
// Heading Lines
// ─────────────────────────────────────────────────────────────────────────────

/// Zero-based source lines that start a heading, in document order.
///
/// The source is parsed with the default rendering options, so the n-th entry
/// belongs to the n-th heading the renderer emits, including headings nested
/// in block quotes and list items. Setext headings report their first text
/// line.
pub fn header_lines(raw: &str) -> Vec<usize> {
    let options = MarkdownOptions::default().to_comrak_options();
    let arena = Arena::new();
    let root = parse_document(&arena, raw, &options);

    root.descendants()
        .filter_map(|node| {
            let ast = node.data.borrow();
            match ast.value {
                NodeValue::Heading(_) => Some(ast.sourcepos.start.line.saturating_sub(1)),
                _ => None,
            }
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_render_paragraph() {
        let renderer = MarkdownRenderer::default();
        let html = renderer.render("Hello world").unwrap();
        assert_eq!(html.trim(), "<p>Hello world</p>");
    }

    #[test]
    fn test_render_heading_carries_id() {
        let renderer = MarkdownRenderer::default();
        let html = renderer.render("# Getting Started").unwrap();
        assert!(html.contains(r#"<h1 id="getting-started">Getting Started</h1>"#));
    }

    #[test]
    fn test_duplicate_heading_ids_are_unique() {
        let renderer = MarkdownRenderer::default();
        let html = renderer.render("## Notes\n\n## Notes\n").unwrap();
        assert!(html.contains(r#"id="notes""#));
        assert!(html.contains(r#"id="notes-1""#));
    }

    #[test]
    fn test_heading_id_ignores_inline_markup() {
        let renderer = MarkdownRenderer::default();
        let html = renderer.render("### Hello *big* world").unwrap();
        assert!(html.contains(r#"<h3 id="hello-big-world">Hello <em>big</em> world</h3>"#));
    }

    #[test]
    fn test_sentinel_survives_rendering() {
        let renderer = MarkdownRenderer::default();
        let html = renderer.render("Some@@@@@ text").unwrap();
        assert!(html.contains("Some@@@@@ text"));
    }

    #[test]
    fn test_raw_html_is_escaped_by_default() {
        let renderer = MarkdownRenderer::default();
        let html = renderer.render("<script>alert(1)</script>").unwrap();
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_closure_render_transform() {
        let upper = |src: &str| -> Result<String> { Ok(src.to_uppercase()) };
        assert_eq!(upper.render("abc").unwrap(), "ABC");

        let failing = |_: &str| -> Result<String> { Err(Error::Render("nope".into())) };
        assert!(failing.render("abc").is_err());
    }

    #[test]
    fn test_default_options() {
        let options = MarkdownOptions::default();
        assert!(options.tables);
        assert!(options.footnotes);
        assert!(options.smart_punctuation);
        assert!(!options.allow_raw_html);
    }

    #[test]
    fn test_header_lines_atx_and_setext() {
        let raw = "# One\ntext\n\nTwo\n===\n\n## Three\nFour\n---\n";
        assert_eq!(header_lines(raw), vec![0, 3, 6, 7]);
    }

    #[test]
    fn test_header_lines_skip_code_fences() {
        let raw = "# Real\n```\n# not a heading\n```\n## Also real";
        assert_eq!(header_lines(raw), vec![0, 4]);
    }

    #[test]
    fn test_header_lines_requires_space_after_hashes() {
        assert_eq!(header_lines("#hashtag\n# ok"), vec![1]);
    }

    #[test]
    fn test_header_lines_inside_containers() {
        let raw = "> # Aside\n\n# It's A\n\n# B's";
        assert_eq!(header_lines(raw), vec![0, 2, 4]);
        assert_eq!(header_lines("- # Listed\n\n## After"), vec![0, 2]);
    }

    #[test]
    fn test_header_lines_rule_after_list_is_not_setext() {
        let raw = "- item\n---\n\n## Don't panic";
        assert_eq!(header_lines(raw), vec![3]);
    }

    #[test]
    fn test_header_lines_match_rendered_heading_count() {
        let raw = "> # Aside\n\n- ## Nested\n\nPlain\n===\n";
        let html = MarkdownRenderer::default().render(raw).unwrap();
        let rendered = crate::markdown::extract_headings(&html).len();
        assert_eq!(header_lines(raw).len(), rendered);
    }
}
