//! Document outline / Table of Contents module
//!
//! This module turns the flat list of headings found in rendered markup into a
//! tree that mirrors heading-level nesting. The tree is rebuilt from scratch
//! on every content change; it is never patched in place.

use crate::markdown::{extract_headings, plain_text, HeadingAnnotation};
use serde::Serialize;

// ─────────────────────────────────────────────────────────────────────────────
// OutlineNode
// ─────────────────────────────────────────────────────────────────────────────

/// A heading in the document outline, owning its sub-headings.
///
/// Every child has a level strictly greater than its parent's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineNode {
    /// Inner markup of the heading as rendered (tags kept)
    pub content: String,
    /// Heading level (1-6 for H1-H6)
    pub level: u8,
    /// The heading's `id` attribute
    pub id: String,
    /// Sub-headings in document order
    pub children: Vec<OutlineNode>,
}

impl From<HeadingAnnotation> for OutlineNode {
    fn from(heading: HeadingAnnotation) -> Self {
        Self {
            content: heading.content,
            level: heading.level,
            id: heading.id,
            children: Vec::new(),
        }
    }
}

impl OutlineNode {
    /// Heading text with inline tags removed, for display and source lookup.
    pub fn plain_text(&self) -> String {
        plain_text(&self.content)
    }

    /// Whether this heading has sub-headings.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn count_nodes(&self) -> usize {
        1 + self.children.iter().map(OutlineNode::count_nodes).sum::<usize>()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tree Construction
// ─────────────────────────────────────────────────────────────────────────────

/// Build the outline tree for a rendered document.
///
/// Returns the root list. A document without headings yields an empty list.
pub fn build_outline(rendered_html: &str) -> Vec<OutlineNode> {
    build_from_headings(extract_headings(rendered_html))
}

/// Build the outline tree from headings in document order.
///
/// A heading closes every open heading at its own level or deeper, then opens
/// under the deepest heading still open. With nothing left open it becomes a
/// new root, so a heading at or above the last root's level is always a root
/// sibling. Skipped levels (H1 then H4) attach directly; no placeholder nodes
/// are invented.
pub fn build_from_headings<I>(headings: I) -> Vec<OutlineNode>
where
    I: IntoIterator<Item = HeadingAnnotation>,
{
    let mut roots = Vec::new();
    // Open ancestors, shallowest first; each is attached to its parent on close
    let mut open: Vec<OutlineNode> = Vec::new();

    for heading in headings {
        let node = OutlineNode::from(heading);
        while open.last().is_some_and(|top| top.level >= node.level) {
            close_deepest(&mut open, &mut roots);
        }
        open.push(node);
    }

    while !open.is_empty() {
        close_deepest(&mut open, &mut roots);
    }

    roots
}

fn close_deepest(open: &mut Vec<OutlineNode>, roots: &mut Vec<OutlineNode>) {
    if let Some(done) = open.pop() {
        match open.last_mut() {
            Some(parent) => parent.children.push(done),
            None => roots.push(done),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Traversal
// ─────────────────────────────────────────────────────────────────────────────

/// Pre-order walk yielding `(depth, node)`; depth 0 is a root.
///
/// Pre-order is document order, so the position of a node in this list is its
/// ordinal among all headings.
pub fn flatten(roots: &[OutlineNode]) -> Vec<(usize, &OutlineNode)> {
    fn walk<'a>(nodes: &'a [OutlineNode], depth: usize, out: &mut Vec<(usize, &'a OutlineNode)>) {
        for node in nodes {
            out.push((depth, node));
            walk(&node.children, depth + 1, out);
        }
    }

    let mut out = Vec::new();
    walk(roots, 0, &mut out);
    out
}

/// Find a node by id, returning it with its document-order ordinal.
pub fn find_by_id<'a>(roots: &'a [OutlineNode], id: &str) -> Option<(usize, &'a OutlineNode)> {
    flatten(roots)
        .into_iter()
        .enumerate()
        .find(|(_, (_, node))| node.id == id)
        .map(|(ordinal, (_, node))| (ordinal, node))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
