//! DOM Operations Adapter
//!
//! Thin helpers over the `dom_query` crate used by the locator and the field
//! extractors. Everything here is total: missing nodes and attributes come
//! back as `None` or empty strings, never as errors.

// Re-export core types for external use
pub use dom_query::{Document, NodeRef, Selection};

use crate::patterns::WHITESPACE_NORMALIZE;

/// Tags whose text never belongs to visible post content.
const NON_TEXT_TAGS: &[&str] = &["script", "style", "noscript", "template"];

// === Parsing ===

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

// === Attribute Operations ===

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Get an attribute value, trimmed, treating empty values as missing.
#[must_use]
pub fn non_empty_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

// === Querying ===

/// All elements under `root` matching `selector`, one `Selection` per node,
/// in document order.
#[must_use]
pub fn select_each<'a>(root: &Selection<'a>, selector: &str) -> Vec<Selection<'a>> {
    root.select(selector)
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .collect()
}

/// Document-level variant of [`select_each`].
#[must_use]
pub fn select_each_in<'a>(doc: &'a Document, selector: &str) -> Vec<Selection<'a>> {
    doc.select(selector)
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .collect()
}

// === Text Content ===

/// Visible text of an element: every descendant text node trimmed, empty
/// pieces dropped, the rest joined with a single space and whitespace runs
/// collapsed.
///
/// Adjacent inline elements (`<span>a</span><span>b</span>`) therefore come
/// out as `"a b"`, not `"ab"`.
#[must_use]
pub fn visible_text(sel: &Selection) -> String {
    let mut pieces = Vec::new();
    for node in sel.nodes() {
        collect_text(node, &mut pieces);
    }
    normalize_whitespace(&pieces.join(" "))
}

fn collect_text(node: &NodeRef, pieces: &mut Vec<String>) {
    if node.is_text() {
        let text = node.text();
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            pieces.push(trimmed.to_string());
        }
        return;
    }

    if let Some(name) = node.node_name() {
        if NON_TEXT_TAGS.iter().any(|tag| *tag == &*name) {
            return;
        }
    }

    let mut child = node.first_child();
    while let Some(c) = child {
        collect_text(&c, pieces);
        child = c.next_sibling();
    }
}

/// Collapse runs of whitespace into single spaces and trim the ends.
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_NORMALIZE.replace_all(text, " ").trim().to_string()
}
