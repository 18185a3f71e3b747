//! Page-level metadata.
//!
//! The page name and numeric page id are resolved once per document and
//! copied into every post record.

use dom_query::Document;

use crate::dom;
use crate::patterns::{ANDROID_DEEP_LINK_SELECTOR, OG_TITLE_SELECTOR, SCRIPT_PAGE_ID};
use crate::url_utils::is_numeric;

/// Identity of the scraped page plus the settings every post needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContext {
    /// URL the caller asked for.
    pub page_url: String,
    pub page_name: Option<String>,
    pub page_id: Option<String>,
    /// Origin that relative post links resolve against.
    pub origin: String,
}

impl PageContext {
    /// Resolve page metadata from a parsed document.
    #[must_use]
    pub fn from_document(doc: &Document, page_url: &str, origin: &str) -> Self {
        Self {
            page_url: page_url.to_string(),
            page_name: extract_page_name(doc),
            page_id: extract_page_id(doc),
            origin: origin.to_string(),
        }
    }
}

/// `og:title` meta content, else the `<title>` text.
#[must_use]
pub fn extract_page_name(doc: &Document) -> Option<String> {
    let og = doc.select(OG_TITLE_SELECTOR).first();
    if let Some(name) = dom::non_empty_attribute(&og, "content") {
        return Some(name);
    }

    let title = dom::visible_text(&doc.select("title").first());
    (!title.is_empty()).then_some(title)
}

/// Numeric page id from the Android deep link (`fb://page/5281959998`), else
/// from an inline script payload (`"pageID":"5281959998"`).
#[must_use]
pub fn extract_page_id(doc: &Document) -> Option<String> {
    id_from_deep_link(doc).or_else(|| id_from_scripts(doc))
}

fn id_from_deep_link(doc: &Document) -> Option<String> {
    let meta = doc.select(ANDROID_DEEP_LINK_SELECTOR).first();
    let content = dom::get_attribute(&meta, "content")?;
    content
        .rsplit('/')
        .find(|part| is_numeric(part))
        .map(str::to_string)
}

fn id_from_scripts(doc: &Document) -> Option<String> {
    doc.select("script").nodes().iter().find_map(|node| {
        let source = node.text();
        let caps = SCRIPT_PAGE_ID.captures(&source)?;
        let candidate = caps.get(1)?.as_str();
        is_numeric(candidate).then(|| candidate.to_string())
    })
}
