//! Post permalink and id extraction.

use dom_query::Selection;

use crate::patterns::{LINK_SELECTOR, POST_HREF_MARKERS};
use crate::url_utils;

/// Canonical link to a post and the id parsed from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permalink {
    pub url: String,
    pub post_id: Option<String>,
}

/// Find the region's link to its own post.
///
/// Descendant hrefs containing a post marker are tried in document order;
/// the first one that resolves against `origin` wins. It is canonicalized
/// and mined for a numeric id.
#[must_use]
pub fn extract_permalink(region: &Selection, origin: &str) -> Option<Permalink> {
    let full = marker_hrefs(region)
        .iter()
        .find_map(|href| url_utils::resolve(href, origin))?;

    Some(Permalink {
        post_id: url_utils::parse_post_id(&full),
        url: url_utils::canonicalize(&full),
    })
}

fn marker_hrefs(region: &Selection) -> Vec<String> {
    region
        .select(LINK_SELECTOR)
        .nodes()
        .iter()
        .filter_map(|node| node.attr("href"))
        .filter(|href| POST_HREF_MARKERS.iter().any(|marker| href.contains(marker)))
        .map(|href| href.to_string())
        .collect()
}
