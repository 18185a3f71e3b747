//! External link extraction.

use dom_query::Selection;

use crate::patterns::{LINK_SELECTOR, PLATFORM_DOMAIN};
use crate::url_utils;

/// First link in the region that leaves the platform.
///
/// Links are visited in document order. Hrefs mentioning the platform domain
/// are skipped outright. Hrefs starting with `/` are resolved against
/// `origin`: protocol-relative ones (`//host/path`) pick up its scheme and
/// may leave the platform, root-relative ones land on the platform and never
/// qualify. Anything else that is not an absolute `http(s)` URL (fragments,
/// `javascript:`, `mailto:`) is ignored.
#[must_use]
pub fn extract_external_link(region: &Selection, origin: &str) -> Option<String> {
    region.select(LINK_SELECTOR).nodes().iter().find_map(|node| {
        let href = node.attr("href")?;
        let href = href.trim();
        if href.contains(PLATFORM_DOMAIN) {
            return None;
        }

        let candidate = if href.starts_with('/') {
            url_utils::resolve(href, origin)?
        } else {
            url_utils::parse_absolute(href)?
        };

        if url_utils::is_platform_url(&candidate) {
            return None;
        }
        Some(candidate.to_string())
    })
}
