//! Post Locator
//!
//! Partitions a feed document into candidate post regions. Selection is a
//! precision-then-recall cascade: feed-unit markers first, accessibility
//! `article` blocks as an addition, and the legacy tracking attribute only
//! when neither of those matched anything.

use std::collections::HashSet;

use dom_query::{Document, NodeId, Selection};
use tracing::debug;

use crate::dom;
use crate::patterns::{ARTICLE_ROLE_SELECTOR, FEED_UNIT_SELECTOR, LEGACY_TRACKING_SELECTOR};

/// Candidate post regions in output order: feed units in document order,
/// then article blocks not already selected, in document order.
#[must_use]
pub fn locate_posts(doc: &Document) -> Vec<Selection<'_>> {
    let mut seen: HashSet<NodeId> = HashSet::new();
    let mut candidates = Vec::new();

    let feed_units = dom::select_each_in(doc, FEED_UNIT_SELECTOR);
    let feed_unit_count = feed_units.len();
    for region in feed_units {
        push_unique(&mut candidates, &mut seen, region);
    }

    let mut article_count = 0usize;
    for region in dom::select_each_in(doc, ARTICLE_ROLE_SELECTOR) {
        if push_unique(&mut candidates, &mut seen, region) {
            article_count += 1;
        }
    }

    if candidates.is_empty() {
        debug!("no feed units or article blocks; falling back to legacy tracking attribute");
        candidates = dom::select_each_in(doc, LEGACY_TRACKING_SELECTOR);
    }

    debug!(
        feed_units = feed_unit_count,
        articles = article_count,
        total = candidates.len(),
        "located candidate post regions"
    );
    candidates
}

/// Append `region` unless the same DOM node is already a candidate.
fn push_unique<'a>(
    candidates: &mut Vec<Selection<'a>>,
    seen: &mut HashSet<NodeId>,
    region: Selection<'a>,
) -> bool {
    let Some(id) = region.nodes().first().map(|node| node.id) else {
        return false;
    };
    if !seen.insert(id) {
        return false;
    }
    candidates.push(region);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(regions: &[Selection]) -> Vec<String> {
        regions
            .iter()
            .map(|r| dom::get_attribute(r, "id").unwrap_or_default())
            .collect()
    }

    #[test]
    fn feed_units_come_before_articles() {
        let doc = dom::parse(
            r#"<body>
                <div id="a1" role="article"></div>
                <div id="f1" data-pagelet="FeedUnit_0"></div>
                <div id="f2" data-pagelet="FeedUnit_1"></div>
                <div id="a2" role="article"></div>
            </body>"#,
        );
        assert_eq!(ids(&locate_posts(&doc)), vec!["f1", "f2", "a1", "a2"]);
    }

    #[test]
    fn element_matching_both_tiers_appears_once() {
        let doc = dom::parse(
            r#"<body>
                <div id="both" data-pagelet="FeedUnit_0" role="article"></div>
                <div id="a1" role="article"></div>
            </body>"#,
        );
        assert_eq!(ids(&locate_posts(&doc)), vec!["both", "a1"]);
    }

    #[test]
    fn identical_content_is_not_deduplicated() {
        let doc = dom::parse(
            r#"<body>
                <div id="x" role="article">same</div>
                <div id="y" role="article">same</div>
            </body>"#,
        );
        assert_eq!(locate_posts(&doc).len(), 2);
    }

    #[test]
    fn nested_articles_inside_feed_unit_are_kept() {
        let doc = dom::parse(
            r#"<body>
                <div id="f1" data-pagelet="FeedUnit_0">
                    <div id="c1" role="article">comment</div>
                </div>
            </body>"#,
        );
        assert_eq!(ids(&locate_posts(&doc)), vec!["f1", "c1"]);
    }

    #[test]
    fn other_pagelets_are_ignored() {
        let doc = dom::parse(r#"<body><div data-pagelet="ProfileTimeline"></div></body>"#);
        assert!(locate_posts(&doc).is_empty());
    }

    #[test]
    fn legacy_attribute_only_used_when_nothing_else_matches() {
        let doc = dom::parse(
            r#"<body>
                <div id="l1" data-ft='{"tn":"*s"}'></div>
                <div id="l2" data-ft=""></div>
            </body>"#,
        );
        assert_eq!(ids(&locate_posts(&doc)), vec!["l1", "l2"]);

        let doc = dom::parse(
            r#"<body>
                <div id="l1" data-ft="{}"></div>
                <div id="a1" role="article"></div>
            </body>"#,
        );
        assert_eq!(ids(&locate_posts(&doc)), vec!["a1"]);
    }

    #[test]
    fn empty_document_has_no_candidates() {
        assert!(locate_posts(&dom::parse("")).is_empty());
    }
}
