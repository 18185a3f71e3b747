//! Post body text extraction.

use std::collections::HashSet;

use dom_query::Selection;

use crate::dom;
use crate::patterns::{DIR_AUTO_SELECTOR, PARAGRAPH_SELECTOR};
use crate::selector::{self, Strategy};

/// Segment sources in priority order. Message bodies are rendered inside
/// `dir="auto"` containers; plain paragraphs are the older markup.
const SEGMENT_STRATEGIES: &[Strategy<Vec<String>>] = &[dir_auto_segments, paragraph_segments];

/// Extract the post text.
///
/// Segments from the first productive source are deduplicated (exact match,
/// first occurrence kept) and joined with single spaces.
#[must_use]
pub fn extract_text(region: &Selection) -> Option<String> {
    let segments = selector::first_match(region, SEGMENT_STRATEGIES)?;

    let mut seen = HashSet::new();
    let unique: Vec<String> = segments
        .into_iter()
        .filter(|segment| seen.insert(segment.clone()))
        .collect();

    let joined = unique.join(" ");
    let joined = joined.trim();
    (!joined.is_empty()).then(|| joined.to_string())
}

fn dir_auto_segments(region: &Selection) -> Option<Vec<String>> {
    segments_of(region, DIR_AUTO_SELECTOR)
}

fn paragraph_segments(region: &Selection) -> Option<Vec<String>> {
    segments_of(region, PARAGRAPH_SELECTOR)
}

fn segments_of(region: &Selection, css: &str) -> Option<Vec<String>> {
    let segments: Vec<String> = dom::select_each(region, css)
        .iter()
        .map(dom::visible_text)
        .filter(|text| !text.is_empty())
        .collect();

    (!segments.is_empty()).then_some(segments)
}
