//! Engagement count extraction (likes, comments, shares).
//!
//! The markup around reaction counters changes constantly, so counts are
//! read from the region's flattened text: a number next to a keyword, in
//! either order.

use dom_query::Selection;
use regex::Regex;

use crate::dom;
use crate::patterns::{COMMENT_PATTERNS, LIKE_PATTERNS, SHARE_PATTERNS};

/// Engagement counters of one post. Each one is independent and absent
/// (not zero) when no pattern matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Engagement {
    pub likes: Option<u64>,
    pub comments: Option<u64>,
    pub shares: Option<u64>,
}

/// Extract all three counters from a region.
#[must_use]
pub fn extract_engagement(region: &Selection) -> Engagement {
    let text = dom::visible_text(region);
    engagement_from_text(&text)
}

/// Extract all three counters from already-flattened text.
#[must_use]
pub fn engagement_from_text(text: &str) -> Engagement {
    if text.is_empty() {
        return Engagement::default();
    }

    Engagement {
        likes: find_count(text, &LIKE_PATTERNS),
        comments: find_count(text, &COMMENT_PATTERNS),
        shares: find_count(text, &SHARE_PATTERNS),
    }
}

/// First keyword/pattern combination that yields a parsable number.
fn find_count(text: &str, patterns: &[(Regex, Regex)]) -> Option<u64> {
    patterns
        .iter()
        .flat_map(|(before, after)| [before, after])
        .find_map(|pattern| {
            let raw = pattern.captures(text)?.get(1)?.as_str();
            parse_count(raw)
        })
}

/// `"1,234"` → 1234, `"2.7"` → 2. Tokens with more than one decimal point
/// do not parse.
fn parse_count(raw: &str) -> Option<u64> {
    let value: f64 = raw.replace(',', "").parse().ok()?;
    (value.is_finite() && !value.is_sign_negative()).then(|| value.trunc() as u64)
}
