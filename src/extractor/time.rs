//! Post time extraction.
//!
//! Feed items carry their publication time in up to two encodings: a
//! machine-readable attribute (`data-utime` seconds, or an HTML5 `datetime`)
//! and a human label (`title` tooltip or visible text). The label is kept
//! verbatim; the timestamp comes from the attribute when it parses, otherwise
//! from the label via [`crate::date`].

use dom_query::Selection;

use crate::date;
use crate::dom;
use crate::patterns::{ABBR_SELECTOR, TIME_ELEMENT_SELECTOR, UTIME_CANDIDATE_SELECTOR};
use crate::selector::{self, Strategy};

/// Display label and resolved timestamp of a post. Either may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostTime {
    pub label: Option<String>,
    pub timestamp: Option<i64>,
}

/// Time sources in priority order. The first element found ends the scan,
/// even when it yields nothing usable.
const TIME_STRATEGIES: &[Strategy<PostTime>] = &[utime_element, time_element, abbr_label];

/// Extract the post's time label and timestamp.
#[must_use]
pub fn extract_time(region: &Selection) -> PostTime {
    let mut found = selector::first_match(region, TIME_STRATEGIES).unwrap_or_default();

    if found.timestamp.is_none() {
        found.timestamp = found.label.as_deref().and_then(date::parse_to_epoch_millis);
    }
    found
}

/// `<abbr data-utime="1700000000" title="...">` and friends.
fn utime_element(region: &Selection) -> Option<PostTime> {
    let el = selector::query_in(region, UTIME_CANDIDATE_SELECTOR, has_utime)?;
    let utime = dom::non_empty_attribute(&el, "data-utime")?;

    Some(PostTime {
        label: label_of(&el),
        timestamp: utime
            .parse::<i64>()
            .ok()
            .and_then(|secs| secs.checked_mul(1000)),
    })
}

/// `<time datetime="2024-03-05T10:30:00Z">March 5</time>`.
fn time_element(region: &Selection) -> Option<PostTime> {
    let el = region.select(TIME_ELEMENT_SELECTOR).first();
    if !el.exists() {
        return None;
    }

    let datetime = dom::non_empty_attribute(&el, "datetime");
    let text = dom::visible_text(&el);
    let label = if text.is_empty() { datetime.clone() } else { Some(text) };

    let timestamp = datetime.as_deref().and_then(date::parse_to_epoch_millis);

    // An empty element must not end the cascade.
    (label.is_some() || timestamp.is_some()).then_some(PostTime { label, timestamp })
}

/// Bare `<abbr>` label with no machine-readable value.
fn abbr_label(region: &Selection) -> Option<PostTime> {
    let label = dom::select_each(region, ABBR_SELECTOR)
        .iter()
        .find_map(label_of)?;

    Some(PostTime {
        label: Some(label),
        timestamp: None,
    })
}

fn has_utime(sel: &Selection) -> bool {
    dom::non_empty_attribute(sel, "data-utime").is_some()
}

/// `title` attribute if present, else visible text.
fn label_of(el: &Selection) -> Option<String> {
    dom::non_empty_attribute(el, "title").or_else(|| {
        let text = dom::visible_text(el);
        (!text.is_empty()).then_some(text)
    })
}
