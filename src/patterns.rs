//! Compiled regex patterns and CSS selectors for post extraction.
//!
//! All patterns are compiled once at first use using `LazyLock`.
//! Patterns are organized by their purpose in the extraction pipeline.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Post Locator Selectors
// =============================================================================

/// Desktop feed units (highest-precision post boundary).
pub const FEED_UNIT_SELECTOR: &str = r#"div[data-pagelet^="FeedUnit_"]"#;

/// Accessibility-role article blocks.
pub const ARTICLE_ROLE_SELECTOR: &str = r#"div[role="article"]"#;

/// Legacy tracking attribute, only used when nothing else matches.
pub const LEGACY_TRACKING_SELECTOR: &str = "div[data-ft]";

// =============================================================================
// Field Extractor Selectors
// =============================================================================

/// Containers that usually hold the message body.
pub const DIR_AUTO_SELECTOR: &str = r#"div[dir="auto"]"#;

/// Fallback text containers.
pub const PARAGRAPH_SELECTOR: &str = "p";

/// Links with a target.
pub const LINK_SELECTOR: &str = "a[href]";

/// Elements that may carry a `data-utime` attribute.
pub const UTIME_CANDIDATE_SELECTOR: &str = "abbr, a, span";

/// HTML5 time elements with a machine-readable value.
pub const TIME_ELEMENT_SELECTOR: &str = "time[datetime]";

/// Abbreviation elements used for relative time labels.
pub const ABBR_SELECTOR: &str = "abbr";

// =============================================================================
// Page Metadata Selectors
// =============================================================================

pub const OG_TITLE_SELECTOR: &str = r#"meta[property="og:title"]"#;

pub const ANDROID_DEEP_LINK_SELECTOR: &str = r#"meta[property="al:android:url"]"#;

// =============================================================================
// Permalink Markers
// =============================================================================

/// Substrings marking an href as a link to a post.
pub const POST_HREF_MARKERS: &[&str] = &["/posts/", "/photos/", "/videos/", "story_fbid="];

/// Query parameter that uniquely addresses a story when the path does not.
pub const STORY_ID_PARAM: &str = "story_fbid";

/// Query parameters that may carry the numeric post id, in priority order.
pub const POST_ID_PARAMS: &[&str] = &["story_fbid", "fbid"];

/// Substring identifying links back to the platform itself.
pub const PLATFORM_DOMAIN: &str = "facebook.com";

// =============================================================================
// Engagement Keywords
// =============================================================================

pub const LIKE_KEYWORDS: &[&str] = &["like", "likes", "reaction"];

pub const COMMENT_KEYWORDS: &[&str] = &["comment", "comments", "reply", "replies"];

pub const SHARE_KEYWORDS: &[&str] = &["share", "shares"];

/// Number-then-keyword and keyword-then-number patterns for one keyword list,
/// kept in keyword order.
fn keyword_patterns(keywords: &[&str]) -> Vec<(Regex, Regex)> {
    keywords
        .iter()
        .map(|kw| {
            let kw = regex::escape(kw);
            let before = Regex::new(&format!(r"(?i)(\d[\d,.]*)\s+{kw}"))
                .expect("number-before-keyword regex");
            let after = Regex::new(&format!(r"(?i){kw}\s+(\d[\d,.]*)"))
                .expect("keyword-before-number regex");
            (before, after)
        })
        .collect()
}

pub static LIKE_PATTERNS: LazyLock<Vec<(Regex, Regex)>> =
    LazyLock::new(|| keyword_patterns(LIKE_KEYWORDS));

pub static COMMENT_PATTERNS: LazyLock<Vec<(Regex, Regex)>> =
    LazyLock::new(|| keyword_patterns(COMMENT_KEYWORDS));

pub static SHARE_PATTERNS: LazyLock<Vec<(Regex, Regex)>> =
    LazyLock::new(|| keyword_patterns(SHARE_KEYWORDS));

// =============================================================================
// Page Metadata Patterns
// =============================================================================

/// Page id embedded in inline script payloads: `"pageID":"12345"`.
/// The unquoted numeric form is accepted as well.
pub static SCRIPT_PAGE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""pageID"\s*:\s*"?([^",}\s]*)"#).expect("SCRIPT_PAGE_ID regex")
});

// =============================================================================
// Text Cleaning Patterns
// =============================================================================

/// Matches multiple whitespace characters for normalization.
pub static WHITESPACE_NORMALIZE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+").expect("WHITESPACE_NORMALIZE regex")
});

// =============================================================================
// Date Parsing Patterns
// =============================================================================

/// Relative age labels: `5 mins`, `2 hrs`, `3d`, `1 week ago`.
pub static RELATIVE_AGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(\d+)\s*(s|secs?|seconds?|m|mins?|minutes?|h|hrs?|hours?|d|days?|w|wks?|weeks?|y|yrs?|years?)(?:\s+ago)?$",
    )
    .expect("RELATIVE_AGE regex")
});

/// Day-relative labels: `Yesterday at 4:15 PM`, `Today at 09:00`.
pub static DAY_RELATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(today|yesterday)(?:\s+at\s+(.+))?$").expect("DAY_RELATIVE regex")
});

/// Trailing ` at 10:30 AM` clock part of feed labels.
pub static AT_CLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(.+?)\s+at\s+(\d{1,2}:\d{2}(?::\d{2})?\s*(?:[ap]\.?m\.?)?)$")
        .expect("AT_CLOCK regex")
});
