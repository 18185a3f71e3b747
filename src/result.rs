//! Result types for scrape output.
//!
//! A [`PostRecord`] is the only entity the crate produces. Its serialized
//! form is the stable output schema: every record renders the same twelve
//! keys, with `null` standing in for fields the heuristics could not find.

use serde::{Deserialize, Serialize};

/// One post extracted from a feed page.
///
/// Built once per candidate region and never mutated afterwards. Records are
/// not deduplicated: two regions pointing at the same post both surface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    /// Page URL supplied by the caller.
    pub facebook_url: String,

    /// Numeric page id, resolved once per scrape.
    pub page_id: Option<String>,

    /// Numeric post id parsed from the post's own URL.
    pub post_id: Option<String>,

    /// Page display name, resolved once per scrape.
    pub page_name: Option<String>,

    /// Canonical permalink to the post.
    pub url: Option<String>,

    /// Human-readable time label as displayed on the page.
    pub time: Option<String>,

    /// Milliseconds since the Unix epoch.
    pub timestamp: Option<i64>,

    /// Like/reaction count.
    pub likes: Option<u64>,

    /// Comment/reply count.
    pub comments: Option<u64>,

    /// Share count.
    pub shares: Option<u64>,

    /// Post body text.
    pub text: Option<String>,

    /// First external link shared in the post.
    pub link: Option<String>,
}

impl PostRecord {
    /// Render the record as a JSON object with all twelve keys present.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        // A struct of strings and integers always serializes.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// Whether the record satisfies the inclusion rule (a URL or some text).
    #[must_use]
    pub fn is_substantive(&self) -> bool {
        let non_empty = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        non_empty(&self.url) || non_empty(&self.text)
    }
}
