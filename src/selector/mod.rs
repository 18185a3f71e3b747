//! Strategy Infrastructure
//!
//! Every extraction step is an ordered list of independent strategies that
//! share one shape: look at a region, return a value or nothing. The first
//! strategy that returns something wins. Supporting a new markup variant
//! means appending a strategy, not rewriting the step.

use dom_query::Selection;

/// A predicate over a single element.
pub type Rule = fn(&Selection) -> bool;

/// One heuristic for deriving a value of type `T` from a region.
pub type Strategy<T> = fn(&Selection) -> Option<T>;

/// Run `strategies` in order against `region` and return the first value
/// produced.
///
/// # Example
///
/// ```rust
/// use fb_post_scraper::selector::{self, Strategy};
/// use fb_post_scraper::dom;
///
/// fn heading(sel: &dom::Selection) -> Option<String> {
///     let h = sel.select("h1");
///     h.exists().then(|| dom::visible_text(&h))
/// }
///
/// fn paragraph(sel: &dom::Selection) -> Option<String> {
///     let p = sel.select("p");
///     p.exists().then(|| dom::visible_text(&p))
/// }
///
/// let doc = dom::parse("<div><p>body</p></div>");
/// let strategies: &[Strategy<String>] = &[heading, paragraph];
/// let found = selector::first_match(&doc.select("div"), strategies);
/// assert_eq!(found.as_deref(), Some("body"));
/// ```
#[must_use]
pub fn first_match<T>(region: &Selection, strategies: &[Strategy<T>]) -> Option<T> {
    strategies.iter().find_map(|strategy| strategy(region))
}

/// Query for the first element matching both a CSS selector and the rule.
#[must_use]
pub fn query_in<'a>(root: &Selection<'a>, css: &str, rule: Rule) -> Option<Selection<'a>> {
    for node in root.select(css).nodes() {
        let sel = Selection::from(*node);
        if rule(&sel) {
            return Some(sel);
        }
    }
    None
}
