//! Post Assembler
//!
//! Runs every field extractor over one candidate region and applies the
//! inclusion rule. Each region is processed inside its own error boundary so
//! a malformed subtree costs one record, never the batch.

use std::panic::{self, AssertUnwindSafe};

use dom_query::Selection;
use tracing::warn;

use crate::error::{Error, Result};
use crate::extractor::{
    extract_engagement, extract_external_link, extract_permalink, extract_text, extract_time,
};
use crate::page::PageContext;
use crate::result::PostRecord;

/// Build a post record from a region.
///
/// Returns `None` when the region has neither a permalink nor text (it is
/// layout noise, not a post) or when extraction failed; failures are logged
/// with the region index.
#[must_use]
pub fn assemble_post(region: &Selection, ctx: &PageContext, index: usize) -> Option<PostRecord> {
    assemble_with(region, ctx, index, build_record)
}

/// Shape of a per-region record builder.
type Builder = fn(&Selection, &PageContext) -> Option<PostRecord>;

fn assemble_with(
    region: &Selection,
    ctx: &PageContext,
    index: usize,
    build: Builder,
) -> Option<PostRecord> {
    match guarded(|| build(region, ctx)) {
        Ok(record) => record,
        Err(err) => {
            warn!(region = index, page_url = %ctx.page_url, error = %err, "skipping post region");
            None
        }
    }
}

/// Error boundary: a panic inside `f` becomes [`Error::Extraction`].
fn guarded<T>(f: impl FnOnce() -> T) -> Result<T> {
    panic::catch_unwind(AssertUnwindSafe(f))
        .map_err(|payload| Error::Extraction(panic_message(payload.as_ref())))
}

fn build_record(region: &Selection, ctx: &PageContext) -> Option<PostRecord> {
    let permalink = extract_permalink(region, &ctx.origin);
    let text = extract_text(region);
    let link = extract_external_link(region, &ctx.origin);
    let engagement = extract_engagement(region);
    let time = extract_time(region);

    let (url, post_id) = match permalink {
        Some(p) => (Some(p.url), p.post_id),
        None => (None, None),
    };

    let record = PostRecord {
        facebook_url: ctx.page_url.clone(),
        page_id: ctx.page_id.clone(),
        post_id,
        page_name: ctx.page_name.clone(),
        url,
        time: time.label,
        timestamp: time.timestamp,
        likes: engagement.likes,
        comments: engagement.comments,
        shares: engagement.shares,
        text,
        link,
    };

    record.is_substantive().then_some(record)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;
    use crate::options::PLATFORM_ORIGIN;

    fn ctx() -> PageContext {
        PageContext {
            page_url: "https://www.facebook.com/examplepage".to_string(),
            page_name: Some("Example Page".to_string()),
            page_id: Some("42".to_string()),
            origin: PLATFORM_ORIGIN.to_string(),
        }
    }

    fn assemble(html: &str) -> Option<PostRecord> {
        let doc = dom::parse(html);
        assemble_post(&doc.select("div.region").first(), &ctx(), 0)
    }

    #[test]
    fn full_record_from_rich_region() {
        let record = assemble(
            r#"<div class="region">
                <abbr data-utime="1700000000" title="Tuesday, November 14, 2023 at 10:13 PM">2h</abbr>
                <div dir="auto">Read our latest story</div>
                <a href="/examplepage/posts/555666777?__tn__=R">permalink</a>
                <a href="https://news.example.org/story">external</a>
                <span>1,234 likes</span> <span>56 comments</span> <span>7 shares</span>
            </div>"#,
        )
        .unwrap_or_else(|| panic!("expected a record"));

        assert_eq!(record.facebook_url, "https://www.facebook.com/examplepage");
        assert_eq!(record.page_id.as_deref(), Some("42"));
        assert_eq!(record.page_name.as_deref(), Some("Example Page"));
        assert_eq!(record.post_id.as_deref(), Some("555666777"));
        assert_eq!(
            record.url.as_deref(),
            Some("https://www.facebook.com/examplepage/posts/555666777")
        );
        assert_eq!(record.time.as_deref(), Some("Tuesday, November 14, 2023 at 10:13 PM"));
        assert_eq!(record.timestamp, Some(1_700_000_000_000));
        assert_eq!(record.text.as_deref(), Some("Read our latest story"));
        assert_eq!(record.link.as_deref(), Some("https://news.example.org/story"));
        assert_eq!(record.likes, Some(1234));
        assert_eq!(record.comments, Some(56));
        assert_eq!(record.shares, Some(7));
    }

    #[test]
    fn text_only_region_is_kept() {
        let record = assemble(r#"<div class="region"><p>Just words</p></div>"#);
        let record = record.unwrap_or_else(|| panic!("expected a record"));
        assert_eq!(record.url, None);
        assert_eq!(record.post_id, None);
        assert_eq!(record.text.as_deref(), Some("Just words"));
    }

    #[test]
    fn url_only_region_is_kept() {
        let record = assemble(r#"<div class="region"><a href="/p/photos/99">photo</a></div>"#);
        assert_eq!(record.and_then(|r| r.post_id).as_deref(), Some("99"));
    }

    #[test]
    fn region_without_url_or_text_is_dropped() {
        let record = assemble(
            r#"<div class="region"><span>12 likes</span><abbr data-utime="1">now</abbr></div>"#,
        );
        assert_eq!(record, None);
    }

    #[test]
    fn panic_inside_boundary_becomes_extraction_error() {
        let outcome = guarded(|| -> Option<PostRecord> { panic!("malformed subtree") });

        match outcome {
            Err(Error::Extraction(msg)) => assert_eq!(msg, "malformed subtree"),
            other => panic!("expected extraction error, got {other:?}"),
        }
    }

    #[test]
    fn failing_region_is_skipped_and_neighbours_survive() {
        fn fragile(region: &Selection, ctx: &PageContext) -> Option<PostRecord> {
            if dom::visible_text(region).contains("malformed") {
                panic!("unexpected subtree shape");
            }
            build_record(region, ctx)
        }

        let doc = dom::parse(
            r#"<body>
                <div data-pagelet="FeedUnit_0"><div dir="auto">before</div></div>
                <div data-pagelet="FeedUnit_1"><div dir="auto">malformed</div></div>
                <div data-pagelet="FeedUnit_2"><div dir="auto">after</div></div>
            </body>"#,
        );
        let ctx = ctx();

        let texts: Vec<_> = crate::locator::locate_posts(&doc)
            .iter()
            .enumerate()
            .filter_map(|(index, region)| assemble_with(region, &ctx, index, fragile))
            .filter_map(|record| record.text)
            .collect();
        assert_eq!(texts, vec!["before", "after"]);
    }

    #[test]
    fn boundary_passes_values_through() {
        assert_eq!(guarded(|| 7).ok(), Some(7));
    }

    #[test]
    fn panic_message_handles_owned_strings() {
        let payload: Box<dyn std::any::Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(payload.as_ref()), "owned");

        let payload: Box<dyn std::any::Any + Send> = Box::new(17_u8);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic");
    }
}
