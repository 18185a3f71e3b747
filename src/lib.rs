//! # fb-post-scraper
//!
//! Structured post extraction from public platform pages.
//!
//! A page is fetched without authentication, its feed markup is partitioned
//! into candidate post regions, and each region is mined for a permalink,
//! text, timestamp, engagement counts, and an outbound link. Every heuristic
//! degrades to "field absent" rather than an error, so a scrape always
//! returns a (possibly empty) list.
//!
//! ## Quick Start
//!
//! ```rust
//! use fb_post_scraper::extract_posts;
//!
//! let html = r#"<html><head><meta property="og:title" content="Example Page"></head>
//! <body><div data-pagelet="FeedUnit_0">
//!   <div dir="auto">Hello world</div>
//!   <a href="/page/posts/555666777">2h</a>
//! </div></body></html>"#;
//!
//! let posts = extract_posts(html, "https://www.facebook.com/page", 50);
//! assert_eq!(posts[0].text.as_deref(), Some("Hello world"));
//! assert_eq!(posts[0].page_name.as_deref(), Some("Example Page"));
//! ```
//!
//! Fetching over HTTP goes through [`scrape_page`] or a [`PageScraper`]:
//!
//! ```no_run
//! use fb_post_scraper::{PageScraper, ScraperOptions};
//!
//! let scraper = PageScraper::new(ScraperOptions::default())?;
//! for post in scraper.scrape("https://www.facebook.com/nytimes", 10) {
//!     println!("{}", post.to_json());
//! }
//! # Ok::<(), fb_post_scraper::Error>(())
//! ```
//!
//! ## Pipeline
//!
//! - **Locator**: feed-unit markers, then `role="article"` blocks, then the
//!   legacy tracking attribute when nothing else matched
//! - **Extractors**: independent per-field heuristics over one region
//! - **Assembler**: runs the extractors inside an error boundary and drops
//!   regions with neither a permalink nor text
//! - **Scraper**: fetch, resolve page name and id, assemble, cap

mod error;
mod options;
mod patterns;
mod result;

/// DOM helpers over `dom_query`.
pub mod dom;

/// Strategy cascades for field lookups.
pub mod selector;

/// Per-field extractors (permalink, text, link, engagement, time).
pub mod extractor;

/// Candidate post region discovery.
pub mod locator;

/// Page-level metadata (name, id).
pub mod page;

/// Per-region record assembly with an error boundary.
pub mod assembler;

/// Page scraping orchestration.
pub mod scraper;

/// HTTP fetching with retries.
pub mod fetch;

/// Free-form date label parsing.
pub mod date;

/// URL utilities for resolution, canonicalization, and id parsing.
pub mod url_utils;

/// Character encoding detection and transcoding.
pub mod encoding;

// Public API - re-exports
pub use error::{Error, Result};
pub use fetch::{Fetch, HttpFetcher};
pub use options::{ScraperOptions, DEFAULT_MAX_POSTS, PLATFORM_ORIGIN};
pub use result::PostRecord;
pub use scraper::{extract_posts, extract_posts_with_options, PageScraper};

use tracing::error;

/// Scrape a page with default options.
///
/// Returns at most `max_posts` records in document order. Every failure
/// (client construction, fetch exhaustion, unrecognised markup) is logged and
/// surfaces as an empty vector.
///
/// # Example
///
/// ```no_run
/// use fb_post_scraper::{scrape_page, DEFAULT_MAX_POSTS};
///
/// let posts = scrape_page("https://www.facebook.com/nytimes", DEFAULT_MAX_POSTS);
/// println!("{} posts", posts.len());
/// ```
#[must_use]
pub fn scrape_page(page_url: &str, max_posts: usize) -> Vec<PostRecord> {
    scrape_page_with_options(page_url, ScraperOptions::default().with_max_posts(max_posts))
}

/// Scrape a page with custom options, capped at `options.max_posts`.
///
/// Builds a fresh [`PageScraper`] (and HTTP client) for this one call.
///
/// # Example
///
/// ```no_run
/// use fb_post_scraper::{scrape_page_with_options, ScraperOptions};
/// use std::time::Duration;
///
/// let options = ScraperOptions::default()
///     .with_retries(5, Duration::from_secs(2))
///     .with_max_posts(10);
/// let posts = scrape_page_with_options("https://www.facebook.com/nytimes", options);
/// assert!(posts.len() <= 10);
/// ```
#[must_use]
pub fn scrape_page_with_options(page_url: &str, options: ScraperOptions) -> Vec<PostRecord> {
    match PageScraper::new(options) {
        Ok(scraper) => scraper.scrape_default(page_url),
        Err(err) => {
            error!(page_url, error = %err, "could not build HTTP client");
            Vec::new()
        }
    }
}
