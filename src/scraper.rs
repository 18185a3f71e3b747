//! Page Scraper
//!
//! Top-level orchestration: fetch, parse, resolve page metadata, locate
//! candidate regions, assemble records, stop at the cap.

use tracing::{debug, info, warn};

use crate::assembler::assemble_post;
use crate::dom;
use crate::error::Result;
use crate::fetch::{Fetch, HttpFetcher};
use crate::locator::locate_posts;
use crate::options::ScraperOptions;
use crate::page::PageContext;
use crate::result::PostRecord;

/// Scraper for one platform page at a time.
///
/// Each instance owns its fetcher (and with it one HTTP connection pool) for
/// its whole lifetime. Scraping several pages concurrently means building
/// several instances.
#[derive(Debug)]
pub struct PageScraper<F: Fetch = HttpFetcher> {
    fetcher: F,
    options: ScraperOptions,
}

impl PageScraper<HttpFetcher> {
    /// Build a scraper backed by a blocking HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn new(options: ScraperOptions) -> Result<Self> {
        let fetcher = HttpFetcher::new(&options)?;
        Ok(Self { fetcher, options })
    }
}

impl<F: Fetch> PageScraper<F> {
    /// Build a scraper around any page source.
    #[must_use]
    pub fn with_fetcher(fetcher: F, options: ScraperOptions) -> Self {
        Self { fetcher, options }
    }

    /// Options this scraper was built with.
    #[must_use]
    pub fn options(&self) -> &ScraperOptions {
        &self.options
    }

    /// Fetch `page_url` and return at most `max_posts` records in document
    /// order.
    ///
    /// Never fails: an unreachable page or a page without recognisable posts
    /// yields an empty vector, and the reason is logged.
    #[must_use]
    pub fn scrape(&self, page_url: &str, max_posts: usize) -> Vec<PostRecord> {
        let Some(html) = self.fetcher.fetch(page_url) else {
            warn!(page_url, "no content fetched; returning no posts");
            return Vec::new();
        };

        let posts = extract_posts_with_options(&html, page_url, max_posts, &self.options);
        info!(page_url, posts = posts.len(), "scraped page");
        posts
    }

    /// [`scrape`](Self::scrape) capped at the configured `max_posts`.
    #[must_use]
    pub fn scrape_default(&self, page_url: &str) -> Vec<PostRecord> {
        self.scrape(page_url, self.options.max_posts)
    }
}

/// Extract posts from already-fetched HTML with default options.
///
/// # Example
///
/// ```rust
/// use fb_post_scraper::extract_posts;
///
/// let html = r#"<div data-pagelet="FeedUnit_0">
///     <div dir="auto">Hello world</div>
///     <a href="/page/posts/555666777">2h</a>
/// </div>"#;
///
/// let posts = extract_posts(html, "https://www.facebook.com/page", 10);
/// assert_eq!(posts.len(), 1);
/// assert_eq!(posts[0].post_id.as_deref(), Some("555666777"));
/// ```
#[must_use]
pub fn extract_posts(html: &str, page_url: &str, max_posts: usize) -> Vec<PostRecord> {
    extract_posts_with_options(html, page_url, max_posts, &ScraperOptions::default())
}

/// Extract posts from already-fetched HTML.
///
/// Candidate regions are consumed lazily; once `max_posts` records exist the
/// remaining regions are never assembled.
#[must_use]
pub fn extract_posts_with_options(
    html: &str,
    page_url: &str,
    max_posts: usize,
    options: &ScraperOptions,
) -> Vec<PostRecord> {
    let doc = dom::parse(html);
    let ctx = PageContext::from_document(&doc, page_url, &options.platform_origin);
    debug!(
        page_url,
        page_name = ctx.page_name.as_deref().unwrap_or(""),
        page_id = ctx.page_id.as_deref().unwrap_or(""),
        "resolved page metadata"
    );

    locate_posts(&doc)
        .iter()
        .enumerate()
        .filter_map(|(index, region)| assemble_post(region, &ctx, index))
        .take(max_posts)
        .collect()
}
