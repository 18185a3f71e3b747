//! Configuration options for page scraping.
//!
//! The `ScraperOptions` struct controls the HTTP side of a scrape (user agent,
//! timeouts, retry policy) and the default cap on returned posts.

use std::time::Duration;

/// Default cap on the number of posts returned by a scrape.
pub const DEFAULT_MAX_POSTS: usize = 50;

/// Canonical origin used to resolve relative post links.
pub const PLATFORM_ORIGIN: &str = "https://www.facebook.com";

/// Desktop browser user agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Configuration options for a [`PageScraper`](crate::PageScraper).
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use fb_post_scraper::ScraperOptions;
/// use std::time::Duration;
///
/// let options = ScraperOptions {
///     max_retries: 5,
///     retry_delay: Duration::from_millis(250),
///     ..ScraperOptions::default()
/// };
/// assert_eq!(options.max_posts, 50);
/// ```
#[derive(Debug, Clone)]
pub struct ScraperOptions {
    /// `User-Agent` header sent with every request.
    ///
    /// Default: a desktop Chrome user agent
    pub user_agent: String,

    /// Per-attempt request timeout.
    ///
    /// Default: 15 seconds
    pub request_timeout: Duration,

    /// Total number of fetch attempts before giving up.
    ///
    /// A value of `0` is treated as `1`: the page is always requested once.
    ///
    /// Default: `3`
    pub max_retries: u32,

    /// Pause between two consecutive fetch attempts.
    ///
    /// Default: 1 second
    pub retry_delay: Duration,

    /// Cap applied by [`PageScraper::scrape_default`](crate::PageScraper::scrape_default)
    /// and [`scrape_page_with_options`](crate::scrape_page_with_options).
    ///
    /// Default: `50`
    pub max_posts: usize,

    /// Origin that relative post links are resolved against.
    ///
    /// Default: `https://www.facebook.com`
    pub platform_origin: String,
}

impl Default for ScraperOptions {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: Duration::from_secs(15),
            max_retries: 3,
            retry_delay: Duration::from_secs(1),
            max_posts: DEFAULT_MAX_POSTS,
            platform_origin: PLATFORM_ORIGIN.to_string(),
        }
    }
}

impl ScraperOptions {
    /// Override the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Override the per-attempt timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Override the retry budget and the pause between attempts.
    #[must_use]
    pub fn with_retries(mut self, max_retries: u32, retry_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_delay = retry_delay;
        self
    }

    /// Override the default post cap.
    #[must_use]
    pub fn with_max_posts(mut self, max_posts: usize) -> Self {
        self.max_posts = max_posts;
        self
    }

    /// Number of attempts the fetcher will actually make.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.max_retries.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let opts = ScraperOptions::default();
        assert_eq!(opts.request_timeout, Duration::from_secs(15));
        assert_eq!(opts.max_retries, 3);
        assert_eq!(opts.retry_delay, Duration::from_secs(1));
        assert_eq!(opts.max_posts, DEFAULT_MAX_POSTS);
        assert_eq!(opts.platform_origin, PLATFORM_ORIGIN);
        assert!(opts.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn zero_retries_still_makes_one_attempt() {
        let opts = ScraperOptions::default().with_retries(0, Duration::ZERO);
        assert_eq!(opts.attempts(), 1);
    }

    #[test]
    fn builders_override_fields() {
        let opts = ScraperOptions::default()
            .with_user_agent("test-agent")
            .with_timeout(Duration::from_secs(2))
            .with_max_posts(7);
        assert_eq!(opts.user_agent, "test-agent");
        assert_eq!(opts.request_timeout, Duration::from_secs(2));
        assert_eq!(opts.max_posts, 7);
    }
}
