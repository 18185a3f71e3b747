//! Page fetching with retries.
//!
//! - `Fetch`: the seam the scraper depends on (`url -> Option<html>`)
//! - `HttpFetcher`: blocking `reqwest` client with a fixed retry budget
//!
//! Every failed attempt (non-200 status or transport error) is logged at
//! `warn` and followed by a fixed pause before the next attempt. Exhausting
//! the budget is logged at `error` and reported as `None`, never as an error
//! to the caller.

use std::thread::sleep;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, USER_AGENT};
use reqwest::StatusCode;
use tracing::{debug, error, warn};

use crate::encoding;
use crate::error::{Error, Result};
use crate::options::ScraperOptions;

/// Source of page HTML.
pub trait Fetch {
    /// Return the page body, or `None` when nothing could be fetched.
    fn fetch(&self, url: &str) -> Option<String>;
}

/// Blocking HTTP fetcher owning one connection pool for its lifetime.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    attempts: u32,
    retry_delay: Duration,
}

impl HttpFetcher {
    /// Build a fetcher from scraper options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClientBuild`] if the user agent is not a valid header
    /// value or the TLS backend cannot be initialised.
    pub fn new(options: &ScraperOptions) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&options.user_agent)
                .map_err(|e| Error::ClientBuild(format!("invalid user agent: {e}")))?,
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(options.request_timeout)
            .build()
            .map_err(|e| Error::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            attempts: options.attempts(),
            retry_delay: options.retry_delay,
        })
    }

    /// One GET request; anything but a 200 is an error.
    fn attempt(&self, url: &str) -> Result<String> {
        let resp = self.client.get(url).send()?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(Error::Status(status.as_u16()));
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = resp.bytes()?;

        Ok(encoding::transcode_to_utf8(&body, content_type.as_deref()))
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Option<String> {
        let mut last_error = None;

        for attempt in 1..=self.attempts {
            debug!(url, attempt, "fetching page");
            match self.attempt(url) {
                Ok(body) => return Some(body),
                Err(err) => {
                    warn!(url, attempt, error = %err, "fetch attempt failed");
                    last_error = Some(err);
                }
            }

            if attempt < self.attempts {
                sleep(self.retry_delay);
            }
        }

        if let Some(err) = last_error {
            error!(url, attempts = self.attempts, error = %err, "exhausted retries fetching page");
        }
        None
    }
}

impl<F: Fetch + ?Sized> Fetch for &F {
    fn fetch(&self, url: &str) -> Option<String> {
        (**self).fetch(url)
    }
}

impl<F: Fetch + ?Sized> Fetch for Box<F> {
    fn fetch(&self, url: &str) -> Option<String> {
        (**self).fetch(url)
    }
}
