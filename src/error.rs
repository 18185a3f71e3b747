//! Error types for fb-post-scraper.
//!
//! These errors only travel between internal layers. The public scrape
//! surface converts every one of them into an empty result plus a log line.

/// Error type for fetch and extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport-level failure (connection, TLS, timeout, body read).
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The server answered with something other than 200.
    #[error("Non-200 response: {0}")]
    Status(u16),

    /// The HTTP client could not be constructed.
    #[error("HTTP client construction failed: {0}")]
    ClientBuild(String),

    /// A URL could not be parsed or resolved.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Extraction of a single post region failed unexpectedly.
    #[error("Extraction failed: {0}")]
    Extraction(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

/// Result type alias for fallible internal operations.
pub type Result<T> = std::result::Result<T, Error>;
