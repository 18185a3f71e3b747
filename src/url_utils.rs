//! URL Utility Functions
//!
//! Resolution of hrefs against the platform origin, permalink
//! canonicalization and post id parsing.

use url::Url;

use crate::patterns::{PLATFORM_DOMAIN, POST_ID_PARAMS, STORY_ID_PARAM};

/// Check if a string is a valid absolute `http(s)` URL.
///
/// # Returns
/// * The parsed URL when the string is absolute and has a host
#[must_use]
pub fn parse_absolute(s: &str) -> Option<Url> {
    let s = s.trim();

    if !s.starts_with("http://") && !s.starts_with("https://") {
        return None;
    }

    Url::parse(s).ok().filter(|url| url.host().is_some())
}

/// Resolve an href against `base`, the way a browser would.
///
/// Absolute hrefs are returned as-is (parsed); relative ones are joined.
#[must_use]
pub fn resolve(href: &str, base: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    let base = Url::parse(base).ok()?;
    base.join(href).ok()
}

/// Canonical form of a post permalink.
///
/// The query string and fragment are dropped unless the query carries the
/// story-id marker, in which case the whole URL is kept: such posts share a
/// path and are only told apart by their query.
///
/// Canonicalizing an already canonical URL yields the same string.
#[must_use]
pub fn canonicalize(url: &Url) -> String {
    if url.query().is_some_and(|q| q.contains(STORY_ID_PARAM)) {
        return url.to_string();
    }

    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{}://{host}:{port}{}", url.scheme(), url.path()),
        None => format!("{}://{host}{}", url.scheme(), url.path()),
    }
}

/// Extract a numeric post id from a post URL.
///
/// Path segments are scanned from the end for the first purely numeric one
/// (`/nytimes/posts/10153102374144999`); failing that, the `story_fbid` or
/// `fbid` query parameter is used if numeric
/// (`permalink.php?story_fbid=10153102374144999&id=5281959998`).
#[must_use]
pub fn parse_post_id(url: &Url) -> Option<String> {
    let from_path = url
        .path()
        .trim_matches('/')
        .split('/')
        .rev()
        .find(|segment| is_numeric(segment));

    if let Some(id) = from_path {
        return Some(id.to_string());
    }

    POST_ID_PARAMS.iter().find_map(|key| {
        url.query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
            .filter(|v| is_numeric(v))
    })
}

/// Whether a URL points back at the platform itself.
#[must_use]
pub fn is_platform_url(url: &Url) -> bool {
    url.host_str().is_some_and(|host| {
        let host = host.trim_end_matches('.').to_ascii_lowercase();
        host == PLATFORM_DOMAIN || host.ends_with(&format!(".{PLATFORM_DOMAIN}"))
    })
}

/// Non-empty and made only of ASCII digits.
#[must_use]
pub fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://www.facebook.com";

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap_or_else(|e| panic!("bad test url {s}: {e}"))
    }

    #[test]
    fn test_parse_absolute() {
        assert!(parse_absolute("https://example.com/a").is_some());
        assert!(parse_absolute("  http://example.com  ").is_some());
        assert!(parse_absolute("/relative/path").is_none());
        assert!(parse_absolute("javascript:void(0)").is_none());
        assert!(parse_absolute("mailto:a@b.c").is_none());
        assert!(parse_absolute("").is_none());
    }

    #[test]
    fn test_resolve_root_relative_and_absolute() {
        assert_eq!(
            resolve("/page/posts/1", ORIGIN).map(String::from),
            Some("https://www.facebook.com/page/posts/1".to_string())
        );
        assert_eq!(
            resolve("https://other.org/x", ORIGIN).map(String::from),
            Some("https://other.org/x".to_string())
        );
        assert_eq!(resolve("   ", ORIGIN), None);
    }

    #[test]
    fn test_canonicalize_strips_tracking_query() {
        let u = url("https://www.facebook.com/page/posts/123?__cft__=abc&__tn__=R#x");
        assert_eq!(canonicalize(&u), "https://www.facebook.com/page/posts/123");
    }

    #[test]
    fn test_canonicalize_keeps_story_query() {
        let u = url("https://www.facebook.com/permalink.php?story_fbid=42&id=7");
        assert_eq!(canonicalize(&u), "https://www.facebook.com/permalink.php?story_fbid=42&id=7");
    }

    #[test]
    fn test_canonicalize_is_idempotent() {
        for raw in [
            "https://www.facebook.com/page/posts/123?ref=feed",
            "https://www.facebook.com/permalink.php?story_fbid=42&id=7",
            "https://www.facebook.com",
            "http://localhost:8080/photos/9?x=1",
        ] {
            let once = canonicalize(&url(raw));
            let twice = canonicalize(&url(&once));
            assert_eq!(once, twice, "not idempotent for {raw}");
        }
    }

    #[test]
    fn test_parse_post_id_from_path() {
        let u = url("https://www.facebook.com/nytimes/posts/10153102374144999");
        assert_eq!(parse_post_id(&u), Some("10153102374144999".to_string()));

        let u = url("https://www.facebook.com/123/photos/a.456/789/");
        assert_eq!(parse_post_id(&u), Some("789".to_string()));
    }

    #[test]
    fn test_parse_post_id_from_query() {
        let u = url("https://www.facebook.com/permalink.php?story_fbid=555&id=777");
        assert_eq!(parse_post_id(&u), Some("555".to_string()));

        let u = url("https://www.facebook.com/photo.php?fbid=888&set=a.1");
        assert_eq!(parse_post_id(&u), Some("888".to_string()));
    }

    #[test]
    fn test_parse_post_id_absent() {
        let u = url("https://www.facebook.com/page/posts/pfbid0abcDEF");
        assert_eq!(parse_post_id(&u), None);

        let u = url("https://www.facebook.com/permalink.php?story_fbid=pfbid02x");
        assert_eq!(parse_post_id(&u), None);
    }

    #[test]
    fn test_is_platform_url() {
        assert!(is_platform_url(&url("https://www.facebook.com/x")));
        assert!(is_platform_url(&url("https://facebook.com/x")));
        assert!(is_platform_url(&url("https://l.facebook.com/l.php?u=1")));
        assert!(!is_platform_url(&url("https://notfacebook.com/x")));
        assert!(!is_platform_url(&url("https://example.org/facebook.com")));
    }
}
