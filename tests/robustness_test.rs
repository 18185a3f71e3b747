//! Malformed, empty, and adversarial input must never panic and must never
//! produce records without a permalink or text.

use fb_post_scraper::{extract_posts, PostRecord};

const PAGE_URL: &str = "https://www.facebook.com/examplepage";

fn assert_invariants(posts: &[PostRecord], cap: usize) {
    assert!(posts.len() <= cap, "{} records exceed cap {cap}", posts.len());
    for post in posts {
        let has_url = post.url.as_deref().is_some_and(|u| !u.is_empty());
        let has_text = post.text.as_deref().is_some_and(|t| !t.is_empty());
        assert!(has_url || has_text, "record without url or text: {post:?}");
        assert_eq!(post.facebook_url, PAGE_URL);
    }
}

#[test]
fn empty_input() {
    assert!(extract_posts("", PAGE_URL, 50).is_empty());
}

#[test]
fn whitespace_only_input() {
    assert!(extract_posts("   \n\t  ", PAGE_URL, 50).is_empty());
}

#[test]
fn document_without_candidates() {
    let html = r#"
        <html>
          <head><title>Log in or sign up to view</title></head>
          <body><form><input name="email"></form></body>
        </html>
    "#;
    assert!(extract_posts(html, PAGE_URL, 50).is_empty());
}

#[test]
fn candidates_that_are_all_noise() {
    let html = r#"
        <body>
          <div data-pagelet="FeedUnit_0"></div>
          <div data-pagelet="FeedUnit_1"><span>12 likes</span></div>
          <div role="article"><img src="x.png"></div>
          <div role="article"><div dir="auto">   </div></div>
        </body>
    "#;
    assert!(extract_posts(html, PAGE_URL, 50).is_empty());
}

#[test]
fn malformed_attributes() {
    let html = r#"
        <body>
          <div data-pagelet="FeedUnit_0">
            <abbr data-utime="not-a-number" title="">?</abbr>
            <abbr data-utime="99999999999999999999">overflow</abbr>
            <time datetime="garbage">later</time>
            <a href="http://[::1">broken</a>
            <a href="https://">empty host</a>
            <a href="/posts/">no id</a>
            <a href="">empty</a>
            <div dir="auto">still a post</div>
          </div>
        </body>
    "#;

    let posts = extract_posts(html, PAGE_URL, 50);
    assert_invariants(&posts, 50);
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].text.as_deref(), Some("still a post"));
    assert_eq!(posts[0].link, None);
    assert_eq!(posts[0].timestamp, None);
}

#[test]
fn huge_engagement_numbers_do_not_panic() {
    let html = r#"
        <div role="article">
          <p>viral</p>
          <span>999999999999999999999999999999 likes</span>
          <span>1.2.3 comments</span>
        </div>
    "#;

    let posts = extract_posts(html, PAGE_URL, 50);
    assert_invariants(&posts, 50);
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].comments, None);
}

#[test]
fn unclosed_and_misnested_tags() {
    let html = r#"
        <div data-pagelet="FeedUnit_0"><div dir="auto">first <b>bold <i>mixed</b> text</i>
        <div data-pagelet="FeedUnit_1"><p>second
        <div role="article"><a href="/p/posts/3">
    "#;

    let posts = extract_posts(html, PAGE_URL, 50);
    assert_invariants(&posts, 50);
    assert!(!posts.is_empty());
}

#[test]
fn legacy_markup_is_used_only_as_fallback() {
    let html = r#"
        <body>
          <div data-ft='{"top_level_post_id":"1"}'><p>legacy one</p></div>
          <div data-ft='{"top_level_post_id":"2"}'><p>legacy two</p></div>
        </body>
    "#;

    let posts = extract_posts(html, PAGE_URL, 50);
    assert_invariants(&posts, 50);
    let texts: Vec<_> = posts.iter().filter_map(|p| p.text.as_deref()).collect();
    assert_eq!(texts, vec!["legacy one", "legacy two"]);
}

#[test]
fn scripts_and_styles_do_not_leak_into_text() {
    let html = r#"
        <div role="article">
          <div dir="auto">visible<script>var hidden = 1;</script><style>.x{}</style></div>
        </div>
    "#;

    let posts = extract_posts(html, PAGE_URL, 50);
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].text.as_deref(), Some("visible"));
}

#[test]
fn invariants_hold_across_caps() {
    let mut html = String::from("<body>");
    for i in 0..25 {
        if i % 3 == 0 {
            html.push_str(r#"<div role="article"><span>5 likes</span></div>"#);
        } else {
            html.push_str(&format!(r#"<div role="article"><p>post {i}</p></div>"#));
        }
    }
    html.push_str("</body>");

    for cap in [0, 1, 5, 16, 100] {
        let posts = extract_posts(&html, PAGE_URL, cap);
        assert_invariants(&posts, cap);
        assert_eq!(posts.len(), cap.min(16));
    }
}
