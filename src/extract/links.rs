// src/extract/links.rs
// =============================================================================
// This module extracts links from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever, which never rejects malformed HTML
//
// We also use the `url` crate to:
// - Resolve relative URLs against the page they appear on
// - Drop #fragments so "/a" and "/a#intro" are the same page
//
// Broken HTML is never an error here: the parser recovers what it can and
// we return whatever links it found (possibly none).
//
// Rust concepts:
// - Option<T>: resolve_link returns None for links we skip
// - The ? operator on Option: `base.join(href).ok()?` bails out with None
// - Iterator adapters: into_iter().filter().collect() builds a new Vec
// =============================================================================

use scraper::{Html, Selector};
use url::Url;

use crate::crawl::CrawlOrigin;

// Extracts every followable link from HTML content
//
// Parameters:
//   html: the HTML content to parse
//   page_url: the URL of the page (for resolving relative links)
//
// Returns: absolute http/https URLs in document order, fragments removed
//
// Example:
//   html = "<a href='/docs#top'>Docs</a>"
//   page_url = "https://example.com/guide/"
//   result = ["https://example.com/docs"]
pub fn extract_links(html: &str, page_url: &Url) -> Vec<Url> {
    let mut links = Vec::new();

    let selector = match Selector::parse("a[href]") {
        Ok(selector) => selector,
        Err(_) => return links,
    };

    let document = Html::parse_document(html);

    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            if let Some(url) = resolve_link(page_url, href) {
                links.push(url);
            }
        }
    }

    links
}

// Same as extract_links, but keeps only links on the crawl origin
pub fn same_origin_links(html: &str, page_url: &Url, origin: &CrawlOrigin) -> Vec<Url> {
    extract_links(html, page_url)
        .into_iter()
        .filter(|link| origin.contains(link))
        .collect()
}

// Resolves a link (possibly relative) to an absolute URL
//
// Returns None for anchors, special protocols, unparseable hrefs and
// anything that isn't http/https after resolution
fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();

    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("javascript:")
    {
        return None;
    }

    let mut url = base.join(href).ok()?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }

    url.set_fragment(None);
    Some(url)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does Url::join do?
//    - Resolves `href` the way a browser would, relative to the page URL
//    - "docs" on /guide/intro/ becomes /guide/intro/docs
//    - "../about" on /guide/intro/ becomes /guide/about
//
// 2. Why `.ok()?` after join?
//    - join returns a Result; .ok() turns it into an Option
//    - ? then returns None from resolve_link if parsing failed
//
// 3. Why check the scheme after joining, not before?
//    - A relative href has no scheme of its own; it inherits the page's
//    - Only after joining do we know whether it is http/https
//
// 4. Why does Selector::parse return a Result for a fixed string?
//    - The selector could come from anywhere, so parsing is fallible
//    - We return no links instead of panicking if it ever fails
// -----------------------------------------------------------------------------
