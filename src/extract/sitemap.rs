// src/extract/sitemap.rs
// =============================================================================
// Reads the list of page URLs out of a sitemap.xml document.
//
// A sitemap looks like:
//   <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//     <url><loc>https://example.com/</loc></url>
//     <url><loc>https://example.com/guide</loc></url>
//   </urlset>
//
// We only need the <loc> entries, so a regex is enough; a full XML parser
// would buy us nothing here. Entries that aren't valid URLs are skipped.
// =============================================================================

use regex::Regex;
use reqwest::Client;
use url::Url;

use crate::error::{CrawlError, Result};

// Fetches a sitemap over HTTP(S) and returns the URLs it lists
//
// A non-2xx status is an error; an empty or junk document just yields
// an empty list.
pub async fn fetch_sitemap(client: &Client, sitemap_url: &Url) -> Result<Vec<Url>> {
    let response = client.get(sitemap_url.clone()).send().await?;

    if !response.status().is_success() {
        return Err(CrawlError::Sitemap(response.status()));
    }

    let body = response.text().await?;
    let urls = parse_sitemap(&body);

    tracing::info!(sitemap = %sitemap_url, count = urls.len(), "parsed sitemap");
    Ok(urls)
}

// Extracts every <loc> entry from a sitemap document
//
// Handles namespace prefixes (<ns:loc>), surrounding whitespace and
// the XML entities that show up in query strings (&amp;).
pub fn parse_sitemap(xml: &str) -> Vec<Url> {
    let pattern = match Regex::new(r"(?s)<(?:[A-Za-z0-9_]+:)?loc>\s*(.*?)\s*</(?:[A-Za-z0-9_]+:)?loc>") {
        Ok(pattern) => pattern,
        Err(_) => return Vec::new(),
    };

    pattern
        .captures_iter(xml)
        .filter_map(|cap| cap.get(1))
        .filter_map(|m| Url::parse(&unescape_xml(m.as_str())).ok())
        .collect()
}

// Undoes the five predefined XML entities
fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
