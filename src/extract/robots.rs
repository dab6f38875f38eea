// src/extract/robots.rs
// =============================================================================
// Fetches /robots.txt for the crawl origin so the operator can read it
// before a crawl starts.
//
// This is informational only: nothing in the crawler consults these rules.
// =============================================================================

use reqwest::{Client, StatusCode};
use url::Url;

// How much of robots.txt we print before cutting it off
const PREVIEW_CHARS: usize = 500;

/// What we found when asking for robots.txt
#[derive(Debug)]
pub enum RobotsStatus {
    /// robots.txt exists (2xx)
    Found { url: Url, body: String },
    /// The server answered, but not with robots.txt
    Missing { url: Url, status: StatusCode },
    /// The request itself failed
    Unreachable { url: Url, error: String },
}

// Builds the robots.txt URL for the origin of any page URL
pub fn robots_url(site_url: &Url) -> Url {
    let mut url = site_url.clone();
    url.set_path("/robots.txt");
    url.set_query(None);
    url.set_fragment(None);
    url
}

// Fetches robots.txt for the site that `site_url` belongs to
//
// Never fails: every outcome is a RobotsStatus variant
pub async fn fetch_robots(client: &Client, site_url: &Url) -> RobotsStatus {
    let url = robots_url(site_url);

    let response = match client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(e) => {
            return RobotsStatus::Unreachable {
                url,
                error: e.to_string(),
            }
        }
    };

    let status = response.status();
    if !status.is_success() {
        return RobotsStatus::Missing { url, status };
    }

    match response.text().await {
        Ok(body) => RobotsStatus::Found { url, body },
        Err(e) => RobotsStatus::Unreachable {
            url,
            error: e.to_string(),
        },
    }
}

// Returns the first 500 characters of robots.txt, with "..." if cut
pub fn preview(body: &str) -> String {
    if body.chars().count() > PREVIEW_CHARS {
        let head: String = body.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", head)
    } else {
        body.to_string()
    }
}

// Prints what we found, in the same style as the rest of the CLI output
pub fn print_robots(status: &RobotsStatus) {
    match status {
        RobotsStatus::Found { url, body } => {
            println!("🤖 robots.txt found: {}", url);
            println!("{}", preview(body));
        }
        RobotsStatus::Missing { url, status } => {
            println!("🤖 No robots.txt at {} (HTTP {})", url, status.as_u16());
        }
        RobotsStatus::Unreachable { url, error } => {
            tracing::warn!(%url, %error, "robots.txt request failed");
            println!("⚠️  Could not fetch {}: {}", url, error);
        }
    }
}
