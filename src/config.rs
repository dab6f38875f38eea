// src/config.rs
// =============================================================================
// Run settings shared by every crawl mode.
//
// The CLI fills these in (see cli.rs); tests build them by hand. Nothing here
// is global: the config is passed explicitly to whatever needs it.
// =============================================================================

use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{CrawlError, Result};

pub const DEFAULT_USER_AGENT: &str = concat!("site-scribe/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Ceiling on successfully saved pages (frontier crawl only)
    pub max_pages: usize,
    /// Fetches in flight at once, and the batch size
    pub max_concurrent: usize,
    /// Where Markdown files are written
    pub output_dir: PathBuf,
    /// Per-fetch timeout, enforced by the fetcher
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_pages: 10,
            max_concurrent: 3,
            output_dir: PathBuf::from("crawled_data"),
            timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl CrawlConfig {
    // Rejects settings no crawl can run with
    pub fn validate(self) -> Result<Self> {
        if self.max_concurrent == 0 {
            return Err(CrawlError::InvalidConcurrency);
        }
        Ok(self)
    }

    // Client for the one-off requests around a crawl (sitemap, robots.txt),
    // with the same timeout and user agent the page fetches use
    pub fn http_client(&self) -> Result<Client> {
        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.as_str())
            .build()?;
        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = CrawlConfig::default().validate().unwrap();
        assert_eq!(config.max_pages, 10);
        assert_eq!(config.max_concurrent, 3);
        assert!(config.user_agent.starts_with("site-scribe/"));
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let config = CrawlConfig {
            max_concurrent: 0,
            ..CrawlConfig::default()
        };
        assert!(matches!(config.validate(), Err(CrawlError::InvalidConcurrency)));
    }

    #[tokio::test]
    async fn test_http_client_sends_configured_user_agent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/robots.txt")
            .match_header("user-agent", "scribe-bot/1.0")
            .with_status(200)
            .with_body("User-agent: *")
            .create_async()
            .await;

        let config = CrawlConfig {
            user_agent: "scribe-bot/1.0".to_string(),
            ..CrawlConfig::default()
        };
        let client = config.http_client().unwrap();
        let site = url::Url::parse(&server.url()).unwrap();

        let status = crate::extract::fetch_robots(&client, &site).await;

        assert!(matches!(status, crate::extract::RobotsStatus::Found { .. }));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_http_client_times_out() {
        let config = CrawlConfig {
            timeout: Duration::from_millis(200),
            ..CrawlConfig::default()
        };
        let client = config.http_client().unwrap();
        // Accepts the connection but never answers
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let site = url::Url::parse(&format!("http://{}/", listener.local_addr().unwrap())).unwrap();

        let started = std::time::Instant::now();
        let status = crate::extract::fetch_robots(&client, &site).await;

        assert!(matches!(status, crate::extract::RobotsStatus::Unreachable { .. }));
        assert!(started.elapsed() < Duration::from_secs(5));
        drop(listener);
    }

    #[test]
    fn test_http_client_rejects_bad_user_agent() {
        let config = CrawlConfig {
            user_agent: "bad\nagent".to_string(),
            ..CrawlConfig::default()
        };
        assert!(config.http_client().is_err());
    }
}
