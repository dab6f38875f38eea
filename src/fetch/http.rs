// src/fetch/http.rs
// =============================================================================
// PageFetcher backed by plain HTTP requests.
//
// Key functionality:
// - GET the page, follow up to 5 redirects
// - Render the HTML to Markdown with `htmd`
// - One reqwest Client (and so one cookie jar) per session id, so two
//   concurrent crawl tasks never see each other's cookies
// - Every per-page problem becomes a PageResult::Failure, never a panic
//
// There is no JavaScript rendering: pages that build their content in the
// browser will come back mostly empty.
// =============================================================================

use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use super::{PageContent, PageFetcher, PageResult};
use crate::config::CrawlConfig;
use crate::error::FetchError;

pub struct HttpFetcher {
    timeout: Duration,
    user_agent: String,
    started: AtomicBool,
    // session id -> client with its own cookie store
    sessions: Mutex<HashMap<String, Client>>,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, user_agent: impl Into<String>) -> Self {
        Self {
            timeout,
            user_agent: user_agent.into(),
            started: AtomicBool::new(false),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_config(config: &CrawlConfig) -> Self {
        Self::new(config.timeout, config.user_agent.clone())
    }

    // Number of sessions currently open
    #[cfg(test)]
    pub fn session_count(&self) -> usize {
        self.sessions.lock().map(|s| s.len()).unwrap_or(0)
    }

    fn build_client(&self) -> Result<Client, reqwest::Error> {
        Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::limited(5))
            .cookie_store(true)
            .build()
    }

    // Returns the client for a session, creating it on first use
    fn session_client(&self, session_id: &str) -> Result<Client, String> {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|_| "session cache poisoned".to_string())?;

        if let Some(client) = sessions.get(session_id) {
            return Ok(client.clone());
        }

        let client = self.build_client().map_err(|e| e.to_string())?;
        sessions.insert(session_id.to_string(), client.clone());
        Ok(client)
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn start(&self) -> Result<(), FetchError> {
        if self.user_agent.trim().is_empty() {
            return Err(FetchError::Engine("user agent must not be empty".to_string()));
        }

        // Building one client up front surfaces bad settings (user agent,
        // TLS backend) before any page is dispatched
        self.build_client()?;
        self.started.store(true, Ordering::SeqCst);
        tracing::debug!(timeout = ?self.timeout, "http fetcher started");
        Ok(())
    }

    async fn fetch(&self, url: &str, session_id: &str) -> PageResult {
        if !self.started.load(Ordering::SeqCst) {
            return PageResult::failure("fetcher is not started");
        }

        let client = match self.session_client(session_id) {
            Ok(client) => client,
            Err(e) => return PageResult::failure(e),
        };

        match fetch_page(&client, url).await {
            Ok(content) => PageResult::Success(content),
            Err(e) => PageResult::failure(e),
        }
    }

    async fn release(&self, session_id: &str) {
        if let Ok(mut sessions) = self.sessions.lock() {
            sessions.remove(session_id);
        }
    }

    async fn close(&self) {
        self.started.store(false, Ordering::SeqCst);
        if let Ok(mut sessions) = self.sessions.lock() {
            tracing::debug!(sessions = sessions.len(), "closing http fetcher");
            sessions.clear();
        }
    }
}

// Fetches a web page and renders it
async fn fetch_page(client: &Client, url: &str) -> Result<PageContent, String> {
    let response = client.get(url).send().await.map_err(describe_error)?;

    if !response.status().is_success() {
        return Err(format!("HTTP {}", response.status()));
    }

    let html = response.text().await.map_err(describe_error)?;
    let markdown = htmd::convert(&html).map_err(|e| format!("could not render Markdown: {}", e))?;

    Ok(PageContent { markdown, html })
}

// Turns a reqwest error into a short human-readable reason
fn describe_error(error: reqwest::Error) -> String {
    if error.is_timeout() {
        "Request timed out".to_string()
    } else if error.is_redirect() {
        "Too many redirects".to_string()
    } else if error.is_connect() {
        format!("Connection failed: {}", error)
    } else {
        error.to_string()
    }
}
