// src/fetch/mod.rs
// =============================================================================
// The fetch collaborator: the thing that actually retrieves and renders a
// page. The crawler only talks to it through the PageFetcher trait, so the
// HTTP implementation can be swapped for a scripted one in tests (or for a
// headless browser later).
//
// Lifecycle: start() once before the first fetch, close() once after the
// last one. The crawlers guarantee close() runs on every exit path.
// =============================================================================

mod http;
#[cfg(test)]
pub mod scripted;

use async_trait::async_trait;

use crate::error::FetchError;

pub use http::HttpFetcher;

/// Rendered content of a successfully fetched page
#[derive(Debug, Clone)]
pub struct PageContent {
    /// Markdown rendering of the page (what gets saved)
    pub markdown: String,
    /// Raw HTML (what links are extracted from)
    pub html: String,
}

/// Outcome of one fetch attempt
#[derive(Debug, Clone)]
pub enum PageResult {
    Success(PageContent),
    Failure { error: String },
}

impl PageResult {
    pub fn failure(error: impl Into<String>) -> Self {
        PageResult::Failure {
            error: error.into(),
        }
    }
}

/// Retrieves pages on behalf of the crawlers
///
/// `session_id` names the collaborator-side session a fetch belongs to.
/// Concurrent fetches always get distinct ids. Crawlers release a session
/// once its fetch is done, so open sessions stay bounded by the batch size.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn start(&self) -> Result<(), FetchError>;

    async fn fetch(&self, url: &str, session_id: &str) -> PageResult;

    /// Drops whatever the collaborator holds for `session_id`
    async fn release(&self, session_id: &str);

    async fn close(&self);
}
