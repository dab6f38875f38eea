// src/fetch/scripted.rs
// =============================================================================
// In-memory PageFetcher for tests.
//
// Pages are scripted per URL. Every fetch yields once before answering, so
// fetches joined together really are in flight at the same time and the peak
// can be measured. Sessions stay open from their first fetch until they are
// released or the fetcher is closed, and the most ever open is recorded too.
// =============================================================================

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use super::{PageContent, PageFetcher, PageResult};
use crate::error::FetchError;

enum Script {
    Page(String),
    Fail(String),
}

#[derive(Default)]
pub struct ScriptedFetcher {
    pages: HashMap<String, Script>,
    // Unknown URLs get a page linking to two fresh URLs
    endless: bool,
    fail_start: bool,
    pub started: AtomicBool,
    pub closed: AtomicBool,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    calls: Mutex<Vec<(String, String)>>,
    open_sessions: Mutex<HashSet<String>>,
    peak_sessions: AtomicUsize,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    // A site where every page links to two more pages, forever
    pub fn endless() -> Self {
        Self {
            endless: true,
            ..Self::default()
        }
    }

    pub fn failing_start() -> Self {
        Self {
            fail_start: true,
            ..Self::default()
        }
    }

    pub fn page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), Script::Page(html.to_string()));
        self
    }

    pub fn fail(mut self, url: &str, error: &str) -> Self {
        self.pages.insert(url.to_string(), Script::Fail(error.to_string()));
        self
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn peak_open_sessions(&self) -> usize {
        self.peak_sessions.load(Ordering::SeqCst)
    }

    pub fn open_sessions(&self) -> usize {
        self.open_sessions.lock().map(|s| s.len()).unwrap_or(0)
    }

    // (url, session id) of every fetch, in call order
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn answer(&self, url: &str) -> PageResult {
        let html = match self.pages.get(url) {
            Some(Script::Page(html)) => html.clone(),
            Some(Script::Fail(error)) => return PageResult::failure(error.clone()),
            None if self.endless => {
                let n = self.calls().len();
                format!(
                    r#"<a href="/page-{}-a">a</a><a href="/page-{}-b">b</a>"#,
                    n, n
                )
            }
            None => return PageResult::failure("HTTP 404 Not Found"),
        };

        PageResult::Success(PageContent {
            markdown: format!("# {}", url),
            html,
        })
    }
}

#[async_trait]
impl PageFetcher for ScriptedFetcher {
    async fn start(&self) -> Result<(), FetchError> {
        if self.fail_start {
            return Err(FetchError::Engine("browser binary not found".to_string()));
        }
        self.started.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn fetch(&self, url: &str, session_id: &str) -> PageResult {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        if let Ok(mut sessions) = self.open_sessions.lock() {
            sessions.insert(session_id.to_string());
            self.peak_sessions.fetch_max(sessions.len(), Ordering::SeqCst);
        }

        tokio::task::yield_now().await;

        let result = self.answer(url);
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((url.to_string(), session_id.to_string()));
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    async fn release(&self, session_id: &str) {
        if let Ok(mut sessions) = self.open_sessions.lock() {
            sessions.remove(session_id);
        }
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        if let Ok(mut sessions) = self.open_sessions.lock() {
            sessions.clear();
        }
    }
}
