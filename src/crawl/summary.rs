// src/crawl/summary.rs
// =============================================================================
// What a crawl run reports back: saved pages, pages fetched but not saved,
// failed pages, and how many URLs were dispatched in total.
//
// Serializable so `--json` can print it as-is.
// =============================================================================

use serde::Serialize;
use std::path::PathBuf;
use url::Url;

/// A page that was fetched and written to disk
#[derive(Debug, Clone, Serialize)]
pub struct SavedPage {
    pub url: String,
    pub path: PathBuf,
}

/// A page that could not be fetched or saved
#[derive(Debug, Clone, Serialize)]
pub struct PageFailure {
    pub url: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CrawlSummary {
    pub pages_saved: usize,
    /// Pages fetched fine but deliberately not written (sequential mode
    /// without an output directory)
    pub fetched: usize,
    pub errors: usize,
    /// Dispatch attempts, successful or not
    pub visited: usize,
    pub saved: Vec<SavedPage>,
    pub failures: Vec<PageFailure>,
}

impl CrawlSummary {
    pub fn record_saved(&mut self, url: &Url, path: PathBuf) {
        self.pages_saved += 1;
        self.saved.push(SavedPage {
            url: url.to_string(),
            path,
        });
    }

    // Pages fetched in sequential mode without an output directory
    pub fn record_fetched(&mut self, url: &Url) {
        tracing::debug!(%url, "fetched without saving");
        self.fetched += 1;
    }

    pub fn record_failure(&mut self, url: &Url, error: impl Into<String>) {
        self.errors += 1;
        self.failures.push(PageFailure {
            url: url.to_string(),
            error: error.into(),
        });
    }

    pub fn is_clean(&self) -> bool {
        self.errors == 0
    }
}
