// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Breadth-first crawling from one seed URL (site.rs), bounded by a page
//   budget and a concurrency cap
// - Same-origin restriction (doesn't crawl external sites)
// - Parallel and sequential crawls of a fixed URL list, e.g. a sitemap
//   (batch.rs)
//
// Every crawl saves pages through output::OutputDir and reports a
// CrawlSummary.
// =============================================================================

mod batch;
mod frontier;
mod site;
mod summary;

pub use batch::{crawl_parallel, crawl_sequential};
pub use frontier::CrawlOrigin;
pub use site::SiteCrawler;
pub use summary::CrawlSummary;

use crate::error::Result;
use crate::fetch::PageFetcher;

// Starts a fetcher; if it can't start, whatever it half-acquired is
// released before the error is returned
async fn start_fetcher<F: PageFetcher>(fetcher: &F) -> Result<()> {
    if let Err(e) = fetcher.start().await {
        tracing::error!(error = %e, "fetcher failed to start");
        fetcher.close().await;
        return Err(e.into());
    }
    Ok(())
}

// Hands back the sessions of a finished batch
async fn release_sessions<F: PageFetcher>(fetcher: &F, sessions: &[String]) {
    for session_id in sessions {
        fetcher.release(session_id).await;
    }
}
