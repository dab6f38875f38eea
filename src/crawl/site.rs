// src/crawl/site.rs
// =============================================================================
// This module implements the breadth-first site crawl.
//
// How it works:
// 1. Start with the seed URL in the frontier
// 2. Take a batch of up to min(max_concurrent, pages still allowed, queued)
//    URLs off the front and mark them visited
// 3. Fetch the whole batch concurrently and wait for every fetch to finish
// 4. For each success: save the Markdown, then queue the new same-origin
//    links it contains
// 5. Repeat until the frontier is empty or max_pages pages are saved
//
// The batch join is the only concurrency. The frontier is only touched
// between batches, from this one task, so it needs no lock.
//
// Failures (fetch or write) are counted and logged; the run keeps going.
// Only a fetcher that can't start ends the run early.
//
// Rust concepts:
// - Generics: SiteCrawler<F> works with any F: PageFetcher
// - join_all: runs a Vec of futures concurrently on the current task
// - Iterator::zip: pairs each URL with its session id and then its result
// - &mut self: the crawler owns the frontier, so only one run at a time
// =============================================================================

use futures::future::join_all;
use url::Url;

use super::frontier::{CrawlOrigin, Frontier};
use super::summary::CrawlSummary;
use super::{release_sessions, start_fetcher};
use crate::error::{CrawlError, Result};
use crate::extract::same_origin_links;
use crate::fetch::{PageFetcher, PageResult};
use crate::output::OutputDir;

pub struct SiteCrawler<F> {
    origin: CrawlOrigin,
    frontier: Frontier,
    fetcher: F,
    output: OutputDir,
    // Total dispatches so far; also numbers the session ids
    dispatched: usize,
}

impl<F: PageFetcher> SiteCrawler<F> {
    pub fn new(mut seed: Url, fetcher: F, output: OutputDir) -> Result<Self> {
        // Discovered links lose their fragment, so the seed must too or
        // `/#top` and `/` would be fetched as two pages
        seed.set_fragment(None);
        let origin = CrawlOrigin::from_url(&seed)?;

        Ok(Self {
            origin,
            frontier: Frontier::seeded(seed),
            fetcher,
            output,
            dispatched: 0,
        })
    }

    pub fn origin(&self) -> &CrawlOrigin {
        &self.origin
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    #[cfg(test)]
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    // Crawls until the frontier runs dry or `max_pages` pages are saved
    //
    // The fetcher is started first and closed afterwards, whatever happens
    pub async fn run(&mut self, max_pages: usize, max_concurrent: usize) -> Result<CrawlSummary> {
        if max_concurrent == 0 {
            return Err(CrawlError::InvalidConcurrency);
        }

        start_fetcher(&self.fetcher).await?;

        let summary = self.crawl(max_pages, max_concurrent).await;

        println!("\n🔒 Closing fetcher...");
        self.fetcher.close().await;

        Ok(summary)
    }

    async fn crawl(&mut self, max_pages: usize, max_concurrent: usize) -> CrawlSummary {
        let mut summary = CrawlSummary::default();

        while !self.frontier.is_empty() && summary.pages_saved < max_pages {
            let remaining = max_pages - summary.pages_saved;
            let batch = self.frontier.next_batch(max_concurrent.min(remaining));

            tracing::info!(
                batch = batch.len(),
                pending = self.frontier.pending(),
                "dispatching batch"
            );

            let sessions: Vec<String> = (0..batch.len())
                .map(|i| format!("session_{}", self.dispatched + i))
                .collect();
            let fetcher = &self.fetcher;
            let fetches = batch
                .iter()
                .zip(&sessions)
                .map(|(url, session_id)| fetcher.fetch(url.as_str(), session_id));

            let results = join_all(fetches).await;
            self.dispatched += batch.len();
            release_sessions(&self.fetcher, &sessions).await;

            for (url, result) in batch.into_iter().zip(results) {
                self.handle_result(url, result, &mut summary).await;
            }

            println!("📄 Pages saved: {}/{}", summary.pages_saved, max_pages);
        }

        summary.visited = self.frontier.visited();
        summary
    }

    // Saves a successful page and queues its links; records anything else
    async fn handle_result(&mut self, url: Url, result: PageResult, summary: &mut CrawlSummary) {
        let content = match result {
            PageResult::Success(content) => content,
            PageResult::Failure { error } => {
                tracing::warn!(%url, %error, "fetch failed");
                println!("❌ Failed: {} - {}", url, error);
                summary.record_failure(&url, error);
                return;
            }
        };

        let path = match self.output.save(&url, &content.markdown).await {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!(%url, error = %e, "could not save page");
                println!("❌ Failed: {} - {}", url, e);
                summary.record_failure(&url, e.to_string());
                return;
            }
        };

        println!("✅ Saved: {} -> {}", url, path.display());
        summary.record_saved(&url, path);

        let mut added = 0;
        for link in same_origin_links(&content.html, &url, &self.origin) {
            if self.frontier.enqueue(link) {
                added += 1;
            }
        }
        tracing::debug!(%url, added, "queued new links");
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why join_all instead of tokio::spawn?
//    - Spawned tasks must be 'static, so they couldn't borrow the fetcher
//    - join_all polls every future from this task; the fetches still overlap
//      while they wait on the network
//
// 2. What does `let fetcher = &self.fetcher;` do before the map?
//    - The closure only needs the fetcher, not all of self
//    - Borrowing the field alone keeps the closure from capturing `self`
//
// 3. Why are results handled after the join and not as they arrive?
//    - handle_result needs &mut self to touch the frontier
//    - While the futures are alive, self is still borrowed by them
//
// 4. Why release sessions after every batch?
//    - Each session can hold a client, cookies and open connections
//    - Releasing them keeps at most max_concurrent sessions alive at once
// -----------------------------------------------------------------------------
