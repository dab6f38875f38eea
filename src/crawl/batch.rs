// src/crawl/batch.rs
// =============================================================================
// Crawls of a fixed URL list (usually everything a sitemap lists).
//
// Two flavours:
// - crawl_parallel: chunks of `max_concurrent` URLs fetched together, each
//   with its own session, every success saved as Markdown
// - crawl_sequential: one URL at a time on a single reused session; prints
//   the Markdown length of each page and saves only if given a directory
//
// Neither follows links. Both start the fetcher first and close it at the end.
// =============================================================================

use futures::future::join_all;
use url::Url;

use super::{release_sessions, start_fetcher};
use super::summary::CrawlSummary;
use crate::error::{CrawlError, Result};
use crate::fetch::{PageFetcher, PageResult};
use crate::output::OutputDir;

// Session reused by every fetch of a sequential crawl
const SEQUENTIAL_SESSION: &str = "session1";

pub async fn crawl_parallel<F: PageFetcher>(
    urls: &[Url],
    fetcher: &F,
    output: &OutputDir,
    max_concurrent: usize,
) -> Result<CrawlSummary> {
    if max_concurrent == 0 {
        return Err(CrawlError::InvalidConcurrency);
    }

    start_fetcher(fetcher).await?;

    let mut summary = CrawlSummary::default();

    for (batch_index, chunk) in urls.chunks(max_concurrent).enumerate() {
        let first = batch_index * max_concurrent;
        tracing::info!(batch = batch_index + 1, size = chunk.len(), "starting batch");

        let sessions: Vec<String> = (0..chunk.len())
            .map(|i| format!("parallel_session_{}", first + i))
            .collect();
        let fetches = chunk
            .iter()
            .zip(&sessions)
            .map(|(url, session_id)| fetcher.fetch(url.as_str(), session_id));
        let results = join_all(fetches).await;
        summary.visited += chunk.len();
        release_sessions(fetcher, &sessions).await;

        for (url, result) in chunk.iter().zip(results) {
            match result {
                PageResult::Success(content) => match output.save(url, &content.markdown).await {
                    Ok(path) => {
                        println!("✅ Saved: {} -> {}", url, path.display());
                        summary.record_saved(url, path);
                    }
                    Err(e) => {
                        tracing::warn!(%url, error = %e, "could not save page");
                        println!("❌ Failed: {} - {}", url, e);
                        summary.record_failure(url, e.to_string());
                    }
                },
                PageResult::Failure { error } => {
                    tracing::warn!(%url, %error, "fetch failed");
                    println!("❌ Failed: {} - {}", url, error);
                    summary.record_failure(url, error);
                }
            }
        }
    }

    println!("\n🔒 Closing fetcher...");
    fetcher.close().await;

    Ok(summary)
}

pub async fn crawl_sequential<F: PageFetcher>(
    urls: &[Url],
    fetcher: &F,
    output: Option<&OutputDir>,
) -> Result<CrawlSummary> {
    start_fetcher(fetcher).await?;

    let mut summary = CrawlSummary::default();

    for url in urls {
        let result = fetcher.fetch(url.as_str(), SEQUENTIAL_SESSION).await;
        summary.visited += 1;

        let content = match result {
            PageResult::Success(content) => content,
            PageResult::Failure { error } => {
                tracing::warn!(%url, %error, "fetch failed");
                println!("❌ Failed: {} - {}", url, error);
                summary.record_failure(url, error);
                continue;
            }
        };

        println!("✅ Fetched: {}", url);
        println!("   Markdown length: {}", content.markdown.len());

        match output {
            Some(dir) => match dir.save(url, &content.markdown).await {
                Ok(path) => summary.record_saved(url, path),
                Err(e) => {
                    tracing::warn!(%url, error = %e, "could not save page");
                    summary.record_failure(url, e.to_string());
                }
            },
            None => summary.record_fetched(url),
        }
    }

    fetcher.close().await;

    Ok(summary)
}
