// src/crawl/frontier.rs
// =============================================================================
// Crawl state for one run: where we may go, what's waiting, what's done.
//
// - CrawlOrigin: host (+ explicit port) of the seed URL; links elsewhere are
//   ignored
// - Frontier: FIFO queue of URLs waiting to be fetched, backed by a set so
//   "already queued?" is O(1) and nothing is queued twice
// - visited: every URL ever dispatched, successful or not
//
// A URL moves from the queue to the visited set in one step (next_batch), so
// the two never overlap. Nothing here is persisted; a new run starts over
// from the seed.
// =============================================================================

use std::collections::{HashSet, VecDeque};
use url::Url;

use crate::error::{CrawlError, Result};

/// The host a crawl is confined to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlOrigin {
    host: String,
    port: Option<u16>,
}

impl CrawlOrigin {
    pub fn from_url(url: &Url) -> Result<Self> {
        let host = url
            .host_str()
            .ok_or_else(|| CrawlError::NoHost(url.to_string()))?;

        Ok(Self {
            host: host.to_ascii_lowercase(),
            port: url.port(),
        })
    }

    // Only http/https links on the same host and port are followed
    pub fn contains(&self, url: &Url) -> bool {
        (url.scheme() == "http" || url.scheme() == "https")
            && url.host_str().map(|h| h.eq_ignore_ascii_case(&self.host)) == Some(true)
            && url.port() == self.port
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}

#[derive(Debug)]
pub struct Frontier {
    queue: VecDeque<Url>,
    // Mirrors `queue` for O(1) membership checks
    queued: HashSet<Url>,
    visited: HashSet<Url>,
}

impl Frontier {
    // A frontier holding only the seed; nothing visited yet
    pub fn seeded(seed: Url) -> Self {
        let mut frontier = Self {
            queue: VecDeque::new(),
            queued: HashSet::new(),
            visited: HashSet::new(),
        };
        frontier.enqueue(seed);
        frontier
    }

    // Adds a URL at the back unless it was already visited or is queued
    //
    // Returns true if the URL was added
    pub fn enqueue(&mut self, url: Url) -> bool {
        if self.visited.contains(&url) || self.queued.contains(&url) {
            return false;
        }
        self.queued.insert(url.clone());
        self.queue.push_back(url);
        true
    }

    // Takes up to `n` URLs off the front and marks them visited
    pub fn next_batch(&mut self, n: usize) -> Vec<Url> {
        let take = n.min(self.queue.len());
        let mut batch = Vec::with_capacity(take);

        for _ in 0..take {
            if let Some(url) = self.queue.pop_front() {
                self.queued.remove(&url);
                self.visited.insert(url.clone());
                batch.push(url);
            }
        }

        batch
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn visited(&self) -> usize {
        self.visited.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
impl Frontier {
    pub fn was_visited(&self, url: &Url) -> bool {
        self.visited.contains(url)
    }

    pub fn is_queued(&self, url: &Url) -> bool {
        self.queued.contains(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_origin_matches_host() {
        let origin = CrawlOrigin::from_url(&url("https://Example.com/start")).unwrap();
        assert_eq!(origin.host(), "example.com");
        assert!(origin.contains(&url("https://example.com/a")));
        assert!(origin.contains(&url("http://EXAMPLE.com/b")));
        assert!(!origin.contains(&url("https://other.com/c")));
        assert!(!origin.contains(&url("https://sub.example.com/")));
        assert!(!origin.contains(&url("https://example.com:8443/")));
        assert!(!origin.contains(&url("ftp://example.com/file")));
    }

    #[test]
    fn test_origin_requires_host() {
        let result = CrawlOrigin::from_url(&url("file:///tmp/page.html"));
        assert!(matches!(result, Err(CrawlError::NoHost(_))));
    }

    #[test]
    fn test_seeded_frontier() {
        let frontier = Frontier::seeded(url("https://example.com/"));
        assert_eq!(frontier.pending(), 1);
        assert_eq!(frontier.visited(), 0);
    }

    #[test]
    fn test_no_duplicates_in_queue() {
        let mut frontier = Frontier::seeded(url("https://example.com/"));
        assert!(frontier.enqueue(url("https://example.com/a")));
        assert!(!frontier.enqueue(url("https://example.com/a")));
        assert!(!frontier.enqueue(url("https://example.com/")));
        assert_eq!(frontier.pending(), 2);
    }

    #[test]
    fn test_next_batch_moves_to_visited() {
        let mut frontier = Frontier::seeded(url("https://example.com/"));
        frontier.enqueue(url("https://example.com/a"));
        frontier.enqueue(url("https://example.com/b"));

        let batch = frontier.next_batch(2);
        assert_eq!(
            batch,
            vec![url("https://example.com/"), url("https://example.com/a")]
        );
        assert_eq!(frontier.pending(), 1);
        assert_eq!(frontier.visited(), 2);

        for dispatched in &batch {
            assert!(frontier.was_visited(dispatched));
            assert!(!frontier.is_queued(dispatched));
        }

        // Visited URLs are never re-queued
        assert!(!frontier.enqueue(url("https://example.com/a")));
    }

    #[test]
    fn test_next_batch_larger_than_queue() {
        let mut frontier = Frontier::seeded(url("https://example.com/"));
        let batch = frontier.next_batch(5);
        assert_eq!(batch.len(), 1);
        assert!(frontier.is_empty());
        assert!(frontier.next_batch(5).is_empty());
    }
}
