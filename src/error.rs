// src/error.rs
// =============================================================================
// Error types shared by the crawler, the fetch collaborator and the output
// directory.
//
// Only a few of these ever end a run:
// - Startup: the fetch engine could not start
// - OutputDir: the output directory could not be created
// - InvalidUrl / NoHost / InvalidConcurrency: bad input before anything runs
//
// Everything that goes wrong for a single page (fetch failure, write failure)
// is recorded in the crawl summary instead and the run keeps going.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a crawl run or a helper call
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("URL has no host: {0}")]
    NoHost(String),

    #[error("max_concurrent must be at least 1")]
    InvalidConcurrency,

    #[error("Fetch engine failed to start: {0}")]
    Startup(#[from] FetchError),

    #[error("Could not create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not write {path}: {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Sitemap request failed: HTTP {0}")]
    Sitemap(reqwest::StatusCode),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Errors raised by a fetch collaborator outside of a single page fetch
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("could not build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("{0}")]
    Engine(String),
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Parses a URL, keeping the offending input in the error
pub fn parse_url(input: &str) -> Result<url::Url> {
    url::Url::parse(input).map_err(|source| CrawlError::InvalidUrl {
        url: input.to_string(),
        source,
    })
}
