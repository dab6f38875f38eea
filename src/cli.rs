// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Subcommands:
// - site:       breadth-first crawl of one website, following links
// - sitemap:    parallel crawl of every URL listed in a sitemap
// - sequential: one-at-a-time crawl of a sitemap on a single session
// - robots:     print a site's robots.txt
//
// Shared fetch settings (timeout, user agent) live in FetchArgs and are
// flattened into every subcommand that makes requests.
// =============================================================================

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{CrawlConfig, DEFAULT_USER_AGENT};

#[derive(Parser, Debug)]
#[command(
    name = "site-scribe",
    version,
    about = "Crawl a website or its sitemap and save every page as Markdown",
    long_about = "site-scribe fetches pages from one website, renders them to Markdown and \
                  writes one file per page. Pages come either from following same-site links \
                  (site) or from a sitemap (sitemap, sequential)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl a website by following its links
    ///
    /// Example: site-scribe site https://example.com --max-pages 20 --max-concurrent 5
    Site {
        /// Website URL to start from (e.g., https://example.com)
        website_url: String,

        /// Stop after this many pages have been saved
        #[arg(long, default_value_t = 10)]
        max_pages: usize,

        /// How many pages are fetched at the same time
        #[arg(long, default_value_t = 3)]
        max_concurrent: usize,

        /// Directory the Markdown files are written to
        #[arg(long, env = "SITE_SCRIBE_OUTPUT", default_value = "crawled_data")]
        output: PathBuf,

        /// Don't print robots.txt before crawling
        #[arg(long)]
        skip_robots: bool,

        /// Output the summary in JSON format instead of a table
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        fetch: FetchArgs,
    },

    /// Crawl every URL in a sitemap, several at a time
    ///
    /// Example: site-scribe sitemap https://example.com/sitemap.xml --max-concurrent 5
    Sitemap {
        /// Sitemap URL (e.g., https://example.com/sitemap.xml)
        sitemap_url: String,

        /// How many pages are fetched at the same time
        #[arg(long, default_value_t = 3)]
        max_concurrent: usize,

        /// Directory the Markdown files are written to
        #[arg(long, env = "SITE_SCRIBE_OUTPUT", default_value = "output_docs")]
        output: PathBuf,

        /// Output the summary in JSON format instead of a table
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        fetch: FetchArgs,
    },

    /// Crawl every URL in a sitemap, one at a time on a single session
    ///
    /// Example: site-scribe sequential https://example.com/sitemap.xml
    Sequential {
        /// Sitemap URL (e.g., https://example.com/sitemap.xml)
        sitemap_url: String,

        /// Also save each page here (by default pages are only measured)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output the summary in JSON format instead of a table
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        fetch: FetchArgs,
    },

    /// Print the robots.txt of a website
    ///
    /// Example: site-scribe robots https://example.com
    Robots {
        /// Any URL on the website
        website_url: String,

        #[command(flatten)]
        fetch: FetchArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct FetchArgs {
    /// Per-page timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[arg(long, env = "SITE_SCRIBE_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

impl FetchArgs {
    // Builds a run config from the fetch flags plus the subcommand's own
    pub fn into_config(self, max_pages: usize, max_concurrent: usize, output_dir: PathBuf) -> CrawlConfig {
        CrawlConfig {
            max_pages,
            max_concurrent,
            output_dir,
            timeout: Duration::from_secs(self.timeout_secs),
            user_agent: self.user_agent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_defaults() {
        let cli = Cli::try_parse_from(["site-scribe", "site", "https://example.com"]).unwrap();
        match cli.command {
            Commands::Site {
                website_url,
                max_pages,
                max_concurrent,
                skip_robots,
                fetch,
                ..
            } => {
                assert_eq!(website_url, "https://example.com");
                assert_eq!(max_pages, 10);
                assert_eq!(max_concurrent, 3);
                assert!(!skip_robots);
                assert_eq!(fetch.timeout_secs, 30);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_sitemap_flags() {
        let cli = Cli::try_parse_from([
            "site-scribe",
            "sitemap",
            "https://example.com/sitemap.xml",
            "--max-concurrent",
            "5",
            "--output",
            "docs",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Sitemap {
                max_concurrent,
                output,
                json,
                ..
            } => {
                assert_eq!(max_concurrent, 5);
                assert_eq!(output, PathBuf::from("docs"));
                assert!(json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_robots_takes_fetch_flags() {
        let cli = Cli::try_parse_from([
            "site-scribe",
            "robots",
            "https://example.com",
            "--timeout-secs",
            "4",
            "--user-agent",
            "scribe-bot",
        ])
        .unwrap();
        match cli.command {
            Commands::Robots { fetch, .. } => {
                assert_eq!(fetch.timeout_secs, 4);
                assert_eq!(fetch.user_agent, "scribe-bot");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_into_config() {
        let args = FetchArgs {
            timeout_secs: 7,
            user_agent: "bot".to_string(),
        };
        let config = args.into_config(4, 2, PathBuf::from("out"));
        assert_eq!(config.timeout, Duration::from_secs(7));
        assert_eq!(config.max_pages, 4);
        assert_eq!(config.user_agent, "bot");
    }
}
