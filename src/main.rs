// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (tracing, to stderr, filtered by RUST_LOG)
// 2. Parse command-line arguments using clap
// 3. Dispatch to the appropriate subcommand handler
// 4. Print the crawl summary
// 5. Exit with proper code (0 = every page saved, 1 = some pages failed,
//    2 = the run itself failed)
// =============================================================================

mod cli;
mod config;
mod crawl;
mod error;
mod extract;
mod fetch;
mod output;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands, FetchArgs};
use config::CrawlConfig;
use crawl::{CrawlSummary, SiteCrawler};
use error::parse_url;
use fetch::HttpFetcher;
use output::OutputDir;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,site_scribe=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Site {
            website_url,
            max_pages,
            max_concurrent,
            output,
            skip_robots,
            json,
            fetch,
        } => {
            let config = fetch.into_config(max_pages, max_concurrent, output).validate()?;
            handle_site_crawl(&website_url, config, skip_robots, json).await
        }
        Commands::Sitemap {
            sitemap_url,
            max_concurrent,
            output,
            json,
            fetch,
        } => {
            let config = fetch.into_config(0, max_concurrent, output).validate()?;
            handle_sitemap_crawl(&sitemap_url, config, json).await
        }
        Commands::Sequential {
            sitemap_url,
            output,
            json,
            fetch,
        } => handle_sequential_crawl(&sitemap_url, fetch, output, json).await,
        Commands::Robots { website_url, fetch } => {
            let url = parse_url(&website_url)?;
            let config = fetch.into_config(0, 1, PathBuf::new());
            let client = config.http_client()?;
            let status = extract::fetch_robots(&client, &url).await;
            extract::print_robots(&status);
            Ok(0)
        }
    }
}

// Handles the 'site' subcommand
async fn handle_site_crawl(
    website_url: &str,
    config: CrawlConfig,
    skip_robots: bool,
    json: bool,
) -> Result<i32> {
    let seed = parse_url(website_url)?;

    if !skip_robots {
        let status = extract::fetch_robots(&config.http_client()?, &seed).await;
        extract::print_robots(&status);
    }

    let output = OutputDir::create(&config.output_dir).await?;
    let fetcher = HttpFetcher::from_config(&config);
    let mut crawler = SiteCrawler::new(seed, fetcher, output.clone())?;

    println!("🔍 Crawling website: {}", website_url);
    println!("🌐 Staying on: {}", crawler.origin().host());
    println!(
        "📊 Max pages: {}, max concurrent: {}",
        config.max_pages, config.max_concurrent
    );

    let summary = crawler
        .run(config.max_pages, config.max_concurrent)
        .await
        .context("site crawl aborted")?;

    println!(
        "\n🏁 Done! {} page(s) saved to {} ({} still queued)",
        summary.pages_saved,
        output.path().display(),
        crawler.frontier().pending()
    );

    finish(&summary, json)
}

// Handles the 'sitemap' subcommand
async fn handle_sitemap_crawl(sitemap_url: &str, config: CrawlConfig, json: bool) -> Result<i32> {
    let urls = sitemap_urls(sitemap_url, &config).await?;
    if urls.is_empty() {
        println!("⚠️  No URLs found in sitemap");
        return Ok(0);
    }

    println!("📄 Found {} URL(s) to crawl", urls.len());

    let output = OutputDir::create(&config.output_dir).await?;
    let fetcher = HttpFetcher::from_config(&config);
    let summary = crawl::crawl_parallel(&urls, &fetcher, &output, config.max_concurrent)
        .await
        .context("sitemap crawl aborted")?;

    finish(&summary, json)
}

// Handles the 'sequential' subcommand
async fn handle_sequential_crawl(
    sitemap_url: &str,
    fetch: FetchArgs,
    output: Option<PathBuf>,
    json: bool,
) -> Result<i32> {
    let config = fetch.into_config(0, 1, output.clone().unwrap_or_default());
    let urls = sitemap_urls(sitemap_url, &config).await?;
    if urls.is_empty() {
        println!("⚠️  No URLs found in sitemap");
        return Ok(0);
    }

    println!("📄 Found {} URL(s) to crawl", urls.len());

    let output = match output {
        Some(path) => Some(OutputDir::create(path).await?),
        None => None,
    };
    let fetcher = HttpFetcher::from_config(&config);
    let summary = crawl::crawl_sequential(&urls, &fetcher, output.as_ref())
        .await
        .context("sequential crawl aborted")?;

    finish(&summary, json)
}

// Downloads and parses a sitemap with the configured user agent
async fn sitemap_urls(sitemap_url: &str, config: &CrawlConfig) -> Result<Vec<url::Url>> {
    let url = parse_url(sitemap_url)?;
    let client = config.http_client()?;

    let urls = extract::fetch_sitemap(&client, &url)
        .await
        .with_context(|| format!("could not read sitemap {}", sitemap_url))?;
    Ok(urls)
}

// Prints the summary and turns it into an exit code
fn finish(summary: &CrawlSummary, json: bool) -> Result<i32> {
    report::print_summary(summary, json)?;

    if summary.is_clean() {
        Ok(0)
    } else {
        Ok(1)
    }
}
