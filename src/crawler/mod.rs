//! Crawler module for page fetching and traversal
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `PageFetcher` trait
//! - HTML parsing and link extraction
//! - Breadth-first traversal bounded by depth

mod fetcher;
mod parser;
mod traversal;

pub use fetcher::{build_http_client, FetchError, FetchedPage, HttpFetcher, PageFetcher};
pub use parser::{extract_hrefs, ExtractionError};
pub use traversal::{traverse, CrawlReport, LoggingObserver, Traversal, TraversalObserver};

use crate::config::Config;
use crate::SitemapError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Validate the seed URL
/// 2. Build the HTTP client
/// 3. Traverse the site breadth-first up to the configured depth
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl completed; individual page failures are counted, not fatal
/// * `Err(SitemapError)` - The seed was invalid or the HTTP client could not be built
pub async fn crawl(config: &Config) -> crate::Result<CrawlReport> {
    let seed = &config.crawler.seed_url;

    let fetcher = HttpFetcher::from_config(&config.user_agent, &config.fetch)?;
    let traversal = Traversal::new(&fetcher, seed, config.crawler.max_depth).map_err(|e| {
        SitemapError::SeedParse {
            seed: seed.clone(),
            source: e,
        }
    })?;

    tracing::info!(
        "Crawling {} (max depth {}, scope {})",
        seed,
        config.crawler.max_depth,
        traversal.scope()
    );

    let report = traversal.run().await;

    tracing::info!(
        "Crawl completed: {} pages in {} rounds ({} fetched, {} failed) in {:?}",
        report.pages.len(),
        report.rounds,
        report.fetched,
        report.failed,
        report.elapsed
    );

    Ok(report)
}
