//! Breadth-first traversal engine
//!
//! The traversal expands one depth level per round:
//!
//! 1. The seed forms the first frontier
//! 2. Each address in the frontier that has not been visited is marked
//!    visited, then fetched
//! 3. Links on the fetched page are resolved against the page's final
//!    origin and kept only if they fall under the seed's origin
//! 4. Kept links that are not yet visited form the next frontier
//! 5. Rounds stop after `max_depth + 1` rounds or when a frontier is empty
//!
//! `max_depth = N` therefore visits every page reachable in at most N hops
//! from the seed. Pages found on the last round are discovered but never
//! fetched, so they do not appear in the result.
//!
//! A failed fetch or link extraction is a dead end for that address only:
//! it stays visited, contributes no links, and the observer is told.

use crate::crawler::fetcher::{FetchError, FetchedPage, PageFetcher};
use crate::crawler::parser::{extract_hrefs, ExtractionError};
use crate::url::{parse_seed, scope_links, DomainFilter, Origin};
use crate::UrlError;
use std::collections::HashSet;
use std::time::{Duration, Instant};

/// Receives traversal events
///
/// All methods default to doing nothing.
pub trait TraversalObserver {
    /// A round is about to fetch `frontier_size` candidate addresses
    fn on_round_start(&mut self, _round: u32, _frontier_size: usize) {}

    /// `address` was fetched and contributed `links_kept` same-domain links
    fn on_page_fetched(&mut self, _address: &str, _page: &FetchedPage, _links_kept: usize) {}

    /// `address` could not be fetched and is treated as a dead end
    fn on_fetch_failed(&mut self, _address: &str, _error: &FetchError) {}

    /// Links could not be extracted from `address`; it contributes no links
    fn on_extraction_failed(&mut self, _address: &str, _error: &ExtractionError) {}
}

impl<T: TraversalObserver + ?Sized> TraversalObserver for &mut T {
    fn on_round_start(&mut self, round: u32, frontier_size: usize) {
        (**self).on_round_start(round, frontier_size)
    }

    fn on_page_fetched(&mut self, address: &str, page: &FetchedPage, links_kept: usize) {
        (**self).on_page_fetched(address, page, links_kept)
    }

    fn on_fetch_failed(&mut self, address: &str, error: &FetchError) {
        (**self).on_fetch_failed(address, error)
    }

    fn on_extraction_failed(&mut self, address: &str, error: &ExtractionError) {
        (**self).on_extraction_failed(address, error)
    }
}

/// Observer that reports events through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingObserver;

impl TraversalObserver for LoggingObserver {
    fn on_round_start(&mut self, round: u32, frontier_size: usize) {
        tracing::debug!("Round {}: {} URLs in frontier", round, frontier_size);
    }

    fn on_page_fetched(&mut self, address: &str, page: &FetchedPage, links_kept: usize) {
        if page.final_url.as_str() != address {
            tracing::debug!("Fetched {} (redirected to {})", address, page.final_url);
        } else {
            tracing::debug!("Fetched {}", address);
        }
        tracing::trace!("{} same-domain links on {}", links_kept, address);
    }

    fn on_fetch_failed(&mut self, address: &str, error: &FetchError) {
        tracing::warn!("Skipping {}: {}", address, error);
    }

    fn on_extraction_failed(&mut self, address: &str, error: &ExtractionError) {
        tracing::warn!("No links extracted from {}: {}", address, error);
    }
}

/// Outcome of a completed traversal
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    /// Every visited address, including ones whose fetch failed
    pub pages: HashSet<String>,

    /// Number of rounds executed
    pub rounds: u32,

    /// Number of successful fetches
    pub fetched: usize,

    /// Number of failed fetches
    pub failed: usize,

    /// Wall-clock duration of the traversal
    pub elapsed: Duration,
}

/// A single breadth-first traversal
///
/// The session owns its visited set and frontier, so independent traversals
/// can run side by side in one process.
///
/// # Example
///
/// ```no_run
/// use ripple_sitemap::config::Config;
/// use ripple_sitemap::crawler::{HttpFetcher, Traversal};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::default();
/// let fetcher = HttpFetcher::from_config(&config.user_agent, &config.fetch)?;
/// let report = Traversal::new(&fetcher, "https://example.com", 2)?.run().await;
/// println!("{} pages", report.pages.len());
/// # Ok(())
/// # }
/// ```
pub struct Traversal<'a, F, O = LoggingObserver> {
    fetcher: &'a F,
    observer: O,
    seed: String,
    filter: DomainFilter,
    max_depth: u32,
    visited: HashSet<String>,
}

impl<'a, F: PageFetcher> Traversal<'a, F> {
    /// Creates a traversal from `seed`
    ///
    /// # Returns
    ///
    /// * `Ok(Traversal)` - Ready to run
    /// * `Err(UrlError)` - The seed is not an absolute http(s) URL
    pub fn new(fetcher: &'a F, seed: &str, max_depth: u32) -> Result<Self, UrlError> {
        let seed_url = parse_seed(seed)?;
        let seed_origin = Origin::from_url(&seed_url)?;

        Ok(Self {
            fetcher,
            observer: LoggingObserver,
            seed: seed.to_string(),
            filter: DomainFilter::new(&seed_origin),
            max_depth,
            visited: HashSet::new(),
        })
    }
}

impl<'a, F: PageFetcher, O: TraversalObserver> Traversal<'a, F, O> {
    /// Replaces the observer
    pub fn with_observer<P: TraversalObserver>(self, observer: P) -> Traversal<'a, F, P> {
        Traversal {
            fetcher: self.fetcher,
            observer,
            seed: self.seed,
            filter: self.filter,
            max_depth: self.max_depth,
            visited: self.visited,
        }
    }

    /// Prefix every result address starts with
    pub fn scope(&self) -> &str {
        self.filter.prefix()
    }

    /// Runs the traversal to completion
    pub async fn run(mut self) -> CrawlReport {
        let start_time = Instant::now();
        let mut report = CrawlReport::default();

        let mut next: HashSet<String> = HashSet::from([self.seed.clone()]);

        for round in 0..=self.max_depth {
            if next.is_empty() {
                break;
            }

            let frontier = std::mem::take(&mut next);
            self.observer.on_round_start(round, frontier.len());
            report.rounds += 1;

            for address in frontier {
                // insert() is the membership check; it marks before fetching
                if !self.visited.insert(address.clone()) {
                    continue;
                }

                match self.expand(&address).await {
                    Some(links) => {
                        report.fetched += 1;
                        next.extend(
                            links
                                .into_iter()
                                .filter(|link| !self.visited.contains(link)),
                        );
                    }
                    None => report.failed += 1,
                }
            }
        }

        report.pages = self.visited;
        report.elapsed = start_time.elapsed();
        report
    }

    /// Fetches one address and returns its same-domain links
    ///
    /// Returns `None` only when the fetch itself failed. An extraction failure
    /// still counts as a fetched page with no links.
    async fn expand(&mut self, address: &str) -> Option<Vec<String>> {
        let page = match self.fetcher.fetch(address).await {
            Ok(page) => page,
            Err(e) => {
                self.observer.on_fetch_failed(address, &e);
                return None;
            }
        };

        let hrefs = match extract_hrefs(&page.body) {
            Ok(hrefs) => hrefs,
            Err(e) => {
                self.observer.on_extraction_failed(address, &e);
                Vec::new()
            }
        };

        let links: Vec<String> = scope_links(&hrefs, &page.origin, &self.filter).collect();
        self.observer.on_page_fetched(address, &page, links.len());

        Some(links)
    }
}

/// Crawls from `seed` and returns every visited address
///
/// # Arguments
///
/// * `fetcher` - Page source
/// * `seed` - Absolute http(s) address to start from
/// * `max_depth` - Maximum number of link hops from the seed
///
/// # Returns
///
/// * `Ok(HashSet<String>)` - The visited set
/// * `Err(UrlError)` - The seed is invalid; nothing was fetched
pub async fn traverse<F: PageFetcher>(
    fetcher: &F,
    seed: &str,
    max_depth: u32,
) -> Result<HashSet<String>, UrlError> {
    Ok(Traversal::new(fetcher, seed, max_depth)?.run().await.pages)
}
