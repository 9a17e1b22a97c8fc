//! Configuration module for Ripple-Sitemap
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so the crawler also runs with no file at all.
//!
//! # Example
//!
//! ```no_run
//! use ripple_sitemap::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("ripple.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, FetchConfig, OutputConfig, UserAgentConfig, DEFAULT_MAX_DEPTH,
    DEFAULT_SEED_URL,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};

use crate::url::parse_seed;
use crate::{ConfigResult, SitemapError};

impl Config {
    /// Validates the configuration
    ///
    /// Call this after applying command-line overrides to a loaded config.
    pub fn validate(&self) -> ConfigResult<()> {
        validation::validate(self)
    }

    /// Validates the configuration before a crawl
    ///
    /// A bad seed is reported as [`SitemapError::SeedParse`] so callers see
    /// the same diagnostic whether the seed came from a file or the command
    /// line. Other problems surface as [`SitemapError::Config`].
    pub fn validate_for_crawl(&self) -> crate::Result<()> {
        let seed = &self.crawler.seed_url;
        parse_seed(seed).map_err(|source| SitemapError::SeedParse {
            seed: seed.clone(),
            source,
        })?;

        self.validate()?;
        Ok(())
    }
}
