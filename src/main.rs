//! Ripple-Sitemap main entry point
//!
//! This is the command-line interface for the Ripple-Sitemap sitemap builder.

use anyhow::Context;
use clap::Parser;
use ripple_sitemap::config::{load_config_with_hash, Config};
use ripple_sitemap::crawler::crawl;
use ripple_sitemap::output::emit_sitemap;
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Ripple-Sitemap: build a sitemap by crawling a site breadth-first
///
/// Starting from a seed URL, Ripple-Sitemap follows same-domain links up to
/// a maximum number of hops and prints a sitemaps.org XML document listing
/// every page it visited.
#[derive(Parser, Debug)]
#[command(name = "ripple-sitemap")]
#[command(version)]
#[command(about = "Build a sitemap by crawling a site breadth-first", long_about = None)]
struct Cli {
    /// Seed URL to build the sitemap for [default: https://google.com]
    #[arg(long, value_name = "ADDRESS")]
    url: Option<String>,

    /// Maximum number of links deep to traverse [default: 2]
    #[arg(long, value_name = "INT")]
    depth: Option<u32>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Write the sitemap to a file instead of standard output
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = resolve_config(&cli)?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(&config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout is reserved for the sitemap.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("ripple_sitemap=info,warn"),
            1 => EnvFilter::new("ripple_sitemap=debug,info"),
            2 => EnvFilter::new("ripple_sitemap=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file if given, then applies command-line overrides
fn resolve_config(cli: &Cli) -> ripple_sitemap::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(url) = &cli.url {
        config.crawler.seed_url = url.clone();
    }
    if let Some(depth) = cli.depth {
        config.crawler.max_depth = depth;
    }
    if let Some(output) = &cli.output {
        config.output.path = Some(output.display().to_string());
    }

    config.validate_for_crawl()?;
    Ok(config)
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== Ripple-Sitemap Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Seed URL: {}", config.crawler.seed_url);
    println!("  Max depth: {}", config.crawler.max_depth);

    println!("\nFetch:");
    println!("  User agent: {}", config.user_agent.header_value());
    println!("  Timeout: {}s", config.fetch.timeout_secs);
    println!("  Connect timeout: {}s", config.fetch.connect_timeout_secs);
    println!("  Max redirects: {}", config.fetch.max_redirects);

    println!("\nOutput:");
    match &config.output.path {
        Some(path) => println!("  Sitemap: {}", path),
        None => println!("  Sitemap: <stdout>"),
    }

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would crawl at most {} rounds from {}",
        config.crawler.max_depth as u64 + 1,
        config.crawler.seed_url
    );
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config) -> anyhow::Result<()> {
    let report = crawl(config).await?;

    let path = config.output.path.as_deref().map(Path::new);

    emit_sitemap(&report.pages, path).with_context(|| match path {
        Some(path) => format!("Failed to write sitemap to {}", path.display()),
        None => "Failed to write sitemap to standard output".to_string(),
    })?;

    Ok(())
}
