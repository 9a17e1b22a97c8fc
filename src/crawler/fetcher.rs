//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings
//! - GET requests to fetch page content, following redirects
//! - Error classification
//!
//! The traversal engine only depends on the [`PageFetcher`] trait, so tests
//! and embedders can substitute their own page source.

use crate::config::{FetchConfig, UserAgentConfig};
use crate::url::Origin;
use reqwest::{redirect::Policy, Client};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors that can occur while fetching a single page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Too many redirects from {url}")]
    RedirectLimit { url: String },

    #[error("Connection failed for {url}: {message}")]
    Connect { url: String, message: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("{url} resolved to {final_url}, which has no host")]
    InvalidFinalUrl { url: String, final_url: String },

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },
}

impl FetchError {
    /// The address whose fetch failed
    pub fn url(&self) -> &str {
        match self {
            Self::Timeout { url }
            | Self::RedirectLimit { url }
            | Self::Connect { url, .. }
            | Self::Status { url, .. }
            | Self::InvalidFinalUrl { url, .. }
            | Self::Http { url, .. } => url,
        }
    }
}

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: Url,

    /// Origin of the final URL, used to resolve root-relative links
    pub origin: Origin,

    /// Raw page body
    pub body: Vec<u8>,
}

impl FetchedPage {
    /// Builds a page from its post-redirect URL and body
    ///
    /// Returns `None` when the final URL has no host to derive an origin from.
    pub fn new(final_url: Url, body: impl Into<Vec<u8>>) -> Option<Self> {
        let origin = Origin::from_url(&final_url).ok()?;
        Some(Self {
            final_url,
            origin,
            body: body.into(),
        })
    }
}

/// Source of page bodies for the traversal engine
pub trait PageFetcher {
    /// Retrieves `address`, following redirects
    ///
    /// Fails when the request cannot be completed or the final response has a
    /// non-success status.
    fn fetch(&self, address: &str) -> impl Future<Output = Result<FetchedPage, FetchError>>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `fetch` - Timeouts and redirect limits
///
/// # Example
///
/// ```no_run
/// use ripple_sitemap::config::{FetchConfig, UserAgentConfig};
/// use ripple_sitemap::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &FetchConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    fetch: &FetchConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(fetch.timeout_secs))
        .connect_timeout(Duration::from_secs(fetch.connect_timeout_secs))
        .redirect(Policy::limited(fetch.max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`PageFetcher`] backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds the client from configuration
    pub fn from_config(
        user_agent: &UserAgentConfig,
        fetch: &FetchConfig,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(user_agent, fetch)?))
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, address: &str) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(address)
            .send()
            .await
            .map_err(|e| classify_error(address, e))?;

        let status = response.status();
        let final_url = response.url().clone();

        if !status.is_success() {
            return Err(FetchError::Status {
                url: address.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| classify_error(address, e))?;

        page_from_response(address, final_url, body.to_vec())
    }
}

/// Pairs a response body with the origin of its final URL
fn page_from_response(
    address: &str,
    final_url: Url,
    body: Vec<u8>,
) -> Result<FetchedPage, FetchError> {
    let origin = Origin::from_url(&final_url).map_err(|_| FetchError::InvalidFinalUrl {
        url: address.to_string(),
        final_url: final_url.to_string(),
    })?;

    Ok(FetchedPage {
        final_url,
        origin,
        body,
    })
}

/// Maps a reqwest error onto the fetch error taxonomy
fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    let url = url.to_string();

    if error.is_timeout() {
        FetchError::Timeout { url }
    } else if error.is_redirect() {
        FetchError::RedirectLimit { url }
    } else if error.is_connect() {
        FetchError::Connect {
            url,
            message: error.to_string(),
        }
    } else {
        FetchError::Http { url, source: error }
    }
}
