use crate::{UrlError, UrlResult};
use std::fmt;
use url::Url;

/// Scheme and host of an address
///
/// The host keeps an explicit non-default port, so `http://127.0.0.1:8080/a`
/// has the origin `http://127.0.0.1:8080`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Origin {
    scheme: String,
    host: String,
}

impl Origin {
    /// Derives the origin of a parsed URL
    ///
    /// # Returns
    ///
    /// * `Ok(Origin)` - The scheme and host of the URL
    /// * `Err(UrlError::MissingDomain)` - The URL has no host (e.g. `mailto:`)
    pub fn from_url(url: &Url) -> UrlResult<Self> {
        let host = url.host_str().ok_or(UrlError::MissingDomain)?;
        let host = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };

        Ok(Self {
            scheme: url.scheme().to_string(),
            host,
        })
    }

    /// Parses an address and returns its origin
    pub fn parse(address: &str) -> UrlResult<Self> {
        let url = Url::parse(address).map_err(|e| UrlError::Parse(e.to_string()))?;
        Self::from_url(&url)
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)
    }
}

/// Validates a seed address before any traversal begins
///
/// The seed must be an absolute `http` or `https` URL with a host. The parsed
/// form is returned for origin computation; the caller keeps the original
/// string as the seed's address, since no canonicalization is applied to
/// addresses.
///
/// # Examples
///
/// ```
/// use ripple_sitemap::url::parse_seed;
///
/// assert!(parse_seed("https://example.com").is_ok());
/// assert!(parse_seed("example.com").is_err());
/// assert!(parse_seed("ftp://example.com").is_err());
/// ```
pub fn parse_seed(seed: &str) -> UrlResult<Url> {
    let url = Url::parse(seed).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingDomain);
    }

    Ok(url)
}
