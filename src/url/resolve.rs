use super::Origin;

/// Resolves a raw href against the origin of the page it was found on
///
/// # Resolution Rules
///
/// | Href | Result |
/// |------|--------|
/// | `//host/...` (protocol-relative) | discarded |
/// | `/path` (root-relative) | `origin` + `/path` |
/// | `http...` | kept as-is |
/// | anything else (`about.html`, `#top`, `mailto:`, `javascript:`) | discarded |
///
/// This is prefix matching, not RFC 3986 resolution; the href is never trimmed
/// or otherwise rewritten.
///
/// # Examples
///
/// ```
/// use ripple_sitemap::url::{resolve_href, Origin};
///
/// let origin = Origin::parse("https://example.com").unwrap();
/// assert_eq!(
///     resolve_href("/about", &origin),
///     Some("https://example.com/about".to_string())
/// );
/// assert_eq!(resolve_href("about.html", &origin), None);
/// ```
pub fn resolve_href(raw_href: &str, origin: &Origin) -> Option<String> {
    if raw_href.starts_with("//") {
        None
    } else if raw_href.starts_with('/') {
        Some(format!("{}{}", origin, raw_href))
    } else if raw_href.starts_with("http") {
        Some(raw_href.to_string())
    } else {
        None
    }
}

/// Keeps only addresses under the seed's origin
///
/// The prefix is computed once from the seed and never from a page's
/// post-redirect origin, so pages reached through an off-site redirect
/// contribute only links that point back to the seed's domain.
#[derive(Debug, Clone)]
pub struct DomainFilter {
    prefix: String,
}

impl DomainFilter {
    pub fn new(seed_origin: &Origin) -> Self {
        Self {
            prefix: seed_origin.to_string(),
        }
    }

    /// Returns true if the address starts with the seed's `scheme://host`
    pub fn keep(&self, address: &str) -> bool {
        address.starts_with(&self.prefix)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}
