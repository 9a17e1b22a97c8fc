//! URL handling module for Ripple-Sitemap
//!
//! This module provides origin derivation, seed validation, href resolution
//! and same-domain filtering.

mod origin;
mod resolve;

// Re-export main functions
pub use origin::{parse_seed, Origin};
pub use resolve::{resolve_href, DomainFilter};

/// Resolves every raw href found on a page and keeps the same-domain ones
///
/// Links are resolved against `page_origin` (where the page was actually
/// served from) and filtered against the seed's `filter`.
///
/// # Examples
///
/// ```
/// use ripple_sitemap::url::{scope_links, DomainFilter, Origin};
///
/// let seed = Origin::parse("https://example.com").unwrap();
/// let filter = DomainFilter::new(&seed);
/// let hrefs = vec!["/a".to_string(), "https://other.com/".to_string(), "b".to_string()];
///
/// let kept: Vec<String> = scope_links(&hrefs, &seed, &filter).collect();
/// assert_eq!(kept, vec!["https://example.com/a".to_string()]);
/// ```
pub fn scope_links<'a>(
    hrefs: &'a [String],
    page_origin: &'a Origin,
    filter: &'a DomainFilter,
) -> impl Iterator<Item = String> + 'a {
    hrefs
        .iter()
        .filter_map(move |href| resolve_href(href, page_origin))
        .filter(move |address| filter.keep(address))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_links_keeps_document_order() {
        let origin = Origin::parse("https://example.com").unwrap();
        let filter = DomainFilter::new(&origin);
        let hrefs: Vec<String> = ["/b", "#top", "/a", "https://example.com/c", "mailto:x@y.z"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let kept: Vec<String> = scope_links(&hrefs, &origin, &filter).collect();
        assert_eq!(
            kept,
            vec![
                "https://example.com/b",
                "https://example.com/a",
                "https://example.com/c",
            ]
        );
    }

    #[test]
    fn test_scope_links_filters_against_seed_not_page() {
        let seed = Origin::parse("https://example.com").unwrap();
        let page = Origin::parse("https://mirror.net").unwrap();
        let filter = DomainFilter::new(&seed);
        let hrefs = vec!["/local".to_string(), "https://example.com/back".to_string()];

        let kept: Vec<String> = scope_links(&hrefs, &page, &filter).collect();
        assert_eq!(kept, vec!["https://example.com/back".to_string()]);
    }
}
