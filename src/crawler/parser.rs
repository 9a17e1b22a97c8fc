//! HTML parser for extracting links
//!
//! The extractor returns the literal `href` attribute of every `<a>` element
//! in document order. It does not resolve, filter, or deduplicate; that is
//! left to [`crate::url::scope_links`].

use scraper::{Html, Selector};
use std::sync::LazyLock;
use thiserror::Error;

/// Errors that can occur while extracting links
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Markup is not valid UTF-8 (first invalid byte at offset {offset})")]
    Encoding { offset: usize },
}

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("anchor selector is valid"));

/// Extracts raw hrefs from anchor elements
///
/// The markup must be UTF-8; anything else is an [`ExtractionError`] and the
/// caller decides what to do with the page. html5ever recovers from malformed
/// markup, so broken documents yield whatever anchors could be recovered
/// (often none) rather than an error.
///
/// # Example
///
/// ```
/// use ripple_sitemap::crawler::extract_hrefs;
///
/// let html = r#"<html><body><a href="/page">Link</a><a>none</a></body></html>"#;
/// assert_eq!(extract_hrefs(html).unwrap(), vec!["/page".to_string()]);
/// ```
pub fn extract_hrefs(markup: impl AsRef<[u8]>) -> Result<Vec<String>, ExtractionError> {
    let html = std::str::from_utf8(markup.as_ref()).map_err(|e| ExtractionError::Encoding {
        offset: e.valid_up_to(),
    })?;

    let document = Html::parse_document(html);

    let hrefs: Vec<String> = document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect();

    Ok(hrefs)
}
