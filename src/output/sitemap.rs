//! Sitemap XML serializer
//!
//! Produces a `urlset` document per the sitemaps.org 0.9 schema:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/</loc>
//!   </url>
//! </urlset>
//! ```

use crate::output::{OutputError, OutputResult};
use quick_xml::se::Serializer;
use serde::Serialize;
use std::collections::HashSet;
use std::io::Write;

/// Namespace of the sitemap protocol
pub const SITEMAP_XMLNS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Declaration line preceding the document
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

#[derive(Debug, Serialize)]
#[serde(rename = "urlset")]
struct UrlSet<'a> {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,

    #[serde(rename = "url")]
    urls: Vec<UrlEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct UrlEntry<'a> {
    loc: &'a str,
}

/// Renders addresses as a sitemap document
///
/// Entries are sorted so that the same visited set always renders the same
/// bytes. Text content is XML-escaped.
///
/// # Example
///
/// ```
/// use std::collections::HashSet;
/// use ripple_sitemap::output::render_sitemap;
///
/// let pages: HashSet<String> = ["https://example.com/".to_string()].into();
/// let xml = render_sitemap(&pages).unwrap();
/// assert!(xml.contains("<loc>https://example.com/</loc>"));
/// ```
pub fn render_sitemap(addresses: &HashSet<String>) -> OutputResult<String> {
    let mut sorted: Vec<&str> = addresses.iter().map(String::as_str).collect();
    sorted.sort_unstable();

    let urlset = UrlSet {
        xmlns: SITEMAP_XMLNS,
        urls: sorted.into_iter().map(|loc| UrlEntry { loc }).collect(),
    };

    let mut document = String::new();
    document.push_str(XML_DECLARATION);
    document.push('\n');

    let mut serializer = Serializer::new(&mut document);
    serializer.indent(' ', 2);
    urlset
        .serialize(serializer)
        .map_err(|e| OutputError::Format(e.to_string()))?;

    document.push('\n');
    Ok(document)
}

/// Renders addresses and writes the document to `writer`
///
/// # Returns
///
/// * `Ok(())` - Document written and flushed
/// * `Err(OutputError)` - Rendering or writing failed (e.g. a closed pipe)
pub fn write_sitemap<W: Write>(addresses: &HashSet<String>, mut writer: W) -> OutputResult<()> {
    let document = render_sitemap(addresses)?;
    writer.write_all(document.as_bytes())?;
    writer.flush()?;
    Ok(())
}
