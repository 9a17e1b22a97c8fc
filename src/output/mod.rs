//! Output module for rendering crawl results
//!
//! This module handles:
//! - Rendering the visited set as a sitemap document
//! - Writing the document to standard output or a file

mod sitemap;

pub use sitemap::{render_sitemap, write_sitemap, SITEMAP_XMLNS, XML_DECLARATION};

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to format output: {0}")]
    Format(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Writes the sitemap for `addresses` to `path`, or to standard output
///
/// Creating the file fails with [`crate::SitemapError::Io`]; rendering or
/// writing the document fails with [`crate::SitemapError::Output`].
pub fn emit_sitemap(addresses: &HashSet<String>, path: Option<&Path>) -> crate::Result<()> {
    match path {
        Some(path) => {
            let file = File::create(path)?;
            write_sitemap(addresses, BufWriter::new(file))?;
            tracing::info!("Sitemap written to: {}", path.display());
        }
        None => write_sitemap(addresses, io::stdout().lock())?,
    }

    Ok(())
}
