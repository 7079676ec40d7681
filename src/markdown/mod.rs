//! Markdown conversion for Confluence storage format.
//!
//! Converts the XHTML-like storage representation returned by the Confluence
//! API into Markdown. The conversion is split into focused modules:
//! - [`html_entities`] - HTML entity decoding
//! - [`tables`] - HTML table to Markdown table conversion
//! - [`elements`] - HTML element converters
//! - [`utils`] - XML parsing and namespace helpers
//!
//! # Example
//!
//! ```
//! use confluence_export::markdown::storage_to_markdown;
//!
//! let storage = r#"<h1>Title</h1><p><strong>Bold text</strong></p>"#;
//! let markdown = storage_to_markdown(storage).unwrap();
//! assert!(markdown.contains("# Title"));
//! assert!(markdown.contains("**Bold text**"));
//! ```

use std::time::Instant;

use anyhow::Result;
use roxmltree::Document;
use tracing::{debug, error, trace};

mod elements;
mod html_entities;
mod tables;
mod utils;

pub use elements::convert_node_to_markdown;

/// Convert Confluence storage format content to Markdown.
///
/// # Arguments
///
/// * `storage_content` - The storage format (XHTML) body of a page.
///
/// # Errors
///
/// Returns an error when the content cannot be parsed as XML even after
/// entity preprocessing and namespace wrapping.
pub fn storage_to_markdown(storage_content: &str) -> Result<String> {
  // roxmltree only knows XML's 5 predefined entities
  let preprocessed = html_entities::preprocess_html_entities(storage_content);

  // Declare the ac:/ri: prefixes the content uses without declaring
  let wrapped = utils::wrap_with_namespaces(&preprocessed);

  trace!(
    "Wrapped XML (first 500 chars):\n{}",
    wrapped.chars().take(500).collect::<String>()
  );

  let parse_start = Instant::now();
  let document = Document::parse(&wrapped).map_err(|e| {
    error!("XML parse error: {e}");
    anyhow::anyhow!("Failed to parse Confluence storage content: {e}")
  })?;

  debug!(
    "Parsed storage document in {duration:?} (length: {length} chars)",
    duration = parse_start.elapsed(),
    length = wrapped.len()
  );

  let markdown = convert_node_to_markdown(document.root_element());

  Ok(utils::clean_markdown(&markdown))
}
