//! Export orchestration.
//!
//! Fetches pages through a [`ConfluenceApi`] implementation, converts them to
//! Markdown, and writes the results to disk (or stdout for a single page).
//! Recursive exports mirror the page hierarchy as nested directories.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::color::ColorScheme;
use crate::confluence::{ConfluenceApi, Page};
use crate::markdown::storage_to_markdown;

/// Default bound on recursion depth for `--with-children` exports.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Default output directory for recursive exports.
pub const DEFAULT_EXPORT_DIR: &str = "confluence-export";

/// How and where to export.
#[derive(Debug, Clone)]
pub struct ExportOptions {
  /// Output file (single-page mode) or directory (recursive mode). `None`
  /// means stdout for a single page and [`DEFAULT_EXPORT_DIR`] otherwise.
  pub output: Option<PathBuf>,
  /// Export the page's descendants as well.
  pub with_children: bool,
  /// Maximum recursion depth when `with_children` is set.
  pub max_depth: usize,
}

/// Outcome of an export run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExportSummary {
  /// Pages successfully written.
  pub exported: usize,
  /// Subtrees skipped because their root page failed to fetch or convert.
  pub skipped: usize,
}

/// Export a page, and optionally its descendants, per `options`.
///
/// A failure on the root page is fatal and surfaces as an error. Failures on
/// descendant pages skip that subtree, are logged with the page id and title,
/// and are counted in the returned summary.
pub async fn export_page(
  client: &dyn ConfluenceApi,
  page_id: &str,
  options: &ExportOptions,
  colors: &ColorScheme,
) -> Result<ExportSummary> {
  let mut summary = ExportSummary::default();

  if options.with_children {
    let output_root = options
      .output
      .clone()
      .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_DIR));

    export_tree(
      client,
      page_id,
      &output_root,
      0,
      options.max_depth,
      colors,
      &mut summary,
    )
    .await?;

    return Ok(summary);
  }

  let page = client.get_page(page_id).await?;
  let markdown = render_page(&page)?;

  match &options.output {
    Some(path) => {
      if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
      {
        fs::create_dir_all(parent)
          .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
      }
      fs::write(path, markdown).with_context(|| format!("Failed to write markdown to {}", path.display()))?;
      println!("{} {}", colors.success("✓"), colors.path(path.display()));
    }
    None => {
      print!("{markdown}");
    }
  }

  summary.exported = 1;
  Ok(summary)
}

/// Convert a fetched page to its final Markdown document.
///
/// The page title becomes a leading `#` heading so the exported file stands
/// alone.
fn render_page(page: &Page) -> Result<String> {
  let storage = page
    .storage_html()
    .ok_or_else(|| anyhow::anyhow!("Page '{}' (id {}) has no storage content", page.title, page.id))?;

  let markdown = storage_to_markdown(storage)
    .with_context(|| format!("Failed to convert page '{}' to Markdown", page.title))?;

  Ok(format!("# {}\n\n{}", page.title, markdown))
}

/// Export a page and recurse into its children, mirroring the hierarchy as
/// directories.
///
/// Errors propagate to the caller; the parent's child loop decides whether a
/// failure is fatal (root) or a skipped subtree (everything else).
fn export_tree<'a>(
  client: &'a dyn ConfluenceApi,
  page_id: &'a str,
  output_dir: &'a Path,
  depth: usize,
  max_depth: usize,
  colors: &'a ColorScheme,
  summary: &'a mut ExportSummary,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<()>> + 'a + Send>> {
  Box::pin(async move {
    let page = client.get_page(page_id).await?;
    let markdown = render_page(&page)?;

    fs::create_dir_all(output_dir)
      .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;

    let filename = sanitize_filename(&page.title);
    let output_path = output_dir.join(format!("{filename}.md"));

    fs::write(&output_path, markdown)
      .with_context(|| format!("Failed to write markdown to {}", output_path.display()))?;

    summary.exported += 1;
    info!(page_id = %page.id, title = %page.title, depth, "exported page");
    println!("  {} {}", colors.success("✓"), colors.path(output_path.display()));

    // max_depth bounds recursion depth, not page count
    if depth >= max_depth {
      return Ok(());
    }

    let children = client.get_child_pages(page_id).await?;
    if children.is_empty() {
      return Ok(());
    }

    let child_dir = output_dir.join(&filename);
    fs::create_dir_all(&child_dir)
      .with_context(|| format!("Failed to create directory for child pages at {}", child_dir.display()))?;

    for child in &children {
      if let Err(e) = export_tree(client, &child.id, &child_dir, depth + 1, max_depth, colors, summary).await {
        warn!(page_id = %child.id, title = %child.title, "skipping subtree: {e:#}");
        eprintln!(
          "  {} {}",
          colors.warning("⚠"),
          colors.warning(format!("Skipping '{}' (id {}): {e:#}", child.title, child.id))
        );
        summary.skipped += 1;
      }
    }

    Ok(())
  })
}

/// Turn a page title into a safe filename.
///
/// Replaces characters that are invalid on common filesystems with `_`,
/// trims leading and trailing dots and spaces, and caps the length at 200
/// characters.
pub fn sanitize_filename(title: &str) -> String {
  let sanitized: String = title
    .chars()
    .map(|c| match c {
      '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
      c => c,
    })
    .collect();

  let sanitized = sanitized.trim_matches(['.', ' ']);
  sanitized.chars().take(200).collect()
}
