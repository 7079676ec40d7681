//! Trait definitions for interacting with Confluence.

use async_trait::async_trait;

use super::error::ApiError;
use super::models::{ChildPage, Page};

/// Trait for Confluence API operations (enables testing with fake
/// implementations).
#[async_trait]
pub trait ConfluenceApi: Send + Sync {
  /// Fetch a page by ID, including its storage-format body.
  ///
  /// # Arguments
  /// * `page_id` - Unique Confluence identifier for the page to retrieve.
  ///
  /// # Errors
  /// Returns the [`ApiError`] variant matching the HTTP failure: 401, 403,
  /// and 404 map to their named variants, everything else to `Unexpected` or
  /// `Network`.
  async fn get_page(&self, page_id: &str) -> Result<Page, ApiError>;

  /// List the direct children of a page, in API response order.
  ///
  /// Implementations must follow pagination transparently until the listing
  /// is exhausted.
  ///
  /// # Arguments
  /// * `page_id` - Identifier of the parent page whose children should be
  ///   listed.
  async fn get_child_pages(&self, page_id: &str) -> Result<Vec<ChildPage>, ApiError>;
}
