//! Data transfer objects returned by the Confluence REST API.

use serde::{Deserialize, Serialize};

/// Confluence page metadata and content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
  /// Unique numeric identifier assigned by Confluence.
  pub id: String,
  /// Human-readable title displayed in the UI.
  pub title: String,
  /// Rich body content, present when the storage expansion was requested.
  pub body: Option<PageBody>,
}

impl Page {
  /// Storage-format HTML for the page body, when the API returned one.
  pub fn storage_html(&self) -> Option<&str> {
    self
      .body
      .as_ref()
      .and_then(|body| body.storage.as_ref())
      .map(|storage| storage.value.as_str())
  }
}

/// Page body content in the requested representations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageBody {
  /// Confluence storage-format XHTML representation.
  pub storage: Option<StorageFormat>,
}

/// Storage format (Confluence's internal format).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageFormat {
  /// Raw XHTML markup returned by the API.
  pub value: String,
  /// Representation name (typically `"storage"`).
  pub representation: String,
}

/// Identifier and title of a direct child page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildPage {
  /// Unique numeric identifier of the child page.
  pub id: String,
  /// Title of the child page.
  pub title: String,
}

/// One page of results from the child-page listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildPagesResponse {
  /// Child pages in API order for this batch.
  pub results: Vec<ChildPage>,
  /// Number of results in this batch.
  #[serde(default)]
  pub size: usize,
  /// Page size the server actually applied, which may be smaller than
  /// requested.
  #[serde(default)]
  pub limit: Option<usize>,
}
