//! Fake Confluence API client for testing
//!
//! Returns predefined responses without making any network requests.

use std::collections::HashMap;

use async_trait::async_trait;
use confluence_export::confluence::{ApiError, ChildPage, ConfluenceApi, Page};

/// A fake Confluence client that returns predefined responses for testing
pub struct FakeConfluenceClient {
  pages: HashMap<String, Page>,
  child_pages: HashMap<String, Vec<String>>,
  failures: HashMap<String, u16>,
}

impl FakeConfluenceClient {
  /// Create a new fake client with no pages
  pub fn new() -> Self {
    Self {
      pages: HashMap::new(),
      child_pages: HashMap::new(),
      failures: HashMap::new(),
    }
  }

  /// Add a page from a JSON value shaped like an API response
  pub fn add_page_from_json(&mut self, page_id: &str, json: serde_json::Value) {
    let page: Page = serde_json::from_value(json).expect("fixture JSON should deserialize as a Page");
    self.pages.insert(page_id.to_string(), page);
  }

  /// Add child pages for a parent page, in listing order
  pub fn add_child_pages(&mut self, parent_id: &str, child_ids: Vec<&str>) {
    self
      .child_pages
      .insert(parent_id.to_string(), child_ids.into_iter().map(String::from).collect());
  }

  /// Make `get_page` for this id fail with the given HTTP status
  pub fn fail_with(&mut self, page_id: &str, status: u16) {
    self.failures.insert(page_id.to_string(), status);
  }
}

impl Default for FakeConfluenceClient {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl ConfluenceApi for FakeConfluenceClient {
  async fn get_page(&self, page_id: &str) -> Result<Page, ApiError> {
    if let Some(status) = self.failures.get(page_id) {
      return Err(ApiError::from_status(*status, page_id, String::from("simulated failure")));
    }

    self
      .pages
      .get(page_id)
      .cloned()
      .ok_or_else(|| ApiError::from_status(404, page_id, String::new()))
  }

  async fn get_child_pages(&self, page_id: &str) -> Result<Vec<ChildPage>, ApiError> {
    let child_ids = self.child_pages.get(page_id).cloned().unwrap_or_default();

    let children = child_ids
      .into_iter()
      .map(|id| {
        let title = self
          .pages
          .get(&id)
          .map(|page| page.title.clone())
          .unwrap_or_else(|| "Untitled".to_string());
        ChildPage { id, title }
      })
      .collect();

    Ok(children)
  }
}
