//! HTTP client implementation for talking to the Confluence REST API.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;

use super::api::ConfluenceApi;
use super::error::ApiError;
use super::models::{ChildPage, ChildPagesResponse, Page};
use crate::auth::basic_auth_header;

/// Page size requested from the child-page listing endpoint.
const CHILD_PAGE_LIMIT: usize = 50;

/// Confluence API client.
#[derive(Clone)]
pub struct ConfluenceClient {
  base_url: String,
  auth_header: String,
  client: reqwest::Client,
}

impl ConfluenceClient {
  /// Create a new Confluence client.
  ///
  /// # Arguments
  /// * `base_url` - The base URL of the Confluence instance (e.g., https://example.atlassian.net/wiki)
  /// * `username` - The user's email address
  /// * `token` - The API token
  /// * `timeout_secs` - Request timeout in seconds
  ///
  /// # Errors
  /// Returns an error if the underlying `reqwest::Client` cannot be built.
  pub fn new(
    base_url: impl Into<String>,
    username: &str,
    token: &str,
    timeout_secs: u64,
  ) -> Result<Self> {
    let base_url = base_url.into().trim_end_matches('/').to_string();

    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(timeout_secs))
      .user_agent(format!(
        "confluence-export/{} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("TARGET")
      ))
      .build()
      .context("Failed to create HTTP client")?;

    Ok(Self {
      base_url,
      auth_header: basic_auth_header(username, token),
      client,
    })
  }

  /// Issue an authenticated GET and surface non-success statuses as
  /// [`ApiError`] variants.
  async fn get_json(&self, url: &str, page_id: &str) -> Result<reqwest::Response, ApiError> {
    let response = self
      .client
      .get(url)
      .header("Authorization", &self.auth_header)
      .header("Accept", "application/json")
      .send()
      .await?;

    let status = response.status();
    if !status.is_success() {
      let message = response
        .text()
        .await
        .unwrap_or_else(|_| String::from("(no error details)"));
      return Err(ApiError::from_status(status.as_u16(), page_id, message));
    }

    Ok(response)
  }
}

#[async_trait]
impl ConfluenceApi for ConfluenceClient {
  async fn get_page(&self, page_id: &str) -> Result<Page, ApiError> {
    let url = format!(
      "{}/rest/api/content/{}?expand=body.storage,title",
      self.base_url, page_id
    );

    let response = self.get_json(&url, page_id).await?;

    let page: Page = response
      .json()
      .await
      .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

    Ok(page)
  }

  async fn get_child_pages(&self, page_id: &str) -> Result<Vec<ChildPage>, ApiError> {
    let mut children = Vec::new();
    let mut start = 0usize;

    // The API caps response sizes, so keep requesting batches until a batch
    // comes back smaller than the applied limit.
    loop {
      let url = format!(
        "{}/rest/api/content/{}/child/page?limit={}&start={}",
        self.base_url, page_id, CHILD_PAGE_LIMIT, start
      );

      let response = self.get_json(&url, page_id).await?;

      let batch: ChildPagesResponse = response
        .json()
        .await
        .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

      let count = batch.results.len();
      children.extend(batch.results);

      let applied_limit = batch.limit.unwrap_or(CHILD_PAGE_LIMIT);
      if count == 0 || count < applied_limit {
        break;
      }
      start += count;
    }

    Ok(children)
  }
}
