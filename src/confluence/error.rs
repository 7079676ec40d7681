//! Error taxonomy for Confluence REST API operations.
//!
//! Failures are modeled as a closed set of variants so that callers at every
//! layer can distinguish authentication problems from missing pages and from
//! transport failures. Messages carry the original status and response text
//! but never credential values.

use thiserror::Error;

/// Errors returned by [`ConfluenceApi`](super::ConfluenceApi) operations.
#[derive(Debug, Error)]
pub enum ApiError {
  /// The API rejected the credentials (HTTP 401).
  #[error("authentication failed (401 Unauthorized): check your username and API token")]
  Unauthorized,

  /// The credentials are valid but lack permission (HTTP 403).
  #[error("access forbidden (403): you may not have permission to view page {page_id}")]
  Forbidden {
    /// Page the request was made for.
    page_id: String,
  },

  /// The page does not exist or is not visible (HTTP 404).
  #[error("page not found (404): page {page_id} does not exist or you do not have access to it")]
  NotFound {
    /// Page the request was made for.
    page_id: String,
  },

  /// Any other non-success HTTP status.
  #[error("Confluence API returned status {status}: {message}")]
  Unexpected {
    /// HTTP status code returned by the API.
    status: u16,
    /// Response body text, when available.
    message: String,
  },

  /// The request never produced an HTTP response (connection, timeout, TLS).
  #[error("network error: {0}")]
  Network(#[from] reqwest::Error),

  /// The response body could not be decoded as the expected JSON shape.
  #[error("failed to parse Confluence API response: {0}")]
  InvalidResponse(String),
}

impl ApiError {
  /// Map a non-success HTTP status to the matching error variant.
  ///
  /// # Arguments
  /// * `status` - HTTP status code from the response.
  /// * `page_id` - Page the request targeted, used in 403/404 messages.
  /// * `message` - Response body text for the generic variant.
  pub fn from_status(status: u16, page_id: &str, message: String) -> Self {
    match status {
      401 => Self::Unauthorized,
      403 => Self::Forbidden {
        page_id: page_id.to_string(),
      },
      404 => Self::NotFound {
        page_id: page_id.to_string(),
      },
      _ => Self::Unexpected { status, message },
    }
  }
}
