//! HTTP Basic Authentication for the Confluence REST API.
//!
//! Atlassian Cloud authenticates with an email address and an API token
//! (created at <https://id.atlassian.com/manage-profile/security/api-tokens>)
//! sent as a standard Basic authorization header.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

/// Build the `Authorization` header value for Basic authentication.
///
/// # Arguments
/// * `username` - The user's email address.
/// * `token` - The API token used in place of a password.
///
/// # Returns
/// The `Basic`-scheme header value encoding `username:token`.
pub fn basic_auth_header(username: &str, token: &str) -> String {
  let credentials = format!("{username}:{token}");
  format!("Basic {}", BASE64.encode(credentials.as_bytes()))
}
