//! Configuration management for the Confluence exporter.
//!
//! Credentials are resolved from three layers: CLI flags override values from
//! a dotenv-style env file, which in turn overrides the process environment.
//! All three required values are validated before any API call is made, and
//! the resulting [`Config`] is immutable for the rest of the run.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

/// Environment variable holding the Confluence username (email address).
pub const USERNAME_VAR: &str = "CONFLUENCE_USERNAME";
/// Environment variable holding the Confluence API token.
pub const API_TOKEN_VAR: &str = "CONFLUENCE_API_TOKEN";
/// Environment variable holding the Confluence base URL.
pub const BASE_URL_VAR: &str = "CONFLUENCE_BASE_URL";

/// Default env file consulted when `--env-file` is not passed.
const DEFAULT_ENV_FILE: &str = ".env";

/// Errors raised while loading or validating configuration.
///
/// Messages never include credential values, only the names of the fields and
/// the sources that can provide them.
#[derive(Debug, Error)]
pub enum ConfigError {
  /// A required credential field is absent or empty in every source.
  #[error("{field} is required. Set {var} in the env file or environment, or pass {flag}")]
  MissingField {
    /// Human-readable name of the missing field.
    field: &'static str,
    /// Environment variable that can supply the value.
    var: &'static str,
    /// CLI flag that can supply the value.
    flag: &'static str,
  },

  /// The base URL does not use an HTTP scheme.
  #[error("base URL must start with http:// or https://, got: {0}")]
  InvalidBaseUrl(String),

  /// An explicitly requested env file could not be read.
  #[error("could not read env file {}: {source}", path.display())]
  EnvFileUnreadable {
    /// Path that was passed via `--env-file`.
    path: PathBuf,
    /// Underlying I/O failure.
    #[source]
    source: std::io::Error,
  },
}

/// Validated Confluence credentials and instance location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
  /// The user's email address.
  pub username: String,
  /// The API token used in place of a password.
  pub api_token: String,
  /// Base URL of the Confluence instance, without a trailing slash.
  pub base_url: String,
}

/// Credential values supplied directly on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
  /// Value of `-u/--username`, if given.
  pub username: Option<String>,
  /// Value of `-t/--token`, if given.
  pub api_token: Option<String>,
  /// Value of `-b/--base-url`, if given.
  pub base_url: Option<String>,
}

impl Config {
  /// Load configuration from the env file, process environment, and CLI
  /// overrides.
  ///
  /// When `env_file` is `None` the default `.env` in the current directory is
  /// consulted if it exists; an explicitly passed path must be readable.
  ///
  /// # Errors
  /// Returns a [`ConfigError`] naming the first missing field, or describing
  /// an invalid base URL or unreadable env file.
  pub fn load(env_file: Option<&Path>, overrides: &Overrides) -> Result<Self, ConfigError> {
    let file_vars = match env_file {
      Some(path) => {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::EnvFileUnreadable {
          path: path.to_path_buf(),
          source,
        })?;
        parse_env_file(&content)
      }
      None => match std::fs::read_to_string(DEFAULT_ENV_FILE) {
        Ok(content) => parse_env_file(&content),
        Err(_) => HashMap::new(),
      },
    };

    let env_vars: HashMap<String, String> = std::env::vars().collect();
    Self::from_sources(&file_vars, &env_vars, overrides)
  }

  /// Resolve and validate configuration from pre-collected sources.
  ///
  /// Precedence per field: CLI override, then env file, then process
  /// environment.
  fn from_sources(
    file_vars: &HashMap<String, String>,
    env_vars: &HashMap<String, String>,
    overrides: &Overrides,
  ) -> Result<Self, ConfigError> {
    let lookup = |var: &str, cli: &Option<String>| -> Option<String> {
      cli
        .clone()
        .or_else(|| file_vars.get(var).cloned())
        .or_else(|| env_vars.get(var).cloned())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
    };

    let username = lookup(USERNAME_VAR, &overrides.username).ok_or(ConfigError::MissingField {
      field: "username",
      var: USERNAME_VAR,
      flag: "-u/--username",
    })?;

    let api_token = lookup(API_TOKEN_VAR, &overrides.api_token).ok_or(ConfigError::MissingField {
      field: "API token",
      var: API_TOKEN_VAR,
      flag: "-t/--token",
    })?;

    let base_url = lookup(BASE_URL_VAR, &overrides.base_url).ok_or(ConfigError::MissingField {
      field: "base URL",
      var: BASE_URL_VAR,
      flag: "-b/--base-url",
    })?;

    let base_url = base_url.trim_end_matches('/').to_string();
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
      return Err(ConfigError::InvalidBaseUrl(base_url));
    }

    // Confluence Cloud expects an email address as the login
    if !username.contains('@') {
      warn!("username '{username}' does not look like an email address; Confluence Cloud expects one");
    }

    Ok(Self {
      username,
      api_token,
      base_url,
    })
  }
}

/// Parse a dotenv-style file into a key/value map.
///
/// Supports `KEY=value` lines with `#` comments and blank lines. Values may
/// be wrapped in single or double quotes, which are stripped. Malformed lines
/// are logged and skipped rather than failing the whole load.
fn parse_env_file(content: &str) -> HashMap<String, String> {
  let mut vars = HashMap::new();

  for (index, raw_line) in content.lines().enumerate() {
    let line = raw_line.trim();

    if line.is_empty() || line.starts_with('#') {
      continue;
    }

    let Some((key, value)) = line.split_once('=') else {
      warn!("skipping invalid line {} in env file: {line}", index + 1);
      continue;
    };

    let key = key.trim();
    if !is_valid_key(key) {
      warn!("skipping invalid key on line {} in env file: {key}", index + 1);
      continue;
    }

    vars.insert(key.to_string(), unquote(value.trim()).to_string());
  }

  vars
}

/// Check that a key looks like an environment variable name.
fn is_valid_key(key: &str) -> bool {
  let mut chars = key.chars();
  match chars.next() {
    Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
    _ => return false,
  }
  chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Strip one matching pair of surrounding quotes from a value.
fn unquote(value: &str) -> &str {
  if value.len() >= 2
    && ((value.starts_with('"') && value.ends_with('"')) || (value.starts_with('\'') && value.ends_with('\'')))
  {
    &value[1..value.len() - 1]
  } else {
    value
  }
}
