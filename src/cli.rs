//! Command-line interface for confluence-export.
//!
//! Defines the CLI structure with clap derives, wires up logging and colors,
//! and drives the export.

use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use crate::color::ColorScheme;
use crate::config::{Config, Overrides};
use crate::confluence::ConfluenceClient;
use crate::export::{self, DEFAULT_MAX_DEPTH, ExportOptions, ExportSummary};

/// Request timeout for Confluence API calls.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// confluence-export - Export Confluence pages to Markdown
#[derive(Debug, Parser)]
#[command(
  name = "confluence-export",
  version,
  about = "Export Confluence pages to Markdown",
  long_about = "A command-line tool for exporting Confluence wiki pages to Markdown files.\n\
                Fetches pages over the REST API and can walk the page tree, mirroring\n\
                the hierarchy as nested directories.",
  styles = get_clap_styles()
)]
pub struct Cli {
  /// Numeric ID of the page to export
  #[arg(value_name = "PAGE_ID")]
  pub page_id: String,

  /// Output file (single page) or directory (with --with-children).
  /// Defaults to stdout for a single page, ./confluence-export otherwise
  #[arg(value_name = "OUTPUT")]
  pub output: Option<PathBuf>,

  /// Authentication options
  #[command(flatten)]
  pub auth: AuthOptions,

  /// Page tree options
  #[command(flatten)]
  pub page: PageOptions,

  /// Behavior options
  #[command(flatten)]
  pub behavior: BehaviorOptions,
}

/// Authentication options
#[derive(Debug, Parser)]
pub struct AuthOptions {
  /// Confluence user email (overrides environment and env file)
  #[arg(short = 'u', long, value_name = "EMAIL")]
  pub username: Option<String>,

  /// Confluence API token (overrides environment and env file)
  #[arg(short = 't', long, value_name = "TOKEN")]
  pub token: Option<String>,

  /// Confluence base URL, e.g. https://example.atlassian.net/wiki
  #[arg(short = 'b', long, value_name = "URL")]
  pub base_url: Option<String>,

  /// Path to a dotenv-style credentials file (default: .env if present)
  #[arg(long, value_name = "PATH")]
  pub env_file: Option<PathBuf>,
}

/// Page tree options
#[derive(Debug, Parser)]
pub struct PageOptions {
  /// Export child pages recursively
  #[arg(long)]
  pub with_children: bool,

  /// Maximum recursion depth when exporting children (default: 10)
  #[arg(long, value_name = "N")]
  pub max_depth: Option<usize>,
}

/// Behavior options
#[derive(Debug, Parser)]
pub struct BehaviorOptions {
  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Colorize output
  #[arg(long, value_enum, default_value = "auto", value_name = "WHEN")]
  pub color: ColorOption,
}

/// Color output options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorOption {
  Auto,
  Always,
  Never,
}

impl Cli {
  /// Validate CLI arguments
  ///
  /// Returns an error if the CLI configuration is invalid.
  pub fn validate(&self) -> Result<(), String> {
    if self.page_id.trim().is_empty() {
      return Err("PAGE_ID must not be empty".to_string());
    }

    if self.page.max_depth.is_some() && !self.page.with_children {
      return Err("--max-depth requires --with-children".to_string());
    }

    Ok(())
  }
}

/// Parse CLI arguments, initialize shared services, and run the export.
pub async fn run() {
  let cli = Cli::parse();

  init_tracing(&cli.behavior);

  let colors = ColorScheme::new(cli.behavior.color);

  if let Err(e) = cli.validate() {
    eprintln!("{} {}", colors.error("Error:"), e);
    process::exit(4); // Invalid arguments exit code
  }

  let overrides = Overrides {
    username: cli.auth.username.clone(),
    api_token: cli.auth.token.clone(),
    base_url: cli.auth.base_url.clone(),
  };

  let config = match Config::load(cli.auth.env_file.as_deref(), &overrides) {
    Ok(config) => config,
    Err(e) => {
      eprintln!("{} {}", colors.error("Error:"), e);
      process::exit(1);
    }
  };

  let client = match ConfluenceClient::new(
    &config.base_url,
    &config.username,
    &config.api_token,
    REQUEST_TIMEOUT_SECS,
  ) {
    Ok(client) => client,
    Err(e) => {
      eprintln!("{} {e:#}", colors.error("Error:"));
      process::exit(1);
    }
  };

  let options = ExportOptions {
    output: cli.output.clone(),
    with_children: cli.page.with_children,
    max_depth: cli.page.max_depth.unwrap_or(DEFAULT_MAX_DEPTH),
  };

  match export::export_page(&client, &cli.page_id, &options, &colors).await {
    Ok(summary) => {
      if summary.skipped > 0 {
        eprintln!(
          "{} {}",
          colors.warning("⚠"),
          colors.warning(format!(
            "Export finished with {} skipped subtree{}; {} page{} exported",
            summary.skipped,
            if summary.skipped == 1 { "" } else { "s" },
            summary.exported,
            if summary.exported == 1 { "" } else { "s" }
          ))
        );
        process::exit(exit_code(&summary));
      }

      if cli.page.with_children && !cli.behavior.quiet {
        println!(
          "\n{} {}",
          colors.success("✓"),
          colors.success(format!(
            "Exported {} page{}",
            summary.exported,
            if summary.exported == 1 { "" } else { "s" }
          ))
        );
      }
    }
    Err(e) => {
      eprintln!("{} {}", colors.error("✗"), colors.error("Export failed"));
      eprintln!("  {}: {e:#}", colors.emphasis("Error"));
      process::exit(1);
    }
  }
}

/// Map an export outcome to the process exit code.
///
/// A run that skipped any subtree exits with 3 so callers can tell partial
/// success from a clean run; fatal errors exit with 1 before a summary
/// exists.
fn exit_code(summary: &ExportSummary) -> i32 {
  if summary.skipped > 0 { 3 } else { 0 }
}

fn init_tracing(behavior: &BehaviorOptions) {
  let level = if behavior.quiet {
    LevelFilter::ERROR
  } else {
    match behavior.verbose {
      0 => LevelFilter::WARN,
      1 => LevelFilter::INFO,
      2 => LevelFilter::DEBUG,
      _ => LevelFilter::TRACE,
    }
  };

  let env_filter = EnvFilter::builder()
    .with_default_directive(level.into())
    .from_env_lossy();

  let _ = tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .try_init();
}

/// Get custom styles for clap help output
fn get_clap_styles() -> clap::builder::Styles {
  use clap::builder::styling::{AnsiColor, Effects};

  clap::builder::Styles::styled()
    .header(AnsiColor::BrightYellow.on_default() | Effects::BOLD)
    .usage(AnsiColor::BrightYellow.on_default() | Effects::BOLD)
    .literal(AnsiColor::BrightGreen.on_default())
    .placeholder(AnsiColor::BrightCyan.on_default())
    .error(AnsiColor::BrightRed.on_default() | Effects::BOLD)
    .valid(AnsiColor::BrightGreen.on_default())
    .invalid(AnsiColor::BrightRed.on_default())
}
