//! Color utilities for terminal output
//!
//! Provides consistent color handling across the application, respecting
//! user preferences and terminal capabilities.

use owo_colors::OwoColorize;

use crate::cli::ColorOption;

/// Color scheme for the application
///
/// Semantic color names keep call sites readable and the visual design
/// consistent.
pub struct ColorScheme {
  enabled: bool,
}

impl ColorScheme {
  /// Create a new color scheme based on user preference and terminal
  /// capabilities
  pub fn new(color_option: ColorOption) -> Self {
    let enabled = match color_option {
      ColorOption::Always => true,
      ColorOption::Never => false,
      ColorOption::Auto => {
        use std::io::IsTerminal;
        std::io::stdout().is_terminal()
      }
    };

    Self { enabled }
  }

  /// Check if colors are enabled
  #[allow(dead_code)]
  pub fn is_enabled(&self) -> bool {
    self.enabled
  }

  /// Style for success messages (green)
  pub fn success<T: std::fmt::Display>(&self, text: T) -> String {
    if self.enabled {
      format!("{}", text.green())
    } else {
      text.to_string()
    }
  }

  /// Style for error messages (bright red)
  pub fn error<T: std::fmt::Display>(&self, text: T) -> String {
    if self.enabled {
      format!("{}", text.bright_red().bold())
    } else {
      text.to_string()
    }
  }

  /// Style for warning messages (yellow)
  pub fn warning<T: std::fmt::Display>(&self, text: T) -> String {
    if self.enabled {
      format!("{}", text.yellow())
    } else {
      text.to_string()
    }
  }

  /// Style for emphasis/important text (bright white, bold)
  pub fn emphasis<T: std::fmt::Display>(&self, text: T) -> String {
    if self.enabled {
      format!("{}", text.bright_white().bold())
    } else {
      text.to_string()
    }
  }

  /// Style for file paths (magenta)
  pub fn path<T: std::fmt::Display>(&self, text: T) -> String {
    if self.enabled {
      format!("{}", text.magenta())
    } else {
      text.to_string()
    }
  }

}
