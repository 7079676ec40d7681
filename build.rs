//! Build script for the confluence-export project
//!
//! Embeds build metadata used by the HTTP client's User-Agent string.

use std::env;

fn main() {
  // Store the target triple so the client can report its platform
  println!("cargo:rustc-env=TARGET={}", env::var("TARGET").unwrap_or_default());

  println!("cargo:rerun-if-changed=build.rs");
  println!("cargo:rerun-if-env-changed=TARGET");
}
