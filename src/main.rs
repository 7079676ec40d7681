//! confluence-export - Export Confluence pages to Markdown
//!
//! This is the main entry point for the CLI application.

#[tokio::main]
async fn main() {
  confluence_export::cli::run().await;
}
