//! End-to-end export tests against a fake API client.

mod common;

use confluence_export::cli::ColorOption;
use confluence_export::color::ColorScheme;
use confluence_export::confluence::ApiError;
use confluence_export::export::{ExportOptions, export_page};
use tempfile::TempDir;

use crate::common::fake_confluence::FakeConfluenceClient;
use crate::common::fixtures;

fn no_colors() -> ColorScheme {
  ColorScheme::new(ColorOption::Never)
}

/// Root page "A" with children "B" and "C"; "B" has child "D".
fn tree_client() -> FakeConfluenceClient {
  let mut client = FakeConfluenceClient::new();
  client.add_page_from_json("a1", fixtures::page_json("a1", "A", "<p>Root page</p>"));
  client.add_page_from_json("b2", fixtures::page_json("b2", "B", "<p>First child</p>"));
  client.add_page_from_json("c3", fixtures::page_json("c3", "C", "<p>Second child</p>"));
  client.add_page_from_json("d4", fixtures::page_json("d4", "D", "<p>Grandchild</p>"));
  client.add_child_pages("a1", vec!["b2", "c3"]);
  client.add_child_pages("b2", vec!["d4"]);
  client
}

#[tokio::test]
async fn single_page_export_writes_file_with_title_heading() {
  let mut client = FakeConfluenceClient::new();
  client.add_page_from_json("123", fixtures::sample_page_json("123", "Getting Started"));

  let dir = TempDir::new().unwrap();
  let output = dir.path().join("getting-started.md");

  let options = ExportOptions {
    output: Some(output.clone()),
    with_children: false,
    max_depth: 0,
  };

  let summary = export_page(&client, "123", &options, &no_colors()).await.unwrap();
  assert_eq!(summary.exported, 1);
  assert_eq!(summary.skipped, 0);

  let content = std::fs::read_to_string(&output).unwrap();
  assert!(content.starts_with("# Getting Started\n\n"));
  assert!(content.contains("## Overview"));
  assert!(content.contains("**basics**"));
  assert!(content.contains("- First item"));
}

#[tokio::test]
async fn single_page_export_creates_parent_directories() {
  let mut client = FakeConfluenceClient::new();
  client.add_page_from_json("123", fixtures::page_json("123", "Nested", "<p>content</p>"));

  let dir = TempDir::new().unwrap();
  let output = dir.path().join("deep").join("nested").join("page.md");

  let options = ExportOptions {
    output: Some(output.clone()),
    with_children: false,
    max_depth: 0,
  };

  export_page(&client, "123", &options, &no_colors()).await.unwrap();
  assert!(output.is_file());
}

#[tokio::test]
async fn plain_text_body_survives_conversion_unchanged() {
  let mut client = FakeConfluenceClient::new();
  client.add_page_from_json("123", fixtures::page_json("123", "Plain", "<p>Just a sentence.</p>"));

  let dir = TempDir::new().unwrap();
  let output = dir.path().join("plain.md");

  let options = ExportOptions {
    output: Some(output.clone()),
    with_children: false,
    max_depth: 0,
  };

  export_page(&client, "123", &options, &no_colors()).await.unwrap();

  let content = std::fs::read_to_string(&output).unwrap();
  assert_eq!(content, "# Plain\n\nJust a sentence.\n");
}

#[tokio::test]
async fn recursive_export_mirrors_hierarchy() {
  let client = tree_client();
  let dir = TempDir::new().unwrap();

  let options = ExportOptions {
    output: Some(dir.path().to_path_buf()),
    with_children: true,
    max_depth: 10,
  };

  let summary = export_page(&client, "a1", &options, &no_colors()).await.unwrap();
  assert_eq!(summary.exported, 4);
  assert_eq!(summary.skipped, 0);

  assert!(dir.path().join("A.md").is_file());
  assert!(dir.path().join("A").join("B.md").is_file());
  assert!(dir.path().join("A").join("C.md").is_file());
  assert!(dir.path().join("A").join("B").join("D.md").is_file());

  // C has no children, so no directory for it
  assert!(!dir.path().join("A").join("C").exists());
}

#[tokio::test]
async fn max_depth_bounds_recursion() {
  let client = tree_client();
  let dir = TempDir::new().unwrap();

  let options = ExportOptions {
    output: Some(dir.path().to_path_buf()),
    with_children: true,
    max_depth: 1,
  };

  let summary = export_page(&client, "a1", &options, &no_colors()).await.unwrap();
  assert_eq!(summary.exported, 3);

  assert!(dir.path().join("A.md").is_file());
  assert!(dir.path().join("A").join("B.md").is_file());
  assert!(dir.path().join("A").join("C.md").is_file());
  assert!(!dir.path().join("A").join("B").join("D.md").exists());
}

#[tokio::test]
async fn failing_child_skips_subtree_and_run_continues() {
  let mut client = tree_client();
  client.fail_with("c3", 403);

  let dir = TempDir::new().unwrap();

  let options = ExportOptions {
    output: Some(dir.path().to_path_buf()),
    with_children: true,
    max_depth: 10,
  };

  let summary = export_page(&client, "a1", &options, &no_colors()).await.unwrap();
  assert_eq!(summary.skipped, 1);
  assert_eq!(summary.exported, 3);

  assert!(dir.path().join("A.md").is_file());
  assert!(dir.path().join("A").join("B.md").is_file());
  assert!(!dir.path().join("A").join("C.md").exists());
}

#[tokio::test]
async fn failing_root_aborts_without_output() {
  let client = FakeConfluenceClient::new();
  let dir = TempDir::new().unwrap();

  let options = ExportOptions {
    output: Some(dir.path().to_path_buf()),
    with_children: true,
    max_depth: 10,
  };

  let err = export_page(&client, "missing", &options, &no_colors()).await.unwrap_err();
  assert!(matches!(err.downcast_ref::<ApiError>(), Some(ApiError::NotFound { .. })));

  assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[tokio::test]
async fn single_page_root_not_found_writes_nothing() {
  let client = FakeConfluenceClient::new();
  let dir = TempDir::new().unwrap();
  let output = dir.path().join("missing.md");

  let options = ExportOptions {
    output: Some(output.clone()),
    with_children: false,
    max_depth: 0,
  };

  let err = export_page(&client, "missing", &options, &no_colors()).await.unwrap_err();
  assert!(matches!(err.downcast_ref::<ApiError>(), Some(ApiError::NotFound { .. })));
  assert!(!output.exists());
}

#[tokio::test]
async fn titles_are_sanitized_into_filenames() {
  let mut client = FakeConfluenceClient::new();
  client.add_page_from_json("r1", fixtures::page_json("r1", "Q: what/why?", "<p>root</p>"));
  client.add_page_from_json("k1", fixtures::page_json("k1", "Child | notes", "<p>child</p>"));
  client.add_child_pages("r1", vec!["k1"]);

  let dir = TempDir::new().unwrap();

  let options = ExportOptions {
    output: Some(dir.path().to_path_buf()),
    with_children: true,
    max_depth: 10,
  };

  export_page(&client, "r1", &options, &no_colors()).await.unwrap();

  assert!(dir.path().join("Q_ what_why_.md").is_file());
  assert!(dir.path().join("Q_ what_why_").join("Child _ notes.md").is_file());
}
