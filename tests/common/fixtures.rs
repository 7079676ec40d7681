//! JSON fixtures shaped like Confluence REST API responses.

use serde_json::{Value, json};

/// Build a page response with the given storage-format body.
pub fn page_json(id: &str, title: &str, storage_html: &str) -> Value {
  json!({
    "id": id,
    "title": title,
    "type": "page",
    "status": "current",
    "body": {
      "storage": {
        "value": storage_html,
        "representation": "storage"
      }
    }
  })
}

/// A small page with headings, formatting, and a list.
#[allow(dead_code)]
pub fn sample_page_json(id: &str, title: &str) -> Value {
  page_json(
    id,
    title,
    "<h2>Overview</h2>\
     <p>This page covers the <strong>basics</strong>.</p>\
     <ul><li>First item</li><li>Second item</li></ul>",
  )
}
