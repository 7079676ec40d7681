//! Helpers for working with roxmltree nodes parsed from storage format.
//!
//! Confluence storage format uses undeclared `ac:` and `ri:` namespace
//! prefixes, so input is wrapped in a synthetic root that declares every
//! prefix it finds before handing the markup to the parser.

use std::collections::BTreeSet;

use roxmltree::Node;

/// Base URL for the synthetic namespace declarations.
pub const SYNTHETIC_NS_BASE: &str = "https://confluence.synthetic/";

/// Collect all decoded text content from an element and its descendants.
///
/// Nested inline markup is flattened into a single string, which is how
/// unknown tags degrade to plain text.
pub fn get_element_text(node: Node) -> String {
  let mut text = String::new();

  for child in node.children() {
    match child.node_type() {
      roxmltree::NodeType::Text => {
        if let Some(value) = child.text() {
          text.push_str(&super::html_entities::decode_html_entities(value));
        }
      }
      roxmltree::NodeType::Element => {
        text.push_str(&get_element_text(child));
      }
      _ => {}
    }
  }

  text
}

/// Split a qualified tag name into prefix and local name.
pub fn split_qualified_name(name: &str) -> (Option<&str>, &str) {
  if let Some((prefix, local)) = name.split_once(':') {
    (Some(prefix), local)
  } else {
    (None, name)
  }
}

/// Wrap storage format markup in a root element that declares every
/// namespace prefix referenced by the content.
///
/// roxmltree rejects undeclared prefixes, so every `xx:` prefix seen in a
/// tag or attribute gets a synthetic declaration on the wrapper.
pub fn wrap_with_namespaces(storage_content: &str) -> String {
  let mut prefixes = BTreeSet::new();

  for segment in storage_content.split('<').skip(1) {
    let mut segment = segment;
    if let Some(idx) = segment.find('>') {
      segment = &segment[..idx];
    }

    let segment = segment.trim_start_matches('/');

    if let Some((prefix, _)) = segment.split_once(':')
      && is_valid_prefix(prefix)
    {
      prefixes.insert(prefix.to_string());
    }

    for attr in segment.split_whitespace() {
      if let Some((name, _)) = attr.split_once('=')
        && let Some((prefix, _)) = name.split_once(':')
        && is_valid_prefix(prefix)
      {
        prefixes.insert(prefix.to_string());
      }
    }
  }

  let mut result = String::from("<cx-root");
  for prefix in prefixes {
    result.push_str(" xmlns:");
    result.push_str(&prefix);
    result.push_str("=\"");
    result.push_str(SYNTHETIC_NS_BASE);
    result.push_str(&prefix);
    result.push('"');
  }
  result.push('>');
  result.push_str(storage_content);
  result.push_str("</cx-root>");
  result
}

fn is_valid_prefix(prefix: &str) -> bool {
  if prefix.is_empty() {
    return false;
  }
  prefix
    .chars()
    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Reconstruct the qualified tag name of a node as it appeared in the input.
///
/// The synthetic namespace URI ends with the original prefix, so the prefix
/// can be recovered from the namespace alone.
pub fn qualified_tag_name(node: Node) -> String {
  let tag = node.tag_name();
  let name = tag.name();
  match tag.namespace().and_then(|ns| ns.strip_prefix(SYNTHETIC_NS_BASE)) {
    Some(prefix) => format!("{prefix}:{name}"),
    None => name.to_string(),
  }
}

/// Test whether a node matches an expected tag name with optional namespace.
pub fn matches_tag(node: Node, name: &str) -> bool {
  if !node.is_element() {
    return false;
  }

  let (expected_prefix, expected_name) = split_qualified_name(name);
  let tag = node.tag_name();
  if tag.name() != expected_name {
    return false;
  }

  let expected_namespace = expected_prefix.map(|prefix| format!("{SYNTHETIC_NS_BASE}{prefix}"));

  match (expected_namespace.as_deref(), tag.namespace()) {
    (Some(expected), Some(actual)) => actual == expected,
    (None, None) => true,
    (Some(_), None) | (None, Some(_)) => false,
  }
}

/// Retrieve an attribute value from a node, handling namespaced attributes.
pub fn get_attribute(node: Node, attr_name: &str) -> Option<String> {
  if !node.is_element() {
    return None;
  }

  let (expected_prefix, expected_name) = split_qualified_name(attr_name);
  let expected_namespace = expected_prefix.map(|prefix| format!("{SYNTHETIC_NS_BASE}{prefix}"));

  for attr in node.attributes() {
    if attr.name() != expected_name {
      continue;
    }

    let namespace_matches = match (expected_namespace.as_deref(), attr.namespace()) {
      (Some(expected), Some(actual)) => actual == expected,
      (None, None) => true,
      (Some(_), None) | (None, Some(_)) => false,
    };

    if namespace_matches {
      return Some(attr.value().to_string());
    }
  }
  None
}

/// Normalize converter output before it is written to disk.
///
/// Collapses runs of blank lines to a single blank line, trims surrounding
/// whitespace, and guarantees a trailing newline.
pub fn clean_markdown(content: &str) -> String {
  let mut result = content.to_string();

  while result.contains("\n\n\n") {
    result = result.replace("\n\n\n", "\n\n");
  }

  result = result.trim().to_string();

  if !result.ends_with('\n') {
    result.push('\n');
  }

  result
}
