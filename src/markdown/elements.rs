//! HTML element to Markdown converters.
//!
//! Handles standard HTML elements like headings, paragraphs, links, lists,
//! and code blocks. Confluence-specific `ac:`/`ri:` constructs that have no
//! Markdown equivalent either pass through as literal HTML (images) or
//! degrade to their inner text.

use roxmltree::Node;
use tracing::{debug, warn};

use super::html_entities::decode_html_entities;
use super::tables::convert_table_to_markdown;
use super::utils::{get_attribute, get_element_text, matches_tag, qualified_tag_name, SYNTHETIC_NS_BASE};

fn looks_like_list_marker(line: &str) -> bool {
  let trimmed = line.trim_start();

  if trimmed.starts_with(['-', '*', '+']) {
    return trimmed.len() > 1 && trimmed.as_bytes()[1] == b' ';
  }

  let mut chars = trimmed.chars();
  let mut saw_digit = false;

  while let Some(ch) = chars.next() {
    if ch.is_ascii_digit() {
      saw_digit = true;
      continue;
    }

    if ch == '.' {
      return saw_digit && matches!(chars.next(), Some(' '));
    }

    break;
  }

  false
}

/// Indent a converted list item under its marker.
///
/// Continuation lines, including nested list markers, are indented by the
/// marker width so nesting survives the flattening done by recursion.
fn format_list_item(item: &str, prefix: &str) -> String {
  let mut formatted = String::new();
  let lines = item.trim_end().lines();
  let indentation = " ".repeat(prefix.chars().count());
  let mut wrote_first_line = false;

  for line in lines {
    if !wrote_first_line {
      if line.trim().is_empty() {
        continue;
      }

      let line_content = line.trim_start();

      if looks_like_list_marker(line_content) {
        formatted.push_str(prefix.trim_end());
        formatted.push('\n');
        formatted.push_str(&indentation);
        formatted.push_str(line_content);
        formatted.push('\n');
      } else {
        formatted.push_str(prefix);
        formatted.push_str(line_content);
        formatted.push('\n');
      }

      wrote_first_line = true;
    } else if line.trim().is_empty() {
      formatted.push('\n');
    } else {
      formatted.push_str(&indentation);
      formatted.push_str(line);
      formatted.push('\n');
    }
  }

  if !wrote_first_line {
    formatted.push_str(prefix.trim_end());
    formatted.push('\n');
  }

  formatted
}

/// Serialize an element back to its literal HTML form.
///
/// Used for constructs that have no Markdown equivalent, such as `ac:image`,
/// so readers can still see what the page referenced.
fn render_raw_html(node: Node) -> String {
  let tag = qualified_tag_name(node);
  let mut result = format!("<{tag}");

  for attr in node.attributes() {
    let name = match attr.namespace().and_then(|ns| ns.strip_prefix(SYNTHETIC_NS_BASE)) {
      Some(prefix) => format!("{prefix}:{}", attr.name()),
      None => attr.name().to_string(),
    };
    result.push_str(&format!(" {name}=\"{}\"", attr.value()));
  }

  let mut inner = String::new();
  for child in node.children() {
    match child.node_type() {
      roxmltree::NodeType::Element => inner.push_str(&render_raw_html(child)),
      roxmltree::NodeType::Text => {
        if let Some(text) = child.text() {
          inner.push_str(text);
        }
      }
      _ => {}
    }
  }

  if inner.trim().is_empty() {
    result.push_str(" />");
  } else {
    result.push('>');
    result.push_str(&inner);
    result.push_str(&format!("</{tag}>"));
  }

  result
}

/// Whether a node belongs to one of the synthetic Confluence namespaces.
fn is_confluence_element(node: Node) -> bool {
  node
    .tag_name()
    .namespace()
    .is_some_and(|ns| ns.starts_with(SYNTHETIC_NS_BASE))
}

/// Convert an element and its children to Markdown recursively.
pub fn convert_node_to_markdown(node: Node) -> String {
  let mut result = String::new();

  for child in node.children() {
    match child.node_type() {
      roxmltree::NodeType::Element => {
        let local_name = child.tag_name().name();

        match local_name {
          // Headings
          "h1" => result.push_str(&format!("\n# {}\n\n", convert_node_to_markdown(child).trim())),
          "h2" => result.push_str(&format!("\n## {}\n\n", convert_node_to_markdown(child).trim())),
          "h3" => result.push_str(&format!("\n### {}\n\n", convert_node_to_markdown(child).trim())),
          "h4" => result.push_str(&format!("\n#### {}\n\n", convert_node_to_markdown(child).trim())),
          "h5" => result.push_str(&format!("\n##### {}\n\n", convert_node_to_markdown(child).trim())),
          "h6" => result.push_str(&format!("\n###### {}\n\n", convert_node_to_markdown(child).trim())),

          // Paragraphs
          "p" => {
            let content = convert_node_to_markdown(child);
            let trimmed = content.trim();
            if !trimmed.is_empty() {
              result.push_str(&format!("{trimmed}\n\n"));
            }
          }

          // Text formatting
          "strong" | "b" => result.push_str(&format!("**{}**", convert_node_to_markdown(child))),
          "em" | "i" => result.push_str(&format!("_{}_", convert_node_to_markdown(child))),
          "u" => result.push_str(&format!("_{}_", convert_node_to_markdown(child))),
          "s" | "del" => result.push_str(&format!("~~{}~~", convert_node_to_markdown(child))),
          "code" => result.push_str(&format!("`{}`", convert_node_to_markdown(child))),

          // Lists
          "ul" => {
            result.push('\n');
            for li in child.children().filter(|n| matches_tag(*n, "li")) {
              let item = convert_node_to_markdown(li);
              result.push_str(&format_list_item(&item, "- "));
            }
            result.push('\n');
          }
          "ol" => {
            result.push('\n');
            for (index, li) in child.children().filter(|n| matches_tag(*n, "li")).enumerate() {
              let item = convert_node_to_markdown(li);
              let prefix = format!("{}. ", index + 1);
              result.push_str(&format_list_item(&item, &prefix));
            }
            result.push('\n');
          }

          // Links pass their href through verbatim
          "a" => {
            let text = convert_node_to_markdown(child);
            let href = get_attribute(child, "href").unwrap_or_default();
            result.push_str(&format!("[{}]({})", text.trim(), href));
          }

          // Line breaks and horizontal rules
          "br" => result.push('\n'),
          "hr" => result.push_str("\n---\n\n"),

          // Code blocks
          "pre" => {
            let code = get_element_text(child);
            result.push_str(&format!("\n```\n{}\n```\n\n", code.trim()));
          }

          // Tables
          "table" => result.push_str(&convert_table_to_markdown(child)),

          // Images have no portable Markdown form without downloading the
          // referenced media, so they stay as literal HTML.
          "img" => result.push_str(&render_raw_html(child)),
          "image" if matches_tag(child, "ac:image") => {
            result.push_str(&render_raw_html(child));
          }

          // Layout elements contribute only their content
          "layout" | "layout-section" | "layout-cell" | "rich-text-body" if is_confluence_element(child) => {
            result.push_str(&convert_node_to_markdown(child));
          }

          // Time elements prefer visible text, then the datetime attribute
          "time" => {
            let text = get_element_text(child);
            if !text.trim().is_empty() {
              result.push_str(&text);
            } else if let Some(datetime) = get_attribute(child, "datetime") {
              result.push_str(&datetime);
            }
          }

          "span" | "div" => result.push_str(&convert_node_to_markdown(child)),

          // Unsupported Confluence constructs degrade to their inner text
          _ if is_confluence_element(child) => {
            let name = qualified_tag_name(child);
            warn!("Unsupported Confluence element <{name}>, keeping inner text only");
            result.push_str(&get_element_text(child));
          }

          // Unknown plain HTML keeps its content
          _ => {
            debug!("Unknown tag: {local_name}");
            result.push_str(&convert_node_to_markdown(child));
          }
        }
      }
      roxmltree::NodeType::Text => {
        if let Some(text) = child.text() {
          result.push_str(&decode_html_entities(text));
        }
      }
      _ => {}
    }
  }

  result
}
