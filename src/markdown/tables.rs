//! HTML table to Markdown pipe-table conversion.

use roxmltree::Node;

use super::utils::{get_element_text, matches_tag};

/// Render a `<table>` element as a Markdown pipe table.
///
/// Rows may appear as direct `<tr>` children or nested inside `<thead>`,
/// `<tbody>`, or `<tfoot>` sections. Cell text is flattened, so inline
/// markup inside cells degrades to plain text. The first row becomes the
/// header.
pub fn convert_table_to_markdown(element: Node) -> String {
  let mut rows: Vec<Vec<String>> = Vec::new();

  let mut tr_elements = Vec::new();
  for child in element.children() {
    if matches_tag(child, "tr") {
      tr_elements.push(child);
    } else if matches_tag(child, "tbody") || matches_tag(child, "thead") || matches_tag(child, "tfoot") {
      tr_elements.extend(child.children().filter(|n| matches_tag(*n, "tr")));
    }
  }

  for tr in tr_elements {
    let cells: Vec<String> = tr
      .children()
      .filter(|child| matches_tag(*child, "th") || matches_tag(*child, "td"))
      .map(|cell| {
        get_element_text(cell)
          .split_whitespace()
          .collect::<Vec<_>>()
          .join(" ")
      })
      .collect();

    if !cells.is_empty() {
      rows.push(cells);
    }
  }

  render_markdown_table(rows).unwrap_or_default()
}

/// Format rows into a pipe table with padded, aligned columns.
///
/// Short rows are padded with empty cells so every row spans the widest
/// row's column count. Returns `None` when there is nothing to render.
fn render_markdown_table(mut rows: Vec<Vec<String>>) -> Option<String> {
  if rows.is_empty() {
    return None;
  }

  let column_count = rows.iter().map(|row| row.len()).max()?;
  if column_count == 0 {
    return None;
  }

  for row in &mut rows {
    row.resize(column_count, String::new());
  }

  let mut column_widths = vec![0; column_count];
  for row in &rows {
    for (index, cell) in row.iter().enumerate() {
      column_widths[index] = column_widths[index].max(cell.len());
    }
  }

  let mut result = String::new();
  result.push('\n');

  if let Some(header) = rows.first() {
    result.push_str(&format_row(header, &column_widths));

    result.push('|');
    for width in &column_widths {
      result.push(' ');
      result.push_str(&"-".repeat((*width).max(3)));
      result.push_str(" |");
    }
    result.push('\n');
  }

  for row in rows.iter().skip(1) {
    result.push_str(&format_row(row, &column_widths));
  }

  result.push('\n');
  Some(result)
}

fn format_row(row: &[String], column_widths: &[usize]) -> String {
  let mut line = String::new();
  line.push('|');

  for (cell, width) in row.iter().zip(column_widths) {
    line.push(' ');
    line.push_str(cell);
    if *width > cell.len() {
      line.push_str(&" ".repeat(width - cell.len()));
    }
    line.push_str(" |");
  }

  line.push('\n');
  line
}
