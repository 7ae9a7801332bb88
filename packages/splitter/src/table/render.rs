//! Markdown rendering of extracted tables.

use super::types::TableFragment;
use crate::config::TABLE_SEPARATOR_CELL;

/// Render a table as markdown lines.
///
/// The header row is followed by a separator row with one ` --- ` cell per
/// declared `<col>`, then the remaining rows. Without a `<colgroup>` the
/// separator row is empty. The result always ends with one empty line.
#[must_use]
pub fn render_markdown_table(table: &TableFragment) -> Vec<String> {
    let mut lines = Vec::with_capacity(table.rows.len() + 2);

    if let Some(header) = table.header() {
        lines.push(header.join(" | "));
        lines.push(vec![TABLE_SEPARATOR_CELL; table.column_count].join(" | "));
    }

    lines.extend(table.body().iter().map(|row| row.join(" | ")));
    lines.push(String::new());
    lines
}
