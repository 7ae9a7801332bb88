//! Line classification heuristics for the converted rulebook text.
//!
//! All functions are pure and look at a single line only; the one line of
//! lookahead/lookback needed for heading detection lives in the driver.

use crate::config::LIST_ITEM_PREFIX;

/// Whether the line is empty or contains only whitespace.
#[must_use]
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Whether the line is an unordered list entry (`"• text"`).
#[must_use]
pub fn is_list_item(line: &str) -> bool {
    line.starts_with(LIST_ITEM_PREFIX)
}

/// Convert a bullet list entry into a markdown list item (`"• x"` → `"* x"`).
///
/// Lines that are not list entries are returned unchanged.
#[must_use]
pub fn to_markdown_list_item(line: &str) -> String {
    match line.strip_prefix('\u{2022}') {
        Some(rest) => format!("*{rest}"),
        None => line.to_string(),
    }
}

/// Whether the line is a complete `<table ...>` start tag.
///
/// The tag may carry attributes, but nothing may follow its closing `>`.
#[must_use]
pub fn is_table_start(line: &str) -> bool {
    let stripped = line.trim();
    stripped.starts_with("<table") && stripped.find('>') == Some(stripped.len() - 1)
}

/// Whether the line is a `</table>` end tag.
#[must_use]
pub fn is_table_end(line: &str) -> bool {
    line.trim() == "</table>"
}

/// Whether the line may be a heading.
///
/// Deliberately crude: any non-blank line that is not a `- ` list item and
/// does not end with a period qualifies.
#[must_use]
pub fn could_be_heading(line: &str) -> bool {
    !is_blank(line) && !line.starts_with("- ") && !line.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(is_blank("\t \u{a0}"));
        assert!(!is_blank(" x "));
    }

    #[test]
    fn test_list_items() {
        assert!(is_list_item("\u{2022} Sword"));
        assert!(!is_list_item("\u{2022}Sword"));
        assert!(!is_list_item(" \u{2022} Sword"));
        assert_eq!(to_markdown_list_item("\u{2022} Sword"), "* Sword");
        assert_eq!(to_markdown_list_item("plain"), "plain");
    }

    #[test]
    fn test_table_start() {
        assert!(is_table_start("<table>"));
        assert!(is_table_start("  <table class=\"grid\">  "));
        assert!(!is_table_start("<table><tr>"));
        assert!(!is_table_start("<tbody>"));
        assert!(!is_table_start("<table"));
        assert!(!is_table_start("text <table>"));
    }

    #[test]
    fn test_table_end() {
        assert!(is_table_end("</table>"));
        assert!(is_table_end("  </table> "));
        assert!(!is_table_end("</table> trailing"));
    }

    #[test]
    fn test_could_be_heading() {
        assert!(could_be_heading("Combat"));
        assert!(could_be_heading("Is this a heading?"));
        assert!(could_be_heading("Effects:"));
        assert!(!could_be_heading("A full sentence."));
        assert!(!could_be_heading("- list entry"));
        assert!(!could_be_heading("   "));
    }
}
