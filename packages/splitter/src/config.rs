//! Configuration constants and shared helpers for the splitters.

use std::path::Path;

/// Words kept in lower case when they are not the first word of a heading.
pub const MINOR_HEADING_WORDS: [&str; 6] = ["of", "the", "and", "as", "a", "an"];

/// Bullet prefix marking an unordered list item in the input document.
pub const LIST_ITEM_PREFIX: &str = "\u{2022} ";

/// Cell text of a markdown table separator row.
pub const TABLE_SEPARATOR_CELL: &str = " --- ";

/// Directory (below the output root) receiving one file per ability group.
pub const ABILITY_GROUPS_DIR: &str = "ability_groups";

/// Directory (below the output root) receiving one file per ability.
pub const ABILITIES_DIR: &str = "abilities";

/// File (below the output root) receiving everything before the first ability group.
pub const ABILITIES_PROLOGUE_FILE: &str = "abilities.md";

/// Label of the comment pointing from a generated file to its source.
pub const SOURCE_LABEL: &str = "Quelle";

/// Label of the comment pointing from an original to its translation.
pub const TRANSLATION_LABEL: &str = "Übersetzung";

/// Convert a path to the forward-slash form used in traceability comments.
#[must_use]
pub fn to_reference_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Comment recording where a generated file's content came from.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use csrd_splitter::config::source_reference;
///
/// assert_eq!(
///     source_reference(Path::new("abilities/Fly.md")),
///     "<!-- Quelle: abilities/Fly.md -->"
/// );
/// ```
#[must_use]
pub fn source_reference(path: &Path) -> String {
    format!("<!-- {SOURCE_LABEL}: {} -->", to_reference_path(path))
}

/// Comment recording where the translation of an original file lives.
#[must_use]
pub fn translation_reference(path: &Path) -> String {
    format!("<!-- {TRANSLATION_LABEL}: {} -->", to_reference_path(path))
}
