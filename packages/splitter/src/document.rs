//! Line-oriented documents and path helpers.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::{Result, SplitError};

/// An input document held in memory as a sequence of lines.
///
/// Line terminators (`\n` and `\r\n`) are removed at load time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    /// Build a document from text already in memory.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.lines().map(String::from).collect(),
        }
    }

    /// Build a document from individual lines.
    #[must_use]
    pub fn from_lines(lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Read a UTF-8 document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| SplitError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_text(&text))
    }

    /// All lines in order.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Make `path` absolute against the working directory without touching the filesystem.
fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Drop `.` components and fold `..` into their parent.
fn normalize(path: &Path) -> Vec<Component<'_>> {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(parts.last(), Some(Component::Normal(_))) {
                    parts.pop();
                } else {
                    parts.push(component);
                }
            }
            other => parts.push(other),
        }
    }
    parts
}

/// Compute `path` relative to `base`, purely lexically.
///
/// Both paths are first made absolute against the working directory, so
/// mixing relative and absolute inputs works. The result may start with `..`
/// components when `path` is not below `base`.
#[must_use]
pub fn relative_path(path: &Path, base: &Path) -> PathBuf {
    let path = absolute(path);
    let base = absolute(base);
    let path_parts = normalize(&path);
    let base_parts = normalize(&base);

    let common = path_parts
        .iter()
        .zip(base_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut result = PathBuf::new();
    for _ in common..base_parts.len() {
        result.push("..");
    }
    for part in &path_parts[common..] {
        result.push(part.as_os_str());
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_normalizes_line_endings() {
        let doc = Document::from_text("first\r\nsecond\n\nfourth\n");
        assert_eq!(doc.lines(), ["first", "second", "", "fourth"]);
        assert_eq!(doc.len(), 4);
    }

    #[test]
    fn test_empty_document() {
        let doc = Document::from_text("");
        assert!(doc.is_empty());
        assert_eq!(doc.len(), 0);
    }

    #[test]
    fn test_relative_path_below_base() {
        let rel = relative_path(Path::new("/out/de/abilities/Fly.md"), Path::new("/out/de"));
        assert_eq!(rel, PathBuf::from("abilities/Fly.md"));
    }

    #[test]
    fn test_relative_path_sibling() {
        let rel = relative_path(Path::new("/out/en/a.md"), Path::new("/out/de"));
        assert_eq!(rel, PathBuf::from("../en/a.md"));
    }

    #[test]
    fn test_relative_path_folds_dot_components() {
        let rel = relative_path(Path::new("/out/./de/../de/x.md"), Path::new("/out"));
        assert_eq!(rel, PathBuf::from("de/x.md"));
    }
}
