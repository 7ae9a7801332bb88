//! Parsing of the headings file into an ordered pattern table.

use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use super::case::fix_header_case;
use super::types::{HeadingAction, HeadingSpec};
use crate::error::{Result, SplitError};

/// Shape of one headings file line: `name;(heading|file):value(;replacement)?`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static HEADING_LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^;]+);(heading|file):([^;]*)(?:;(.*))?$").expect("valid regex")
});

/// Parse one line of the headings file.
///
/// `line_number` is 1-based and only used for error reporting.
pub fn parse_heading_line(line_number: usize, line: &str) -> Result<HeadingSpec> {
    let invalid = || SplitError::InvalidHeadingLine {
        line_number,
        line: line.to_string(),
    };

    let caps = HEADING_LINE_PATTERN.captures(line).ok_or_else(invalid)?;
    let (Some(name), Some(kind), Some(value)) = (caps.get(1), caps.get(2), caps.get(3)) else {
        return Err(invalid());
    };
    let match_text = name.as_str().to_string();
    let value = value.as_str();

    let action = match kind.as_str() {
        "heading" => {
            let level = value
                .parse::<usize>()
                .ok()
                .filter(|level| *level > 0)
                .ok_or_else(|| SplitError::InvalidHeadingLevel {
                    line_number,
                    value: value.to_string(),
                })?;
            HeadingAction::EmitHeading { level }
        }
        "file" => {
            if value.is_empty() {
                return Err(SplitError::MissingTargetFile {
                    line_number,
                    line: line.to_string(),
                });
            }
            HeadingAction::EmitHeadingAndOpenFile {
                target: PathBuf::from(value),
            }
        }
        _ => return Err(invalid()),
    };

    let replacement = caps
        .get(4)
        .map_or_else(|| fix_header_case(&match_text), |r| r.as_str().to_string());

    Ok(HeadingSpec {
        match_text,
        action,
        replacement,
        line_number,
    })
}

/// Immutable, ordered list of expected headings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadingTable {
    entries: Vec<HeadingSpec>,
}

impl HeadingTable {
    /// Parse the full text of a headings file.
    ///
    /// Every line must be a valid entry; the first invalid line aborts parsing.
    pub fn parse(text: &str) -> Result<Self> {
        let entries = text
            .lines()
            .enumerate()
            .map(|(index, line)| parse_heading_line(index + 1, line))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    /// Load and parse a headings file. An empty file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| SplitError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::parse(&text)?;
        if table.is_empty() {
            return Err(SplitError::EmptyHeadingsFile(path.to_path_buf()));
        }
        tracing::debug!(path = %path.display(), entries = table.len(), "loaded headings file");
        Ok(table)
    }

    /// Entry at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&HeadingSpec> {
        self.entries.get(index)
    }

    /// All entries in file order.
    #[must_use]
    pub fn entries(&self) -> &[HeadingSpec] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
