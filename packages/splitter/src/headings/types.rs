//! Types for the heading pattern table.

use std::path::PathBuf;

/// What happens when a heading entry is matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadingAction {
    /// Write the heading at `level` into the currently open file.
    EmitHeading { level: usize },

    /// Close the current file, open `target` and start it with a level 1 heading.
    EmitHeadingAndOpenFile { target: PathBuf },
}

/// One entry of the headings file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingSpec {
    /// Text a candidate line must equal exactly.
    pub match_text: String,

    /// Action performed on a match.
    pub action: HeadingAction,

    /// Heading text written instead of the matched line.
    pub replacement: String,

    /// 1-based line number in the headings file.
    pub line_number: usize,
}

impl HeadingSpec {
    /// Whether `candidate` is the heading this entry expects.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        self.match_text == candidate
    }

    /// The markdown heading line written on a match.
    #[must_use]
    pub fn heading_line(&self) -> String {
        let level = match self.action {
            HeadingAction::EmitHeading { level } => level,
            HeadingAction::EmitHeadingAndOpenFile { .. } => 1,
        };
        format!("{} {}", "#".repeat(level), self.replacement)
    }
}
