//! Routing of document lines into output files.
//!
//! The router walks the heading table with an explicit cursor. Only the entry
//! under the cursor can match; a successful match performs the entry's action
//! and advances the cursor, so entries are consumed strictly in file order.

use std::mem;
use std::path::{Path, PathBuf};

use crate::config::source_reference;
use crate::error::Result;
use crate::headings::{HeadingAction, HeadingSpec, HeadingTable};
use crate::output::OutputFile;
use crate::table::{render_markdown_table, TableFragment};

/// Outcome of a completed split run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitReport {
    /// Files created, in the order they were opened.
    pub files: Vec<PathBuf>,

    /// Number of heading table entries that were matched.
    pub matched_headings: usize,

    /// Non-fatal problems encountered during the run.
    pub warnings: Vec<String>,
}

/// Cursor over the heading table plus the currently open output file.
#[derive(Debug)]
pub struct OutputRouter {
    headings: HeadingTable,
    cursor: usize,
    output_root: PathBuf,
    source_reference: bool,
    open_file: Option<OutputFile>,
    report: SplitReport,
}

impl OutputRouter {
    /// Create a router writing files relative to `output_root`.
    #[must_use]
    pub fn new(headings: HeadingTable, output_root: impl Into<PathBuf>) -> Self {
        Self {
            headings,
            cursor: 0,
            output_root: output_root.into(),
            source_reference: false,
            open_file: None,
            report: SplitReport::default(),
        }
    }

    /// Start every opened file with a `<!-- Quelle: ... -->` comment.
    #[must_use]
    pub fn with_source_reference(mut self, enabled: bool) -> Self {
        self.source_reference = enabled;
        self
    }

    /// The heading entry expected next, or `None` once all entries are used up.
    #[must_use]
    pub fn active(&self) -> Option<&HeadingSpec> {
        self.headings.get(self.cursor)
    }

    /// Whether an output file is currently open.
    #[must_use]
    pub fn has_open_file(&self) -> bool {
        self.open_file.is_some()
    }

    /// Write an ordinary content line; discarded while no file is open.
    pub fn write_content(&mut self, line: &str) -> Result<()> {
        match self.open_file.as_mut() {
            Some(file) => file.write_line(line),
            None => Ok(()),
        }
    }

    /// Present a heading candidate.
    ///
    /// Returns `true` if it matched the active entry. Otherwise a warning is
    /// recorded and the line is written as ordinary content.
    pub fn write_possible_heading(&mut self, candidate: &str, line_number: usize) -> Result<bool> {
        let Some(spec) = self.active().filter(|spec| spec.matches(candidate)).cloned() else {
            tracing::warn!(
                line = line_number,
                heading = %candidate,
                "possible heading not listed in heading file"
            );
            self.report.warnings.push(format!(
                "possible heading not listed in heading file: \"{candidate}\" (line {line_number})"
            ));
            self.write_content(candidate)?;
            return Ok(false);
        };

        match &spec.action {
            HeadingAction::EmitHeading { .. } => {
                self.write_content(&spec.heading_line())?;
            }
            HeadingAction::EmitHeadingAndOpenFile { target } => {
                self.open(target)?;
                self.write_content(&spec.heading_line())?;
            }
        }

        self.cursor += 1;
        self.report.matched_headings += 1;
        Ok(true)
    }

    /// Write an extracted table as markdown.
    pub fn write_table(&mut self, table: &TableFragment) -> Result<()> {
        for line in render_markdown_table(table) {
            self.write_content(&line)?;
        }
        Ok(())
    }

    /// Warn about unmatched entries and close the open file.
    pub fn finish(mut self) -> Result<SplitReport> {
        for spec in self.headings.entries().iter().skip(self.cursor) {
            tracing::warn!(
                line = spec.line_number,
                heading = %spec.match_text,
                "heading missing from input"
            );
            self.report.warnings.push(format!(
                "heading missing from input: \"{}\" (headings file line {})",
                spec.match_text, spec.line_number
            ));
        }

        self.close()?;
        Ok(mem::take(&mut self.report))
    }

    fn open(&mut self, target: &Path) -> Result<()> {
        self.close()?;

        let path = self.output_root.join(target);
        let mut file = OutputFile::create(&path)?;
        if self.source_reference {
            file.write_line(&source_reference(target))?;
            file.write_line("")?;
        }

        self.report.files.push(path);
        self.open_file = Some(file);
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if let Some(file) = self.open_file.take() {
            file.finish()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn router(headings: &str, root: &Path) -> OutputRouter {
        OutputRouter::new(HeadingTable::parse(headings).unwrap(), root)
    }

    #[test]
    fn test_content_before_first_file_is_discarded() {
        let temp_dir = tempdir().unwrap();
        let mut router = router("Intro;file:intro.md", temp_dir.path());

        router.write_content("preamble").unwrap();
        assert!(router.write_possible_heading("Intro", 2).unwrap());
        router.write_content("body").unwrap();
        let report = router.finish().unwrap();

        let content = fs::read_to_string(temp_dir.path().join("intro.md")).unwrap();
        assert_eq!(content, "# Intro\nbody\n");
        assert_eq!(report.files, vec![temp_dir.path().join("intro.md")]);
        assert_eq!(report.matched_headings, 1);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_only_active_entry_can_match() {
        let temp_dir = tempdir().unwrap();
        let mut router = router("A;file:a.md\nB;heading:2\nC;heading:3", temp_dir.path());

        assert!(router.write_possible_heading("A", 1).unwrap());
        assert!(!router.write_possible_heading("C", 2).unwrap());
        assert!(router.write_possible_heading("B", 3).unwrap());
        assert!(router.write_possible_heading("C", 4).unwrap());
        let report = router.finish().unwrap();

        let content = fs::read_to_string(temp_dir.path().join("a.md")).unwrap();
        assert_eq!(content, "# A\nC\n## B\n### C\n");
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("\"C\""));
    }

    #[test]
    fn test_heading_without_open_file_still_advances() {
        let temp_dir = tempdir().unwrap();
        let mut router = router("Prologue;heading:2\nA;file:a.md", temp_dir.path());

        assert!(router.write_possible_heading("Prologue", 1).unwrap());
        assert_eq!(router.active().map(|s| s.match_text.as_str()), Some("A"));
        assert!(!router.has_open_file());
    }

    #[test]
    fn test_opening_file_closes_previous() {
        let temp_dir = tempdir().unwrap();
        let mut router = router("A;file:a.md\nB;file:nested/dir/b.md", temp_dir.path());

        router.write_possible_heading("A", 1).unwrap();
        router.write_content("in a").unwrap();
        router.write_possible_heading("B", 3).unwrap();
        router.write_content("in b").unwrap();
        router.finish().unwrap();

        assert_eq!(
            fs::read_to_string(temp_dir.path().join("a.md")).unwrap(),
            "# A\nin a\n"
        );
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("nested/dir/b.md")).unwrap(),
            "# B\nin b\n"
        );
    }

    #[test]
    fn test_exhausted_table_demotes_everything() {
        let temp_dir = tempdir().unwrap();
        let mut router = router("A;file:a.md", temp_dir.path());

        router.write_possible_heading("A", 1).unwrap();
        assert!(!router.write_possible_heading("A", 5).unwrap());
        assert!(router.active().is_none());
        let report = router.finish().unwrap();

        assert_eq!(
            fs::read_to_string(temp_dir.path().join("a.md")).unwrap(),
            "# A\nA\n"
        );
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_finish_reports_missing_headings() {
        let temp_dir = tempdir().unwrap();
        let router = router("A;file:a.md\nB;heading:2", temp_dir.path());

        let report = router.finish().unwrap();

        assert_eq!(report.warnings.len(), 2);
        assert!(report.warnings[0].starts_with("heading missing from input: \"A\""));
        assert!(report.warnings[1].contains("line 2"));
        assert!(report.files.is_empty());
        assert!(!temp_dir.path().join("a.md").exists());
    }

    #[test]
    fn test_source_reference_comment() {
        let temp_dir = tempdir().unwrap();
        let mut router =
            router("Magic;file:core/magic.md", temp_dir.path()).with_source_reference(true);

        router.write_possible_heading("Magic", 1).unwrap();
        router.finish().unwrap();

        assert_eq!(
            fs::read_to_string(temp_dir.path().join("core/magic.md")).unwrap(),
            "<!-- Quelle: core/magic.md -->\n\n# Magic\n"
        );
    }

    #[test]
    fn test_write_table() {
        let temp_dir = tempdir().unwrap();
        let mut router = router("T;file:t.md", temp_dir.path());
        router.write_possible_heading("T", 1).unwrap();

        router
            .write_table(&TableFragment {
                rows: vec![
                    vec!["A".to_string(), "B".to_string()],
                    vec!["1".to_string(), "2".to_string()],
                ],
                column_count: 2,
            })
            .unwrap();
        router.finish().unwrap();

        assert_eq!(
            fs::read_to_string(temp_dir.path().join("t.md")).unwrap(),
            "# T\nA | B\n ---  |  --- \n1 | 2\n\n"
        );
    }
}
