//! Markdown splitter driver.
//!
//! Walks the input document once, line by line:
//!
//! 1. lines inside an open `<table>` are buffered until `</table>`, then the
//!    fragment is extracted and written as a markdown table;
//! 2. `• ` list entries are rewritten as markdown list items;
//! 3. a `<table ...>` line starts a new table buffer;
//! 4. a line framed by blank lines that [`could_be_heading`] is handed to the
//!    router as a heading candidate;
//! 5. everything else is written verbatim.
//!
//! The line after the last line of the document is treated as blank.

use std::path::{Path, PathBuf};

use crate::classify::{
    could_be_heading, is_blank, is_list_item, is_table_end, is_table_start, to_markdown_list_item,
};
use crate::document::Document;
use crate::error::{Result, SplitError};
use crate::headings::HeadingTable;
use crate::router::{OutputRouter, SplitReport};
use crate::table::extract_table;

/// Options for a markdown split run.
#[derive(Debug, Clone, Default)]
pub struct SplitOptions {
    /// Directory that `file:` targets are resolved against.
    pub output_root: PathBuf,

    /// Start every generated file with a `<!-- Quelle: ... -->` comment.
    pub source_reference: bool,
}

/// Per-run state of the line walk.
struct SplitState {
    router: OutputRouter,
    previous_line_blank: bool,
    table_buffer: Option<String>,
}

impl SplitState {
    fn new(router: OutputRouter) -> Self {
        Self {
            router,
            // The start of the document counts as a blank line.
            previous_line_blank: true,
            table_buffer: None,
        }
    }

    fn process_line(&mut self, line: &str, line_number: usize, next_line_blank: bool) -> Result<()> {
        if let Some(buffer) = self.table_buffer.as_mut() {
            self.previous_line_blank = false;
            buffer.push_str(line);
            buffer.push('\n');
            if is_table_end(line) {
                let fragment = self.table_buffer.take().unwrap_or_default();
                let table = extract_table(&fragment)?;
                tracing::debug!(
                    line = line_number,
                    rows = table.rows.len(),
                    columns = table.column_count,
                    "extracted table"
                );
                self.router.write_table(&table)?;
            }
        } else if is_list_item(line) {
            self.previous_line_blank = false;
            self.router.write_content(&to_markdown_list_item(line))?;
        } else if is_table_start(line) {
            self.previous_line_blank = false;
            self.table_buffer = Some(format!("{line}\n"));
        } else if self.previous_line_blank && next_line_blank && could_be_heading(line) {
            self.previous_line_blank = false;
            self.router.write_possible_heading(line, line_number)?;
        } else {
            self.router.write_content(line)?;
            self.previous_line_blank = is_blank(line);
        }
        Ok(())
    }

    fn finish(self) -> Result<SplitReport> {
        if let Some(fragment) = self.table_buffer {
            return Err(SplitError::UnterminatedTable(fragment));
        }
        self.router.finish()
    }
}

/// Split `document` according to `headings`.
pub fn split_document(
    document: &Document,
    headings: HeadingTable,
    options: &SplitOptions,
) -> Result<SplitReport> {
    let router = OutputRouter::new(headings, options.output_root.clone())
        .with_source_reference(options.source_reference);
    let mut state = SplitState::new(router);

    let lines = document.lines();
    for (index, line) in lines.iter().enumerate() {
        let next_line_blank = lines.get(index + 1).map_or(true, |next| is_blank(next));
        state.process_line(line, index + 1, next_line_blank)?;
    }

    let report = state.finish()?;
    tracing::info!(
        files = report.files.len(),
        matched = report.matched_headings,
        warnings = report.warnings.len(),
        "split finished"
    );
    Ok(report)
}

/// Load the input and headings files and split the input.
pub fn split_markdown_file(
    input_file: &Path,
    headings_file: &Path,
    options: &SplitOptions,
) -> Result<SplitReport> {
    let headings = HeadingTable::load(headings_file)?;
    let document = Document::load(input_file)?;
    split_document(&document, headings, options)
}
