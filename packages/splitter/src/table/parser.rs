//! State machine extracting rows from a restricted HTML table fragment.

use super::tokenizer::{Token, Tokenizer};
use super::types::TableFragment;
use crate::error::{Result, SplitError};

/// Position of the parser inside the fragment grammar.
///
/// The states nest strictly: a cell is always inside a row, a row inside a
/// table child (`<thead>`/`<tbody>`), and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableState {
    Outside,
    InTable,
    InColumnGroup,
    InTableChild,
    InRow,
    InCell,
}

/// Streaming parser for one `<table>...</table>` fragment.
#[derive(Debug)]
pub struct TableParser {
    state: TableState,
    column_count: usize,
    rows: Vec<Vec<String>>,
    current_row: Vec<String>,
    current_cell: Vec<String>,
}

impl Default for TableParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TableParser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: TableState::Outside,
            column_count: 0,
            rows: Vec::new(),
            current_row: Vec::new(),
            current_cell: Vec::new(),
        }
    }

    /// Feed a (partial) fragment to the parser.
    pub fn feed(&mut self, fragment: &str) -> Result<()> {
        for token in Tokenizer::new(fragment) {
            match token? {
                Token::Start { name, self_closing } => {
                    self.start_tag(&name)?;
                    if self_closing {
                        self.end_tag(&name);
                    }
                }
                Token::End { name } => self.end_tag(&name),
                Token::Text(text) => self.text(&text)?,
            }
        }
        Ok(())
    }

    /// Finish parsing and return the collected rows.
    #[must_use]
    pub fn finish(self) -> TableFragment {
        TableFragment {
            rows: self.rows,
            column_count: self.column_count,
        }
    }

    fn start_tag(&mut self, tag: &str) -> Result<()> {
        let unexpected = |expected: &'static str| SplitError::UnexpectedElement {
            expected,
            found: tag.to_string(),
        };

        match self.state {
            TableState::Outside => match tag {
                "table" => self.state = TableState::InTable,
                _ => return Err(unexpected("<table>")),
            },
            TableState::InTable => match tag {
                "thead" | "tbody" => self.state = TableState::InTableChild,
                "colgroup" => {
                    self.state = TableState::InColumnGroup;
                    self.column_count = 0;
                }
                _ => return Err(unexpected("<thead> or <tbody>")),
            },
            TableState::InColumnGroup => match tag {
                "col" => self.column_count += 1,
                _ => return Err(unexpected("<col>")),
            },
            TableState::InTableChild => match tag {
                "thead" | "tr" => {
                    self.state = TableState::InRow;
                    self.current_row = Vec::new();
                }
                _ => return Err(unexpected("<thead> or <tr>")),
            },
            TableState::InRow => match tag {
                "th" | "td" => {
                    self.state = TableState::InCell;
                    self.current_cell = Vec::new();
                }
                _ => return Err(unexpected("<th> or <td>")),
            },
            TableState::InCell => match tag {
                "br" | "strong" => {}
                _ => return Err(SplitError::UnexpectedInline(tag.to_string())),
            },
        }
        Ok(())
    }

    fn end_tag(&mut self, tag: &str) {
        match self.state {
            TableState::InCell => {
                if tag == "td" || tag == "th" {
                    let cell = std::mem::take(&mut self.current_cell).join(" ");
                    self.current_row.push(cell);
                    self.state = TableState::InRow;
                }
            }
            TableState::InRow => {
                self.rows.push(std::mem::take(&mut self.current_row));
                self.state = TableState::InTableChild;
            }
            TableState::InColumnGroup => {
                if tag == "colgroup" {
                    self.state = TableState::InTable;
                }
            }
            TableState::InTableChild => self.state = TableState::InTable,
            TableState::InTable => self.state = TableState::Outside,
            TableState::Outside => {}
        }
    }

    fn text(&mut self, data: &str) -> Result<()> {
        if self.state == TableState::InCell {
            let piece = data.trim().replace('\n', " ");
            if !piece.is_empty() {
                self.current_cell.push(piece);
            }
            Ok(())
        } else if data.trim().is_empty() {
            Ok(())
        } else {
            Err(SplitError::TextOutsideCell(data.to_string()))
        }
    }
}

/// Parse a complete table fragment.
pub fn extract_table(fragment: &str) -> Result<TableFragment> {
    let mut parser = TableParser::new();
    parser.feed(fragment)?;
    Ok(parser.finish())
}
