//! Error types for the splitter.
//!
//! Every variant is fatal: the binary prints it and exits with status 1.
//! Recoverable problems (unmatched headings, missing cross references) are
//! reported as warnings instead and never surface here.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the splitter library.
#[derive(Debug, Error)]
pub enum SplitError {
    /// Reading an input file failed.
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Creating or writing an output file failed.
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The headings file contains no pattern lines.
    #[error("the headings file \"{}\" is empty", .0.display())]
    EmptyHeadingsFile(PathBuf),

    /// A headings file line does not have the `name;(heading|file):value(;replacement)?` shape.
    #[error("error in headings file line {line_number} (\"{line}\")")]
    InvalidHeadingLine { line_number: usize, line: String },

    /// A `heading` entry whose level is not a positive integer.
    #[error("invalid heading level '{value}' in headings file line {line_number}")]
    InvalidHeadingLevel { line_number: usize, value: String },

    /// A `file` entry without a target path.
    #[error("missing target file in headings file line {line_number} (\"{line}\")")]
    MissingTargetFile { line_number: usize, line: String },

    /// A table tag that the fragment grammar does not allow at this point.
    #[error("expected {expected} element, but found <{found}>")]
    UnexpectedElement {
        expected: &'static str,
        found: String,
    },

    /// An inline tag inside a table cell other than `<br>` or `<strong>`.
    #[error("unexpected inline found: <{0}>")]
    UnexpectedInline(String),

    /// Text inside a table but outside of any cell.
    #[error("unexpected data outside of <th> or <td> elements: {0}")]
    TextOutsideCell(String),

    /// A `<` without a closing `>` inside a table fragment.
    #[error("malformed tag in table fragment: {0}")]
    MalformedTag(String),

    /// End of input reached while a table was still open.
    #[error("end of file reached while parsing a table, current table content: {0}")]
    UnterminatedTable(String),

    /// An ability group has no tier heading where one was expected.
    #[error("expected {expected} ability group section for \"{group}\" but reached the end of the input")]
    MissingTier {
        expected: &'static str,
        group: String,
    },

    /// An ability group's tier headings are not low, mid, high in order.
    #[error("expected {expected} ability group section but found: {found}")]
    UnexpectedTier {
        expected: &'static str,
        found: String,
    },

    /// An ability title that cannot be turned into a file name.
    #[error("ability title does not match the expected pattern {0}")]
    InvalidAbilityTitle(String),

    /// A glob pattern passed to the synchronizer is invalid.
    #[error("invalid glob pattern '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// Walking a glob pattern hit an unreadable path.
    #[error("Failed to expand glob pattern: {0}")]
    Glob(#[from] glob::GlobError),
}

/// Result type alias for splitter operations.
pub type Result<T> = std::result::Result<T, SplitError>;
