//! CSRD Splitter - split the converted rulebook markdown into per-section files.
//!
//! This crate turns one large markdown document (converted from the rulebook
//! PDF) into a tree of smaller files, and keeps the traceability comments
//! between originals and translations in sync.
//!
//! # Example
//!
//! ```
//! use csrd_splitter::classify::could_be_heading;
//! use csrd_splitter::headings::fix_header_case;
//!
//! assert!(could_be_heading("COMBAT BASICS"));
//! assert!(!could_be_heading("A regular sentence."));
//! assert_eq!(fix_header_case("COMBAT BASICS"), "Combat Basics");
//! ```
//!
//! # Architecture
//!
//! - [`classify`]: Single-line heuristics (blank, list item, table tags, heading candidate)
//! - [`table`]: Tokenizer, parser and markdown renderer for embedded HTML tables
//! - [`headings`]: Heading pattern table loaded from the headings file
//! - [`router`]: Cursor over the heading table and the currently open output file
//! - [`splitter`]: Line-by-line driver of the markdown split
//! - [`abilities`]: Splitter for the abilities chapter
//! - [`sync`]: Translation location synchronizer
//! - [`document`]: Document loading and path helpers
//! - [`output`]: Output file creation
//! - [`config`]: Constants and traceability comments
//! - [`error`]: Error types and Result alias
//! - [`cli`]: Command-line interface

pub mod abilities;
pub mod classify;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod headings;
pub mod output;
pub mod router;
pub mod splitter;
pub mod sync;
pub mod table;

// Re-export main functions
pub use abilities::split_abilities_file;
pub use splitter::{split_document, split_markdown_file, SplitOptions};
pub use sync::{sync_translation_locations, SyncOptions};

// Re-export commonly used items
pub use document::Document;
pub use error::{Result, SplitError};
pub use router::SplitReport;
