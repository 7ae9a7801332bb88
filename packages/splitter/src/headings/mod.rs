//! Heading pattern table driving the markdown splitter.
//!
//! The headings file lists, in document order, every heading the splitter
//! should recognize:
//!
//! ```text
//! Introduction;file:core/introduction.md
//! What You Need;heading:2
//! COMBAT;heading:2;Combat Basics
//! ```
//!
//! Each entry either emits a heading at the given level or opens a new output
//! file. The optional third field replaces the heading text; without it the
//! matched text is case-normalized with [`fix_header_case`].

mod case;
mod pattern;
mod types;

pub use case::fix_header_case;
pub use pattern::{parse_heading_line, HeadingTable};
pub use types::{HeadingAction, HeadingSpec};
