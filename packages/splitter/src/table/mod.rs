//! Extraction of HTML table fragments embedded in the converted rulebook.
//!
//! Only one narrow shape of table markup is understood:
//!
//! ```text
//! <table>
//! ├── <colgroup> (optional)
//! │   └── <col/>*
//! └── <thead> | <tbody>
//!     └── <tr> | <thead>
//!         └── <th> | <td>
//!             └── text | <br> | <strong>
//! ```
//!
//! Anything else is a fatal error: the input must be fixed upstream.

mod parser;
mod render;
mod tokenizer;
mod types;

pub use parser::{extract_table, TableParser};
pub use render::render_markdown_table;
pub use tokenizer::{decode_entities, Token, Tokenizer};
pub use types::TableFragment;
