//! Syntax tree explorer
//!
//! Turns a lossless CST into a flat list of [`NodeRecord`]s: one per node and
//! per token, in pre-order, each linked to its parent by id. Records carry
//! display ranges in UTF-16 columns, structural properties resolved through
//! the grammar catalog, and pre-rendered trivia markup.
//!
//! ## Components
//!
//! - [`position`]: byte offsets to 1-based rows and UTF-16 columns
//! - [`trivia`]: escaping and trivia markup
//! - [`structure`]: layout, collection and choice reflection
//! - [`visitor`]: the pre-order walk that assembles the list
//! - [`html`] and [`statistics`]: views derived from a finished list
//!
//! ## Example
//!
//! ```rust,ignore
//! use treelens_core::cst::parse_swift;
//! use treelens_core::explorer::TreeAssembler;
//!
//! let source = "let x = 1";
//! let parse = parse_swift(source)?;
//! let records = TreeAssembler::new(source).assemble(&parse.root);
//!
//! assert_eq!(records[0].label, "SourceFile");
//! assert!(records.iter().skip(1).all(|record| record.parent < Some(record.id)));
//! ```

pub mod html;
pub mod position;
pub mod record;
pub mod statistics;
pub mod structure;
pub mod trivia;
pub mod visitor;

pub use html::render_source_html;
pub use position::{LineIndex, Position};
pub use record::{
    NodeCategory, NodeRecord, PropertyValue, SourceRange, StructureProperty, TokenInfo,
};
pub use statistics::{KindStatistics, collect_statistics};
pub use structure::{Reflection, StructureError, reflect};
pub use trivia::{DEFAULT_TAB_WIDTH, TriviaRenderer, escape_text};
pub use visitor::TreeAssembler;
