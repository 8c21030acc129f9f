//! Concrete Syntax Tree (CST) for a Swift-flavoured language
//!
//! This module implements a lossless syntax tree using the Rowan library.
//! The CST preserves all source information including whitespace, comments,
//! and recovery placeholders, which the explorer turns into annotated node
//! records.
//!
//! ## Architecture
//!
//! The CST uses Rowan's green/red tree pattern:
//!
//! - **Green Tree**: Immutable, position-independent storage
//!   - Stores actual source text with trivia (whitespace, comments)
//!   - Deduplicates identical subtrees and tokens
//!   - Cheap to clone (uses Arc internally)
//!
//! - **Red Tree**: Dynamically constructed view with parent pointers
//!   - Created on-demand for traversal
//!   - Provides offsets and parent/sibling navigation
//!
//! ## Recovery
//!
//! Parsing never rejects malformed code. Absent tokens are inserted as
//! zero-width *missing* tokens, absent expressions/patterns/types become
//! `Missing*` nodes, and stray tokens are wrapped in `UnexpectedNodes`.
//!
//! ## Trivia Handling
//!
//! Trivia tokens are stored between the tokens they surround. [`trivia`]
//! reassigns them:
//! - **Leading trivia**: Everything before a token since the previous line break
//! - **Trailing trivia**: Everything after a token until the next line break
//!
//! This enables lossless representation: `parse(source).text() == source`,
//! and folding keeps it that way.
//!
//! ## Example
//!
//! ```rust,ignore
//! use treelens_core::cst::{SwiftSyntaxKind, fold_operators, parse_swift};
//!
//! let parse = parse_swift("let total = a + b * c // sum")?;
//! let folded = fold_operators(&parse.root)?;
//!
//! // Verify lossless property
//! assert_eq!(folded.text().to_string(), "let total = a + b * c // sum");
//!
//! let infix = folded
//!     .descendants()
//!     .filter(|node| node.kind() == SwiftSyntaxKind::InfixOperatorExpr)
//!     .count();
//! assert_eq!(infix, 2);
//! ```

mod builder;
mod language;
mod lexer;
mod nodes;
mod parser;
mod syntax_kind;

pub mod fold;
pub mod grammar;
pub mod trivia;

pub use builder::CstBuilder;
pub use fold::{FoldError, fold_operators};
pub use grammar::{Accepts, NodeInfo, NodeShape, Slot, SyntaxClass, node_info, syntax_class};
pub use language::SwiftLanguage;
pub use lexer::{CstLexResult, CstSpan, CstToken, LexerError, lex_with_trivia};
pub use nodes::*;
pub use parser::{CstParse, MAX_NESTING_DEPTH, ParseError, SyntaxError, parse_swift};
pub use syntax_kind::SwiftSyntaxKind;
pub use trivia::{TokenTrivia, TriviaCollector, TriviaKind, TriviaPiece};
