//! Token trivia for the Swift-flavoured CST
//!
//! Trivia tokens live in the tree as siblings of the tokens they surround.
//! This module reassigns them to tokens using the usual convention:
//! - **Trailing trivia**: everything after a token up to, not including, the next newline
//! - **Leading trivia**: everything else before the next present token
//!
//! Missing tokens own no trivia. Trivia at the very end of a file is the
//! leading trivia of the zero-width end-of-file token.
//!
//! # Example
//!
//! ```rust,ignore
//! use treelens_core::cst::{parse_swift, trivia::TriviaCollector};
//!
//! let parse = parse_swift("let x = 1 // one\n")?;
//! let trivia = TriviaCollector::new().collect(&parse.root);
//!
//! // `1` keeps the comment, the end-of-file token gets the newline
//! assert!(trivia[3].has_comments());
//! assert!(trivia[4].leading[0].is_newline());
//! ```

use std::fmt;

use super::{SwiftSyntaxKind, SwiftSyntaxNode, SwiftSyntaxToken, SwiftSyntaxTokenExt};

/// Category of a trivia piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriviaKind {
    Spaces,
    Tabs,
    VerticalTabs,
    Formfeeds,
    Newlines,
    CarriageReturns,
    CarriageReturnLineFeeds,
    LineComment,
    BlockComment,
    DocLineComment,
    DocBlockComment,
    UnexpectedText,
    Backslashes,
    Pounds,
}

impl TriviaKind {
    pub fn from_syntax_kind(kind: SwiftSyntaxKind) -> Option<Self> {
        let trivia = match kind {
            SwiftSyntaxKind::Spaces => Self::Spaces,
            SwiftSyntaxKind::Tabs => Self::Tabs,
            SwiftSyntaxKind::VerticalTabs => Self::VerticalTabs,
            SwiftSyntaxKind::Formfeeds => Self::Formfeeds,
            SwiftSyntaxKind::Newlines => Self::Newlines,
            SwiftSyntaxKind::CarriageReturns => Self::CarriageReturns,
            SwiftSyntaxKind::CarriageReturnLineFeeds => Self::CarriageReturnLineFeeds,
            SwiftSyntaxKind::LineComment => Self::LineComment,
            SwiftSyntaxKind::BlockComment => Self::BlockComment,
            SwiftSyntaxKind::DocLineComment => Self::DocLineComment,
            SwiftSyntaxKind::DocBlockComment => Self::DocBlockComment,
            SwiftSyntaxKind::UnexpectedText => Self::UnexpectedText,
            SwiftSyntaxKind::Backslashes => Self::Backslashes,
            SwiftSyntaxKind::Pounds => Self::Pounds,
            _ => return None,
        };
        Some(trivia)
    }

    /// Name in the `lineComment` / `carriageReturnLineFeeds` convention
    pub const fn name(self) -> &'static str {
        match self {
            Self::Spaces => "spaces",
            Self::Tabs => "tabs",
            Self::VerticalTabs => "verticalTabs",
            Self::Formfeeds => "formfeeds",
            Self::Newlines => "newlines",
            Self::CarriageReturns => "carriageReturns",
            Self::CarriageReturnLineFeeds => "carriageReturnLineFeeds",
            Self::LineComment => "lineComment",
            Self::BlockComment => "blockComment",
            Self::DocLineComment => "docLineComment",
            Self::DocBlockComment => "docBlockComment",
            Self::UnexpectedText => "unexpectedText",
            Self::Backslashes => "backslashes",
            Self::Pounds => "pounds",
        }
    }

    /// Runs repeat one unit; everything else carries free text
    pub const fn is_run(self) -> bool {
        !matches!(
            self,
            Self::LineComment
                | Self::BlockComment
                | Self::DocLineComment
                | Self::DocBlockComment
                | Self::UnexpectedText
        )
    }

    pub const fn is_comment(self) -> bool {
        matches!(
            self,
            Self::LineComment | Self::BlockComment | Self::DocLineComment | Self::DocBlockComment
        )
    }

    pub const fn is_newline(self) -> bool {
        matches!(
            self,
            Self::Newlines | Self::CarriageReturns | Self::CarriageReturnLineFeeds
        )
    }
}

impl fmt::Display for TriviaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One run of trivia
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriviaPiece {
    pub kind: TriviaKind,
    pub text: String,
}

impl TriviaPiece {
    pub fn new(kind: TriviaKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Create from a trivia token, `None` for anything else
    pub fn from_token(token: &SwiftSyntaxToken) -> Option<Self> {
        TriviaKind::from_syntax_kind(token.kind()).map(|kind| Self::new(kind, token.text()))
    }

    /// Number of repeated units in a run
    pub fn count(&self) -> usize {
        match self.kind {
            TriviaKind::CarriageReturnLineFeeds => self.text.len() / 2,
            _ => self.text.chars().count(),
        }
    }

    pub fn is_comment(&self) -> bool {
        self.kind.is_comment()
    }

    pub fn is_newline(&self) -> bool {
        self.kind.is_newline()
    }

    /// Raw description such as `spaces(2)` or `lineComment("// note")`
    pub fn debug_description(&self) -> String {
        if self.kind.is_run() {
            format!("{}({})", self.kind, self.count())
        } else {
            format!("{}({:?})", self.kind, self.text)
        }
    }
}

/// Trivia owned by one non-trivia token
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenTrivia {
    pub leading: Vec<TriviaPiece>,
    pub trailing: Vec<TriviaPiece>,
}

impl TokenTrivia {
    pub fn is_empty(&self) -> bool {
        self.leading.is_empty() && self.trailing.is_empty()
    }

    pub fn has_comments(&self) -> bool {
        self.leading
            .iter()
            .chain(self.trailing.iter())
            .any(TriviaPiece::is_comment)
    }
}

/// Assigns every trivia token of a tree to a neighbouring token
#[derive(Debug, Default)]
pub struct TriviaCollector;

impl TriviaCollector {
    pub fn new() -> Self {
        Self
    }

    /// Trivia for every non-trivia token, in document order
    ///
    /// Entries line up with a pre-order walk that skips trivia. Tokens are
    /// matched by position rather than identity because identical green
    /// tokens are shared.
    pub fn collect(&self, root: &SwiftSyntaxNode) -> Vec<TokenTrivia> {
        let mut result: Vec<TokenTrivia> = Vec::new();
        let mut pending = Vec::new();
        // Index of the present token whose trailing trivia is still open
        let mut trailing_owner: Option<usize> = None;

        for token in root
            .descendants_with_tokens()
            .filter_map(|element| element.into_token())
        {
            if let Some(piece) = TriviaPiece::from_token(&token) {
                match trailing_owner {
                    Some(owner) if !piece.is_newline() => result[owner].trailing.push(piece),
                    _ => {
                        if piece.is_newline() {
                            trailing_owner = None;
                        }
                        pending.push(piece);
                    }
                }
                continue;
            }

            if token.is_missing() {
                result.push(TokenTrivia::default());
                continue;
            }

            result.push(TokenTrivia {
                leading: std::mem::take(&mut pending),
                trailing: Vec::new(),
            });
            trailing_owner = Some(result.len() - 1);
        }

        result
    }
}
