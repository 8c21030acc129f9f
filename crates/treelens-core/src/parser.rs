use std::ops::Range;
use std::sync::Arc;

use crate::Result;
use crate::cst::SwiftSyntaxNode;
use crate::explorer::LineIndex;

/// Outcome of parsing source text.
#[derive(Debug)]
pub struct ParseResult {
    /// Original source that was parsed.
    pub source: Arc<str>,
    /// Parsed CST root node.
    pub cst: SwiftSyntaxNode,
    /// Recovered lexer and parser problems, in source order.
    pub errors: Vec<SyntaxDiagnostic>,
}

impl ParseResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn errors(&self) -> &[SyntaxDiagnostic] {
        &self.errors
    }

    pub fn cst(&self) -> &SwiftSyntaxNode {
        &self.cst
    }
}

/// Stateless parser front end
///
/// Recovery problems never fail a parse; they are returned as diagnostics
/// next to the tree. Only the hard limits of the CST parser produce an error.
#[derive(Debug, Default, Clone, Copy)]
pub struct SwiftParser;

impl SwiftParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse source text (stateless, thread-safe)
    pub fn parse_content(content: &str) -> Result<ParseResult> {
        let source: Arc<str> = Arc::from(content);
        let parse = crate::cst::parse_swift(&source)?;
        let index = LineIndex::new(&source);

        let lexer_errors = parse.lexer_errors.into_iter().map(|error| {
            SyntaxDiagnostic::from_span(&index, error.message, error.span, DiagnosticKind::Lexer)
        });
        let syntax_errors = parse.syntax_errors.into_iter().map(|error| {
            SyntaxDiagnostic::from_span(&index, error.message, error.span, DiagnosticKind::Parser)
        });

        let mut errors: Vec<_> = lexer_errors.chain(syntax_errors).collect();
        errors.sort_by_key(|error| error.span.start);
        tracing::debug!(diagnostics = errors.len(), "parsed {} bytes", source.len());

        Ok(ParseResult {
            source,
            cst: parse.root,
            errors,
        })
    }

    pub fn parse(&self, content: &str) -> Result<ParseResult> {
        Self::parse_content(content)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxDiagnostic {
    pub message: String,
    /// 1-based line
    pub line: usize,
    /// 1-based column in UTF-16 code units
    pub column: usize,
    pub span: Range<usize>,
    pub kind: DiagnosticKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    Lexer,
    Parser,
}

impl SyntaxDiagnostic {
    fn from_span(
        index: &LineIndex<'_>,
        message: String,
        span: Range<usize>,
        kind: DiagnosticKind,
    ) -> Self {
        let position = index.position(span.start);
        Self {
            message,
            line: position.row,
            column: position.column,
            span,
            kind,
        }
    }

    pub fn len(&self) -> usize {
        self.span.end.saturating_sub(self.span.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_source() {
        let result = SwiftParser::parse_content("let x = 1\n").unwrap();
        assert!(result.is_valid());
        assert_eq!(result.cst().text().to_string(), result.source());
    }

    #[test]
    fn test_diagnostics_carry_positions() {
        let result = SwiftParser::new().parse("let a = 1\nf(1").unwrap();
        assert_eq!(result.errors().len(), 1);

        let error = &result.errors()[0];
        assert_eq!(error.message, "expected ')'");
        assert_eq!(error.kind, DiagnosticKind::Parser);
        assert_eq!((error.line, error.column), (2, 4));
        assert!(error.is_empty());
    }

    #[test]
    fn test_lexer_diagnostics() {
        let result = SwiftParser::parse_content("/* open\nlet").unwrap();
        assert_eq!(result.errors()[0].kind, DiagnosticKind::Lexer);
        assert_eq!(result.errors()[0].line, 1);
    }

    #[test]
    fn test_nesting_limit_is_an_error() {
        let source = format!("{}1{}", "(".repeat(500), ")".repeat(500));
        let error = SwiftParser::parse_content(&source).unwrap_err();
        assert_eq!(error.kind(), crate::ErrorKind::Parse);
    }
}
