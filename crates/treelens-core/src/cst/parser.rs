//! Recursive-descent parser for the Swift-flavoured grammar
//!
//! The parser walks the lossless token stream and builds a rowan green tree.
//! Trivia never starts or ends a node (apart from the root): pending trivia is
//! flushed into the enclosing node right before the next node or token is
//! opened. Recovery never fails the parse:
//! - an absent required token becomes a zero-width token of the expected kind
//! - an absent expression, pattern or type becomes a `Missing*` node
//! - tokens that cannot start a statement are wrapped in `UnexpectedNodes`
//!
//! Only two conditions abort parsing: nesting deeper than
//! [`MAX_NESTING_DEPTH`] and sources that do not fit rowan's 32-bit offsets.

use std::ops::Range;

use rowan::Checkpoint;
use thiserror::Error;

use super::lexer::LexerError;
use super::{CstBuilder, CstToken, SwiftSyntaxKind, SwiftSyntaxNode};

/// Deepest nesting of expressions, patterns, types and blocks the parser accepts
pub const MAX_NESTING_DEPTH: usize = 128;

/// Conditions that make a source unparseable
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("nesting exceeds {limit} levels at byte offset {offset}")]
    NestingTooDeep { limit: usize, offset: usize },

    #[error("source is {size} bytes, larger than the {limit} byte limit")]
    SourceTooLarge { size: usize, limit: usize },
}

/// A recovered syntax problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub span: Range<usize>,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

/// Output of a successful parse
#[derive(Debug, Clone)]
pub struct CstParse {
    pub root: SwiftSyntaxNode,
    pub lexer_errors: Vec<LexerError>,
    pub syntax_errors: Vec<SyntaxError>,
}

/// Parse source text into a lossless CST
///
/// # Example
///
/// ```rust,ignore
/// use treelens_core::cst::parse_swift;
///
/// let parse = parse_swift("let x = 1 // one\n")?;
/// assert!(parse.syntax_errors.is_empty());
/// assert_eq!(parse.root.text().to_string(), "let x = 1 // one\n");
/// ```
pub fn parse_swift(source: &str) -> Result<CstParse, ParseError> {
    let limit = u32::MAX as usize;
    if source.len() > limit {
        return Err(ParseError::SourceTooLarge {
            size: source.len(),
            limit,
        });
    }

    let (tokens, lexer_errors) = super::lex_with_trivia(source);
    let mut parser = Parser::new(&tokens, source.len());
    parser.parse_source_file()?;

    Ok(CstParse {
        root: parser.builder.finish(),
        lexer_errors,
        syntax_errors: parser.errors,
    })
}

/// Token stream parser
struct Parser<'a> {
    tokens: &'a [CstToken],
    pos: usize,
    builder: CstBuilder,
    errors: Vec<SyntaxError>,
    depth: usize,
    /// End offset of the last consumed non-trivia token
    last_end: usize,
    source_len: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [CstToken], source_len: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: CstBuilder::new(),
            errors: Vec::new(),
            depth: 0,
            last_end: 0,
            source_len,
        }
    }

    // ==================
    // Token stream helpers
    // ==================

    /// Index of the `n`th non-trivia token at or after the cursor
    fn nth_index(&self, n: usize) -> Option<usize> {
        self.tokens[self.pos..]
            .iter()
            .enumerate()
            .filter(|(_, token)| !token.kind.is_trivia())
            .nth(n)
            .map(|(offset, _)| self.pos + offset)
    }

    fn nth(&self, n: usize) -> SwiftSyntaxKind {
        self.nth_index(n)
            .map_or(SwiftSyntaxKind::EndOfFile, |index| self.tokens[index].kind)
    }

    fn current(&self) -> SwiftSyntaxKind {
        self.nth(0)
    }

    fn at(&self, kind: SwiftSyntaxKind) -> bool {
        self.current() == kind
    }

    fn at_end(&self) -> bool {
        self.at(SwiftSyntaxKind::EndOfFile)
    }

    fn at_binary_operator(&self) -> bool {
        matches!(
            self.current(),
            SwiftSyntaxKind::BinaryOperator | SwiftSyntaxKind::Equal
        )
    }

    /// The next raw token, trivia included, is `kind`
    fn at_adjacent(&self, kind: SwiftSyntaxKind) -> bool {
        self.tokens.get(self.pos).is_some_and(|token| token.kind == kind)
    }

    /// A newline separates the cursor from the next non-trivia token
    fn at_line_start(&self) -> bool {
        self.tokens[self.pos..]
            .iter()
            .take_while(|token| token.kind.is_trivia())
            .any(|token| token.kind.is_newline())
    }

    fn current_offset(&self) -> usize {
        self.nth_index(0)
            .map_or(self.source_len, |index| self.tokens[index].span.start)
    }

    fn flush_trivia(&mut self) {
        while let Some(token) = self.tokens.get(self.pos) {
            if !token.kind.is_trivia() {
                break;
            }
            self.builder.add_token(token);
            self.pos += 1;
        }
    }

    /// Consume the current non-trivia token, flushing the trivia before it
    fn bump(&mut self) {
        self.flush_trivia();
        if let Some(token) = self.tokens.get(self.pos) {
            self.builder.add_token(token);
            self.last_end = token.span.end;
            self.pos += 1;
        }
    }

    fn expect(&mut self, kind: SwiftSyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            self.missing_token(kind);
            false
        }
    }

    /// Insert a zero-width token of `kind` right after the last consumed token
    fn missing_token(&mut self, kind: SwiftSyntaxKind) {
        let expected = match kind.fixed_text() {
            Some(text) => format!("'{text}'"),
            None => kind.token_kind_name().to_string(),
        };
        self.error(format!("expected {expected}"), self.last_end..self.last_end);
        self.builder.token(kind, "");
    }

    /// Insert a `Missing*` node holding a missing identifier
    fn missing_node(&mut self, kind: SwiftSyntaxKind, expected: &str) {
        self.error(format!("expected {expected}"), self.last_end..self.last_end);
        self.builder.start_node(kind);
        self.builder.token(SwiftSyntaxKind::Identifier, "");
        self.builder.finish_node();
    }

    fn error(&mut self, message: String, span: Range<usize>) {
        tracing::debug!("syntax error at {:?}: {}", span, message);
        self.errors.push(SyntaxError::new(message, span));
    }

    fn start_node(&mut self, kind: SwiftSyntaxKind) {
        self.flush_trivia();
        self.builder.start_node(kind);
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    /// Checkpoint before an expression that a postfix or operator may wrap
    ///
    /// Trivia is flushed first unless the expression will be missing, so a
    /// missing node stays attached to the token before it.
    fn expr_checkpoint(&mut self) -> Checkpoint {
        if can_start_expr(self.current()) {
            self.flush_trivia();
        }
        self.builder.checkpoint()
    }

    fn leaf_node(&mut self, kind: SwiftSyntaxKind) {
        self.start_node(kind);
        self.bump();
        self.finish_node();
    }

    /// Run `parse` one nesting level deeper
    fn nested(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<(), ParseError>,
    ) -> Result<(), ParseError> {
        let outer_depth = self.depth;
        self.descend()?;
        let result = parse(self);
        self.depth = outer_depth;
        result
    }

    /// Take one level of the nesting budget
    fn descend(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
                offset: self.current_offset(),
            });
        }
        self.depth += 1;
        Ok(())
    }

    // ==================
    // Statements
    // ==================

    fn parse_source_file(&mut self) -> Result<(), ParseError> {
        self.builder.start_node(SwiftSyntaxKind::SourceFile);

        self.start_node(SwiftSyntaxKind::CodeBlockItemList);
        while !self.at_end() {
            self.parse_code_block_item(false)?;
        }
        self.finish_node();

        // Trailing trivia of the file becomes leading trivia of the end-of-file token
        self.flush_trivia();
        self.builder.token(SwiftSyntaxKind::EndOfFile, "");

        self.finish_node(); // SOURCE_FILE
        Ok(())
    }

    fn parse_code_block_item(&mut self, in_block: bool) -> Result<(), ParseError> {
        self.start_node(SwiftSyntaxKind::CodeBlockItem);

        match self.current() {
            SwiftSyntaxKind::LetKw | SwiftSyntaxKind::VarKw => self.parse_variable_decl()?,
            SwiftSyntaxKind::FuncKw => self.parse_function_decl()?,
            SwiftSyntaxKind::ReturnKw => self.parse_return_stmt()?,
            SwiftSyntaxKind::WhileKw => self.parse_while_stmt()?,
            kind if can_start_expr(kind) => self.parse_expr()?,
            _ => self.parse_unexpected(in_block),
        }

        if self.at(SwiftSyntaxKind::Semicolon) {
            self.bump();
        }

        self.finish_node();
        Ok(())
    }

    /// Wrap tokens up to the next statement start in an `UnexpectedNodes` node
    fn parse_unexpected(&mut self, in_block: bool) {
        let start = self.current_offset();
        self.start_node(SwiftSyntaxKind::UnexpectedNodes);

        loop {
            self.bump();
            let kind = self.current();
            if kind == SwiftSyntaxKind::EndOfFile
                || can_start_statement(kind)
                || (in_block && kind == SwiftSyntaxKind::RightBrace)
            {
                break;
            }
        }

        self.finish_node();
        self.error("unexpected code".to_string(), start..self.last_end);
    }

    /// Grammar: (let | var) <binding> (, <binding>)*
    fn parse_variable_decl(&mut self) -> Result<(), ParseError> {
        self.start_node(SwiftSyntaxKind::VariableDecl);
        self.bump(); // let | var

        self.start_node(SwiftSyntaxKind::PatternBindingList);
        loop {
            self.start_node(SwiftSyntaxKind::PatternBinding);
            self.parse_pattern()?;
            if self.at(SwiftSyntaxKind::Colon) {
                self.parse_type_annotation()?;
            }
            if self.at(SwiftSyntaxKind::Equal) {
                self.parse_initializer_clause()?;
            }
            let more = self.at(SwiftSyntaxKind::Comma);
            if more {
                self.bump();
            }
            self.finish_node();

            if !more {
                break;
            }
        }
        self.finish_node();

        self.finish_node();
        Ok(())
    }

    fn parse_type_annotation(&mut self) -> Result<(), ParseError> {
        self.start_node(SwiftSyntaxKind::TypeAnnotation);
        self.bump(); // :
        self.parse_type()?;
        self.finish_node();
        Ok(())
    }

    fn parse_initializer_clause(&mut self) -> Result<(), ParseError> {
        self.start_node(SwiftSyntaxKind::InitializerClause);
        self.bump(); // =
        self.parse_expr()?;
        self.finish_node();
        Ok(())
    }

    /// Grammar: func <name> ( <params> ) (-> <type>)? <block>?
    fn parse_function_decl(&mut self) -> Result<(), ParseError> {
        self.start_node(SwiftSyntaxKind::FunctionDecl);
        self.bump(); // func
        self.expect(SwiftSyntaxKind::Identifier);

        self.start_node(SwiftSyntaxKind::FunctionSignature);
        self.parse_parameter_clause()?;
        if self.at(SwiftSyntaxKind::Arrow) {
            self.start_node(SwiftSyntaxKind::ReturnClause);
            self.bump();
            self.parse_type()?;
            self.finish_node();
        }
        self.finish_node();

        if self.at(SwiftSyntaxKind::LeftBrace) {
            self.parse_code_block()?;
        }

        self.finish_node();
        Ok(())
    }

    fn parse_parameter_clause(&mut self) -> Result<(), ParseError> {
        self.start_node(SwiftSyntaxKind::FunctionParameterClause);
        self.expect(SwiftSyntaxKind::LeftParen);

        self.start_node(SwiftSyntaxKind::FunctionParameterList);
        while matches!(
            self.current(),
            SwiftSyntaxKind::Identifier | SwiftSyntaxKind::Wildcard
        ) {
            self.start_node(SwiftSyntaxKind::FunctionParameter);
            self.bump(); // first name
            if self.at(SwiftSyntaxKind::Identifier) {
                self.bump(); // second name
            }
            self.expect(SwiftSyntaxKind::Colon);
            self.parse_type()?;
            if self.at(SwiftSyntaxKind::Equal) {
                self.parse_initializer_clause()?;
            }
            let more = self.at(SwiftSyntaxKind::Comma);
            if more {
                self.bump();
            }
            self.finish_node();

            if !more {
                break;
            }
        }
        self.finish_node();

        self.expect(SwiftSyntaxKind::RightParen);
        self.finish_node();
        Ok(())
    }

    fn parse_code_block(&mut self) -> Result<(), ParseError> {
        self.nested(|p| {
            p.start_node(SwiftSyntaxKind::CodeBlock);
            p.expect(SwiftSyntaxKind::LeftBrace);

            p.start_node(SwiftSyntaxKind::CodeBlockItemList);
            while !p.at(SwiftSyntaxKind::RightBrace) && !p.at_end() {
                p.parse_code_block_item(true)?;
            }
            p.finish_node();

            p.expect(SwiftSyntaxKind::RightBrace);
            p.finish_node();
            Ok(())
        })
    }

    fn parse_return_stmt(&mut self) -> Result<(), ParseError> {
        self.start_node(SwiftSyntaxKind::ReturnStmt);
        self.bump(); // return
        if can_start_expr(self.current()) {
            self.parse_expr()?;
        }
        self.finish_node();
        Ok(())
    }

    fn parse_while_stmt(&mut self) -> Result<(), ParseError> {
        self.start_node(SwiftSyntaxKind::WhileStmt);
        self.bump(); // while
        self.parse_condition_list()?;
        self.parse_code_block()?;
        self.finish_node();
        Ok(())
    }

    /// Grammar: if <conditions> <block> (else (<if> | <block>))?
    fn parse_if_expr(&mut self) -> Result<(), ParseError> {
        self.nested(|p| {
            p.start_node(SwiftSyntaxKind::IfExpr);
            p.bump(); // if
            p.parse_condition_list()?;
            p.parse_code_block()?;

            if p.at(SwiftSyntaxKind::ElseKw) {
                p.bump();
                p.start_node(SwiftSyntaxKind::ElseBody);
                if p.at(SwiftSyntaxKind::IfKw) {
                    p.parse_if_expr()?;
                } else {
                    p.parse_code_block()?;
                }
                p.finish_node();
            }

            p.finish_node();
            Ok(())
        })
    }

    fn parse_condition_list(&mut self) -> Result<(), ParseError> {
        self.start_node(SwiftSyntaxKind::ConditionElementList);
        loop {
            self.start_node(SwiftSyntaxKind::ConditionElement);
            self.start_node(SwiftSyntaxKind::Condition);
            if matches!(
                self.current(),
                SwiftSyntaxKind::LetKw | SwiftSyntaxKind::VarKw
            ) {
                self.start_node(SwiftSyntaxKind::OptionalBindingCondition);
                self.bump(); // let | var
                self.parse_pattern()?;
                if self.at(SwiftSyntaxKind::Colon) {
                    self.parse_type_annotation()?;
                }
                if self.at(SwiftSyntaxKind::Equal) {
                    self.parse_initializer_clause()?;
                }
                self.finish_node();
            } else {
                self.parse_expr()?;
            }
            self.finish_node(); // CONDITION

            let more = self.at(SwiftSyntaxKind::Comma);
            if more {
                self.bump();
            }
            self.finish_node();

            if !more {
                break;
            }
        }
        self.finish_node();
        Ok(())
    }

    // ==================
    // Patterns and types
    // ==================

    fn parse_pattern(&mut self) -> Result<(), ParseError> {
        self.nested(|p| {
            match p.current() {
                SwiftSyntaxKind::Identifier => p.leaf_node(SwiftSyntaxKind::IdentifierPattern),
                SwiftSyntaxKind::Wildcard => p.leaf_node(SwiftSyntaxKind::WildcardPattern),
                SwiftSyntaxKind::LeftParen => p.parse_tuple_pattern()?,
                _ => p.missing_node(SwiftSyntaxKind::MissingPattern, "pattern"),
            }
            Ok(())
        })
    }

    fn parse_tuple_pattern(&mut self) -> Result<(), ParseError> {
        self.start_node(SwiftSyntaxKind::TuplePattern);
        self.bump(); // (

        self.start_node(SwiftSyntaxKind::TuplePatternElementList);
        while !self.at(SwiftSyntaxKind::RightParen) && !self.at_end() {
            self.start_node(SwiftSyntaxKind::TuplePatternElement);
            self.parse_pattern()?;
            let more = self.at(SwiftSyntaxKind::Comma);
            if more {
                self.bump();
            }
            self.finish_node();

            if !more {
                break;
            }
        }
        self.finish_node();

        self.expect(SwiftSyntaxKind::RightParen);
        self.finish_node();
        Ok(())
    }

    fn parse_type(&mut self) -> Result<(), ParseError> {
        self.nested(|p| {
            match p.current() {
                SwiftSyntaxKind::Identifier => p.leaf_node(SwiftSyntaxKind::IdentifierType),
                SwiftSyntaxKind::LeftSquare => {
                    p.start_node(SwiftSyntaxKind::ArrayType);
                    p.bump();
                    p.parse_type()?;
                    p.expect(SwiftSyntaxKind::RightSquare);
                    p.finish_node();
                }
                _ => p.missing_node(SwiftSyntaxKind::MissingType, "type"),
            }
            Ok(())
        })
    }

    // ==================
    // Expressions
    // ==================

    /// Grammar: <unary> (<operator> <unary>)*
    ///
    /// Operator runs stay flat in a `SequenceExpr`; precedence is applied by
    /// the folding pass.
    fn parse_expr(&mut self) -> Result<(), ParseError> {
        self.nested(|p| {
            let checkpoint = p.expr_checkpoint();
            p.parse_unary()?;

            if p.at_binary_operator() {
                p.builder
                    .start_node_at(checkpoint, SwiftSyntaxKind::SequenceExpr);
                p.builder.start_node_at(checkpoint, SwiftSyntaxKind::ExprList);

                while p.at_binary_operator() {
                    let kind = if p.at(SwiftSyntaxKind::Equal) {
                        SwiftSyntaxKind::AssignmentExpr
                    } else {
                        SwiftSyntaxKind::BinaryOperatorExpr
                    };
                    p.leaf_node(kind);
                    p.parse_unary()?;
                }

                p.finish_node(); // EXPR_LIST
                p.finish_node(); // SEQUENCE_EXPR
            }
            Ok(())
        })
    }

    fn parse_unary(&mut self) -> Result<(), ParseError> {
        if self.at(SwiftSyntaxKind::PrefixOperator) {
            self.nested(|p| {
                p.start_node(SwiftSyntaxKind::PrefixOperatorExpr);
                p.bump();
                p.parse_unary()?;
                p.finish_node();
                Ok(())
            })
        } else {
            self.parse_postfix()
        }
    }

    fn parse_postfix(&mut self) -> Result<(), ParseError> {
        let checkpoint = self.expr_checkpoint();
        self.parse_primary()?;

        let outer_depth = self.depth;
        let result = self.parse_postfix_suffixes(checkpoint);
        self.depth = outer_depth;
        result
    }

    /// Calls and member accesses; each one wraps everything before it
    fn parse_postfix_suffixes(&mut self, checkpoint: Checkpoint) -> Result<(), ParseError> {
        loop {
            match self.current() {
                // A call's argument list must start on the callee's line
                SwiftSyntaxKind::LeftParen if !self.at_line_start() => {
                    self.descend()?;
                    self.builder
                        .start_node_at(checkpoint, SwiftSyntaxKind::FunctionCallExpr);
                    self.bump();
                    self.parse_labeled_expr_list()?;
                    self.expect(SwiftSyntaxKind::RightParen);
                    self.finish_node();
                }
                SwiftSyntaxKind::Period => {
                    self.descend()?;
                    self.builder
                        .start_node_at(checkpoint, SwiftSyntaxKind::MemberAccessExpr);
                    self.bump();
                    self.start_node(SwiftSyntaxKind::DeclReferenceExpr);
                    self.expect(SwiftSyntaxKind::Identifier);
                    self.finish_node();
                    self.finish_node();
                }
                _ => break,
            }
        }
        Ok(())
    }

    fn parse_primary(&mut self) -> Result<(), ParseError> {
        match self.current() {
            SwiftSyntaxKind::Identifier => self.leaf_node(SwiftSyntaxKind::DeclReferenceExpr),
            SwiftSyntaxKind::IntegerLiteral => {
                self.leaf_node(SwiftSyntaxKind::IntegerLiteralExpr)
            }
            SwiftSyntaxKind::FloatLiteral => self.leaf_node(SwiftSyntaxKind::FloatLiteralExpr),
            SwiftSyntaxKind::TrueKw | SwiftSyntaxKind::FalseKw => {
                self.leaf_node(SwiftSyntaxKind::BooleanLiteralExpr)
            }
            SwiftSyntaxKind::NilKw => self.leaf_node(SwiftSyntaxKind::NilLiteralExpr),
            SwiftSyntaxKind::StringQuote => self.parse_string_literal(),
            SwiftSyntaxKind::LeftParen => self.parse_tuple_expr()?,
            SwiftSyntaxKind::LeftSquare => self.parse_array_expr()?,
            SwiftSyntaxKind::IfKw => self.parse_if_expr()?,
            _ => self.missing_node(SwiftSyntaxKind::MissingExpr, "expression"),
        }
        Ok(())
    }

    fn parse_string_literal(&mut self) {
        self.start_node(SwiftSyntaxKind::StringLiteralExpr);
        self.bump(); // opening quote

        self.start_node(SwiftSyntaxKind::StringLiteralSegmentList);
        if self.at_adjacent(SwiftSyntaxKind::StringContent) {
            self.leaf_node(SwiftSyntaxKind::StringSegment);
        }
        self.finish_node();

        if self.at_adjacent(SwiftSyntaxKind::StringQuote) {
            self.bump();
        } else {
            self.missing_token(SwiftSyntaxKind::StringQuote);
        }
        self.finish_node();
    }

    fn parse_tuple_expr(&mut self) -> Result<(), ParseError> {
        self.nested(|p| {
            p.start_node(SwiftSyntaxKind::TupleExpr);
            p.bump(); // (
            p.parse_labeled_expr_list()?;
            p.expect(SwiftSyntaxKind::RightParen);
            p.finish_node();
            Ok(())
        })
    }

    /// Grammar: (<label> :)? <expr> (, (<label> :)? <expr>)*
    fn parse_labeled_expr_list(&mut self) -> Result<(), ParseError> {
        self.start_node(SwiftSyntaxKind::LabeledExprList);
        while can_start_expr(self.current()) {
            self.start_node(SwiftSyntaxKind::LabeledExpr);
            if self.at(SwiftSyntaxKind::Identifier) && self.nth(1) == SwiftSyntaxKind::Colon {
                self.bump(); // label
                self.bump(); // :
            }
            self.parse_expr()?;
            let more = self.at(SwiftSyntaxKind::Comma);
            if more {
                self.bump();
            }
            self.finish_node();

            if !more {
                break;
            }
        }
        self.finish_node();
        Ok(())
    }

    fn parse_array_expr(&mut self) -> Result<(), ParseError> {
        self.nested(|p| {
            p.start_node(SwiftSyntaxKind::ArrayExpr);
            p.bump(); // [

            p.start_node(SwiftSyntaxKind::ArrayElementList);
            while can_start_expr(p.current()) {
                p.start_node(SwiftSyntaxKind::ArrayElement);
                p.parse_expr()?;
                let more = p.at(SwiftSyntaxKind::Comma);
                if more {
                    p.bump();
                }
                p.finish_node();

                if !more {
                    break;
                }
            }
            p.finish_node();

            p.expect(SwiftSyntaxKind::RightSquare);
            p.finish_node();
            Ok(())
        })
    }
}

fn can_start_expr(kind: SwiftSyntaxKind) -> bool {
    matches!(
        kind,
        SwiftSyntaxKind::Identifier
            | SwiftSyntaxKind::IntegerLiteral
            | SwiftSyntaxKind::FloatLiteral
            | SwiftSyntaxKind::StringQuote
            | SwiftSyntaxKind::TrueKw
            | SwiftSyntaxKind::FalseKw
            | SwiftSyntaxKind::NilKw
            | SwiftSyntaxKind::LeftParen
            | SwiftSyntaxKind::LeftSquare
            | SwiftSyntaxKind::PrefixOperator
            | SwiftSyntaxKind::IfKw
    )
}

fn can_start_statement(kind: SwiftSyntaxKind) -> bool {
    can_start_expr(kind)
        || matches!(
            kind,
            SwiftSyntaxKind::LetKw
                | SwiftSyntaxKind::VarKw
                | SwiftSyntaxKind::FuncKw
                | SwiftSyntaxKind::ReturnKw
                | SwiftSyntaxKind::WhileKw
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> CstParse {
        parse_swift(source).expect("source should parse")
    }

    fn node_kinds(root: &SwiftSyntaxNode) -> Vec<SwiftSyntaxKind> {
        root.descendants().map(|node| node.kind()).collect()
    }

    #[test]
    fn test_lossless_round_trip() {
        let sources = [
            "",
            "let x = 1",
            "  // leading\nlet x: Int = 1 // trailing\n",
            "func add(_ a: Int, to b: Int = 0) -> Int {\n  return a + b\n}\n",
            "if let y = f(x: 1) { y } else if z { } else { print(\"no\") }",
            "while i < 10 { i += 1 }\r\n",
            "let (a, _) = ([1, 2], nil) /* block */",
            "let s = \"unterminated\nlet t = 2",
            ") garbage \\ ## let ok = true",
        ];

        for source in sources {
            let parse = parse(source);
            assert_eq!(parse.root.text().to_string(), source, "source: {source:?}");
        }
    }

    #[test]
    fn test_variable_decl_shape() {
        let parse = parse("let x = 1");
        assert!(parse.syntax_errors.is_empty());

        use SwiftSyntaxKind::*;
        assert_eq!(
            node_kinds(&parse.root),
            vec![
                SourceFile,
                CodeBlockItemList,
                CodeBlockItem,
                VariableDecl,
                PatternBindingList,
                PatternBinding,
                IdentifierPattern,
                InitializerClause,
                IntegerLiteralExpr,
            ]
        );
    }

    #[test]
    fn test_sequence_expression_is_flat() {
        let parse = parse("a + b * c");
        let sequence = parse
            .root
            .descendants()
            .find(|node| node.kind() == SwiftSyntaxKind::SequenceExpr)
            .expect("sequence expression");
        let list = sequence.first_child().expect("expression list");
        assert_eq!(list.kind(), SwiftSyntaxKind::ExprList);
        assert_eq!(list.children().count(), 5);
    }

    #[test]
    fn test_prefix_operator_is_not_binary() {
        let parse = parse("a\n-b");
        let items: Vec<_> = parse
            .root
            .descendants()
            .filter(|node| node.kind() == SwiftSyntaxKind::CodeBlockItem)
            .collect();
        assert_eq!(items.len(), 2);
        assert!(
            parse
                .root
                .descendants()
                .any(|node| node.kind() == SwiftSyntaxKind::PrefixOperatorExpr)
        );
    }

    #[test]
    fn test_call_and_member_access() {
        let parse = parse("a.b(c: 1, 2)");
        use SwiftSyntaxKind::*;
        let kinds = node_kinds(&parse.root);
        assert!(kinds.contains(&FunctionCallExpr));
        assert!(kinds.contains(&MemberAccessExpr));
        assert_eq!(kinds.iter().filter(|k| **k == LabeledExpr).count(), 2);
    }

    #[test]
    fn test_missing_token_recovery() {
        let parse = parse("f(1");
        assert_eq!(parse.syntax_errors.len(), 1);
        assert_eq!(parse.syntax_errors[0].message, "expected ')'");

        let missing = parse
            .root
            .descendants_with_tokens()
            .filter_map(|element| element.into_token())
            .find(|token| token.kind() == SwiftSyntaxKind::RightParen)
            .expect("missing right paren");
        assert_eq!(missing.text(), "");
    }

    #[test]
    fn test_missing_expression_recovery() {
        let parse = parse("let x = ");
        assert!(
            parse
                .root
                .descendants()
                .any(|node| node.kind() == SwiftSyntaxKind::MissingExpr)
        );
        assert_eq!(parse.syntax_errors[0].message, "expected expression");
        assert_eq!(parse.syntax_errors[0].span, 7..7);
    }

    #[test]
    fn test_unexpected_tokens_are_wrapped() {
        let parse = parse(") ] let x = 1");
        let unexpected = parse
            .root
            .descendants()
            .find(|node| node.kind() == SwiftSyntaxKind::UnexpectedNodes)
            .expect("unexpected nodes");
        assert_eq!(unexpected.text().to_string(), ") ]");
        assert!(
            parse
                .root
                .descendants()
                .any(|node| node.kind() == SwiftSyntaxKind::VariableDecl)
        );
    }

    #[test]
    fn test_nodes_do_not_start_with_trivia() {
        let parse = parse("  let x = [ 1 ,  2 ]  // done\nlet y = a + b . c ( 1 )\n");
        for node in parse.root.descendants().skip(1) {
            if let Some(first) = node.first_child_or_token() {
                assert!(!first.kind().is_trivia(), "{:?} starts with trivia", node.kind());
            }
        }
    }

    #[test]
    fn test_nesting_limit() {
        let source = format!("{}1{}", "(".repeat(500), ")".repeat(500));
        let error = parse_swift(&source).unwrap_err();
        assert!(matches!(
            error,
            ParseError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
                ..
            }
        ));
    }

    #[test]
    fn test_call_chain_counts_toward_nesting_limit() {
        let source = format!("f{}", "()".repeat(20_000));
        let error = parse_swift(&source).unwrap_err();
        assert!(matches!(
            error,
            ParseError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
                ..
            }
        ));
    }

    #[test]
    fn test_member_chain_counts_toward_nesting_limit() {
        let source = format!("a{}", ".b".repeat(5_000));
        assert!(matches!(
            parse_swift(&source),
            Err(ParseError::NestingTooDeep { .. })
        ));

        let source = format!("a{}", ".b".repeat(100));
        let parse = parse_swift(&source).unwrap();
        let depth = parse
            .root
            .descendants()
            .filter(|node| node.kind() == SwiftSyntaxKind::MemberAccessExpr)
            .count();
        assert_eq!(depth, 100);
    }

    #[test]
    fn test_moderate_nesting_is_accepted() {
        let source = format!("{}1{}", "(".repeat(20), ")".repeat(20));
        assert!(parse_swift(&source).is_ok());
    }
}
