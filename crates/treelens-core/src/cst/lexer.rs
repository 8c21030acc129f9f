//! CST-aware lexer that preserves all trivia
//!
//! Every byte of the input ends up in exactly one token, so concatenating the
//! token texts reproduces the source. Whitespace runs, comments, stray
//! backslashes/pounds and unrecognised characters are emitted as trivia kinds;
//! the parser later decides which token each trivia piece belongs to.

use crate::cst::SwiftSyntaxKind;
use std::ops::Range;

/// Simple span representing a range in the source
pub type CstSpan = Range<usize>;

/// A lexer error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerError {
    pub message: String,
    pub span: CstSpan,
}

impl LexerError {
    pub fn new(message: impl Into<String>, span: CstSpan) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

/// A token with its syntax kind and span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CstToken {
    pub kind: SwiftSyntaxKind,
    pub text: String,
    pub span: CstSpan,
}

impl CstToken {
    pub fn new(kind: SwiftSyntaxKind, text: impl Into<String>, span: CstSpan) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }
}

/// Result returned by the CST lexer
pub type CstLexResult = (Vec<CstToken>, Vec<LexerError>);

/// Lex input preserving ALL trivia for CST construction
pub fn lex_with_trivia(input: &str) -> CstLexResult {
    let mut lexer = Lexer::new(input);
    lexer.run();
    (lexer.tokens, lexer.errors)
}

struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    tokens: Vec<CstToken>,
    errors: Vec<LexerError>,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn run(&mut self) {
        while let Some((current, size)) = next_char(self.input, self.pos) {
            let start = self.pos;

            match current {
                ' ' => self.lex_run(start, SwiftSyntaxKind::Spaces, |c| c == ' '),
                '\t' => self.lex_run(start, SwiftSyntaxKind::Tabs, |c| c == '\t'),
                '\u{0B}' => self.lex_run(start, SwiftSyntaxKind::VerticalTabs, |c| c == '\u{0B}'),
                '\u{0C}' => self.lex_run(start, SwiftSyntaxKind::Formfeeds, |c| c == '\u{0C}'),
                '\n' => self.lex_run(start, SwiftSyntaxKind::Newlines, |c| c == '\n'),
                '\r' => self.lex_carriage_returns(start),
                '\\' => self.lex_run(start, SwiftSyntaxKind::Backslashes, |c| c == '\\'),
                '#' => self.lex_run(start, SwiftSyntaxKind::Pounds, |c| c == '#'),

                '/' if self.peek_is(start + size, '/') => self.lex_line_comment(start),
                '/' if self.peek_is(start + size, '*') => self.lex_block_comment(start),

                '"' => self.lex_string(start),

                '(' => self.push(SwiftSyntaxKind::LeftParen, start, start + size),
                ')' => self.push(SwiftSyntaxKind::RightParen, start, start + size),
                '{' => self.push(SwiftSyntaxKind::LeftBrace, start, start + size),
                '}' => self.push(SwiftSyntaxKind::RightBrace, start, start + size),
                '[' => self.push(SwiftSyntaxKind::LeftSquare, start, start + size),
                ']' => self.push(SwiftSyntaxKind::RightSquare, start, start + size),
                ',' => self.push(SwiftSyntaxKind::Comma, start, start + size),
                ':' => self.push(SwiftSyntaxKind::Colon, start, start + size),
                ';' => self.push(SwiftSyntaxKind::Semicolon, start, start + size),

                '.' if self.peek_is(start + size, '.') => self.lex_operator(start),
                '.' => self.push(SwiftSyntaxKind::Period, start, start + size),

                c if is_operator_char(c) => self.lex_operator(start),
                c if c.is_ascii_digit() => self.lex_number(start),
                c if is_identifier_start(c) => self.lex_identifier(start),

                _ => self.lex_run(start, SwiftSyntaxKind::UnexpectedText, is_unexpected_char),
            }
        }
    }

    fn push(&mut self, kind: SwiftSyntaxKind, start: usize, end: usize) {
        self.tokens
            .push(CstToken::new(kind, &self.input[start..end], start..end));
        self.pos = end;
    }

    fn peek_is(&self, offset: usize, expected: char) -> bool {
        matches!(next_char(self.input, offset), Some((c, _)) if c == expected)
    }

    /// Consume the longest run of characters accepted by `accept`
    fn scan_while(&self, mut end: usize, accept: impl Fn(char) -> bool) -> usize {
        while let Some((c, size)) = next_char(self.input, end) {
            if !accept(c) {
                break;
            }
            end += size;
        }
        end
    }

    fn lex_run(&mut self, start: usize, kind: SwiftSyntaxKind, accept: impl Fn(char) -> bool) {
        let end = self.scan_while(start, accept);
        // Guarantee progress even if `accept` rejects the first character
        let end = if end == start {
            start + next_char(self.input, start).map_or(1, |(_, size)| size)
        } else {
            end
        };
        self.push(kind, start, end);
    }

    fn lex_carriage_returns(&mut self, start: usize) {
        if self.input[start..].starts_with("\r\n") {
            let mut end = start;
            while self.input[end..].starts_with("\r\n") {
                end += 2;
            }
            self.push(SwiftSyntaxKind::CarriageReturnLineFeeds, start, end);
        } else {
            let mut end = start;
            while self.input[end..].starts_with('\r') && !self.input[end..].starts_with("\r\n") {
                end += 1;
            }
            self.push(SwiftSyntaxKind::CarriageReturns, start, end);
        }
    }

    fn lex_line_comment(&mut self, start: usize) {
        let end = self.scan_while(start, |c| c != '\n' && c != '\r');
        let text = &self.input[start..end];
        let kind = if text.starts_with("///") {
            SwiftSyntaxKind::DocLineComment
        } else {
            SwiftSyntaxKind::LineComment
        };
        self.push(kind, start, end);
    }

    fn lex_block_comment(&mut self, start: usize) {
        // Block comments nest: `/* a /* b */ c */` is one comment
        let mut depth = 0usize;
        let mut end = start;
        let mut terminated = false;

        while end < self.input.len() {
            let rest = &self.input[end..];
            if rest.starts_with("/*") {
                depth += 1;
                end += 2;
            } else if rest.starts_with("*/") {
                depth -= 1;
                end += 2;
                if depth == 0 {
                    terminated = true;
                    break;
                }
            } else {
                end += next_char(self.input, end).map_or(1, |(_, size)| size);
            }
        }

        if !terminated {
            self.errors.push(LexerError::new(
                "unterminated block comment",
                start..end,
            ));
        }

        let text = &self.input[start..end];
        let kind = if text.starts_with("/**") && !text.starts_with("/**/") {
            SwiftSyntaxKind::DocBlockComment
        } else {
            SwiftSyntaxKind::BlockComment
        };
        self.push(kind, start, end);
    }

    fn lex_string(&mut self, start: usize) {
        self.push(SwiftSyntaxKind::StringQuote, start, start + 1);

        let content_start = self.pos;
        let mut end = content_start;
        let mut escaped = false;
        while let Some((c, size)) = next_char(self.input, end) {
            if c == '\n' || c == '\r' || (c == '"' && !escaped) {
                break;
            }
            escaped = c == '\\' && !escaped;
            end += size;
        }

        if end > content_start {
            self.push(SwiftSyntaxKind::StringContent, content_start, end);
        }

        if self.peek_is(end, '"') {
            self.push(SwiftSyntaxKind::StringQuote, end, end + 1);
        } else {
            self.errors.push(LexerError::new(
                "unterminated string literal",
                start..end,
            ));
        }
    }

    fn lex_operator(&mut self, start: usize) {
        let dotted = self.peek_is(start, '.');
        let mut end = start;
        while let Some((c, size)) = next_char(self.input, end) {
            let accepted = is_operator_char(c) || (dotted && c == '.');
            // A comment opener ends the operator
            let comment = c == '/' && (self.peek_is(end + size, '/') || self.peek_is(end + size, '*'));
            if !accepted || comment {
                break;
            }
            end += size;
        }

        let kind = match &self.input[start..end] {
            "=" => SwiftSyntaxKind::Equal,
            "->" => SwiftSyntaxKind::Arrow,
            _ if self.is_prefix_position(start, end) => SwiftSyntaxKind::PrefixOperator,
            _ => SwiftSyntaxKind::BinaryOperator,
        };
        self.push(kind, start, end);
    }

    /// An operator is prefix when it binds to the right but not to the left
    fn is_prefix_position(&self, start: usize, end: usize) -> bool {
        let left_bound = self.input[..start]
            .chars()
            .next_back()
            .is_some_and(|c| !c.is_whitespace() && !matches!(c, '(' | '[' | '{' | ',' | ';' | ':'));

        let rest = &self.input[end..];
        let right_bound = next_char(self.input, end).is_some_and(|(c, _)| {
            !c.is_whitespace() && !matches!(c, ')' | ']' | '}' | ',' | ';' | ':')
        }) && !rest.starts_with("//")
            && !rest.starts_with("/*");

        right_bound && !left_bound
    }

    fn lex_number(&mut self, start: usize) {
        if self.input[start..].starts_with("0x") || self.input[start..].starts_with("0X") {
            let end = self.scan_while(start + 2, |c| c.is_ascii_hexdigit() || c == '_');
            self.push(SwiftSyntaxKind::IntegerLiteral, start, end);
            return;
        }

        let mut end = self.scan_while(start, |c| c.is_ascii_digit() || c == '_');
        let mut kind = SwiftSyntaxKind::IntegerLiteral;

        // A fraction needs a digit after the dot, otherwise `1.description` is member access
        if self.peek_is(end, '.')
            && let Some((c, _)) = next_char(self.input, end + 1)
            && c.is_ascii_digit()
        {
            end = self.scan_while(end + 1, |c| c.is_ascii_digit() || c == '_');
            kind = SwiftSyntaxKind::FloatLiteral;
        }

        if let Some((e, _)) = next_char(self.input, end)
            && (e == 'e' || e == 'E')
        {
            let mut exponent = end + 1;
            if let Some((sign, _)) = next_char(self.input, exponent)
                && (sign == '+' || sign == '-')
            {
                exponent += 1;
            }
            let digits_end = self.scan_while(exponent, |c| c.is_ascii_digit());
            if digits_end > exponent {
                end = digits_end;
                kind = SwiftSyntaxKind::FloatLiteral;
            }
        }

        self.push(kind, start, end);
    }

    fn lex_identifier(&mut self, start: usize) {
        let end = self.scan_while(start, is_identifier_continue);
        let kind = SwiftSyntaxKind::from_keyword(&self.input[start..end])
            .unwrap_or(SwiftSyntaxKind::Identifier);
        self.push(kind, start, end);
    }
}

fn next_char(input: &str, index: usize) -> Option<(char, usize)> {
    input.get(index..)?.chars().next().map(|c| (c, c.len_utf8()))
}

fn is_operator_char(c: char) -> bool {
    matches!(
        c,
        '/' | '=' | '-' | '+' | '!' | '*' | '%' | '<' | '>' | '&' | '|' | '^' | '~' | '?'
    )
}

fn is_identifier_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_identifier_continue(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

/// Characters that start no other token, grouped into one unexpected-text run
fn is_unexpected_char(c: char) -> bool {
    !(c.is_whitespace()
        || c.is_ascii_digit()
        || is_identifier_start(c)
        || is_operator_char(c)
        || matches!(
            c,
            '\\' | '#' | '"' | '(' | ')' | '{' | '}' | '[' | ']' | ',' | ':' | ';' | '.'
        ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<SwiftSyntaxKind> {
        let (tokens, errors) = lex_with_trivia(input);
        assert!(errors.is_empty(), "unexpected lexer errors: {errors:?}");
        tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_lossless() {
        let source = "let x = 1 // one\r\n\tvar y: [Int] = [1, 2]\n/* c /* nested */ */ f(a: \"s\")";
        let (tokens, _) = lex_with_trivia(source);
        let rebuilt: String = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(rebuilt, source);
    }

    #[test]
    fn test_variable_declaration() {
        use SwiftSyntaxKind::*;
        assert_eq!(
            kinds("let x = 1"),
            vec![LetKw, Spaces, Identifier, Spaces, Equal, Spaces, IntegerLiteral]
        );
    }

    #[test]
    fn test_whitespace_runs() {
        use SwiftSyntaxKind::*;
        assert_eq!(
            kinds("  \t\t\n\n\r\n\r\n\r\u{0B}\u{0C}"),
            vec![
                Spaces,
                Tabs,
                Newlines,
                CarriageReturnLineFeeds,
                CarriageReturns,
                VerticalTabs,
                Formfeeds
            ]
        );
    }

    #[test]
    fn test_comment_kinds() {
        use SwiftSyntaxKind::*;
        assert_eq!(kinds("// a"), vec![LineComment]);
        assert_eq!(kinds("/// a"), vec![DocLineComment]);
        assert_eq!(kinds("/* a */"), vec![BlockComment]);
        assert_eq!(kinds("/** a */"), vec![DocBlockComment]);
        assert_eq!(kinds("/**/"), vec![BlockComment]);
        assert_eq!(kinds("/* a /* b */ c */"), vec![BlockComment]);
    }

    #[test]
    fn test_unterminated_block_comment() {
        let (tokens, errors) = lex_with_trivia("/* open");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, SwiftSyntaxKind::BlockComment);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_operators() {
        use SwiftSyntaxKind::*;
        assert_eq!(kinds("a==b"), vec![Identifier, BinaryOperator, Identifier]);
        assert_eq!(kinds("->"), vec![Arrow]);
        assert_eq!(
            kinds("0..<5"),
            vec![IntegerLiteral, BinaryOperator, IntegerLiteral]
        );
        assert_eq!(kinds("a.b"), vec![Identifier, Period, Identifier]);
        assert_eq!(kinds("+// c"), vec![BinaryOperator, LineComment]);
    }

    #[test]
    fn test_operator_binding() {
        use SwiftSyntaxKind::*;
        assert_eq!(kinds("-x"), vec![PrefixOperator, Identifier]);
        assert_eq!(
            kinds("a - b"),
            vec![Identifier, Spaces, BinaryOperator, Spaces, Identifier]
        );
        assert_eq!(
            kinds("a -b"),
            vec![Identifier, Spaces, PrefixOperator, Identifier]
        );
        assert_eq!(
            kinds("f(-1)"),
            vec![Identifier, LeftParen, PrefixOperator, IntegerLiteral, RightParen]
        );
    }

    #[test]
    fn test_numbers() {
        use SwiftSyntaxKind::*;
        assert_eq!(kinds("42"), vec![IntegerLiteral]);
        assert_eq!(kinds("1_000"), vec![IntegerLiteral]);
        assert_eq!(kinds("0xFF"), vec![IntegerLiteral]);
        assert_eq!(kinds("3.14"), vec![FloatLiteral]);
        assert_eq!(kinds("1e10"), vec![FloatLiteral]);
        assert_eq!(kinds("1.x"), vec![IntegerLiteral, Period, Identifier]);
    }

    #[test]
    fn test_strings() {
        use SwiftSyntaxKind::*;
        assert_eq!(kinds("\"hi\""), vec![StringQuote, StringContent, StringQuote]);
        assert_eq!(kinds("\"\""), vec![StringQuote, StringQuote]);
        assert_eq!(
            kinds("\"a\\\"b\""),
            vec![StringQuote, StringContent, StringQuote]
        );

        let (tokens, errors) = lex_with_trivia("\"open\nx");
        assert_eq!(errors.len(), 1);
        assert_eq!(tokens[1].kind, StringContent);
        assert_eq!(tokens[2].kind, Newlines);
    }

    #[test]
    fn test_stray_characters() {
        use SwiftSyntaxKind::*;
        assert_eq!(kinds("\\\\"), vec![Backslashes]);
        assert_eq!(kinds("###"), vec![Pounds]);
        assert_eq!(kinds("@$"), vec![UnexpectedText]);
        assert_eq!(kinds("café"), vec![Identifier]);
    }
}
