//! Syntax kind enumeration for the Swift-flavoured CST
//!
//! This module defines every trivia, token and node type that can appear in
//! the syntax tree. Trivia and tokens come first, nodes after them, so range
//! checks on the discriminant classify a kind.

use std::fmt;

macro_rules! syntax_kinds {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        /// Syntax kind for Swift-flavoured language elements
        ///
        /// This enum represents all possible types of nodes and tokens in the CST.
        /// It includes:
        /// - Trivia (whitespace runs, comments, stray text)
        /// - Keywords and punctuation
        /// - Literals, identifiers and operators
        /// - Structural nodes (declarations, expressions, patterns, types, lists)
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(u16)]
        pub enum SwiftSyntaxKind {
            $($(#[$meta])* $name),*
        }

        impl SwiftSyntaxKind {
            /// Every kind, indexed by its raw discriminant
            pub const ALL: &'static [SwiftSyntaxKind] = &[$(SwiftSyntaxKind::$name),*];

            /// Look up a kind from its raw discriminant
            pub fn from_raw(raw: u16) -> Option<Self> {
                Self::ALL.get(raw as usize).copied()
            }
        }
    };
}

syntax_kinds! {
    // ==================
    // Trivia
    // ==================
    /// Run of ' '
    Spaces,
    /// Run of '\t'
    Tabs,
    /// Run of '\u{0B}'
    VerticalTabs,
    /// Run of '\u{0C}'
    Formfeeds,
    /// Run of '\n'
    Newlines,
    /// Run of lone '\r'
    CarriageReturns,
    /// Run of "\r\n"
    CarriageReturnLineFeeds,
    /// `// ...`
    LineComment,
    /// `/* ... */`, nesting allowed
    BlockComment,
    /// `/// ...`
    DocLineComment,
    /// `/** ... */`
    DocBlockComment,
    /// Characters the lexer does not recognise
    UnexpectedText,
    /// Run of '\\'
    Backslashes,
    /// Run of '#'
    Pounds,

    // ==================
    // Keywords
    // ==================
    LetKw,
    VarKw,
    FuncKw,
    ReturnKw,
    IfKw,
    ElseKw,
    WhileKw,
    TrueKw,
    FalseKw,
    NilKw,

    // ==================
    // Punctuation
    // ==================
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftSquare,
    RightSquare,
    Comma,
    Colon,
    Semicolon,
    Period,
    /// "->"
    Arrow,
    /// A lone "=" (initializers and assignment)
    Equal,
    /// "_"
    Wildcard,

    // ==================
    // Literals, identifiers, operators
    // ==================
    Identifier,
    IntegerLiteral,
    FloatLiteral,
    /// '"' opening or closing a string literal
    StringQuote,
    /// Text between the quotes of a string literal
    StringContent,
    /// Operator with balanced whitespace binding, e.g. `a + b` or `a+b`
    BinaryOperator,
    /// Operator bound only to its right operand, e.g. `-x`
    PrefixOperator,
    /// Zero-width token closing every source file
    EndOfFile,

    // ==================
    // Structure nodes
    // ==================
    SourceFile,
    CodeBlockItemList,
    CodeBlockItem,
    CodeBlock,
    VariableDecl,
    PatternBindingList,
    PatternBinding,
    TypeAnnotation,
    InitializerClause,
    FunctionDecl,
    FunctionSignature,
    FunctionParameterClause,
    FunctionParameterList,
    FunctionParameter,
    ReturnClause,
    ReturnStmt,
    WhileStmt,
    IfExpr,
    ConditionElementList,
    ConditionElement,
    /// Choice between an expression and an optional binding
    Condition,
    OptionalBindingCondition,
    /// Choice between a code block and a nested `if`
    ElseBody,

    // Patterns
    IdentifierPattern,
    WildcardPattern,
    TuplePattern,
    TuplePatternElementList,
    TuplePatternElement,
    MissingPattern,

    // Types
    IdentifierType,
    ArrayType,
    MissingType,

    // Expressions
    DeclReferenceExpr,
    IntegerLiteralExpr,
    FloatLiteralExpr,
    BooleanLiteralExpr,
    NilLiteralExpr,
    StringLiteralExpr,
    StringLiteralSegmentList,
    StringSegment,
    /// Unfolded `operand (operator operand)*` run
    SequenceExpr,
    ExprList,
    BinaryOperatorExpr,
    AssignmentExpr,
    /// Produced by operator folding
    InfixOperatorExpr,
    PrefixOperatorExpr,
    TupleExpr,
    LabeledExprList,
    LabeledExpr,
    FunctionCallExpr,
    MemberAccessExpr,
    ArrayExpr,
    ArrayElementList,
    ArrayElement,
    MissingExpr,

    /// Tokens the parser could not place
    UnexpectedNodes,
}

impl SwiftSyntaxKind {
    /// Check if this is a trivia kind (whitespace, comments, stray text)
    pub const fn is_trivia(self) -> bool {
        (self as u16) <= (Self::Pounds as u16)
    }

    /// Check if this is a keyword
    pub const fn is_keyword(self) -> bool {
        (self as u16) >= (Self::LetKw as u16) && (self as u16) <= (Self::NilKw as u16)
    }

    /// Check if this is a token (trivia excluded)
    pub const fn is_token(self) -> bool {
        !self.is_trivia() && (self as u16) < (Self::SourceFile as u16)
    }

    /// Check if this is a structural node
    pub const fn is_node(self) -> bool {
        (self as u16) >= (Self::SourceFile as u16)
    }

    /// Check if this trivia kind ends a line
    pub const fn is_newline(self) -> bool {
        matches!(
            self,
            Self::Newlines | Self::CarriageReturns | Self::CarriageReturnLineFeeds
        )
    }

    /// Map identifier text to its keyword kind
    pub fn from_keyword(text: &str) -> Option<Self> {
        let kind = match text {
            "let" => Self::LetKw,
            "var" => Self::VarKw,
            "func" => Self::FuncKw,
            "return" => Self::ReturnKw,
            "if" => Self::IfKw,
            "else" => Self::ElseKw,
            "while" => Self::WhileKw,
            "true" => Self::TrueKw,
            "false" => Self::FalseKw,
            "nil" => Self::NilKw,
            "_" => Self::Wildcard,
            _ => return None,
        };
        Some(kind)
    }

    /// Canonical text of tokens whose spelling never varies
    ///
    /// Used to display missing tokens, which carry no source text.
    pub const fn fixed_text(self) -> Option<&'static str> {
        match self {
            Self::LetKw => Some("let"),
            Self::VarKw => Some("var"),
            Self::FuncKw => Some("func"),
            Self::ReturnKw => Some("return"),
            Self::IfKw => Some("if"),
            Self::ElseKw => Some("else"),
            Self::WhileKw => Some("while"),
            Self::TrueKw => Some("true"),
            Self::FalseKw => Some("false"),
            Self::NilKw => Some("nil"),
            Self::LeftParen => Some("("),
            Self::RightParen => Some(")"),
            Self::LeftBrace => Some("{"),
            Self::RightBrace => Some("}"),
            Self::LeftSquare => Some("["),
            Self::RightSquare => Some("]"),
            Self::Comma => Some(","),
            Self::Colon => Some(":"),
            Self::Semicolon => Some(";"),
            Self::Period => Some("."),
            Self::Arrow => Some("->"),
            Self::Equal => Some("="),
            Self::Wildcard => Some("_"),
            Self::StringQuote => Some("\""),
            _ => None,
        }
    }

    /// Token kind name in the `leftParen` / `integerLiteral` convention
    pub const fn token_kind_name(self) -> &'static str {
        match self {
            Self::LeftParen => "leftParen",
            Self::RightParen => "rightParen",
            Self::LeftBrace => "leftBrace",
            Self::RightBrace => "rightBrace",
            Self::LeftSquare => "leftSquare",
            Self::RightSquare => "rightSquare",
            Self::Comma => "comma",
            Self::Colon => "colon",
            Self::Semicolon => "semicolon",
            Self::Period => "period",
            Self::Arrow => "arrow",
            Self::Equal => "equal",
            Self::Wildcard => "wildcard",
            Self::Identifier => "identifier",
            Self::IntegerLiteral => "integerLiteral",
            Self::FloatLiteral => "floatLiteral",
            Self::StringQuote => "stringQuote",
            Self::StringContent => "stringSegment",
            Self::BinaryOperator => "binaryOperator",
            Self::PrefixOperator => "prefixOperator",
            Self::EndOfFile => "endOfFile",
            _ if self.is_keyword() => "keyword",
            _ => "unknown",
        }
    }

    /// Describe a token of this kind with the given text, e.g. `keyword(.let)`
    /// or `identifier("x")`
    pub fn describe_token(self, text: &str) -> String {
        if self.is_keyword() {
            let keyword = self.fixed_text().unwrap_or(text);
            return format!("keyword(.{keyword})");
        }

        match self {
            Self::Identifier
            | Self::IntegerLiteral
            | Self::FloatLiteral
            | Self::StringContent
            | Self::BinaryOperator
            | Self::PrefixOperator => format!("{}({text:?})", self.token_kind_name()),
            _ => self.token_kind_name().to_string(),
        }
    }
}

impl fmt::Display for SwiftSyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl From<SwiftSyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SwiftSyntaxKind) -> Self {
        Self(kind as u16)
    }
}
