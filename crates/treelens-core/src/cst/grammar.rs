//! Static grammar catalog
//!
//! Every node kind is registered with a syntax class and a structural shape.
//! Layout shapes list their named child slots in source order; the explorer
//! resolves a node's children against those slots instead of reflecting over
//! typed accessors.

use super::SwiftSyntaxKind;

/// Broad role of a node kind in the language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxClass {
    Declaration,
    Expression,
    Pattern,
    Type,
    Other,
}

/// What may fill a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accepts {
    /// Tokens or nodes of exactly these kinds
    Kinds(&'static [SwiftSyntaxKind]),
    /// Any node of this class
    Class(SyntaxClass),
    /// Any node
    AnyNode,
}

/// A named child position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub name: &'static str,
    pub accepts: Accepts,
}

/// How a node organises its children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeShape {
    /// Fixed named slots in source order, each filled at most once
    Layout(&'static [Slot]),
    /// Homogeneous ordered list of `element`
    Collection { element: &'static str },
    /// Exactly one child, matching one of the alternatives
    Choice(&'static [Slot]),
}

/// Catalog entry for one node kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeInfo {
    pub class: SyntaxClass,
    pub shape: NodeShape,
}

// Slots are built by macros so the slot arrays below stay promotable to `'static`
macro_rules! slot {
    ($name:literal, $kinds:expr) => {
        Slot {
            name: $name,
            accepts: Accepts::Kinds($kinds),
        }
    };
}

macro_rules! class_slot {
    ($name:literal, $class:expr) => {
        Slot {
            name: $name,
            accepts: Accepts::Class($class),
        }
    };
}

const fn layout(class: SyntaxClass, slots: &'static [Slot]) -> NodeInfo {
    NodeInfo {
        class,
        shape: NodeShape::Layout(slots),
    }
}

const fn collection(element: &'static str) -> NodeInfo {
    NodeInfo {
        class: SyntaxClass::Other,
        shape: NodeShape::Collection { element },
    }
}

use self::SyntaxClass::{Declaration, Expression, Other, Pattern, Type};
use super::SwiftSyntaxKind as K;

const TRAILING_COMMA: Slot = slot!("trailingComma", &[K::Comma]);
const PLACEHOLDER: Slot = slot!("placeholder", &[K::Identifier]);

/// Look up the catalog entry for a node kind
///
/// Returns `None` for tokens, trivia, and node kinds nobody registered.
pub fn node_info(kind: SwiftSyntaxKind) -> Option<NodeInfo> {
    let info = match kind {
        // Statements and declarations
        K::SourceFile => layout(
            Other,
            &[
                slot!("statements", &[K::CodeBlockItemList]),
                slot!("endOfFileToken", &[K::EndOfFile]),
            ],
        ),
        K::CodeBlockItemList => collection("CodeBlockItem"),
        K::CodeBlockItem => layout(
            Other,
            &[
                Slot {
                    name: "item",
                    accepts: Accepts::AnyNode,
                },
                slot!("semicolon", &[K::Semicolon]),
            ],
        ),
        K::CodeBlock => layout(
            Other,
            &[
                slot!("leftBrace", &[K::LeftBrace]),
                slot!("statements", &[K::CodeBlockItemList]),
                slot!("rightBrace", &[K::RightBrace]),
            ],
        ),
        K::VariableDecl => layout(
            Declaration,
            &[
                slot!("bindingSpecifier", &[K::LetKw, K::VarKw]),
                slot!("bindings", &[K::PatternBindingList]),
            ],
        ),
        K::PatternBindingList => collection("PatternBinding"),
        K::PatternBinding => layout(
            Other,
            &[
                class_slot!("pattern", Pattern),
                slot!("typeAnnotation", &[K::TypeAnnotation]),
                slot!("initializer", &[K::InitializerClause]),
                TRAILING_COMMA,
            ],
        ),
        K::TypeAnnotation => layout(
            Other,
            &[slot!("colon", &[K::Colon]), class_slot!("type", Type)],
        ),
        K::InitializerClause => layout(
            Other,
            &[slot!("equal", &[K::Equal]), class_slot!("value", Expression)],
        ),
        K::FunctionDecl => layout(
            Declaration,
            &[
                slot!("funcKeyword", &[K::FuncKw]),
                slot!("name", &[K::Identifier]),
                slot!("signature", &[K::FunctionSignature]),
                slot!("body", &[K::CodeBlock]),
            ],
        ),
        K::FunctionSignature => layout(
            Other,
            &[
                slot!("parameterClause", &[K::FunctionParameterClause]),
                slot!("returnClause", &[K::ReturnClause]),
            ],
        ),
        K::FunctionParameterClause => layout(
            Other,
            &[
                slot!("leftParen", &[K::LeftParen]),
                slot!("parameters", &[K::FunctionParameterList]),
                slot!("rightParen", &[K::RightParen]),
            ],
        ),
        K::FunctionParameterList => collection("FunctionParameter"),
        K::FunctionParameter => layout(
            Other,
            &[
                slot!("firstName", &[K::Identifier, K::Wildcard]),
                slot!("secondName", &[K::Identifier]),
                slot!("colon", &[K::Colon]),
                class_slot!("type", Type),
                slot!("defaultValue", &[K::InitializerClause]),
                TRAILING_COMMA,
            ],
        ),
        K::ReturnClause => layout(
            Other,
            &[slot!("arrow", &[K::Arrow]), class_slot!("type", Type)],
        ),
        K::ReturnStmt => layout(
            Other,
            &[
                slot!("returnKeyword", &[K::ReturnKw]),
                class_slot!("expression", Expression),
            ],
        ),
        K::WhileStmt => layout(
            Other,
            &[
                slot!("whileKeyword", &[K::WhileKw]),
                slot!("conditions", &[K::ConditionElementList]),
                slot!("body", &[K::CodeBlock]),
            ],
        ),
        K::IfExpr => layout(
            Expression,
            &[
                slot!("ifKeyword", &[K::IfKw]),
                slot!("conditions", &[K::ConditionElementList]),
                slot!("body", &[K::CodeBlock]),
                slot!("elseKeyword", &[K::ElseKw]),
                slot!("elseBody", &[K::ElseBody]),
            ],
        ),
        K::ConditionElementList => collection("ConditionElement"),
        K::ConditionElement => layout(
            Other,
            &[slot!("condition", &[K::Condition]), TRAILING_COMMA],
        ),
        K::Condition => NodeInfo {
            class: Other,
            shape: NodeShape::Choice(&[
                class_slot!("expression", Expression),
                slot!("optionalBinding", &[K::OptionalBindingCondition]),
            ]),
        },
        K::OptionalBindingCondition => layout(
            Other,
            &[
                slot!("bindingSpecifier", &[K::LetKw, K::VarKw]),
                class_slot!("pattern", Pattern),
                slot!("typeAnnotation", &[K::TypeAnnotation]),
                slot!("initializer", &[K::InitializerClause]),
            ],
        ),
        K::ElseBody => NodeInfo {
            class: Other,
            shape: NodeShape::Choice(&[
                slot!("ifExpr", &[K::IfExpr]),
                slot!("codeBlock", &[K::CodeBlock]),
            ]),
        },

        // Patterns
        K::IdentifierPattern => layout(Pattern, &[slot!("identifier", &[K::Identifier])]),
        K::WildcardPattern => layout(Pattern, &[slot!("wildcard", &[K::Wildcard])]),
        K::TuplePattern => layout(
            Pattern,
            &[
                slot!("leftParen", &[K::LeftParen]),
                slot!("elements", &[K::TuplePatternElementList]),
                slot!("rightParen", &[K::RightParen]),
            ],
        ),
        K::TuplePatternElementList => collection("TuplePatternElement"),
        K::TuplePatternElement => layout(
            Other,
            &[class_slot!("pattern", Pattern), TRAILING_COMMA],
        ),
        K::MissingPattern => layout(Pattern, &[PLACEHOLDER]),

        // Types
        K::IdentifierType => layout(Type, &[slot!("name", &[K::Identifier])]),
        K::ArrayType => layout(
            Type,
            &[
                slot!("leftSquare", &[K::LeftSquare]),
                class_slot!("element", Type),
                slot!("rightSquare", &[K::RightSquare]),
            ],
        ),
        K::MissingType => layout(Type, &[PLACEHOLDER]),

        // Expressions
        K::DeclReferenceExpr => layout(Expression, &[slot!("baseName", &[K::Identifier])]),
        K::IntegerLiteralExpr => layout(Expression, &[slot!("literal", &[K::IntegerLiteral])]),
        K::FloatLiteralExpr => layout(Expression, &[slot!("literal", &[K::FloatLiteral])]),
        K::BooleanLiteralExpr => {
            layout(Expression, &[slot!("literal", &[K::TrueKw, K::FalseKw])])
        }
        K::NilLiteralExpr => layout(Expression, &[slot!("nilKeyword", &[K::NilKw])]),
        K::StringLiteralExpr => layout(
            Expression,
            &[
                slot!("openingQuote", &[K::StringQuote]),
                slot!("segments", &[K::StringLiteralSegmentList]),
                slot!("closingQuote", &[K::StringQuote]),
            ],
        ),
        K::StringLiteralSegmentList => collection("StringSegment"),
        K::StringSegment => layout(Other, &[slot!("content", &[K::StringContent])]),
        K::SequenceExpr => layout(Expression, &[slot!("elements", &[K::ExprList])]),
        K::ExprList => collection("Expr"),
        K::BinaryOperatorExpr => layout(Expression, &[slot!("operator", &[K::BinaryOperator])]),
        K::AssignmentExpr => layout(Expression, &[slot!("equal", &[K::Equal])]),
        K::InfixOperatorExpr => layout(
            Expression,
            &[
                class_slot!("leftOperand", Expression),
                slot!("operator", &[K::BinaryOperatorExpr, K::AssignmentExpr]),
                class_slot!("rightOperand", Expression),
            ],
        ),
        K::PrefixOperatorExpr => layout(
            Expression,
            &[
                slot!("operator", &[K::PrefixOperator]),
                class_slot!("expression", Expression),
            ],
        ),
        K::TupleExpr => layout(
            Expression,
            &[
                slot!("leftParen", &[K::LeftParen]),
                slot!("elements", &[K::LabeledExprList]),
                slot!("rightParen", &[K::RightParen]),
            ],
        ),
        K::LabeledExprList => collection("LabeledExpr"),
        K::LabeledExpr => layout(
            Other,
            &[
                slot!("label", &[K::Identifier]),
                slot!("colon", &[K::Colon]),
                class_slot!("expression", Expression),
                TRAILING_COMMA,
            ],
        ),
        K::FunctionCallExpr => layout(
            Expression,
            &[
                class_slot!("calledExpression", Expression),
                slot!("leftParen", &[K::LeftParen]),
                slot!("arguments", &[K::LabeledExprList]),
                slot!("rightParen", &[K::RightParen]),
            ],
        ),
        K::MemberAccessExpr => layout(
            Expression,
            &[
                class_slot!("base", Expression),
                slot!("period", &[K::Period]),
                slot!("declName", &[K::DeclReferenceExpr]),
            ],
        ),
        K::ArrayExpr => layout(
            Expression,
            &[
                slot!("leftSquare", &[K::LeftSquare]),
                slot!("elements", &[K::ArrayElementList]),
                slot!("rightSquare", &[K::RightSquare]),
            ],
        ),
        K::ArrayElementList => collection("ArrayElement"),
        K::ArrayElement => layout(
            Other,
            &[class_slot!("expression", Expression), TRAILING_COMMA],
        ),
        K::MissingExpr => layout(Expression, &[PLACEHOLDER]),

        K::UnexpectedNodes => collection("Syntax"),

        _ => return None,
    };
    Some(info)
}

/// Syntax class of a node kind, `Other` for anything uncatalogued
pub fn syntax_class(kind: SwiftSyntaxKind) -> SyntaxClass {
    node_info(kind).map_or(SyntaxClass::Other, |info| info.class)
}

impl Accepts {
    /// Check whether an element of `kind` may fill this slot
    pub fn accepts(self, kind: SwiftSyntaxKind) -> bool {
        match self {
            Accepts::Kinds(kinds) => kinds.contains(&kind),
            Accepts::Class(class) => kind.is_node() && syntax_class(kind) == class,
            Accepts::AnyNode => kind.is_node(),
        }
    }
}
