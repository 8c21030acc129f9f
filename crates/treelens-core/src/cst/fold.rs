//! Operator precedence folding
//!
//! The parser leaves binary operator runs flat:
//!
//! ```text
//! SequenceExpr
//!   ExprList
//!     DeclReferenceExpr(a) BinaryOperatorExpr(+) DeclReferenceExpr(b) BinaryOperatorExpr(*) ...
//! ```
//!
//! Folding rebuilds the green tree with every `SequenceExpr` replaced by nested
//! `InfixOperatorExpr` nodes. Trivia moves along with the element it precedes,
//! so the folded tree still reproduces the source text exactly.

use rowan::{GreenNode, GreenToken, NodeOrToken};
use thiserror::Error;

use super::{SwiftSyntaxElement, SwiftSyntaxKind, SwiftSyntaxNode};

type GreenElement = NodeOrToken<GreenNode, GreenToken>;

/// Errors raised while folding operator sequences
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FoldError {
    #[error("unknown infix operator '{operator}' at byte offset {offset}")]
    UnknownOperator { operator: String, offset: usize },

    #[error("adjacent non-associative operators '{operator}' at byte offset {offset}")]
    NonAssociative { operator: String, offset: usize },
}

/// How operators of equal precedence group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
    None,
}

/// A named precedence level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrecedenceGroup {
    pub name: &'static str,
    /// Higher binds tighter
    pub precedence: u8,
    pub associativity: Associativity,
    pub operators: &'static [&'static str],
}

/// Standard precedence groups, tightest first
pub const PRECEDENCE_GROUPS: &[PrecedenceGroup] = &[
    PrecedenceGroup {
        name: "BitwiseShiftPrecedence",
        precedence: 9,
        associativity: Associativity::None,
        operators: &["<<", ">>", "&<<", "&>>"],
    },
    PrecedenceGroup {
        name: "MultiplicationPrecedence",
        precedence: 8,
        associativity: Associativity::Left,
        operators: &["*", "/", "%", "&*", "&"],
    },
    PrecedenceGroup {
        name: "AdditionPrecedence",
        precedence: 7,
        associativity: Associativity::Left,
        operators: &["+", "-", "&+", "&-", "|", "^"],
    },
    PrecedenceGroup {
        name: "RangeFormationPrecedence",
        precedence: 6,
        associativity: Associativity::None,
        operators: &["...", "..<"],
    },
    PrecedenceGroup {
        name: "NilCoalescingPrecedence",
        precedence: 5,
        associativity: Associativity::Right,
        operators: &["??"],
    },
    PrecedenceGroup {
        name: "ComparisonPrecedence",
        precedence: 4,
        associativity: Associativity::None,
        operators: &["==", "!=", "<", "<=", ">", ">=", "===", "!==", "~="],
    },
    PrecedenceGroup {
        name: "LogicalConjunctionPrecedence",
        precedence: 3,
        associativity: Associativity::Left,
        operators: &["&&"],
    },
    PrecedenceGroup {
        name: "LogicalDisjunctionPrecedence",
        precedence: 2,
        associativity: Associativity::Left,
        operators: &["||"],
    },
    PrecedenceGroup {
        name: "AssignmentPrecedence",
        precedence: 1,
        associativity: Associativity::Right,
        operators: &[
            "=", "*=", "/=", "%=", "+=", "-=", "<<=", ">>=", "&=", "|=", "^=",
        ],
    },
];

/// Find the precedence group declaring `operator`
pub fn precedence_group(operator: &str) -> Option<&'static PrecedenceGroup> {
    PRECEDENCE_GROUPS
        .iter()
        .find(|group| group.operators.contains(&operator))
}

/// Fold every operator sequence in the tree
///
/// Every sequence is checked before any is rebuilt, so a failure leaves no
/// partly folded tree behind.
pub fn fold_operators(root: &SwiftSyntaxNode) -> Result<SwiftSyntaxNode, FoldError> {
    for sequence in root
        .descendants()
        .filter(|node| node.kind() == SwiftSyntaxKind::SequenceExpr)
    {
        check_sequence(&sequence)?;
    }

    let green = fold_node(root).unwrap_or_else(|| root.green().into_owned());
    Ok(SwiftSyntaxNode::new_root(green))
}

/// Rebuild `node` if anything below it folds; `None` keeps the shared green node
fn fold_node(node: &SwiftSyntaxNode) -> Option<GreenNode> {
    let mut changed = false;
    let mut children = Vec::new();
    for child in node.children_with_tokens() {
        match child {
            NodeOrToken::Node(child) => {
                let folded = if child.kind() == SwiftSyntaxKind::SequenceExpr {
                    fold_sequence(&child)
                } else {
                    fold_node(&child).map(|green| vec![NodeOrToken::Node(green)])
                };
                match folded {
                    Some(elements) => {
                        changed = true;
                        children.extend(elements);
                    }
                    None => children.push(NodeOrToken::Node(child.green().into_owned())),
                }
            }
            NodeOrToken::Token(token) => {
                children.push(NodeOrToken::Token(token.green().to_owned()));
            }
        }
    }

    changed.then(|| GreenNode::new(node.kind().into(), children))
}

fn is_operator(node: &SwiftSyntaxNode) -> bool {
    matches!(
        node.kind(),
        SwiftSyntaxKind::BinaryOperatorExpr | SwiftSyntaxKind::AssignmentExpr
    )
}

/// Sequence children with the expression list flattened, trivia included
fn sequence_elements(sequence: &SwiftSyntaxNode) -> Vec<SwiftSyntaxElement> {
    sequence
        .children_with_tokens()
        .flat_map(|child| match child {
            NodeOrToken::Node(list) if list.kind() == SwiftSyntaxKind::ExprList => {
                list.children_with_tokens().collect::<Vec<_>>()
            }
            other => vec![other],
        })
        .collect()
}

/// Operands and operators take turns, starting and ending with an operand
fn alternates(elements: &[SwiftSyntaxElement]) -> bool {
    let nodes: Vec<_> = elements.iter().filter_map(|element| element.as_node()).collect();
    nodes.len() % 2 == 1
        && nodes
            .iter()
            .enumerate()
            .all(|(index, node)| is_operator(node) == (index % 2 == 1))
}

fn operator_group(node: &SwiftSyntaxNode) -> Result<&'static PrecedenceGroup, FoldError> {
    let text = node.text().to_string();
    let text = text.trim();
    precedence_group(text).ok_or_else(|| FoldError::UnknownOperator {
        operator: text.to_string(),
        offset: usize::from(node.text_range().start()),
    })
}

/// Whether an operator already on the stack applies before `incoming`
fn reduces_before(top: &PrecedenceGroup, incoming: &PrecedenceGroup) -> bool {
    top.precedence > incoming.precedence
        || (top.precedence == incoming.precedence
            && incoming.associativity != Associativity::Right)
}

/// Run the operator stack over precedences alone, reporting what cannot fold
fn check_sequence(sequence: &SwiftSyntaxNode) -> Result<(), FoldError> {
    let elements = sequence_elements(sequence);
    if !alternates(&elements) {
        return Ok(());
    }

    let mut stack: Vec<&'static PrecedenceGroup> = Vec::new();
    for node in elements.iter().filter_map(|element| element.as_node()) {
        if !is_operator(node) {
            continue;
        }
        let group = operator_group(node)?;
        while let Some(&top) = stack.last() {
            if top.precedence == group.precedence && group.associativity == Associativity::None {
                let text = node.text().to_string();
                return Err(FoldError::NonAssociative {
                    operator: text.trim().to_string(),
                    offset: usize::from(node.text_range().start()),
                });
            }
            if !reduces_before(top, group) {
                break;
            }
            stack.pop();
        }
        stack.push(group);
    }
    Ok(())
}

/// An element of an expression list with the trivia in front of it
struct Unit {
    trivia: Vec<GreenToken>,
    node: GreenNode,
}

struct Operator {
    unit: Unit,
    group: &'static PrecedenceGroup,
}

/// Fold one checked sequence; `None` leaves it as parsed
fn fold_sequence(sequence: &SwiftSyntaxNode) -> Option<Vec<GreenElement>> {
    let elements = sequence_elements(sequence);
    if !alternates(&elements) {
        return None;
    }

    let mut operands: Vec<Unit> = Vec::new();
    let mut operators: Vec<Operator> = Vec::new();
    let mut trivia = Vec::new();

    for element in elements {
        match element {
            NodeOrToken::Token(token) => trivia.push(token.green().to_owned()),
            NodeOrToken::Node(node) if is_operator(&node) => {
                let group = operator_group(&node).ok()?;
                while operators
                    .last()
                    .is_some_and(|top| reduces_before(top.group, group))
                {
                    reduce(&mut operands, &mut operators);
                }
                operators.push(Operator {
                    unit: Unit {
                        trivia: std::mem::take(&mut trivia),
                        node: node.green().into_owned(),
                    },
                    group,
                });
            }
            NodeOrToken::Node(node) => operands.push(Unit {
                trivia: std::mem::take(&mut trivia),
                node: fold_node(&node).unwrap_or_else(|| node.green().into_owned()),
            }),
        }
    }
    while !operators.is_empty() {
        reduce(&mut operands, &mut operators);
    }

    let folded = operands.pop()?;
    let mut result: Vec<GreenElement> =
        folded.trivia.into_iter().map(NodeOrToken::Token).collect();
    result.push(NodeOrToken::Node(folded.node));
    // Trivia after the last operand follows the folded node
    result.extend(trivia.into_iter().map(NodeOrToken::Token));
    Some(result)
}

/// Combine the top operator with its two operands into an infix node
fn reduce(operands: &mut Vec<Unit>, operators: &mut Vec<Operator>) {
    // Alternation leaves two operands for every pending operator
    let (Some(operator), Some(right), Some(left)) =
        (operators.pop(), operands.pop(), operands.pop())
    else {
        return;
    };

    // The left operand's leading trivia stays outside the new node
    let mut children: Vec<GreenElement> = vec![NodeOrToken::Node(left.node)];
    for unit in [operator.unit, right] {
        children.extend(unit.trivia.into_iter().map(NodeOrToken::Token));
        children.push(NodeOrToken::Node(unit.node));
    }

    operands.push(Unit {
        trivia: left.trivia,
        node: GreenNode::new(SwiftSyntaxKind::InfixOperatorExpr.into(), children),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::parse_swift;

    fn fold(source: &str) -> Result<SwiftSyntaxNode, FoldError> {
        let parse = parse_swift(source).unwrap();
        fold_operators(&parse.root)
    }

    /// Render infix nodes as nested parentheses
    fn shape(node: &SwiftSyntaxNode) -> String {
        if node.kind() == SwiftSyntaxKind::InfixOperatorExpr {
            let parts: Vec<String> = node.children().map(|child| shape(&child)).collect();
            format!("({})", parts.join(" "))
        } else {
            node.text().to_string().trim().to_string()
        }
    }

    fn folded_expression(source: &str) -> String {
        let root = fold(source).unwrap();
        let infix = root
            .descendants()
            .find(|node| node.kind() == SwiftSyntaxKind::InfixOperatorExpr)
            .expect("infix expression");
        shape(&infix)
    }

    #[test]
    fn test_multiplication_binds_tighter() {
        assert_eq!(folded_expression("a + b * c"), "(a + (b * c))");
        assert_eq!(folded_expression("a * b + c"), "((a * b) + c)");
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(folded_expression("a - b - c"), "((a - b) - c)");
    }

    #[test]
    fn test_right_associativity() {
        assert_eq!(folded_expression("a = b = c"), "(a = (b = c))");
        assert_eq!(folded_expression("a ?? b ?? c"), "(a ?? (b ?? c))");
    }

    #[test]
    fn test_assignment_is_loosest() {
        assert_eq!(
            folded_expression("x = a < b && c || d"),
            "(x = (((a < b) && c) || d))"
        );
    }

    #[test]
    fn test_folding_is_lossless() {
        let source = "let v = a /* one */ +\n  b * c // done\nx += 1";
        let root = fold(source).unwrap();
        assert_eq!(root.text().to_string(), source);
        assert!(
            !root
                .descendants()
                .any(|node| node.kind() == SwiftSyntaxKind::SequenceExpr)
        );
    }

    #[test]
    fn test_nested_sequences_are_folded() {
        let root = fold("f(a + b, [c * d])").unwrap();
        let infix_count = root
            .descendants()
            .filter(|node| node.kind() == SwiftSyntaxKind::InfixOperatorExpr)
            .count();
        assert_eq!(infix_count, 2);
    }

    #[test]
    fn test_unknown_operator() {
        let error = fold("a <> b").unwrap_err();
        assert_eq!(
            error,
            FoldError::UnknownOperator {
                operator: "<>".to_string(),
                offset: 2
            }
        );
    }

    #[test]
    fn test_non_associative_chain() {
        let error = fold("a < b < c").unwrap_err();
        assert!(matches!(error, FoldError::NonAssociative { ref operator, .. } if operator == "<"));
    }

    #[test]
    fn test_long_sequence_folds_without_recursion() {
        let source = format!("let total = a{}", " + a".repeat(50_000));
        let root = fold(&source).unwrap();

        let infix = root
            .descendants()
            .filter(|node| node.kind() == SwiftSyntaxKind::InfixOperatorExpr)
            .count();
        assert_eq!(infix, 50_000);
        assert_eq!(usize::from(root.text().len()), source.len());

        // Left associative: the outermost node ends the sequence, its left operand is the rest
        let outer = root
            .descendants()
            .find(|node| node.kind() == SwiftSyntaxKind::InfixOperatorExpr)
            .unwrap();
        assert_eq!(
            outer.first_child().map(|node| node.kind()),
            Some(SwiftSyntaxKind::InfixOperatorExpr)
        );
        crate::cst::release_tree(root);
    }

    #[test]
    fn test_mixed_precedence_long_sequence() {
        let source = format!("a{}", " * b + c".repeat(2_000));
        let root = fold(&source).unwrap();
        assert_eq!(root.text().to_string(), source);
        assert!(
            !root
                .descendants()
                .any(|node| node.kind() == SwiftSyntaxKind::SequenceExpr)
        );
        crate::cst::release_tree(root);
    }

    #[test]
    fn test_failure_after_long_prefix() {
        let source = format!("x{} < y < z", " + a".repeat(10_000));
        let error = fold(&source).unwrap_err();
        assert!(matches!(error, FoldError::NonAssociative { ref operator, .. } if operator == "<"));
    }

    #[test]
    fn test_precedence_lookup() {
        assert_eq!(
            precedence_group("+").map(|group| group.name),
            Some("AdditionPrecedence")
        );
        assert!(precedence_group("<>").is_none());
    }
}
