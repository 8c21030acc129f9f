//! Structural reflection over the grammar catalog
//!
//! A node's non-trivia children are matched against the slots its kind
//! declares. Slots are filled in source order and each takes at most one
//! child, so a single forward pass places every child or proves the catalog
//! wrong.

use thiserror::Error;

use crate::cst::{
    NodeShape, Slot, SwiftSyntaxElement, SwiftSyntaxKind, SwiftSyntaxNode, SwiftSyntaxNodeExt,
    node_info,
};

use super::record::{NodeCategory, StructureProperty};
use super::trivia::TriviaRenderer;

/// Catalog mismatches; these indicate a grammar bug, not bad input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("node kind {kind} has no grammar catalog entry")]
    UnknownKind { kind: SwiftSyntaxKind },

    #[error("{kind} has a {child} child that fits none of its remaining slots")]
    UnplacedChild {
        kind: SwiftSyntaxKind,
        child: SwiftSyntaxKind,
    },

    #[error("{kind} must hold exactly one alternative, found {found:?}")]
    NoAlternative {
        kind: SwiftSyntaxKind,
        found: Vec<SwiftSyntaxKind>,
    },
}

/// Category and structural properties of one node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reflection {
    pub category: NodeCategory,
    pub structure: Vec<StructureProperty>,
}

/// Reflect `node` through its catalog entry
pub fn reflect(
    node: &SwiftSyntaxNode,
    renderer: &TriviaRenderer,
) -> Result<Reflection, StructureError> {
    let kind = node.kind();
    let info = node_info(kind).ok_or(StructureError::UnknownKind { kind })?;
    let children = node.significant_children();

    let (category, structure) = match info.shape {
        NodeShape::Layout(slots) => (
            NodeCategory::from(info.class),
            reflect_layout(kind, slots, &children, renderer)?,
        ),
        NodeShape::Collection { element } => (
            NodeCategory::Collection,
            vec![
                StructureProperty::text("Element", element),
                StructureProperty::text("Count", children.len().to_string()),
            ],
        ),
        NodeShape::Choice(alternatives) => {
            check_choice(kind, alternatives, &children)?;
            (NodeCategory::from(info.class), Vec::new())
        }
    };

    Ok(Reflection {
        category,
        structure,
    })
}

fn reflect_layout(
    kind: SwiftSyntaxKind,
    slots: &[Slot],
    children: &[SwiftSyntaxElement],
    renderer: &TriviaRenderer,
) -> Result<Vec<StructureProperty>, StructureError> {
    let mut remaining = children.iter().peekable();
    let mut properties = Vec::with_capacity(slots.len());

    for slot in slots {
        let Some(child) = remaining.next_if(|child| slot.accepts.accepts(child.kind())) else {
            properties.push(StructureProperty::nil(slot.name));
            continue;
        };

        let property = match child {
            SwiftSyntaxElement::Token(token) => StructureProperty::token(
                slot.name,
                renderer.escape(token.text()),
                renderer.escape(&token.kind().describe_token(token.text())),
            ),
            SwiftSyntaxElement::Node(node) => {
                StructureProperty::node(slot.name, node.kind().to_string())
            }
        };
        properties.push(property);
    }

    match remaining.next() {
        Some(child) => Err(StructureError::UnplacedChild {
            kind,
            child: child.kind(),
        }),
        None => Ok(properties),
    }
}

fn check_choice(
    kind: SwiftSyntaxKind,
    alternatives: &[Slot],
    children: &[SwiftSyntaxElement],
) -> Result<(), StructureError> {
    match children {
        [child]
            if alternatives
                .iter()
                .any(|alternative| alternative.accepts.accepts(child.kind())) =>
        {
            Ok(())
        }
        _ => Err(StructureError::NoAlternative {
            kind,
            found: children.iter().map(|child| child.kind()).collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::{CstBuilder, parse_swift};

    fn find(root: &SwiftSyntaxNode, kind: SwiftSyntaxKind) -> SwiftSyntaxNode {
        root.descendants()
            .find(|node| node.kind() == kind)
            .unwrap_or_else(|| panic!("no {kind} in tree"))
    }

    fn reflect_kind(source: &str, kind: SwiftSyntaxKind) -> Reflection {
        let parse = parse_swift(source).unwrap();
        reflect(&find(&parse.root, kind), &TriviaRenderer::default()).unwrap()
    }

    #[test]
    fn test_layout_slots() {
        let reflection = reflect_kind("let x: Int = 1", SwiftSyntaxKind::PatternBinding);
        assert_eq!(reflection.category, NodeCategory::Other);
        assert_eq!(
            reflection.structure,
            vec![
                StructureProperty::node("pattern", "IdentifierPattern"),
                StructureProperty::node("typeAnnotation", "TypeAnnotation"),
                StructureProperty::node("initializer", "InitializerClause"),
                StructureProperty::nil("trailingComma"),
            ]
        );
    }

    #[test]
    fn test_layout_tokens_carry_kind() {
        let reflection = reflect_kind("let x = 1", SwiftSyntaxKind::VariableDecl);
        assert_eq!(reflection.category, NodeCategory::Declaration);
        assert_eq!(
            reflection.structure[0],
            StructureProperty::token("bindingSpecifier", "let", "keyword(.let)")
        );

        let reflection = reflect_kind("x", SwiftSyntaxKind::DeclReferenceExpr);
        assert_eq!(
            reflection.structure,
            vec![StructureProperty::token(
                "baseName",
                "x",
                "identifier(&quot;x&quot;)"
            )]
        );
    }

    #[test]
    fn test_missing_slots_are_nil() {
        let reflection = reflect_kind("func f() {}", SwiftSyntaxKind::FunctionSignature);
        assert_eq!(
            reflection.structure[1],
            StructureProperty::nil("returnClause")
        );
    }

    #[test]
    fn test_missing_token_fills_its_slot() {
        let reflection = reflect_kind("f(1", SwiftSyntaxKind::FunctionCallExpr);
        assert_eq!(
            reflection.structure[3],
            StructureProperty::token("rightParen", "", "rightParen")
        );
    }

    #[test]
    fn test_collection() {
        let reflection = reflect_kind("f(a, b: 2, c)", SwiftSyntaxKind::LabeledExprList);
        assert_eq!(reflection.category, NodeCategory::Collection);
        assert_eq!(
            reflection.structure,
            vec![
                StructureProperty::text("Element", "LabeledExpr"),
                StructureProperty::text("Count", "3"),
            ]
        );
    }

    #[test]
    fn test_choice_has_no_structure() {
        let reflection = reflect_kind("if let a = b {}", SwiftSyntaxKind::Condition);
        assert_eq!(reflection.category, NodeCategory::Other);
        assert!(reflection.structure.is_empty());
    }

    #[test]
    fn test_escapes_token_text() {
        let reflection = reflect_kind("a && b", SwiftSyntaxKind::BinaryOperatorExpr);
        assert_eq!(
            reflection.structure,
            vec![StructureProperty::token(
                "operator",
                "&amp;&amp;",
                "binaryOperator(&quot;&amp;&amp;&quot;)"
            )]
        );
    }

    #[test]
    fn test_catalog_mismatch_is_reported() {
        let mut builder = CstBuilder::new();
        builder.start_node(SwiftSyntaxKind::IdentifierPattern);
        builder.token(SwiftSyntaxKind::Identifier, "x");
        builder.token(SwiftSyntaxKind::Comma, ",");
        builder.finish_node();
        let node = builder.finish();

        let error = reflect(&node, &TriviaRenderer::default()).unwrap_err();
        assert_eq!(
            error,
            StructureError::UnplacedChild {
                kind: SwiftSyntaxKind::IdentifierPattern,
                child: SwiftSyntaxKind::Comma,
            }
        );
    }

    #[test]
    fn test_empty_choice_is_reported() {
        let mut builder = CstBuilder::new();
        builder.start_node(SwiftSyntaxKind::ElseBody);
        builder.finish_node();
        let node = builder.finish();

        assert!(matches!(
            reflect(&node, &TriviaRenderer::default()),
            Err(StructureError::NoAlternative { .. })
        ));
    }
}
