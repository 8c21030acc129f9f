//! Type aliases and helpers for CST nodes
//!
//! These types are built on top of Rowan's generic tree types, parameterized
//! with our SwiftLanguage.

use super::{SwiftLanguage, SwiftSyntaxKind};

/// A node in the concrete syntax tree
///
/// # Example
///
/// ```rust,ignore
/// use treelens_core::cst::{SwiftSyntaxNode, SwiftSyntaxKind};
///
/// fn print_children(node: &SwiftSyntaxNode) {
///     for child in node.children() {
///         println!("Child: {:?}", child.kind());
///     }
/// }
/// ```
pub type SwiftSyntaxNode = rowan::SyntaxNode<SwiftLanguage>;

/// A token (leaf) in the concrete syntax tree, trivia included
pub type SwiftSyntaxToken = rowan::SyntaxToken<SwiftLanguage>;

/// Either a node or a token in the CST
pub type SwiftSyntaxElement = rowan::SyntaxElement<SwiftLanguage>;

pub use rowan::{GreenNode, NodeOrToken, TextRange, TextSize, WalkEvent};

/// Extension trait for tokens with grammar-specific helpers
pub trait SwiftSyntaxTokenExt {
    /// A missing token was inserted by error recovery and has no source text
    fn is_missing(&self) -> bool;
}

impl SwiftSyntaxTokenExt for SwiftSyntaxToken {
    fn is_missing(&self) -> bool {
        self.text().is_empty() && self.kind() != SwiftSyntaxKind::EndOfFile
    }
}

/// Extension trait for nodes with grammar-specific helpers
pub trait SwiftSyntaxNodeExt {
    /// Non-trivia children, nodes and tokens, in source order
    fn significant_children(&self) -> Vec<SwiftSyntaxElement>;
}

impl SwiftSyntaxNodeExt for SwiftSyntaxNode {
    fn significant_children(&self) -> Vec<SwiftSyntaxElement> {
        self.children_with_tokens()
            .filter(|element| !element.kind().is_trivia())
            .collect()
    }}

/// Drop a tree one node at a time
///
/// Green nodes free their children recursively. Releasing every node parent
/// first keeps each drop one level deep, however deep the tree is.
pub fn release_tree(root: SwiftSyntaxNode) {
    let green = root.green().into_owned();
    drop(root);
    release_green(green);
}

/// [`release_tree`] for a bare green node
pub fn release_green(green: GreenNode) {
    let mut pending = vec![green];
    let mut parents_first = Vec::new();
    while let Some(node) = pending.pop() {
        pending.extend(
            node.children()
                .filter_map(|child| child.into_node())
                .map(|child| child.to_owned()),
        );
        parents_first.push(node);
    }
    drop(parents_first);
}
