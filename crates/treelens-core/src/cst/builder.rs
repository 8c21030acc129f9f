//! Thin typed wrapper over rowan's `GreenNodeBuilder`

use rowan::{Checkpoint, GreenNode, GreenNodeBuilder};

use super::{CstToken, SwiftSyntaxKind, SwiftSyntaxNode};

/// Builds a green tree using `SwiftSyntaxKind` instead of raw rowan kinds
#[derive(Default)]
pub struct CstBuilder {
    inner: GreenNodeBuilder<'static>,
}

impl CstBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_node(&mut self, kind: SwiftSyntaxKind) {
        self.inner.start_node(kind.into());
    }

    pub fn finish_node(&mut self) {
        self.inner.finish_node();
    }

    pub fn checkpoint(&self) -> Checkpoint {
        self.inner.checkpoint()
    }

    /// Wrap everything added since `checkpoint` into a node of `kind`
    pub fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SwiftSyntaxKind) {
        self.inner.start_node_at(checkpoint, kind.into());
    }

    pub fn token(&mut self, kind: SwiftSyntaxKind, text: &str) {
        self.inner.token(kind.into(), text);
    }

    /// Add a lexed token, keeping its original kind
    pub fn add_token(&mut self, token: &CstToken) {
        self.token(token.kind, &token.text);
    }

    pub fn finish_green(self) -> GreenNode {
        self.inner.finish()
    }

    pub fn finish(self) -> SwiftSyntaxNode {
        SwiftSyntaxNode::new_root(self.finish_green())
    }
}
