//! Tree assembly
//!
//! Walks the CST in pre-order, tokens included, and produces one
//! [`NodeRecord`] per node or token. Trivia tokens are not visited; their
//! text reaches the output as the rendered trivia of neighbouring tokens.

use tracing::debug;

use crate::cst::{
    NodeOrToken, SwiftSyntaxNode, SwiftSyntaxToken, SwiftSyntaxTokenExt, TokenTrivia,
    TriviaCollector, WalkEvent,
};

use super::position::LineIndex;
use super::record::{NodeCategory, NodeRecord, SourceRange, TokenInfo};
use super::structure::reflect;
use super::trivia::{DEFAULT_TAB_WIDTH, TriviaRenderer};

/// Turns a syntax tree over `source` into an ordered, parent-linked node list
#[derive(Debug, Clone)]
pub struct TreeAssembler<'a> {
    line_index: LineIndex<'a>,
    renderer: TriviaRenderer,
    show_missing_tokens: bool,
}

/// Mutable state of one walk
#[derive(Debug, Default)]
struct Traversal {
    records: Vec<NodeRecord>,
    /// Node records whose subtree is still being walked, innermost last
    open: Vec<OpenNode>,
}

#[derive(Debug)]
struct OpenNode {
    id: usize,
    /// First and last token records seen in the subtree so far
    tokens: Option<(usize, usize)>,
}

impl OpenNode {
    fn extend(&mut self, first: usize, last: usize) {
        let first = self.tokens.map_or(first, |(first, _)| first);
        self.tokens = Some((first, last));
    }
}

impl Traversal {
    fn push(&mut self, mut record: NodeRecord) -> usize {
        let id = self.records.len();
        record.id = id;
        record.parent = self.open.last().map(|node| node.id);
        self.records.push(record);
        id
    }

    fn enter_node(&mut self, record: NodeRecord) {
        let id = self.push(record);
        self.open.push(OpenNode { id, tokens: None });
    }

    fn add_token(&mut self, record: NodeRecord) {
        let id = self.push(record);
        if let Some(node) = self.open.last_mut() {
            node.extend(id, id);
        }
    }

    /// Close the innermost node; its range spans its first to last token
    fn leave_node(&mut self) {
        let Some(node) = self.open.pop() else {
            return;
        };
        // Nodes without tokens keep the position they were entered with
        let Some((first, last)) = node.tokens else {
            return;
        };

        let start = self.records[first].range;
        let end = self.records[last].range;
        self.records[node.id].range = SourceRange {
            start_row: start.start_row,
            start_column: start.start_column,
            end_row: end.end_row,
            end_column: end.end_column,
        };
        if let Some(parent) = self.open.last_mut() {
            parent.extend(first, last);
        }
    }
}

impl<'a> TreeAssembler<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            line_index: LineIndex::new(source),
            renderer: TriviaRenderer::new(DEFAULT_TAB_WIDTH),
            show_missing_tokens: false,
        }
    }

    /// Label missing tokens with their canonical text instead of nothing
    pub fn show_missing_tokens(mut self, show: bool) -> Self {
        self.show_missing_tokens = show;
        self
    }

    pub fn tab_width(mut self, tab_width: usize) -> Self {
        self.renderer = TriviaRenderer::new(tab_width);
        self
    }

    /// Assemble the node list for `root`
    ///
    /// # Panics
    ///
    /// Panics when the tree does not match the grammar catalog. Trees built
    /// by the parser and the fold pass always match.
    pub fn assemble(&self, root: &SwiftSyntaxNode) -> Vec<NodeRecord> {
        let mut trivia = TriviaCollector::new().collect(root).into_iter();
        let mut traversal = Traversal::default();

        for event in root.preorder_with_tokens() {
            match event {
                WalkEvent::Enter(NodeOrToken::Node(node)) => {
                    traversal.enter_node(self.node_record(&node));
                }
                WalkEvent::Enter(NodeOrToken::Token(token)) if !token.kind().is_trivia() => {
                    let token_trivia = trivia.next().unwrap_or_else(|| {
                        panic!("no trivia entry for token {:?}", token.kind())
                    });
                    traversal.add_token(self.token_record(&token, token_trivia));
                }
                WalkEvent::Leave(NodeOrToken::Node(_)) => traversal.leave_node(),
                _ => {}
            }
        }

        debug!(records = traversal.records.len(), "assembled node list");
        traversal.records
    }

    fn node_record(&self, node: &SwiftSyntaxNode) -> NodeRecord {
        let reflection = reflect(node, &self.renderer)
            .unwrap_or_else(|error| panic!("malformed syntax tree: {error}"));

        NodeRecord {
            id: 0,
            parent: None,
            label: node.kind().to_string(),
            range: self.line_index.range(node.text_range()),
            category: reflection.category,
            structure: reflection.structure,
            token_info: None,
        }
    }

    fn token_record(&self, token: &SwiftSyntaxToken, trivia: TokenTrivia) -> NodeRecord {
        let kind = token.kind();
        let label = match (token.is_missing(), self.show_missing_tokens) {
            (false, _) => self.renderer.escape(token.text()),
            (true, true) => self.renderer.escape(kind.fixed_text().unwrap_or_default()),
            (true, false) => String::new(),
        };

        NodeRecord {
            id: 0,
            parent: None,
            label,
            range: self.line_index.range(token.text_range()),
            category: NodeCategory::Other,
            structure: Vec::new(),
            token_info: Some(TokenInfo {
                kind: self.renderer.escape(&kind.describe_token(token.text())),
                leading_trivia: self.renderer.render_all(&trivia.leading),
                trailing_trivia: self.renderer.render_all(&trivia.trailing),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::parse_swift;

    fn assemble(source: &str, show_missing_tokens: bool) -> Vec<NodeRecord> {
        let parse = parse_swift(source).unwrap();
        TreeAssembler::new(source)
            .show_missing_tokens(show_missing_tokens)
            .assemble(&parse.root)
    }

    fn labels(records: &[NodeRecord]) -> Vec<&str> {
        records.iter().map(|record| record.label.as_str()).collect()
    }

    #[test]
    fn test_pre_order_with_parents() {
        let records = assemble("let x = 1", false);
        assert_eq!(
            labels(&records),
            vec![
                "SourceFile",
                "CodeBlockItemList",
                "CodeBlockItem",
                "VariableDecl",
                "let",
                "PatternBindingList",
                "PatternBinding",
                "IdentifierPattern",
                "x",
                "InitializerClause",
                "=",
                "IntegerLiteralExpr",
                "1",
                "",
            ]
        );

        let parents: Vec<_> = records.iter().map(|record| record.parent).collect();
        assert_eq!(
            parents,
            vec![
                None,
                Some(0),
                Some(1),
                Some(2),
                Some(3),
                Some(3),
                Some(5),
                Some(6),
                Some(7),
                Some(6),
                Some(9),
                Some(9),
                Some(11),
                Some(0),
            ]
        );
        assert!(records.iter().enumerate().all(|(index, record)| record.id == index));
    }

    #[test]
    fn test_token_trivia_is_rendered() {
        let records = assemble("let x = 1 // one\n", false);
        let let_token = &records[4];
        let info = let_token.token_info.as_ref().unwrap();
        assert_eq!(info.kind, "keyword(.let)");
        assert_eq!(info.leading_trivia, "");
        assert_eq!(info.trailing_trivia, "&nbsp;");

        let literal = records.iter().find(|record| record.label == "1").unwrap();
        let info = literal.token_info.as_ref().unwrap();
        assert_eq!(info.kind, "integerLiteral(&quot;1&quot;)");
        assert!(info.trailing_trivia.starts_with("&nbsp;<span class='lineComment'"));

        let eof = records.last().unwrap();
        assert_eq!(eof.token_info.as_ref().unwrap().kind, "endOfFile");
        assert_eq!(eof.token_info.as_ref().unwrap().leading_trivia, "<br>");
    }

    #[test]
    fn test_missing_token_labels() {
        let hidden = assemble("f(1", false);
        let shown = assemble("f(1", true);
        assert_eq!(hidden.len(), shown.len());

        let position = hidden
            .iter()
            .position(|record| {
                record.token_info.as_ref().map(|info| info.kind.as_str()) == Some("rightParen")
            })
            .unwrap();
        assert_eq!(hidden[position].label, "");
        assert_eq!(shown[position].label, ")");
    }

    #[test]
    fn test_present_tokens_ignore_missing_setting() {
        assert_eq!(
            labels(&assemble("f(1)", false)),
            labels(&assemble("f(1)", true))
        );
    }

    #[test]
    fn test_node_ranges_exclude_trivia() {
        let records = assemble("  let x = 1  \n", false);
        let decl = records
            .iter()
            .find(|record| record.label == "VariableDecl")
            .unwrap();
        assert_eq!(
            (decl.range.start_row, decl.range.start_column),
            (1, 3)
        );
        assert_eq!((decl.range.end_row, decl.range.end_column), (1, 12));
        assert_eq!(decl.category, NodeCategory::Declaration);
    }

    #[test]
    fn test_container_ranges_span_their_tokens() {
        let records = assemble("  let x = 1  // c\n", false);
        let find = |label: &str| {
            records
                .iter()
                .find(|record| record.label == label)
                .unwrap()
                .range
        };

        let items = find("CodeBlockItemList");
        assert_eq!((items.start_column, items.end_column), (3, 12));

        // The file ends at the end-of-file token after the comment
        let file = find("SourceFile");
        assert_eq!((file.start_row, file.start_column), (1, 3));
        assert_eq!((file.end_row, file.end_column), (2, 1));
    }

    #[test]
    fn test_missing_node_range_is_empty() {
        let records = assemble("let x = ", false);
        let missing = records
            .iter()
            .find(|record| record.label == "MissingExpr")
            .unwrap();
        assert_eq!(
            (missing.range.start_column, missing.range.end_column),
            (8, 8)
        );
    }

    #[test]
    fn test_tab_width() {
        let source = "\tx";
        let parse = parse_swift(source).unwrap();
        let records = TreeAssembler::new(source).tab_width(4).assemble(&parse.root);
        let token = records.iter().find(|record| record.label == "x").unwrap();
        assert_eq!(
            token.token_info.as_ref().unwrap().leading_trivia,
            "&nbsp;".repeat(4)
        );
    }
}
