//! Per-kind statistics over a node list

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::record::{NodeRecord, SourceRange};

/// Occurrences of one node kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KindStatistics {
    pub kind: String,
    pub count: usize,
    /// Range of every occurrence, in document order
    pub ranges: Vec<SourceRange>,
}

/// Count container nodes per kind
///
/// Tokens are skipped. The most frequent kinds come first; ties are ordered
/// by kind name.
pub fn collect_statistics(records: &[NodeRecord]) -> Vec<KindStatistics> {
    let mut by_kind: BTreeMap<&str, Vec<SourceRange>> = BTreeMap::new();
    for record in records.iter().filter(|record| !record.is_token()) {
        by_kind
            .entry(record.label.as_str())
            .or_default()
            .push(record.range);
    }

    let mut statistics: Vec<_> = by_kind
        .into_iter()
        .map(|(kind, ranges)| KindStatistics {
            kind: kind.to_string(),
            count: ranges.len(),
            ranges,
        })
        .collect();
    // Stable sort keeps the name order of the map for equal counts
    statistics.sort_by(|a, b| b.count.cmp(&a.count));
    statistics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::parse_swift;
    use crate::explorer::TreeAssembler;

    fn statistics(source: &str) -> Vec<KindStatistics> {
        let parse = parse_swift(source).unwrap();
        collect_statistics(&TreeAssembler::new(source).assemble(&parse.root))
    }

    #[test]
    fn test_counts_and_order() {
        let stats = statistics("let a = 1\nlet b = 2\nc");
        let summary: Vec<_> = stats
            .iter()
            .map(|entry| (entry.kind.as_str(), entry.count))
            .take(3)
            .collect();
        assert_eq!(
            summary,
            vec![
                ("CodeBlockItem", 3),
                ("IdentifierPattern", 2),
                ("InitializerClause", 2),
            ]
        );
    }

    #[test]
    fn test_ranges_follow_document_order() {
        let stats = statistics("let a = 1\nlet b = 2");
        let decls = stats
            .iter()
            .find(|entry| entry.kind == "VariableDecl")
            .unwrap();
        let rows: Vec<_> = decls.ranges.iter().map(|range| range.start_row).collect();
        assert_eq!(rows, vec![1, 2]);
    }

    #[test]
    fn test_tokens_are_not_counted() {
        let stats = statistics("x");
        assert!(stats.iter().all(|entry| entry.kind != "x"));
        assert_eq!(stats.iter().map(|entry| entry.count).sum::<usize>(), 4);
    }
}
