//! Serializable node records

use serde::{Deserialize, Serialize};

use crate::cst::SyntaxClass;

/// One visited node or token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    /// Pre-order position, starting at 0 for the root
    pub id: usize,
    /// Id of the enclosing node, absent only for the root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<usize>,
    /// Kind name for nodes, escaped text for tokens
    pub label: String,
    pub range: SourceRange,
    pub category: NodeCategory,
    pub structure: Vec<StructureProperty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_info: Option<TokenInfo>,
}

impl NodeRecord {
    pub fn is_token(&self) -> bool {
        self.token_info.is_some()
    }
}

/// 1-based display range; columns count UTF-16 code units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRange {
    pub start_row: usize,
    pub start_column: usize,
    pub end_row: usize,
    pub end_column: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeCategory {
    Declaration,
    Expression,
    Pattern,
    Type,
    Collection,
    Other,
}

impl From<SyntaxClass> for NodeCategory {
    fn from(class: SyntaxClass) -> Self {
        match class {
            SyntaxClass::Declaration => Self::Declaration,
            SyntaxClass::Expression => Self::Expression,
            SyntaxClass::Pattern => Self::Pattern,
            SyntaxClass::Type => Self::Type,
            SyntaxClass::Other => Self::Other,
        }
    }
}

/// A named structural property of a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureProperty {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<PropertyValue>,
    /// Kind name of the referenced child node
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl StructureProperty {
    pub fn text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(PropertyValue {
                text: text.into(),
                kind: None,
            }),
            reference: None,
        }
    }

    /// Placeholder for an absent optional child
    pub fn nil(name: impl Into<String>) -> Self {
        Self::text(name, "nil")
    }

    pub fn token(name: impl Into<String>, text: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(PropertyValue {
                text: text.into(),
                kind: Some(kind.into()),
            }),
            reference: None,
        }
    }

    pub fn node(name: impl Into<String>, kind: impl Into<String>) -> Self {
        let kind = kind.into();
        Self {
            name: name.into(),
            value: Some(PropertyValue {
                text: kind.clone(),
                kind: None,
            }),
            reference: Some(kind),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyValue {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Token decoration; trivia is pre-rendered markup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub kind: String,
    pub leading_trivia: String,
    pub trailing_trivia: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> NodeRecord {
        NodeRecord {
            id: 4,
            parent: Some(3),
            label: "x".to_string(),
            range: SourceRange {
                start_row: 1,
                start_column: 5,
                end_row: 1,
                end_column: 6,
            },
            category: NodeCategory::Other,
            structure: Vec::new(),
            token_info: Some(TokenInfo {
                kind: "identifier(&quot;x&quot;)".to_string(),
                leading_trivia: String::new(),
                trailing_trivia: "&nbsp;".to_string(),
            }),
        }
    }

    #[test]
    fn test_record_field_names() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 4,
                "parent": 3,
                "label": "x",
                "range": {"startRow": 1, "startColumn": 5, "endRow": 1, "endColumn": 6},
                "category": "other",
                "structure": [],
                "tokenInfo": {
                    "kind": "identifier(&quot;x&quot;)",
                    "leadingTrivia": "",
                    "trailingTrivia": "&nbsp;"
                }
            })
        );
    }

    #[test]
    fn test_root_omits_parent_and_token_info() {
        let mut record = sample();
        record.parent = None;
        record.token_info = None;
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("parent").is_none());
        assert!(value.get("tokenInfo").is_none());

        let back: NodeRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_property_shapes() {
        assert_eq!(
            serde_json::to_value(StructureProperty::nil("typeAnnotation")).unwrap(),
            json!({"name": "typeAnnotation", "value": {"text": "nil"}})
        );
        assert_eq!(
            serde_json::to_value(StructureProperty::node("bindings", "PatternBindingList"))
                .unwrap(),
            json!({
                "name": "bindings",
                "value": {"text": "PatternBindingList"},
                "ref": "PatternBindingList"
            })
        );
        assert_eq!(
            serde_json::to_value(StructureProperty::token("bindingSpecifier", "let", "keyword(.let)"))
                .unwrap(),
            json!({
                "name": "bindingSpecifier",
                "value": {"text": "let", "kind": "keyword(.let)"}
            })
        );
    }

    #[test]
    fn test_category_names() {
        assert_eq!(
            serde_json::to_value(NodeCategory::Collection).unwrap(),
            json!("collection")
        );
        assert_eq!(
            NodeCategory::from(SyntaxClass::Declaration),
            NodeCategory::Declaration
        );
    }
}
