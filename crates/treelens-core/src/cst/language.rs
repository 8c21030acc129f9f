//! Rowan language implementation for the Swift-flavoured grammar
//!
//! This module implements the `rowan::Language` trait, which connects our
//! SwiftSyntaxKind enum to Rowan's generic CST infrastructure.

use rowan::Language;

use super::SwiftSyntaxKind;

/// Language marker for the Swift-flavoured grammar
///
/// This is a zero-sized type that implements `rowan::Language` to provide
/// the connection between our syntax kinds and Rowan's generic tree types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SwiftLanguage;

impl Language for SwiftLanguage {
    type Kind = SwiftSyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        // Raw kinds only ever come from kind_to_raw, so an unknown value means
        // the green tree was built with a foreign kind table.
        SwiftSyntaxKind::from_raw(raw.0)
            .unwrap_or_else(|| panic!("raw syntax kind {} is not a SwiftSyntaxKind", raw.0))
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}
