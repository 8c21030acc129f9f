//! Source to node list rendering
//!
//! [`render`] is the single entry point consumers need: parse, optionally
//! fold operator sequences, assemble the node list and serialize it as JSON.
//! Every call builds its own parser and traversal state, so independent
//! sources can be rendered in parallel with [`render_batch`].

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::Result;
use crate::config::RenderConfig;
use crate::cst::{fold_operators, release_tree};
use crate::explorer::{DEFAULT_TAB_WIDTH, NodeRecord, TreeAssembler};
use crate::parser::SwiftParser;

/// Options for a single render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Fold operator sequences; failures fall back to the unfolded tree
    pub fold: bool,
    /// Label missing tokens with their canonical text
    pub show_missing_tokens: bool,
    pub tab_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            fold: false,
            show_missing_tokens: false,
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }
}

impl From<&RenderConfig> for RenderOptions {
    fn from(config: &RenderConfig) -> Self {
        Self {
            fold: config.fold,
            show_missing_tokens: config.show_missing_tokens,
            tab_width: config.tab_width,
        }
    }
}

/// Parse `source` and assemble its node list
pub fn render_records(source: &str, options: RenderOptions) -> Result<Vec<NodeRecord>> {
    let parsed = SwiftParser::parse_content(source)?;
    for diagnostic in parsed.errors() {
        debug!(
            line = diagnostic.line,
            column = diagnostic.column,
            kind = ?diagnostic.kind,
            "recovered: {}",
            diagnostic.message
        );
    }

    let root = parsed.cst;
    let folded = if options.fold {
        fold_operators(&root)
            .inspect_err(|error| debug!("Folding skipped: {}", error))
            .ok()
    } else {
        None
    };

    let records = TreeAssembler::new(source)
        .show_missing_tokens(options.show_missing_tokens)
        .tab_width(options.tab_width)
        .assemble(folded.as_ref().unwrap_or(&root));

    if let Some(folded) = folded {
        release_tree(folded);
    }
    release_tree(root);
    Ok(records)
}

/// Render `source` into a compact JSON array of node records
///
/// # Example
///
/// ```rust,ignore
/// use treelens_core::{RenderOptions, render};
///
/// let json = render("let x = 1", RenderOptions::default())?;
/// assert!(json.starts_with(r#"[{"id":0,"label":"SourceFile""#));
/// ```
pub fn render(source: &str, options: RenderOptions) -> Result<String> {
    let records = render_records(source, options)?;
    Ok(to_json(&records, false))
}

/// Render several independent sources in parallel, keeping input order
pub fn render_batch<S>(sources: &[S], options: RenderOptions) -> Vec<Result<String>>
where
    S: AsRef<str> + Sync,
{
    sources
        .par_iter()
        .map(|source| render(source.as_ref(), options))
        .collect()
}

/// Serialize any render output as JSON
///
/// # Panics
///
/// Panics if serialization fails, which node records and the derived views
/// never do.
pub fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> String {
    let result = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    result.unwrap_or_else(|error| panic!("node list serialization failed: {error}"))
}

/// The `{"error": message}` document reported instead of a node list
pub fn error_envelope(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}
