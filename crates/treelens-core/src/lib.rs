//! Treelens Core
//!
//! Renders source text of a small Swift-flavoured language into an annotated,
//! parent-indexed list of syntax nodes. This crate provides the lossless
//! CST, the explorer that walks it, and the JSON rendering entry points.

pub mod config;
pub mod cst; // Concrete Syntax Tree (lossless, Rowan-based)
pub mod error;
pub mod explorer;
pub mod parser;
pub mod render;
pub mod result;

// Re-export commonly used types
pub use config::{ConfigLoader, RenderConfig};
pub use error::{ErrorKind, TreelensError};
pub use explorer::{
    KindStatistics, NodeCategory, NodeRecord, SourceRange, StructureProperty, TokenInfo,
    TreeAssembler, collect_statistics, render_source_html,
};
pub use parser::{DiagnosticKind, ParseResult, SwiftParser, SyntaxDiagnostic};
pub use render::{
    RenderOptions, error_envelope, render, render_batch, render_records, to_json,
};
pub use result::{Result, ResultExt};

/// Initialize the tracing subscriber for logging
///
/// Logs go to stderr so rendered output on stdout stays machine readable.
/// `RUST_LOG` overrides the level chosen by `verbosity`.
pub fn init_tracing(verbosity: u8) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("treelens={level},treelens_core={level}")));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
