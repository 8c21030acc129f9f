//! Output formatting
//!
//! Each source becomes one document on stdout: the node list, its token
//! markup, or its kind statistics. Failed sources print the error envelope
//! in their place.

use rayon::prelude::*;
use tracing::warn;
use treelens_core::{
    RenderConfig, RenderOptions, Result, collect_statistics, error_envelope, render_batch,
    render_records, render_source_html, to_json,
};

use crate::OutputFormat;

/// Render one source in the requested format
pub fn render_document(source: &str, config: &RenderConfig, format: OutputFormat) -> Result<String> {
    let records = render_records(source, RenderOptions::from(config))?;
    let document = match format {
        OutputFormat::Json => to_json(&records, config.pretty),
        OutputFormat::Html => render_source_html(&records),
        OutputFormat::Statistics => to_json(&collect_statistics(&records), config.pretty),
    };
    Ok(document)
}

/// Render all sources in parallel, keeping input order
pub fn render_documents(
    sources: &[String],
    config: &RenderConfig,
    format: OutputFormat,
) -> Vec<Result<String>> {
    match format {
        OutputFormat::Json if !config.pretty => render_batch(sources, RenderOptions::from(config)),
        _ => sources
            .par_iter()
            .map(|source| render_document(source, config, format))
            .collect(),
    }
}

/// Print one document per source; returns whether every source rendered
pub fn print_documents(documents: Vec<Result<String>>) -> bool {
    let mut all_rendered = true;
    for document in documents {
        match document {
            Ok(document) => println!("{document}"),
            Err(e) => {
                warn!("Render failed: {}", e);
                println!("{}", error_envelope(&e.to_string()));
                all_rendered = false;
            }
        }
    }
    all_rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_document_formats() {
        let config = RenderConfig::default();
        let json = render_document("let x = 1", &config, OutputFormat::Json).unwrap();
        assert!(json.starts_with('['));

        let html = render_document("let x = 1", &config, OutputFormat::Html).unwrap();
        assert!(html.starts_with("<span class='token'"));

        let stats = render_document("let x = 1", &config, OutputFormat::Statistics).unwrap();
        assert!(stats.contains(r#""kind":"VariableDecl""#));
    }

    #[test]
    fn test_render_documents_keeps_order() {
        let sources = vec!["a".to_string(), "(".repeat(300), "b".to_string()];
        let config = RenderConfig {
            pretty: true,
            ..RenderConfig::default()
        };
        let documents = render_documents(&sources, &config, OutputFormat::Json);
        assert!(documents[0].as_ref().unwrap().contains("\"label\": \"a\""));
        assert!(documents[1].is_err());
        assert!(documents[2].as_ref().unwrap().contains("\"label\": \"b\""));
    }
}
