//! Source markup built from a node list

use std::fmt::Write as _;

use super::record::NodeRecord;

/// Reassemble the source as markup, one span per token
///
/// Labels and trivia are already escaped, so the result can be embedded as is.
/// Each token span carries its record id so a viewer can link it back to the
/// node list.
pub fn render_source_html(records: &[NodeRecord]) -> String {
    let mut html = String::new();

    for record in records {
        let Some(info) = &record.token_info else {
            continue;
        };

        html.push_str(&info.leading_trivia);
        // Writing to a String cannot fail
        let _ = write!(
            html,
            "<span class='token' data-id='{}' data-kind='{}'>{}</span>",
            record.id, info.kind, record.label
        );
        html.push_str(&info.trailing_trivia);
    }

    html
}
