//! Trivia and label markup
//!
//! Every payload is escaped with `html-escape` before whitespace is replaced
//! by visible markers, so the markers themselves are never escaped.

use crate::cst::{TriviaKind, TriviaPiece};

const SPACE: &str = "&nbsp;";
const LINE_BREAK: &str = "<br>";

/// Default number of space markers per tab
pub const DEFAULT_TAB_WIDTH: usize = 2;

/// Escape `text` and make its whitespace visible
///
/// Spaces become `&nbsp;`, tabs become `tab_width` of them, and each line
/// break (`\r\n`, `\n` or `\r`) becomes `<br>`.
pub fn escape_text(text: &str, tab_width: usize) -> String {
    let escaped = html_escape::encode_quoted_attribute(text);
    let mut output = String::with_capacity(escaped.len());

    let mut chars = escaped.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            ' ' => output.push_str(SPACE),
            '\t' => output.push_str(&SPACE.repeat(tab_width)),
            '\r' => {
                chars.next_if_eq(&'\n');
                output.push_str(LINE_BREAK);
            }
            '\n' => output.push_str(LINE_BREAK),
            _ => output.push(ch),
        }
    }

    output
}

/// Renders trivia pieces into display markup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriviaRenderer {
    tab_width: usize,
}

impl Default for TriviaRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_TAB_WIDTH)
    }
}

impl TriviaRenderer {
    pub fn new(tab_width: usize) -> Self {
        Self { tab_width }
    }

    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    /// Escape a label or other free text
    pub fn escape(&self, text: &str) -> String {
        escape_text(text, self.tab_width)
    }

    /// Concatenated markup of several pieces, in order
    pub fn render_all(&self, pieces: &[TriviaPiece]) -> String {
        pieces.iter().map(|piece| self.render(piece)).collect()
    }

    pub fn render(&self, piece: &TriviaPiece) -> String {
        let count = piece.count();
        match piece.kind {
            TriviaKind::Spaces => SPACE.repeat(count),
            TriviaKind::Tabs => SPACE.repeat(count * self.tab_width),
            TriviaKind::VerticalTabs | TriviaKind::Formfeeds => String::new(),
            TriviaKind::Newlines
            | TriviaKind::CarriageReturns
            | TriviaKind::CarriageReturnLineFeeds => LINE_BREAK.repeat(count),
            TriviaKind::Backslashes => "\\".repeat(count),
            TriviaKind::Pounds => "#".repeat(count),
            TriviaKind::LineComment
            | TriviaKind::BlockComment
            | TriviaKind::DocLineComment
            | TriviaKind::DocBlockComment
            | TriviaKind::UnexpectedText => self.render_tagged(piece),
        }
    }

    /// Comment-like pieces become a span carrying the raw description as a tooltip
    fn render_tagged(&self, piece: &TriviaPiece) -> String {
        let name = piece.kind.name();
        format!(
            "<span class='{name}' data-title='{title}' data-content='{name}' data-type='trivia' \
             data-toggle='tooltip' data-placement='bottom'>{text}</span>",
            title = self.escape(&piece.debug_description()),
            text = self.escape(&piece.text),
        )
    }
}
