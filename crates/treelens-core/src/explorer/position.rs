//! Source position mapping
//!
//! Offsets in the tree are byte offsets. Renderers count columns in UTF-16
//! code units, so every column is re-measured over the line prefix before it.

use rowan::{TextRange, TextSize};

use super::SourceRange;

/// A 1-based row/column pair, columns in UTF-16 code units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

/// Line start table for one source text
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    source: &'a str,
    /// Byte offset of the first character of every line
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    /// Index the lines of `source`; `\n`, `\r\n` and a lone `\r` each end a line
    pub fn new(source: &'a str) -> Self {
        let bytes = source.as_bytes();
        let mut line_starts = vec![0];

        let mut index = 0;
        while index < bytes.len() {
            match bytes[index] {
                b'\n' => line_starts.push(index + 1),
                b'\r' if bytes.get(index + 1) == Some(&b'\n') => {
                    index += 1;
                    line_starts.push(index + 1);
                }
                b'\r' => line_starts.push(index + 1),
                _ => {}
            }
            index += 1;
        }

        Self {
            source,
            line_starts,
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// 1-based line and 1-based raw (byte) column of `offset`
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        (line + 1, offset - self.line_starts[line] + 1)
    }

    /// Text of a 1-based line, line terminator excluded
    pub fn line_text(&self, line: usize) -> Option<&'a str> {
        let start = *self.line_starts.get(line.checked_sub(1)?)?;
        let end = self
            .line_starts
            .get(line)
            .copied()
            .unwrap_or(self.source.len());
        let text = self.source.get(start..end)?;
        Some(text.trim_end_matches(['\n', '\r']))
    }

    /// Display position of a byte offset
    ///
    /// The column is the UTF-16 length of the line prefix before the offset,
    /// plus one. If the line or prefix cannot be taken the raw column is kept.
    pub fn position(&self, offset: usize) -> Position {
        let (row, raw_column) = self.line_col(offset);
        let column = self
            .line_text(row)
            .and_then(|line| line.get(..raw_column - 1))
            .map_or(raw_column, |prefix| prefix.encode_utf16().count() + 1);

        Position { row, column }
    }

    /// Display range of a tree range
    pub fn range(&self, range: TextRange) -> SourceRange {
        let start = self.position(offset(range.start()));
        let end = self.position(offset(range.end()));
        SourceRange {
            start_row: start.row,
            start_column: start.column,
            end_row: end.row,
            end_column: end.column,
        }
    }
}

fn offset(size: TextSize) -> usize {
    usize::from(size)
}
