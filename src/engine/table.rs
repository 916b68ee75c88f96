//! Table rows
//!
//!     A MoinMoin row is a line that starts and ends with `||`. Each `||` becomes a DokuWiki `|`.
//!
//!     Column spans are written in two ways: as empty cells (`||||` spans two columns) or as an
//!     explicit `<-N>` marker after the separator. DokuWiki expresses a span as additional `|`
//!     at the end of the spanning cell, so the span is remembered until the next separator.
//!
//!     Alignment is expressed with whitespace around the cell content in DokuWiki: two spaces in
//!     front for right alignment, two spaces on both sides for centered content and two spaces
//!     after for left alignment. The trailing spaces are written at the next separator.
//!
//!     Span and alignment carry over to the next row of the same document, as the next row's
//!     first separator closes the previous row's last cell.

const SEPARATOR: &str = "||";
const ALIGN_LEFT: &str = "<style=\"text-align: left;\">";
const ALIGN_RIGHT: &str = "<style=\"text-align: right;\">";
const ALIGN_CENTER: &str = "<style=\"text-align: center;\">";
const PADDING: &str = "  ";

/// A converted cell separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellSeparator {
    pub consumed: usize,
    pub output: String,
}

#[derive(Debug, Clone, Default)]
pub struct TableCursor {
    in_row: bool,
    col_span: i32,
    align_at_end: bool,
}

impl TableCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decides whether the line is a table row. Must be called with the line as read.
    pub fn check_row(&mut self, line: &str) {
        self.in_row = line.starts_with(SEPARATOR) && line.ends_with(SEPARATOR);
    }

    /// Converts the separator at the start of `rest`.
    pub fn convert(&mut self, rest: &str) -> Option<CellSeparator> {
        if !self.in_row || !rest.starts_with(SEPARATOR) {
            return None;
        }

        let mut output = String::new();
        if self.align_at_end {
            output.push_str(PADDING);
            self.align_at_end = false;
        }

        output.push('|');
        while self.col_span > 0 {
            self.col_span -= 1;
            output.push('|');
        }

        let mut consumed = self.implicit_span(rest);
        consumed += self.explicit_span(&rest[consumed..]);
        consumed += self.alignment(&rest[consumed..], &mut output);

        Some(CellSeparator { consumed, output })
    }

    /// Counts the empty cells following the first separator.
    fn implicit_span(&mut self, rest: &str) -> usize {
        let mut consumed = SEPARATOR.len();
        while rest[consumed..].starts_with(SEPARATOR) {
            self.col_span += 1;
            consumed += SEPARATOR.len();
        }
        consumed
    }

    /// Parses a `<-N>` marker. Markers without a number are left as text.
    fn explicit_span(&mut self, rest: &str) -> usize {
        let Some(marker) = rest.strip_prefix("<-") else {
            return 0;
        };
        let Some(end) = marker.find('>') else {
            return 0;
        };
        match marker[..end].parse::<i32>() {
            Ok(span) => {
                self.col_span = self.col_span.saturating_add(span.saturating_sub(1));
                "<-".len() + end + 1
            }
            Err(_) => 0,
        }
    }

    fn alignment(&mut self, rest: &str, output: &mut String) -> usize {
        if rest.starts_with(ALIGN_RIGHT) {
            output.push_str(PADDING);
            ALIGN_RIGHT.len()
        } else if rest.starts_with(ALIGN_CENTER) {
            output.push_str(PADDING);
            self.align_at_end = true;
            ALIGN_CENTER.len()
        } else if rest.starts_with(ALIGN_LEFT) {
            self.align_at_end = true;
            ALIGN_LEFT.len()
        } else {
            0
        }
    }
}
