//! Line engine
//!
//!     Converts a MoinMoin document into DokuWiki markup line by line. The engine owns all
//!     per-document state: the open inline formats, the active literal region and the table
//!     cursor. Nothing survives a call to [`transform`], so documents can be converted
//!     independently and in parallel while sharing one [`RuleSet`].
//!
//!     Each line goes through these phases:
//!
//!     1. whole-line rules (headings) replace the line,
//!     2. line-start rules (lists) replace the list marker,
//!     3. formats left open by the previous line are reopened,
//!     4. the remaining text is scanned for literal regions, links, table separators and
//!        inline formats, in this priority,
//!     5. formats still open are closed at the line end.
//!
//!     Inside a literal region only the end of the region is recognized.
//!
//!     Malformed markup never fails: unmatched tokens are copied as text. The only error is an
//!     internal one, a same-line format found open at the start of a line.

mod cleaner;
mod format_stack;
mod link;
mod literal_region;
mod table;

pub use cleaner::TagCleaner;
pub use link::{resolve as resolve_link, ResolvedLink};
pub use table::{CellSeparator, TableCursor};

use crate::rules::{InlineKind, RuleSet};
use format_stack::FormatStack;
use literal_region::LiteralTracker;
use std::fmt;

/// Notice prepended to converted pages so they get reviewed.
pub const FIXME_BANNER: &str = "FIXME **//imported from MoinMoin//**\n\n";

/// Conversion settings.
#[derive(Debug, Clone)]
pub struct Options {
    /// Prepend [`FIXME_BANNER`].
    pub fixme_banner: bool,
    /// Remove inline formats without content from the output.
    pub clean_tags: bool,
    pub rules: RuleSet,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            fixme_banner: false,
            clean_tags: false,
            rules: RuleSet::moinmoin(),
        }
    }
}

impl Options {
    pub fn with_fixme_banner(mut self, enabled: bool) -> Self {
        self.fixme_banner = enabled;
        self
    }

    pub fn with_clean_tags(mut self, enabled: bool) -> Self {
        self.clean_tags = enabled;
        self
    }
}

/// Errors raised while converting a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// A format that must close on its own line was still open when the next line started.
    SameLineFormatOpen {
        format: InlineKind,
        /// 1-based number of the line about to be converted, counting converted lines only.
        line: usize,
        output: String,
    },
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::SameLineFormatOpen {
                format,
                line,
                output,
            } => write!(
                f,
                "{format} must never be open at the start of a line (line {line})\noutput so far: {output}"
            ),
        }
    }
}

impl std::error::Error for TransformError {}

/// Converts a document.
///
/// `lines` are the raw lines of the document, usually each with its trailing `\n`. A single
/// entry may also hold several lines. `document` is the name of the page, used to resolve
/// relative links.
pub fn transform<S: AsRef<str>>(
    lines: &[S],
    document: &str,
    options: &Options,
) -> Result<String, TransformError> {
    let mut engine = DocumentEngine::new(&options.rules, document);
    let mut body = String::new();
    for chunk in lines {
        body = engine.convert_chunk(chunk.as_ref(), body)?;
    }

    if options.clean_tags {
        body = TagCleaner::new(&options.rules.inline).clean(body);
    }

    if options.fixme_banner {
        body.insert_str(0, FIXME_BANNER);
    }
    Ok(body)
}

/// The state of one document being converted.
#[derive(Debug, Clone)]
pub struct DocumentEngine<'r> {
    rules: &'r RuleSet,
    document: &'r str,
    formats: FormatStack<'r>,
    literal: LiteralTracker<'r>,
    table: TableCursor,
    line_number: usize,
}

impl<'r> DocumentEngine<'r> {
    pub fn new(rules: &'r RuleSet, document: &'r str) -> Self {
        DocumentEngine {
            rules,
            document,
            formats: FormatStack::new(&rules.inline),
            literal: LiteralTracker::new(&rules.literal),
            table: TableCursor::new(),
            line_number: 0,
        }
    }

    /// Converts one raw entry of the document, appending to `out`.
    pub fn convert_chunk(&mut self, chunk: &str, mut out: String) -> Result<String, TransformError> {
        let mut lines: Vec<&str> = chunk.split('\n').collect();
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }

        for (index, line) in lines.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            let line = line.strip_suffix('\r').unwrap_or(line);
            out = self.convert_line(line, out)?;
        }

        if chunk.ends_with('\n') {
            out.push('\n');
        }
        Ok(out)
    }

    fn convert_line(&mut self, line: &str, mut out: String) -> Result<String, TransformError> {
        self.line_number += 1;

        if !self.literal.is_active() {
            let converted = self
                .rules
                .whole_line
                .iter()
                .find_map(|rule| rule.convert(line).filter(|converted| converted != line));
            if let Some(converted) = converted {
                out.push_str(&converted);
                return Ok(out);
            }
        }

        self.table.check_row(line);
        let content = self.strip_line_start(line, &mut out);

        let out = self.reactivate(out)?;
        let out = self.scan(content, out);
        Ok(self.close_line(out))
    }

    fn strip_line_start<'l>(&self, line: &'l str, out: &mut String) -> &'l str {
        if self.literal.is_active() {
            return line;
        }
        for rule in &self.rules.line_start {
            if let Some(stripped) = rule.strip(line) {
                out.push_str(&rule.output_for(stripped.indentation));
                return stripped.content;
            }
        }
        line
    }

    fn reactivate(&mut self, mut out: String) -> Result<String, TransformError> {
        if self.literal.wraps_lines() {
            out.push_str(&self.literal.start_output());
            return Ok(out);
        }
        match self.formats.reactivate(&mut out) {
            Ok(()) => Ok(out),
            Err(rule) => {
                tracing::debug!(format = %rule.kind, line = self.line_number, "same-line format left open");
                Err(TransformError::SameLineFormatOpen {
                    format: rule.kind,
                    line: self.line_number,
                    output: out,
                })
            }
        }
    }

    fn scan(&mut self, line: &str, mut out: String) -> String {
        let mut position = 0;
        while position < line.len() {
            let rest = &line[position..];
            match self.convert_token(rest, &mut out) {
                Some(consumed) => position += consumed,
                None => {
                    let c = rest.chars().next().unwrap_or_default();
                    out.push(c);
                    position += c.len_utf8();
                }
            }
        }
        out
    }

    /// Converts the token at the start of `rest`, if any. Returns the consumed input length.
    fn convert_token(&mut self, rest: &str, out: &mut String) -> Option<usize> {
        if self.literal.is_active() {
            let end = self.literal.end_output();
            let consumed = self.literal.try_deactivate(rest)?;
            out.push_str(end);
            self.formats.reopen_visually(out);
            return Some(consumed);
        }

        if let Some(consumed) = self.literal.try_activate(rest) {
            tracing::trace!(line = self.line_number, "literal region opened");
            self.formats.close_visually(out);
            out.push_str(&self.literal.start_output());
            return Some(consumed.min(rest.len()));
        }

        if let Some(resolved) = link::resolve(rest, self.document) {
            out.push_str(&resolved.link);
            return Some(resolved.consumed);
        }

        if let Some(cell) = self.table.convert(rest) {
            out.push_str(&cell.output);
            return Some(cell.consumed);
        }

        let id = (0..self.rules.inline.len()).find(|id| self.formats.applies(*id, rest))?;
        let consumed = if self.formats.is_active(id) {
            self.formats.deactivate(id, out)
        } else {
            self.formats.activate(id, out)
        };
        Some(consumed)
    }

    fn close_line(&self, mut out: String) -> String {
        if self.literal.wraps_lines() {
            out.push_str(self.literal.end_output());
        } else {
            self.formats.close_visually(&mut out);
        }
        out
    }
}
