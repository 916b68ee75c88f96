//! Literal regions
//!
//! Within `{{{` and `}}}` MoinMoin shows text as is. DokuWiki has two counterparts:
//!
//! - `<code LANG>` blocks, used for `{{{#!highlight LANG` regions. They may span lines.
//! - `<nowiki>` spans, used for plain `{{{` regions. A nowiki span collapses line breaks, so the
//!   engine closes it at every line end and reopens it on the next line.

use super::list::is_blank;

/// Placeholder in [`LiteralRule::output_start`] replaced by the captured label.
pub const LABEL: &str = "{label}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    /// The start token is followed by a label and the rest of the line is dropped.
    Labeled,
    /// The start token only counts if the region ends on the same line or nothing else follows.
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralRule {
    pub kind: LiteralKind,
    pub input_start: String,
    pub input_end: String,
    pub output_start: String,
    pub output_end: String,
    /// Whether the output region has to be closed at each line end and reopened on the next.
    pub close_at_line_end: bool,
}

/// A recognized start token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralMatch {
    /// Bytes of the line consumed by the start token.
    pub consumed: usize,
    pub label: String,
}

impl LiteralRule {
    pub fn highlight() -> Self {
        LiteralRule {
            kind: LiteralKind::Labeled,
            input_start: "{{{#!highlight ".to_string(),
            input_end: "}}}".to_string(),
            output_start: format!("<code {LABEL}>"),
            output_end: "</code>".to_string(),
            close_at_line_end: false,
        }
    }

    pub fn nowiki() -> Self {
        LiteralRule {
            kind: LiteralKind::Plain,
            input_start: "{{{".to_string(),
            input_end: "}}}".to_string(),
            output_start: "<nowiki>".to_string(),
            output_end: "</nowiki>".to_string(),
            close_at_line_end: true,
        }
    }

    /// Recognizes the start token at the beginning of `rest`.
    pub fn match_start(&self, rest: &str) -> Option<LiteralMatch> {
        let after = rest.strip_prefix(self.input_start.as_str())?;
        match self.kind {
            LiteralKind::Labeled => Some(LiteralMatch {
                consumed: rest.len(),
                label: after.split(' ').next().unwrap_or_default().to_string(),
            }),
            LiteralKind::Plain => {
                let multi_line = after.trim_matches(is_blank).is_empty();
                (multi_line || after.contains(self.input_end.as_str())).then(|| LiteralMatch {
                    consumed: self.input_start.len(),
                    label: String::new(),
                })
            }
        }
    }

    pub fn matches_end(&self, rest: &str) -> bool {
        rest.starts_with(self.input_end.as_str())
    }

    pub fn start_output(&self, label: &str) -> String {
        self.output_start.replace(LABEL, label)
    }
}
