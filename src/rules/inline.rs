//! Inline format rules
//!
//!     Inline formats open and close anywhere within a line. Three behaviors exist in MoinMoin:
//!
//!     - balanced formats (bold, italics) stay open across lines. The engine closes them at
//!       every line end and reopens them on the next line.
//!     - same-line formats (monospace, subscript, superscript) only open when their end token
//!       follows on the same line. Otherwise the start token is plain text.
//!     - weird formats (strike-through, underline) behave like balanced formats within a line.
//!       Once they survive a line end, MoinMoin forgets about their start: the next line does not
//!       reopen them and their next end token closes them without output.
//!
//!     Matching depends on whether the format is open, which is per-document state owned by the
//!     engine. The rule only answers questions about the text in front of it.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InlineKind {
    Bold,
    Italics,
    Monospace,
    Subscript,
    Superscript,
    StrikeThrough,
    Underline,
}

impl fmt::Display for InlineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InlineKind::Bold => "bold",
            InlineKind::Italics => "italics",
            InlineKind::Monospace => "monospace",
            InlineKind::Subscript => "subscript",
            InlineKind::Superscript => "superscript",
            InlineKind::StrikeThrough => "strike-through",
            InlineKind::Underline => "underline",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineBehavior {
    Balanced,
    SameLine,
    Weird,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineRule {
    pub kind: InlineKind,
    pub behavior: InlineBehavior,
    pub input_start: String,
    pub input_end: String,
    pub output_start: String,
    pub output_end: String,
}

impl InlineRule {
    pub fn new(
        kind: InlineKind,
        behavior: InlineBehavior,
        input: (&str, &str),
        output: (&str, &str),
    ) -> Self {
        InlineRule {
            kind,
            behavior,
            input_start: input.0.to_string(),
            input_end: input.1.to_string(),
            output_start: output.0.to_string(),
            output_end: output.1.to_string(),
        }
    }

    /// The MoinMoin definition of a format.
    pub fn of(kind: InlineKind) -> Self {
        use InlineBehavior::*;
        match kind {
            InlineKind::Bold => Self::new(kind, Balanced, ("'''", "'''"), ("**", "**")),
            InlineKind::Italics => Self::new(kind, Balanced, ("''", "''"), ("//", "//")),
            InlineKind::Monospace => Self::new(kind, SameLine, ("`", "`"), ("''", "''")),
            InlineKind::Subscript => Self::new(kind, SameLine, (",,", ",,"), ("<sub>", "</sub>")),
            InlineKind::Superscript => {
                Self::new(kind, SameLine, ("^", "^"), ("<sup>", "</sup>"))
            }
            InlineKind::StrikeThrough => {
                Self::new(kind, Weird, ("--(", ")--"), ("<del>", "</del>"))
            }
            InlineKind::Underline => Self::new(kind, Weird, ("__", "__"), ("__", "__")),
        }
    }

    /// Whether `rest` starts a span of this format while it is closed.
    pub fn opens(&self, rest: &str) -> bool {
        if !rest.starts_with(&self.input_start) {
            return false;
        }
        match self.behavior {
            InlineBehavior::SameLine => rest[self.input_start.len()..].contains(&self.input_end),
            InlineBehavior::Balanced | InlineBehavior::Weird => true,
        }
    }

    /// Whether `rest` ends an open span of this format.
    pub fn closes(&self, rest: &str) -> bool {
        rest.starts_with(&self.input_end)
    }

    /// Start and end output with nothing in between, as removed by the tag cleaner.
    pub fn empty_output(&self) -> String {
        format!("{}{}", self.output_start, self.output_end)
    }
}
