//! Token rules
//!
//!     A token rule pairs a MoinMoin construct with its DokuWiki counterpart. Rules come in
//!     four families, each consulted at a different point while a line is processed:
//!
//!     - whole-line rules rewrite an entire line at once (headings),
//!     - line-start rules strip a list marker from the start of a line,
//!     - literal rules open a region in which no other markup is interpreted,
//!     - inline rules open and close formats anywhere within a line.
//!
//!     Rules are plain data. Whether a format is currently open is document state and lives in
//!     the engine, so one [`RuleSet`] can be shared by any number of concurrent conversions.
//!
//!     The order of the rules within a family is a priority: the first rule that matches wins.
//!     [`RuleSet::moinmoin`] declares the order the MoinMoin syntax needs (`'''` before `''`,
//!     highlight blocks before plain `{{{` blocks).

mod heading;
mod inline;
mod list;
mod literal;

pub use heading::HeadingRule;
pub use inline::{InlineBehavior, InlineKind, InlineRule};
pub use list::{LineStartRule, ListKind};
pub use literal::{LiteralKind, LiteralMatch, LiteralRule};

/// A rule that rewrites a complete line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WholeLineRule {
    Heading(HeadingRule),
}

impl WholeLineRule {
    /// Returns the converted line, or `None` if the rule does not apply.
    pub fn convert(&self, line: &str) -> Option<String> {
        match self {
            WholeLineRule::Heading(rule) => rule.convert(line),
        }
    }
}

/// Any of the supported rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenRule {
    WholeLine(WholeLineRule),
    LineStart(LineStartRule),
    Literal(LiteralRule),
    Inline(InlineRule),
}

/// The ordered rules driving a conversion.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleSet {
    pub whole_line: Vec<WholeLineRule>,
    pub line_start: Vec<LineStartRule>,
    pub literal: Vec<LiteralRule>,
    pub inline: Vec<InlineRule>,
}

impl RuleSet {
    /// Builds a rule set, keeping the relative order of the rules within each family.
    pub fn new(rules: impl IntoIterator<Item = TokenRule>) -> Self {
        let mut set = RuleSet::default();
        for rule in rules {
            set.push(rule);
        }
        set
    }

    /// Appends a rule with the lowest priority of its family.
    pub fn push(&mut self, rule: TokenRule) {
        match rule {
            TokenRule::WholeLine(rule) => self.whole_line.push(rule),
            TokenRule::LineStart(rule) => self.line_start.push(rule),
            TokenRule::Literal(rule) => self.literal.push(rule),
            TokenRule::Inline(rule) => self.inline.push(rule),
        }
    }

    /// The MoinMoin to DokuWiki rules.
    pub fn moinmoin() -> Self {
        RuleSet::new([
            TokenRule::WholeLine(WholeLineRule::Heading(HeadingRule::default())),
            TokenRule::LineStart(LineStartRule::bulleted()),
            TokenRule::LineStart(LineStartRule::numbered()),
            TokenRule::Literal(LiteralRule::highlight()),
            TokenRule::Literal(LiteralRule::nowiki()),
            TokenRule::Inline(InlineRule::of(InlineKind::Bold)),
            TokenRule::Inline(InlineRule::of(InlineKind::Italics)),
            TokenRule::Inline(InlineRule::of(InlineKind::Monospace)),
            TokenRule::Inline(InlineRule::of(InlineKind::Subscript)),
            TokenRule::Inline(InlineRule::of(InlineKind::Superscript)),
            TokenRule::Inline(InlineRule::of(InlineKind::StrikeThrough)),
            TokenRule::Inline(InlineRule::of(InlineKind::Underline)),
        ])
    }

    /// Only the inline rules for the given kinds, in the given order.
    pub fn inline_only(kinds: &[InlineKind]) -> Self {
        RuleSet::new(
            kinds
                .iter()
                .map(|kind| TokenRule::Inline(InlineRule::of(*kind))),
        )
    }
}
