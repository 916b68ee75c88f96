//! Open inline formats
//!
//!     The stack holds the indices (into [`RuleSet::inline`]) of the formats that are open, in
//!     the order they were opened. DokuWiki needs properly nested tags, MoinMoin does not. So
//!     closing a format that is not on top closes every format above it, closes the target and
//!     then reopens the others in their original order.
//!
//!     At a line end every open format is closed visually and reopened at the start of the next
//!     line. Visual closes leave the stack untouched.

use crate::rules::{InlineBehavior, InlineRule};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct FormatState {
    active: bool,
    /// The format survived a line end and lost its start token.
    weird: bool,
}

#[derive(Debug, Clone)]
pub struct FormatStack<'r> {
    rules: &'r [InlineRule],
    states: Vec<FormatState>,
    open: Vec<usize>,
}

impl<'r> FormatStack<'r> {
    pub fn new(rules: &'r [InlineRule]) -> Self {
        FormatStack {
            rules,
            states: vec![FormatState::default(); rules.len()],
            open: Vec::new(),
        }
    }

    pub fn is_active(&self, id: usize) -> bool {
        self.states[id].active
    }

    /// Open formats, bottom first.
    pub fn open_formats(&self) -> impl Iterator<Item = &'r InlineRule> + '_ {
        let rules = self.rules;
        self.open.iter().map(move |id| &rules[*id])
    }

    /// Whether the rule opens or closes a span at the start of `rest`. May update the weird
    /// state of the rule.
    pub fn applies(&mut self, id: usize, rest: &str) -> bool {
        let rule = &self.rules[id];
        let state = &mut self.states[id];
        match rule.behavior {
            InlineBehavior::Balanced | InlineBehavior::SameLine => {
                if state.active {
                    rule.closes(rest)
                } else {
                    rule.opens(rest)
                }
            }
            InlineBehavior::Weird => {
                if !state.active && rule.opens(rest) {
                    state.weird = false;
                    true
                } else if state.active && rule.closes(rest) {
                    true
                } else if state.weird && rule.closes(rest) {
                    state.weird = false;
                    true
                } else {
                    false
                }
            }
        }
    }

    /// The end token as currently emitted; empty for weird formats.
    fn end_token(&self, id: usize) -> &'r str {
        let rules = self.rules;
        if self.states[id].weird {
            ""
        } else {
            &rules[id].output_end
        }
    }

    /// Opens the format. Returns the consumed input length.
    pub fn activate(&mut self, id: usize, out: &mut String) -> usize {
        let rule = &self.rules[id];
        self.open.push(id);
        self.states[id].active = true;
        out.push_str(&rule.output_start);
        rule.input_start.len()
    }

    /// Closes the format, reopening the formats opened after it. Returns the consumed input
    /// length.
    pub fn deactivate(&mut self, id: usize, out: &mut String) -> usize {
        let rule = &self.rules[id];
        let Some(position) = self.open.iter().rposition(|open| *open == id) else {
            self.states[id].active = false;
            return rule.input_end.len();
        };

        let mut reopen = String::new();
        for &above in self.open[position + 1..].iter().rev() {
            out.push_str(self.end_token(above));
            reopen.insert_str(0, &self.rules[above].output_start);
        }

        self.open.remove(position);
        self.states[id].active = false;
        out.push_str(self.end_token(id));
        out.push_str(&reopen);
        rule.input_end.len()
    }

    /// Reopens the open formats at the start of a line, bottom first.
    ///
    /// Weird formats turn weird instead of emitting their start token. A same-line format can
    /// never be open at a line start; it is returned as the error.
    pub fn reactivate(&mut self, out: &mut String) -> Result<(), &'r InlineRule> {
        let rules = self.rules;
        for &id in &self.open {
            let rule = &rules[id];
            match rule.behavior {
                InlineBehavior::Balanced => out.push_str(&rule.output_start),
                InlineBehavior::SameLine => return Err(rule),
                InlineBehavior::Weird => self.states[id].weird = true,
            }
        }
        Ok(())
    }

    /// Emits the end tokens of all open formats, top first. The formats stay open.
    pub fn close_visually(&self, out: &mut String) {
        for &id in self.open.iter().rev() {
            out.push_str(self.end_token(id));
        }
    }

    /// Emits the start tokens of all open formats, bottom first.
    pub fn reopen_visually(&self, out: &mut String) {
        for rule in self.open_formats() {
            out.push_str(&rule.output_start);
        }
    }
}
