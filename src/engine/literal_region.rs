//! The active literal region, if any.

use crate::rules::LiteralRule;

#[derive(Debug, Clone)]
struct ActiveRegion<'r> {
    rule: &'r LiteralRule,
    label: String,
}

#[derive(Debug, Clone)]
pub struct LiteralTracker<'r> {
    rules: &'r [LiteralRule],
    active: Option<ActiveRegion<'r>>,
}

impl<'r> LiteralTracker<'r> {
    pub fn new(rules: &'r [LiteralRule]) -> Self {
        LiteralTracker {
            rules,
            active: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Whether the active region is closed at every line end.
    pub fn wraps_lines(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|region| region.rule.close_at_line_end)
    }

    pub fn start_output(&self) -> String {
        self.active
            .as_ref()
            .map(|region| region.rule.start_output(&region.label))
            .unwrap_or_default()
    }

    pub fn end_output(&self) -> &'r str {
        self.active
            .as_ref()
            .map(|region| {
                let rule: &'r LiteralRule = region.rule;
                rule.output_end.as_str()
            })
            .unwrap_or_default()
    }

    /// Opens a region if `rest` starts with the start token of one of the rules. Returns the
    /// consumed input length.
    pub fn try_activate(&mut self, rest: &str) -> Option<usize> {
        let rules = self.rules;
        rules.iter().find_map(|rule| {
            let found = rule.match_start(rest)?;
            self.active = Some(ActiveRegion {
                rule,
                label: found.label,
            });
            Some(found.consumed)
        })
    }

    /// Closes the active region if `rest` starts with its end token. Returns the consumed input
    /// length.
    pub fn try_deactivate(&mut self, rest: &str) -> Option<usize> {
        let region = self.active.as_ref()?;
        if !region.rule.matches_end(rest) {
            return None;
        }
        let consumed = region.rule.input_end.len();
        self.active = None;
        Some(consumed)
    }
}
