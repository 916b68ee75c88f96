//! Removes inline formats without content, such as `****`.
//!
//! Closing formats at every line end leaves many empty pairs behind, e.g. a bold span that starts
//! at the end of a line produces `**` + `**` on that line.

use crate::rules::InlineRule;

#[derive(Debug, Clone, Default)]
pub struct TagCleaner {
    empty_pairs: Vec<String>,
}

impl TagCleaner {
    pub fn new(rules: &[InlineRule]) -> Self {
        TagCleaner {
            empty_pairs: rules
                .iter()
                .map(InlineRule::empty_output)
                .filter(|pair| !pair.is_empty())
                .collect(),
        }
    }

    /// Removes empty pairs until none is left. Removing a pair can produce a new one, as in
    /// `//****//`, so every removal starts over with the first pair.
    pub fn clean(&self, mut text: String) -> String {
        while let Some(pair) = self.empty_pairs.iter().find(|pair| text.contains(pair.as_str())) {
            text = text.replace(pair.as_str(), "");
        }
        text
    }
}
