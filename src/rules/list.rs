//! List markers
//!
//! MoinMoin list items are indented by at least one space. The amount of leading whitespace is
//! the nesting depth; DokuWiki expects two spaces per level in front of its marker.

/// Control characters and spaces, as stripped around list items.
pub(crate) fn is_blank(c: char) -> bool {
    c <= ' '
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Bulleted,
    Numbered,
}

/// Replaces a list marker at the start of an indented line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineStartRule {
    pub kind: ListKind,
    pub prefixes: Vec<String>,
    pub output: String,
}

/// A list item with its marker removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrippedLine<'a> {
    pub indentation: usize,
    pub content: &'a str,
}

impl LineStartRule {
    pub fn bulleted() -> Self {
        LineStartRule {
            kind: ListKind::Bulleted,
            prefixes: vec!["* ".to_string()],
            output: "* ".to_string(),
        }
    }

    pub fn numbered() -> Self {
        LineStartRule {
            kind: ListKind::Numbered,
            prefixes: vec!["1. ".to_string(), "a. ".to_string(), "i. ".to_string()],
            output: "- ".to_string(),
        }
    }

    /// Strips the first matching prefix. Lines that do not start with a space are never list
    /// items.
    pub fn strip<'a>(&self, line: &'a str) -> Option<StrippedLine<'a>> {
        if !line.starts_with(' ') {
            return None;
        }
        let trimmed = line.trim_matches(is_blank);
        let indentation = line.len() - line.trim_start_matches(is_blank).len();
        self.prefixes
            .iter()
            .find(|prefix| trimmed.starts_with(prefix.as_str()))
            .map(|prefix| StrippedLine {
                indentation,
                content: &trimmed[prefix.len()..],
            })
    }

    /// The DokuWiki marker for an item at the given depth.
    pub fn output_for(&self, indentation: usize) -> String {
        format!("{}{}", "  ".repeat(indentation), self.output)
    }
}
