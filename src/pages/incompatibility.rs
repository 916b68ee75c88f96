//! Incompatibility report
//!
//!     Some MoinMoin constructs have no DokuWiki counterpart, or are not converted. The report
//!     lists, per page, which of the known problematic sequences occur, so they can be fixed by
//!     hand after the conversion.
//!
//!     Definitions are JSON:
//!
//!         {
//!           "page name incompatibilities": [{"trigger": "?", "comment": "..."}],
//!           "content incompatibilities": [
//!             {"trigger": "||<style=", "exceptions": ["||<style=\"text-align: left;\">"]}
//!           ]
//!         }
//!
//!     A content trigger is not reported where the text at the trigger starts with one of its
//!     exceptions.

use super::Page;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Built-in definitions.
pub const DEFAULT_INCOMPATIBILITIES: &str = include_str!("../../defaults/incompatibilities.json");

const REPORT_HEADER: &str = "MoinMoin2DokuWikiWriter v";
const PAGE_MESSAGE: &str = " contains the following problematic sequences:\n";
const REPORT_FOOTER: &str =
    "(the sequences might not be problematic as they might e.g. be within nowiki.tags)";

#[derive(Debug)]
pub enum IncompatibilityError {
    Io { path: PathBuf, source: std::io::Error },
    Json(serde_json::Error),
}

impl fmt::Display for IncompatibilityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncompatibilityError::Io { path, source } => write!(
                f,
                "Could not read incompatibilities file {}: {}",
                path.display(),
                source
            ),
            IncompatibilityError::Json(err) => write!(f, "Invalid incompatibilities: {err}"),
        }
    }
}

impl std::error::Error for IncompatibilityError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IncompatibilityError::Io { source, .. } => Some(source),
            IncompatibilityError::Json(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for IncompatibilityError {
    fn from(err: serde_json::Error) -> Self {
        IncompatibilityError::Json(err)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incompatibility {
    pub trigger: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exceptions: Vec<String>,
}

impl Incompatibility {
    /// Byte offset of the first occurrence of the trigger not covered by an exception.
    fn find_in(&self, line: &str) -> Option<usize> {
        let step = self.trigger.chars().next()?.len_utf8();
        let mut from = 0;
        while let Some(offset) = line[from..].find(self.trigger.as_str()) {
            let index = from + offset;
            let excepted = self
                .exceptions
                .iter()
                .any(|exception| line[index..].starts_with(exception.as_str()));
            if !excepted {
                return Some(index);
            }
            from = index + step;
        }
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncompatibilityDefinitions {
    #[serde(rename = "page name incompatibilities")]
    pub page_name: Vec<Incompatibility>,
    #[serde(rename = "content incompatibilities")]
    pub content: Vec<Incompatibility>,
}

impl IncompatibilityDefinitions {
    pub fn builtin() -> Result<Self, IncompatibilityError> {
        Self::from_json(DEFAULT_INCOMPATIBILITIES)
    }

    pub fn from_json(json: &str) -> Result<Self, IncompatibilityError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads definitions from a file. They replace the built-in ones.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, IncompatibilityError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| IncompatibilityError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Human readable listing of all definitions.
    pub fn listing(&self) -> String {
        let mut listing = String::from(
            "Known sequences that might appear in MoinMoin pages and are not compatible with \
             DokuWiki (or this converter). Warnings will be logged to a text file if these \
             sequences are found in a MoinMoin page:\n\n",
        );
        listing.push_str("in page names:\n");
        push_entries(&mut listing, &self.page_name);
        listing.push_str("\nin page content:\n");
        push_entries(&mut listing, &self.content);
        listing
    }
}

fn push_entries(listing: &mut String, entries: &[Incompatibility]) {
    for entry in entries {
        let _ = writeln!(listing, "{:<15}", entry.trigger);
        if !entry.comment.trim().is_empty() {
            let _ = writeln!(listing, "{:<15} {}", "->", entry.comment);
        }
    }
}

#[derive(Debug, Clone)]
pub struct IncompatibilityReport {
    definitions: IncompatibilityDefinitions,
}

impl IncompatibilityReport {
    pub fn new(definitions: IncompatibilityDefinitions) -> Self {
        IncompatibilityReport { definitions }
    }

    /// Checks all pages and renders the report.
    pub fn check(&self, pages: &[Page], version: &str) -> String {
        let mut report = format!("{REPORT_HEADER}{version}\n\n\n");
        for page in pages {
            let findings = self.findings(page);
            if findings.is_empty() {
                continue;
            }
            tracing::debug!(page = %page.long_name("/"), count = findings.len(), "incompatibilities found");
            report.push('\'');
            report.push_str(&page.long_name("."));
            report.push('\'');
            report.push_str(PAGE_MESSAGE);
            for finding in findings {
                report.push_str("  ");
                report.push_str(&finding);
                report.push('\n');
            }
            report.push_str("\n\n");
        }
        report.push_str(REPORT_FOOTER);
        report
    }

    /// Triggers found in the page, page names first.
    fn findings(&self, page: &Page) -> Vec<String> {
        let mut findings = Vec::new();
        for entry in &self.definitions.page_name {
            let trigger = entry.trigger.as_str();
            let in_names = page.name.contains(trigger)
                || page.ancestors.iter().any(|ancestor| ancestor.contains(trigger));
            if in_names {
                findings.push(format!("{trigger} (in page name or super pages)"));
            }
        }
        for entry in &self.definitions.content {
            if page.lines.iter().any(|line| entry.find_in(line).is_some()) {
                findings.push(entry.trigger.clone());
            }
        }
        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> IncompatibilityReport {
        IncompatibilityReport::new(IncompatibilityDefinitions::builtin().unwrap())
    }

    fn lines(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|line| line.to_string()).collect()
    }

    #[test]
    fn test_builtin_definitions_parse() {
        let definitions = IncompatibilityDefinitions::builtin().unwrap();
        assert_eq!(definitions.page_name[0].trigger, "?");
        let style = definitions
            .content
            .iter()
            .find(|entry| entry.trigger == "||<style=")
            .unwrap();
        assert_eq!(style.exceptions.len(), 3);
    }

    #[test]
    fn test_content_trigger() {
        let page = Page::new(vec![], "Page 1", lines(&["regular\n", "----\n", "below divider"]));
        assert_eq!(
            report().check(&[page], "0.1.test"),
            "MoinMoin2DokuWikiWriter v0.1.test\n\n\n\
             'Page 1' contains the following problematic sequences:\n  ----\n\n\n\
             (the sequences might not be problematic as they might e.g. be within nowiki.tags)"
        );
    }

    #[test]
    fn test_exceptions_are_not_reported() {
        let page = Page::new(
            vec![],
            "Page 3",
            lines(&["||regular||||||<style=\"text-align: left;\">styled||"]),
        );
        assert_eq!(
            report().check(&[page], "0.1.test"),
            "MoinMoin2DokuWikiWriter v0.1.test\n\n\n\
             (the sequences might not be problematic as they might e.g. be within nowiki.tags)"
        );
    }

    #[test]
    fn test_trigger_after_excepted_occurrence() {
        let entry = &IncompatibilityDefinitions::builtin()
            .unwrap()
            .content
            .into_iter()
            .find(|entry| entry.trigger == "||<style=")
            .unwrap();
        let line = "||<style=\"text-align: left;\">a||<style=\"color: red;\">b||";
        assert_eq!(entry.find_in(line), Some(30));
    }

    #[test]
    fn test_listing_mentions_comments() {
        let listing = IncompatibilityDefinitions::builtin().unwrap().listing();
        assert!(listing.contains("in page names:\n?"));
        assert!(listing.contains(&format!("{:<15} horizontal rules are not converted", "->")));
    }
}
