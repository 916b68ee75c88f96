//! File names for DokuWiki pages
//!
//! DokuWiki stores pages as lower-case ASCII file names. Characters outside that range are
//! mapped to replacements, separators become `_`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

static UNDERSCORES: Lazy<Regex> = Lazy::new(|| Regex::new("_+").expect("valid regex"));

const DEFAULT_MAPPINGS: &[(char, &str)] = &[
    (' ', "_"),
    (',', "_"),
    ('!', "_"),
    ('&', "_"),
    ('(', "_"),
    (')', "_"),
    ('/', "_"),
    ('\\', "_"),
    ('ä', "ae"),
    ('Ä', "Ae"),
    ('ö', "oe"),
    ('Ö', "Oe"),
    ('ü', "ue"),
    ('Ü', "Ue"),
    ('ß', "ss"),
    ('ç', "c"),
    ('Ç', "C"),
    ('á', "a"),
    ('Á', "A"),
    ('à', "a"),
    ('À', "A"),
    ('é', "e"),
    ('É', "E"),
    ('è', "e"),
    ('È', "E"),
    ('û', "u"),
];

#[derive(Debug)]
pub enum MappingError {
    Io { path: PathBuf, source: std::io::Error },
    OddLineCount { path: PathBuf, lines: usize },
    KeyNotACharacter { path: PathBuf, line: usize, key: String },
}

impl fmt::Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MappingError::Io { path, source } => {
                write!(f, "Could not read mapping file {}: {}", path.display(), source)
            }
            MappingError::OddLineCount { path, lines } => write!(
                f,
                "Mapping file {} must have an even number of lines, found {}",
                path.display(),
                lines
            ),
            MappingError::KeyNotACharacter { path, line, key } => write!(
                f,
                "Mapping file {} line {}: '{}' is not a single character",
                path.display(),
                line,
                key
            ),
        }
    }
}

impl std::error::Error for MappingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MappingError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Transliterator {
    mappings: HashMap<char, String>,
}

impl Default for Transliterator {
    fn default() -> Self {
        Transliterator {
            mappings: DEFAULT_MAPPINGS
                .iter()
                .map(|(from, to)| (*from, to.to_string()))
                .collect(),
        }
    }
}

impl Transliterator {
    /// The built-in mappings extended by a mapping file.
    ///
    /// The file alternates between a character and its replacement, one per line. Entries
    /// override built-in mappings.
    pub fn with_mapping_file(path: impl AsRef<Path>) -> Result<Self, MappingError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| MappingError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut transliterator = Self::default();
        transliterator.add_mappings(&text, path)?;
        Ok(transliterator)
    }

    fn add_mappings(&mut self, text: &str, path: &Path) -> Result<(), MappingError> {
        let mut lines: Vec<&str> = text.lines().collect();
        if lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        if lines.len() % 2 != 0 {
            return Err(MappingError::OddLineCount {
                path: path.to_path_buf(),
                lines: lines.len(),
            });
        }

        for (index, pair) in lines.chunks(2).enumerate() {
            let mut chars = pair[0].chars();
            let (Some(key), None) = (chars.next(), chars.next()) else {
                return Err(MappingError::KeyNotACharacter {
                    path: path.to_path_buf(),
                    line: index * 2 + 1,
                    key: pair[0].to_string(),
                });
            };
            self.insert(key, pair[1]);
        }
        Ok(())
    }

    /// Adds or replaces the mapping of a single character.
    pub fn insert(&mut self, from: char, to: impl Into<String>) {
        self.mappings.insert(from, to.into());
    }

    /// Maps every character, then collapses runs of `_` and trims one `_` from both ends.
    pub fn transliterate(&self, text: &str) -> String {
        let mapped: String = text
            .chars()
            .map(|c| match self.mappings.get(&c) {
                Some(replacement) => replacement.clone(),
                None => c.to_string(),
            })
            .collect();
        let collapsed = UNDERSCORES.replace_all(&mapped, "_");
        let trimmed = collapsed.strip_prefix('_').unwrap_or(&collapsed);
        let trimmed = trimmed.strip_suffix('_').unwrap_or(trimmed);
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_mappings() {
        let t = Transliterator::default();
        assert_eq!(t.transliterate("Über Straße"), "Ueber_Strasse");
        assert_eq!(t.transliterate("Ça, va!"), "Ca_va");
        assert_eq!(t.transliterate("(a) & (b)"), "a_b");
        assert_eq!(t.transliterate("plain"), "plain");
    }

    #[test]
    fn test_underscores_are_collapsed_and_trimmed() {
        let t = Transliterator::default();
        assert_eq!(t.transliterate("__a___b__"), "a_b");
        assert_eq!(t.transliterate("_"), "");
    }

    #[test]
    fn test_mapping_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "ä\na\nø\noe\n").unwrap();
        let t = Transliterator::with_mapping_file(file.path()).unwrap();
        assert_eq!(t.transliterate("äø"), "aoe");
    }

    #[test]
    fn test_inserted_mappings_replace_defaults() {
        let mut t = Transliterator::default();
        t.insert('ü', "u");
        t.insert('#', "_sharp_");
        assert_eq!(t.transliterate("Grün"), "Grun");
        assert_eq!(t.transliterate("C#"), "C_sharp");
    }

    #[test]
    fn test_mapping_file_with_odd_line_count() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "ä\na\nø\n").unwrap();
        let err = Transliterator::with_mapping_file(file.path()).unwrap_err();
        assert!(matches!(err, MappingError::OddLineCount { lines: 3, .. }));
    }

    #[test]
    fn test_mapping_key_must_be_one_character() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "ab\nc\n").unwrap();
        let err = Transliterator::with_mapping_file(file.path()).unwrap_err();
        assert!(matches!(err, MappingError::KeyNotACharacter { line: 1, .. }));
    }
}
