//! MoinMoin page directories
//!
//!     A MoinMoin wiki keeps one directory per page below `data/pages`:
//!
//!         data/pages/
//!             FrontPage/
//!                 current             (holds the revision number, e.g. `00000003`)
//!                 revisions/
//!                     00000001
//!                     00000003
//!             Parent(2f)Child/
//!
//!     Directory names quote every character outside a safe ASCII range as hex bytes in
//!     parentheses; `(2f)` is the `/` separating a page from its parent. Adjacent quoted
//!     characters share one pair of parentheses, e.g. `(c3a4c3b6)` for `äö` in UTF-8.
//!
//!     Deleted pages keep their directory but point to a missing revision. They are skipped.

use super::Page;
use encoding_rs::Encoding;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum CrawlError {
    Io { path: PathBuf, source: std::io::Error },
    UnclosedParenthesis { name: String },
    InvalidHex { name: String, group: String },
}

impl fmt::Display for CrawlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrawlError::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            CrawlError::UnclosedParenthesis { name } => write!(
                f,
                "Opening parenthesis without closing parenthesis found in '{name}'"
            ),
            CrawlError::InvalidHex { name, group } => {
                write!(f, "Invalid quoted characters '({group})' in '{name}'")
            }
        }
    }
}

impl std::error::Error for CrawlError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CrawlError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> CrawlError + '_ {
    move |source| CrawlError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Decodes a quoted MoinMoin directory name.
pub fn decode_page_name(name: &str, encoding: &'static Encoding) -> Result<String, CrawlError> {
    let mut decoded = String::new();
    let mut rest = name;
    while let Some(start) = rest.find('(') {
        let end = rest[start..]
            .find(')')
            .map(|end| start + end)
            .ok_or_else(|| CrawlError::UnclosedParenthesis {
                name: name.to_string(),
            })?;
        decoded.push_str(&rest[..start]);

        let group = &rest[start + 1..end];
        let bytes = hex::decode(group).map_err(|_| CrawlError::InvalidHex {
            name: name.to_string(),
            group: group.to_string(),
        })?;
        let (text, _) = encoding.decode_without_bom_handling(&bytes);
        decoded.push_str(&text);

        rest = &rest[end + 1..];
    }
    decoded.push_str(rest);
    Ok(decoded)
}

/// Reads the current revision of every page below a MoinMoin `data/pages` directory.
#[derive(Debug, Clone)]
pub struct PageCrawler {
    pages_dir: PathBuf,
    encoding: &'static Encoding,
}

impl PageCrawler {
    pub fn new(pages_dir: impl Into<PathBuf>, encoding: &'static Encoding) -> Self {
        PageCrawler {
            pages_dir: pages_dir.into(),
            encoding,
        }
    }

    /// All pages with content, sorted by directory name. Pages that cannot be read are
    /// logged and skipped.
    pub fn crawl(&self) -> Result<Vec<Page>, CrawlError> {
        let mut dirs = fs::read_dir(&self.pages_dir)
            .map_err(io_error(&self.pages_dir))?
            .map(|entry| entry.map(|entry| entry.path()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(io_error(&self.pages_dir))?;
        dirs.sort();

        let mut pages = Vec::new();
        for dir in dirs {
            let dir_name = dir
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            if !dir.is_dir() {
                tracing::info!("Skipped (not a directory): {dir_name}");
                continue;
            }
            match self.read_page(&dir, &dir_name) {
                Ok(Some(page)) => {
                    tracing::info!("Created: {:?} - {}", page.ancestors, page.name);
                    pages.push(page);
                }
                Ok(None) => {}
                Err(err) => tracing::warn!("Skipped {dir_name}: {err}"),
            }
        }
        Ok(pages)
    }

    fn read_page(&self, dir: &Path, dir_name: &str) -> Result<Option<Page>, CrawlError> {
        let Some(revision) = self.current_revision(dir)? else {
            tracing::info!("{} NOT FOUND (page might be deleted)", dir.display());
            return Ok(None);
        };

        let bytes = fs::read(&revision).map_err(io_error(&revision))?;
        let (text, _, _) = self.encoding.decode(&bytes);
        let lines: Vec<String> = text.lines().map(|line| format!("{line}\n")).collect();
        if lines.is_empty() {
            tracing::info!("Skipped (no content): {dir_name}");
            return Ok(None);
        }

        let long_name = decode_page_name(dir_name, self.encoding)?;
        let mut ancestors: Vec<String> = long_name.split('/').map(str::to_string).collect();
        let name = ancestors.pop().unwrap_or_default();
        Ok(Some(Page::new(ancestors, name, lines)))
    }

    /// Path of the current revision, if the page has one.
    fn current_revision(&self, dir: &Path) -> Result<Option<PathBuf>, CrawlError> {
        let current = dir.join("current");
        if !current.is_file() {
            return Ok(None);
        }
        let content = fs::read_to_string(&current).map_err(io_error(&current))?;
        let Some(revision) = content.lines().next().map(str::trim) else {
            return Ok(None);
        };
        let path = dir.join("revisions").join(revision);
        Ok(path.is_file().then_some(path))
    }
}
