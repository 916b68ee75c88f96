//! DokuWiki output tree
//!
//! DokuWiki keeps a page `Parent/Child` as `data/pages/parent/child.txt`. File and directory
//! names are transliterated and lower-cased. Existing files are never overwritten.

use super::{Page, Transliterator};
use crate::engine::{transform, Options, TransformError};
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

const SUFFIX: &str = ".txt";

#[derive(Debug)]
pub enum WriteError {
    Io { path: PathBuf, source: std::io::Error },
    Transform { page: String, source: TransformError },
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteError::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            WriteError::Transform { page, source } => {
                write!(f, "Could not convert '{page}': {source}")
            }
        }
    }
}

impl std::error::Error for WriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WriteError::Io { source, .. } => Some(source),
            WriteError::Transform { source, .. } => Some(source),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PageWriter {
    output_dir: PathBuf,
    options: Options,
    transliterator: Transliterator,
}

impl PageWriter {
    pub fn new(output_dir: impl Into<PathBuf>, options: Options, transliterator: Transliterator) -> Self {
        PageWriter {
            output_dir: output_dir.into(),
            options,
            transliterator,
        }
    }

    /// The file a page is written to.
    pub fn output_path(&self, page: &Page) -> PathBuf {
        let mut path = self.output_dir.clone();
        for ancestor in &page.ancestors {
            path.push(self.file_name(ancestor));
        }
        path.push(format!("{}{SUFFIX}", self.file_name(&page.name)));
        path
    }

    fn file_name(&self, name: &str) -> String {
        self.transliterator.transliterate(name).to_lowercase()
    }

    /// Converts and writes all pages. Pages that fail are logged and skipped. Returns the number
    /// of written pages.
    pub fn write(&self, pages: &[Page]) -> usize {
        let mut written = 0;
        for page in pages {
            match self.write_page(page) {
                Ok(path) => {
                    tracing::info!("Written: {:?} - {} ({})", page.ancestors, page.name, path.display());
                    written += 1;
                }
                Err(err) => tracing::error!("{err}"),
            }
        }
        written
    }

    /// Converts and writes a single page. Returns the path of the new file.
    pub fn write_page(&self, page: &Page) -> Result<PathBuf, WriteError> {
        let converted =
            transform(&page.lines, &page.name, &self.options).map_err(|source| {
                WriteError::Transform {
                    page: page.long_name("/"),
                    source,
                }
            })?;

        let path = self.output_path(page);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error(parent))?;
        }
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(io_error(&path))?;
        file.write_all(converted.as_bytes())
            .map_err(io_error(&path))?;
        Ok(path)
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> WriteError + '_ {
    move |source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    }
}
