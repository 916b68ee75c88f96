//! Pages
//!
//!     Everything around a single document:
//!
//!     - [`PageCrawler`] reads the current revision of every page in a MoinMoin `data/pages`
//!       directory.
//!     - [`IncompatibilityReport`] lists constructs that need manual work after the conversion.
//!     - [`PageWriter`] converts each page with [`crate::transform`] and writes it into a
//!       DokuWiki `data/pages` directory, using [`Transliterator`] for the file names.

mod crawler;
mod incompatibility;
mod page;
mod transliterate;
mod writer;

pub use crawler::{decode_page_name, CrawlError, PageCrawler};
pub use incompatibility::{
    Incompatibility, IncompatibilityDefinitions, IncompatibilityError, IncompatibilityReport,
    DEFAULT_INCOMPATIBILITIES,
};
pub use page::Page;
pub use transliterate::{MappingError, Transliterator};
pub use writer::{PageWriter, WriteError};
