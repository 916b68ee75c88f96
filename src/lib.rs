//! # moin2doku
//!
//! Converts MoinMoin wiki pages into DokuWiki pages.
//!
//! The crate is split in three layers:
//!
//! - [`rules`]: the token rules describing how a MoinMoin construct maps onto its DokuWiki
//!   counterpart (headings, lists, inline formats, literal regions).
//! - [`engine`]: the line-by-line transducer. It drives the rules over a document, keeps the
//!   per-document state (open formats, literal region, table cursor) and produces the
//!   converted text. Start with [`transform`].
//! - [`pages`]: everything around a single document: crawling a MoinMoin `data/pages`
//!   directory, transliterating page names into DokuWiki file names, writing the output tree
//!   and reporting constructs that cannot be converted automatically.

pub mod engine;
pub mod pages;
pub mod rules;

pub use engine::{transform, Options, TransformError};
pub use rules::RuleSet;
