//! Link rewriting
//!
//! MoinMoin links are page paths separated by `/`, relative to the current page when they start
//! with `/` or `../`. DokuWiki uses `:` as namespace separator and `.:` for the current
//! namespace. External links are kept as they are.

const START: &str = "[[";
const END: &str = "]]";
const EXTERNAL: [&str; 2] = ["http://", "https://"];
const INVALID: [char; 2] = [':', '?'];

/// A rewritten link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    pub consumed: usize,
    pub link: String,
}

/// Rewrites the link at the start of `rest`. `page` is the name of the page containing the link.
pub fn resolve(rest: &str, page: &str) -> Option<ResolvedLink> {
    if !rest.starts_with(START) {
        return None;
    }
    let end = rest.find(END)?;
    let target = &rest[START.len()..end];

    let target = if EXTERNAL.iter().any(|prefix| target.starts_with(prefix)) {
        target.to_string()
    } else {
        let target = target.replace(INVALID, "_");
        let target = if target.starts_with('/') {
            format!(".:{page}{target}")
        } else if target.starts_with("../") {
            format!(".:{page}:{target}")
        } else {
            format!(":{target}")
        };
        target.replace('/', ":")
    };

    Some(ResolvedLink {
        consumed: end + END.len(),
        link: format!("{START}{target}{END}"),
    })
}
