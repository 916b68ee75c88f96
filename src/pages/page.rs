/// A MoinMoin page.
///
/// MoinMoin pages nest: `Parent/Child` is the page `Child` below `Parent`. The outer pages are
/// kept as `ancestors`, outermost first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub ancestors: Vec<String>,
    pub name: String,
    /// Raw lines of the current revision, each with its trailing `\n`.
    pub lines: Vec<String>,
}

impl Page {
    pub fn new(ancestors: Vec<String>, name: impl Into<String>, lines: Vec<String>) -> Self {
        Page {
            ancestors,
            name: name.into(),
            lines,
        }
    }

    /// The ancestors and the name, joined by `divider`.
    pub fn long_name(&self, divider: &str) -> String {
        self.ancestors
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.name.as_str()))
            .collect::<Vec<_>>()
            .join(divider)
    }
}
