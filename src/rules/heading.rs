//! Heading rule
//!
//! MoinMoin counts heading levels up (`==` is the top level), DokuWiki counts them down (`======`
//! is the top level). A heading line must start and end with the same number of markers, each
//! run separated from the title by a single space.

/// Rewrites `== Title ==` headings, inverting the marker count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingRule {
    pub marker: char,
    /// Deepest level both dialects support.
    pub levels: usize,
}

impl Default for HeadingRule {
    fn default() -> Self {
        HeadingRule {
            marker: '=',
            levels: 6,
        }
    }
}

impl HeadingRule {
    /// Returns the DokuWiki heading, or `None` if the line is not a well formed heading.
    pub fn convert(&self, line: &str) -> Option<String> {
        let chars: Vec<char> = line.chars().collect();
        let count = self.opening_markers(&chars)?;
        if self.closing_markers(&chars)? != count {
            return None;
        }

        let start = count + 1;
        let end = chars.len() - (count + 1);
        if start > end {
            return None;
        }
        let title: String = chars[start..end].iter().collect();

        let level = (self.levels + 2).saturating_sub(count).max(2);
        let markers: String = std::iter::repeat(self.marker).take(level).collect();
        Some(format!("{markers} {title} {markers}"))
    }

    /// Number of leading markers, if they are followed by a space and take up at most half the
    /// line.
    fn opening_markers(&self, chars: &[char]) -> Option<usize> {
        let count = chars.iter().take_while(|c| **c == self.marker).count();
        let valid = count >= 2 && count <= chars.len() / 2 && chars.get(count) == Some(&' ');
        valid.then_some(count)
    }

    /// Number of trailing markers, if they are preceded by a space and take up at most half the
    /// line.
    fn closing_markers(&self, chars: &[char]) -> Option<usize> {
        let count = chars.iter().rev().take_while(|c| **c == self.marker).count();
        let valid = count >= 2
            && count <= chars.len() / 2
            && chars.len() > count
            && chars[chars.len() - count - 1] == ' ';
        valid.then_some(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(line: &str) -> Option<String> {
        HeadingRule::default().convert(line)
    }

    #[test]
    fn test_levels_are_inverted() {
        assert_eq!(convert("== H1 =="), Some("====== H1 ======".to_string()));
        assert_eq!(convert("=== H2 ==="), Some("===== H2 =====".to_string()));
        assert_eq!(convert("==== H3 ===="), Some("==== H3 ====".to_string()));
        assert_eq!(convert("===== H4 ====="), Some("=== H4 ===".to_string()));
        assert_eq!(convert("====== H5 ======"), Some("== H5 ==".to_string()));
        assert_eq!(convert("======= H6 ======="), Some("== H6 ==".to_string()));
    }

    #[test]
    fn test_title_may_contain_markers() {
        assert_eq!(
            convert("== H1 == with equals signs =="),
            Some("====== H1 == with equals signs ======".to_string())
        );
    }

    #[test]
    fn test_malformed_headings_are_rejected() {
        assert_eq!(convert("= regular ="), None);
        assert_eq!(convert("=== missing equal at end =="), None);
        assert_eq!(convert("== too many equals at end ==="), None);
        assert_eq!(convert("== missing space at end=="), None);
        assert_eq!(convert("==missing space at start =="), None);
        assert_eq!(convert("== space at end == "), None);
        assert_eq!(convert(" == space at start =="), None);
        assert_eq!(convert("a== letter at start =="), None);
        assert_eq!(convert("===="), None);
        assert_eq!(convert("== =="), None);
        assert_eq!(convert(""), None);
    }
}
