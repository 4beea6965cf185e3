use crate::ConfigError;
use regex::Regex;

/// An ordered list of regular expressions matched against whole strings
///
/// Each pattern must match the entire candidate, not just a substring of it:
/// `"http://example\\.com/.*"` matches every page under that host, while
/// `"example"` only matches the literal string `example`.
///
/// # Examples
///
/// ```
/// use wordcrawl::config::PatternSet;
///
/// let patterns = PatternSet::new(&[".*\\.pdf".to_string()]).unwrap();
/// assert!(patterns.matches("https://example.com/report.pdf"));
/// assert!(!patterns.matches("https://example.com/report.pdf.html"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Regex>,
}

impl PatternSet {
    /// Compiles every pattern, failing on the first one that is malformed
    pub fn new(patterns: &[String]) -> Result<Self, ConfigError> {
        let patterns = patterns
            .iter()
            .map(|pattern| compile_full_match(pattern))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// Returns true if any pattern matches the whole of `candidate`
    pub fn matches(&self, candidate: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(candidate))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Anchors a pattern at both ends so it only matches complete strings
fn compile_full_match(pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(&format!("^(?:{})$", pattern)).map_err(|source| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}
