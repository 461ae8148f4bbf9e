use crate::error::{FixVersionError, Result};
use regex::Regex;

/// Branch name matcher with `*` wildcards (e.g., "release/*")
#[derive(Debug, Clone)]
pub struct BranchPattern {
    pub pattern: String,
    regex: Regex,
}

impl BranchPattern {
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        let body = pattern
            .split('*')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*");
        let regex = Regex::new(&format!("^{}$", body)).map_err(|e| {
            FixVersionError::config(format!("Invalid branch pattern '{}': {}", pattern, e))
        })?;

        Ok(BranchPattern { pattern, regex })
    }

    pub fn matches(&self, ref_name: &str) -> bool {
        self.regex.is_match(ref_name)
    }
}

/// Ascending branch priority list; later entries win
#[derive(Debug, Clone, Default)]
pub struct BranchPriority {
    patterns: Vec<BranchPattern>,
}

impl BranchPriority {
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns = patterns
            .into_iter()
            .map(BranchPattern::new)
            .collect::<Result<Vec<_>>>()?;
        Ok(BranchPriority { patterns })
    }

    /// Rank of a ref: 1-based index of the first matching pattern, 0 if unlisted
    pub fn rank(&self, ref_name: &str) -> usize {
        self.patterns
            .iter()
            .position(|p| p.matches(ref_name))
            .map_or(0, |idx| idx + 1)
    }

    /// Sort refs ascending by rank, ties by name
    pub fn sort(&self, refs: &mut [String]) {
        refs.sort_by(|a, b| self.rank(a).cmp(&self.rank(b)).then_with(|| a.cmp(b)));
    }
}
