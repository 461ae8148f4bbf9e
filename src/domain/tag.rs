use crate::error::{FixVersionError, Result};
use regex::Regex;

const VERSION_CAPTURE: &str = r"(\d+(?:\.\d+)*(?:-[0-9A-Za-z.-]+)?)";

/// Naming pattern mapping a tag or ref name to a version
/// (e.g., "v{version}", "release/{version}")
#[derive(Debug, Clone)]
pub struct TagPattern {
    pub pattern: String,
    regex: Regex,
}

impl TagPattern {
    /// Compile a pattern; it must contain exactly one `{version}` placeholder
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        if pattern.matches("{version}").count() != 1 {
            return Err(FixVersionError::config(format!(
                "Pattern '{}' must contain exactly one {{version}} placeholder",
                pattern
            )));
        }

        // Escape everything, then swap the escaped placeholder for the capture
        let escaped = regex::escape(&pattern);
        let regex_pattern = escaped.replace(r"\{version\}", VERSION_CAPTURE);
        let regex = Regex::new(&format!("^{}$", regex_pattern))
            .map_err(|e| FixVersionError::config(format!("Invalid pattern '{}': {}", pattern, e)))?;

        Ok(TagPattern { pattern, regex })
    }

    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    /// Extract the version part of a matching name
    /// Example: pattern="release/{version}", name="release/1.5" -> Some("1.5")
    pub fn extract<'a>(&self, name: &'a str) -> Option<&'a str> {
        self.regex
            .captures(name)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_matches() {
        let pattern = TagPattern::new("v{version}").unwrap();
        assert!(pattern.matches("v1.2.3"));
        assert!(pattern.matches("v2.0"));
        assert!(!pattern.matches("release-1.2.3"));
        assert!(!pattern.matches("v1.2.3-extra stuff"));
    }

    #[test]
    fn test_pattern_extract() {
        let pattern = TagPattern::new("release/{version}").unwrap();
        assert_eq!(pattern.extract("release/1.5"), Some("1.5"));
        assert_eq!(pattern.extract("release/2.0.0-rc.1"), Some("2.0.0-rc.1"));
        assert_eq!(pattern.extract("release/next"), None);
        assert_eq!(pattern.extract("main"), None);
    }

    #[test]
    fn test_pattern_escapes_literals() {
        let pattern = TagPattern::new("rel.{version}").unwrap();
        assert!(pattern.matches("rel.1.0"));
        assert!(!pattern.matches("relx1.0"));
    }

    #[test]
    fn test_pattern_requires_placeholder() {
        assert!(TagPattern::new("release").is_err());
        assert!(TagPattern::new("{version}-{version}").is_err());
    }
}
