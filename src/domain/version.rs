use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Release identifier a commit is attributed to (e.g. "1.5", "2.0.0")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FixVersion(String);

impl FixVersion {
    pub fn new(name: impl Into<String>) -> Self {
        FixVersion(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Interpret the identifier as a semantic version.
    ///
    /// Missing components are padded with zeros, so "1.5" reads as 1.5.0 and
    /// "2" as 2.0.0. A leading 'v' or 'V' is ignored.
    ///
    /// # Returns
    /// * `Some(semver::Version)` - Parsed version
    /// * `None` - If the identifier is not numeric enough to be a version
    pub fn to_semver(&self) -> Option<semver::Version> {
        let clean = self.0.trim_start_matches('v').trim_start_matches('V');
        let (core, rest) = match clean.find(|c: char| c == '-' || c == '+') {
            Some(idx) => clean.split_at(idx),
            None => (clean, ""),
        };

        let parts: Vec<&str> = core.split('.').collect();
        if parts.is_empty() || parts.len() > 3 {
            return None;
        }
        if parts.iter().any(|p| p.parse::<u64>().is_err()) {
            return None;
        }

        let mut padded = parts.join(".");
        for _ in parts.len()..3 {
            padded.push_str(".0");
        }
        padded.push_str(rest);

        semver::Version::parse(&padded).ok()
    }
}

impl fmt::Display for FixVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FixVersion {
    fn from(s: &str) -> Self {
        FixVersion::new(s)
    }
}

impl From<String> for FixVersion {
    fn from(s: String) -> Self {
        FixVersion(s)
    }
}

/// Release ordering: parseable versions by semver precedence, then
/// unparseable identifiers by name.
pub fn compare_fix_versions(a: &FixVersion, b: &FixVersion) -> Ordering {
    match (a.to_semver(), b.to_semver()) {
        (Some(va), Some(vb)) => va.cmp(&vb).then_with(|| a.0.cmp(&b.0)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.0.cmp(&b.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_semver_padding() {
        assert_eq!(
            FixVersion::new("1.5").to_semver(),
            Some(semver::Version::new(1, 5, 0))
        );
        assert_eq!(
            FixVersion::new("v2").to_semver(),
            Some(semver::Version::new(2, 0, 0))
        );
        assert_eq!(
            FixVersion::new("1.2.3").to_semver(),
            Some(semver::Version::new(1, 2, 3))
        );
    }

    #[test]
    fn test_to_semver_prerelease() {
        let v = FixVersion::new("1.0-rc.1").to_semver().unwrap();
        assert_eq!(v.major, 1);
        assert_eq!(v.pre.as_str(), "rc.1");
    }

    #[test]
    fn test_to_semver_rejects_names() {
        assert_eq!(FixVersion::new("next").to_semver(), None);
        assert_eq!(FixVersion::new("1.2.3.4").to_semver(), None);
        assert_eq!(FixVersion::new("").to_semver(), None);
    }

    #[test]
    fn test_compare_fix_versions() {
        let v = |s: &str| FixVersion::new(s);
        assert_eq!(compare_fix_versions(&v("1.9"), &v("1.10")), Ordering::Less);
        assert_eq!(compare_fix_versions(&v("2.0"), &v("1.5")), Ordering::Greater);
        assert_eq!(compare_fix_versions(&v("1.0-rc.1"), &v("1.0")), Ordering::Less);
        assert_eq!(compare_fix_versions(&v("1.0"), &v("next")), Ordering::Less);
        assert_eq!(compare_fix_versions(&v("alpha"), &v("beta")), Ordering::Less);
    }

    #[test]
    fn test_display() {
        assert_eq!(FixVersion::new("1.5").to_string(), "1.5");
    }
}
