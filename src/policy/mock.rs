use crate::domain::{compare_fix_versions, FixVersion};
use crate::error::{FixVersionError, Result};
use crate::policy::Policy;
use std::collections::{HashMap, HashSet};

/// Mock policy for testing without configuration files
///
/// Tags and refs resolve through lookup tables. Ref priority is the position
/// in the `priority` list (unlisted refs rank lowest, by name); fix versions
/// order as semantic versions.
#[derive(Debug, Clone, Default)]
pub struct MockPolicy {
    tags: HashMap<String, FixVersion>,
    refs: HashMap<String, FixVersion>,
    priority: Vec<String>,
    failing_tags: HashSet<String>,
}

impl MockPolicy {
    /// Create a policy that resolves nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a tag to a fix version
    pub fn tag(mut self, tag: impl Into<String>, version: impl Into<FixVersion>) -> Self {
        self.tags.insert(tag.into(), version.into());
        self
    }

    /// Map a branch tip to a fix version
    pub fn branch(mut self, ref_name: impl Into<String>, version: impl Into<FixVersion>) -> Self {
        self.refs.insert(ref_name.into(), version.into());
        self
    }

    /// Set ascending ref priority
    pub fn priority<I, S>(mut self, refs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.priority = refs.into_iter().map(Into::into).collect();
        self
    }

    /// Make the tag policy fail for `tag`
    pub fn failing_tag(mut self, tag: impl Into<String>) -> Self {
        self.failing_tags.insert(tag.into());
        self
    }

    fn rank(&self, ref_name: &str) -> usize {
        self.priority
            .iter()
            .position(|r| r == ref_name)
            .map_or(0, |idx| idx + 1)
    }
}

impl Policy for MockPolicy {
    fn tag_to_fix_version(&self, tag: &str) -> Result<Option<FixVersion>> {
        if self.failing_tags.contains(tag) {
            return Err(FixVersionError::policy(format!("Cannot interpret tag '{}'", tag)));
        }
        Ok(self.tags.get(tag).cloned())
    }

    fn ref_to_fix_version(&self, ref_name: &str) -> Result<Option<FixVersion>> {
        Ok(self.refs.get(ref_name).cloned())
    }

    fn order_refs_by_priority(&self, mut refs: Vec<String>) -> Result<Vec<String>> {
        refs.sort_by(|a, b| self.rank(a).cmp(&self.rank(b)).then_with(|| a.cmp(b)));
        Ok(refs)
    }

    fn order_fix_versions(&self, mut versions: Vec<FixVersion>) -> Result<Vec<FixVersion>> {
        versions.sort_by(compare_fix_versions);
        Ok(versions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_policy_lookup() {
        let policy = MockPolicy::new().tag("v1.0", "1.0").branch("release/1.x", "1.5");

        assert_eq!(
            policy.tag_to_fix_version("v1.0").unwrap(),
            Some(FixVersion::new("1.0"))
        );
        assert_eq!(policy.tag_to_fix_version("nightly").unwrap(), None);
        assert_eq!(
            policy.ref_to_fix_version("release/1.x").unwrap(),
            Some(FixVersion::new("1.5"))
        );
        assert_eq!(policy.ref_to_fix_version("main").unwrap(), None);
    }

    #[test]
    fn test_mock_policy_priority() {
        let policy = MockPolicy::new().priority(["main", "release/1.x"]);
        let ordered = policy
            .order_refs_by_priority(vec![
                "release/1.x".to_string(),
                "main".to_string(),
                "feature".to_string(),
            ])
            .unwrap();
        assert_eq!(ordered, vec!["feature", "main", "release/1.x"]);
    }

    #[test]
    fn test_mock_policy_version_order() {
        let policy = MockPolicy::new();
        let ordered = policy
            .order_fix_versions(vec!["2.0".into(), "1.10".into(), "1.9".into()])
            .unwrap();
        assert_eq!(
            ordered,
            vec![
                FixVersion::new("1.9"),
                FixVersion::new("1.10"),
                FixVersion::new("2.0")
            ]
        );
    }

    #[test]
    fn test_mock_policy_failing_tag() {
        let policy = MockPolicy::new().failing_tag("broken");
        assert!(matches!(
            policy.tag_to_fix_version("broken"),
            Err(FixVersionError::Policy(_))
        ));
    }
}
