use crate::config::Config;
use crate::domain::{compare_fix_versions, BranchPriority, FixVersion, TagPattern};
use crate::error::Result;
use crate::policy::Policy;

/// Pattern based policy built from [Config]
///
/// - a tag resolves through the first matching `[tags]` pattern
/// - a branch tip resolves through the first matching `[refs]` pattern
/// - refs rank by the `[priority]` list (unlisted refs lowest, ties by name)
/// - fix versions order as lenient semantic versions
#[derive(Debug, Clone)]
pub struct ConfigPolicy {
    tag_patterns: Vec<TagPattern>,
    ref_patterns: Vec<TagPattern>,
    priority: BranchPriority,
}

impl ConfigPolicy {
    /// Compile the patterns of a configuration
    ///
    /// # Returns
    /// * `Ok(ConfigPolicy)` - Ready to use policy
    /// * `Err` - If a pattern lacks its `{version}` placeholder or is not a valid expression
    pub fn from_config(config: &Config) -> Result<Self> {
        let tag_patterns = config
            .tags
            .patterns
            .iter()
            .map(|p| TagPattern::new(p.as_str()))
            .collect::<Result<Vec<_>>>()?;
        let ref_patterns = config
            .refs
            .patterns
            .iter()
            .map(|p| TagPattern::new(p.as_str()))
            .collect::<Result<Vec<_>>>()?;
        let priority = BranchPriority::new(config.priority.branches.iter().cloned())?;

        Ok(ConfigPolicy {
            tag_patterns,
            ref_patterns,
            priority,
        })
    }

    fn extract(patterns: &[TagPattern], name: &str) -> Option<FixVersion> {
        patterns
            .iter()
            .find_map(|p| p.extract(name))
            .map(FixVersion::from)
    }
}

impl Policy for ConfigPolicy {
    fn tag_to_fix_version(&self, tag: &str) -> Result<Option<FixVersion>> {
        Ok(Self::extract(&self.tag_patterns, tag))
    }

    fn ref_to_fix_version(&self, ref_name: &str) -> Result<Option<FixVersion>> {
        Ok(Self::extract(&self.ref_patterns, ref_name))
    }

    fn order_refs_by_priority(&self, mut refs: Vec<String>) -> Result<Vec<String>> {
        self.priority.sort(&mut refs);
        Ok(refs)
    }

    fn order_fix_versions(&self, mut versions: Vec<FixVersion>) -> Result<Vec<FixVersion>> {
        versions.sort_by(compare_fix_versions);
        Ok(versions)
    }
}
