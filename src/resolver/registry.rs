use crate::domain::FixVersion;
use crate::error::{FixVersionError, Result};
use crate::policy::Policy;
use std::collections::HashSet;
use tracing::trace;

/// Translates tags and ref names into fix versions, each claimable once per run
pub struct FixVersionRegistry<'p, P: Policy + ?Sized> {
    policy: &'p P,
    used: HashSet<FixVersion>,
}

impl<'p, P: Policy + ?Sized> FixVersionRegistry<'p, P> {
    pub fn new(policy: &'p P) -> Self {
        FixVersionRegistry {
            policy,
            used: HashSet::new(),
        }
    }

    /// Resolve a tag through the tag policy and claim the result
    ///
    /// # Returns
    /// * `Ok(Some(FixVersion))` - Newly claimed fix version
    /// * `Ok(None)` - The tag does not announce a release
    /// * `Err` - If the fix version was already claimed, or the policy failed
    pub fn resolve_tag(&mut self, tag: &str) -> Result<Option<FixVersion>> {
        let version = self.policy.tag_to_fix_version(tag)?;
        trace!(tag, version = ?version, "resolved tag");
        self.claim(version, "tag", tag)
    }

    /// Resolve a branch tip through the ref policy and claim the result
    pub fn resolve_ref(&mut self, ref_name: &str) -> Result<Option<FixVersion>> {
        let version = self.policy.ref_to_fix_version(ref_name)?;
        trace!(ref_name, version = ?version, "resolved ref");
        self.claim(version, "ref", ref_name)
    }

    #[cfg(test)]
    pub fn is_used(&self, version: &FixVersion) -> bool {
        self.used.contains(version)
    }

    fn claim(
        &mut self,
        version: Option<FixVersion>,
        kind: &str,
        name: &str,
    ) -> Result<Option<FixVersion>> {
        let Some(version) = version else {
            return Ok(None);
        };
        if !self.used.insert(version.clone()) {
            return Err(FixVersionError::consistency(format!(
                "Fix version '{}' from {} '{}' is already used",
                version, kind, name
            )));
        }
        Ok(Some(version))
    }
}
