//! Join point for branches sharing a common ancestor
//!
//! A segment that several branches fork off from must be traced once, and
//! only after every branch has been traced, because the version it continues
//! with depends on all of them. The synchronizer collects the child results
//! per fork and releases the shared segment when the last one arrives.

use crate::domain::{FixVersion, SegmentId, SegmentTree};
use crate::error::{FixVersionError, Result};
use crate::policy::Policy;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info};

#[derive(Debug, Clone)]
struct ChildResult {
    child: SegmentId,
    base_version: Option<FixVersion>,
}

#[derive(Debug, Default)]
struct ForkState {
    /// One slot per expected child ref; `None` while pending
    slots: BTreeMap<String, Option<ChildResult>>,
    released: bool,
}

impl ForkState {
    fn is_complete(&self) -> bool {
        self.slots.values().all(Option::is_some)
    }
}

/// Barrier keyed by fork sha
#[derive(Debug, Default)]
pub struct BranchOffSynchronizer {
    forks: HashMap<String, ForkState>,
}

impl BranchOffSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the base version `child` ended with
    ///
    /// The first result for a fork opens one pending slot per child listed by
    /// `parent`.
    ///
    /// # Returns
    /// * `Ok(())` - The child's slot is filled
    /// * `Err` - If `parent` does not list `child.ref_name`, or that slot is already filled
    pub fn register_child_result(
        &mut self,
        tree: &SegmentTree,
        parent: SegmentId,
        child: SegmentId,
        base_version: Option<FixVersion>,
    ) -> Result<()> {
        let parent_segment = tree.try_get(parent)?;
        let child_ref = &tree.try_get(child)?.ref_name;
        let fork_sha = tree.fork_sha(parent);

        let state = self.forks.entry(fork_sha.clone()).or_insert_with(|| ForkState {
            slots: parent_segment
                .children
                .keys()
                .map(|name| (name.clone(), None))
                .collect(),
            released: false,
        });

        let slot = state.slots.get_mut(child_ref).ok_or_else(|| {
            FixVersionError::structural(format!(
                "Segment '{}' is not a child of the fork at {} (expected one of: {})",
                child_ref,
                fork_sha,
                parent_segment
                    .children
                    .keys()
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", ")
            ))
        })?;
        if slot.is_some() {
            return Err(FixVersionError::structural(format!(
                "Segment '{}' reported twice to the fork at {}",
                child_ref, fork_sha
            )));
        }

        debug!(fork = %fork_sha, child = %child_ref, base_version = ?base_version, "registered child");
        *slot = Some(ChildResult {
            child,
            base_version,
        });
        Ok(())
    }

    /// Release `parent` once every child has reported
    ///
    /// Among the children that ended on a fix version, the parent takes the
    /// ref name of the lowest priority one and continues with the version of
    /// the highest priority one. When none did, it is still renamed after the
    /// lowest priority child and continues unassigned.
    ///
    /// # Returns
    /// * `Ok(Some((parent, version)))` - The parent is ready to be traced, exactly once per fork
    /// * `Ok(None)` - Children are still pending, or the fork was already released
    pub fn try_release<P: Policy + ?Sized>(
        &mut self,
        tree: &mut SegmentTree,
        policy: &P,
        parent: SegmentId,
    ) -> Result<Option<(SegmentId, Option<FixVersion>)>> {
        let fork_sha = tree.fork_sha(parent);
        let Some(state) = self.forks.get_mut(&fork_sha) else {
            return Ok(None);
        };
        if state.released || !state.is_complete() {
            return Ok(None);
        }

        let resolved: BTreeMap<&String, (&FixVersion, SegmentId)> = state
            .slots
            .iter()
            .filter_map(|(name, slot)| {
                let result = slot.as_ref()?;
                Some((name, (result.base_version.as_ref()?, result.child)))
            })
            .collect();

        let (refs, use_versions): (Vec<String>, bool) = if resolved.is_empty() {
            (state.slots.keys().cloned().collect(), false)
        } else {
            (resolved.keys().map(|name| (*name).clone()).collect(), true)
        };

        let ordered = policy.order_refs_by_priority(refs)?;
        let (Some(lowest), Some(highest)) = (ordered.first(), ordered.last()) else {
            return Err(FixVersionError::policy(format!(
                "Ref priority ordering returned no refs for the fork at {}",
                fork_sha
            )));
        };

        let propagated = if use_versions {
            let (version, _) = resolved.get(highest).ok_or_else(|| {
                FixVersionError::policy(format!(
                    "Ref priority ordering returned unknown ref '{}'",
                    highest
                ))
            })?;
            Some((*version).clone())
        } else {
            None
        };

        info!(
            fork = %fork_sha,
            ref_name = %lowest,
            from = %highest,
            version = ?propagated,
            "released fork"
        );

        tree.get_mut(parent).ref_name = lowest.clone();
        state.released = true;
        Ok(Some((parent, propagated)))
    }

    /// Forks seen so far that have not released
    pub fn pending_forks(&self) -> Vec<String> {
        let mut pending: Vec<String> = self
            .forks
            .iter()
            .filter(|(_, state)| !state.released)
            .map(|(sha, _)| sha.clone())
            .collect();
        pending.sort();
        pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CommitEntry, Segment};
    use crate::policy::MockPolicy;

    fn fork_tree() -> (SegmentTree, SegmentId, SegmentId, SegmentId) {
        let mut tree = SegmentTree::new();
        let base = tree.add_root("base", vec![CommitEntry::new("c0", Vec::<String>::new())]);
        let main = tree
            .add_child(base, "main", vec![CommitEntry::new("m1", ["c0"])])
            .unwrap();
        let release = tree
            .add_child(base, "release/1.x", vec![CommitEntry::new("r1", ["c0"])])
            .unwrap();
        (tree, base, main, release)
    }

    fn policy() -> MockPolicy {
        MockPolicy::new().priority(["main", "release/1.x"])
    }

    #[test]
    fn test_waits_for_all_children() {
        let (mut tree, base, main, _) = fork_tree();
        let mut sync = BranchOffSynchronizer::new();

        sync.register_child_result(&tree, base, main, None).unwrap();
        assert_eq!(sync.try_release(&mut tree, &policy(), base).unwrap(), None);
        assert_eq!(sync.pending_forks(), vec!["c0".to_string()]);
    }

    #[test]
    fn test_low_name_high_version() {
        let (mut tree, base, main, release) = fork_tree();
        let mut sync = BranchOffSynchronizer::new();

        sync.register_child_result(&tree, base, main, Some("2.0".into()))
            .unwrap();
        sync.register_child_result(&tree, base, release, Some("1.5".into()))
            .unwrap();

        let released = sync.try_release(&mut tree, &policy(), base).unwrap();
        assert_eq!(released, Some((base, Some(FixVersion::new("1.5")))));
        assert_eq!(tree.get(base).ref_name, "main");
    }

    #[test]
    fn test_only_resolved_children_are_candidates() {
        let (mut tree, base, main, release) = fork_tree();
        let mut sync = BranchOffSynchronizer::new();

        sync.register_child_result(&tree, base, main, None).unwrap();
        sync.register_child_result(&tree, base, release, Some("1.5".into()))
            .unwrap();

        let released = sync.try_release(&mut tree, &policy(), base).unwrap();
        assert_eq!(released, Some((base, Some(FixVersion::new("1.5")))));
        assert_eq!(tree.get(base).ref_name, "release/1.x");
    }

    #[test]
    fn test_no_resolved_children() {
        let (mut tree, base, main, release) = fork_tree();
        let mut sync = BranchOffSynchronizer::new();

        sync.register_child_result(&tree, base, main, None).unwrap();
        sync.register_child_result(&tree, base, release, None).unwrap();

        let released = sync.try_release(&mut tree, &policy(), base).unwrap();
        assert_eq!(released, Some((base, None)));
        assert_eq!(tree.get(base).ref_name, "main");
    }

    #[test]
    fn test_releases_once() {
        let (mut tree, base, main, release) = fork_tree();
        let mut sync = BranchOffSynchronizer::new();

        sync.register_child_result(&tree, base, main, None).unwrap();
        sync.register_child_result(&tree, base, release, None).unwrap();

        assert!(sync.try_release(&mut tree, &policy(), base).unwrap().is_some());
        assert_eq!(sync.try_release(&mut tree, &policy(), base).unwrap(), None);
        assert!(sync.pending_forks().is_empty());
    }

    #[test]
    fn test_unknown_child_is_structural_error() {
        let (mut tree, base, _, _) = fork_tree();
        let stray = tree.push(Segment::new("hotfix", vec![CommitEntry::new("h1", ["c0"])]));
        let mut sync = BranchOffSynchronizer::new();

        assert!(matches!(
            sync.register_child_result(&tree, base, stray, None),
            Err(FixVersionError::Structural(_))
        ));
    }

    #[test]
    fn test_duplicate_report_is_structural_error() {
        let (tree, base, main, _) = fork_tree();
        let mut sync = BranchOffSynchronizer::new();

        sync.register_child_result(&tree, base, main, None).unwrap();
        assert!(matches!(
            sync.register_child_result(&tree, base, main, None),
            Err(FixVersionError::Structural(_))
        ));
    }
}
