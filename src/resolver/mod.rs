//! Commit to fix version resolution
//!
//! The resolver walks a [SegmentTree] from every branch tip towards the
//! roots. Each segment is traced once ([tracer]); segments shared by several
//! branches wait at a barrier until all of those branches are done
//! ([synchronizer]). Fix versions are claimed through a per-run
//! [registry::FixVersionRegistry], and the collected buckets are finally
//! flattened into a [Resolution] ([assembler]).
//!
//! # Usage
//!
//! ```rust
//! # use git_fixversion::domain::{CommitEntry, SegmentTree};
//! # use git_fixversion::policy::MockPolicy;
//! # use git_fixversion::resolver::resolve;
//! let mut tree = SegmentTree::new();
//! tree.add_root(
//!     "main",
//!     vec![
//!         CommitEntry::new("c2", ["c1"]),
//!         CommitEntry::new("c1", ["c0"]).with_tag("v1.0"),
//!     ],
//! );
//! let policy = MockPolicy::new().tag("v1.0", "1.0");
//!
//! let resolution = resolve(&mut tree, &policy, true).unwrap();
//! assert_eq!(resolution.version_of("c1").unwrap().as_str(), "1.0");
//! assert!(resolution.get("c2").is_none());
//! ```

pub mod assembler;
pub mod registry;
pub mod synchronizer;
pub mod tracer;

pub use registry::FixVersionRegistry;
pub use synchronizer::BranchOffSynchronizer;

use crate::domain::{CommitEntry, FixVersion, Resolution, SegmentId, SegmentTree};
use crate::error::{FixVersionError, Result};
use crate::linear::{Linearize, TopologicalLinearizer};
use crate::policy::Policy;
use std::collections::{HashMap, HashSet};
use tracing::info;

/// Commits collected per fix version; the `None` key holds unassigned commits
pub type FixVersionBucket = HashMap<Option<FixVersion>, Vec<CommitEntry>>;

/// One configured resolution; every [Resolver::run] starts from fresh state
pub struct Resolver<'p, P: Policy + ?Sized, L: Linearize = TopologicalLinearizer> {
    policy: &'p P,
    linearizer: L,
    exclude_merge_commits: bool,
}

impl<'p, P: Policy + ?Sized> Resolver<'p, P> {
    /// Create a resolver that excludes merge commits and uses the topological linearizer
    pub fn new(policy: &'p P) -> Self {
        Resolver {
            policy,
            linearizer: TopologicalLinearizer,
            exclude_merge_commits: true,
        }
    }
}

impl<'p, P: Policy + ?Sized, L: Linearize> Resolver<'p, P, L> {
    /// Replace the linearizer used when assembling the result
    pub fn linearizer<L2: Linearize>(self, linearizer: L2) -> Resolver<'p, P, L2> {
        Resolver {
            policy: self.policy,
            linearizer,
            exclude_merge_commits: self.exclude_merge_commits,
        }
    }

    pub fn exclude_merge_commits(mut self, exclude: bool) -> Self {
        self.exclude_merge_commits = exclude;
        self
    }

    /// Resolve every commit of `tree`
    ///
    /// Fork segments get their `ref_name` reassigned while resolving.
    ///
    /// # Returns
    /// * `Ok(Resolution)` - Complete mapping
    /// * `Err` - On a reused fix version, a malformed tree, or a failing policy; nothing partial is returned
    pub fn run(&self, tree: &mut SegmentTree) -> Result<Resolution> {
        let mut registry = FixVersionRegistry::new(self.policy);
        let mut synchronizer = BranchOffSynchronizer::new();
        let mut buckets = FixVersionBucket::new();

        let mut work: Vec<(SegmentId, Option<FixVersion>)> = Vec::new();
        for id in tree.end_segments() {
            let tip_version = registry.resolve_ref(&tree.get(id).ref_name)?;
            work.push((id, tip_version));
        }
        // Pop tips in tree order
        work.reverse();

        let mut traced: HashSet<SegmentId> = HashSet::new();
        while let Some((id, tip_version)) = work.pop() {
            let result = tracer::trace(&mut registry, self.policy, tree.get(id), tip_version)?;
            for (version, commits) in result.buckets {
                buckets.entry(version).or_default().extend(commits);
            }
            traced.insert(id);

            let Some(parent) = tree.get(id).parent else {
                continue;
            };
            synchronizer.register_child_result(tree, parent, id, result.base_version)?;
            if let Some(released) = synchronizer.try_release(tree, self.policy, parent)? {
                work.push(released);
            }
        }

        let pending = synchronizer.pending_forks();
        if !pending.is_empty() {
            return Err(FixVersionError::structural(format!(
                "Forks never released: {}",
                pending.join(", ")
            )));
        }

        // A segment nobody links back to is never reached from any tip
        let unreached: Vec<String> = tree
            .ids()
            .filter(|id| !traced.contains(id))
            .map(|id| id.to_string())
            .collect();
        if !unreached.is_empty() {
            return Err(FixVersionError::structural(format!(
                "Segments not reachable from any branch tip: {}",
                unreached.join(", ")
            )));
        }

        let resolution = assembler::assemble(
            buckets,
            self.policy,
            &self.linearizer,
            self.exclude_merge_commits,
        )?;
        info!(
            segments = traced.len(),
            commits = resolution.len(),
            "resolved fix versions"
        );
        Ok(resolution)
    }
}

/// Resolve every commit of `tree` with the default linearizer
pub fn resolve<P: Policy + ?Sized>(
    tree: &mut SegmentTree,
    policy: &P,
    exclude_merge_commits: bool,
) -> Result<Resolution> {
    Resolver::new(policy)
        .exclude_merge_commits(exclude_merge_commits)
        .run(tree)
}
