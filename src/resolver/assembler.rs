use crate::domain::{FixVersion, Resolution};
use crate::error::{FixVersionError, Result};
use crate::linear::Linearize;
use crate::policy::Policy;
use crate::resolver::FixVersionBucket;
use tracing::debug;

/// Turn the run-wide buckets into the final sha → fix version mapping
///
/// The unassigned bucket is left out. Buckets are applied latest release
/// first, so a commit that ended up in several buckets keeps the earliest
/// release it shipped in. The version ordering must cover every collected
/// fix version.
pub fn assemble<P: Policy + ?Sized, L: Linearize + ?Sized>(
    mut buckets: FixVersionBucket,
    policy: &P,
    linearizer: &L,
    exclude_merge_commits: bool,
) -> Result<Resolution> {
    let unassigned = buckets.remove(&None::<FixVersion>).map_or(0, |commits| commits.len());
    if unassigned > 0 {
        debug!(commits = unassigned, "skipping unassigned commits");
    }

    let versions: Vec<FixVersion> = buckets.keys().flatten().cloned().collect();
    let ordered = policy.order_fix_versions(versions)?;

    let mut resolution = Resolution::default();
    for version in ordered.into_iter().rev() {
        let Some(commits) = buckets.remove(&Some(version.clone())) else {
            continue;
        };
        for commit in linearizer.linearize(commits)? {
            if exclude_merge_commits && commit.is_merge() {
                continue;
            }
            resolution.insert(version.clone(), commit);
        }
    }

    if !buckets.is_empty() {
        let mut dropped: Vec<String> = buckets.keys().flatten().map(|v| v.to_string()).collect();
        dropped.sort();
        return Err(FixVersionError::policy(format!(
            "Fix version ordering dropped: {}",
            dropped.join(", ")
        )));
    }

    Ok(resolution)
}
