use crate::domain::{FixVersion, Segment};
use crate::error::Result;
use crate::policy::Policy;
use crate::resolver::registry::FixVersionRegistry;
use crate::resolver::FixVersionBucket;
use tracing::debug;

/// Outcome of tracing one segment
#[derive(Debug, Default)]
pub struct TraceResult {
    /// Fix version in effect at the segment's oldest commit
    pub base_version: Option<FixVersion>,
    pub buckets: FixVersionBucket,
}

/// Walk `segment` tip to base, assigning commits to fix versions
///
/// `current` starts at `tip_version`. A commit whose tags resolve switches
/// `current` to the earliest of the resolved versions before the commit is
/// bucketed, so a tagged commit belongs to its own release and every older
/// commit inherits it until an older tag takes over.
pub fn trace<P: Policy + ?Sized>(
    registry: &mut FixVersionRegistry<'_, P>,
    policy: &P,
    segment: &Segment,
    tip_version: Option<FixVersion>,
) -> Result<TraceResult> {
    let mut current = tip_version;
    let mut buckets = FixVersionBucket::new();

    for entry in &segment.entries {
        if entry.is_tagged() {
            let mut resolved = Vec::new();
            for tag in &entry.tags {
                if let Some(version) = registry.resolve_tag(tag)? {
                    resolved.push(version);
                }
            }
            if !resolved.is_empty() {
                let earliest = policy.order_fix_versions(resolved)?.into_iter().next();
                if earliest.is_some() {
                    current = earliest;
                }
            }
        }
        buckets
            .entry(current.clone())
            .or_default()
            .push(entry.clone());
    }

    debug!(
        ref_name = %segment.ref_name,
        commits = segment.entries.len(),
        base_version = ?current,
        "traced segment"
    );

    Ok(TraceResult {
        base_version: current,
        buckets,
    })
}
