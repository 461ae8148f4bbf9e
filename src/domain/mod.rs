//! Domain model - commits, segments and fix versions, independent of policy

pub mod branch;
pub mod commit;
pub mod resolution;
pub mod segment;
pub mod tag;
pub mod version;

pub use branch::{BranchPattern, BranchPriority};
pub use commit::CommitEntry;
pub use resolution::{Resolution, ResolvedCommit};
pub use segment::{Segment, SegmentId, SegmentSpec, SegmentTree, TreeSpec};
pub use tag::TagPattern;
pub use version::{compare_fix_versions, FixVersion};
