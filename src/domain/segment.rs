//! Branch history as a tree of linear segments
//!
//! Segments live in an arena ([SegmentTree]) and refer to each other by
//! [SegmentId]. A segment points back to the segment continuing it further
//! back in history (`parent`) and, when it ends at a fork, lists the segments
//! branching off its tip by ref name (`children`).
//!
//! ```text
//!   main:        c3 - c2 ─┐
//!                         ├─ A: c1 - c0
//!   release/1.x: r2 - r1 ─┘
//! ```

use crate::domain::CommitEntry;
use crate::error::{FixVersionError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Handle of a segment inside a [SegmentTree]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentId(usize);

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "segment#{}", self.0)
    }
}

/// A maximal run of single-parent commits along one branch
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Commits ordered tip (newest) to base (oldest)
    pub entries: Vec<CommitEntry>,
    /// Branch label; reassigned when a fork releases
    pub ref_name: String,
    pub parent: Option<SegmentId>,
    /// Segments branching off this segment's tip, keyed by ref name
    pub children: BTreeMap<String, SegmentId>,
}

impl Segment {
    pub fn new(ref_name: impl Into<String>, entries: Vec<CommitEntry>) -> Self {
        Segment {
            entries,
            ref_name: ref_name.into(),
            parent: None,
            children: BTreeMap::new(),
        }
    }

    pub fn tip(&self) -> Option<&CommitEntry> {
        self.entries.first()
    }

    pub fn is_fork(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Arena owning every segment of one history
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentTree {
    segments: Vec<Segment>,
}

impl SegmentTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a segment as is, without linking it to any other segment
    pub fn push(&mut self, segment: Segment) -> SegmentId {
        self.segments.push(segment);
        SegmentId(self.segments.len() - 1)
    }

    /// Add a segment with no history before it
    pub fn add_root(&mut self, ref_name: impl Into<String>, entries: Vec<CommitEntry>) -> SegmentId {
        self.push(Segment::new(ref_name, entries))
    }

    /// Add a segment branching off the tip of `parent`
    ///
    /// # Returns
    /// * `Ok(SegmentId)` - Handle of the new segment
    /// * `Err` - If `parent` is unknown or already has a child named `ref_name`
    pub fn add_child(
        &mut self,
        parent: SegmentId,
        ref_name: impl Into<String>,
        entries: Vec<CommitEntry>,
    ) -> Result<SegmentId> {
        let ref_name = ref_name.into();
        let parent_segment = self.try_get(parent)?;
        if parent_segment.children.contains_key(&ref_name) {
            return Err(FixVersionError::structural(format!(
                "{} already has a child named '{}'",
                parent, ref_name
            )));
        }

        let mut segment = Segment::new(ref_name.clone(), entries);
        segment.parent = Some(parent);
        let id = self.push(segment);
        self.segments[parent.0].children.insert(ref_name, id);
        Ok(id)
    }

    /// # Panics
    /// If `id` was not produced by this tree
    pub fn get(&self, id: SegmentId) -> &Segment {
        &self.segments[id.0]
    }

    /// # Panics
    /// If `id` was not produced by this tree
    pub fn get_mut(&mut self, id: SegmentId) -> &mut Segment {
        &mut self.segments[id.0]
    }

    pub fn try_get(&self, id: SegmentId) -> Result<&Segment> {
        self.segments
            .get(id.0)
            .ok_or_else(|| FixVersionError::structural(format!("Unknown {}", id)))
    }

    /// Branch tips: segments nothing branches off from
    pub fn end_segments(&self) -> Vec<SegmentId> {
        self.ids().filter(|id| !self.get(*id).is_fork()).collect()
    }

    pub fn ids(&self) -> impl Iterator<Item = SegmentId> {
        (0..self.segments.len()).map(SegmentId)
    }

    /// Key identifying the fork at the tip of `id`: the tip sha, or the
    /// segment handle when the segment holds no commits
    pub fn fork_sha(&self, id: SegmentId) -> String {
        match self.get(id).tip() {
            Some(tip) => tip.sha.clone(),
            None => id.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Build a tree from its serialized description
    ///
    /// Parents must be declared before their children.
    pub fn from_spec(spec: TreeSpec) -> Result<Self> {
        let mut tree = SegmentTree::new();
        let mut ids: HashMap<String, SegmentId> = HashMap::new();

        for segment in spec.segments {
            if ids.contains_key(&segment.id) {
                return Err(FixVersionError::structural(format!(
                    "Duplicate segment id '{}'",
                    segment.id
                )));
            }

            let id = match &segment.parent {
                Some(parent) => {
                    let parent_id = ids.get(parent).copied().ok_or_else(|| {
                        FixVersionError::structural(format!(
                            "Segment '{}' refers to unknown parent '{}'",
                            segment.id, parent
                        ))
                    })?;
                    tree.add_child(parent_id, segment.ref_name, segment.entries)?
                }
                None => tree.add_root(segment.ref_name, segment.entries),
            };
            ids.insert(segment.id, id);
        }

        Ok(tree)
    }
}

/// Serialized form of a [SegmentTree]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreeSpec {
    pub segments: Vec<SegmentSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentSpec {
    pub id: String,
    #[serde(rename = "ref")]
    pub ref_name: String,
    #[serde(default)]
    pub parent: Option<String>,
    /// Commits ordered tip to base
    #[serde(default)]
    pub entries: Vec<CommitEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(sha: &str, parent: &str) -> CommitEntry {
        CommitEntry::new(sha, [parent])
    }

    #[test]
    fn test_add_child_links_both_ways() {
        let mut tree = SegmentTree::new();
        let root = tree.add_root("main", vec![commit("c1", "c0")]);
        let child = tree
            .add_child(root, "feature", vec![commit("f1", "c1")])
            .unwrap();

        assert_eq!(tree.get(child).parent, Some(root));
        assert_eq!(tree.get(root).children.get("feature"), Some(&child));
        assert!(tree.get(root).is_fork());
    }

    #[test]
    fn test_add_child_rejects_duplicate_ref() {
        let mut tree = SegmentTree::new();
        let root = tree.add_root("main", vec![commit("c1", "c0")]);
        tree.add_child(root, "main", vec![]).unwrap();
        assert!(matches!(
            tree.add_child(root, "main", vec![]),
            Err(FixVersionError::Structural(_))
        ));
    }

    #[test]
    fn test_end_segments() {
        let mut tree = SegmentTree::new();
        let root = tree.add_root("main", vec![commit("c1", "c0")]);
        let a = tree.add_child(root, "main", vec![commit("c2", "c1")]).unwrap();
        let b = tree.add_child(root, "dev", vec![commit("d1", "c1")]).unwrap();

        assert_eq!(tree.end_segments(), vec![a, b]);
    }

    #[test]
    fn test_fork_sha() {
        let mut tree = SegmentTree::new();
        let full = tree.add_root("main", vec![commit("c2", "c1"), commit("c1", "c0")]);
        let empty = tree.add_root("dev", vec![]);

        assert_eq!(tree.fork_sha(full), "c2");
        assert_eq!(tree.fork_sha(empty), "segment#1");
    }

    #[test]
    fn test_from_spec() {
        let json = r#"{
            "segments": [
                {"id": "A", "ref": "main", "entries": [{"sha": "c0"}]},
                {"id": "B", "ref": "main", "parent": "A", "entries": [{"sha": "c1", "parents": ["c0"]}]},
                {"id": "C", "ref": "release/1.x", "parent": "A", "entries": [{"sha": "r1", "parents": ["c0"], "tags": ["v1.0"]}]}
            ]
        }"#;
        let spec: TreeSpec = serde_json::from_str(json).unwrap();
        let tree = SegmentTree::from_spec(spec).unwrap();

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.end_segments().len(), 2);
        assert_eq!(tree.get(SegmentId(0)).children.len(), 2);
    }

    #[test]
    fn test_from_spec_unknown_parent() {
        let spec = TreeSpec {
            segments: vec![SegmentSpec {
                id: "B".to_string(),
                ref_name: "main".to_string(),
                parent: Some("A".to_string()),
                entries: vec![],
            }],
        };
        assert!(matches!(
            SegmentTree::from_spec(spec),
            Err(FixVersionError::Structural(_))
        ));
    }

    #[test]
    fn test_from_spec_duplicate_id() {
        let segment = SegmentSpec {
            id: "A".to_string(),
            ref_name: "main".to_string(),
            parent: None,
            entries: vec![],
        };
        let spec = TreeSpec {
            segments: vec![segment.clone(), segment],
        };
        assert!(SegmentTree::from_spec(spec).is_err());
    }
}
