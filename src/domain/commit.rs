use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A single commit as seen by the resolver
///
/// Entries are owned by the segment tree and only referenced (cloned into
/// buckets) during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitEntry {
    pub sha: String,

    /// Parent shas in git order; two or more marks a merge commit
    #[serde(default, rename = "parents")]
    pub parent_shas: Vec<String>,

    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl CommitEntry {
    /// Create an untagged commit
    pub fn new<I, S>(sha: impl Into<String>, parent_shas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommitEntry {
            sha: sha.into(),
            parent_shas: parent_shas.into_iter().map(Into::into).collect(),
            tags: BTreeSet::new(),
        }
    }

    /// Attach a tag, builder style
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn is_merge(&self) -> bool {
        self.parent_shas.len() >= 2
    }

    pub fn is_tagged(&self) -> bool {
        !self.tags.is_empty()
    }

    /// First seven characters of the sha, for display
    pub fn short_sha(&self) -> &str {
        self.sha
            .char_indices()
            .nth(7)
            .map_or(self.sha.as_str(), |(i, _)| &self.sha[..i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_detection() {
        let single = CommitEntry::new("c2", ["c1"]);
        let merge = CommitEntry::new("m1", ["c2", "f1"]);
        let root = CommitEntry::new("c0", Vec::<String>::new());

        assert!(!single.is_merge());
        assert!(merge.is_merge());
        assert!(!root.is_merge());
    }

    #[test]
    fn test_with_tag() {
        let commit = CommitEntry::new("c1", ["c0"]).with_tag("v1.0.0");
        assert!(commit.is_tagged());
        assert!(commit.tags.contains("v1.0.0"));
    }

    #[test]
    fn test_short_sha() {
        let commit = CommitEntry::new("abc1234def5678", Vec::<String>::new());
        assert_eq!(commit.short_sha(), "abc1234");
        assert_eq!(CommitEntry::new("c1", ["c0"]).short_sha(), "c1");
    }

    #[test]
    fn test_short_sha_multibyte() {
        let commit = CommitEntry::new("ééééééééé", Vec::<String>::new());
        assert_eq!(commit.short_sha(), "ééééééé");
        assert_eq!(CommitEntry::new("ééééé", ["c0"]).short_sha(), "ééééé");
    }

    #[test]
    fn test_deserialize_defaults() {
        let commit: CommitEntry = serde_json::from_str(r#"{"sha": "c1"}"#).unwrap();
        assert!(commit.parent_shas.is_empty());
        assert!(commit.tags.is_empty());

        let commit: CommitEntry =
            serde_json::from_str(r#"{"sha": "c2", "parents": ["c1"], "tags": ["v1.0.0"]}"#)
                .unwrap();
        assert_eq!(commit.parent_shas, vec!["c1".to_string()]);
        assert!(commit.tags.contains("v1.0.0"));
    }
}
