use crate::domain::{CommitEntry, FixVersion};
use serde::Serialize;
use std::collections::BTreeMap;

/// One resolved commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedCommit {
    pub version: FixVersion,
    pub commit: CommitEntry,
}

/// Final mapping from commit sha to the fix version it first shipped in
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Resolution {
    commits: BTreeMap<String, ResolvedCommit>,
}

impl Resolution {
    pub(crate) fn insert(&mut self, version: FixVersion, commit: CommitEntry) {
        self.commits
            .insert(commit.sha.clone(), ResolvedCommit { version, commit });
    }

    pub fn get(&self, sha: &str) -> Option<&ResolvedCommit> {
        self.commits.get(sha)
    }

    pub fn version_of(&self, sha: &str) -> Option<&FixVersion> {
        self.commits.get(sha).map(|r| &r.version)
    }

    /// Commits attributed to `version`, in sha order
    pub fn commits_for<'a>(&'a self, version: &'a FixVersion) -> impl Iterator<Item = &'a CommitEntry> {
        self.commits
            .values()
            .filter(move |r| &r.version == version)
            .map(|r| &r.commit)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ResolvedCommit)> {
        self.commits.iter()
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }
}
