//! Flattening of a commit set into parent-before-child order

use crate::domain::CommitEntry;
use crate::error::{FixVersionError, Result};
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet};

/// Turns an unordered commit set into one linear history
///
/// Implementations must return every distinct commit exactly once, with each
/// commit placed after all of its parents that are part of the set.
pub trait Linearize {
    fn linearize(&self, entries: Vec<CommitEntry>) -> Result<Vec<CommitEntry>>;
}

/// Topological linearizer over parent links
///
/// Commits are added to the graph in reverse input order. Segment entries
/// arrive tip to base, so a single segment comes out base to tip.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopologicalLinearizer;

impl Linearize for TopologicalLinearizer {
    fn linearize(&self, entries: Vec<CommitEntry>) -> Result<Vec<CommitEntry>> {
        hierarchy_log_to_linear_log(entries)
    }
}

/// Order `entries` parents first; duplicate shas keep their first occurrence
///
/// # Returns
/// * `Ok(Vec<CommitEntry>)` - Linear history, oldest first
/// * `Err` - If the parent links form a cycle
pub fn hierarchy_log_to_linear_log(entries: Vec<CommitEntry>) -> Result<Vec<CommitEntry>> {
    let mut seen = HashSet::new();
    let entries: Vec<CommitEntry> = entries
        .into_iter()
        .filter(|e| seen.insert(e.sha.clone()))
        .collect();

    // Node weights are indices into `entries`; edges run parent -> child
    let mut graph: DiGraph<usize, ()> = DiGraph::new();
    let mut nodes: HashMap<&str, NodeIndex> = HashMap::new();
    for (i, entry) in entries.iter().enumerate().rev() {
        nodes.insert(entry.sha.as_str(), graph.add_node(i));
    }
    for entry in entries.iter().rev() {
        let child = nodes[entry.sha.as_str()];
        let parents: HashSet<NodeIndex> = entry
            .parent_shas
            .iter()
            .filter_map(|p| nodes.get(p.as_str()).copied())
            .collect();
        for parent in parents {
            graph.add_edge(parent, child, ());
        }
    }

    let order = toposort(&graph, None).map_err(|cycle| {
        let sha = &entries[graph[cycle.node_id()]].sha;
        FixVersionError::linearize(format!("Commit parents form a cycle at '{}'", sha))
    })?;
    let order: Vec<usize> = order.into_iter().map(|idx| graph[idx]).collect();

    let mut slots: Vec<Option<CommitEntry>> = entries.into_iter().map(Some).collect();
    Ok(order.into_iter().filter_map(|i| slots[i].take()).collect())
}
