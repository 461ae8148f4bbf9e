//! Main workflow orchestration logic
//!
//! Keeps the resolve workflow separate from CLI argument parsing so it can be
//! called programmatically without depending on clap.

use anyhow::{Context, Result};
use std::fs;

use crate::config::{load_config, Config};
use crate::domain::{Resolution, SegmentTree, TreeSpec};
use crate::policy::ConfigPolicy;
use crate::resolver::Resolver;

/// Arguments for the resolve workflow
#[derive(Debug, Clone, PartialEq)]
pub struct ResolveWorkflowArgs {
    /// Path to the JSON tree description
    pub tree_path: String,

    /// Path to custom config file
    pub config_path: Option<String>,

    /// Keep merge commits in the result, overriding the configuration
    pub include_merges: bool,
}

/// Result of a successful resolve workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub resolution: Resolution,

    /// The tree after resolution, with fork segments renamed
    pub tree: SegmentTree,
}

/// Read and build a segment tree from a JSON description file
pub fn load_tree(path: &str) -> Result<SegmentTree> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read tree file '{}'", path))?;
    let spec: TreeSpec = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse tree file '{}'", path))?;
    let tree = SegmentTree::from_spec(spec)
        .with_context(|| format!("Invalid segment tree in '{}'", path))?;
    Ok(tree)
}

/// Main resolve workflow
///
/// 1. Load the segment tree
/// 2. Build the policy from configuration
/// 3. Resolve every commit to its fix version
///
/// # Arguments
///
/// * `args` - Workflow arguments
/// * `config` - Loaded configuration
pub fn run_resolve_workflow(args: &ResolveWorkflowArgs, config: &Config) -> Result<WorkflowResult> {
    let mut tree = load_tree(&args.tree_path)?;
    let policy = ConfigPolicy::from_config(config).context("Invalid policy configuration")?;

    let exclude_merge_commits = config.behavior.exclude_merge_commits && !args.include_merges;
    let resolution = Resolver::new(&policy)
        .exclude_merge_commits(exclude_merge_commits)
        .run(&mut tree)
        .context("Failed to resolve fix versions")?;

    Ok(WorkflowResult { resolution, tree })
}

/// Load configuration from `args.config_path` (or the default locations) and run
pub fn run_with_default_config(args: &ResolveWorkflowArgs) -> Result<WorkflowResult> {
    let config = load_config(args.config_path.as_deref()).context("Error loading config")?;
    run_resolve_workflow(args, &config)
}
