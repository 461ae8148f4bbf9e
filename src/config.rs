use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Represents the complete configuration for git-fixversion.
///
/// Contains tag and branch patterns, branch priority and behavior options.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub tags: TagsConfig,

    #[serde(default)]
    pub refs: RefsConfig,

    #[serde(default)]
    pub priority: PriorityConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

/// Returns the default tag patterns.
fn default_tag_patterns() -> Vec<String> {
    vec!["v{version}".to_string()]
}

/// Returns the default branch-tip patterns.
fn default_ref_patterns() -> Vec<String> {
    vec!["release/{version}".to_string()]
}

/// Returns the default branch priority, lowest first.
fn default_branch_priority() -> Vec<String> {
    vec![
        "main".to_string(),
        "master".to_string(),
        "develop".to_string(),
        "release/*".to_string(),
    ]
}

fn default_true() -> bool {
    true
}

/// Tags whose name matches one of the patterns announce the captured version.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TagsConfig {
    #[serde(default = "default_tag_patterns")]
    pub patterns: Vec<String>,
}

impl Default for TagsConfig {
    fn default() -> Self {
        TagsConfig {
            patterns: default_tag_patterns(),
        }
    }
}

/// Branch tips whose name matches one of the patterns ship in the captured version.
///
/// A tip version and a tag version share the one-claim-per-run rule. With the
/// defaults, a `release/1.5` branch whose tip is also tagged `v1.5` claims
/// `1.5` twice and the run fails with a consistency error. Set
/// `patterns = []` under `[refs]` for repositories that tag release branch tips.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RefsConfig {
    #[serde(default = "default_ref_patterns")]
    pub patterns: Vec<String>,
}

impl Default for RefsConfig {
    fn default() -> Self {
        RefsConfig {
            patterns: default_ref_patterns(),
        }
    }
}

/// Branch priority, ascending. Entries may use `*` wildcards.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PriorityConfig {
    #[serde(default = "default_branch_priority")]
    pub branches: Vec<String>,
}

impl Default for PriorityConfig {
    fn default() -> Self {
        PriorityConfig {
            branches: default_branch_priority(),
        }
    }
}

/// Configuration for behavior customization.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BehaviorConfig {
    #[serde(default = "default_true")]
    pub exclude_merge_commits: bool,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        BehaviorConfig {
            exclude_merge_commits: true,
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `fixversion.toml` in current directory
/// 3. `.fixversion.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./fixversion.toml").exists() {
        fs::read_to_string("./fixversion.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".fixversion.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}
