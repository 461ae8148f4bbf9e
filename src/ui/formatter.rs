//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from I/O.
//! `format_*` functions build strings and are testable; `display_*`
//! functions print them.

use crate::domain::{compare_fix_versions, CommitEntry, FixVersion, Resolution};
use crate::error::Result;
use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Group resolved commits by fix version, earliest release first.
fn group_by_version(resolution: &Resolution) -> Vec<(&FixVersion, Vec<&CommitEntry>)> {
    let mut groups: Vec<(&FixVersion, Vec<&CommitEntry>)> = Vec::new();
    for (_, resolved) in resolution.iter() {
        match groups.iter_mut().find(|(v, _)| *v == &resolved.version) {
            Some((_, commits)) => commits.push(&resolved.commit),
            None => groups.push((&resolved.version, vec![&resolved.commit])),
        }
    }
    groups.sort_by(|(a, _), (b, _)| compare_fix_versions(a, b));
    groups
}

/// Plain text listing of a resolution, one block per fix version.
///
/// ```text
/// 1.0 (2 commits)
///   c1
///   c2
/// ```
pub fn format_resolution(resolution: &Resolution) -> String {
    let mut out = String::new();
    for (version, commits) in group_by_version(resolution) {
        let noun = if commits.len() == 1 { "commit" } else { "commits" };
        out.push_str(&format!("{} ({} {})\n", version, commits.len(), noun));
        for commit in commits {
            out.push_str(&format!("  {}\n", commit.sha));
        }
    }
    out
}

/// JSON object mapping each sha to its fix version and commit.
pub fn format_resolution_json(resolution: &Resolution) -> Result<String> {
    Ok(serde_json::to_string_pretty(resolution)?)
}

/// Display a resolution grouped by fix version.
///
/// # Arguments
/// * `resolution` - The resolved mapping
/// * `source` - Where the history came from, shown in the header
pub fn display_resolution(resolution: &Resolution, source: &str) {
    println!(
        "\n{}",
        style(format!("Fix versions for '{}'", source)).bold()
    );
    for (version, commits) in group_by_version(resolution) {
        println!(
            "{} {}",
            style(version.as_str()).green().bold(),
            style(format!("({} commits)", commits.len())).dim()
        );
        for commit in commits.iter().take(10) {
            println!("  {}", commit.short_sha());
        }
        if commits.len() > 10 {
            println!("  ... and {} more commits", commits.len() - 10);
        }
    }
}
