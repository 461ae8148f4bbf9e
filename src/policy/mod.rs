//! Caller policy abstraction
//!
//! The resolver never decides on its own what a tag or a branch means. It
//! asks a [Policy], which answers four questions:
//!
//! - which fix version a tag announces
//! - which fix version a branch tip stands for
//! - how branches rank against each other
//! - how fix versions order in time
//!
//! The concrete implementations include:
//!
//! - [config::ConfigPolicy]: pattern based policy built from the TOML configuration
//! - [mock::MockPolicy]: table driven policy for testing
//!
//! # Usage
//!
//! ```rust
//! # use git_fixversion::policy::{MockPolicy, Policy};
//! let policy = MockPolicy::new().tag("v1.0", "1.0");
//! assert_eq!(policy.tag_to_fix_version("v1.0").unwrap().unwrap().as_str(), "1.0");
//! ```

pub mod config;
pub mod mock;

pub use config::ConfigPolicy;
pub use mock::MockPolicy;

use crate::domain::FixVersion;
use crate::error::Result;

/// The four decisions the resolver delegates to its caller
///
/// ## Purity
///
/// Implementations should be pure: the same input must always produce the
/// same answer within and across runs, otherwise the resolution is not
/// reproducible.
///
/// ## Error Handling
///
/// Every method returns [crate::error::Result<T>]. Errors are passed through
/// the resolver unchanged and abort the run; implementations typically use
/// [crate::error::FixVersionError::policy].
pub trait Policy {
    /// Fix version announced by a tag
    ///
    /// # Returns
    /// * `Ok(Some(FixVersion))` - The tag marks a release
    /// * `Ok(None)` - The tag is not release related
    fn tag_to_fix_version(&self, tag: &str) -> Result<Option<FixVersion>>;

    /// Fix version a branch tip will ship in
    ///
    /// # Returns
    /// * `Ok(Some(FixVersion))` - Work on this branch is destined for that release
    /// * `Ok(None)` - The branch does not imply a release
    fn ref_to_fix_version(&self, ref_name: &str) -> Result<Option<FixVersion>>;

    /// Order ref names by ascending priority; the last one wins
    fn order_refs_by_priority(&self, refs: Vec<String>) -> Result<Vec<String>>;

    /// Order fix versions ascending, earliest release first
    fn order_fix_versions(&self, versions: Vec<FixVersion>) -> Result<Vec<FixVersion>>;
}
