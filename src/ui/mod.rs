//! User interface module - formatting and output.
//!
//! - `formatter` - Pure formatting functions and their printing wrappers
//! - This module - Log output setup for the binary

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_error, display_resolution, display_success, format_resolution,
    format_resolution_json,
};

use tracing::Level;

/// Install the stderr log subscriber.
///
/// Warnings only by default; `verbose` enables resolver debug events.
pub fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    // A subscriber may already be installed when running under tests
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
