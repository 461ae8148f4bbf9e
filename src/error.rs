use thiserror::Error;

/// Unified error type for fix-version resolution
#[derive(Error, Debug)]
pub enum FixVersionError {
    /// A tag or ref policy produced an identifier already claimed this run
    #[error("Consistency error: {0}")]
    Consistency(String),

    /// The segment tree is malformed
    #[error("Structural error: {0}")]
    Structural(String),

    /// Raised by a policy implementation and propagated as is
    #[error("Policy error: {0}")]
    Policy(String),

    #[error("Linearization error: {0}")]
    Linearize(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Convenience type alias for Results in git-fixversion
pub type Result<T> = std::result::Result<T, FixVersionError>;

impl FixVersionError {
    /// Create a consistency error with context
    pub fn consistency(msg: impl Into<String>) -> Self {
        FixVersionError::Consistency(msg.into())
    }

    /// Create a structural error with context
    pub fn structural(msg: impl Into<String>) -> Self {
        FixVersionError::Structural(msg.into())
    }

    /// Create a policy error with context
    pub fn policy(msg: impl Into<String>) -> Self {
        FixVersionError::Policy(msg.into())
    }

    /// Create a linearization error with context
    pub fn linearize(msg: impl Into<String>) -> Self {
        FixVersionError::Linearize(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        FixVersionError::Config(msg.into())
    }
}
