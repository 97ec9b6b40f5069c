//! # Config Source Errors

use thiserror::Error;

/// Result type for config source reads
pub type ConfigSourceResult<T> = Result<T, ConfigSourceError>;

/// Why a single key could not be read.
///
/// Every variant is recoverable: the gate substitutes the key's default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigSourceError {
    /// No remote store is configured for this process
    #[error("config source not configured")]
    NotConfigured,

    /// Network or connection failure
    #[error("config source unreachable: {0}")]
    Unreachable(String),

    /// The read did not complete in time
    #[error("config source read timed out after {0}ms")]
    Timeout(u64),

    /// The store answered with an unexpected status
    #[error("config source returned status {0}")]
    Status(u16),

    /// The stored value does not have the expected shape
    #[error("malformed value for {key}: {reason}")]
    Malformed { key: String, reason: String },
}
