//! Error types
//!
//! The chunking algorithms themselves never fail: every degraded condition
//! has a bounded fallback. The only errors in this crate come from building
//! a pipeline out of an invalid or unreadable configuration.

use thiserror::Error;

/// Configuration-level errors
#[derive(Error, Debug)]
pub enum ChunkwiseError {
    /// A configuration value is out of range or inconsistent
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Why the configuration was rejected
        reason: String,
    },

    /// The configuration text is not valid TOML for this schema
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The configuration could not be serialized back to TOML
    #[error("failed to serialize configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// I/O error while reading a configuration file
    #[error("I/O error: {0}")]
    Io(String),
}

impl ChunkwiseError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        ChunkwiseError::InvalidConfig {
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for ChunkwiseError {
    fn from(err: std::io::Error) -> Self {
        ChunkwiseError::Io(err.to_string())
    }
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ChunkwiseError>;
