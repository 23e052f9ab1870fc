//! Error handling for the CLI application

use std::fmt;

/// CLI-specific failures, reported through `anyhow`
#[derive(Debug)]
pub enum CliError {
    /// Input file not found or inaccessible
    FileNotFound(String),
    /// Input is not a transcript document
    InvalidTranscript { path: String, reason: String },
    /// Configuration failed to load or validate
    ConfigError(String),
    /// Chunk verification failed in strict mode
    VerificationFailed(Vec<String>),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
            CliError::InvalidTranscript { path, reason } => {
                write!(f, "Invalid transcript {path}: {reason}")
            }
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::VerificationFailed(checks) => {
                write!(f, "Verification failed: {}", checks.join(", "))
            }
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;
