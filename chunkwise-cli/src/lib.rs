//! chunkwise CLI library
//!
//! Command implementations, transcript loading and output formatting for the
//! `chunkwise` binary.

pub mod commands;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};
