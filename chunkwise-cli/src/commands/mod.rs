//! CLI command implementations

use crate::error::CliError;
use anyhow::Result;
use chunkwise_core::PipelineConfig;
use clap::Subcommand;
use std::path::Path;

pub mod chunk;
pub mod format_range;
pub mod generate_config;
pub mod validate;
pub mod verify;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Chunk transcript files into timestamped passages
    Chunk(chunk::ChunkArgs),

    /// Print the verification report for one transcript
    Verify(verify::VerifyArgs),

    /// Write the default pipeline configuration as TOML
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// Validate a pipeline configuration file
    Validate(validate::ValidateArgs),

    /// Render a time range as MM:SS – MM:SS
    FormatRange(format_range::FormatRangeArgs),
}

impl Commands {
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Chunk(args) => args.execute(),
            Commands::Verify(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
            Commands::FormatRange(args) => args.execute(),
        }
    }
}

/// Initialize logging from the verbosity level
///
/// `quiet` leaves logging uninitialized. Repeated calls are ignored.
pub(crate) fn init_logging(quiet: bool, verbose: u8) {
    if quiet {
        return;
    }

    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .try_init();
}

/// Load the configuration file, or the defaults when none is given
pub(crate) fn load_config(path: Option<&Path>) -> Result<PipelineConfig> {
    match path {
        Some(path) => {
            log::debug!("loading configuration from {}", path.display());
            PipelineConfig::from_file(path)
                .map_err(|e| CliError::ConfigError(format!("{}: {e}", path.display())).into())
        }
        None => Ok(PipelineConfig::default()),
    }
}
