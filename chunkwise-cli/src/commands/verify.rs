//! Verify command implementation

use super::{init_logging, load_config};
use crate::error::CliError;
use crate::input::FileReader;
use anyhow::Result;
use chunkwise_core::{ChunkingPipeline, VerificationReport};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the verify command
#[derive(Debug, Args)]
pub struct VerifyArgs {
    /// Transcript JSON file
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Pipeline configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Exit with an error when any check fails
    #[arg(long)]
    pub strict: bool,
}

impl VerifyArgs {
    /// Execute the verify command
    pub fn execute(&self) -> Result<()> {
        init_logging(false, 0);

        let report = self.report()?;
        println!("{}", serde_json::to_string_pretty(&report)?);

        if self.strict && !report.passed {
            let failed = report.failed_checks().into_iter().map(String::from).collect();
            return Err(CliError::VerificationFailed(failed).into());
        }
        Ok(())
    }

    /// Chunk the transcript and verify its base chunks
    pub fn report(&self) -> Result<VerificationReport> {
        let pipeline = ChunkingPipeline::new(load_config(self.config.as_deref())?)?;
        let transcript = FileReader::read_transcript(&self.input)?;
        Ok(pipeline.ingest(&transcript).verification)
    }
}
