//! Format-range command implementation

use anyhow::Result;
use chunkwise_core::format_range;
use clap::Args;

/// Arguments for the format-range command
#[derive(Debug, Args)]
pub struct FormatRangeArgs {
    /// Range start in seconds
    #[arg(allow_negative_numbers = true)]
    pub start: f64,

    /// Range end in seconds
    #[arg(allow_negative_numbers = true)]
    pub end: f64,
}

impl FormatRangeArgs {
    pub fn execute(&self) -> Result<()> {
        println!("{}", format_range(self.start, self.end));
        Ok(())
    }
}
