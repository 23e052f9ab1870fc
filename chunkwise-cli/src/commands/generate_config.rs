//! Generate config command implementation

use anyhow::{Context, Result};
use chunkwise_core::PipelineConfig;
use clap::Args;
use std::fs;
use std::path::PathBuf;

const HEADER: &str = "# chunkwise pipeline configuration\n\
# Every key is optional; omitted keys keep the values shown here.\n\n";

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        let template = Self::template()?;

        let Some(output) = &self.output else {
            print!("{template}");
            return Ok(());
        };

        fs::write(output, template)
            .with_context(|| format!("Failed to write to {}", output.display()))?;

        println!("✓ Configuration written to {}", output.display());
        println!();
        println!("Next steps:");
        println!("1. Edit the tiers, fallback bounds or overlap width");
        println!("2. Validate your configuration:");
        println!("   chunkwise validate -c {}", output.display());
        println!("3. Use it for chunking:");
        println!("   chunkwise chunk -i talk.json -c {}", output.display());

        Ok(())
    }

    /// Default configuration rendered as commented TOML
    pub fn template() -> Result<String> {
        let body = PipelineConfig::default()
            .to_toml()
            .context("Failed to render default configuration")?;
        Ok(format!("{HEADER}{body}"))
    }
}
