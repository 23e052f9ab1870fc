//! Validate command implementation

use crate::error::CliError;
use anyhow::Result;
use chunkwise_core::PipelineConfig;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to the pipeline configuration file to validate
    #[arg(short, long, value_name = "FILE", required = true)]
    pub config: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!("Validating configuration: {}", self.config.display());

        match PipelineConfig::from_file(&self.config) {
            Ok(config) => {
                println!("✓ Configuration is valid!");
                println!("  Length tiers: {}", config.tiling.tiers.len());
                println!(
                    "  Fallback: {} sentences, {}-{} words",
                    config.fallback.target_sentences,
                    config.fallback.min_words,
                    config.fallback.max_words
                );
                if config.overlap.enabled {
                    println!("  Overlap: {} words", config.overlap.overlap_words);
                } else {
                    println!("  Overlap: disabled");
                }
                Ok(())
            }
            Err(e) => {
                println!("✗ Configuration is invalid!");
                println!("  Error: {e}");
                Err(CliError::ConfigError(e.to_string()).into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_file(toml: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{toml}").unwrap();
        file
    }

    #[test]
    fn test_validate_valid_config() {
        let file = config_file(
            r#"
[tiling]
block_size = 4
tiers = [
    { max_words_exclusive = 2000, window = 10, smoothing = 5 },
    { window = 25, smoothing = 10 },
]

[timestamps]
mode = "monotonic"
"#,
        );

        let args = ValidateArgs {
            config: file.path().to_path_buf(),
        };
        assert!(args.execute().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_window() {
        let file = config_file("[tiling]\ntiers = [ { window = 0, smoothing = 5 } ]\n");
        let args = ValidateArgs {
            config: file.path().to_path_buf(),
        };
        assert!(args.execute().is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_mode() {
        let file = config_file("[timestamps]\nmode = \"sideways\"\n");
        let args = ValidateArgs {
            config: file.path().to_path_buf(),
        };
        let err = args.execute().unwrap_err();
        assert!(err.to_string().starts_with("Configuration error:"));
    }
}
