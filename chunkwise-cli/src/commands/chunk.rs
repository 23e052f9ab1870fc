//! Chunk command implementation

use super::{init_logging, load_config};
use crate::error::CliError;
use crate::input::{resolve_patterns, FileReader};
use crate::output::{JsonFormatter, MarkdownFormatter, OutputFormatter, TextFormatter};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use chunkwise_core::{ChunkingPipeline, PipelineConfig, PipelineConfigBuilder, ReconcileMode};
use clap::Args;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Arguments for the chunk command
#[derive(Debug, Args)]
pub struct ChunkArgs {
    /// Transcript JSON files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Pipeline configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Emit base chunks without the overlap prefix
    #[arg(long)]
    pub no_overlap: bool,

    /// Words carried from each chunk into the next
    #[arg(long, value_name = "N")]
    pub overlap_words: Option<usize>,

    /// Anchor each chunk's timestamp after the previous one
    #[arg(long)]
    pub monotonic: bool,

    /// Worker threads for batches (0 = all cores)
    #[arg(long, value_name = "N")]
    pub threads: Option<usize>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// One line per chunk, prefixed with its time range
    Text,
    /// JSON array of transcripts with their chunk records
    Json,
    /// Markdown report
    Markdown,
}

impl ChunkArgs {
    /// Execute the chunk command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.quiet, self.verbose);

        log::info!("Starting transcript chunking");
        log::debug!("Arguments: {:?}", self);

        let files = resolve_patterns(&self.input)?;
        let pipeline = ChunkingPipeline::new(self.pipeline_config()?)?;

        let transcripts = files
            .iter()
            .map(|path| FileReader::read_transcript(path))
            .collect::<Result<Vec<_>>>()?;

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_transcripts(files.len() as u64);

        let ingestions = pipeline.ingest_batch_with(&transcripts, |index, ingestion| {
            let source = files[index].display().to_string();
            progress.transcript_completed(&source, ingestion.chunks.len());
        });

        let mut formatter = self.formatter()?;
        for (path, ingestion) in files.iter().zip(&ingestions) {
            formatter.format_transcript(&path.display().to_string(), ingestion)?;
        }
        formatter.finish()?;
        progress.finish();

        let total: usize = ingestions.iter().map(|i| i.chunks.len()).sum();
        log::info!("wrote {total} chunks from {} transcripts", files.len());
        Ok(())
    }

    /// Configuration file (or defaults) with command-line overrides applied
    pub fn pipeline_config(&self) -> Result<PipelineConfig> {
        let mut builder = PipelineConfigBuilder::from_config(load_config(self.config.as_deref())?);

        if self.no_overlap {
            builder = builder.overlap(false);
        }
        if let Some(words) = self.overlap_words {
            builder = builder.overlap_words(words);
        }
        if self.monotonic {
            builder = builder.reconcile_mode(ReconcileMode::Monotonic);
        }
        if let Some(threads) = self.threads {
            builder = builder.threads(Some(threads));
        }

        builder
            .build()
            .map_err(|e| CliError::ConfigError(e.to_string()).into())
    }

    fn formatter(&self) -> Result<Box<dyn OutputFormatter>> {
        let writer: Box<dyn Write + Send + Sync> = match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
                format!("Failed to create output file: {}", path.display())
            })?)),
            None => Box::new(io::stdout()),
        };

        Ok(match self.format {
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
        })
    }
}
