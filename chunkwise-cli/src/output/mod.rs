//! Output formatting module

use anyhow::Result;
use chunkwise_core::Ingestion;

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format the chunks produced for one transcript
    fn format_transcript(&mut self, source: &str, ingestion: &Ingestion) -> Result<()>;

    /// Finalize output (e.g., write the JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;
