//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use chunkwise_core::{Chunk, Ingestion, SegmentationMethod, VerificationReport};
use serde::Serialize;
use std::io::Write;

/// Collects every transcript and writes one JSON array on finish
pub struct JsonFormatter<W: Write> {
    writer: W,
    records: Vec<TranscriptRecord>,
}

/// JSON record for one transcript
#[derive(Debug, Serialize)]
pub struct TranscriptRecord {
    /// Input file the transcript came from
    pub source: String,
    pub video_id: Option<String>,
    pub segmentation: SegmentationMethod,
    pub coarse_timestamps: usize,
    pub verification: VerificationReport,
    pub chunks: Vec<Chunk>,
}

impl<W: Write> JsonFormatter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            records: Vec::new(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_transcript(&mut self, source: &str, ingestion: &Ingestion) -> Result<()> {
        self.records.push(TranscriptRecord {
            source: source.to_string(),
            video_id: ingestion.chunks.first().and_then(|c| c.video_id.clone()),
            segmentation: ingestion.method.clone(),
            coarse_timestamps: ingestion.coarse_timestamps,
            verification: ingestion.verification.clone(),
            chunks: ingestion.chunks.clone(),
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.records)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
