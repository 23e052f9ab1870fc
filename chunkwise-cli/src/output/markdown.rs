//! Markdown report formatter

use super::OutputFormatter;
use anyhow::Result;
use chunkwise_core::Ingestion;
use std::io::Write;

/// A section per transcript, a subsection per chunk, and a totals footer
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    transcripts: usize,
    chunks: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            transcripts: 0,
            chunks: 0,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn format_transcript(&mut self, source: &str, ingestion: &Ingestion) -> Result<()> {
        self.transcripts += 1;
        self.chunks += ingestion.chunks.len();

        let title = ingestion
            .chunks
            .first()
            .and_then(|c| c.video_title.as_deref())
            .unwrap_or(source);
        writeln!(self.writer, "## {title}")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Segmented by {}, verification {}.",
            ingestion.method.name(),
            if ingestion.verification.passed {
                "passed"
            } else {
                "failed"
            }
        )?;
        writeln!(self.writer)?;

        for chunk in &ingestion.chunks {
            writeln!(
                self.writer,
                "### Chunk {} ({})",
                chunk.chunk_id + 1,
                chunk.time_range()
            )?;
            writeln!(self.writer)?;
            writeln!(self.writer, "{}", chunk.text)?;
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer, "---")?;
        writeln!(
            self.writer,
            "*Total chunks: {} across {} transcripts*",
            self.chunks, self.transcripts
        )?;
        self.writer.flush()?;
        Ok(())
    }
}
