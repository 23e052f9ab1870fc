//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use chunkwise_core::Ingestion;
use std::io::{self, Write};

/// One line per chunk, prefixed with its time range
pub struct TextFormatter<W: Write> {
    writer: W,
    transcripts: usize,
}

impl<W: Write> TextFormatter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            transcripts: 0,
        }
    }
}

impl TextFormatter<io::Stdout> {
    /// Create a formatter that writes to stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_transcript(&mut self, source: &str, ingestion: &Ingestion) -> Result<()> {
        if self.transcripts > 0 {
            writeln!(self.writer)?;
        }
        self.transcripts += 1;

        writeln!(
            self.writer,
            "# {source} ({} chunks, {})",
            ingestion.chunks.len(),
            ingestion.method.name()
        )?;
        for chunk in &ingestion.chunks {
            writeln!(self.writer, "[{}] {}", chunk.time_range(), chunk.text)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::fixtures;

    #[test]
    fn test_text_lines() {
        let mut out = Vec::new();
        {
            let mut formatter = TextFormatter::new(&mut out);
            formatter
                .format_transcript("garden.json", &fixtures::ingestion())
                .unwrap();
            formatter.finish().unwrap();
        }

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "# garden.json (1 chunks, fallback)");
        assert_eq!(
            lines[1],
            "[00:00 – 01:15] Welcome to the garden. Today we plant tomatoes. Water them daily."
        );
    }
}
