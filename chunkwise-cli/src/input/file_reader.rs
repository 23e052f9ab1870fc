//! Transcript loading

use crate::error::CliError;
use anyhow::{Context, Result};
use chunkwise_core::Transcript;
use std::fs;
use std::path::Path;

/// Field names that carry the cleaned text
const TEXT_KEYS: [&str; 2] = ["text", "cleaned_text"];

/// Reads transcript documents from disk
pub struct FileReader;

impl FileReader {
    /// Read a file as UTF-8 text
    pub fn read_text(path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()).into());
        }

        fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
    }

    /// Read a JSON transcript
    ///
    /// When the document has no `text` (or `cleaned_text`) field at all, the
    /// text is filled from the segments joined with spaces. A present but
    /// blank text is kept as is. A missing `video_id` comes from the file stem.
    pub fn read_transcript(path: &Path) -> Result<Transcript> {
        let content = Self::read_text(path)?;
        let invalid = |e: serde_json::Error| CliError::InvalidTranscript {
            path: path.display().to_string(),
            reason: e.to_string(),
        };

        let document: serde_json::Value = serde_json::from_str(&content).map_err(invalid)?;
        let has_text = TEXT_KEYS.iter().any(|key| document.get(key).is_some());
        let mut transcript: Transcript = serde_json::from_value(document).map_err(invalid)?;

        if !has_text {
            transcript.cleaned_text = transcript
                .segments
                .iter()
                .map(|s| s.text.trim())
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
        }

        if transcript.video_id.is_none() {
            transcript.video_id = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned());
        }

        log::debug!(
            "loaded {}: {} segments, {} bytes of text",
            path.display(),
            transcript.segments.len(),
            transcript.cleaned_text.len()
        );
        Ok(transcript)
    }
}
