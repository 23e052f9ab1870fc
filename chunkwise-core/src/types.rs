//! Data model shared by every pipeline stage

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::format::format_range;
use crate::text::word_count;

/// One unit of the raw, uncleaned transcript timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedSegment {
    /// Spoken text as delivered by the transcript source
    pub text: String,
    /// Offset from the start of the recording, in seconds
    pub start: f64,
    /// Length of the segment, in seconds
    pub duration: f64,
}

impl TimedSegment {
    /// Create a new segment
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }

    /// End offset of the segment, in seconds
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// A pre-overlap chunk, used for accounting
///
/// Word conservation is checked against these, never against [`Chunk`],
/// since overlap duplicates words across neighbours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseChunk {
    /// Chunk text
    pub text: String,
    /// Whitespace-delimited word count
    pub word_count: usize,
}

impl BaseChunk {
    /// Create a base chunk, computing its word count
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let word_count = word_count(&text);
        Self { text, word_count }
    }
}

/// A finished chunk record handed to the storage collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Dense sequential id, starting at 0
    pub chunk_id: usize,
    /// Display text, including any overlap prefix
    pub text: String,
    /// Word count of `text`
    pub word_count: usize,
    /// Character count of `text`
    pub char_count: usize,
    /// Whether `text` starts with words borrowed from the previous chunk
    pub has_overlap: bool,
    /// Start of the attributed time range, in seconds
    pub start_time: f64,
    /// End of the attributed time range, in seconds
    pub end_time: f64,
    /// Source video id
    pub video_id: Option<String>,
    /// Source video title
    pub video_title: Option<String>,
}

impl Chunk {
    /// Key under which the chunk is indexed, `{video_id}_{chunk_id}`
    pub fn storage_key(&self) -> String {
        format!(
            "{}_{}",
            self.video_id.as_deref().unwrap_or("unknown"),
            self.chunk_id
        )
    }

    /// Citation-style time range, `MM:SS – MM:SS`
    pub fn time_range(&self) -> String {
        format_range(self.start_time, self.end_time)
    }
}

/// How a time span was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanResolution {
    /// The chunk prefix was located in the timeline
    Matched,
    /// Whole-transcript (or empty) span used because no match was found
    Coarse,
}

/// Time range attributed to a chunk
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSpan {
    /// Start, in seconds
    pub start: f64,
    /// End, in seconds
    pub end: f64,
    /// Whether the span is precise or a coarse fallback
    pub resolution: SpanResolution,
}

impl TimeSpan {
    pub(crate) fn matched(start: f64, end: f64) -> Self {
        Self {
            start,
            end: end.max(start),
            resolution: SpanResolution::Matched,
        }
    }

    pub(crate) fn coarse(start: f64, end: f64) -> Self {
        Self {
            start,
            end: end.max(start),
            resolution: SpanResolution::Coarse,
        }
    }

    /// True when this span came from the coarse fallback
    pub fn is_coarse(&self) -> bool {
        self.resolution == SpanResolution::Coarse
    }
}

/// Advisory diagnostics over a finished chunk set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationReport {
    /// True when every check passed
    pub passed: bool,
    /// Named boolean checks
    pub checks: BTreeMap<String, bool>,
    /// Named numeric statistics
    pub stats: BTreeMap<String, f64>,
}

impl VerificationReport {
    /// Names of the checks that did not pass
    pub fn failed_checks(&self) -> Vec<&str> {
        self.checks
            .iter()
            .filter(|(_, ok)| !**ok)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

/// Size statistics over a list of chunk texts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkingStats {
    /// Number of chunks
    pub total_chunks: usize,
    /// Sum of all chunk word counts
    pub total_words: usize,
    /// Mean words per chunk (0 for no chunks)
    pub avg_words_per_chunk: f64,
    /// Smallest chunk, in words (0 for no chunks)
    pub min_words: usize,
    /// Largest chunk, in words (0 for no chunks)
    pub max_words: usize,
    /// Word count of each chunk, in order
    pub word_counts_per_chunk: Vec<usize>,
}

/// Input to one ingestion call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    /// Source video id
    #[serde(default)]
    pub video_id: Option<String>,
    /// Source video title
    #[serde(default, alias = "title")]
    pub video_title: Option<String>,
    /// Text after the normalization collaborator ran
    #[serde(default, alias = "text")]
    pub cleaned_text: String,
    /// Raw timeline, uncleaned
    #[serde(default)]
    pub segments: Vec<TimedSegment>,
}

impl Transcript {
    /// Create a transcript from cleaned text and its raw timeline
    pub fn new(cleaned_text: impl Into<String>, segments: Vec<TimedSegment>) -> Self {
        Self {
            cleaned_text: cleaned_text.into(),
            segments,
            ..Default::default()
        }
    }

    /// Set the video id
    pub fn with_video_id(mut self, video_id: impl Into<String>) -> Self {
        self.video_id = Some(video_id.into());
        self
    }

    /// Set the video title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.video_title = Some(title.into());
        self
    }
}

/// Which segmenter produced the base chunks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum SegmentationMethod {
    /// Nothing to segment
    Empty,
    /// Lexical tiling found the boundaries
    Tiling,
    /// Tiling was unavailable, size-bounded grouping was used
    Fallback {
        /// Why tiling was unavailable
        reason: String,
    },
}

impl SegmentationMethod {
    /// Short lowercase name, as it appears in serialized output
    pub fn name(&self) -> &'static str {
        match self {
            SegmentationMethod::Empty => "empty",
            SegmentationMethod::Tiling => "tiling",
            SegmentationMethod::Fallback { .. } => "fallback",
        }
    }
}

/// Everything one ingestion call produces
#[derive(Debug, Clone, PartialEq)]
pub struct Ingestion {
    /// Pre-overlap chunks, for accounting
    pub base_chunks: Vec<BaseChunk>,
    /// Final chunk records, for display and retrieval
    pub chunks: Vec<Chunk>,
    /// Verification of `base_chunks` against the cleaned text
    pub verification: VerificationReport,
    /// Which segmenter ran
    pub method: SegmentationMethod,
    /// How many chunks got a coarse timestamp
    pub coarse_timestamps: usize,
}
