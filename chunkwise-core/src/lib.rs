//! Topic-coherent transcript chunking
//!
//! This crate turns a cleaned spoken transcript into retrieval-sized chunks
//! that stay addressable to time ranges in the original recording.
//!
//! Three algorithms do the work:
//!
//! - [`TextTiler`]: lexical-cohesion boundary detection over sentence
//!   windows, with [`FallbackChunker`] as a size-bounded substitute when the
//!   text is too short or the scores degenerate
//! - [`OverlapCompositor`]: carries the tail of each chunk into the next
//! - [`TimestampReconciler`]: locates chunk text in the raw segment timeline
//!
//! [`ChunkingPipeline`] runs them in order and checks the result with
//! [`verify_chunking`].
//!
//! # Example
//!
//! ```
//! use chunkwise_core::{ChunkingPipeline, TimedSegment, Transcript};
//!
//! let transcript = Transcript::new(
//!     "Today we learn about Python. Python is a programming language.",
//!     vec![
//!         TimedSegment::new("Today we learn about Python.", 0.0, 3.0),
//!         TimedSegment::new("Python is a programming language.", 3.0, 3.5),
//!     ],
//! )
//! .with_video_id("intro");
//!
//! let ingestion = ChunkingPipeline::default().ingest(&transcript);
//! assert_eq!(ingestion.chunks.len(), 1);
//! assert_eq!(ingestion.chunks[0].time_range(), "00:00 – 00:06");
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod overlap;
pub mod pipeline;
pub mod segmenter;
pub mod text;
pub mod timeline;
pub mod types;
pub mod verify;

pub use config::{
    LengthTier, PipelineConfig, PipelineConfigBuilder, ReconcileMode, TilingParams,
    DEFAULT_TIERS,
};
pub use error::{ChunkwiseError, Result};
pub use format::{format_range, format_timestamp};
pub use overlap::{ComposedChunk, OverlapCompositor};
pub use pipeline::ChunkingPipeline;
pub use segmenter::{FallbackChunker, Segmentation, Segmenter, TextTiler, UnavailableReason};
pub use timeline::TimestampReconciler;
pub use types::{
    BaseChunk, Chunk, ChunkingStats, Ingestion, SegmentationMethod, SpanResolution, TimeSpan,
    TimedSegment, Transcript, VerificationReport,
};
pub use verify::{chunking_stats, verify_chunking};
