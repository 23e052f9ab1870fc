//! End-to-end ingestion
//!
//! One call turns a transcript into its finished chunk set: segmentation
//! (tiling with fallback), overlap composition, timestamp reconciliation and
//! verification, in that order. Nothing is returned until every stage has
//! run, so callers never see partial state for a transcript.

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::overlap::{ComposedChunk, OverlapCompositor};
use crate::segmenter::{FallbackChunker, Segmentation, Segmenter, TextTiler};
use crate::text::word_count;
use crate::timeline::TimestampReconciler;
use crate::types::{
    BaseChunk, Chunk, ChunkingStats, Ingestion, SegmentationMethod, TimedSegment, Transcript,
};
use crate::verify::{chunking_stats, verify_chunking};

/// Transcript chunking pipeline
///
/// Holds only read-only configuration and can be shared across threads.
///
/// # Example
///
/// ```
/// use chunkwise_core::ChunkingPipeline;
///
/// let pipeline = ChunkingPipeline::default();
/// let chunks = pipeline.chunk_text("A short talk. It has three sentences. That is all.");
/// assert_eq!(chunks.len(), 1);
/// assert!(pipeline.chunk_text("   ").is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChunkingPipeline {
    config: PipelineConfig,
}

impl ChunkingPipeline {
    /// Create a pipeline, validating the configuration
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Base chunk texts for `text`, with the strategy that produced them
    pub fn segment(&self, text: &str) -> (Vec<String>, SegmentationMethod) {
        if text.trim().is_empty() {
            return (Vec::new(), SegmentationMethod::Empty);
        }

        let words = word_count(text);
        let params = self.config.tiling.params_for(words);
        log::debug!(
            "{words} words, tiling with w={} k={}",
            params.window,
            params.smoothing
        );

        match TextTiler::new(params).segment(text) {
            Segmentation::Segmented(chunks) if !chunks.is_empty() => {
                (chunks, SegmentationMethod::Tiling)
            }
            Segmentation::Segmented(_) => self.fall_back(text, "tiling produced no chunks".into()),
            Segmentation::Unavailable(reason) => self.fall_back(text, reason.to_string()),
        }
    }

    fn fall_back(&self, text: &str, reason: String) -> (Vec<String>, SegmentationMethod) {
        let fallback = FallbackChunker::new(self.config.fallback);
        log::warn!("tiling unavailable ({reason}), using {} chunker", fallback.name());

        let chunks = fallback.segment(text).chunks().unwrap_or_default();
        (chunks, SegmentationMethod::Fallback { reason })
    }

    /// Base chunk texts, before overlap
    ///
    /// Empty or whitespace-only input yields no chunks.
    pub fn chunk_text(&self, text: &str) -> Vec<String> {
        self.segment(text).0
    }

    /// Finished chunk records for `text`
    ///
    /// `overlap_words` applies only when `use_overlap` is set.
    pub fn chunk_with_metadata(
        &self,
        text: &str,
        video_id: Option<&str>,
        segments: &[TimedSegment],
        video_title: Option<&str>,
        use_overlap: bool,
        overlap_words: usize,
    ) -> Vec<Chunk> {
        let overlap = use_overlap.then_some(overlap_words);
        self.run(text, segments, video_id, video_title, overlap).chunks
    }

    /// Run every stage for one transcript
    pub fn ingest(&self, transcript: &Transcript) -> Ingestion {
        let overlap = self
            .config
            .overlap
            .enabled
            .then_some(self.config.overlap.overlap_words);

        let ingestion = self.run(
            &transcript.cleaned_text,
            &transcript.segments,
            transcript.video_id.as_deref(),
            transcript.video_title.as_deref(),
            overlap,
        );

        log::info!(
            "ingested {}: {} chunks via {}, {} coarse timestamps, verification {}",
            transcript.video_id.as_deref().unwrap_or("unknown"),
            ingestion.chunks.len(),
            ingestion.method.name(),
            ingestion.coarse_timestamps,
            if ingestion.verification.passed {
                "passed"
            } else {
                "failed"
            }
        );
        ingestion
    }

    /// Ingest many transcripts, independently
    ///
    /// Results are in input order. With the `parallel` feature the batch runs
    /// on a rayon pool sized by `parallel.threads`.
    pub fn ingest_batch(&self, transcripts: &[Transcript]) -> Vec<Ingestion> {
        self.ingest_batch_with(transcripts, |_, _| {})
    }

    /// [`ingest_batch`](Self::ingest_batch), calling `on_complete` with the
    /// input index of each transcript as soon as it is ingested
    ///
    /// Completion order follows the workers, not the input.
    pub fn ingest_batch_with<F>(&self, transcripts: &[Transcript], on_complete: F) -> Vec<Ingestion>
    where
        F: Fn(usize, &Ingestion) + Sync,
    {
        let ingest_one = |(index, transcript): (usize, &Transcript)| {
            let ingestion = self.ingest(transcript);
            on_complete(index, &ingestion);
            ingestion
        };

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let threads = match self.config.parallel.threads {
                0 => num_cpus::get(),
                n => n,
            };

            match rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .thread_name(|i| format!("chunkwise-worker-{i}"))
                .build()
            {
                Ok(pool) => {
                    log::debug!(
                        "ingesting {} transcripts on {} threads",
                        transcripts.len(),
                        pool.current_num_threads()
                    );
                    return pool.install(|| {
                        transcripts
                            .par_iter()
                            .enumerate()
                            .map(&ingest_one)
                            .collect()
                    });
                }
                Err(e) => log::warn!("thread pool unavailable ({e}), ingesting sequentially"),
            }
        }

        transcripts.iter().enumerate().map(&ingest_one).collect()
    }

    /// Size statistics over chunk texts
    pub fn chunking_stats<S: AsRef<str>>(&self, chunks: &[S]) -> ChunkingStats {
        chunking_stats(chunks)
    }

    fn run(
        &self,
        text: &str,
        segments: &[TimedSegment],
        video_id: Option<&str>,
        video_title: Option<&str>,
        overlap_words: Option<usize>,
    ) -> Ingestion {
        let (texts, method) = self.segment(text);
        let base_chunks: Vec<BaseChunk> = texts.into_iter().map(BaseChunk::new).collect();

        let composed = match overlap_words {
            Some(words) => OverlapCompositor::new(words).compose(&base_chunks),
            None => OverlapCompositor::passthrough(&base_chunks),
        };

        let texts: Vec<&str> = composed.iter().map(|c| c.text.as_str()).collect();
        let spans = TimestampReconciler::new(self.config.timestamps).reconcile(&texts, segments);
        let coarse_timestamps = spans.iter().filter(|s| s.is_coarse()).count();

        if coarse_timestamps > 0 {
            log::warn!(
                "{coarse_timestamps} of {} chunks fell back to coarse timestamps",
                composed.len()
            );
        }

        let chunks: Vec<Chunk> = composed
            .into_iter()
            .zip(spans)
            .enumerate()
            .map(|(chunk_id, (ComposedChunk { text, has_overlap }, span))| Chunk {
                chunk_id,
                word_count: word_count(&text),
                char_count: text.chars().count(),
                text,
                has_overlap,
                start_time: span.start,
                end_time: span.end,
                video_id: video_id.map(str::to_string),
                video_title: video_title.map(str::to_string),
            })
            .collect();

        let base_texts: Vec<&str> = base_chunks.iter().map(|c| c.text.as_str()).collect();
        let verification = verify_chunking(text, &base_texts);
        if !verification.passed && !base_chunks.is_empty() {
            log::warn!(
                "chunk verification failed: {}",
                verification.failed_checks().join(", ")
            );
        }

        Ingestion {
            base_chunks,
            chunks,
            verification,
            method,
            coarse_timestamps,
        }
    }
}
