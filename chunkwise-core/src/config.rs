//! Pipeline configuration
//!
//! Every section is optional in TOML and falls back to the defaults below.
//! Configuration is read-only once a pipeline is built, so one config can
//! be shared by any number of concurrent ingestions.

use crate::error::{ChunkwiseError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration constants
pub mod defaults {
    /// Sentences per pseudo-block
    pub const BLOCK_SIZE: usize = 5;

    /// Target sentences per fallback chunk
    pub const TARGET_SENTENCES: usize = 15;

    /// Lower word bound for fallback chunks
    pub const MIN_WORDS: usize = 100;

    /// Upper word bound for fallback chunks
    pub const MAX_WORDS: usize = 300;

    /// Words carried from one chunk into the next
    pub const OVERLAP_WORDS: usize = 25;

    /// Characters of chunk prefix used to locate it in the timeline
    pub const TOLERANCE: usize = 50;
}

/// One row of the length-tier table
///
/// A document with `word_count < max_words_exclusive` uses this tier's
/// parameters; `None` marks the open-ended last tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthTier {
    /// Exclusive upper word bound, `None` for the last tier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_words_exclusive: Option<usize>,
    /// Sentences per similarity window
    pub window: usize,
    /// Depth-score neighbourhood, in gaps
    pub smoothing: usize,
}

impl LengthTier {
    /// Create a bounded tier
    pub const fn below(max_words_exclusive: usize, window: usize, smoothing: usize) -> Self {
        Self {
            max_words_exclusive: Some(max_words_exclusive),
            window,
            smoothing,
        }
    }

    /// Create the open-ended last tier
    pub const fn rest(window: usize, smoothing: usize) -> Self {
        Self {
            max_words_exclusive: None,
            window,
            smoothing,
        }
    }

    fn covers(&self, word_count: usize) -> bool {
        self.max_words_exclusive
            .map_or(true, |limit| word_count < limit)
    }
}

/// Default tiers: short (<1000), medium (1000–4000) and long (>4000) documents
pub const DEFAULT_TIERS: [LengthTier; 3] = [
    LengthTier::below(1000, 15, 10),
    LengthTier::below(4001, 20, 10),
    LengthTier::rest(30, 15),
];

/// Parameters for one tiling run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilingParams {
    /// Sentences per similarity window (`w`)
    pub window: usize,
    /// Depth-score neighbourhood (`k`)
    pub smoothing: usize,
    /// Sentences per pseudo-block
    pub block_size: usize,
}

impl Default for TilingParams {
    fn default() -> Self {
        Self {
            window: 20,
            smoothing: 10,
            block_size: defaults::BLOCK_SIZE,
        }
    }
}

/// Tiling section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TilingConfig {
    /// Sentences per pseudo-block
    pub block_size: usize,
    /// Ordered length tiers
    pub tiers: Vec<LengthTier>,
}

impl Default for TilingConfig {
    fn default() -> Self {
        Self {
            block_size: defaults::BLOCK_SIZE,
            tiers: DEFAULT_TIERS.to_vec(),
        }
    }
}

impl TilingConfig {
    /// The first tier covering `word_count`
    pub fn tier_for(&self, word_count: usize) -> LengthTier {
        self.tiers
            .iter()
            .copied()
            .find(|tier| tier.covers(word_count))
            .or_else(|| self.tiers.last().copied())
            .unwrap_or(DEFAULT_TIERS[DEFAULT_TIERS.len() - 1])
    }

    /// Tiling parameters for a document of `word_count` words
    pub fn params_for(&self, word_count: usize) -> TilingParams {
        let tier = self.tier_for(word_count);
        TilingParams {
            window: tier.window,
            smoothing: tier.smoothing,
            block_size: self.block_size,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.block_size == 0 {
            return Err(ChunkwiseError::invalid("block_size must be greater than 0"));
        }

        let Some((last, bounded)) = self.tiers.split_last() else {
            return Err(ChunkwiseError::invalid("at least one length tier is required"));
        };

        if last.max_words_exclusive.is_some() {
            return Err(ChunkwiseError::invalid(
                "the last length tier must be open-ended",
            ));
        }

        let mut previous = 0;
        for tier in bounded {
            match tier.max_words_exclusive {
                Some(limit) if limit > previous => previous = limit,
                Some(limit) => {
                    return Err(ChunkwiseError::invalid(format!(
                        "length tiers must be strictly increasing (got {limit} after {previous})"
                    )))
                }
                None => {
                    return Err(ChunkwiseError::invalid(
                        "only the last length tier may be open-ended",
                    ))
                }
            }
        }

        for tier in &self.tiers {
            if tier.window == 0 {
                return Err(ChunkwiseError::invalid("window must be greater than 0"));
            }
            if tier.smoothing == 0 {
                return Err(ChunkwiseError::invalid("smoothing must be greater than 0"));
            }
        }

        Ok(())
    }
}

/// Fallback chunker section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    /// Sentences per chunk once `min_words` is met
    pub target_sentences: usize,
    /// Lower word bound
    pub min_words: usize,
    /// Upper word bound
    pub max_words: usize,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            target_sentences: defaults::TARGET_SENTENCES,
            min_words: defaults::MIN_WORDS,
            max_words: defaults::MAX_WORDS,
        }
    }
}

impl FallbackConfig {
    fn validate(&self) -> Result<()> {
        if self.target_sentences == 0 {
            return Err(ChunkwiseError::invalid(
                "target_sentences must be greater than 0",
            ));
        }
        if self.max_words == 0 {
            return Err(ChunkwiseError::invalid("max_words must be greater than 0"));
        }
        if self.min_words > self.max_words {
            return Err(ChunkwiseError::invalid(format!(
                "min_words ({}) must not exceed max_words ({})",
                self.min_words, self.max_words
            )));
        }
        Ok(())
    }
}

/// Overlap section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlapConfig {
    /// Whether overlap is applied at all
    pub enabled: bool,
    /// Words carried from each chunk into the next
    pub overlap_words: usize,
}

impl Default for OverlapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            overlap_words: defaults::OVERLAP_WORDS,
        }
    }
}

/// How successive chunks are anchored in the timeline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReconcileMode {
    /// Every chunk takes the leftmost match in the whole timeline
    #[default]
    Leftmost,
    /// Each search starts at the previous chunk's matched offset
    Monotonic,
}

/// Timestamp section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimestampConfig {
    /// Characters of chunk prefix used for matching
    pub tolerance: usize,
    /// Anchoring mode
    pub mode: ReconcileMode,
}

impl Default for TimestampConfig {
    fn default() -> Self {
        Self {
            tolerance: defaults::TOLERANCE,
            mode: ReconcileMode::Leftmost,
        }
    }
}

/// Batch processing section
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelConfig {
    /// Worker threads for batch ingestion (0 = all available)
    pub threads: usize,
}

/// Complete pipeline configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Tiling parameters and length tiers
    pub tiling: TilingConfig,
    /// Fallback chunker bounds
    pub fallback: FallbackConfig,
    /// Sliding-window overlap
    pub overlap: OverlapConfig,
    /// Timestamp reconciliation
    pub timestamps: TimestampConfig,
    /// Batch processing
    pub parallel: ParallelConfig,
}

impl PipelineConfig {
    /// Create a configuration builder
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: PipelineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ChunkwiseError::Io(format!("{}: {e}", path.as_ref().display()))
        })?;
        Self::from_toml_str(&text)
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.tiling.validate()?;
        self.fallback.validate()?;

        if self.timestamps.tolerance == 0 {
            return Err(ChunkwiseError::invalid("tolerance must be greater than 0"));
        }

        Ok(())
    }
}

/// Fluent builder for [`PipelineConfig`]
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    pub fn from_config(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Set sentences per pseudo-block
    pub fn block_size(mut self, sentences: usize) -> Self {
        self.config.tiling.block_size = sentences;
        self
    }

    /// Replace the length-tier table
    pub fn tiers(mut self, tiers: impl Into<Vec<LengthTier>>) -> Self {
        self.config.tiling.tiers = tiers.into();
        self
    }

    /// Set the fallback target sentence count
    pub fn target_sentences(mut self, sentences: usize) -> Self {
        self.config.fallback.target_sentences = sentences;
        self
    }

    /// Set the fallback word bounds
    pub fn word_bounds(mut self, min_words: usize, max_words: usize) -> Self {
        self.config.fallback.min_words = min_words;
        self.config.fallback.max_words = max_words;
        self
    }

    /// Enable or disable overlap
    pub fn overlap(mut self, enabled: bool) -> Self {
        self.config.overlap.enabled = enabled;
        self
    }

    /// Set overlap width in words
    pub fn overlap_words(mut self, words: usize) -> Self {
        self.config.overlap.overlap_words = words;
        self
    }

    /// Set the timestamp matching prefix length in characters
    pub fn tolerance(mut self, chars: usize) -> Self {
        self.config.timestamps.tolerance = chars;
        self
    }

    /// Set the timestamp anchoring mode
    pub fn reconcile_mode(mut self, mode: ReconcileMode) -> Self {
        self.config.timestamps.mode = mode;
        self
    }

    /// Set batch worker threads (None = all available)
    pub fn threads(mut self, count: Option<usize>) -> Self {
        self.config.parallel.threads = count.unwrap_or(0);
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<PipelineConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
