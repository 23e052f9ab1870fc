//! Segmentation strategies
//!
//! Both strategies expose the same capability: turn continuous cleaned text
//! into ordered base chunk texts, or report that they cannot. The pipeline
//! tries [`TextTiler`] first and substitutes [`FallbackChunker`] whenever the
//! tiler reports [`Segmentation::Unavailable`].

mod fallback;
mod tiling;

pub use fallback::FallbackChunker;
pub use tiling::{structure_blocks, TextTiler, BLOCK_BREAK, MIN_DEPTH};

use std::fmt;

/// Why a segmenter could not produce chunks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnavailableReason {
    /// Not enough sentences for two full comparison windows
    TooFewSentences {
        /// Sentences found in the text
        sentences: usize,
        /// Sentences needed (`2w`)
        required: usize,
    },
    /// Parameters that cannot drive a comparison (e.g. `w == 0`)
    InvalidParameters(String),
    /// Similarity scoring produced nothing usable
    DegenerateScores(String),
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnavailableReason::TooFewSentences {
                sentences,
                required,
            } => write!(
                f,
                "too few sentences for tiling: {sentences} found, {required} required"
            ),
            UnavailableReason::InvalidParameters(msg) => write!(f, "invalid parameters: {msg}"),
            UnavailableReason::DegenerateScores(msg) => write!(f, "degenerate scores: {msg}"),
        }
    }
}

/// Outcome of a segmentation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segmentation {
    /// Ordered, non-empty chunk texts
    Segmented(Vec<String>),
    /// The strategy could not segment this text
    Unavailable(UnavailableReason),
}

impl Segmentation {
    /// The chunks, if segmentation succeeded
    pub fn chunks(self) -> Option<Vec<String>> {
        match self {
            Segmentation::Segmented(chunks) => Some(chunks),
            Segmentation::Unavailable(_) => None,
        }
    }

    /// True when the strategy reported unavailable
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Segmentation::Unavailable(_))
    }
}

/// Capability shared by every segmentation strategy
pub trait Segmenter: Send + Sync {
    /// Split `text` into ordered base chunks
    fn segment(&self, text: &str) -> Segmentation;

    /// Strategy name for logging
    fn name(&self) -> &'static str;
}
