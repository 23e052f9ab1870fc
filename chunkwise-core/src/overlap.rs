//! Sliding-window overlap between neighbouring chunks

use crate::config::defaults;
use crate::text::trailing_words;
use crate::types::BaseChunk;

/// A chunk text after overlap composition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedChunk {
    /// Display text, overlap prefix included
    pub text: String,
    /// Whether a prefix was borrowed from the previous chunk
    pub has_overlap: bool,
}

impl ComposedChunk {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            has_overlap: false,
        }
    }
}

/// Prepends the tail of each base chunk to its successor
///
/// The prefix always comes from the previous *base* chunk, so overlap never
/// accumulates along the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlapCompositor {
    overlap_words: usize,
}

impl Default for OverlapCompositor {
    fn default() -> Self {
        Self::new(defaults::OVERLAP_WORDS)
    }
}

impl OverlapCompositor {
    pub fn new(overlap_words: usize) -> Self {
        Self { overlap_words }
    }

    pub fn overlap_words(&self) -> usize {
        self.overlap_words
    }

    /// Compose display texts from base chunks, in order
    pub fn compose(&self, base: &[BaseChunk]) -> Vec<ComposedChunk> {
        if self.overlap_words == 0 {
            return Self::passthrough(base);
        }

        let mut composed = Vec::with_capacity(base.len());
        for (i, chunk) in base.iter().enumerate() {
            let Some(previous) = i.checked_sub(1).map(|p| &base[p]) else {
                composed.push(ComposedChunk::plain(&chunk.text));
                continue;
            };

            let prefix = trailing_words(&previous.text, self.overlap_words);
            if prefix.is_empty() {
                composed.push(ComposedChunk::plain(&chunk.text));
                continue;
            }

            composed.push(ComposedChunk {
                text: format!("{prefix} {}", chunk.text),
                has_overlap: true,
            });
        }
        composed
    }

    /// Base chunk texts with no overlap applied
    pub fn passthrough(base: &[BaseChunk]) -> Vec<ComposedChunk> {
        base.iter().map(|c| ComposedChunk::plain(&c.text)).collect()
    }
}
