//! Size-bounded sentence grouping
//!
//! Deterministic backstop for texts the tiler cannot segment. Sentences are
//! accumulated until the word bounds or the target sentence count close the
//! chunk. A short tail is merged into the previous chunk, never dropped.

use crate::config::FallbackConfig;
use crate::segmenter::{Segmentation, Segmenter};
use crate::text::{split_sentences, word_count};

/// Groups consecutive sentences into chunks within `[min_words, max_words]`
#[derive(Debug, Clone, Default)]
pub struct FallbackChunker {
    config: FallbackConfig,
}

impl FallbackChunker {
    /// Create a chunker with explicit bounds
    pub fn new(config: FallbackConfig) -> Self {
        Self { config }
    }

    /// Shorthand for `new` with individual bounds
    pub fn with_bounds(target_sentences: usize, min_words: usize, max_words: usize) -> Self {
        Self::new(FallbackConfig {
            target_sentences,
            min_words,
            max_words,
        })
    }

    /// The bounds in use
    pub fn config(&self) -> &FallbackConfig {
        &self.config
    }

    /// Split `text` into sentences and group them
    pub fn chunk_text(&self, text: &str) -> Vec<String> {
        self.chunk_sentences(&split_sentences(text))
    }

    /// Group pre-split sentences
    ///
    /// Every sentence lands in exactly one chunk. Chunks other than a merged
    /// tail hold at least `min_words`; a chunk passes `max_words` only when
    /// its last sentence alone pushes it over.
    pub fn chunk_sentences(&self, sentences: &[&str]) -> Vec<String> {
        let FallbackConfig {
            target_sentences,
            min_words,
            max_words,
        } = self.config;

        let mut chunks: Vec<String> = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        let mut current_words = 0;

        for (i, sentence) in sentences.iter().enumerate() {
            current.push(sentence);
            current_words += word_count(sentence);

            let exhausted = i + 1 == sentences.len();
            let close = current_words >= min_words
                && (exhausted || current_words >= max_words || current.len() >= target_sentences);

            if close {
                chunks.push(current.join(" "));
                current.clear();
                current_words = 0;
            }
        }

        if !current.is_empty() {
            let tail = current.join(" ");
            let last = chunks.len().saturating_sub(1);
            match chunks.last_mut() {
                Some(previous) => {
                    log::debug!("merging {current_words}-word tail into chunk {last}");
                    previous.push(' ');
                    previous.push_str(&tail);
                }
                None => chunks.push(tail),
            }
        }

        chunks
    }
}

impl Segmenter for FallbackChunker {
    fn segment(&self, text: &str) -> Segmentation {
        Segmentation::Segmented(self.chunk_text(text))
    }

    fn name(&self) -> &'static str {
        "fallback"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A sentence with exactly `n` words
    fn sentence(n: usize, tag: usize) -> String {
        let mut words: Vec<String> = (0..n.saturating_sub(1))
            .map(|i| format!("w{tag}x{i}"))
            .collect();
        words.push(format!("end{tag}."));
        words.join(" ")
    }

    fn sentences(sizes: &[usize]) -> Vec<String> {
        sizes.iter().enumerate().map(|(i, n)| sentence(*n, i)).collect()
    }

    fn refs(owned: &[String]) -> Vec<&str> {
        owned.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_empty_text() {
        let chunker = FallbackChunker::default();
        assert!(chunker.chunk_text("").is_empty());
        assert_eq!(chunker.segment("   "), Segmentation::Segmented(Vec::new()));
    }

    #[test]
    fn test_short_text_is_single_chunk() {
        let chunker = FallbackChunker::default();
        let text = "Only three sentences. Far below the minimum. Still kept.";
        assert_eq!(chunker.chunk_text(text), vec![text.to_string()]);
    }

    #[test]
    fn test_closes_at_target_sentences_once_min_met() {
        let chunker = FallbackChunker::with_bounds(3, 10, 100);
        let owned = sentences(&[5; 9]);
        let chunks = chunker.chunk_sentences(&refs(&owned));

        assert_eq!(chunks.len(), 3);
        for chunk in &chunks {
            assert_eq!(word_count(chunk), 15);
        }
    }

    #[test]
    fn test_closes_at_max_words() {
        let chunker = FallbackChunker::with_bounds(100, 10, 20);
        let owned = sentences(&[8; 6]);
        let chunks = chunker.chunk_sentences(&refs(&owned));

        // 8+8 = 16 < 20, 8+8+8 = 24 closes.
        assert_eq!(
            chunks.iter().map(|c| word_count(c)).collect::<Vec<_>>(),
            vec![24, 24]
        );
    }

    #[test]
    fn test_target_does_not_close_below_min() {
        let chunker = FallbackChunker::with_bounds(2, 30, 100);
        let owned = sentences(&[10; 6]);
        let chunks = chunker.chunk_sentences(&refs(&owned));

        assert_eq!(
            chunks.iter().map(|c| word_count(c)).collect::<Vec<_>>(),
            vec![30, 30]
        );
    }

    #[test]
    fn test_short_tail_merges_into_previous() {
        let chunker = FallbackChunker::with_bounds(2, 10, 100);
        let owned = sentences(&[6, 6, 6, 6, 3]);
        let chunks = chunker.chunk_sentences(&refs(&owned));

        assert_eq!(chunks.len(), 2);
        assert_eq!(word_count(&chunks[0]), 12);
        assert_eq!(word_count(&chunks[1]), 15);
        assert!(chunks[1].ends_with(&owned[4]));
    }

    #[test]
    fn test_tail_meeting_min_on_exhaustion_stands_alone() {
        let chunker = FallbackChunker::with_bounds(2, 10, 100);
        let owned = sentences(&[6, 6, 12]);
        let chunks = chunker.chunk_sentences(&refs(&owned));

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1], owned[2]);
    }

    #[test]
    fn test_every_sentence_appears_once() {
        let chunker = FallbackChunker::with_bounds(4, 20, 40);
        let owned = sentences(&[3, 9, 14, 2, 7, 30, 1, 5, 5, 8, 11, 4]);
        let chunks = chunker.chunk_sentences(&refs(&owned));

        assert_eq!(chunks.join(" "), owned.join(" "));
        for s in &owned {
            assert_eq!(chunks.iter().filter(|c| c.contains(s.as_str())).count(), 1);
        }
    }

    #[test]
    fn test_default_bounds_on_long_text() {
        let owned = sentences(&[12; 80]);
        let text = owned.join(" ");
        let chunks = FallbackChunker::default().chunk_text(&text);

        let total: usize = chunks.iter().map(|c| word_count(c)).sum();
        assert_eq!(total, 960);
        for chunk in &chunks[..chunks.len() - 1] {
            let n = word_count(chunk);
            assert!((100..=300).contains(&n), "chunk of {n} words");
        }
    }
}
