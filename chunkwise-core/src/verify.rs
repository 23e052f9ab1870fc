//! Advisory quality checks over a chunk set
//!
//! Nothing here gates ingestion. The report is surfaced for logging and a
//! failing check never rolls anything back.

use std::collections::BTreeMap;

use crate::text::word_count;
use crate::types::{ChunkingStats, VerificationReport};

/// Largest tolerated word-count difference between text and chunks
pub const MAX_WORD_DELTA: usize = 10;

/// Chunks must be strictly larger than this many words
pub const MIN_REASONABLE_WORDS: usize = 20;

/// Chunks must be strictly smaller than this many words
pub const MAX_REASONABLE_WORDS: usize = 2000;

/// Check base chunks against the text they came from
///
/// Run this over pre-overlap chunks; overlapped chunks duplicate words and
/// would fail the conservation check by design of the overlap itself.
pub fn verify_chunking<S: AsRef<str>>(original: &str, chunks: &[S]) -> VerificationReport {
    let original_words = word_count(original);
    let counts: Vec<usize> = chunks.iter().map(|c| word_count(c.as_ref())).collect();
    let chunks_words: usize = counts.iter().sum();
    let empty_chunks = chunks
        .iter()
        .filter(|c| c.as_ref().trim().is_empty())
        .count();

    let min = counts.iter().copied().min().unwrap_or(0);
    let max = counts.iter().copied().max().unwrap_or(0);
    let avg = if counts.is_empty() {
        0.0
    } else {
        chunks_words as f64 / counts.len() as f64
    };

    let mut checks = BTreeMap::new();
    checks.insert(
        "no_data_loss".to_string(),
        original_words.abs_diff(chunks_words) < MAX_WORD_DELTA,
    );
    checks.insert("no_empty_chunks".to_string(), empty_chunks == 0);
    checks.insert(
        "reasonable_sizes".to_string(),
        min > MIN_REASONABLE_WORDS && max < MAX_REASONABLE_WORDS,
    );
    checks.insert("has_chunks".to_string(), !chunks.is_empty());

    let mut stats = BTreeMap::new();
    stats.insert("total_chunks".to_string(), chunks.len() as f64);
    stats.insert("original_words".to_string(), original_words as f64);
    stats.insert("chunks_words".to_string(), chunks_words as f64);
    stats.insert("empty_chunks".to_string(), empty_chunks as f64);
    stats.insert("min_chunk_size".to_string(), min as f64);
    stats.insert("max_chunk_size".to_string(), max as f64);
    stats.insert("avg_chunk_size".to_string(), avg);

    VerificationReport {
        passed: checks.values().all(|ok| *ok),
        checks,
        stats,
    }
}

/// Word-count statistics over chunk texts
pub fn chunking_stats<S: AsRef<str>>(chunks: &[S]) -> ChunkingStats {
    let word_counts_per_chunk: Vec<usize> =
        chunks.iter().map(|c| word_count(c.as_ref())).collect();
    let total_words = word_counts_per_chunk.iter().sum();

    ChunkingStats {
        total_chunks: chunks.len(),
        total_words,
        avg_words_per_chunk: if chunks.is_empty() {
            0.0
        } else {
            total_words as f64 / chunks.len() as f64
        },
        min_words: word_counts_per_chunk.iter().copied().min().unwrap_or(0),
        max_words: word_counts_per_chunk.iter().copied().max().unwrap_or(0),
        word_counts_per_chunk,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        (0..n).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_clean_chunking_passes() {
        let chunks = vec![words(30), words(40)];
        let original = chunks.join(" ");
        let report = verify_chunking(&original, &chunks);

        assert!(report.passed);
        assert!(report.failed_checks().is_empty());
        assert_eq!(report.stats["total_chunks"], 2.0);
        assert_eq!(report.stats["original_words"], 70.0);
        assert_eq!(report.stats["min_chunk_size"], 30.0);
        assert_eq!(report.stats["max_chunk_size"], 40.0);
        assert_eq!(report.stats["avg_chunk_size"], 35.0);
    }

    #[test]
    fn test_small_delta_tolerated() {
        let original = words(109);
        let report = verify_chunking(&original, &[words(100)]);
        assert!(report.checks["no_data_loss"]);

        let report = verify_chunking(&words(110), &[words(100)]);
        assert!(!report.checks["no_data_loss"]);
        assert!(!report.passed);
    }

    #[test]
    fn test_size_bounds_are_strict() {
        let report = verify_chunking(&words(20), &[words(20)]);
        assert_eq!(report.failed_checks(), vec!["reasonable_sizes"]);

        let report = verify_chunking(&words(21), &[words(21)]);
        assert!(report.passed);

        let report = verify_chunking(&words(2000), &[words(2000)]);
        assert!(!report.checks["reasonable_sizes"]);
    }

    #[test]
    fn test_empty_chunk_detected() {
        let chunks = vec![words(30), "   ".to_string()];
        let report = verify_chunking(&words(30), &chunks);

        assert!(!report.checks["no_empty_chunks"]);
        assert_eq!(report.stats["empty_chunks"], 1.0);
    }

    #[test]
    fn test_empty_list_is_total() {
        let report = verify_chunking::<String>("", &[]);

        assert!(!report.passed);
        assert!(!report.checks["has_chunks"]);
        assert!(report.checks["no_data_loss"]);
        assert!(report.checks["no_empty_chunks"]);
        assert_eq!(report.stats["min_chunk_size"], 0.0);
        assert_eq!(report.stats["max_chunk_size"], 0.0);
        assert_eq!(report.stats["avg_chunk_size"], 0.0);
    }

    #[test]
    fn test_report_keys_are_ordered() {
        let report = verify_chunking(&words(30), &[words(30)]);
        let keys: Vec<&str> = report.checks.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["has_chunks", "no_data_loss", "no_empty_chunks", "reasonable_sizes"]
        );
    }

    #[test]
    fn test_chunking_stats() {
        let stats = chunking_stats(&["one two three", "four five"]);
        assert_eq!(stats.total_chunks, 2);
        assert_eq!(stats.total_words, 5);
        assert_eq!(stats.avg_words_per_chunk, 2.5);
        assert_eq!((stats.min_words, stats.max_words), (2, 3));
        assert_eq!(stats.word_counts_per_chunk, vec![3, 2]);

        let empty = chunking_stats::<&str>(&[]);
        assert_eq!(empty.total_chunks, 0);
        assert_eq!(empty.avg_words_per_chunk, 0.0);
        assert!(empty.word_counts_per_chunk.is_empty());
    }
}
