//! Text primitives shared by the segmenters
//!
//! A "word" anywhere in this crate is a whitespace-delimited token; all word
//! counts, size bounds and overlap windows use that definition.

mod sentence;
mod terms;

pub use sentence::split_sentences;
pub use terms::{content_terms, TermCounts};

/// Iterate over the whitespace-delimited words of `text`
pub fn words(text: &str) -> impl DoubleEndedIterator<Item = &str> + '_ {
    text.split_whitespace()
}

/// Number of whitespace-delimited words in `text`
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// The last `n` words of `text`, joined by single spaces
pub fn trailing_words(text: &str, n: usize) -> String {
    let mut tail: Vec<&str> = words(text).rev().take(n).collect();
    tail.reverse();
    tail.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("  one\ttwo\nthree  "), 3);
    }

    #[test]
    fn test_trailing_words() {
        assert_eq!(trailing_words("a b c d e", 2), "d e");
        assert_eq!(trailing_words("a  b", 5), "a b");
        assert_eq!(trailing_words("a b", 0), "");
    }
}
