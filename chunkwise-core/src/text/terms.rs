//! Vocabulary extraction for lexical similarity

use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

/// Function words ignored when comparing vocabulary
const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "could", "did", "do", "does", "doing", "don't", "down", "during", "each",
    "few", "for", "from", "further", "get", "got", "had", "has", "have", "having", "he", "her",
    "here", "hers", "herself", "him", "himself", "his", "how", "i", "i'm", "if", "in", "into",
    "is", "it", "it's", "its", "itself", "just", "let's", "like", "me", "more", "most", "my",
    "myself", "no", "nor", "not", "now", "of", "off", "on", "once", "only", "or", "other", "our",
    "ours", "ourselves", "out", "over", "own", "really", "same", "she", "should", "so", "some",
    "such", "than", "that", "that's", "the", "their", "theirs", "them", "themselves", "then",
    "there", "these", "they", "this", "those", "through", "to", "too", "under", "until", "up",
    "very", "was", "we", "we're", "were", "what", "when", "where", "which", "while", "who",
    "whom", "why", "will", "with", "would", "you", "you're", "your", "yours", "yourself",
    "yourselves",
];

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"[\p{L}\p{N}]+(?:['’][\p{L}\p{N}]+)*").expect("token pattern is valid")
    })
}

fn stopwords() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| STOPWORDS.iter().copied().collect())
}

/// Lowercase content terms of `text`, in order, with stopwords removed
pub fn content_terms(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    token_pattern()
        .find_iter(&lowered)
        .map(|m| m.as_str().replace('’', "'"))
        .filter(|term| !stopwords().contains(term.as_str()))
        .collect()
}

/// Term-frequency vector
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermCounts {
    counts: HashMap<String, usize>,
}

impl TermCounts {
    /// Empty vector
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a list of terms
    pub fn from_terms<'a, I>(terms: I) -> Self
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut counts = Self::new();
        counts.extend(terms);
        counts
    }

    /// Add terms to the vector
    pub fn extend<'a, I>(&mut self, terms: I)
    where
        I: IntoIterator<Item = &'a String>,
    {
        for term in terms {
            *self.counts.entry(term.clone()).or_insert(0) += 1;
        }
    }

    /// True when the vector has no terms
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Cosine similarity in `[0, 1]`; 0 when either side is empty
    pub fn cosine(&self, other: &TermCounts) -> f64 {
        if self.is_empty() || other.is_empty() {
            return 0.0;
        }

        let (small, large) = if self.counts.len() <= other.counts.len() {
            (&self.counts, &other.counts)
        } else {
            (&other.counts, &self.counts)
        };

        let dot: f64 = small
            .iter()
            .filter_map(|(term, a)| large.get(term).map(|b| (*a * *b) as f64))
            .sum();

        dot / (self.norm() * other.norm())
    }

    fn norm(&self) -> f64 {
        self.counts
            .values()
            .map(|c| (*c * *c) as f64)
            .sum::<f64>()
            .sqrt()
    }
}
