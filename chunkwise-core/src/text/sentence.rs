//! Rule-based English sentence tokenization
//!
//! A boundary is placed after a run of terminators (plus any closing quotes
//! or brackets) that is followed by whitespace or the end of the text.
//! Candidates after titles, trailing abbreviations and single-letter
//! initials are rejected. Sentences are returned as trimmed slices of the
//! input, so joining them with single spaces conserves every word.

use std::collections::HashSet;
use std::sync::OnceLock;

/// Sentence-ending punctuation
const TERMINATORS: &[char] = &['.', '!', '?', '…'];

/// Characters that may trail a terminator and still belong to the sentence
const CLOSERS: &[char] = &['"', '\'', ')', ']', '}', '”', '’', '»'];

/// Abbreviations that are never followed by a boundary ("Dr. Smith")
const TITLES: &[&str] = &[
    "dr", "mr", "mrs", "ms", "prof", "sr", "jr", "st", "mt", "gen", "col", "lt", "sgt", "rev",
    "hon", "capt",
];

/// Abbreviations that end a sentence only when a capitalized word follows
const TRAILING: &[&str] = &[
    "etc", "vs", "e.g", "i.e", "approx", "dept", "est", "fig", "inc", "ltd", "co", "corp", "jan",
    "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec", "cf", "al",
];

/// Terminator and abbreviation rules for sentence splitting
#[derive(Debug, Clone)]
struct SentenceRules {
    titles: HashSet<&'static str>,
    trailing: HashSet<&'static str>,
}

impl SentenceRules {
    fn english() -> Self {
        Self {
            titles: TITLES.iter().copied().collect(),
            trailing: TRAILING.iter().copied().collect(),
        }
    }

    /// Whether the terminator run `text[run_start..run_end]` ends a sentence
    fn ends_sentence(&self, text: &str, run_start: usize, run_end: usize) -> bool {
        let run = &text[run_start..run_end];
        let after = &text[run_end..];

        // Only a lone dot can belong to an abbreviation.
        if run.trim_end_matches(CLOSERS) != "." {
            return true;
        }

        let word = preceding_word(&text[..run_start]);
        if word.is_empty() {
            return true;
        }

        let lowered = word.to_lowercase();
        if self.titles.contains(lowered.as_str()) {
            return false;
        }

        let next = after.trim_start().chars().next();
        let next_is_capital = next.is_some_and(char::is_uppercase);

        if self.trailing.contains(lowered.as_str()) && !next_is_capital && next.is_some() {
            return false;
        }

        if is_initial(word) && next_is_capital {
            return false;
        }

        true
    }

    /// Split text into trimmed, non-empty sentences
    fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut chars = text.char_indices().peekable();

        while let Some((pos, ch)) = chars.next() {
            if !TERMINATORS.contains(&ch) {
                continue;
            }

            let mut run_end = pos + ch.len_utf8();
            while let Some(&(next_pos, next)) = chars.peek() {
                if TERMINATORS.contains(&next) || CLOSERS.contains(&next) {
                    run_end = next_pos + next.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }

            let at_break = text[run_end..]
                .chars()
                .next()
                .map_or(true, char::is_whitespace);
            if !at_break {
                continue;
            }

            if self.ends_sentence(text, pos, run_end) {
                push_trimmed(&mut sentences, &text[start..run_end]);
                start = run_end;
            }
        }

        push_trimmed(&mut sentences, &text[start..]);
        sentences
    }
}

/// Split text into sentences using the built-in English rules
pub fn split_sentences(text: &str) -> Vec<&str> {
    static RULES: OnceLock<SentenceRules> = OnceLock::new();
    RULES.get_or_init(SentenceRules::english).split(text)
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, candidate: &'a str) {
    let trimmed = candidate.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed);
    }
}

/// The word directly before a terminator, without leading punctuation
fn preceding_word(before: &str) -> &str {
    let last = before
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or_default();
    last.trim_start_matches(|c: char| !c.is_alphanumeric())
}

fn is_initial(word: &str) -> bool {
    let mut chars = word.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c.is_uppercase() && c != 'I',
        _ => false,
    }
}
