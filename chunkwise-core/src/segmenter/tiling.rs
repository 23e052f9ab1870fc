//! Lexical-cohesion topic boundary detection
//!
//! The detector compares the vocabulary of adjacent sentence windows and
//! looks for valleys in the resulting similarity curve. The deepest valleys
//! become topic boundaries, snapped to the nearest pseudo-block edge.
//!
//! The algorithm in brief:
//!
//! 1. Split the text into sentences and group them into pseudo-blocks of
//!    `block_size` sentences joined by [`BLOCK_BREAK`]. Cleaned transcripts
//!    carry no paragraphs, so the block edges are the only structure
//!    boundaries can align with.
//! 2. For every gap `g` in `[w, n - w]`, score the cosine similarity between
//!    the term counts of sentences `[g - w, g)` and `[g, g + w)`.
//! 3. Smooth the scores with a moving average of radius `k / 2`.
//! 4. At each local minimum, climb at most `k` gaps left and right while the
//!    curve keeps rising; the depth is the sum of both climbs.
//! 5. Keep minima whose depth reaches `mean - sd / 2` and exceeds
//!    [`MIN_DEPTH`], deepest first, dropping any within `k` gaps of one
//!    already kept.
//!
//! Chunks are rebuilt from the sentences, so no marker survives in them.

use crate::config::TilingParams;
use crate::segmenter::{Segmentation, Segmenter, UnavailableReason};
use crate::text::{content_terms, split_sentences, TermCounts};
use smallvec::SmallVec;

/// Marker placed between pseudo-blocks in structured text
pub const BLOCK_BREAK: &str = "\n\n";

/// A valley must be deeper than this to become a boundary
pub const MIN_DEPTH: f64 = 0.1;

/// Boundary sentence indices
pub type Boundaries = SmallVec<[usize; 16]>;

/// Group the sentences of `text` into pseudo-blocks joined by [`BLOCK_BREAK`]
pub fn structure_blocks(text: &str, block_size: usize) -> String {
    split_sentences(text)
        .chunks(block_size.max(1))
        .map(|block| block.join(" "))
        .collect::<Vec<_>>()
        .join(BLOCK_BREAK)
}

/// TextTiling boundary detector
#[derive(Debug, Clone, Default)]
pub struct TextTiler {
    params: TilingParams,
}

impl TextTiler {
    pub fn new(params: TilingParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &TilingParams {
        &self.params
    }

    /// Sentence indices where a new chunk starts, ascending, excluding 0
    ///
    /// `structured` is text laid out by [`structure_blocks`]; boundaries
    /// land on its block edges.
    pub fn boundaries(&self, structured: &str) -> Result<Boundaries, UnavailableReason> {
        self.tile(structured).map(|(_, boundaries)| boundaries)
    }

    fn tile<'a>(
        &self,
        structured: &'a str,
    ) -> Result<(Vec<&'a str>, Boundaries), UnavailableReason> {
        let TilingParams {
            window,
            smoothing,
            block_size,
        } = self.params;

        if window == 0 {
            return Err(UnavailableReason::InvalidParameters(
                "window must be greater than 0".into(),
            ));
        }
        if block_size == 0 {
            return Err(UnavailableReason::InvalidParameters(
                "block_size must be greater than 0".into(),
            ));
        }

        let blocks = read_blocks(structured);
        let edges: Vec<usize> = blocks
            .iter()
            .scan(0, |end, block| {
                *end += block.len();
                Some(*end)
            })
            .collect();
        let sentences: Vec<&str> = blocks.into_iter().flatten().collect();

        let n = sentences.len();
        let required = 2 * window;
        if n < required {
            return Err(UnavailableReason::TooFewSentences {
                sentences: n,
                required,
            });
        }

        log::debug!(
            "tiling {n} sentences in {} blocks (w={window}, k={smoothing})",
            edges.len()
        );

        let terms: Vec<Vec<String>> = sentences.iter().map(|s| content_terms(s)).collect();
        if terms.iter().all(Vec::is_empty) {
            return Err(UnavailableReason::DegenerateScores(
                "no content terms in any window".into(),
            ));
        }

        let scores = gap_scores(&terms, window);
        if let Some(bad) = scores.iter().position(|s| !s.is_finite()) {
            return Err(UnavailableReason::DegenerateScores(format!(
                "non-finite score at gap {}",
                bad + window
            )));
        }

        let smoothed = smooth(&scores, smoothing / 2);
        let accepted = select_valleys(&smoothed, smoothing);

        let mut boundaries: Boundaries = accepted
            .iter()
            .map(|i| snap_to_edge(i + window, &edges))
            .filter(|&edge| edge > 0 && edge < n)
            .collect();
        boundaries.sort_unstable();
        boundaries.dedup();

        log::debug!("accepted boundaries at sentences {:?}", boundaries.as_slice());
        Ok((sentences, boundaries))
    }
}

impl Segmenter for TextTiler {
    fn segment(&self, text: &str) -> Segmentation {
        let structured = structure_blocks(text, self.params.block_size);
        match self.tile(&structured) {
            Ok((sentences, boundaries)) => {
                Segmentation::Segmented(rejoin(&sentences, &boundaries))
            }
            Err(reason) => Segmentation::Unavailable(reason),
        }
    }

    fn name(&self) -> &'static str {
        "tiling"
    }
}

/// Sentences of each non-empty block in structured text
fn read_blocks(structured: &str) -> Vec<Vec<&str>> {
    structured
        .split(BLOCK_BREAK)
        .map(split_sentences)
        .filter(|block| !block.is_empty())
        .collect()
}

/// Cosine similarity for every gap in `[w, n - w]`, indexed from gap `w`
fn gap_scores(terms: &[Vec<String>], window: usize) -> Vec<f64> {
    let n = terms.len();
    (window..=n - window)
        .map(|gap| {
            let left = TermCounts::from_terms(terms[gap - window..gap].iter().flatten());
            let right = TermCounts::from_terms(terms[gap..gap + window].iter().flatten());
            left.cosine(&right)
        })
        .collect()
}

/// Moving average over `[i - radius, i + radius]`, clamped at the ends
fn smooth(scores: &[f64], radius: usize) -> Vec<f64> {
    (0..scores.len())
        .map(|i| {
            let lo = i.saturating_sub(radius);
            let hi = (i + radius + 1).min(scores.len());
            let window = &scores[lo..hi];
            window.iter().sum::<f64>() / window.len() as f64
        })
        .collect()
}

/// Score ≤ both neighbours and strictly below at least one
fn is_local_minimum(scores: &[f64], i: usize) -> bool {
    if i == 0 || i + 1 >= scores.len() {
        return false;
    }
    let (prev, here, next) = (scores[i - 1], scores[i], scores[i + 1]);
    here <= prev && here <= next && (here < prev || here < next)
}

/// Depth of the valley at `i`, climbing at most `k` gaps on each side
fn depth_at(scores: &[f64], i: usize, k: usize) -> f64 {
    let mut left = i;
    while left > 0 && i - left < k && scores[left - 1] >= scores[left] {
        left -= 1;
    }

    let mut right = i;
    while right + 1 < scores.len() && right - i < k && scores[right + 1] >= scores[right] {
        right += 1;
    }

    (scores[left] - scores[i]) + (scores[right] - scores[i])
}

/// Indices of significant, mutually separated valleys
fn select_valleys(scores: &[f64], k: usize) -> Boundaries {
    let mut candidates: Vec<(usize, f64)> = (0..scores.len())
        .filter(|&i| is_local_minimum(scores, i))
        .map(|i| (i, depth_at(scores, i, k)))
        .collect();

    if candidates.is_empty() {
        return Boundaries::new();
    }

    let count = candidates.len() as f64;
    let mean = candidates.iter().map(|(_, d)| d).sum::<f64>() / count;
    let variance = candidates
        .iter()
        .map(|(_, d)| (d - mean).powi(2))
        .sum::<f64>()
        / count;
    // A lone valley sits exactly on its own mean, so this side stays inclusive.
    let relative = mean - variance.sqrt() / 2.0;

    log::debug!(
        "{} valley candidates, depth cutoff {relative:.3} (floor {MIN_DEPTH})",
        candidates.len()
    );

    candidates.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut accepted = Boundaries::new();
    for (i, depth) in candidates {
        if depth < relative || depth <= MIN_DEPTH {
            break;
        }
        if accepted.iter().all(|a| a.abs_diff(i) > k) {
            accepted.push(i);
        }
    }
    accepted
}

/// Nearest block edge to a sentence gap, ties going to the later edge
fn snap_to_edge(gap: usize, edges: &[usize]) -> usize {
    std::iter::once(0)
        .chain(edges.iter().copied())
        .min_by_key(|&edge| (edge.abs_diff(gap), std::cmp::Reverse(edge)))
        .unwrap_or(0)
}

fn rejoin(sentences: &[&str], boundaries: &[usize]) -> Vec<String> {
    let mut chunks = Vec::with_capacity(boundaries.len() + 1);
    let mut start = 0;
    for &edge in boundaries.iter().chain(std::iter::once(&sentences.len())) {
        if edge > start {
            chunks.push(sentences[start..edge].join(" "));
            start = edge;
        }
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOPIC_A: &str =
        "Rust compilers check borrowed memory lifetimes during every careful build.";
    const TOPIC_B: &str =
        "Gardeners water tomato seedlings beside sunny greenhouse windows each morning.";

    fn topics(a: usize, b: usize) -> String {
        std::iter::repeat(TOPIC_A)
            .take(a)
            .chain(std::iter::repeat(TOPIC_B).take(b))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn tiler(window: usize, smoothing: usize) -> TextTiler {
        TextTiler::new(TilingParams {
            window,
            smoothing,
            block_size: 5,
        })
    }

    #[test]
    fn test_structure_blocks() {
        let text = "One. Two. Three. Four. Five. Six. Seven.";
        assert_eq!(
            structure_blocks(text, 3),
            "One. Two. Three.\n\nFour. Five. Six.\n\nSeven."
        );
        assert_eq!(structure_blocks("", 5), "");
    }

    #[test]
    fn test_too_few_sentences() {
        let text = topics(10, 9);
        match tiler(10, 5).segment(&text) {
            Segmentation::Unavailable(UnavailableReason::TooFewSentences {
                sentences,
                required,
            }) => {
                assert_eq!(sentences, 19);
                assert_eq!(required, 20);
            }
            other => panic!("expected too few sentences, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_window_is_invalid() {
        let outcome = tiler(0, 5).segment(&topics(10, 10));
        assert!(matches!(
            outcome,
            Segmentation::Unavailable(UnavailableReason::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_stopword_only_text_is_degenerate() {
        let text = std::iter::repeat("It is what it is.")
            .take(12)
            .collect::<Vec<_>>()
            .join(" ");
        assert!(matches!(
            tiler(3, 2).segment(&text),
            Segmentation::Unavailable(UnavailableReason::DegenerateScores(_))
        ));
    }

    #[test]
    fn test_single_topic_is_one_chunk() {
        let text = topics(40, 0);
        let chunks = tiler(10, 5).segment(&text).chunks().unwrap();
        assert_eq!(chunks, vec![text]);
    }

    #[test]
    fn test_topic_shift_found_on_block_edge() {
        let text = topics(30, 30);
        let boundaries = tiler(10, 5)
            .boundaries(&structure_blocks(&text, 5))
            .unwrap();
        assert_eq!(boundaries.as_slice(), &[30]);

        let chunks = tiler(10, 5).segment(&text).chunks().unwrap();
        assert_eq!(chunks, vec![topics(30, 0), topics(0, 30)]);
    }

    #[test]
    fn test_off_edge_shift_snaps_to_nearest_block() {
        let text = topics(32, 28);
        let boundaries = tiler(10, 5)
            .boundaries(&structure_blocks(&text, 5))
            .unwrap();
        assert_eq!(boundaries.as_slice(), &[30]);
    }

    #[test]
    fn test_chunks_conserve_sentences() {
        let text = topics(25, 35);
        let chunks = tiler(10, 5).segment(&text).chunks().unwrap();
        assert_eq!(chunks.join(" "), text);
        assert!(chunks.iter().all(|c| !c.contains(BLOCK_BREAK)));
    }

    #[test]
    fn test_local_minimum_rule() {
        let scores = [0.9, 0.5, 0.5, 0.9];
        assert!(is_local_minimum(&scores, 1));
        assert!(is_local_minimum(&scores, 2));
        assert!(!is_local_minimum(&[0.5, 0.5, 0.5], 1));
        assert!(!is_local_minimum(&scores, 0));
    }

    #[test]
    fn test_depth_climb_is_bounded() {
        let scores = [1.0, 0.8, 0.6, 0.2, 0.5, 0.9];
        assert!((depth_at(&scores, 3, 1) - (0.4 + 0.3)).abs() < 1e-9);
        assert!((depth_at(&scores, 3, 3) - (0.8 + 0.7)).abs() < 1e-9);
    }

    #[test]
    fn test_close_valleys_keep_deepest() {
        let scores = [1.0, 0.15, 0.9, 0.1, 1.0, 1.0, 0.6, 1.0];
        assert_eq!(select_valleys(&scores, 2).as_slice(), &[3]);
        assert_eq!(select_valleys(&scores, 1).as_slice(), &[3, 1]);
    }

    #[test]
    fn test_shallow_valleys_below_floor() {
        let scores = [1.0, 0.97, 1.0, 0.98, 1.0];
        assert!(select_valleys(&scores, 2).is_empty());
    }

    #[test]
    fn test_smoothing_width_follows_k() {
        let scores = [1.0, 0.0, 1.0, 1.0, 1.0];
        assert_eq!(smooth(&scores, 0), scores.to_vec());

        let narrow = smooth(&scores, 1);
        assert!((narrow[2] - 2.0 / 3.0).abs() < 1e-9);

        let wide = smooth(&scores, 2);
        assert!((wide[2] - 0.8).abs() < 1e-9);
        assert!((wide[0] - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_smoothing_absorbs_one_gap_notches() {
        // Six single-gap notches inside one topic, then a wide real valley.
        let mut scores = vec![0.9; 100];
        for notch in (8..56).step_by(8) {
            scores[notch] = 0.5;
        }
        for (offset, score) in [0.8, 0.6, 0.4, 0.2, 0.4, 0.6, 0.8].into_iter().enumerate() {
            scores[72 + offset] = score;
        }

        assert_eq!(select_valleys(&smooth(&scores, 0), 6).len(), 7);
        assert_eq!(select_valleys(&smooth(&scores, 3), 6).as_slice(), &[75]);
    }

    #[test]
    fn test_depth_must_exceed_floor() {
        assert!(select_valleys(&[0.1, 0.0, 0.0], 2).is_empty());
        assert_eq!(select_valleys(&[0.2, 0.0, 0.0], 2).as_slice(), &[1]);
    }

    #[test]
    fn test_read_blocks_restores_sentences() {
        let text = "One. Two. Three. Four. Five. Six. Seven.";
        let binding = structure_blocks(text, 3);
        let blocks = read_blocks(&binding);
        assert_eq!(
            blocks,
            vec![
                vec!["One.", "Two.", "Three."],
                vec!["Four.", "Five.", "Six."],
                vec!["Seven."],
            ]
        );
        assert!(read_blocks("").is_empty());
    }

    #[test]
    fn test_snap_to_edge() {
        let edges = [5, 10, 15, 20, 23];
        assert_eq!(snap_to_edge(12, &edges), 10);
        assert_eq!(snap_to_edge(13, &edges), 15);
        assert_eq!(snap_to_edge(2, &edges), 0);
        // Short final block: the gap lies closer to the text end.
        assert_eq!(snap_to_edge(22, &edges), 23);
    }

    #[test]
    fn test_boundaries_follow_structured_blocks() {
        let text = topics(32, 28);
        // Blocks of 4 put an edge on every multiple of 4; 32 is one of them.
        let boundaries = tiler(10, 5)
            .boundaries(&structure_blocks(&text, 4))
            .unwrap();
        assert_eq!(boundaries.as_slice(), &[32]);
    }
}
