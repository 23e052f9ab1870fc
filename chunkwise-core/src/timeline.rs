//! Timestamp reconciliation
//!
//! Chunk text comes from the cleaned transcript while timestamps live on the
//! raw segment timeline, so alignment is approximate. The raw segments are
//! lowercased and joined into one searchable string, and each chunk is
//! anchored by a literal search for its first `tolerance` characters. A
//! chunk that cannot be found gets the whole transcript span instead.

use crate::config::{defaults, ReconcileMode, TimestampConfig};
use crate::types::{TimeSpan, TimedSegment};

/// Searchable view over a segment timeline
///
/// Segment `i` owns the byte range `bounds[i]..bounds[i + 1]` of `text`,
/// which includes the joining space after it.
#[derive(Debug)]
pub struct Timeline<'a> {
    segments: &'a [TimedSegment],
    text: String,
    bounds: Vec<usize>,
}

impl<'a> Timeline<'a> {
    pub fn new(segments: &'a [TimedSegment]) -> Self {
        let mut text = String::new();
        let mut bounds = Vec::with_capacity(segments.len() + 1);

        for (i, segment) in segments.iter().enumerate() {
            if i > 0 {
                text.push(' ');
            }
            bounds.push(text.len());
            text.push_str(&segment.text.to_lowercase());
        }
        bounds.push(text.len() + 1);

        Self {
            segments,
            text,
            bounds,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The lowercased, joined timeline text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Byte offset of the first occurrence of `needle` at or after `from`
    pub fn find(&self, needle: &str, from: usize) -> Option<usize> {
        self.text
            .get(from..)
            .and_then(|rest| rest.find(needle))
            .map(|pos| pos + from)
    }

    /// Span of the whole recording
    pub fn full_span(&self) -> TimeSpan {
        match (self.segments.first(), self.segments.last()) {
            (Some(first), Some(last)) => TimeSpan::coarse(first.start, last.end()),
            _ => TimeSpan::coarse(0.0, 0.0),
        }
    }

    /// Index of the segment owning byte `offset`
    fn segment_at(&self, offset: usize) -> usize {
        self.bounds
            .partition_point(|&b| b <= offset)
            .saturating_sub(1)
            .min(self.segments.len().saturating_sub(1))
    }

    /// Span from the segment owning `start` to the one owning `end`
    ///
    /// The end segment is searched from the start segment onward, and an end
    /// past the timeline takes the last segment's end.
    fn span_between(&self, start: usize, end: usize) -> TimeSpan {
        let first = self.segment_at(start);
        let last = (first..self.segments.len())
            .find(|&j| end <= self.bounds[j + 1])
            .unwrap_or(self.segments.len() - 1);

        TimeSpan::matched(self.segments[first].start, self.segments[last].end())
    }

    /// Offset just past the character at `offset`
    fn next_char(&self, offset: usize) -> usize {
        self.text
            .get(offset..)
            .and_then(|rest| rest.chars().next())
            .map_or(offset + 1, |c| offset + c.len_utf8())
    }
}

/// Attributes time ranges to chunk texts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampReconciler {
    tolerance: usize,
    mode: ReconcileMode,
}

impl Default for TimestampReconciler {
    fn default() -> Self {
        Self {
            tolerance: defaults::TOLERANCE,
            mode: ReconcileMode::Leftmost,
        }
    }
}

impl TimestampReconciler {
    pub fn new(config: TimestampConfig) -> Self {
        Self {
            tolerance: config.tolerance,
            mode: config.mode,
        }
    }

    /// Leftmost reconciler with a custom prefix length
    pub fn with_tolerance(tolerance: usize) -> Self {
        Self {
            tolerance,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> ReconcileMode {
        self.mode
    }

    /// Locate one chunk by its leftmost match in the whole timeline
    pub fn locate(&self, chunk: &str, segments: &[TimedSegment]) -> TimeSpan {
        self.locate_from(chunk, &Timeline::new(segments), 0).0
    }

    /// Locate every chunk, in order
    ///
    /// In [`ReconcileMode::Monotonic`] a chunk is first searched where it
    /// should sit after the previous match: the previous match start plus
    /// the previous chunk length, minus the text both chunks share. Failing
    /// that, the search starts just past the previous match start, and
    /// finally falls back to a leftmost search.
    pub fn reconcile<S: AsRef<str>>(
        &self,
        chunks: &[S],
        segments: &[TimedSegment],
    ) -> Vec<TimeSpan> {
        let timeline = Timeline::new(segments);
        let mut previous: Option<(usize, String)> = None;

        chunks
            .iter()
            .enumerate()
            .map(|(i, chunk)| {
                let chunk = chunk.as_ref();
                let (span, matched_at) = match (self.mode, &previous) {
                    (ReconcileMode::Monotonic, Some((start, prev_clean))) => {
                        let clean = chunk.trim().to_lowercase();
                        let expected = start + prev_clean.len() - shared_len(prev_clean, &clean);

                        [expected, timeline.next_char(*start)]
                            .into_iter()
                            .map(|from| self.locate_from(chunk, &timeline, from))
                            .find(|(_, offset)| offset.is_some())
                            .unwrap_or_else(|| self.locate_from(chunk, &timeline, 0))
                    }
                    _ => self.locate_from(chunk, &timeline, 0),
                };

                if let Some(offset) = matched_at {
                    previous = Some((offset, chunk.trim().to_lowercase()));
                }
                if span.is_coarse() {
                    log::debug!("chunk {i} not found in timeline, using coarse span");
                }
                span
            })
            .collect()
    }

    /// Span for `chunk` searching from byte `from`, with the matched offset
    fn locate_from(
        &self,
        chunk: &str,
        timeline: &Timeline<'_>,
        from: usize,
    ) -> (TimeSpan, Option<usize>) {
        let clean = chunk.trim().to_lowercase();
        if timeline.is_empty() || clean.is_empty() {
            return (TimeSpan::coarse(0.0, 0.0), None);
        }

        let needle_end = clean
            .char_indices()
            .nth(self.tolerance)
            .map_or(clean.len(), |(i, _)| i);

        match timeline.find(&clean[..needle_end], from) {
            Some(start) => (timeline.span_between(start, start + clean.len()), Some(start)),
            None => (timeline.full_span(), None),
        }
    }
}

/// Length of the longest word-aligned prefix of `current` that ends `previous`
fn shared_len(previous: &str, current: &str) -> usize {
    current
        .char_indices()
        .filter(|(_, c)| c.is_whitespace())
        .map(|(i, _)| i)
        .chain(std::iter::once(current.len()))
        .take_while(|&k| k <= previous.len())
        .filter(|&k| previous.ends_with(&current[..k]))
        .last()
        .unwrap_or(0)
}
