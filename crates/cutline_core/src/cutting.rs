use crate::error::{CoreError, Result};
use crate::types::{Segment, SegmentSpan, TimeMs};
use uuid::Uuid;

/// Smallest segment length a border drag may leave behind, in milliseconds.
/// Keeps both neighbors strictly positive no matter where the pointer lands.
pub const MIN_SEGMENT_MS: f64 = 1.0;

/// The ordered segment partition of the full media duration.
///
/// Invariants, re-established by every operation:
/// segments ascend by `start`, each segment's `end` equals the next one's
/// `start`, the first starts at 0 and the last ends at `duration`, and no
/// segment is empty. Operations on out-of-range or boundary times are no-ops
/// rather than errors, so rapid interaction can never crash the editor.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct CuttingTimeline {
    duration: TimeMs,
    segments: Vec<Segment>,
}

impl CuttingTimeline {
    /// A fresh session: one alive segment covering `[0, duration]`.
    pub fn new(duration: TimeMs) -> Self {
        Self {
            duration,
            segments: vec![Segment::new(TimeMs::ZERO, duration, false)],
        }
    }

    pub fn duration(&self) -> TimeMs {
        self.duration
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Index of the segment containing `t` under half-open containment,
    /// with `t == duration` belonging to the last segment. First match wins.
    pub fn active_segment_index(&self, t: TimeMs) -> usize {
        if t >= self.duration {
            return self.segments.len() - 1;
        }
        self.segments
            .iter()
            .position(|s| s.contains(t))
            .unwrap_or(self.segments.len() - 1)
    }

    /// Whether the segment under `t` is still alive (not marked deleted).
    pub fn is_alive_at(&self, t: TimeMs) -> bool {
        !self.segments[self.active_segment_index(t)].deleted
    }

    /// Split the segment containing `at` into two. The left half keeps the
    /// segment's id, the right half gets a fresh one; both inherit the
    /// `deleted` flag. A cut exactly on an existing boundary, or outside
    /// `(0, duration)`, changes nothing. Returns whether a split happened.
    pub fn cut(&mut self, at: TimeMs) -> bool {
        if at <= TimeMs::ZERO || at >= self.duration {
            return false;
        }
        if self.segments.iter().any(|s| s.start == at || s.end == at) {
            return false;
        }

        let index = self.active_segment_index(at);
        let segment = &mut self.segments[index];
        let right = Segment {
            id: Uuid::new_v4(),
            start: at,
            end: segment.end,
            deleted: segment.deleted,
        };
        segment.end = at;
        self.segments.insert(index + 1, right);
        true
    }

    /// Flip the `deleted` flag of the segment under `at`. Toggling twice
    /// restores the original state; the partition is never reshaped.
    pub fn toggle_deleted(&mut self, at: TimeMs) {
        let index = self.active_segment_index(at);
        self.segments[index].deleted = !self.segments[index].deleted;
    }

    /// Merge the segment under `at` with its left neighbor. No-op when it is
    /// the first segment. The surviving segment keeps the left side's id and
    /// `deleted` flag.
    pub fn merge_left(&mut self, at: TimeMs) -> bool {
        let index = self.active_segment_index(at);
        if index == 0 {
            return false;
        }
        self.merge_pair(index - 1);
        true
    }

    /// Merge the segment under `at` with its right neighbor. No-op when it is
    /// the last segment. As with [`merge_left`](Self::merge_left), the left
    /// side's id and `deleted` flag win.
    pub fn merge_right(&mut self, at: TimeMs) -> bool {
        let index = self.active_segment_index(at);
        if index + 1 >= self.segments.len() {
            return false;
        }
        self.merge_pair(index);
        true
    }

    /// Collapse every maximal run of adjacent segments sharing a `deleted`
    /// flag into one segment. No two neighbors share a flag afterwards.
    /// No-op on a partition of zero or one segment.
    pub fn merge_all(&mut self) {
        let mut i = 0;
        while i + 1 < self.segments.len() {
            if self.segments[i].deleted == self.segments[i + 1].deleted {
                self.merge_pair(i);
            } else {
                i += 1;
            }
        }
    }

    /// Move the shared edge between `segments[index]` and `segments[index+1]`.
    /// The proposed time is clamped so neither neighbor drops below
    /// [`MIN_SEGMENT_MS`]; the committed time is returned. An index without a
    /// right neighbor is a no-op.
    pub fn drag_segment_border(&mut self, index: usize, proposed: TimeMs) -> Option<TimeMs> {
        if index + 1 >= self.segments.len() {
            return None;
        }
        let lo = self.segments[index].start + TimeMs(MIN_SEGMENT_MS);
        let hi = self.segments[index + 1].end - TimeMs(MIN_SEGMENT_MS);
        let committed = if lo > hi {
            // Neighbors narrower than two guards; keep the edge centered.
            (self.segments[index].start + self.segments[index + 1].end) / 2.0
        } else {
            proposed.clamp(lo, hi)
        };
        self.segments[index].end = committed;
        self.segments[index + 1].start = committed;
        Some(committed)
    }

    /// Export the partition without session-local ids.
    pub fn to_spans(&self) -> Vec<SegmentSpan> {
        self.segments
            .iter()
            .map(|s| SegmentSpan {
                start: s.start,
                end: s.end,
                deleted: s.deleted,
            })
            .collect()
    }

    /// Rebuild a partition from persisted spans, minting fresh ids. The spans
    /// must already form a valid partition of `[0, duration]`.
    pub fn from_spans(duration: TimeMs, spans: &[SegmentSpan]) -> Result<Self> {
        let timeline = Self {
            duration,
            segments: spans
                .iter()
                .map(|s| Segment::new(s.start, s.end, s.deleted))
                .collect(),
        };
        if !timeline.is_well_formed() {
            return Err(CoreError::InvalidSnapshot(format!(
                "{} spans do not partition [0, {}]",
                spans.len(),
                duration
            )));
        }
        Ok(timeline)
    }

    /// Check contiguity, coverage and positive lengths.
    pub fn is_well_formed(&self) -> bool {
        let (Some(first), Some(last)) = (self.segments.first(), self.segments.last()) else {
            return false;
        };
        if first.start != TimeMs::ZERO || last.end != self.duration {
            return false;
        }
        for pair in self.segments.windows(2) {
            if pair[0].end != pair[1].start {
                return false;
            }
        }
        self.segments.iter().all(|s| s.end > s.start)
    }

    fn merge_pair(&mut self, left: usize) {
        let right = self.segments.remove(left + 1);
        self.segments[left].end = right.end;
    }
}
