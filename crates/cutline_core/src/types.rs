use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// TimeMs
// ---------------------------------------------------------------------------

/// A point or span on the media time axis, in milliseconds.
///
/// Fractional because every pointer interaction produces times via
/// `pixel / width * duration`, which is almost never a whole millisecond.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, PartialOrd, Default)]
pub struct TimeMs(pub f64);

impl TimeMs {
    pub const ZERO: Self = Self(0.0);

    pub fn from_seconds(s: f64) -> Self {
        Self(s * 1_000.0)
    }

    pub fn as_seconds(&self) -> f64 {
        self.0 / 1_000.0
    }

    /// Clamp into `[lo, hi]`.
    pub fn clamp(self, lo: TimeMs, hi: TimeMs) -> Self {
        Self(self.0.clamp(lo.0, hi.0))
    }

    pub fn min(self, other: TimeMs) -> Self {
        Self(self.0.min(other.0))
    }

    pub fn max(self, other: TimeMs) -> Self {
        Self(self.0.max(other.0))
    }
}

impl Add for TimeMs {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for TimeMs {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Mul<f64> for TimeMs {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self(self.0 * rhs)
    }
}

impl Div<f64> for TimeMs {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        Self(self.0 / rhs)
    }
}

impl fmt::Display for TimeMs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_ms = self.0.abs().round() as u64;
        let ms = total_ms % 1_000;
        let total_secs = total_ms / 1_000;
        let secs = total_secs % 60;
        let total_mins = total_secs / 60;
        let mins = total_mins % 60;
        let hours = total_mins / 60;
        if self.0 < 0.0 {
            write!(f, "-{:02}:{:02}:{:02}.{:03}", hours, mins, secs, ms)
        } else {
            write!(f, "{:02}:{:02}:{:02}.{:03}", hours, mins, secs, ms)
        }
    }
}

// ---------------------------------------------------------------------------
// Segment
// ---------------------------------------------------------------------------

/// A contiguous range of the media, marked alive or deleted by editing.
///
/// The segments of a [`crate::cutting::CuttingTimeline`] always partition
/// `[0, duration]`: ascending, gap-free, and strictly positive in length.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Segment {
    pub id: Uuid,
    pub start: TimeMs,
    pub end: TimeMs,
    pub deleted: bool,
}

impl Segment {
    pub fn new(start: TimeMs, end: TimeMs, deleted: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            deleted,
        }
    }

    pub fn length(&self) -> TimeMs {
        self.end - self.start
    }

    /// Half-open containment: `start <= t < end`.
    pub fn contains(&self, t: TimeMs) -> bool {
        self.start <= t && t < self.end
    }
}

// ---------------------------------------------------------------------------
// Flavor
// ---------------------------------------------------------------------------

/// Identifies a subtitle track by language/purpose, e.g. `captions/en`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Flavor {
    #[serde(rename = "type")]
    pub kind: String,
    pub subtype: String,
}

impl Flavor {
    pub fn new(kind: impl Into<String>, subtype: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            subtype: subtype.into(),
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.subtype)
    }
}

// ---------------------------------------------------------------------------
// SubtitleCue
// ---------------------------------------------------------------------------

/// A timed subtitle text unit. The `tree` field carries the parsed markup of
/// the cue body and is opaque to the engine; it travels with the cue through
/// every edit untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubtitleCue {
    pub id: Uuid,
    pub start_ms: TimeMs,
    pub end_ms: TimeMs,
    pub text: String,
    pub tree: serde_json::Value,
}

impl SubtitleCue {
    pub fn new(start_ms: TimeMs, end_ms: TimeMs, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            id: Uuid::new_v4(),
            start_ms,
            end_ms,
            tree: serde_json::Value::String(text.clone()),
            text,
        }
    }

    pub fn length(&self) -> TimeMs {
        self.end_ms - self.start_ms
    }
}

// ---------------------------------------------------------------------------
// RequestStatus
// ---------------------------------------------------------------------------

/// Lifecycle of a collaborator request (save submission, waveform fetch).
/// Failures are carried as values next to this status, never thrown.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Failed,
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// A segment as it appears in a persisted snapshot. Ids are session-local and
/// deliberately not serialized; restoring mints fresh ones.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SegmentSpan {
    pub start: TimeMs,
    pub end: TimeMs,
    pub deleted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackSnapshot {
    pub flavor: Flavor,
    pub cues: Vec<SubtitleCue>,
}

/// The serializable edit state handed to the persistence collaborator on an
/// explicit save, and read back when a session is restored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    pub duration: TimeMs,
    pub segments: Vec<SegmentSpan>,
    pub subtitles: Vec<TrackSnapshot>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
