//! Three-phase drag gestures over the timeline surfaces.
//!
//! Every drag follows the same transaction shape: `begin` captures starting
//! state (and pauses playback where the gesture needs a still timeline),
//! `preview` turns pointer positions into visual-only feedback without
//! touching the canonical model, and `finish` commits exactly one clamped
//! transition computed from wherever the pointer ended up. There is no revert
//! path: an abandoned pointer still produces a deterministic, valid commit.

use crate::error::Result;
use crate::session::{EditAction, EditorSession};
use crate::types::{Flavor, SubtitleCue, TimeMs};
use crate::viewport::pixel_to_time;
use tracing::debug;

// ---------------------------------------------------------------------------
// Scrubber
// ---------------------------------------------------------------------------

/// Dragging the playhead handle.
#[derive(Debug)]
pub struct ScrubDrag {
    was_playing: bool,
}

impl ScrubDrag {
    /// Grab the scrubber; playback halts for the duration of the drag.
    pub fn begin(session: &mut EditorSession) -> Self {
        let was_playing = session.playhead.is_playing();
        if was_playing {
            session.playhead.on_playing_changed(false);
        }
        debug!(was_playing, "scrub drag begin");
        Self { was_playing }
    }

    /// Where the scrubber would land; purely visual.
    pub fn preview(&self, session: &EditorSession, pixel: f64, viewport_width: f64) -> TimeMs {
        let duration = session.cutting.duration();
        pixel_to_time(pixel, viewport_width, duration).clamp(TimeMs::ZERO, duration)
    }

    /// Commit the final position and resume playback if the grab paused it.
    pub fn finish(self, session: &mut EditorSession, pixel: f64, viewport_width: f64) -> Result<()> {
        let time = pixel_to_time(pixel, viewport_width, session.cutting.duration());
        session.dispatch(EditAction::Seek { time })?;
        if self.was_playing {
            session.dispatch(EditAction::PlayingChanged { playing: true })?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Segment border
// ---------------------------------------------------------------------------

/// Dragging the shared edge between `segments[index]` and `segments[index+1]`.
#[derive(Debug)]
pub struct BorderDrag {
    index: usize,
}

impl BorderDrag {
    pub fn begin(index: usize) -> Self {
        debug!(index, "border drag begin");
        Self { index }
    }

    /// The time under the pointer; the drag line is drawn here while the
    /// partition itself stays untouched.
    pub fn preview(&self, session: &EditorSession, pixel: f64, viewport_width: f64) -> TimeMs {
        pixel_to_time(pixel, viewport_width, session.cutting.duration())
    }

    /// Commit the edge move. Clamping against both neighbors happens inside
    /// the cutting model; the committed time is whatever it settled on.
    pub fn finish(self, session: &mut EditorSession, pixel: f64, viewport_width: f64) -> Result<()> {
        let time = pixel_to_time(pixel, viewport_width, session.cutting.duration());
        session.dispatch(EditAction::DragBorder { index: self.index, time })
    }
}

// ---------------------------------------------------------------------------
// Subtitle cue
// ---------------------------------------------------------------------------

/// Dragging a cue along its track. The cue keeps its length; the final
/// position is clamped between the neighboring cues (or the track edges)
/// before it reaches the model, which itself never reorders.
#[derive(Debug)]
pub struct CueDrag {
    flavor: Flavor,
    index: usize,
}

impl CueDrag {
    pub fn begin(flavor: Flavor, index: usize) -> Self {
        debug!(flavor = %flavor, index, "cue drag begin");
        Self { flavor, index }
    }

    pub fn preview(&self, session: &EditorSession, pixel: f64, viewport_width: f64) -> TimeMs {
        pixel_to_time(pixel, viewport_width, session.cutting.duration())
    }

    /// Commit the cue at its final pointer position, pre-clamped into
    /// `(previous cue's end, next cue's start)` or the track edges. When the
    /// cue is longer than the gap it sits in, the start edge wins the clamp.
    pub fn finish(self, session: &mut EditorSession, pixel: f64, viewport_width: f64) -> Result<()> {
        let duration = session.cutting.duration();
        let proposed = pixel_to_time(pixel, viewport_width, duration);

        let track = session
            .subtitles
            .track(&self.flavor)
            .ok_or_else(|| crate::error::CoreError::FlavorNotFound(self.flavor.clone()))?;
        let cue = track.cues.get(self.index).ok_or_else(|| {
            crate::error::CoreError::CueIndexOutOfBounds {
                flavor: self.flavor.clone(),
                index: self.index,
                len: track.cues.len(),
            }
        })?;

        let length = cue.length();
        let lower = self
            .index
            .checked_sub(1)
            .map(|i| track.cues[i].end_ms)
            .unwrap_or(TimeMs::ZERO);
        let upper = track
            .cues
            .get(self.index + 1)
            .map(|c| c.start_ms)
            .unwrap_or(duration);

        let start = proposed.clamp(lower, (upper - length).max(lower));
        let committed = SubtitleCue {
            id: cue.id,
            start_ms: start,
            end_ms: start + length,
            text: cue.text.clone(),
            tree: cue.tree.clone(),
        };

        session.dispatch(EditAction::SetCue {
            flavor: self.flavor,
            index: self.index,
            cue: committed,
        })
    }
}
