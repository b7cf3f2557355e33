use crate::cutting::CuttingTimeline;
use crate::error::Result;
use crate::playhead::Playhead;
use crate::subtitle::SubtitleTracks;
use crate::types::{Flavor, Snapshot, SubtitleCue, TimeMs};
use crate::viewport::{Viewport, ZOOM_STEP};
use std::path::Path;
use tracing::debug;

/// One atomic state transition of the editor.
///
/// Every user interaction is dispatched as one of these variants; transitions
/// apply in submission order, each runs to completion, and none partially
/// applies. Cutting actions operate on the segment under the playhead, the
/// way the cut/delete/merge buttons do.
#[derive(Debug, Clone, PartialEq)]
pub enum EditAction {
    Cut,
    ToggleDeleted,
    MergeLeft,
    MergeRight,
    MergeAll,
    DragBorder { index: usize, time: TimeMs },
    Seek { time: TimeMs },
    ClickSeek { time: TimeMs },
    Advance { delta: TimeMs },
    PlayingChanged { playing: bool },
    JumpLeft,
    JumpRight,
    IncreaseJumpStep,
    DecreaseJumpStep,
    ZoomIn,
    ZoomOut,
    SetZoom { multiplier: f64 },
    SetScroll { fraction: f64 },
    SelectFlavor { flavor: Option<Flavor> },
    SetTrack { flavor: Flavor, cues: Vec<SubtitleCue> },
    SetCue { flavor: Flavor, index: usize, cue: SubtitleCue },
    AddCue { flavor: Flavor, index: usize, start: TimeMs },
    RemoveCue { flavor: Flavor, index: usize },
}

/// The composed editing state of one media session: segment partition,
/// subtitle tracks, playhead, and the shared viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorSession {
    pub cutting: CuttingTimeline,
    pub subtitles: SubtitleTracks,
    pub playhead: Playhead,
    pub viewport: Viewport,
}

impl EditorSession {
    pub fn new(duration: TimeMs) -> Self {
        Self {
            cutting: CuttingTimeline::new(duration),
            subtitles: SubtitleTracks::new(),
            playhead: Playhead::new(duration),
            viewport: Viewport::new(),
        }
    }

    /// Index of the segment under the playhead, recomputed on every call so
    /// it stays consistent with the partition even right after an edit.
    pub fn active_segment_index(&self) -> usize {
        self.cutting.active_segment_index(self.playhead.currently_at())
    }

    /// Whether the delete/restore action would currently delete.
    pub fn is_current_segment_alive(&self) -> bool {
        self.cutting.is_alive_at(self.playhead.currently_at())
    }

    /// Apply one transition. Failures only arise from subtitle actions that
    /// violate the caller contract (unknown flavor, bad index); everything
    /// else clamps or no-ops.
    pub fn dispatch(&mut self, action: EditAction) -> Result<()> {
        debug!(?action, "dispatch");
        let at = self.playhead.currently_at();
        match action {
            EditAction::Cut => {
                self.cutting.cut(at);
            }
            EditAction::ToggleDeleted => self.cutting.toggle_deleted(at),
            EditAction::MergeLeft => {
                self.cutting.merge_left(at);
            }
            EditAction::MergeRight => {
                self.cutting.merge_right(at);
            }
            EditAction::MergeAll => self.cutting.merge_all(),
            EditAction::DragBorder { index, time } => {
                self.cutting.drag_segment_border(index, time);
            }
            EditAction::Seek { time } => self.playhead.seek(time),
            EditAction::ClickSeek { time } => self.playhead.seek_from_click(time),
            EditAction::Advance { delta } => self.playhead.advance(delta),
            EditAction::PlayingChanged { playing } => self.playhead.on_playing_changed(playing),
            EditAction::JumpLeft => self.playhead.jump_left(),
            EditAction::JumpRight => self.playhead.jump_right(),
            EditAction::IncreaseJumpStep => self.playhead.increase_jump_step(),
            EditAction::DecreaseJumpStep => self.playhead.decrease_jump_step(),
            EditAction::ZoomIn => {
                let zoom = self.viewport.zoom() + ZOOM_STEP;
                let fraction = self.playhead_fraction();
                self.viewport.set_zoom(zoom, fraction);
            }
            EditAction::ZoomOut => {
                let zoom = self.viewport.zoom() - ZOOM_STEP;
                let fraction = self.playhead_fraction();
                self.viewport.set_zoom(zoom, fraction);
            }
            EditAction::SetZoom { multiplier } => {
                let fraction = self.playhead_fraction();
                self.viewport.set_zoom(multiplier, fraction);
            }
            EditAction::SetScroll { fraction } => self.viewport.set_scroll_fraction(fraction),
            EditAction::SelectFlavor { flavor } => self.subtitles.select_flavor(flavor),
            EditAction::SetTrack { flavor, cues } => self.subtitles.set_track(flavor, cues),
            EditAction::SetCue { flavor, index, cue } => {
                self.subtitles.set_cue_at_index(&flavor, index, cue)?;
            }
            EditAction::AddCue { flavor, index, start } => {
                self.subtitles
                    .add_cue_at_index(&flavor, index, start, self.cutting.duration())?;
            }
            EditAction::RemoveCue { flavor, index } => {
                self.subtitles.remove_cue_at_index(&flavor, index)?;
            }
        }
        Ok(())
    }

    fn playhead_fraction(&self) -> f64 {
        let duration = self.cutting.duration();
        if duration.0 > 0.0 {
            self.playhead.currently_at().0 / duration.0
        } else {
            0.0
        }
    }

    /// Build the serializable edit state submitted on an explicit save.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            duration: self.cutting.duration(),
            segments: self.cutting.to_spans(),
            subtitles: self.subtitles.to_snapshots(),
        }
    }

    /// Rebuild a session from a snapshot. The playhead and viewport restart
    /// at their initial state; only edits are persisted.
    pub fn restore(snapshot: &Snapshot) -> Result<Self> {
        Ok(Self {
            cutting: CuttingTimeline::from_spans(snapshot.duration, &snapshot.segments)?,
            subtitles: SubtitleTracks::from_snapshots(&snapshot.subtitles),
            playhead: Playhead::new(snapshot.duration),
            viewport: Viewport::new(),
        })
    }

    /// Write the snapshot as pretty-printed JSON.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.snapshot())?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }

    /// Load a snapshot file and rebuild the session from it.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let snapshot: Snapshot = serde_json::from_str(&data)?;
        Self::restore(&snapshot)
    }
}
