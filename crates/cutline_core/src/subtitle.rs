use crate::error::{CoreError, Result};
use crate::types::{Flavor, SubtitleCue, TimeMs, TrackSnapshot};
use tracing::warn;

/// Default length of a newly created cue, matching the editor's
/// "add subtitle" action.
pub const DEFAULT_CUE_LENGTH_MS: f64 = 5_000.0;

/// One flavor's ordered cue list.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct SubtitleTrack {
    pub flavor: Flavor,
    pub cues: Vec<SubtitleCue>,
}

/// All subtitle tracks of a session, keyed by flavor, plus the single
/// globally selected flavor that decides which track is shown and edited.
///
/// Tracks are independent of the cutting partition: no cutting operation
/// ever creates, destroys, or moves a cue. Per track, cues ascend by
/// `start_ms` and do not overlap; cues are addressed by index and a mutation
/// never re-sorts the list. Keeping replacement values inside the bounds of
/// the neighboring cues is the caller's job (the drag handler pre-clamps).
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct SubtitleTracks {
    tracks: Vec<SubtitleTrack>,
    selected_flavor: Option<Flavor>,
}

impl SubtitleTracks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tracks(&self) -> &[SubtitleTrack] {
        &self.tracks
    }

    pub fn track(&self, flavor: &Flavor) -> Option<&SubtitleTrack> {
        self.tracks.iter().find(|t| &t.flavor == flavor)
    }

    /// The track currently shown across the subtitle surfaces, if any.
    pub fn selected_track(&self) -> Option<&SubtitleTrack> {
        self.selected_flavor.as_ref().and_then(|f| self.track(f))
    }

    pub fn selected_flavor(&self) -> Option<&Flavor> {
        self.selected_flavor.as_ref()
    }

    /// Switch the shown track. Selection never mutates any track; selecting a
    /// flavor with no track yet is allowed (the user may add cues to it next).
    pub fn select_flavor(&mut self, flavor: Option<Flavor>) {
        self.selected_flavor = flavor;
    }

    /// Replace or create the cue list for a flavor. Imported cues are assumed
    /// pre-validated; they are stored verbatim.
    pub fn set_track(&mut self, flavor: Flavor, cues: Vec<SubtitleCue>) {
        match self.tracks.iter_mut().find(|t| t.flavor == flavor) {
            Some(track) => track.cues = cues,
            None => self.tracks.push(SubtitleTrack { flavor, cues }),
        }
    }

    /// Replace the cue at `index` in place. The track is never reordered; a
    /// replacement that breaks the ascending/non-overlap contract is logged
    /// and applied as given, since repair would move cues the user did not
    /// touch.
    pub fn set_cue_at_index(
        &mut self,
        flavor: &Flavor,
        index: usize,
        new_cue: SubtitleCue,
    ) -> Result<()> {
        let track = self
            .tracks
            .iter_mut()
            .find(|t| &t.flavor == flavor)
            .ok_or_else(|| CoreError::FlavorNotFound(flavor.clone()))?;
        let len = track.cues.len();
        if index >= len {
            return Err(CoreError::CueIndexOutOfBounds {
                flavor: flavor.clone(),
                index,
                len,
            });
        }

        let prev_end = index
            .checked_sub(1)
            .map(|i| track.cues[i].end_ms)
            .unwrap_or(TimeMs::ZERO);
        let next_start = track.cues.get(index + 1).map(|c| c.start_ms);
        if new_cue.start_ms < prev_end || next_start.is_some_and(|s| new_cue.end_ms > s) {
            warn!(
                flavor = %flavor,
                index,
                start = new_cue.start_ms.0,
                end = new_cue.end_ms.0,
                "cue replacement violates track ordering; caller should pre-clamp"
            );
        }

        track.cues[index] = new_cue;
        Ok(())
    }

    /// Insert a new cue at `index` (clamped to the list length) with the
    /// default length, both times clamped to `[0, duration]`.
    pub fn add_cue_at_index(
        &mut self,
        flavor: &Flavor,
        index: usize,
        start: TimeMs,
        duration: TimeMs,
    ) -> Result<&SubtitleCue> {
        let track = self
            .tracks
            .iter_mut()
            .find(|t| &t.flavor == flavor)
            .ok_or_else(|| CoreError::FlavorNotFound(flavor.clone()))?;

        let start = start.clamp(TimeMs::ZERO, duration);
        let end = (start + TimeMs(DEFAULT_CUE_LENGTH_MS)).clamp(start, duration);
        let index = index.min(track.cues.len());
        track.cues.insert(index, SubtitleCue::new(start, end, ""));
        Ok(&track.cues[index])
    }

    /// Remove the cue at `index`, returning it.
    pub fn remove_cue_at_index(&mut self, flavor: &Flavor, index: usize) -> Result<SubtitleCue> {
        let track = self
            .tracks
            .iter_mut()
            .find(|t| &t.flavor == flavor)
            .ok_or_else(|| CoreError::FlavorNotFound(flavor.clone()))?;
        let len = track.cues.len();
        if index >= len {
            return Err(CoreError::CueIndexOutOfBounds {
                flavor: flavor.clone(),
                index,
                len,
            });
        }
        Ok(track.cues.remove(index))
    }

    /// Export all tracks for the persistence snapshot.
    pub fn to_snapshots(&self) -> Vec<TrackSnapshot> {
        self.tracks
            .iter()
            .map(|t| TrackSnapshot {
                flavor: t.flavor.clone(),
                cues: t.cues.clone(),
            })
            .collect()
    }

    /// Rebuild tracks from a snapshot; the selection resets.
    pub fn from_snapshots(snapshots: &[TrackSnapshot]) -> Self {
        Self {
            tracks: snapshots
                .iter()
                .map(|s| SubtitleTrack {
                    flavor: s.flavor.clone(),
                    cues: s.cues.clone(),
                })
                .collect(),
            selected_flavor: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn en() -> Flavor {
        Flavor::new("captions", "en")
    }

    fn de() -> Flavor {
        Flavor::new("captions", "de")
    }

    fn tracks_with_three_cues() -> SubtitleTracks {
        let mut tracks = SubtitleTracks::new();
        tracks.set_track(
            en(),
            vec![
                SubtitleCue::new(TimeMs(0.0), TimeMs(1_000.0), "one"),
                SubtitleCue::new(TimeMs(2_000.0), TimeMs(3_000.0), "two"),
                SubtitleCue::new(TimeMs(4_000.0), TimeMs(5_000.0), "three"),
            ],
        );
        tracks
    }

    // -----------------------------------------------------------------------
    // set_track / selection
    // -----------------------------------------------------------------------

    #[test]
    fn set_track_creates_then_replaces() {
        let mut tracks = SubtitleTracks::new();
        tracks.set_track(en(), vec![]);
        assert_eq!(tracks.tracks().len(), 1);

        tracks.set_track(
            en(),
            vec![SubtitleCue::new(TimeMs(0.0), TimeMs(500.0), "replaced")],
        );
        assert_eq!(tracks.tracks().len(), 1);
        assert_eq!(tracks.track(&en()).unwrap().cues[0].text, "replaced");
    }

    #[test]
    fn selection_switches_without_mutating_tracks() {
        let mut tracks = tracks_with_three_cues();
        tracks.set_track(de(), vec![SubtitleCue::new(TimeMs(0.0), TimeMs(1.0), "d")]);

        let en_before = tracks.track(&en()).unwrap().clone();
        tracks.select_flavor(Some(de()));
        assert_eq!(tracks.selected_track().unwrap().flavor, de());
        tracks.select_flavor(Some(en()));
        assert_eq!(tracks.track(&en()).unwrap(), &en_before);
    }

    #[test]
    fn selecting_unknown_flavor_yields_no_track() {
        let mut tracks = tracks_with_three_cues();
        tracks.select_flavor(Some(de()));
        assert!(tracks.selected_track().is_none());
        assert_eq!(tracks.selected_flavor(), Some(&de()));
    }

    // -----------------------------------------------------------------------
    // set_cue_at_index
    // -----------------------------------------------------------------------

    #[test]
    fn set_cue_replaces_in_place_without_reordering() {
        let mut tracks = tracks_with_three_cues();
        let moved = SubtitleCue::new(TimeMs(2_200.0), TimeMs(3_200.0), "two moved");
        tracks.set_cue_at_index(&en(), 1, moved.clone()).unwrap();

        let cues = &tracks.track(&en()).unwrap().cues;
        assert_eq!(cues.len(), 3);
        assert_eq!(cues[1], moved);
        assert_eq!(cues[0].text, "one");
        assert_eq!(cues[2].text, "three");
    }

    #[test]
    fn set_cue_preserves_bounds_with_preclamped_value() {
        let mut tracks = tracks_with_three_cues();
        // A caller-pre-clamped value inside (1_000, 4_000).
        let cue = SubtitleCue::new(TimeMs(1_000.0), TimeMs(4_000.0), "snug");
        tracks.set_cue_at_index(&en(), 1, cue).unwrap();

        let replaced = &tracks.track(&en()).unwrap().cues[1];
        assert!(replaced.end_ms > replaced.start_ms);
    }

    #[test]
    fn set_cue_unknown_flavor_fails() {
        let mut tracks = tracks_with_three_cues();
        let result =
            tracks.set_cue_at_index(&de(), 0, SubtitleCue::new(TimeMs(0.0), TimeMs(1.0), ""));
        assert!(matches!(result.unwrap_err(), CoreError::FlavorNotFound(_)));
    }

    #[test]
    fn set_cue_out_of_bounds_fails() {
        let mut tracks = tracks_with_three_cues();
        let result =
            tracks.set_cue_at_index(&en(), 3, SubtitleCue::new(TimeMs(0.0), TimeMs(1.0), ""));
        assert!(matches!(
            result.unwrap_err(),
            CoreError::CueIndexOutOfBounds { index: 3, len: 3, .. }
        ));
    }

    // -----------------------------------------------------------------------
    // add / remove
    // -----------------------------------------------------------------------

    #[test]
    fn add_cue_uses_default_length_and_clamps_to_duration() {
        let mut tracks = tracks_with_three_cues();
        let duration = TimeMs(10_000.0);

        let cue = tracks
            .add_cue_at_index(&en(), 3, TimeMs(8_000.0), duration)
            .unwrap();
        // 8_000 + 5_000 default clamps to the track edge.
        assert_eq!(cue.start_ms, TimeMs(8_000.0));
        assert_eq!(cue.end_ms, TimeMs(10_000.0));
        assert_eq!(tracks.track(&en()).unwrap().cues.len(), 4);
    }

    #[test]
    fn add_cue_clamps_start_into_range() {
        let mut tracks = SubtitleTracks::new();
        tracks.set_track(en(), vec![]);
        let cue = tracks
            .add_cue_at_index(&en(), 0, TimeMs(-300.0), TimeMs(10_000.0))
            .unwrap();
        assert_eq!(cue.start_ms, TimeMs(0.0));
        assert_eq!(cue.end_ms, TimeMs(DEFAULT_CUE_LENGTH_MS));
    }

    #[test]
    fn remove_cue_returns_it() {
        let mut tracks = tracks_with_three_cues();
        let removed = tracks.remove_cue_at_index(&en(), 1).unwrap();
        assert_eq!(removed.text, "two");
        assert_eq!(tracks.track(&en()).unwrap().cues.len(), 2);

        let result = tracks.remove_cue_at_index(&en(), 5);
        assert!(result.is_err());
    }

    // -----------------------------------------------------------------------
    // snapshot roundtrip
    // -----------------------------------------------------------------------

    #[test]
    fn snapshot_roundtrip_reproduces_cue_set() {
        let mut tracks = tracks_with_three_cues();
        tracks.set_track(de(), vec![SubtitleCue::new(TimeMs(10.0), TimeMs(20.0), "d")]);
        tracks.select_flavor(Some(en()));

        let snapshots = tracks.to_snapshots();
        let restored = SubtitleTracks::from_snapshots(&snapshots);
        assert_eq!(restored.tracks(), tracks.tracks());
        assert!(restored.selected_flavor().is_none());
    }
}
