use crate::types::TimeMs;

/// Bounds for the keyboard jump step, in milliseconds.
pub const MIN_JUMP_MS: f64 = 1.0;
pub const MAX_JUMP_MS: f64 = 1_000_000.0;
const DEFAULT_JUMP_MS: f64 = 1_000.0;

/// The current playback position and playing state.
///
/// The playhead never owns a clock: time advances only through
/// [`advance`](Self::advance) callbacks from the playback collaborator, and
/// every input is clamped into `[0, duration]` rather than rejected. The
/// active segment is derived from `currently_at` by the cutting model on
/// every query, so it can never go stale when the partition changes.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct Playhead {
    duration: TimeMs,
    currently_at: TimeMs,
    is_playing: bool,
    click_triggered: bool,
    jump_step: TimeMs,
}

impl Playhead {
    pub fn new(duration: TimeMs) -> Self {
        Self {
            duration,
            currently_at: TimeMs::ZERO,
            is_playing: false,
            click_triggered: false,
            jump_step: TimeMs(DEFAULT_JUMP_MS),
        }
    }

    pub fn currently_at(&self) -> TimeMs {
        self.currently_at
    }

    pub fn duration(&self) -> TimeMs {
        self.duration
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_at_end(&self) -> bool {
        self.currently_at >= self.duration
    }

    /// Jump to `t`, silently clamped into `[0, duration]`.
    pub fn seek(&mut self, t: TimeMs) {
        self.currently_at = t.clamp(TimeMs::ZERO, self.duration);
    }

    /// A seek caused by clicking a timeline surface. The click marker lets
    /// the playback surface distinguish pointer seeks from time updates; it
    /// is consumed with [`take_click_triggered`](Self::take_click_triggered).
    pub fn seek_from_click(&mut self, t: TimeMs) {
        self.click_triggered = true;
        self.seek(t);
    }

    pub fn take_click_triggered(&mut self) -> bool {
        std::mem::take(&mut self.click_triggered)
    }

    /// Playback-clock callback. Clamps at `duration`, which is terminal:
    /// the playing flag drops and the collaborator is expected to stop
    /// calling.
    pub fn advance(&mut self, delta: TimeMs) {
        self.currently_at = (self.currently_at + delta).clamp(TimeMs::ZERO, self.duration);
        if self.is_at_end() {
            self.is_playing = false;
        }
    }

    pub fn on_playing_changed(&mut self, playing: bool) {
        self.is_playing = playing;
    }

    /// Keyboard navigation: one jump step back.
    pub fn jump_left(&mut self) {
        self.seek(self.currently_at - self.jump_step);
    }

    /// Keyboard navigation: one jump step forward.
    pub fn jump_right(&mut self) {
        self.seek(self.currently_at + self.jump_step);
    }

    pub fn jump_step(&self) -> TimeMs {
        self.jump_step
    }

    /// Scale the jump step up by ten, capped at [`MAX_JUMP_MS`].
    pub fn increase_jump_step(&mut self) {
        self.jump_step = (self.jump_step * 10.0).min(TimeMs(MAX_JUMP_MS));
    }

    /// Scale the jump step down by ten, floored at [`MIN_JUMP_MS`].
    pub fn decrease_jump_step(&mut self) {
        self.jump_step = (self.jump_step / 10.0).max(TimeMs(MIN_JUMP_MS));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playhead() -> Playhead {
        Playhead::new(TimeMs(10_000.0))
    }

    #[test]
    fn seek_clamps_into_range() {
        let mut ph = playhead();
        ph.seek(TimeMs(-200.0));
        assert_eq!(ph.currently_at(), TimeMs(0.0));
        ph.seek(TimeMs(12_000.0));
        assert_eq!(ph.currently_at(), TimeMs(10_000.0));
        ph.seek(TimeMs(4_321.0));
        assert_eq!(ph.currently_at(), TimeMs(4_321.0));
    }

    #[test]
    fn advance_clamps_and_ends_playback() {
        let mut ph = playhead();
        ph.on_playing_changed(true);
        ph.seek(TimeMs(9_500.0));

        ph.advance(TimeMs(300.0));
        assert_eq!(ph.currently_at(), TimeMs(9_800.0));
        assert!(ph.is_playing());
        assert!(!ph.is_at_end());

        ph.advance(TimeMs(600.0));
        assert_eq!(ph.currently_at(), TimeMs(10_000.0));
        assert!(ph.is_at_end());
        assert!(!ph.is_playing());
    }

    #[test]
    fn click_marker_is_consumed_once() {
        let mut ph = playhead();
        ph.seek_from_click(TimeMs(2_000.0));
        assert_eq!(ph.currently_at(), TimeMs(2_000.0));
        assert!(ph.take_click_triggered());
        assert!(!ph.take_click_triggered());
    }

    #[test]
    fn jumps_use_step_and_clamp() {
        let mut ph = playhead();
        ph.jump_left();
        assert_eq!(ph.currently_at(), TimeMs(0.0));
        ph.jump_right();
        assert_eq!(ph.currently_at(), TimeMs(1_000.0));
    }

    #[test]
    fn jump_step_scales_by_ten_within_bounds() {
        let mut ph = playhead();
        ph.increase_jump_step();
        assert_eq!(ph.jump_step(), TimeMs(10_000.0));
        ph.increase_jump_step();
        ph.increase_jump_step();
        ph.increase_jump_step();
        assert_eq!(ph.jump_step(), TimeMs(MAX_JUMP_MS));

        for _ in 0..10 {
            ph.decrease_jump_step();
        }
        assert_eq!(ph.jump_step(), TimeMs(MIN_JUMP_MS));
    }
}
