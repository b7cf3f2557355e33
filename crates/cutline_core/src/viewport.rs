use crate::types::TimeMs;

/// Content may never render smaller than the viewport.
pub const MIN_ZOOM: f64 = 1.0;

/// Zoom increment used by the zoom in/out actions.
pub const ZOOM_STEP: f64 = 0.1;

// ---------------------------------------------------------------------------
// Coordinate mapping
// ---------------------------------------------------------------------------

/// Map a time to its horizontal pixel offset in a surface of `viewport_width`
/// pixels spanning `[0, duration]`. Every surface (main timeline, miniature
/// overview, subtitle timeline) uses this one mapping so segments and cues
/// stay pixel-aligned at any zoom.
pub fn time_to_pixel(time: TimeMs, viewport_width: f64, duration: TimeMs) -> f64 {
    if duration.0 <= 0.0 {
        return 0.0;
    }
    (time.0 / duration.0) * viewport_width
}

/// Inverse of [`time_to_pixel`]: map pointer input back to a time.
pub fn pixel_to_time(pixel: f64, viewport_width: f64, duration: TimeMs) -> TimeMs {
    if viewport_width <= 0.0 {
        return TimeMs::ZERO;
    }
    TimeMs((pixel / viewport_width) * duration.0)
}

// ---------------------------------------------------------------------------
// Viewport
// ---------------------------------------------------------------------------

/// The zoom multiplier and scroll offset shared by all timeline surfaces.
///
/// `scroll_fraction` is the position of the scrollbar within its scrollable
/// range, in `[0, 1]`; with it, surfaces of different pixel widths show the
/// same horizontal region. Zoom changes recenter the scroll on the playhead
/// instead of jumping to a fixed offset.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct Viewport {
    zoom: f64,
    scroll_fraction: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: MIN_ZOOM,
            scroll_fraction: 0.0,
        }
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn scroll_fraction(&self) -> f64 {
        self.scroll_fraction
    }

    /// Rendered content width as a percentage of the container.
    pub fn content_width_percent(&self) -> f64 {
        self.zoom * 100.0
    }

    pub fn content_width_px(&self, viewport_width: f64) -> f64 {
        self.zoom * viewport_width
    }

    /// Apply a new zoom multiplier and recenter on the playhead.
    /// Values below [`MIN_ZOOM`] are rejected and the previous zoom is kept.
    /// `playhead_fraction` is `currently_at / duration`. Returns whether the
    /// zoom changed.
    pub fn set_zoom(&mut self, multiplier: f64, playhead_fraction: f64) -> bool {
        if multiplier < MIN_ZOOM || !multiplier.is_finite() {
            return false;
        }
        self.zoom = multiplier;
        self.center_on(playhead_fraction);
        true
    }

    /// Clamp into `[0, 1]`. Called when either synchronized surface is
    /// scrolled by the user; the most recent value wins.
    pub fn set_scroll_fraction(&mut self, fraction: f64) {
        self.scroll_fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
    }

    /// Scroll so the given timeline fraction sits in the middle of the
    /// viewport (clamped at the edges where centering is impossible).
    pub fn center_on(&mut self, playhead_fraction: f64) {
        if self.zoom <= MIN_ZOOM {
            self.scroll_fraction = 0.0;
            return;
        }
        // Left edge of the viewport over the content, normalized over the
        // scrollable range (zoom - 1 viewport widths).
        let fraction = (playhead_fraction * self.zoom - 0.5) / (self.zoom - 1.0);
        self.set_scroll_fraction(fraction);
    }

    /// The time range currently visible in a surface spanning `duration`.
    pub fn visible_window(&self, duration: TimeMs) -> (TimeMs, TimeMs) {
        let visible = duration / self.zoom;
        let start = (duration - visible) * self.scroll_fraction;
        (start, start + visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // time <-> pixel
    // -----------------------------------------------------------------------

    #[test]
    fn time_to_pixel_is_linear() {
        let duration = TimeMs(10_000.0);
        assert_eq!(time_to_pixel(TimeMs(0.0), 800.0, duration), 0.0);
        assert_eq!(time_to_pixel(TimeMs(5_000.0), 800.0, duration), 400.0);
        assert_eq!(time_to_pixel(TimeMs(10_000.0), 800.0, duration), 800.0);
    }

    #[test]
    fn pixel_to_time_inverts_time_to_pixel() {
        let duration = TimeMs(10_000.0);
        for t in [0.0, 123.4, 5_000.0, 9_999.9] {
            let px = time_to_pixel(TimeMs(t), 800.0, duration);
            let back = pixel_to_time(px, 800.0, duration);
            assert!((back.0 - t).abs() < 1e-9);
        }
    }

    #[test]
    fn mapping_agrees_across_surface_widths() {
        // The same time lands at the same relative offset on every surface.
        let duration = TimeMs(10_000.0);
        let main = time_to_pixel(TimeMs(2_500.0), 1_600.0, duration) / 1_600.0;
        let mini = time_to_pixel(TimeMs(2_500.0), 320.0, duration) / 320.0;
        assert!((main - mini).abs() < 1e-12);
    }

    #[test]
    fn degenerate_inputs_map_to_zero() {
        assert_eq!(time_to_pixel(TimeMs(5.0), 800.0, TimeMs(0.0)), 0.0);
        assert_eq!(pixel_to_time(5.0, 0.0, TimeMs(10_000.0)), TimeMs::ZERO);
    }

    // -----------------------------------------------------------------------
    // zoom
    // -----------------------------------------------------------------------

    #[test]
    fn zoom_below_minimum_keeps_previous_value() {
        let mut vp = Viewport::new();
        assert!(vp.set_zoom(2.0, 0.0));
        assert!(!vp.set_zoom(0.9, 0.0));
        assert_eq!(vp.zoom(), 2.0);
        assert!(!vp.set_zoom(f64::NAN, 0.0));
        assert_eq!(vp.zoom(), 2.0);
    }

    #[test]
    fn content_width_follows_zoom() {
        let mut vp = Viewport::new();
        assert_eq!(vp.content_width_percent(), 100.0);
        vp.set_zoom(2.5, 0.0);
        assert_eq!(vp.content_width_percent(), 250.0);
        assert_eq!(vp.content_width_px(800.0), 2_000.0);
    }

    #[test]
    fn zoom_change_centers_on_playhead() {
        let mut vp = Viewport::new();
        vp.set_zoom(2.0, 0.5);
        assert!((vp.scroll_fraction() - 0.5).abs() < 1e-12);

        // Near the left edge centering clamps to 0.
        vp.set_zoom(2.0, 0.0);
        assert_eq!(vp.scroll_fraction(), 0.0);

        // Near the right edge it clamps to 1.
        vp.set_zoom(2.0, 1.0);
        assert_eq!(vp.scroll_fraction(), 1.0);
    }

    // -----------------------------------------------------------------------
    // scroll
    // -----------------------------------------------------------------------

    #[test]
    fn scroll_fraction_clamps() {
        let mut vp = Viewport::new();
        vp.set_scroll_fraction(1.5);
        assert_eq!(vp.scroll_fraction(), 1.0);
        vp.set_scroll_fraction(-0.25);
        assert_eq!(vp.scroll_fraction(), 0.0);
        vp.set_scroll_fraction(0.75);
        assert_eq!(vp.scroll_fraction(), 0.75);
    }

    #[test]
    fn visible_window_tracks_zoom_and_scroll() {
        let mut vp = Viewport::new();
        let duration = TimeMs(10_000.0);

        // Unzoomed: everything is visible.
        assert_eq!(vp.visible_window(duration), (TimeMs(0.0), duration));

        vp.set_zoom(2.0, 0.5);
        let (start, end) = vp.visible_window(duration);
        assert!((start.0 - 2_500.0).abs() < 1e-9);
        assert!((end.0 - 7_500.0).abs() < 1e-9);
        // The playhead (5_000) sits centered in the window.
        assert!(((start.0 + end.0) / 2.0 - 5_000.0).abs() < 1e-9);
    }
}
