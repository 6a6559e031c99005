//! Overlay transform model.
//!
//! Combines the calibration scale, manual tilts, drag offsets, and the
//! smoothed roll correction into the single transform the compositor
//! consumes every frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Logical overlay artwork width in meters (8 ft training board).
pub const WALL_WIDTH_M: f32 = 2.44;
/// Logical overlay artwork height in meters (12 ft training board).
pub const WALL_HEIGHT_M: f32 = 3.66;

/// Tilt slider range in degrees, either side of level.
pub const TILT_LIMIT_DEG: f32 = 45.0;

/// Fraction of the smaller of screen and overlay extent that must remain
/// visible after a drag commits.
const MIN_VISIBLE_FRACTION: f32 = 1.0 / 3.0;

/// Render transform for the overlay artwork.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayTransform {
    /// Rendered width in pixels.
    pub width: f32,
    /// Rendered height in pixels.
    pub height: f32,
    /// Offset from the screen center in pixels.
    pub translation: Vec2,
    /// Rotation about the viewing axis in degrees.
    pub roll: f32,
    /// Rotation around the vertical axis in degrees.
    pub yaw: f32,
    /// Rotation around the horizontal axis in degrees.
    pub pitch: f32,
}

/// Position, tilt, and leveling state for the overlay.
pub struct OverlayState {
    /// Manual rotation around the vertical axis, degrees.
    horizontal_tilt: f32,
    /// Manual rotation around the horizontal axis, degrees.
    vertical_tilt: f32,
    /// Drive roll from the orientation smoother instead of fixing it at 0.
    auto_level: bool,
    /// Viewport size in pixels, for offset clamping.
    screen: Vec2,
    /// Committed planar offset.
    base_offset: Vec2,
    /// In-progress drag delta, folded into the base on commit.
    drag_delta: Vec2,
}

impl OverlayState {
    pub fn new(screen: Vec2) -> Self {
        Self {
            horizontal_tilt: 0.0,
            vertical_tilt: 0.0,
            auto_level: false,
            screen,
            base_offset: Vec2::ZERO,
            drag_delta: Vec2::ZERO,
        }
    }

    pub fn horizontal_tilt(&self) -> f32 {
        self.horizontal_tilt
    }

    pub fn vertical_tilt(&self) -> f32 {
        self.vertical_tilt
    }

    pub fn auto_level(&self) -> bool {
        self.auto_level
    }

    pub fn set_auto_level(&mut self, enabled: bool) {
        self.auto_level = enabled;
    }

    pub fn set_screen_size(&mut self, screen: Vec2) {
        self.screen = screen;
    }

    /// Set the horizontal tilt, clamped to the slider range.
    pub fn set_horizontal_tilt(&mut self, degrees: f32) {
        self.horizontal_tilt = degrees.clamp(-TILT_LIMIT_DEG, TILT_LIMIT_DEG);
    }

    /// Set the vertical tilt, clamped to the slider range.
    pub fn set_vertical_tilt(&mut self, degrees: f32) {
        self.vertical_tilt = degrees.clamp(-TILT_LIMIT_DEG, TILT_LIMIT_DEG);
    }

    /// Return both tilts to level.
    pub fn reset_tilt(&mut self) {
        self.horizontal_tilt = 0.0;
        self.vertical_tilt = 0.0;
    }

    /// Accumulate an in-progress drag delta.
    pub fn drag_by(&mut self, delta: Vec2) {
        self.drag_delta += delta;
    }

    /// Fold the active drag into the committed offset and clamp it so part
    /// of the overlay stays on screen.
    pub fn commit_drag(&mut self, pixels_per_meter: f32) {
        let proposed = self.base_offset + self.drag_delta;
        let rendered = Vec2::new(WALL_WIDTH_M, WALL_HEIGHT_M) * pixels_per_meter;
        self.base_offset = Vec2::new(
            clamp_axis(proposed.x, self.screen.x, rendered.x),
            clamp_axis(proposed.y, self.screen.y, rendered.y),
        );
        self.drag_delta = Vec2::ZERO;
    }

    /// Re-center the overlay.
    pub fn reset_offset(&mut self) {
        self.base_offset = Vec2::ZERO;
        self.drag_delta = Vec2::ZERO;
    }

    /// Derive the render transform.
    ///
    /// Pure with respect to the inputs; the roll correction is used only
    /// while auto-level is on.
    pub fn transform(&self, pixels_per_meter: f32, roll_correction_deg: f32) -> OverlayTransform {
        OverlayTransform {
            width: WALL_WIDTH_M * pixels_per_meter,
            height: WALL_HEIGHT_M * pixels_per_meter,
            translation: self.base_offset + self.drag_delta,
            roll: if self.auto_level {
                roll_correction_deg
            } else {
                0.0
            },
            yaw: self.horizontal_tilt,
            pitch: self.vertical_tilt,
        }
    }
}

/// Clamp a center offset on one axis so at least the minimum visible extent
/// of the overlay overlaps the screen.
fn clamp_axis(offset: f32, screen: f32, rendered: f32) -> f32 {
    let min_visible = screen.min(rendered) * MIN_VISIBLE_FRACTION;
    let limit = (screen + rendered) * 0.5 - min_visible;
    offset.clamp(-limit, limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rendered_size_scales_with_calibration() {
        let state = OverlayState::new(Vec2::new(1080.0, 1920.0));
        let t = state.transform(500.0, 0.0);
        assert_eq!(t.width, WALL_WIDTH_M * 500.0);
        assert_eq!(t.height, WALL_HEIGHT_M * 500.0);

        let uncalibrated = state.transform(0.0, 0.0);
        assert_eq!(uncalibrated.width, 0.0);
        assert_eq!(uncalibrated.height, 0.0);
    }

    #[test]
    fn test_tilt_clamping() {
        let mut state = OverlayState::new(Vec2::new(1080.0, 1920.0));
        state.set_horizontal_tilt(60.0);
        assert_eq!(state.horizontal_tilt(), 45.0);
        state.set_vertical_tilt(-90.0);
        assert_eq!(state.vertical_tilt(), -45.0);
        state.set_horizontal_tilt(-12.5);
        assert_eq!(state.horizontal_tilt(), -12.5);

        state.reset_tilt();
        assert_eq!(state.horizontal_tilt(), 0.0);
        assert_eq!(state.vertical_tilt(), 0.0);
    }

    #[test]
    fn test_auto_level_gates_roll() {
        let mut state = OverlayState::new(Vec2::new(1080.0, 1920.0));
        assert_eq!(state.transform(100.0, 12.0).roll, 0.0);

        state.set_auto_level(true);
        assert_eq!(state.transform(100.0, 12.0).roll, 12.0);

        state.set_auto_level(false);
        assert_eq!(state.transform(100.0, 12.0).roll, 0.0);
    }

    #[test]
    fn test_drag_combines_base_and_delta() {
        let mut state = OverlayState::new(Vec2::new(1000.0, 2000.0));
        state.drag_by(Vec2::new(30.0, -10.0));
        state.drag_by(Vec2::new(10.0, 0.0));
        assert_eq!(state.transform(100.0, 0.0).translation, Vec2::new(40.0, -10.0));

        state.commit_drag(100.0);
        // Delta folded into the base; a new drag starts clean
        assert_eq!(state.transform(100.0, 0.0).translation, Vec2::new(40.0, -10.0));
        state.drag_by(Vec2::new(5.0, 5.0));
        assert_eq!(state.transform(100.0, 0.0).translation, Vec2::new(45.0, -5.0));
    }

    #[test]
    fn test_commit_clamps_runaway_drag() {
        // Rendered overlay is 400x600 px at this scale
        let ppm = 400.0 / WALL_WIDTH_M;
        let mut state = OverlayState::new(Vec2::new(1000.0, 2000.0));

        state.drag_by(Vec2::new(5000.0, -9000.0));
        state.commit_drag(ppm);

        // X: (1000 + 400) / 2 - 400 / 3
        let limit_x = 700.0 - 400.0 / 3.0;
        // Y: (2000 + 600) / 2 - 600 / 3
        let limit_y = 1300.0 - 200.0;
        let committed = state.transform(ppm, 0.0).translation;
        assert!((committed.x - limit_x).abs() < 0.1);
        assert!((committed.y + limit_y).abs() < 0.1);
    }

    #[test]
    fn test_commit_leaves_small_offsets_alone() {
        let ppm = 400.0 / WALL_WIDTH_M;
        let mut state = OverlayState::new(Vec2::new(1000.0, 2000.0));
        state.drag_by(Vec2::new(120.0, 80.0));
        state.commit_drag(ppm);
        assert_eq!(state.transform(ppm, 0.0).translation, Vec2::new(120.0, 80.0));
    }

    #[test]
    fn test_reset_offset() {
        let mut state = OverlayState::new(Vec2::new(1000.0, 2000.0));
        state.drag_by(Vec2::new(120.0, 80.0));
        state.commit_drag(100.0);
        state.reset_offset();
        assert_eq!(state.transform(100.0, 0.0).translation, Vec2::ZERO);
    }
}
