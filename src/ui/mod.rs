//! UI state for the calibration and overlay screens.

use crate::app::{ControllerSnapshot, ScreenMode};
use crate::calibration::CalibrationState;

/// Per-frame UI state derived from a controller snapshot.
pub struct UiState {
    /// Instructional text for the current step.
    pub instruction: &'static str,
    /// Show the distance entry field and unit picker.
    pub show_distance_input: bool,
    /// Enable the proceed-to-overlay button.
    pub show_continue: bool,
    /// Show tilt sliders and the auto-level toggle.
    pub show_tilt_controls: bool,
    /// Calibration progress, 0.0 to 1.0.
    pub progress: f32,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            instruction: instruction_for(ScreenMode::Calibration, CalibrationState::WaitingForFirstPoint),
            show_distance_input: false,
            show_continue: false,
            show_tilt_controls: false,
            progress: 0.0,
        }
    }
}

impl UiState {
    pub fn from_snapshot(snapshot: &ControllerSnapshot) -> Self {
        Self {
            instruction: instruction_for(snapshot.mode, snapshot.calibration),
            show_distance_input: matches!(
                snapshot.calibration,
                CalibrationState::WaitingForDistance { .. } | CalibrationState::Complete
            ),
            show_continue: snapshot.is_calibrated,
            show_tilt_controls: snapshot.mode == ScreenMode::Overlay,
            progress: snapshot.progress,
        }
    }
}

/// Instructional text for the current screen and calibration step.
fn instruction_for(mode: ScreenMode, state: CalibrationState) -> &'static str {
    if mode == ScreenMode::Overlay {
        return "Drag to position the overlay, use the sliders to match the wall tilt";
    }
    match state {
        CalibrationState::WaitingForFirstPoint => "Tap the first reference point on the wall",
        CalibrationState::WaitingForSecondPoint { .. } => "Tap the second reference point",
        CalibrationState::WaitingForDistance { .. } => {
            "Enter the real distance between the two points"
        }
        CalibrationState::Complete => "Calibration complete, drag the markers to fine-tune",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::OverlayController;
    use crate::config::AppConfig;
    use glam::Vec2;

    #[test]
    fn test_ui_follows_calibration_steps() {
        let mut c = OverlayController::new(&AppConfig::default());

        let ui = UiState::from_snapshot(&c.snapshot());
        assert!(ui.instruction.contains("first"));
        assert!(!ui.show_distance_input);
        assert!(!ui.show_continue);

        c.handle_tap(Vec2::new(0.0, 0.0));
        let ui = UiState::from_snapshot(&c.snapshot());
        assert!(ui.instruction.contains("second"));

        c.handle_tap(Vec2::new(300.0, 400.0));
        let ui = UiState::from_snapshot(&c.snapshot());
        assert!(ui.show_distance_input);
        assert!(!ui.show_continue);

        c.submit_distance(1.0);
        let ui = UiState::from_snapshot(&c.snapshot());
        assert!(ui.show_continue);
        assert_eq!(ui.progress, 1.0);

        c.advance_to_overlay();
        let ui = UiState::from_snapshot(&c.snapshot());
        assert!(ui.show_tilt_controls);
    }
}
