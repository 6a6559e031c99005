//! Process-wide controller owning calibration, overlay, and leveling state.
//!
//! All mutation goes through the controller's methods; collaborators read
//! cloned snapshots or register a push callback. One controller exists for
//! the lifetime of the app session.

use glam::Vec2;

use crate::calibration::{CalibrationSession, CalibrationState, DistanceUnit};
use crate::config::AppConfig;
use crate::orientation::{GravitySensor, OrientationSmoother};
use crate::overlay::{OverlayState, OverlayTransform};

/// Which screen is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenMode {
    /// Two-tap calibration flow.
    Calibration,
    /// Route overlay over the live feed.
    Overlay,
}

/// Read-only view of the controller state, pushed to subscribers after
/// every mutating operation.
#[derive(Debug, Clone)]
pub struct ControllerSnapshot {
    pub mode: ScreenMode,
    pub calibration: CalibrationState,
    /// Known calibration point positions, first point before second.
    pub points: Vec<Vec2>,
    pub pixels_per_meter: f32,
    pub is_calibrated: bool,
    pub unit: DistanceUnit,
    pub progress: f32,
    pub transform: OverlayTransform,
}

type Subscriber = Box<dyn Fn(&ControllerSnapshot) + Send>;

/// Owns the calibration session, overlay state, and orientation smoother.
pub struct OverlayController {
    session: CalibrationSession,
    overlay: OverlayState,
    smoother: OrientationSmoother,
    mode: ScreenMode,
    subscribers: Vec<Subscriber>,
}

impl OverlayController {
    pub fn new(config: &AppConfig) -> Self {
        let mut overlay = OverlayState::new(Vec2::new(config.screen_width, config.screen_height));
        overlay.set_auto_level(config.auto_level);

        Self {
            session: CalibrationSession::new(config.default_unit()),
            overlay,
            smoother: OrientationSmoother::new(),
            mode: ScreenMode::Calibration,
            subscribers: Vec::new(),
        }
    }

    pub fn mode(&self) -> ScreenMode {
        self.mode
    }

    pub fn session(&self) -> &CalibrationSession {
        &self.session
    }

    pub fn overlay(&self) -> &OverlayState {
        &self.overlay
    }

    /// Register a callback invoked with a fresh snapshot after every
    /// mutating operation.
    pub fn subscribe(&mut self, subscriber: impl Fn(&ControllerSnapshot) + Send + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Current state as a cloneable read-only view.
    pub fn snapshot(&self) -> ControllerSnapshot {
        ControllerSnapshot {
            mode: self.mode,
            calibration: self.session.state(),
            points: self.session.point_positions(),
            pixels_per_meter: self.session.pixels_per_meter(),
            is_calibrated: self.session.is_calibrated(),
            unit: self.session.unit(),
            progress: self.session.progress(),
            transform: self.render_transform(),
        }
    }

    fn notify(&self) {
        if self.subscribers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for subscriber in &self.subscribers {
            subscriber(&snapshot);
        }
    }

    /// The transform the rendering collaborator consumes each frame.
    pub fn render_transform(&self) -> OverlayTransform {
        self.overlay.transform(
            self.session.pixels_per_meter(),
            self.smoother.roll_correction_degrees(),
        )
    }

    // --- Calibration flow ---

    pub fn handle_tap(&mut self, position: Vec2) {
        self.session.record_tap(position);
        self.notify();
    }

    /// Submit the user-entered distance, in the session's current unit.
    ///
    /// The input surface parses and validates the value (positive, finite)
    /// before calling this; conversion to meters happens here.
    pub fn submit_distance(&mut self, value: f32) {
        let meters = self.session.unit().to_meters(value);
        self.session.set_known_distance(meters);
        self.notify();
    }

    pub fn set_unit(&mut self, unit: DistanceUnit) {
        self.session.set_unit(unit);
        self.notify();
    }

    /// Drag-to-adjust a calibration point after completion.
    pub fn update_point(&mut self, index: usize, position: Vec2) {
        self.session.update_point(index, position);
        self.notify();
    }

    pub fn reset_calibration(&mut self) {
        self.session.reset();
        self.notify();
    }

    // --- Mode switching ---

    /// Proceed to the overlay screen. A no-op until calibration completes.
    pub fn advance_to_overlay(&mut self) {
        if !self.session.state().is_complete() {
            log::debug!("Ignoring overlay-mode request before calibration");
            return;
        }
        self.mode = ScreenMode::Overlay;
        log::info!("Switched to overlay mode");
        self.notify();
    }

    /// Go back to the calibration screen. Calibration state is preserved.
    pub fn return_to_calibration(&mut self) {
        self.mode = ScreenMode::Calibration;
        log::info!("Switched to calibration mode");
        self.notify();
    }

    // --- Overlay adjustments ---

    pub fn set_horizontal_tilt(&mut self, degrees: f32) {
        self.overlay.set_horizontal_tilt(degrees);
        self.notify();
    }

    pub fn set_vertical_tilt(&mut self, degrees: f32) {
        self.overlay.set_vertical_tilt(degrees);
        self.notify();
    }

    pub fn reset_tilt(&mut self) {
        self.overlay.reset_tilt();
        self.notify();
    }

    pub fn set_auto_level(&mut self, enabled: bool) {
        self.overlay.set_auto_level(enabled);
        self.notify();
    }

    pub fn set_screen_size(&mut self, size: Vec2) {
        self.overlay.set_screen_size(size);
        self.notify();
    }

    pub fn drag_by(&mut self, delta: Vec2) {
        self.overlay.drag_by(delta);
        self.notify();
    }

    pub fn commit_drag(&mut self) {
        self.overlay.commit_drag(self.session.pixels_per_meter());
        self.notify();
    }

    pub fn reset_offset(&mut self) {
        self.overlay.reset_offset();
        self.notify();
    }

    // --- Leveling ---

    /// Start sensor-assisted leveling. Silent no-op without the capability.
    pub fn start_leveling(&mut self, sensor: &dyn GravitySensor) {
        self.smoother.start(sensor);
    }

    /// Stop leveling and reset the roll correction to 0.
    pub fn stop_leveling(&mut self) {
        self.smoother.stop();
        self.notify();
    }
}
