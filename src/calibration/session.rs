//! Calibration session state machine and scale derivation.

use std::time::Instant;

use glam::Vec2;

use super::units::DistanceUnit;

/// A tapped reference point on the camera preview.
#[derive(Debug, Clone, Copy)]
pub struct CalibrationPoint {
    /// Screen-space position in pixels.
    pub position: Vec2,
    /// When the point was tapped.
    pub created_at: Instant,
}

impl CalibrationPoint {
    fn new(position: Vec2) -> Self {
        Self {
            position,
            created_at: Instant::now(),
        }
    }
}

/// State of the two-tap calibration protocol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CalibrationState {
    /// Waiting for the first reference tap.
    WaitingForFirstPoint,
    /// First point recorded, waiting for the second tap.
    WaitingForSecondPoint { first: Vec2 },
    /// Both points recorded, waiting for the known distance.
    WaitingForDistance { first: Vec2, second: Vec2 },
    /// Scale computed. Points remain editable.
    Complete,
}

impl CalibrationState {
    pub fn is_complete(&self) -> bool {
        matches!(self, CalibrationState::Complete)
    }

    /// True while taps are still being collected.
    pub fn accepts_taps(&self) -> bool {
        matches!(
            self,
            CalibrationState::WaitingForFirstPoint
                | CalibrationState::WaitingForSecondPoint { .. }
        )
    }
}

impl std::fmt::Display for CalibrationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalibrationState::WaitingForFirstPoint => write!(f, "Waiting for first point"),
            CalibrationState::WaitingForSecondPoint { .. } => {
                write!(f, "Waiting for second point")
            }
            CalibrationState::WaitingForDistance { .. } => write!(f, "Waiting for distance"),
            CalibrationState::Complete => write!(f, "Complete"),
        }
    }
}

/// Drives the two-tap calibration protocol and keeps the derived
/// pixels-per-meter scale consistent while points are adjusted.
pub struct CalibrationSession {
    /// Current protocol state.
    state: CalibrationState,
    /// First tapped point.
    first_point: Option<CalibrationPoint>,
    /// Second tapped point.
    second_point: Option<CalibrationPoint>,
    /// User-entered reference distance in meters.
    known_distance_m: f32,
    /// Unit the distance input is displayed in.
    unit: DistanceUnit,
    /// Derived scale. 0 means uncalibrated.
    pixels_per_meter: f32,
}

impl CalibrationSession {
    pub fn new(unit: DistanceUnit) -> Self {
        Self {
            state: CalibrationState::WaitingForFirstPoint,
            first_point: None,
            second_point: None,
            known_distance_m: 1.0,
            unit,
            pixels_per_meter: 0.0,
        }
    }

    pub fn state(&self) -> CalibrationState {
        self.state
    }

    /// Derived scale in pixels per meter. 0 until calibrated.
    pub fn pixels_per_meter(&self) -> f32 {
        self.pixels_per_meter
    }

    pub fn known_distance_m(&self) -> f32 {
        self.known_distance_m
    }

    pub fn unit(&self) -> DistanceUnit {
        self.unit
    }

    /// Change the display unit. Does not touch the stored distance or scale.
    pub fn set_unit(&mut self, unit: DistanceUnit) {
        self.unit = unit;
    }

    /// True once the protocol finished with a usable scale.
    ///
    /// A degenerate known distance leaves the state complete but the scale
    /// zero, negative, or infinite; none of those count as calibrated.
    pub fn is_calibrated(&self) -> bool {
        self.state.is_complete()
            && self.pixels_per_meter > 0.0
            && self.pixels_per_meter.is_finite()
    }

    /// Currently-known point positions, first point before second.
    pub fn point_positions(&self) -> Vec<Vec2> {
        self.first_point
            .iter()
            .chain(self.second_point.iter())
            .map(|p| p.position)
            .collect()
    }

    /// Fraction of the protocol completed, for UI display.
    pub fn progress(&self) -> f32 {
        match self.state {
            CalibrationState::WaitingForFirstPoint => 0.0,
            CalibrationState::WaitingForSecondPoint { .. } => 1.0 / 3.0,
            CalibrationState::WaitingForDistance { .. } => 2.0 / 3.0,
            CalibrationState::Complete => 1.0,
        }
    }

    /// Record a reference tap.
    ///
    /// Only valid while waiting for points; taps in any other state are
    /// ignored so a stray gesture cannot corrupt a finished calibration.
    pub fn record_tap(&mut self, position: Vec2) {
        match self.state {
            CalibrationState::WaitingForFirstPoint => {
                self.first_point = Some(CalibrationPoint::new(position));
                self.state = CalibrationState::WaitingForSecondPoint { first: position };
                log::info!("First calibration point at ({:.1}, {:.1})", position.x, position.y);
            }
            CalibrationState::WaitingForSecondPoint { first } => {
                self.second_point = Some(CalibrationPoint::new(position));
                self.state = CalibrationState::WaitingForDistance {
                    first,
                    second: position,
                };
                log::info!("Second calibration point at ({:.1}, {:.1})", position.x, position.y);
            }
            _ => {
                log::debug!("Ignoring tap in state '{}'", self.state);
            }
        }
    }

    /// Set the known real-world distance between the two points and derive
    /// the scale.
    ///
    /// The caller is responsible for passing a positive, finite value; this
    /// layer does not re-validate. A no-op until both points exist.
    pub fn set_known_distance(&mut self, meters: f32) {
        let (first, second) = match (&self.first_point, &self.second_point) {
            (Some(a), Some(b)) => (a.position, b.position),
            _ => {
                log::debug!("Ignoring distance input before both points are set");
                return;
            }
        };

        self.known_distance_m = meters;
        let pixel_distance = first.distance(second);
        self.pixels_per_meter = pixel_distance / meters;
        self.state = CalibrationState::Complete;
        log::info!(
            "Calibration complete: {:.1} px over {:.3} m = {:.1} px/m",
            pixel_distance,
            meters,
            self.pixels_per_meter
        );
    }

    /// Move a calibration point after completion (drag-to-adjust).
    ///
    /// Only valid in the complete state; `index` is 0 or 1. The scale is
    /// recomputed from the stored distance, unless that distance is
    /// non-positive, in which case the previous scale is retained.
    pub fn update_point(&mut self, index: usize, position: Vec2) {
        if !self.state.is_complete() {
            log::debug!("Ignoring point update in state '{}'", self.state);
            return;
        }

        let slot = match index {
            0 => &mut self.first_point,
            1 => &mut self.second_point,
            _ => return,
        };
        let point = match slot {
            Some(p) => p,
            None => return,
        };
        point.position = position;

        if self.known_distance_m > 0.0 {
            if let (Some(a), Some(b)) = (&self.first_point, &self.second_point) {
                let pixel_distance = a.position.distance(b.position);
                self.pixels_per_meter = pixel_distance / self.known_distance_m;
            }
        }
    }

    /// Discard points and scale and restart the protocol.
    pub fn reset(&mut self) {
        self.first_point = None;
        self.second_point = None;
        self.pixels_per_meter = 0.0;
        self.state = CalibrationState::WaitingForFirstPoint;
        log::info!("Calibration reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> CalibrationSession {
        CalibrationSession::new(DistanceUnit::Meters)
    }

    #[test]
    fn test_tap_sequence() {
        let mut s = session();
        assert_eq!(s.state(), CalibrationState::WaitingForFirstPoint);
        assert!(s.point_positions().is_empty());

        s.record_tap(Vec2::new(10.0, 20.0));
        assert_eq!(
            s.state(),
            CalibrationState::WaitingForSecondPoint {
                first: Vec2::new(10.0, 20.0)
            }
        );
        assert_eq!(s.point_positions(), vec![Vec2::new(10.0, 20.0)]);

        s.record_tap(Vec2::new(30.0, 40.0));
        assert_eq!(
            s.state(),
            CalibrationState::WaitingForDistance {
                first: Vec2::new(10.0, 20.0),
                second: Vec2::new(30.0, 40.0)
            }
        );
        assert_eq!(s.point_positions().len(), 2);

        // Third tap is ignored
        s.record_tap(Vec2::new(99.0, 99.0));
        assert_eq!(s.point_positions().len(), 2);
        assert_eq!(s.point_positions()[1], Vec2::new(30.0, 40.0));
    }

    #[test]
    fn test_scale_derivation() {
        let mut s = session();
        s.record_tap(Vec2::new(0.0, 0.0));
        s.record_tap(Vec2::new(300.0, 400.0));
        s.set_known_distance(1.0);

        // 3-4-5 triangle: pixel distance is exactly 500
        assert_eq!(s.pixels_per_meter(), 500.0);
        assert_eq!(s.state(), CalibrationState::Complete);
        assert!(s.is_calibrated());
    }

    #[test]
    fn test_distance_before_points_is_ignored() {
        let mut s = session();
        s.set_known_distance(2.0);
        assert_eq!(s.state(), CalibrationState::WaitingForFirstPoint);
        assert_eq!(s.pixels_per_meter(), 0.0);

        s.record_tap(Vec2::new(0.0, 0.0));
        s.set_known_distance(2.0);
        assert!(!s.state().is_complete());
        assert_eq!(s.pixels_per_meter(), 0.0);
    }

    #[test]
    fn test_degenerate_distance_is_not_calibrated() {
        let mut s = session();
        s.record_tap(Vec2::new(0.0, 0.0));
        s.record_tap(Vec2::new(100.0, 0.0));
        s.set_known_distance(0.0);

        // Division by zero produces an infinite scale; state is Complete but
        // the session must not report itself calibrated.
        assert_eq!(s.state(), CalibrationState::Complete);
        assert!(!s.is_calibrated());
    }

    #[test]
    fn test_update_point_recomputes_scale() {
        let mut s = session();
        s.record_tap(Vec2::new(0.0, 0.0));
        s.record_tap(Vec2::new(300.0, 400.0));

        // Not complete yet: update is a no-op
        s.update_point(0, Vec2::new(0.0, 300.0));
        assert_eq!(s.point_positions()[0], Vec2::new(0.0, 0.0));

        s.set_known_distance(1.0);
        s.update_point(0, Vec2::new(0.0, 300.0));
        assert_eq!(s.point_positions()[0], Vec2::new(0.0, 300.0));

        // New distance: sqrt(300^2 + 100^2)
        let expected = (300.0f32 * 300.0 + 100.0 * 100.0).sqrt();
        assert!((s.pixels_per_meter() - expected).abs() < 0.01);
    }

    #[test]
    fn test_update_point_keeps_stale_scale_for_bad_distance() {
        let mut s = session();
        s.record_tap(Vec2::new(0.0, 0.0));
        s.record_tap(Vec2::new(100.0, 0.0));
        s.set_known_distance(0.0);

        let stale = s.pixels_per_meter();
        s.update_point(1, Vec2::new(200.0, 0.0));
        assert_eq!(s.point_positions()[1], Vec2::new(200.0, 0.0));
        assert_eq!(s.pixels_per_meter(), stale);
    }

    #[test]
    fn test_reset_from_any_state() {
        let mut s = session();
        s.record_tap(Vec2::new(0.0, 0.0));
        s.record_tap(Vec2::new(300.0, 400.0));
        s.set_known_distance(1.0);
        assert!(s.is_calibrated());

        s.reset();
        assert_eq!(s.state(), CalibrationState::WaitingForFirstPoint);
        assert!(s.point_positions().is_empty());
        assert_eq!(s.pixels_per_meter(), 0.0);
        assert!(!s.is_calibrated());
    }

    #[test]
    fn test_progress() {
        let mut s = session();
        assert_eq!(s.progress(), 0.0);
        s.record_tap(Vec2::ZERO);
        assert!(s.progress() > 0.0 && s.progress() < 1.0);
        s.record_tap(Vec2::ONE);
        assert!(s.progress() > 0.34 && s.progress() < 1.0);
        s.set_known_distance(1.0);
        assert_eq!(s.progress(), 1.0);
    }
}
