//! Calibration module for the two-tap scale protocol.
//!
//! Two taps on the camera preview plus a known real-world distance between
//! them yield a pixels-per-meter scale for the overlay.

mod session;
mod units;

pub use session::{CalibrationPoint, CalibrationSession, CalibrationState};
pub use units::DistanceUnit;
