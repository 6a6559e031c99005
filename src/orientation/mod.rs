//! Orientation sensing for overlay auto-leveling.
//!
//! Smooths the raw gravity-vector stream into a stable roll-correction angle.

mod sensor;
mod smoother;

pub use sensor::{ChannelGravitySensor, GravitySample, GravitySensor, UnavailableGravitySensor};
pub use smoother::{OrientationSmoother, RollFilter};
