//! Gravity sensor interface.

use crossbeam_channel::{unbounded, Receiver, Sender};

/// One raw gravity-vector reading in the screen plane.
///
/// `x` points right along the screen, `y` down; a device held perfectly
/// upright reads approximately (0, -9.81).
#[derive(Debug, Clone, Copy)]
pub struct GravitySample {
    pub x: f32,
    pub y: f32,
}

impl GravitySample {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Source of gravity samples.
///
/// The platform layer implements this over the device accelerometer.
/// `subscribe` returns `None` when the capability is absent, which the
/// smoother treats as a silent no-op.
pub trait GravitySensor {
    fn subscribe(&self) -> Option<Receiver<GravitySample>>;
}

/// Channel-backed sensor used by tests and the demo binary.
///
/// Samples pushed through [`ChannelGravitySensor::sender`] are delivered to
/// whoever subscribed.
pub struct ChannelGravitySensor {
    tx: Sender<GravitySample>,
    rx: Receiver<GravitySample>,
}

impl ChannelGravitySensor {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    /// Handle for the delivery side.
    pub fn sender(&self) -> Sender<GravitySample> {
        self.tx.clone()
    }
}

impl Default for ChannelGravitySensor {
    fn default() -> Self {
        Self::new()
    }
}

impl GravitySensor for ChannelGravitySensor {
    fn subscribe(&self) -> Option<Receiver<GravitySample>> {
        Some(self.rx.clone())
    }
}

/// Sensor stand-in for devices without an accelerometer.
pub struct UnavailableGravitySensor;

impl GravitySensor for UnavailableGravitySensor {
    fn subscribe(&self) -> Option<Receiver<GravitySample>> {
        None
    }
}
