//! Roll-correction smoothing.
//!
//! Turns the noisy raw gravity stream into a stable correction angle for
//! auto-leveling the overlay. Samples arrive on a background delivery thread;
//! the smoothed output is published through a shared slot readable from the
//! UI thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError};
use parking_lot::Mutex;

use super::sensor::{GravitySample, GravitySensor};

/// First-order smoothing factor applied per sample.
const SMOOTHING_ALPHA: f32 = 0.15;

/// Exponential smoothing filter over the roll angle.
///
/// Stateful but thread-free; the smoother runs one of these on its ingestion
/// thread. Starts from zero, so the first samples after a (re)start lag true
/// orientation during the settling transient.
pub struct RollFilter {
    smoothed_roll: f32,
}

impl RollFilter {
    pub fn new() -> Self {
        Self { smoothed_roll: 0.0 }
    }

    /// Feed one sample and return the updated correction angle in degrees.
    ///
    /// Roll is `atan2(gx, -gy)`; the correction counter-rotates, hence the
    /// sign flip on output.
    pub fn update(&mut self, sample: GravitySample) -> f32 {
        let raw_roll = sample.x.atan2(-sample.y);
        self.smoothed_roll += (raw_roll - self.smoothed_roll) * SMOOTHING_ALPHA;
        self.correction_degrees()
    }

    /// Current correction angle in degrees.
    pub fn correction_degrees(&self) -> f32 {
        (-self.smoothed_roll).to_degrees()
    }
}

impl Default for RollFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// Owns the sample ingestion thread and the published correction angle.
pub struct OrientationSmoother {
    /// Latest correction angle in degrees, written by the ingestion thread.
    output_deg: Arc<Mutex<f32>>,
    /// Whether the ingestion thread should keep running.
    running: Arc<AtomicBool>,
    /// Ingestion thread handle.
    thread_handle: Option<std::thread::JoinHandle<()>>,
}

impl OrientationSmoother {
    pub fn new() -> Self {
        Self {
            output_deg: Arc::new(Mutex::new(0.0)),
            running: Arc::new(AtomicBool::new(false)),
            thread_handle: None,
        }
    }

    /// Latest roll correction in degrees. 0 until samples arrive.
    pub fn roll_correction_degrees(&self) -> f32 {
        *self.output_deg.lock()
    }

    pub fn is_running(&self) -> bool {
        self.thread_handle.is_some()
    }

    /// Begin ingesting samples from the sensor.
    ///
    /// Idempotent: a second call while running is a no-op. A sensor without
    /// the capability (subscribe returns `None`) is also a no-op; the
    /// published output simply never updates.
    pub fn start(&mut self, sensor: &dyn GravitySensor) {
        if self.thread_handle.is_some() {
            log::debug!("Orientation smoother already running");
            return;
        }

        let samples = match sensor.subscribe() {
            Some(rx) => rx,
            None => {
                log::warn!("Gravity sensor unavailable, auto-level will have no effect");
                return;
            }
        };

        self.running.store(true, Ordering::Release);
        let running = self.running.clone();
        let output = self.output_deg.clone();

        match std::thread::Builder::new()
            .name("orientation-smoother".to_string())
            .spawn(move || Self::ingest_loop(samples, running, output))
        {
            Ok(handle) => self.thread_handle = Some(handle),
            Err(e) => {
                log::error!("Failed to spawn smoother thread: {}", e);
                self.running.store(false, Ordering::Release);
            }
        }
    }

    /// Ingestion thread body.
    fn ingest_loop(
        samples: Receiver<GravitySample>,
        running: Arc<AtomicBool>,
        output: Arc<Mutex<f32>>,
    ) {
        log::info!("Orientation smoothing started");
        let mut filter = RollFilter::new();

        while running.load(Ordering::Acquire) {
            // Bounded wait so a stop request is noticed even with a quiet sensor
            match samples.recv_timeout(Duration::from_millis(50)) {
                Ok(sample) => {
                    let correction = filter.update(sample);
                    *output.lock() = correction;
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    log::info!("Gravity sample source closed");
                    break;
                }
            }
        }

        log::info!("Orientation smoothing stopped");
    }

    /// Halt ingestion and reset the published output to 0.
    ///
    /// Safe to call repeatedly and without a prior `start`. The filter state
    /// does not survive a stop; the next start begins from zero.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
        *self.output_deg.lock() = 0.0;
    }
}

impl Default for OrientationSmoother {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for OrientationSmoother {
    fn drop(&mut self) {
        self.stop();
    }
}
