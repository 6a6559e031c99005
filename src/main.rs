//! Climbing Wall Route Overlay
//!
//! Headless demo entry point. Walks the calibration protocol and the
//! overlay adjustments with a simulated gravity sensor, logging the render
//! transform the compositor would consume. The platform app wires the same
//! controller to the camera preview, gesture recognizers, and the device
//! accelerometer.

use std::time::Duration;

use glam::Vec2;

use wall_overlay::app::OverlayController;
use wall_overlay::config::AppConfig;
use wall_overlay::orientation::{ChannelGravitySensor, GravitySample};
use wall_overlay::ui::UiState;

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!("Wall overlay starting...");

    let config = AppConfig::default();
    let mut controller = OverlayController::new(&config);
    controller.subscribe(|snapshot| {
        log::debug!(
            "state: {} ({} points, {:.1} px/m)",
            snapshot.calibration,
            snapshot.points.len(),
            snapshot.pixels_per_meter
        );
    });

    // Two reference taps one meter apart on the wall, then the distance
    controller.handle_tap(Vec2::new(390.0, 1460.0));
    controller.handle_tap(Vec2::new(690.0, 1060.0));
    log::info!("{}", UiState::from_snapshot(&controller.snapshot()).instruction);
    controller.submit_distance(1.0);

    controller.advance_to_overlay();

    // Simulated accelerometer: device held with a slight counterclockwise roll
    let sensor = ChannelGravitySensor::new();
    let samples = sensor.sender();
    let feeder = std::thread::spawn(move || {
        for _ in 0..100 {
            let _ = samples.send(GravitySample::new(0.85, -9.77));
            std::thread::sleep(Duration::from_millis(5));
        }
    });

    controller.set_auto_level(true);
    controller.start_leveling(&sensor);

    // Position and tilt the overlay the way a user would
    controller.set_horizontal_tilt(8.0);
    controller.drag_by(Vec2::new(-40.0, 120.0));
    controller.commit_drag();

    for _ in 0..5 {
        std::thread::sleep(Duration::from_millis(100));
        let t = controller.render_transform();
        log::info!(
            "overlay {:.0}x{:.0} px at ({:.0}, {:.0}), roll {:.2} deg, yaw {:.1} deg",
            t.width,
            t.height,
            t.translation.x,
            t.translation.y,
            t.roll,
            t.yaw
        );
    }

    let _ = feeder.join();
    controller.stop_leveling();
    log::info!("Wall overlay exiting");
}
