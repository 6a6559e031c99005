//! Climbing Wall Route Overlay
//!
//! Core logic for an app that overlays route artwork on a live camera view
//! of a climbing wall:
//! - Two-tap scale calibration (known distance -> pixels per meter)
//! - Gravity-sensor smoothing for auto-leveling
//! - Overlay render transform (position, tilt, scale)
//!
//! Camera capture, compositing, and gesture plumbing are platform
//! collaborators and live outside this crate.

pub mod app;
pub mod calibration;
pub mod config;
pub mod orientation;
pub mod overlay;
pub mod ui;
