//! Overlay positioning and render transform derivation.

mod transform;

pub use transform::{
    OverlayState, OverlayTransform, TILT_LIMIT_DEG, WALL_HEIGHT_M, WALL_WIDTH_M,
};
