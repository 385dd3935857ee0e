//! Camera system for viewing the particle cloud.
//!
//! Provides a damped orbit camera and the GPU uniform it feeds.

/// Core camera struct and GPU uniform types.
pub mod core;
/// Damped spherical orbit controls.
pub mod orbit;

pub use self::core::{Camera, CameraUniform};
pub use self::orbit::OrbitCamera;
