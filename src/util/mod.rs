//! Shared utilities: hex color parsing and frame timing.

/// Hex color parsing and sRGB conversion.
pub mod color;
/// Frame pacing and FPS smoothing.
pub mod frame_timing;
