//! Centralized interpolation utilities for animation.

use glam::Vec3;

/// Blend factor for one frame, after easing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpolationContext {
    /// Eased progress. This is the value blending should use.
    pub eased_t: f32,
}

impl InterpolationContext {
    /// Context for an already-eased progress value.
    pub fn eased(eased_t: f32) -> Self {
        Self { eased_t }
    }

    /// Linear context (no easing).
    pub fn linear(raw_t: f32) -> Self {
        Self::eased(raw_t)
    }

    /// Unified progress value for interpolation.
    #[inline]
    pub fn unified_t(&self) -> f32 {
        self.eased_t
    }
}

/// Lerp two positions using the context's unified progress.
#[inline]
pub fn lerp_position(
    ctx: &InterpolationContext,
    start: Vec3,
    end: Vec3,
) -> Vec3 {
    let t = ctx.unified_t();
    // Same form as WGSL `mix`, exact at t = 0 and t = 1.
    start * (1.0 - t) + end * t
}

/// Lerp two f32 values using the context's unified progress.
#[inline]
pub fn lerp_f32(ctx: &InterpolationContext, start: f32, end: f32) -> f32 {
    let t = ctx.unified_t();
    start + (end - start) * t
}
