//! Progress animation for the morph blend.
//!
//! The blend progress is the only thing that animates: a [`ProgressAnimator`]
//! owns the current value and an optional [`ProgressTween`] shaped by an
//! [`EasingFunction`].

/// Easing curves.
pub mod easing;
/// Lerp helpers and the per-frame interpolation context.
pub mod interpolation;
/// Time-based progress tween and animator.
pub mod tween;

pub use easing::EasingFunction;
pub use interpolation::InterpolationContext;
pub use tween::{PreemptionStrategy, ProgressAnimator, ProgressTween};
