//! Time-based tween of the morph progress value.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::easing::EasingFunction;
use super::interpolation::{lerp_f32, InterpolationContext};

/// How to handle a new target arriving while a tween is in progress.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PreemptionStrategy {
    /// Start a new tween from the current value. Time resets to 0.
    #[default]
    Restart,
    /// Ignore new targets until the current tween completes.
    Ignore,
}

/// Animates a scalar from `from` to `to` over `duration`.
#[derive(Debug, Clone)]
pub struct ProgressTween {
    from: f32,
    to: f32,
    duration: Duration,
    elapsed: Duration,
    easing: EasingFunction,
}

impl ProgressTween {
    /// Tween starting now, with zero time elapsed.
    pub fn new(
        from: f32,
        to: f32,
        duration: Duration,
        easing: EasingFunction,
    ) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            easing,
        }
    }

    /// Advance by `dt` and return the new value.
    pub fn advance(&mut self, dt: Duration) -> f32 {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.value()
    }

    /// Raw (un-eased) progress through the tween.
    pub fn raw_t(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Interpolation context for the current instant.
    pub fn context(&self) -> InterpolationContext {
        InterpolationContext::eased(self.easing.evaluate(self.raw_t()))
    }

    /// Current tweened value.
    pub fn value(&self) -> f32 {
        lerp_f32(&self.context(), self.from, self.to)
    }

    /// Final value of the tween.
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Whether the full duration has elapsed.
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Drives the progress scalar frame by frame.
///
/// Holds the current value plus an optional running tween. Setting the value
/// directly cancels any tween.
#[derive(Debug, Clone, Default)]
pub struct ProgressAnimator {
    value: f32,
    tween: Option<ProgressTween>,
    preemption: PreemptionStrategy,
}

impl ProgressAnimator {
    /// Animator resting at `value`.
    pub fn new(value: f32) -> Self {
        Self {
            value: value.clamp(0.0, 1.0),
            ..Self::default()
        }
    }

    /// Set how retargeting behaves mid-tween.
    #[must_use]
    pub fn with_preemption(mut self, strategy: PreemptionStrategy) -> Self {
        self.set_preemption(strategy);
        self
    }

    /// Change the retargeting policy. A running tween is kept.
    pub fn set_preemption(&mut self, strategy: PreemptionStrategy) {
        self.preemption = strategy;
    }

    /// Current progress in [0, 1].
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Jump to `value`, cancelling any tween.
    pub fn set(&mut self, value: f32) {
        self.value = value.clamp(0.0, 1.0);
        self.tween = None;
    }

    /// Tween from the current value to `to`.
    pub fn animate_to(
        &mut self,
        to: f32,
        duration: Duration,
        easing: EasingFunction,
    ) {
        if self.is_animating() && self.preemption == PreemptionStrategy::Ignore {
            log::debug!("progress tween already running; ignoring retarget");
            return;
        }
        let to = to.clamp(0.0, 1.0);
        self.tween = Some(ProgressTween::new(self.value, to, duration, easing));
    }

    /// Where the progress is heading: the tween target, or the resting value.
    pub fn target(&self) -> f32 {
        self.tween.as_ref().map_or(self.value, ProgressTween::target)
    }

    /// Whether a tween is running.
    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Advance the running tween, if any, and return the current value.
    pub fn update(&mut self, dt: Duration) -> f32 {
        if let Some(tween) = &mut self.tween {
            self.value = tween.advance(dt).clamp(0.0, 1.0);
            if tween.is_finished() {
                self.tween = None;
            }
        }
        self.value
    }
}
