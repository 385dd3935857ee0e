use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::animation::{EasingFunction, PreemptionStrategy};
use crate::morph::PairSelection;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Morph", inline)]
#[serde(default)]
/// Morph pairing, progress, and tween timing.
pub struct MorphOptions {
    /// Which loaded models to blend between.
    pub pair: PairSelection,
    /// Initial blend progress.
    #[schemars(title = "Progress", range(min = 0.0, max = 1.0), extend("step" = 0.001))]
    pub progress: f32,
    /// Tween length in seconds when animating the progress.
    #[schemars(title = "Duration", range(min = 0.0, max = 10.0), extend("step" = 0.1))]
    pub duration_secs: f32,
    /// Easing curve applied to the progress tween.
    #[schemars(skip)]
    pub easing: EasingFunction,
    /// What a new progress target does while a tween is running.
    #[schemars(skip)]
    pub preemption: PreemptionStrategy,
    /// Seed for the equalizer's resampling. `None` draws from the OS.
    #[schemars(skip)]
    pub seed: Option<u64>,
}

impl Default for MorphOptions {
    fn default() -> Self {
        Self {
            pair: PairSelection::default(),
            progress: 0.0,
            duration_secs: 3.0,
            easing: EasingFunction::POWER1_IN_OUT,
            preemption: PreemptionStrategy::Restart,
            seed: None,
        }
    }
}

impl MorphOptions {
    /// Tween duration, treating negative or non-finite values as zero.
    pub fn duration(&self) -> Duration {
        Duration::try_from_secs_f32(self.duration_secs).unwrap_or(Duration::ZERO)
    }
}
