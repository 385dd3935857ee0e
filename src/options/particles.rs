use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Particles", inline)]
#[serde(default)]
/// Point sprite appearance.
pub struct ParticleOptions {
    /// Sprite size in world units at unit distance, scaled by resolution.
    #[schemars(title = "Point Size", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub size: f32,
    /// RGB color of each sprite before additive blending.
    #[schemars(skip)]
    pub color: [f32; 3],
}

impl Default for ParticleOptions {
    fn default() -> Self {
        Self {
            size: 0.2,
            color: [1.0, 0.42, 0.16],
        }
    }
}
