use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::color::{parse_hex_rgb, srgb_to_linear};

/// Fallback when `clear_color` does not parse.
const FALLBACK_CLEAR: [f32; 3] = [0.0, 0.0, 0.0];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Display", inline)]
#[serde(default)]
/// Background and output-resolution settings.
pub struct DisplayOptions {
    /// Background color as `#rrggbb`.
    #[schemars(title = "Clear Color", extend("format" = "color"))]
    pub clear_color: String,
    /// Upper bound on the device pixel ratio used for the render target.
    #[schemars(skip)]
    pub max_pixel_ratio: f32,
    /// Frame rate cap for the native viewer (0 = uncapped).
    #[schemars(title = "Max FPS", range(min = 0, max = 240))]
    pub max_fps: u32,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            clear_color: "#160920".to_owned(),
            max_pixel_ratio: 2.0,
            max_fps: 0,
        }
    }
}

impl DisplayOptions {
    /// Clear color as linear RGB, ready for a wgpu clear op.
    ///
    /// Unparseable strings log a warning and fall back to black.
    pub fn clear_color_linear(&self) -> [f32; 3] {
        parse_hex_rgb(&self.clear_color).map_or_else(
            || {
                log::warn!(
                    "invalid clear color {:?}, using black",
                    self.clear_color
                );
                FALLBACK_CLEAR
            },
            |rgb| rgb.map(srgb_to_linear),
        )
    }

    /// Clamp a device pixel ratio to `max_pixel_ratio`.
    pub fn effective_pixel_ratio(&self, device_ratio: f32) -> f32 {
        device_ratio.clamp(0.5, self.max_pixel_ratio.max(0.5))
    }
}
