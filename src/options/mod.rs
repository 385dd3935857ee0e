//! Centralized scene options with TOML preset support.
//!
//! All tweakable settings (point size, background color, morph pairing and
//! timing, camera) are consolidated here. Options serialize to/from TOML for
//! presets stored in `assets/presets/`.

mod camera;
mod display;
mod morph;
mod particles;

use std::path::Path;

pub use camera::CameraOptions;
pub use display::DisplayOptions;
pub use morph::MorphOptions;
pub use particles::ParticleOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::MorphError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[particles]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Point sprite appearance.
    pub particles: ParticleOptions,
    /// Background color and resolution settings.
    pub display: DisplayOptions,
    /// Morph pairing, progress, and tween timing.
    pub morph: MorphOptions,
    /// Camera projection and control parameters.
    pub camera: CameraOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, MorphError> {
        let content = std::fs::read_to_string(path).map_err(MorphError::Io)?;
        toml::from_str(&content)
            .map_err(|e| MorphError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), MorphError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| MorphError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(MorphError::Io)?;
        }
        std::fs::write(path, content).map_err(MorphError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{EasingFunction, PreemptionStrategy};

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r##"
[particles]
size = 0.4

[morph.pair]
source = 0
"##;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.particles.size, 0.4);
        assert_eq!(opts.morph.pair.source, 0);
        // Everything else should be default
        assert_eq!(opts.morph.pair.target, 3);
        assert_eq!(opts.display.clear_color, "#160920");
        assert_eq!(opts.camera.fovy, 35.0);
        assert_eq!(opts.morph.easing, EasingFunction::POWER1_IN_OUT);
    }

    #[test]
    fn easing_parses_from_toml_table() {
        let toml_str = r#"
[morph]
easing = { kind = "cubic_hermite", c1 = 0.2, c2 = 0.9 }
seed = 12
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(
            opts.morph.easing,
            EasingFunction::CubicHermite { c1: 0.2, c2: 0.9 }
        );
        assert_eq!(opts.morph.seed, Some(12));
        assert_eq!(opts.morph.preemption, PreemptionStrategy::Restart);
    }

    #[test]
    fn save_then_load_and_list() {
        let dir = std::env::temp_dir()
            .join(format!("particle-morph-presets-{}", std::process::id()));
        let mut opts = Options::default();
        opts.particles.size = 0.33;
        opts.save(&dir.join("glow.toml")).unwrap();

        let loaded = Options::load(&dir.join("glow.toml")).unwrap();
        assert_eq!(loaded, opts);
        assert_eq!(Options::list_presets(&dir), vec!["glow".to_owned()]);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn bad_toml_is_an_options_error() {
        let dir = std::env::temp_dir()
            .join(format!("particle-morph-bad-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.toml");
        std::fs::write(&path, "[particles\nsize = ").unwrap();
        let err = Options::load(&path).unwrap_err();
        assert!(matches!(err, MorphError::OptionsParse(_)));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("particles"));
        assert!(props.contains_key("display"));
        assert!(props.contains_key("morph"));
        assert!(props.contains_key("camera"));

        let morph = &props["morph"]["properties"];
        assert!(morph.get("progress").is_some());
        assert!(morph.get("pair").is_some());
        assert!(morph.get("easing").is_none());
        assert!(morph.get("seed").is_none());
        assert!(morph.get("preemption").is_none());
        assert!(props["display"]["properties"].get("max_fps").is_some());
    }

    #[test]
    fn clear_color_falls_back_on_garbage() {
        let mut display = DisplayOptions::default();
        assert!(display.clear_color_linear()[2] > 0.0);
        display.clear_color = "purple".to_owned();
        assert_eq!(display.clear_color_linear(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn pixel_ratio_is_capped_at_two() {
        let display = DisplayOptions::default();
        assert_eq!(display.effective_pixel_ratio(3.0), 2.0);
        assert_eq!(display.effective_pixel_ratio(1.25), 1.25);
    }
}
