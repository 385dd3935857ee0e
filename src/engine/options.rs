//! Options methods for MorphEngine

use std::path::Path;

use super::MorphEngine;
use crate::camera::OrbitCamera;
use crate::error::MorphError;
use crate::options::Options;

impl MorphEngine {
    /// Replace options and apply all changes to subsystems.
    ///
    /// # Errors
    ///
    /// [`MorphError::PairIndexOutOfRange`] if the new pair selection doesn't
    /// fit the loaded scene. The other sections are applied regardless.
    pub fn set_options(&mut self, new: Options) -> Result<(), MorphError> {
        let selection = new.morph.pair;
        let pair_changed = selection != self.options.morph.pair;
        let camera_changed = new.camera != self.options.camera;
        self.options = new;
        self.apply_display();
        self.progress.set_preemption(self.options.morph.preemption);
        if camera_changed {
            self.apply_camera();
        }
        // Keep the old pair recorded until reselection succeeds.
        self.options.morph.pair = self
            .scene
            .as_ref()
            .map_or(selection, |scene| scene.selection());
        if pair_changed {
            self.select_pair(selection)?;
        }
        Ok(())
    }

    /// Recompute the cached clear color and pixel-ratio cap.
    fn apply_display(&mut self) {
        self.clear_color = self.options.display.clear_color_linear();
        self.pixel_ratio =
            self.options.display.effective_pixel_ratio(self.device_pixel_ratio);
    }

    /// Rebuild the orbit camera from the camera options.
    fn apply_camera(&mut self) {
        let (width, height) = self.size;
        self.camera = OrbitCamera::new(&self.options.camera, 1.0);
        self.camera.resize(width, height);
    }

    /// Load a named preset from `dir` (`<dir>/<name>.toml`).
    ///
    /// # Errors
    ///
    /// Whatever [`Options::load`] or [`MorphEngine::set_options`] report.
    pub fn load_preset(&mut self, dir: &Path, name: &str) -> Result<(), MorphError> {
        let path = dir.join(format!("{name}.toml"));
        let options = Options::load(&path)?;
        log::info!("loaded preset {name:?}");
        self.set_options(options)
    }

    /// Save the current options as a named preset in `dir`.
    ///
    /// # Errors
    ///
    /// Whatever [`Options::save`] reports.
    pub fn save_preset(&self, dir: &Path, name: &str) -> Result<(), MorphError> {
        self.options.save(&dir.join(format!("{name}.toml")))
    }
}
