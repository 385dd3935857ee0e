//! The engine's complete interactive vocabulary.
//!
//! Every operation, whether triggered by a key press, a mouse drag, the
//! CLI, or a finished background load, is a [`MorphCommand`] handed to
//! [`MorphEngine::execute`]. Commands only mutate engine-owned state; the
//! effect becomes visible on the next [`MorphEngine::tick`].

use std::time::Duration;

use glam::Vec2;

use super::MorphEngine;
use crate::error::MorphError;
use crate::morph::PairSelection;
use crate::scene::{LoadTicket, ModelSet};
use crate::util::color::parse_hex_rgb;

/// A discrete or parameterized operation the engine can perform.
///
/// ```ignore
/// engine.execute(MorphCommand::ToggleMorph)?;
/// engine.execute(MorphCommand::Zoom { delta: 1.0 })?;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum MorphCommand {
    // ── Progress ────────────────────────────────────────────────────
    /// Jump the blend to `progress`, cancelling any tween.
    SetProgress {
        /// New progress; clamped to [0, 1].
        progress: f32,
    },

    /// Tween the blend to `to` with the configured easing.
    AnimateProgress {
        /// Final progress; clamped to [0, 1].
        to: f32,
        /// Tween length.
        duration: Duration,
    },

    /// Tween toward whichever end the blend isn't heading for.
    ToggleMorph,

    // ── Appearance ──────────────────────────────────────────────────
    /// Set the sprite size.
    SetPointSize {
        /// New size; negative values clamp to 0.
        size: f32,
    },

    /// Set the background color.
    SetClearColor {
        /// `#rrggbb` or `#rgb`.
        hex: String,
    },

    // ── Scene ───────────────────────────────────────────────────────
    /// Morph between a different pair of loaded models.
    SelectPair {
        /// Source and target model indices.
        selection: PairSelection,
    },

    /// Replace the model set, equalizing it immediately.
    LoadModels {
        /// The new models.
        models: ModelSet,
    },

    /// Deliver the result of a load started with
    /// [`MorphEngine::begin_load`]. Dropped if a newer load has begun.
    ModelsLoaded {
        /// Ticket from `begin_load`.
        ticket: LoadTicket,
        /// Parsed models, or the load failure message.
        models: Result<ModelSet, String>,
    },

    // ── Viewport ────────────────────────────────────────────────────
    /// The viewport changed size (logical pixels).
    Resize {
        /// New width.
        width: u32,
        /// New height.
        height: u32,
    },

    /// The device pixel ratio changed.
    SetPixelRatio {
        /// Device ratio before capping.
        ratio: f32,
    },

    // ── Camera ──────────────────────────────────────────────────────
    /// Orbit the camera by `delta` pixels of drag.
    RotateCamera {
        /// Horizontal and vertical drag delta.
        delta: Vec2,
    },

    /// Zoom the camera (positive = zoom in, negative = zoom out).
    Zoom {
        /// Scroll amount.
        delta: f32,
    },
}

impl MorphEngine {
    /// Apply one command.
    ///
    /// # Errors
    ///
    /// Returns the failure for commands that can be rejected (bad pair
    /// index, unparseable color, a model set that won't equalize). The
    /// engine state is unchanged in that case.
    pub fn execute(&mut self, command: MorphCommand) -> Result<(), MorphError> {
        match command {
            MorphCommand::SetProgress { progress } => self.progress.set(progress),
            MorphCommand::AnimateProgress { to, duration } => {
                self.progress
                    .animate_to(to, duration, self.options.morph.easing);
            }
            MorphCommand::ToggleMorph => self.toggle_morph(),
            MorphCommand::SetPointSize { size } => {
                self.options.particles.size = size.max(0.0);
            }
            MorphCommand::SetClearColor { hex } => {
                if parse_hex_rgb(&hex).is_none() {
                    return Err(MorphError::OptionsParse(format!(
                        "invalid clear color {hex:?}"
                    )));
                }
                self.options.display.clear_color = hex;
                self.clear_color = self.options.display.clear_color_linear();
            }
            MorphCommand::SelectPair { selection } => {
                self.select_pair(selection)?;
            }
            MorphCommand::LoadModels { models } => {
                let ticket = self.begin_load();
                self.finish_load(ticket, Ok(models))?;
            }
            MorphCommand::ModelsLoaded { ticket, models } => {
                self.finish_load(ticket, models)?;
            }
            MorphCommand::Resize { width, height } => {
                self.size = (width, height);
                self.camera.resize(width, height);
            }
            MorphCommand::SetPixelRatio { ratio } => {
                self.device_pixel_ratio = ratio;
                self.pixel_ratio =
                    self.options.display.effective_pixel_ratio(ratio);
            }
            MorphCommand::RotateCamera { delta } => self.camera.rotate(delta),
            MorphCommand::Zoom { delta } => self.camera.zoom(delta),
        }
        Ok(())
    }

    fn toggle_morph(&mut self) {
        let to = if self.progress.target() >= 0.5 { 0.0 } else { 1.0 };
        log::debug!("morph toward {to}");
        self.progress.animate_to(
            to,
            self.options.morph.duration(),
            self.options.morph.easing,
        );
    }

    pub(super) fn select_pair(
        &mut self,
        selection: PairSelection,
    ) -> Result<(), MorphError> {
        if let Some(scene) = &mut self.scene {
            scene.reselect(selection)?;
        }
        self.options.morph.pair = selection;
        Ok(())
    }
}
