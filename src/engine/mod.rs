//! Single-threaded update loop for the particle morph.
//!
//! [`MorphEngine`] owns everything that changes between frames: the loaded
//! scene, the progress animator, the orbit camera, and the viewport. Input
//! arrives as [`MorphCommand`]s; [`MorphEngine::tick`] advances time and
//! reports a [`FrameState`] for the renderer. The engine never touches the
//! GPU, blocks, or performs I/O.

mod command;
mod options;

use std::time::Duration;

use glam::Mat4;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub use self::command::MorphCommand;
use crate::animation::ProgressAnimator;
use crate::camera::{CameraUniform, OrbitCamera};
use crate::error::MorphError;
use crate::morph::MorphPair;
use crate::options::Options;
use crate::scene::{LoadTicket, ModelSet, ParticleScene, SceneLoader};

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameState {
    /// Blend progress in [0, 1].
    pub progress: f32,
    /// Sprite size.
    pub point_size: f32,
    /// Viewport size times the capped pixel ratio.
    pub resolution: [f32; 2],
    /// Linear RGB background.
    pub clear_color: [f32; 3],
    /// Camera block for the uniform buffer.
    pub camera: CameraUniform,
    /// Points per buffer in the active pair (0 before the first load).
    pub point_count: usize,
    /// Whether the progress tween or camera damping is still running.
    pub animating: bool,
}

impl FrameState {
    /// View-projection matrix.
    pub fn view_proj(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.camera.view_proj)
    }
}

/// Engine state driven by commands and ticks.
pub struct MorphEngine {
    options: Options,
    loader: SceneLoader,
    scene: Option<ParticleScene>,
    progress: ProgressAnimator,
    camera: OrbitCamera,
    /// Logical viewport size.
    size: (u32, u32),
    /// Device pixel ratio as reported by the window.
    device_pixel_ratio: f32,
    /// Device pixel ratio after capping.
    pixel_ratio: f32,
    /// Cached linear form of `options.display.clear_color`.
    clear_color: [f32; 3],
    rng: StdRng,
}

impl MorphEngine {
    /// Engine with no scene loaded.
    ///
    /// The equalizer's RNG is seeded from `options.morph.seed` when set,
    /// otherwise from the OS.
    pub fn new(options: Options) -> Self {
        let rng = match options.morph.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            loader: SceneLoader::new(),
            scene: None,
            progress: ProgressAnimator::new(options.morph.progress)
                .with_preemption(options.morph.preemption),
            camera: OrbitCamera::new(&options.camera, 1.0),
            size: (1, 1),
            device_pixel_ratio: 1.0,
            pixel_ratio: options.display.effective_pixel_ratio(1.0),
            clear_color: options.display.clear_color_linear(),
            rng,
            options,
        }
    }

    /// Engine with `models` already loaded.
    ///
    /// # Errors
    ///
    /// Whatever [`ParticleScene::build`] reports for `models`.
    pub fn with_models(
        options: Options,
        models: ModelSet,
    ) -> Result<Self, MorphError> {
        let mut engine = Self::new(options);
        engine.execute(MorphCommand::LoadModels { models })?;
        Ok(engine)
    }

    /// Start a load whose result will arrive later as
    /// [`MorphCommand::ModelsLoaded`]. Supersedes any load still in flight.
    pub fn begin_load(&mut self) -> LoadTicket {
        let ticket = self.loader.begin_load();
        log::info!("model load {} started", ticket.generation());
        ticket
    }

    /// Whether a load has begun and not yet delivered.
    pub fn is_loading(&self) -> bool {
        self.loader.is_loading()
    }

    fn finish_load(
        &mut self,
        ticket: LoadTicket,
        models: Result<ModelSet, String>,
    ) -> Result<(), MorphError> {
        let Some(models) = self.loader.finish_load(ticket, models) else {
            return Ok(());
        };
        let models = models.map_err(MorphError::ModelLoad)?;
        let scene = ParticleScene::build(
            &models,
            self.options.morph.pair,
            &mut self.rng,
        )?;
        self.scene = Some(scene);
        Ok(())
    }

    /// Advance animation by `dt` and report the frame.
    pub fn tick(&mut self, dt: Duration) -> FrameState {
        let progress = self.progress.update(dt);
        if let Some(scene) = &mut self.scene {
            scene.pair_mut().set_progress(progress);
        }
        let camera_moving = self.camera.update(dt);
        self.frame_state(camera_moving)
    }

    fn frame_state(&self, camera_moving: bool) -> FrameState {
        let (width, height) = self.size;
        FrameState {
            progress: self.progress.value(),
            point_size: self.options.particles.size,
            resolution: [
                width as f32 * self.pixel_ratio,
                height as f32 * self.pixel_ratio,
            ],
            clear_color: self.clear_color,
            camera: self.camera.uniform(),
            point_count: self.scene.as_ref().map_or(0, ParticleScene::point_count),
            animating: camera_moving || self.progress.is_animating(),
        }
    }

    /// The active pair, if its buffers changed since the last call.
    /// Marks them as uploaded.
    pub fn pair_to_upload(&mut self) -> Option<&MorphPair> {
        let scene = self.scene.as_mut()?;
        if !scene.is_dirty() {
            return None;
        }
        scene.mark_rendered();
        Some(scene.pair())
    }

    /// The loaded scene.
    pub fn scene(&self) -> Option<&ParticleScene> {
        self.scene.as_ref()
    }

    /// Current options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Current progress.
    pub fn progress(&self) -> f32 {
        self.progress.value()
    }

    /// Whether a progress tween is running.
    pub fn is_animating(&self) -> bool {
        self.progress.is_animating()
    }

    /// Capped device pixel ratio.
    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::morph::PairSelection;

    const FRAME: Duration = Duration::from_millis(16);

    fn seeded() -> Options {
        let mut options = Options::default();
        options.morph.seed = Some(5);
        options
    }

    fn engine() -> MorphEngine {
        MorphEngine::with_models(seeded(), ModelSet::demo()).unwrap()
    }

    #[test]
    fn empty_engine_reports_no_points() {
        let mut engine = MorphEngine::new(seeded());
        let frame = engine.tick(FRAME);
        assert_eq!(frame.point_count, 0);
        assert!(engine.pair_to_upload().is_none());
    }

    #[test]
    fn load_produces_one_upload() {
        let mut engine = engine();
        let pair = engine.pair_to_upload().unwrap();
        assert_eq!(pair.count(), 1014);
        assert!(engine.pair_to_upload().is_none());
        assert_eq!(engine.tick(FRAME).point_count, 1014);
    }

    #[test]
    fn same_seed_same_scene() {
        let a = engine();
        let b = engine();
        assert_eq!(a.scene().unwrap().sets(), b.scene().unwrap().sets());
    }

    #[test]
    fn set_progress_clamps_and_reaches_the_pair() {
        let mut engine = engine();
        engine
            .execute(MorphCommand::SetProgress { progress: 2.0 })
            .unwrap();
        let frame = engine.tick(FRAME);
        assert_eq!(frame.progress, 1.0);
        assert_eq!(engine.scene().unwrap().pair().progress(), 1.0);
    }

    #[test]
    fn toggle_runs_a_tween_to_the_far_end_and_back() {
        let mut engine = engine();
        engine.execute(MorphCommand::ToggleMorph).unwrap();
        assert!(engine.is_animating());
        let mut frame = engine.tick(FRAME);
        assert!(frame.progress > 0.0 && frame.progress < 1.0);
        for _ in 0..400 {
            frame = engine.tick(FRAME);
        }
        assert_eq!(frame.progress, 1.0);
        assert!(!engine.is_animating());

        engine.execute(MorphCommand::ToggleMorph).unwrap();
        for _ in 0..400 {
            frame = engine.tick(FRAME);
        }
        assert_eq!(frame.progress, 0.0);
    }

    #[test]
    fn animate_progress_uses_the_given_duration() {
        let mut engine = engine();
        engine
            .execute(MorphCommand::AnimateProgress {
                to: 1.0,
                duration: Duration::from_secs(1),
            })
            .unwrap();
        let frame = engine.tick(Duration::from_millis(500));
        assert!((frame.progress - 0.5).abs() < 1e-4);
        let frame = engine.tick(Duration::from_millis(500));
        assert_eq!(frame.progress, 1.0);
    }

    #[test]
    fn resolution_uses_capped_pixel_ratio() {
        let mut engine = engine();
        engine
            .execute(MorphCommand::Resize { width: 800, height: 600 })
            .unwrap();
        engine
            .execute(MorphCommand::SetPixelRatio { ratio: 3.0 })
            .unwrap();
        let frame = engine.tick(FRAME);
        assert_eq!(frame.resolution, [1600.0, 1200.0]);
        assert_eq!(engine.pixel_ratio(), 2.0);
    }

    #[test]
    fn point_size_and_clear_color() {
        let mut engine = engine();
        engine
            .execute(MorphCommand::SetPointSize { size: 0.5 })
            .unwrap();
        engine
            .execute(MorphCommand::SetClearColor { hex: "#ffffff".into() })
            .unwrap();
        let frame = engine.tick(FRAME);
        assert_eq!(frame.point_size, 0.5);
        assert!((frame.clear_color[0] - 1.0).abs() < 1e-6);

        let err = engine
            .execute(MorphCommand::SetClearColor { hex: "nope".into() })
            .unwrap_err();
        assert!(matches!(err, MorphError::OptionsParse(_)));
        assert_eq!(engine.options().display.clear_color, "#ffffff");
    }

    #[test]
    fn select_pair_repairs_and_marks_dirty() {
        let mut engine = engine();
        let _ = engine.pair_to_upload();
        let selection = PairSelection { source: 0, target: 2 };
        engine
            .execute(MorphCommand::SelectPair { selection })
            .unwrap();
        assert_eq!(engine.options().morph.pair, selection);
        assert!(engine.pair_to_upload().is_some());

        let err = engine
            .execute(MorphCommand::SelectPair {
                selection: PairSelection { source: 7, target: 0 },
            })
            .unwrap_err();
        assert!(matches!(err, MorphError::PairIndexOutOfRange { .. }));
        assert_eq!(engine.options().morph.pair, selection);
    }

    #[test]
    fn superseded_load_is_ignored() {
        let mut engine = MorphEngine::new(seeded());
        let slow = engine.begin_load();
        let fast = engine.begin_load();
        let small = ModelSet::from_json(
            r#"{"meshes":[{"positions":[0,0,0]},{"positions":[1,1,1]},
                {"positions":[2,2,2]},{"positions":[3,3,3,4,4,4]}]}"#,
        )
        .unwrap();
        engine
            .execute(MorphCommand::ModelsLoaded {
                ticket: fast,
                models: Ok(small),
            })
            .unwrap();
        engine
            .execute(MorphCommand::ModelsLoaded {
                ticket: slow,
                models: Ok(ModelSet::demo()),
            })
            .unwrap();
        assert_eq!(engine.scene().unwrap().point_count(), 2);
        assert!(!engine.is_loading());
    }

    #[test]
    fn failed_load_reports_and_keeps_scene() {
        let mut engine = engine();
        let ticket = engine.begin_load();
        let err = engine
            .execute(MorphCommand::ModelsLoaded {
                ticket,
                models: Err("404".into()),
            })
            .unwrap_err();
        assert!(matches!(err, MorphError::ModelLoad(_)));
        assert_eq!(engine.scene().unwrap().point_count(), 1014);
    }

    #[test]
    fn camera_commands_move_the_view() {
        let mut engine = engine();
        let before = engine.tick(FRAME).view_proj();
        engine
            .execute(MorphCommand::RotateCamera { delta: Vec2::new(50.0, 10.0) })
            .unwrap();
        engine.execute(MorphCommand::Zoom { delta: 1.0 }).unwrap();
        let frame = engine.tick(FRAME);
        assert!(frame.animating);
        assert_ne!(frame.view_proj(), before);
    }
}
