//! Standalone window backed by winit.
//!
//! ```no_run
//! # use particle_morph::Viewer;
//! Viewer::builder()
//!     .with_models_path("assets/models/shapes.json")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```
//!
//! Keys: Space toggles the morph, Right/Left step the target model, R
//! reloads the model file in the background, Escape quits.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use glam::Vec2;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::{
    engine::{MorphCommand, MorphEngine},
    error::MorphError,
    gpu::{ParticleRenderer, RenderContext},
    morph::PairSelection,
    options::Options,
    scene::{LoadTicket, ModelSet},
    util::frame_timing::FrameTiming,
};

/// Unlimited: pacing comes from the surface's Fifo present mode.
/// Scroll pixels per wheel "line" on trackpads.
const PIXELS_PER_LINE: f32 = 100.0;

type LoadResult = (LoadTicket, Result<ModelSet, String>);

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    models: Option<ModelSet>,
    models_path: Option<PathBuf>,
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            models: None,
            models_path: None,
            options: None,
            title: "Particle Morph".into(),
        }
    }

    /// Load models from a JSON model-set file. Also enables R to reload it.
    #[must_use]
    pub fn with_models_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.models_path = Some(path.into());
        self
    }

    /// Use an in-memory model set (takes precedence over the path for the
    /// initial load).
    #[must_use]
    pub fn with_models(mut self, models: ModelSet) -> Self {
        self.models = Some(models);
        self
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            models: self.models,
            models_path: self.models_path,
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A window that renders the particle morph.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run).
pub struct Viewer {
    models: Option<ModelSet>,
    models_path: Option<PathBuf>,
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Load models, open the window, and run the event loop. Blocks until
    /// the window is closed.
    ///
    /// Without a model set or path, the built-in demo shapes are used.
    ///
    /// # Errors
    ///
    /// Model loading or equalization failures before the window opens, and
    /// event-loop failures as [`MorphError::Viewer`].
    pub fn run(self) -> Result<(), MorphError> {
        let models = match (self.models, &self.models_path) {
            (Some(models), _) => models,
            (None, Some(path)) => ModelSet::load(path)?,
            (None, None) => ModelSet::demo(),
        };
        let color = self.options.particles.color;
        let max_fps = self.options.display.max_fps;
        let engine = MorphEngine::with_models(self.options, models)?;

        let event_loop =
            EventLoop::new().map_err(|e| MorphError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let (load_tx, load_rx) = mpsc::channel();
        let mut app = ViewerApp {
            window: None,
            gpu: None,
            engine,
            timing: FrameTiming::new(max_fps),
            color,
            title: self.title,
            models_path: self.models_path,
            load_tx,
            load_rx,
            dragging: false,
            cursor: None,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| MorphError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

struct GpuState {
    context: RenderContext,
    renderer: ParticleRenderer,
}

struct ViewerApp {
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    engine: MorphEngine,
    timing: FrameTiming,
    color: [f32; 3],
    title: String,
    models_path: Option<PathBuf>,
    load_tx: Sender<LoadResult>,
    load_rx: Receiver<LoadResult>,
    dragging: bool,
    cursor: Option<Vec2>,
}

impl ViewerApp {
    fn execute(&mut self, command: MorphCommand) {
        if let Err(e) = self.engine.execute(command) {
            log::warn!("{e}");
        }
    }

    /// Tell the engine about the window's logical size and scale.
    fn sync_viewport(&mut self, window: &Window) {
        let scale = window.scale_factor();
        let logical = window.inner_size().to_logical::<u32>(scale);
        self.execute(MorphCommand::Resize {
            width: logical.width,
            height: logical.height,
        });
        #[allow(clippy::cast_possible_truncation)]
        self.execute(MorphCommand::SetPixelRatio { ratio: scale as f32 });
    }

    /// Read the model file on a worker thread; the result comes back
    /// through the channel and is equalized on the next redraw.
    fn reload_models(&mut self) {
        let Some(path) = self.models_path.clone() else {
            log::info!("no model file to reload");
            return;
        };
        let ticket = self.engine.begin_load();
        let tx = self.load_tx.clone();
        let _ = std::thread::spawn(move || {
            let result = ModelSet::load(&path).map_err(|e| e.to_string());
            // Receiver is gone once the window closes.
            let _ = tx.send((ticket, result));
        });
    }

    fn drain_loads(&mut self) {
        while let Ok((ticket, models)) = self.load_rx.try_recv() {
            self.execute(MorphCommand::ModelsLoaded { ticket, models });
        }
    }

    /// Step the target model by `step`, skipping the source.
    fn cycle_target(&mut self, step: isize) {
        let Some(scene) = self.engine.scene() else {
            return;
        };
        let count = scene.sets().len();
        if count < 2 {
            return;
        }
        let current = scene.selection();
        let mut target = current.target;
        loop {
            target = target.checked_add_signed(step).unwrap_or(count - 1) % count;
            if target != current.source {
                break;
            }
        }
        let name = scene.names().get(target).cloned().unwrap_or_default();
        log::info!("target model {target} {name:?}");
        self.execute(MorphCommand::SelectPair {
            selection: PairSelection {
                source: current.source,
                target,
            },
        });
    }

    fn redraw(&mut self) {
        self.drain_loads();
        let dt = self.timing.end_frame();
        let frame = self.engine.tick(dt);

        let Some(gpu) = &mut self.gpu else {
            return;
        };
        if let Some(pair) = self.engine.pair_to_upload() {
            gpu.renderer.upload_pair(&gpu.context, pair);
        }
        gpu.renderer.update(&gpu.context.queue, &frame);

        match gpu.context.get_next_frame() {
            Ok(output) => {
                let view = output
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());
                let mut encoder = gpu.context.create_encoder();
                gpu.renderer.render(&mut encoder, &view, frame.clear_color);
                gpu.context.submit(encoder);
                output.present();
            }
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                let (width, height) = gpu.context.size();
                gpu.context.resize(width, height);
            }
            Err(e) => log::error!("render error: {e:?}"),
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, code: KeyCode) {
        match code {
            KeyCode::Space => self.execute(MorphCommand::ToggleMorph),
            KeyCode::ArrowRight => self.cycle_target(1),
            KeyCode::ArrowLeft => self.cycle_target(-1),
            KeyCode::KeyR => self.reload_models(),
            KeyCode::Escape => event_loop.exit(),
            _ => {}
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 800));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let inner = window.inner_size();
        let context = match pollster::block_on(RenderContext::new(
            window.clone(),
            (inner.width, inner.height),
        )) {
            Ok(c) => c,
            Err(e) => {
                log::error!("{}", MorphError::from(e));
                event_loop.exit();
                return;
            }
        };
        let renderer = ParticleRenderer::new(&context, self.color);
        self.gpu = Some(GpuState { context, renderer });

        self.sync_viewport(&window);
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }
        let Some(window) = self.window.clone() else {
            return;
        };

        match event {
            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.context.resize(size.width, size.height);
                }
                self.sync_viewport(&window);
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                self.sync_viewport(&window);
            }

            WindowEvent::RedrawRequested => {
                if self.timing.should_render() {
                    self.redraw();
                }
                window.request_redraw();
            }

            WindowEvent::MouseInput { button, state, .. } => {
                if button == MouseButton::Left {
                    self.dragging = state == ElementState::Pressed;
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                #[allow(clippy::cast_possible_truncation)]
                let pos = Vec2::new(position.x as f32, position.y as f32);
                if let (true, Some(last)) = (self.dragging, self.cursor) {
                    self.execute(MorphCommand::RotateCamera { delta: pos - last });
                }
                self.cursor = Some(pos);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                #[allow(clippy::cast_possible_truncation)]
                let delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => {
                        pos.y as f32 / PIXELS_PER_LINE
                    }
                };
                self.execute(MorphCommand::Zoom { delta });
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                if let PhysicalKey::Code(code) = event.physical_key {
                    self.handle_key(event_loop, code);
                }
            }

            _ => (),
        }
    }
}
