//! Window surface, device and queue for the particle viewer.

use std::fmt;

/// Why the viewer could not get a GPU to draw with.
#[derive(Debug)]
pub enum RenderContextError {
    /// The window handle could not back a surface.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No adapter can present to the surface.
    AdapterRequest(wgpu::RequestAdapterError),
    /// The adapter refused the WebGL2-level limits.
    DeviceRequest(wgpu::RequestDeviceError),
    /// The adapter offers no configuration for this surface.
    UnsupportedSurface,
}

impl fmt::Display for RenderContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SurfaceCreation(e) => write!(f, "cannot create surface: {e}"),
            Self::AdapterRequest(e) => write!(f, "no usable GPU adapter: {e}"),
            Self::DeviceRequest(e) => write!(f, "GPU device refused: {e}"),
            Self::UnsupportedSurface => {
                write!(f, "adapter cannot present to this window")
            }
        }
    }
}

impl std::error::Error for RenderContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SurfaceCreation(e) => Some(e),
            Self::AdapterRequest(e) => Some(e),
            Self::DeviceRequest(e) => Some(e),
            Self::UnsupportedSurface => None,
        }
    }
}

/// Device, queue and the window's swapchain.
pub struct RenderContext {
    /// Logical device that owns every buffer and pipeline.
    pub device: wgpu::Device,
    /// Queue for uploads and frame submission.
    pub queue: wgpu::Queue,
    /// Swapchain surface of the viewer window.
    pub surface: wgpu::Surface<'static>,
    /// Surface format, size and present mode.
    pub config: wgpu::SurfaceConfiguration,
}

impl RenderContext {
    /// Open a device for `window` at `initial_size` physical pixels.
    ///
    /// Only WebGL2-level limits are requested, so the same particle pass
    /// runs on the browser backend.
    ///
    /// # Errors
    ///
    /// The [`RenderContextError`] stage that failed.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        initial_size: (u32, u32),
    ) -> Result<Self, RenderContextError> {
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window)
            .map_err(RenderContextError::SurfaceCreation)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                power_preference: wgpu::PowerPreference::HighPerformance,
                ..Default::default()
            })
            .await
            .map_err(RenderContextError::AdapterRequest)?;
        log::info!("using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Particle Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                ..Default::default()
            })
            .await
            .map_err(RenderContextError::DeviceRequest)?;

        let (width, height) = (initial_size.0.max(1), initial_size.1.max(1));
        let mut config = surface
            .get_default_config(&adapter, width, height)
            .ok_or(RenderContextError::UnsupportedSurface)?;
        config.present_mode = wgpu::PresentMode::Fifo;
        surface.configure(&device, &config);

        Ok(Self {
            device,
            queue,
            surface,
            config,
        })
    }

    /// Swapchain texture format.
    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Swapchain size in physical pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Reconfigure for a new window size. A minimized window reports zero
    /// and is skipped.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Next swapchain texture.
    ///
    /// # Errors
    ///
    /// `Lost` and `Outdated` mean the caller should [`resize`](Self::resize)
    /// and retry next frame.
    pub fn get_next_frame(
        &self,
    ) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.surface.get_current_texture()
    }

    /// Encoder for one frame's passes.
    pub fn create_encoder(&self) -> wgpu::CommandEncoder {
        self.device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Particle Encoder"),
            })
    }

    /// Finish `encoder` and queue it.
    pub fn submit(&self, encoder: wgpu::CommandEncoder) {
        let _ = self.queue.submit(std::iter::once(encoder.finish()));
    }
}
