//! GPU resource management and the particle pass.
//!
//! Provides wgpu device/surface initialization, growable vertex buffers,
//! and the instanced renderer that blends the morph pair on the GPU.

/// Growable GPU buffers with automatic reallocation.
pub mod dynamic_buffer;
/// Instanced point-sprite renderer.
pub mod particle_renderer;
/// Shared wgpu boilerplate helpers for the particle pipeline.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;

pub use self::particle_renderer::{ParticleRenderer, ParticleUniform};
pub use self::render_context::{RenderContext, RenderContextError};
