//! Instanced point-sprite renderer that blends two position buffers.
//!
//! Each particle is one instance with two per-instance attributes,
//! `position` (slot 0) and `position_target` (slot 1). The vertex shader
//! mixes them by the `progress` uniform and expands six vertices into a
//! camera-facing quad. Sprites blend additively and never write depth.

use wgpu::util::DeviceExt;

use super::dynamic_buffer::DynamicBuffer;
use super::pipeline_helpers::{
    create_instanced_pipeline, instance_vec3_layout, uniform_buffer,
    ADDITIVE_BLEND,
};
use super::render_context::RenderContext;
use crate::camera::CameraUniform;
use crate::engine::FrameState;
use crate::error::MorphError;
use crate::morph::MorphPair;
use crate::points::EqualizedPointSet;

const SHADER_SOURCE: &str = include_str!("../../assets/shaders/particles.wgsl");
/// Two triangles per sprite.
const VERTICES_PER_PARTICLE: u32 = 6;

/// Uniform block for `particles.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleUniform {
    /// View-projection and eye.
    pub camera: CameraUniform,
    /// Sprite RGB.
    pub color: [f32; 3],
    /// Blend progress in [0, 1].
    pub progress: f32,
    /// Render target size in pixels.
    pub resolution: [f32; 2],
    /// Sprite size.
    pub size: f32,
    pub(crate) _pad: f32,
}

impl ParticleUniform {
    /// Uniform for `frame` with sprites tinted `color`.
    pub fn from_frame(frame: &FrameState, color: [f32; 3]) -> Self {
        Self {
            camera: frame.camera,
            color,
            progress: frame.progress,
            resolution: frame.resolution,
            size: frame.point_size,
            _pad: 0.0,
        }
    }

    fn zeroed_with_color(color: [f32; 3]) -> Self {
        Self {
            camera: CameraUniform::new(),
            color,
            progress: 0.0,
            resolution: [1.0, 1.0],
            size: 0.0,
            _pad: 0.0,
        }
    }
}

/// Reject a pair of buffers that can't be drawn together.
fn check_pair(
    source: &EqualizedPointSet,
    target: &EqualizedPointSet,
) -> Result<u32, MorphError> {
    if source.count() != target.count() {
        return Err(MorphError::ShapeMismatch {
            source: source.count(),
            target: target.count(),
        });
    }
    draw_count(source.count())
}

fn draw_count(count: usize) -> Result<u32, MorphError> {
    u32::try_from(count).map_err(|_| MorphError::TooManyPoints { count })
}

/// The particle pass binds one uniform, read by both shader stages.
fn layout_entries() -> [wgpu::BindGroupLayoutEntry; 1] {
    [uniform_buffer(
        0,
        wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
    )]
}

/// GPU resources for the particle pass.
pub struct ParticleRenderer {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    source: DynamicBuffer,
    target: DynamicBuffer,
    instance_count: u32,
    color: [f32; 3],
}

impl ParticleRenderer {
    /// Build the pipeline for the context's surface format.
    pub fn new(context: &RenderContext, color: [f32; 3]) -> Self {
        let device = &context.device;
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Particle Shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER_SOURCE.into()),
        });

        let uniform = ParticleUniform::zeroed_with_color(color);
        let uniform_buf =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Particle Uniform Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Particle Bind Group Layout"),
                entries: &layout_entries(),
            });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Particle Bind Group"),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buf.as_entire_binding(),
            }],
        });

        let source_attrs = wgpu::vertex_attr_array![0 => Float32x3];
        let target_attrs = wgpu::vertex_attr_array![1 => Float32x3];
        let pipeline = create_instanced_pipeline(
            device,
            "Particle",
            &shader,
            context.format(),
            Some(ADDITIVE_BLEND),
            &[
                instance_vec3_layout(&source_attrs),
                instance_vec3_layout(&target_attrs),
            ],
            &[&layout],
        );

        let usage = wgpu::BufferUsages::VERTEX;
        Self {
            pipeline,
            uniform_buffer: uniform_buf,
            bind_group,
            source: DynamicBuffer::new(device, "Particle Positions", 0, usage),
            target: DynamicBuffer::new(device, "Particle Targets", 0, usage),
            instance_count: 0,
            color,
        }
    }

    /// Upload new source/target buffers.
    ///
    /// # Errors
    ///
    /// [`MorphError::ShapeMismatch`] if the buffers differ in length.
    /// Nothing is uploaded in that case.
    pub fn set_pair(
        &mut self,
        context: &RenderContext,
        source: &EqualizedPointSet,
        target: &EqualizedPointSet,
    ) -> Result<(), MorphError> {
        let count = check_pair(source, target)?;
        self.source
            .write(&context.device, &context.queue, source.as_flat());
        self.target
            .write(&context.device, &context.queue, target.as_flat());
        self.instance_count = count;
        log::debug!("uploaded {count} particles");
        Ok(())
    }

    /// Upload a validated pair.
    pub fn upload_pair(&mut self, context: &RenderContext, pair: &MorphPair) {
        if let Err(e) = self.set_pair(context, pair.source(), pair.target()) {
            log::error!("morph pair upload failed: {e}");
        }
    }

    /// Change the sprite tint.
    pub fn set_color(&mut self, color: [f32; 3]) {
        self.color = color;
    }

    /// Number of particles drawn.
    pub fn instance_count(&self) -> u32 {
        self.instance_count
    }

    /// Write this frame's uniform.
    pub fn update(&self, queue: &wgpu::Queue, frame: &FrameState) {
        let uniform = ParticleUniform::from_frame(frame, self.color);
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::cast_slice(&[uniform]),
        );
    }

    /// Clear `view` to `clear_color` and draw the particles.
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        clear_color: [f32; 3],
    ) {
        let [r, g, b] = clear_color.map(f64::from);
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Particle Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a: 1.0 }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        if self.instance_count == 0 {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.source.slice());
        pass.set_vertex_buffer(1, self.target.slice());
        pass.draw(0..VERTICES_PER_PARTICLE, 0..self.instance_count);
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::points::{equalize_seeded, PointSet};

    #[test]
    fn uniform_matches_wgsl_layout() {
        assert_eq!(size_of::<ParticleUniform>(), 112);
        assert_eq!(std::mem::offset_of!(ParticleUniform, color), 80);
        assert_eq!(std::mem::offset_of!(ParticleUniform, progress), 92);
        assert_eq!(std::mem::offset_of!(ParticleUniform, resolution), 96);
        assert_eq!(std::mem::offset_of!(ParticleUniform, size), 104);
    }

    #[test]
    fn check_pair_rejects_mismatched_buffers() {
        let a = equalize_seeded(&[PointSet::from_points(&[Vec3::ONE; 2])], 0)
            .unwrap()
            .remove(0);
        let b = equalize_seeded(&[PointSet::from_points(&[Vec3::ONE; 3])], 0)
            .unwrap()
            .remove(0);
        assert!(matches!(
            check_pair(&a, &b),
            Err(MorphError::ShapeMismatch { source: 2, target: 3 })
        ));
        assert_eq!(check_pair(&a, &a).unwrap(), 2);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn oversized_buffers_are_not_a_shape_mismatch() {
        let count = u32::MAX as usize + 1;
        assert!(matches!(
            draw_count(count),
            Err(MorphError::TooManyPoints { count: c }) if c == count
        ));
        assert_eq!(draw_count(561).unwrap(), 561);
    }

    #[test]
    fn uniform_is_bound_for_both_stages() {
        let [entry] = layout_entries();
        assert_eq!(entry.binding, 0);
        assert_eq!(
            entry.visibility,
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT
        );
        assert!(matches!(
            entry.ty,
            wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                ..
            }
        ));
    }

    #[test]
    fn shader_declares_both_position_attributes() {
        assert!(SHADER_SOURCE.contains("@location(0) position: vec3<f32>"));
        assert!(SHADER_SOURCE.contains("@location(1) position_target: vec3<f32>"));
        assert!(SHADER_SOURCE.contains("mix(position, position_target"));
    }
}
