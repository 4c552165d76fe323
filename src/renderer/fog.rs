//! Exponential-squared fog uniform.

use wgpu::util::DeviceExt;

use crate::gpu::render_context::RenderContext;
use crate::options::FogOptions;

/// GPU uniform for the fog term: `factor = 1 - exp(-(density * d)^2)`
/// where `d` is the fragment's distance to the eye.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FogUniform {
    /// Fog color (the scene fades toward this).
    pub color: [f32; 3],
    /// Fog density.
    pub density: f32,
}

/// Owns the fog uniform buffer and its bind group.
pub struct FogBinding {
    uniform: FogUniform,
    buffer: wgpu::Buffer,
    /// Bind group layout for pipelines that sample fog.
    pub layout: wgpu::BindGroupLayout,
    /// Bind group over the fog buffer.
    pub bind_group: wgpu::BindGroup,
}

impl FogBinding {
    /// Create the fog binding from the configured color and density.
    pub fn new(context: &RenderContext, opts: &FogOptions) -> Self {
        let uniform = FogUniform {
            color: opts.color,
            density: opts.density,
        };

        let buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Fog Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Fog Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            },
        );

        let bind_group =
            context
                .device
                .create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("Fog Bind Group"),
                    layout: &layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffer.as_entire_binding(),
                    }],
                });

        Self {
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }

    /// Push new fog settings to the GPU.
    pub fn update(&mut self, queue: &wgpu::Queue, opts: &FogOptions) {
        self.uniform.color = opts.color;
        self.uniform.density = opts.density;
        queue.write_buffer(
            &self.buffer,
            0,
            bytemuck::cast_slice(&[self.uniform]),
        );
    }
}
