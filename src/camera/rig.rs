//! Camera rig combining the path flythrough with manual orbit offset.

use glam::Vec3;
use wgpu::util::DeviceExt;

use crate::camera::core::{Camera, CameraUniform};
use crate::gpu::render_context::RenderContext;
use crate::options::CameraOptions;

/// GPU side of the camera: owns the [`Camera`] state plus its uniform
/// buffer and bind group.
pub struct CameraRig {
    /// Current camera state, rewritten every frame by the flythrough.
    pub camera: Camera,
    /// CPU copy of the uniform contents.
    pub uniform: CameraUniform,
    /// GPU uniform buffer.
    pub buffer: wgpu::Buffer,
    /// Bind group layout (shared with every pipeline that reads the
    /// camera).
    pub layout: wgpu::BindGroupLayout,
    /// Bind group over [`Self::buffer`].
    pub bind_group: wgpu::BindGroup,
}

impl CameraRig {
    /// Create the rig with the configured projection and the initial eye
    /// a few units out on +z, looking at the origin.
    pub fn new(context: &RenderContext, opts: &CameraOptions) -> Self {
        let camera = Camera {
            eye: Vec3::new(0.0, 0.0, opts.initial_distance),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: context.width() as f32 / context.height() as f32,
            fovy: opts.fovy,
            znear: opts.znear,
            zfar: opts.zfar,
        };

        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera);

        let buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX
                        | wgpu::ShaderStages::FRAGMENT,
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
                    label: Some("Camera Bind Group"),
                    layout: &layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffer.as_entire_binding(),
                    }],
                });

        Self {
            camera,
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }

    /// Refresh the uniform from the camera and upload it.
    pub fn update_gpu(&mut self, queue: &wgpu::Queue) {
        self.uniform.update_view_proj(&self.camera);
        queue.write_buffer(
            &self.buffer,
            0,
            bytemuck::cast_slice(&[self.uniform]),
        );
    }

    /// Track a viewport size change; the projection matrix is rebuilt on
    /// the next [`Self::update_gpu`].
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_viewport(width, height);
    }
}
