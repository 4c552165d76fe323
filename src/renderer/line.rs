//! Wireframe line-list renderer.
//!
//! All scene geometry (tube and boxes) is static line soup baked at build
//! time, so a batch is just an immutable vertex buffer; one pipeline draws
//! every batch.

use wgpu::util::DeviceExt;

use crate::gpu::render_context::RenderContext;

/// One line-list vertex: position plus per-vertex color.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    /// World-space position.
    pub position: [f32; 3],
    /// Linear RGB color.
    pub color: [f32; 3],
}

impl LineVertex {
    /// Build a vertex from a point and color.
    #[must_use]
    pub fn new(position: glam::Vec3, color: [f32; 3]) -> Self {
        Self {
            position: position.to_array(),
            color,
        }
    }
}

/// An uploaded, immutable line batch.
pub struct LineBatch {
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
}

impl LineBatch {
    /// Upload the given vertices. The vertex count must be even (two
    /// vertices per segment); odd trailing vertices are dropped by the
    /// draw range.
    pub fn upload(
        device: &wgpu::Device,
        label: &str,
        vertices: &[LineVertex],
    ) -> Self {
        let vertex_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        Self {
            vertex_buffer,
            vertex_count: (vertices.len() & !1) as u32,
        }
    }

    /// Number of vertices drawn (always even).
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }
}

/// Pipeline for drawing [`LineBatch`]es with depth test and fog.
pub struct LineRenderer {
    pipeline: wgpu::RenderPipeline,
}

impl LineRenderer {
    /// Build the line pipeline against the scene color + depth targets.
    pub fn new(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        fog_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let shader = context.device.create_shader_module(
            wgpu::ShaderModuleDescriptor {
                label: Some("Line Shader"),
                source: wgpu::ShaderSource::Wgsl(
                    include_str!("../../assets/shaders/line.wgsl").into(),
                ),
            },
        );

        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Line Pipeline Layout"),
                bind_group_layouts: &[camera_layout, fog_layout],
                push_constant_ranges: &[],
            },
        );

        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: size_of::<LineVertex>()
                as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0, // position
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 12,
                    shader_location: 1, // color
                },
            ],
        };

        let pipeline = context.device.create_render_pipeline(
            &wgpu::RenderPipelineDescriptor {
                label: Some("Line Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[vertex_layout],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: wgpu::TextureFormat::Rgba16Float,
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::LineList,
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: wgpu::TextureFormat::Depth32Float,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            },
        );

        Self { pipeline }
    }

    /// Draw the given batches into an open render pass.
    pub fn draw(
        &self,
        pass: &mut wgpu::RenderPass<'_>,
        camera_bind_group: &wgpu::BindGroup,
        fog_bind_group: &wgpu::BindGroup,
        batches: &[&LineBatch],
    ) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, camera_bind_group, &[]);
        pass.set_bind_group(1, fog_bind_group, &[]);
        for batch in batches {
            if batch.vertex_count == 0 {
                continue;
            }
            pass.set_vertex_buffer(0, batch.vertex_buffer.slice(..));
            pass.draw(0..batch.vertex_count, 0..1);
        }
    }
}
