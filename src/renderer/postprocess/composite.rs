//! Composite pass — blends the bloom glow over the scene and tone maps.
//!
//! The geometry pass renders into this pass's intermediate color texture;
//! the composite adds the blurred bloom scaled by strength, applies ACES
//! filmic tone mapping with exposure, and writes to the swapchain (sRGB
//! encoding is handled by the surface format).

use wgpu::util::DeviceExt;

use super::screen_pass::ScreenPass;
use crate::gpu::pipeline_helpers::{
    create_screen_space_pipeline, filtering_sampler, linear_sampler,
    texture_2d, uniform_buffer,
};
use crate::gpu::render_context::RenderContext;

/// Composite parameters — must match the WGSL struct.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CompositeParams {
    /// Exposure multiplier applied before tone mapping.
    pub exposure: f32,
    /// Bloom blend strength.
    pub bloom_strength: f32,
    /// Padding for GPU alignment.
    pub _pad: [f32; 2],
}

impl Default for CompositeParams {
    fn default() -> Self {
        Self {
            exposure: 1.0,
            bloom_strength: 3.5,
            _pad: [0.0; 2],
        }
    }
}

/// Composite pass renderer.
pub struct CompositePass {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    sampler: wgpu::Sampler,

    /// Intermediate scene color texture (geometry renders here instead of
    /// the swapchain).
    pub color_texture: wgpu::Texture,
    /// View into the intermediate color texture.
    pub color_view: wgpu::TextureView,

    /// Composite effect parameters.
    pub params: CompositeParams,
    params_buffer: wgpu::Buffer,
}

impl CompositePass {
    /// Create the pass and its intermediate scene color target.
    pub fn new(
        context: &RenderContext,
        bloom_view: &wgpu::TextureView,
    ) -> Self {
        let (color_texture, color_view) = Self::create_color_texture(
            context,
            context.width(),
            context.height(),
        );

        let sampler = linear_sampler(&context.device, "Composite Sampler");

        let params = CompositeParams::default();
        let params_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Composite Params Buffer"),
                contents: bytemuck::cast_slice(&[params]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let bind_group_layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Composite Bind Group Layout"),
                entries: &[
                    texture_2d(0),
                    texture_2d(1),
                    filtering_sampler(2),
                    uniform_buffer(3),
                ],
            },
        );

        let bind_group = Self::create_bind_group(
            context,
            &bind_group_layout,
            &color_view,
            bloom_view,
            &sampler,
            &params_buffer,
        );

        let shader = context.device.create_shader_module(
            wgpu::ShaderModuleDescriptor {
                label: Some("Composite Shader"),
                source: wgpu::ShaderSource::Wgsl(
                    include_str!(
                        "../../../assets/shaders/screen/composite.wgsl"
                    )
                    .into(),
                ),
            },
        );
        let pipeline = create_screen_space_pipeline(
            &context.device,
            "Composite",
            &shader,
            context.format(),
            None,
            &[&bind_group_layout],
        );

        Self {
            pipeline,
            bind_group_layout,
            bind_group,
            sampler,
            color_texture,
            color_view,
            params,
            params_buffer,
        }
    }

    fn create_color_texture(
        context: &RenderContext,
        width: u32,
        height: u32,
    ) -> (wgpu::Texture, wgpu::TextureView) {
        let texture = context.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Scene Color Texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba16Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        (texture, view)
    }

    fn create_bind_group(
        context: &RenderContext,
        layout: &wgpu::BindGroupLayout,
        color_view: &wgpu::TextureView,
        bloom_view: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
        params_buffer: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        context
            .device
            .create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Composite Bind Group"),
                layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(
                            color_view,
                        ),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::TextureView(
                            bloom_view,
                        ),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: wgpu::BindingResource::Sampler(sampler),
                    },
                    wgpu::BindGroupEntry {
                        binding: 3,
                        resource: params_buffer.as_entire_binding(),
                    },
                ],
            })
    }

    /// Recreate the bind group against the current color texture and the
    /// given bloom view (used when bloom's output texture is recreated).
    pub fn rebind(
        &mut self,
        context: &RenderContext,
        bloom_view: &wgpu::TextureView,
    ) {
        self.bind_group = Self::create_bind_group(
            context,
            &self.bind_group_layout,
            &self.color_view,
            bloom_view,
            &self.sampler,
            &self.params_buffer,
        );
    }

    /// Flush the current params to the GPU buffer.
    pub fn flush_params(&self, queue: &wgpu::Queue) {
        queue.write_buffer(
            &self.params_buffer,
            0,
            bytemuck::cast_slice(&[self.params]),
        );
    }

    /// Encode the composite into the given (swapchain) view.
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        output_view: &wgpu::TextureView,
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Composite Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: output_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            ..Default::default()
        });
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.draw(0..3, 0..1);
    }
}

impl ScreenPass for CompositePass {
    fn resize(
        &mut self,
        context: &RenderContext,
        input_view: &wgpu::TextureView,
    ) {
        let (color_texture, color_view) = Self::create_color_texture(
            context,
            context.width(),
            context.height(),
        );
        self.color_texture = color_texture;
        self.color_view = color_view;

        self.bind_group = Self::create_bind_group(
            context,
            &self.bind_group_layout,
            &self.color_view,
            input_view,
            &self.sampler,
            &self.params_buffer,
        );
    }
}
