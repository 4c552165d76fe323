//! Bloom post-processing pass — extracts bright pixels and creates a soft
//! glow.
//!
//! Pipeline: threshold extraction to a half-resolution target, then a
//! separable Gaussian blur (ping-pong). The composite pass samples the
//! blurred result and adds it on top of the scene, scaled by the bloom
//! strength.

use wgpu::util::DeviceExt;

use super::screen_pass::ScreenPass;
use crate::gpu::pipeline_helpers::{
    create_screen_space_pipeline, filtering_sampler, linear_sampler,
    texture_2d, uniform_buffer,
};
use crate::gpu::render_context::RenderContext;

/// Threshold params — must match WGSL struct.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct ThresholdParams {
    threshold: f32,
    _pad: [f32; 3],
}

/// Blur direction params — must match WGSL struct.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct BlurParams {
    texel_size: [f32; 2],
    horizontal: u32,
    radius: f32,
}

/// Bloom pass state: threshold extraction plus separable blur at half
/// resolution.
pub struct BloomPass {
    threshold_pipeline: wgpu::RenderPipeline,
    threshold_layout: wgpu::BindGroupLayout,
    threshold_bind_group: wgpu::BindGroup,
    threshold_buffer: wgpu::Buffer,

    blur_pipeline: wgpu::RenderPipeline,
    blur_layout: wgpu::BindGroupLayout,
    // [0] horizontal: mip -> ping, [1] vertical: ping -> mip
    blur_bind_groups: [wgpu::BindGroup; 2],
    blur_buffers: [wgpu::Buffer; 2],

    mip_texture: wgpu::Texture,
    mip_view: wgpu::TextureView,
    ping_texture: wgpu::Texture,
    ping_view: wgpu::TextureView,

    sampler: wgpu::Sampler,

    /// Luminance cutoff below which pixels contribute no glow.
    pub threshold: f32,
    /// Blur spread scale (0 = one-texel kernel).
    pub radius: f32,

    width: u32,
    height: u32,
}

impl BloomPass {
    /// Create the pass reading from the given scene color view.
    pub fn new(context: &RenderContext, color_view: &wgpu::TextureView) -> Self {
        let width = context.width();
        let height = context.height();

        let sampler = linear_sampler(&context.device, "Bloom Sampler");

        let threshold = 0.002f32;
        let radius = 0.0f32;

        let threshold_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Bloom Threshold Buffer"),
                contents: bytemuck::cast_slice(&[ThresholdParams {
                    threshold,
                    _pad: [0.0; 3],
                }]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let (mip_texture, mip_view) =
            Self::create_texture(context, width, height, "Bloom Mip");
        let (ping_texture, ping_view) =
            Self::create_texture(context, width, height, "Bloom Ping");

        let threshold_layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Bloom Threshold Layout"),
                entries: &[
                    texture_2d(0),
                    filtering_sampler(1),
                    uniform_buffer(2),
                ],
            },
        );

        let threshold_bind_group = Self::create_io_bind_group(
            context,
            &threshold_layout,
            "Bloom Threshold Bind Group",
            color_view,
            &sampler,
            &threshold_buffer,
        );

        let threshold_shader = context.device.create_shader_module(
            wgpu::ShaderModuleDescriptor {
                label: Some("Bloom Threshold Shader"),
                source: wgpu::ShaderSource::Wgsl(
                    include_str!(
                        "../../../assets/shaders/screen/bloom_threshold.wgsl"
                    )
                    .into(),
                ),
            },
        );
        let threshold_pipeline = create_screen_space_pipeline(
            &context.device,
            "Bloom Threshold",
            &threshold_shader,
            wgpu::TextureFormat::Rgba16Float,
            None,
            &[&threshold_layout],
        );

        let blur_layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Bloom Blur Layout"),
                entries: &[
                    texture_2d(0),
                    filtering_sampler(1),
                    uniform_buffer(2),
                ],
            },
        );

        let blur_shader = context.device.create_shader_module(
            wgpu::ShaderModuleDescriptor {
                label: Some("Bloom Blur Shader"),
                source: wgpu::ShaderSource::Wgsl(
                    include_str!(
                        "../../../assets/shaders/screen/bloom_blur.wgsl"
                    )
                    .into(),
                ),
            },
        );
        let blur_pipeline = create_screen_space_pipeline(
            &context.device,
            "Bloom Blur",
            &blur_shader,
            wgpu::TextureFormat::Rgba16Float,
            None,
            &[&blur_layout],
        );

        let (blur_bind_groups, blur_buffers) = Self::create_blur_resources(
            context,
            &blur_layout,
            &mip_view,
            &ping_view,
            &sampler,
            width,
            height,
            radius,
        );

        Self {
            threshold_pipeline,
            threshold_layout,
            threshold_bind_group,
            threshold_buffer,
            blur_pipeline,
            blur_layout,
            blur_bind_groups,
            blur_buffers,
            mip_texture,
            mip_view,
            ping_texture,
            ping_view,
            sampler,
            threshold,
            radius,
            width,
            height,
        }
    }

    /// Half-resolution Rgba16Float render target.
    fn create_texture(
        context: &RenderContext,
        width: u32,
        height: u32,
        label: &str,
    ) -> (wgpu::Texture, wgpu::TextureView) {
        let texture = context.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: (width / 2).max(1),
                height: (height / 2).max(1),
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

    /// Texture + sampler + uniform bind group, shared shape between the
    /// threshold and blur passes.
    fn create_io_bind_group(
        context: &RenderContext,
        layout: &wgpu::BindGroupLayout,
        label: &str,
        input: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
        params: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        context
            .device
            .create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(input),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(sampler),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: params.as_entire_binding(),
                    },
                ],
            })
    }

    #[allow(clippy::too_many_arguments)]
    fn create_blur_resources(
        context: &RenderContext,
        layout: &wgpu::BindGroupLayout,
        mip_view: &wgpu::TextureView,
        ping_view: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
        width: u32,
        height: u32,
        radius: f32,
    ) -> ([wgpu::BindGroup; 2], [wgpu::Buffer; 2]) {
        let half_w = (width / 2).max(1);
        let half_h = (height / 2).max(1);
        let texel_size = [1.0 / half_w as f32, 1.0 / half_h as f32];

        let make_buffer = |horizontal: u32, label: &str| {
            context.device.create_buffer_init(
                &wgpu::util::BufferInitDescriptor {
                    label: Some(label),
                    contents: bytemuck::cast_slice(&[BlurParams {
                        texel_size,
                        horizontal,
                        radius,
                    }]),
                    usage: wgpu::BufferUsages::UNIFORM
                        | wgpu::BufferUsages::COPY_DST,
                },
            )
        };
        let h_buffer = make_buffer(1, "Bloom Blur H Params");
        let v_buffer = make_buffer(0, "Bloom Blur V Params");

        let h_bg = Self::create_io_bind_group(
            context,
            layout,
            "Bloom Blur H Bind Group",
            mip_view,
            sampler,
            &h_buffer,
        );
        let v_bg = Self::create_io_bind_group(
            context,
            layout,
            "Bloom Blur V Bind Group",
            ping_view,
            sampler,
            &v_buffer,
        );

        ([h_bg, v_bg], [h_buffer, v_buffer])
    }

    /// Full-screen-triangle pass into `target`.
    fn encode_pass(
        encoder: &mut wgpu::CommandEncoder,
        label: &str,
        target: &wgpu::TextureView,
        pipeline: &wgpu::RenderPipeline,
        bind_group: &wgpu::BindGroup,
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
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
        pass.set_pipeline(pipeline);
        pass.set_bind_group(0, bind_group, &[]);
        pass.draw(0..3, 0..1);
    }

    /// Render the bloom chain: threshold → blur H → blur V.
    pub fn render(&self, encoder: &mut wgpu::CommandEncoder) {
        Self::encode_pass(
            encoder,
            "Bloom Threshold",
            &self.mip_view,
            &self.threshold_pipeline,
            &self.threshold_bind_group,
        );
        Self::encode_pass(
            encoder,
            "Bloom Blur H",
            &self.ping_view,
            &self.blur_pipeline,
            &self.blur_bind_groups[0],
        );
        Self::encode_pass(
            encoder,
            "Bloom Blur V",
            &self.mip_view,
            &self.blur_pipeline,
            &self.blur_bind_groups[1],
        );
    }

    /// The blurred bloom texture for the composite pass to sample.
    pub fn output_view(&self) -> &wgpu::TextureView {
        &self.mip_view
    }

    /// Rebind the input color texture without touching the blur chain
    /// (used when the scene color texture is recreated).
    pub fn rebind_input(
        &mut self,
        context: &RenderContext,
        color_view: &wgpu::TextureView,
    ) {
        self.threshold_bind_group = Self::create_io_bind_group(
            context,
            &self.threshold_layout,
            "Bloom Threshold Bind Group",
            color_view,
            &self.sampler,
            &self.threshold_buffer,
        );
    }

    /// Push the current threshold/radius values to the GPU.
    pub fn update_params(&self, queue: &wgpu::Queue) {
        queue.write_buffer(
            &self.threshold_buffer,
            0,
            bytemuck::cast_slice(&[ThresholdParams {
                threshold: self.threshold,
                _pad: [0.0; 3],
            }]),
        );
        let half_w = (self.width / 2).max(1);
        let half_h = (self.height / 2).max(1);
        let texel_size = [1.0 / half_w as f32, 1.0 / half_h as f32];
        for (i, buffer) in self.blur_buffers.iter().enumerate() {
            queue.write_buffer(
                buffer,
                0,
                bytemuck::cast_slice(&[BlurParams {
                    texel_size,
                    horizontal: u32::from(i == 0),
                    radius: self.radius,
                }]),
            );
        }
    }
}

impl ScreenPass for BloomPass {
    fn resize(
        &mut self,
        context: &RenderContext,
        input_view: &wgpu::TextureView,
    ) {
        let width = context.width();
        let height = context.height();
        self.width = width;
        self.height = height;

        let (mip_texture, mip_view) =
            Self::create_texture(context, width, height, "Bloom Mip");
        let (ping_texture, ping_view) =
            Self::create_texture(context, width, height, "Bloom Ping");
        self.mip_texture = mip_texture;
        self.mip_view = mip_view;
        self.ping_texture = ping_texture;
        self.ping_view = ping_view;

        self.threshold_bind_group = Self::create_io_bind_group(
            context,
            &self.threshold_layout,
            "Bloom Threshold Bind Group",
            input_view,
            &self.sampler,
            &self.threshold_buffer,
        );

        let (blur_bind_groups, blur_buffers) = Self::create_blur_resources(
            context,
            &self.blur_layout,
            &self.mip_view,
            &self.ping_view,
            &self.sampler,
            width,
            height,
            self.radius,
        );
        self.blur_bind_groups = blur_bind_groups;
        self.blur_buffers = blur_buffers;
    }
}
