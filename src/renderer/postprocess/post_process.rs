//! Owns the post-processing pipeline: depth buffer, bloom, and composite.

use super::bloom::BloomPass;
use super::composite::CompositePass;
use super::screen_pass::ScreenPass;
use crate::gpu::render_context::RenderContext;
use crate::options::PostProcessingOptions;

/// Full post-processing stack for the background: geometry renders into
/// the composite's color texture, bloom extracts and blurs the bright
/// wireframe edges, and the composite tone maps onto the swapchain.
pub struct PostProcessStack {
    /// Depth buffer for the geometry pass.
    pub depth_texture: wgpu::Texture,
    /// View into the depth buffer.
    pub depth_view: wgpu::TextureView,
    /// Bloom extraction + blur pass.
    pub bloom_pass: BloomPass,
    /// Final composite pass.
    pub composite_pass: CompositePass,
}

impl PostProcessStack {
    /// Build the stack (depth texture + both passes) and wire the bloom
    /// input to the composite's color texture.
    pub fn new(context: &RenderContext) -> Self {
        let (depth_texture, depth_view) = Self::create_depth_texture(context);

        // The two passes reference each other's textures: bloom reads the
        // scene color the composite owns, the composite reads bloom's
        // output. Bloom is created against a placeholder first, then
        // rebound.
        let (placeholder, placeholder_view) =
            Self::create_placeholder_color(context);
        let mut bloom_pass = BloomPass::new(context, &placeholder_view);
        let composite_pass =
            CompositePass::new(context, bloom_pass.output_view());
        bloom_pass.rebind_input(context, &composite_pass.color_view);
        drop(placeholder);

        Self {
            depth_texture,
            depth_view,
            bloom_pass,
            composite_pass,
        }
    }

    /// Recreate all resolution-dependent resources.
    pub fn resize(&mut self, context: &RenderContext) {
        let (depth_texture, depth_view) = Self::create_depth_texture(context);
        self.depth_texture = depth_texture;
        self.depth_view = depth_view;

        // Composite first (new scene color texture), then bloom against
        // it, then rebind the composite to bloom's recreated output.
        let old_bloom = self.bloom_pass.output_view().clone();
        self.composite_pass.resize(context, &old_bloom);
        self.bloom_pass
            .resize(context, &self.composite_pass.color_view);
        self.composite_pass
            .rebind(context, self.bloom_pass.output_view());
    }

    /// Run bloom then composite into the swapchain view.
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        final_view: &wgpu::TextureView,
    ) {
        self.bloom_pass.render(encoder);
        self.composite_pass.render(encoder, final_view);
    }

    /// Push post-processing option values to the GPU.
    pub fn apply_options(
        &mut self,
        options: &PostProcessingOptions,
        queue: &wgpu::Queue,
    ) {
        self.bloom_pass.threshold = options.bloom_threshold;
        self.bloom_pass.radius = options.bloom_radius;
        self.bloom_pass.update_params(queue);

        self.composite_pass.params.exposure = options.exposure;
        self.composite_pass.params.bloom_strength = options.bloom_strength;
        self.composite_pass.flush_params(queue);
    }

    /// The color texture view the geometry pass renders into.
    pub fn color_view(&self) -> &wgpu::TextureView {
        &self.composite_pass.color_view
    }

    fn create_depth_texture(
        context: &RenderContext,
    ) -> (wgpu::Texture, wgpu::TextureView) {
        let texture = context.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: context.width(),
                height: context.height(),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        (texture, view)
    }

    /// 1x1 stand-in texture used only while wiring up pass inputs.
    fn create_placeholder_color(
        context: &RenderContext,
    ) -> (wgpu::Texture, wgpu::TextureView) {
        let texture = context.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Placeholder Color"),
            size: wgpu::Extent3d {
                width: 1,
                height: 1,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba16Float,
            usage: wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        (texture, view)
    }
}
