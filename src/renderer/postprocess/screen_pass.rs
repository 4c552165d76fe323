//! Shared trait for full-screen post-process passes.

/// Common surface of full-screen post-process passes.
pub trait ScreenPass {
    /// Recreate resolution-dependent resources after a surface resize.
    fn resize(
        &mut self,
        context: &crate::gpu::render_context::RenderContext,
        input_view: &wgpu::TextureView,
    );
}
