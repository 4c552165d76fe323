//! The background rendering engine.
//!
//! Owns the GPU context, the scene geometry, both camera motion sources,
//! and the post-processing stack. The hosting window drives it with
//! [`update`](BackgroundEngine::update) + [`render`](BackgroundEngine::render)
//! once per frame and [`resize`](BackgroundEngine::resize) on viewport
//! changes; dropping the engine releases every GPU resource.

use web_time::Instant;

use crate::camera::{CameraRig, Flythrough, OrbitInput};
use crate::error::WormholeError;
use crate::gpu::render_context::RenderContext;
use crate::options::Options;
use crate::renderer::postprocess::PostProcessStack;
use crate::renderer::{FogBinding, LineBatch, LineRenderer};
use crate::scene::spline::TunnelPath;
use crate::scene::TunnelScene;
use crate::util::frame_timing::FrameTiming;

/// Target FPS limit (0 = unlimited; presentation is Fifo-paced).
const TARGET_FPS: u32 = 0;

/// The wormhole background renderer.
///
/// # Construction
///
/// Use [`BackgroundEngine::new`] with any `wgpu::SurfaceTarget` (a winit
/// window, a canvas, ...) and the initial viewport size.
///
/// # Frame loop
///
/// Each frame, call [`update`](Self::update) then [`render`](Self::render).
/// Call [`resize`](Self::resize) when the viewport changes. Mouse input is
/// forwarded via the `handle_*` methods and only nudges the camera — the
/// flythrough stays in charge.
pub struct BackgroundEngine {
    /// Core wgpu device, queue, and surface.
    pub context: RenderContext,

    rig: CameraRig,
    flythrough: Flythrough,
    orbit: OrbitInput,

    fog: FogBinding,
    line_renderer: LineRenderer,
    tube_batch: LineBatch,
    box_batch: LineBatch,
    post_process: PostProcessStack,

    options: Options,
    /// Per-frame timing and FPS tracking.
    pub frame_timing: FrameTiming,
    started: Instant,
}

impl BackgroundEngine {
    /// Engine with default options.
    ///
    /// # Errors
    ///
    /// Returns [`WormholeError`] if GPU initialization fails.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
    ) -> Result<Self, WormholeError> {
        Self::new_with_options(window, size, Options::default()).await
    }

    /// Engine with explicit options.
    ///
    /// # Errors
    ///
    /// Returns [`WormholeError`] if GPU initialization fails.
    pub async fn new_with_options(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: Options,
    ) -> Result<Self, WormholeError> {
        let context = RenderContext::new(window, size).await?;
        Ok(Self::init_with_context(context, options))
    }

    /// Shared construction logic once a context exists.
    fn init_with_context(context: RenderContext, options: Options) -> Self {
        let rig = CameraRig::new(&context, &options.camera);
        let orbit = OrbitInput::new(options.camera.orbit_damping);
        let fog = FogBinding::new(&context, &options.fog);

        let flythrough = Flythrough::new(TunnelPath::course());
        let scene = TunnelScene::build(
            flythrough.path(),
            &options.tunnel,
            &mut rand::rng(),
        );
        let tube_batch = LineBatch::upload(
            &context.device,
            "Tube Wireframe",
            &scene.tube_vertices,
        );
        let box_batch = LineBatch::upload(
            &context.device,
            "Box Wireframes",
            &scene.box_vertices,
        );

        let line_renderer = LineRenderer::new(&context, &rig.layout, &fog.layout);

        let mut post_process = PostProcessStack::new(&context);
        post_process.apply_options(&options.post_processing, &context.queue);

        log::info!(
            "background engine ready: {} tube vertices, {} boxes",
            tube_batch.vertex_count(),
            scene.boxes.len()
        );

        Self {
            context,
            rig,
            flythrough,
            orbit,
            fog,
            line_renderer,
            tube_batch,
            box_batch,
            post_process,
            options,
            frame_timing: FrameTiming::new(TARGET_FPS),
            started: Instant::now(),
        }
    }

    /// Milliseconds elapsed since the engine started.
    pub fn elapsed_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }

    /// Per-frame update: advance the flythrough to the current time, ease
    /// the orbit offset, and upload the camera uniform.
    pub fn update(&mut self) {
        let t_ms = self.elapsed_ms();
        self.flythrough.update(&mut self.rig.camera, t_ms);

        self.orbit.update();
        self.rig.camera.eye =
            self.orbit.apply(self.rig.camera.eye, self.rig.camera.target);

        self.rig.update_gpu(&self.context.queue);
    }

    /// Encode the wireframe geometry pass.
    fn encode_geometry_pass(&self, encoder: &mut wgpu::CommandEncoder) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Wireframe Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: self.post_process.color_view(),
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(
                wgpu::RenderPassDepthStencilAttachment {
                    view: &self.post_process.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                },
            ),
            ..Default::default()
        });

        self.line_renderer.draw(
            &mut pass,
            &self.rig.bind_group,
            &self.fog.bind_group,
            &[&self.tube_batch, &self.box_batch],
        );
    }

    /// Execute one frame: geometry pass, post-process, present.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the swapchain frame cannot be
    /// acquired.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        if !self.frame_timing.should_render() {
            return Ok(());
        }

        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.context.create_encoder();
        self.encode_geometry_pass(&mut encoder);
        self.post_process.render(&mut encoder, &view);
        self.context.submit(encoder);

        frame.present();
        self.frame_timing.end_frame();
        Ok(())
    }

    /// Resize the surface, camera projection, and every post-processing
    /// buffer to the new viewport size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.context.resize(width, height);
            self.rig.resize(width, height);
            self.post_process.resize(&self.context);
        }
    }

    /// Current options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace the options, pushing parameter changes to the GPU and
    /// rebuilding geometry when the tunnel section changed.
    pub fn set_options(&mut self, options: Options) {
        if options.tunnel != self.options.tunnel {
            let scene = TunnelScene::build(
                self.flythrough.path(),
                &options.tunnel,
                &mut rand::rng(),
            );
            self.tube_batch = LineBatch::upload(
                &self.context.device,
                "Tube Wireframe",
                &scene.tube_vertices,
            );
            self.box_batch = LineBatch::upload(
                &self.context.device,
                "Box Wireframes",
                &scene.box_vertices,
            );
        }

        self.fog.update(&self.context.queue, &options.fog);
        self.post_process
            .apply_options(&options.post_processing, &self.context.queue);
        self.options = options;
    }

    /// Press/release of the orbit (left mouse) button.
    pub fn handle_mouse_button(&mut self, pressed: bool) {
        self.orbit.set_dragging(pressed);
    }

    /// Mouse movement delta in pixels.
    pub fn handle_mouse_move(&mut self, dx: f32, dy: f32) {
        self.orbit.handle_mouse_move(dx, dy);
    }

    /// Scroll delta (positive = zoom in).
    pub fn handle_scroll(&mut self, delta: f32) {
        self.orbit.handle_scroll(delta);
    }
}
