//! Frame loop driver: owns the GPU context, camera, renderer and input
//! state, and turns input and elapsed time into rendered frames.

mod command;
mod input;
mod options;

use std::path::Path;

pub use self::command::Command;
use crate::camera::{Camera, CameraController};
use crate::error::FlycamError;
use crate::gpu::render_context::RenderContext;
use crate::gpu::texture::{self, ImageTexture};
use crate::input::InputProcessor;
use crate::options::Options;
use crate::renderer::cube::{self, CubeRenderer};
use crate::util::frame_timing::FrameTiming;

/// Side length of the placeholder checkerboard, in pixels.
const PLACEHOLDER_SIZE: u32 = 64;
/// Side length of one checkerboard cell, in pixels.
const PLACEHOLDER_CELL: u32 = 8;

/// Renders spinning textured cubes seen through a first-person camera.
///
/// # Frame loop
///
/// Forward window events through [`handle_input`](Self::handle_input),
/// then call [`advance_frame`](Self::advance_frame) (or
/// [`update`](Self::update) with an explicit delta) and
/// [`render`](Self::render) once per frame. Call
/// [`resize`](Self::resize) when the window size changes.
pub struct CubeEngine {
    /// Core wgpu device, queue, and surface.
    pub context: RenderContext,
    camera_controller: CameraController,
    renderer: CubeRenderer,
    input: InputProcessor,
    options: Options,
    frame_timing: FrameTiming,
    /// Seconds of spin animation elapsed.
    elapsed: f32,
}

impl CubeEngine {
    /// Create the GPU context, load both textures and build the pipeline.
    ///
    /// A texture that cannot be loaded is replaced by a checkerboard.
    ///
    /// # Errors
    ///
    /// Returns [`FlycamError::Gpu`] if GPU initialization fails.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: Options,
    ) -> Result<Self, FlycamError> {
        let context =
            RenderContext::new(window, size, options.window.present_mode())
                .await?;
        Self::init_with_context(context, options)
    }

    fn init_with_context(
        context: RenderContext,
        options: Options,
    ) -> Result<Self, FlycamError> {
        let camera = options.camera.build_camera();
        let projection = options
            .camera
            .build_projection(context.width(), context.height());
        let camera_controller =
            CameraController::new(&context, camera, projection);

        let (primary, secondary) = load_textures(&context, &options)?;
        let mut renderer = CubeRenderer::new(
            &context,
            &camera_controller.layout,
            primary,
            secondary,
            options.scene.texture_mix,
        );
        renderer.set_instances(
            &context.device,
            &context.queue,
            &cube::scene_instances(0.0, &options.scene),
        );

        let input =
            InputProcessor::with_key_bindings(options.keybindings.clone());

        Ok(Self {
            context,
            camera_controller,
            renderer,
            input,
            options,
            frame_timing: FrameTiming::new(),
            elapsed: 0.0,
        })
    }

    /// The first-person camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        self.camera_controller.camera()
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.frame_timing.fps()
    }

    /// Measure the time since the previous frame and advance by it.
    ///
    /// Returns the (clamped) delta in seconds.
    pub fn advance_frame(&mut self) -> f32 {
        let dt = self.frame_timing.tick();
        self.update(dt);
        dt
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Every held movement key translates the camera by `move_speed * dt`
    /// along its direction; directions are taken from the orientation at
    /// the start of the frame, so simultaneous keys add up. The spin clock
    /// advances, and the instance and camera uniforms are refreshed.
    pub fn update(&mut self, dt: f32) {
        let distance = self.options.camera.move_speed * dt;
        let movement = *self.input.movement();
        let camera = self.camera_controller.camera_mut();
        for direction in movement.directions(camera) {
            camera.apply_translation(direction, distance);
        }

        self.elapsed += dt;
        let instances = cube::scene_instances(self.elapsed, &self.options.scene);
        self.renderer.set_instances(
            &self.context.device,
            &self.context.queue,
            &instances,
        );
        self.camera_controller.upload(&self.context.queue);
    }

    /// Reconfigure the surface, depth buffer and projection for a new
    /// window size. Zero-sized dimensions are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if !self.context.resize(width, height) {
            return;
        }
        self.camera_controller
            .resize(self.context.width(), self.context.height());
        self.camera_controller.upload(&self.context.queue);
    }

    /// Draw one frame and present it.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the next swapchain texture cannot
    /// be acquired.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let mut frame = self.context.begin_frame()?;
        self.renderer.render(
            &mut frame.encoder,
            &frame.view,
            self.context.depth_view(),
            self.options.window.clear_color(),
            &self.camera_controller.bind_group,
        );
        self.context.present(frame);
        Ok(())
    }
}

/// Load the primary and secondary textures named in the scene options.
fn load_textures(
    context: &RenderContext,
    options: &Options,
) -> Result<(ImageTexture, ImageTexture), FlycamError> {
    let scene = &options.scene;
    let primary =
        load_texture(context, &scene.primary_texture, scene.flip_textures)?;
    let secondary =
        load_texture(context, &scene.secondary_texture, scene.flip_textures)?;
    Ok((primary, secondary))
}

fn load_texture(
    context: &RenderContext,
    path: &str,
    flip: bool,
) -> Result<ImageTexture, FlycamError> {
    match ImageTexture::from_path(
        &context.device,
        &context.queue,
        Path::new(path),
        flip,
    ) {
        Ok(texture) => Ok(texture),
        Err(e) => {
            log::warn!("{e}; using a placeholder texture");
            let placeholder =
                texture::checkerboard(PLACEHOLDER_SIZE, PLACEHOLDER_CELL);
            Ok(ImageTexture::from_rgba(
                &context.device,
                &context.queue,
                path,
                placeholder,
                false,
            )?)
        }
    }
}
