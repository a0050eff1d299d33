//! Standalone window backed by winit.
//!
//! ```no_run
//! # use flycam::Viewer;
//! Viewer::builder()
//!     .with_title("cubes")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{DeviceEvent, DeviceId, ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{CursorGrabMode, Window, WindowId},
};

use crate::input::VirtualPointer;
use crate::{error::FlycamError, options::Options, CubeEngine, InputEvent};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Options,
    title: Option<String>,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            options: Options::default(),
            title: None,
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Set the window title, overriding `options.window.title`.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(mut self) -> Viewer {
        if let Some(title) = self.title {
            self.options.window.title = title;
        }
        Viewer {
            options: self.options,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window showing the cube scene through a fly camera.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed or the exit key is pressed.
    ///
    /// # Errors
    ///
    /// Returns [`FlycamError::Viewer`] if the event loop or window cannot
    /// be created, and the engine's error if GPU setup fails.
    pub fn run(self) -> Result<(), FlycamError> {
        let event_loop =
            EventLoop::new().map_err(|e| FlycamError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            options: Some(self.options),
            failure: None,
            grabbed: false,
            pointer: VirtualPointer::default(),
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| FlycamError::Viewer(e.to_string()))?;

        app.failure.map_or(Ok(()), Err)
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<CubeEngine>,
    /// Options until the engine takes ownership of them.
    options: Option<Options>,
    /// Fatal startup error, reported once the loop exits.
    failure: Option<FlycamError>,
    /// Whether the cursor is currently grabbed. Mouse look then comes from
    /// raw device motion instead of window cursor positions.
    grabbed: bool,
    pointer: VirtualPointer,
}

/// Compute the wgpu surface size, never zero.
fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

/// Hide the pointer and keep it inside the window. Confinement is tried
/// first; platforms without it (macOS) fall back to locking.
///
/// Returns `false` if neither mode is available.
fn grab_cursor(window: &Window) -> bool {
    let grabbed = window
        .set_cursor_grab(CursorGrabMode::Confined)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked));
    window.set_cursor_visible(false);
    match grabbed {
        Ok(()) => true,
        Err(e) => {
            log::warn!("cursor grab unavailable: {e}");
            false
        }
    }
}

impl ViewerApp {
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: FlycamError) {
        log::error!("{error}");
        self.failure = Some(error);
        event_loop.exit();
    }

    fn grab_enabled(&self) -> bool {
        self.engine
            .as_ref()
            .is_some_and(|e| e.options().window.grab_cursor)
    }

    fn forward(&mut self, event_loop: &ActiveEventLoop, input: &InputEvent) {
        if let Some(engine) = &mut self.engine {
            if engine.handle_input(input) {
                event_loop.exit();
            }
        }
    }

    fn redraw(&mut self) {
        let (Some(window), Some(engine)) = (&self.window, &mut self.engine)
        else {
            return;
        };

        let _ = engine.advance_frame();
        match engine.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                let (w, h) = viewport_size(window.inner_size());
                engine.resize(w, h);
            }
            Err(e) => {
                log::error!("render error: {e:?}");
            }
        }
        window.request_redraw();
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let Some(options) = self.options.take() else {
            return;
        };

        let attrs = Window::default_attributes()
            .with_title(&options.window.title)
            .with_inner_size(LogicalSize::new(
                options.window.width,
                options.window.height,
            ));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                self.fail(event_loop, FlycamError::Viewer(e.to_string()));
                return;
            }
        };

        let grab = options.window.grab_cursor;
        let size = viewport_size(window.inner_size());
        let engine = match pollster::block_on(CubeEngine::new(
            window.clone(),
            size,
            options,
        )) {
            Ok(e) => e,
            Err(e) => {
                self.fail(event_loop, e);
                return;
            }
        };

        self.grabbed = grab && grab_cursor(&window);

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        // Guard: both window and engine must be initialised.
        if self.window.is_none() || self.engine.is_none() {
            return;
        }

        let input = match event {
            WindowEvent::Resized(size) => {
                let (w, h) = viewport_size(size);
                if let Some(engine) = &mut self.engine {
                    engine.resize(w, h);
                }
                None
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
                None
            }
            WindowEvent::CursorMoved { .. } if self.grabbed => None,
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer.set_position(position.x, position.y);
                Some(InputEvent::CursorMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                })
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.repeat {
                    return;
                }
                InputEvent::from_physical_key(
                    event.physical_key,
                    event.state == ElementState::Pressed,
                )
            }
            WindowEvent::Focused(false) => {
                self.grabbed = false;
                Some(InputEvent::FocusLost)
            }
            WindowEvent::Focused(true) => {
                if self.grab_enabled() {
                    if let Some(window) = &self.window {
                        self.grabbed = grab_cursor(window);
                    }
                }
                None
            }
            _ => None,
        };

        if let Some(input) = input {
            self.forward(event_loop, &input);
        }
    }

    fn device_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: DeviceId,
        event: DeviceEvent,
    ) {
        if !self.grabbed {
            return;
        }
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            let input = self.pointer.accumulate(dx, dy);
            self.forward(event_loop, &input);
        }
    }
}
