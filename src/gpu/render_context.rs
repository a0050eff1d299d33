use std::fmt;

use super::texture::DepthTexture;

/// Why the window could not be turned into a drawable surface.
#[derive(Debug)]
pub enum RenderContextError {
    /// The window handle could not back a wgpu surface.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No adapter can present to the window.
    AdapterRequest(wgpu::RequestAdapterError),
    /// The adapter refused a device with default limits.
    DeviceRequest(wgpu::RequestDeviceError),
    /// The adapter exposes no configuration for the window surface.
    UnsupportedSurface {
        /// Name reported by the rejected adapter.
        adapter: String,
    },
}

impl fmt::Display for RenderContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SurfaceCreation(e) => {
                write!(f, "cannot create a surface for the window: {e}")
            }
            Self::AdapterRequest(e) => {
                write!(f, "no GPU adapter can present to the window: {e}")
            }
            Self::DeviceRequest(e) => {
                write!(f, "cannot open the GPU device: {e}")
            }
            Self::UnsupportedSurface { adapter } => {
                write!(f, "adapter {adapter} cannot configure the window surface")
            }
        }
    }
}

impl std::error::Error for RenderContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SurfaceCreation(e) => Some(e),
            Self::AdapterRequest(e) => Some(e),
            Self::DeviceRequest(e) => Some(e),
            Self::UnsupportedSurface { .. } => None,
        }
    }
}

/// Surface extent for a requested window size: `None` while minimized
/// (either side zero), otherwise clamped to the device's texture limit.
fn surface_extent(width: u32, height: u32, max_dim: u32) -> Option<(u32, u32)> {
    if width == 0 || height == 0 {
        return None;
    }
    Some((width.min(max_dim), height.min(max_dim)))
}

/// One acquired swapchain image plus the encoder recording into it.
///
/// Obtained from [`RenderContext::begin_frame`] and handed back to
/// [`RenderContext::present`].
pub struct Frame {
    surface_texture: wgpu::SurfaceTexture,
    /// Color target for this frame.
    pub view: wgpu::TextureView,
    /// Encoder submitted when the frame is presented.
    pub encoder: wgpu::CommandEncoder,
}

/// The window surface with its device, queue and depth attachment.
///
/// The depth attachment always matches the surface size; both are
/// reconfigured together by [`resize`](Self::resize).
pub struct RenderContext {
    /// The wgpu logical device.
    pub device: wgpu::Device,
    /// The wgpu command queue.
    pub queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    depth: DepthTexture,
}

impl RenderContext {
    /// Open a device that can present to `window` and configure its
    /// surface at `initial_size` with the requested present mode.
    ///
    /// # Errors
    ///
    /// Returns [`RenderContextError`] if the surface, adapter or device
    /// cannot be obtained, or the adapter cannot configure the surface.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        initial_size: (u32, u32),
        present_mode: wgpu::PresentMode,
    ) -> Result<Self, RenderContextError> {
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window)
            .map_err(RenderContextError::SurfaceCreation)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                power_preference: wgpu::PowerPreference::HighPerformance,
                ..Default::default()
            })
            .await
            .map_err(RenderContextError::AdapterRequest)?;

        let info = adapter.get_info();
        log::info!("selected adapter: {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Flycam Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                ..Default::default()
            })
            .await
            .map_err(RenderContextError::DeviceRequest)?;

        let max_dim = device.limits().max_texture_dimension_2d;
        let (width, height) =
            surface_extent(initial_size.0.max(1), initial_size.1.max(1), max_dim)
                .unwrap_or((1, 1));
        let mut config = surface
            .get_default_config(&adapter, width, height)
            .ok_or(RenderContextError::UnsupportedSurface {
                adapter: info.name,
            })?;
        config.present_mode = present_mode;
        surface.configure(&device, &config);

        let depth = DepthTexture::new(&device, width, height);

        Ok(Self {
            device,
            queue,
            surface,
            config,
            depth,
        })
    }

    /// The surface texture format.
    #[must_use]
    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Current surface width in physical pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.config.width
    }

    /// Current surface height in physical pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.config.height
    }

    /// Depth attachment sized to the surface.
    #[must_use]
    pub fn depth_view(&self) -> &wgpu::TextureView {
        &self.depth.view
    }

    /// Reconfigure the surface and depth attachment for a new window size.
    ///
    /// Returns `false` (and changes nothing) for a zero-sized window.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        let max_dim = self.device.limits().max_texture_dimension_2d;
        let Some((width, height)) = surface_extent(width, height, max_dim)
        else {
            return false;
        };
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth = DepthTexture::new(&self.device, width, height);
        true
    }

    /// Switch vsync behaviour. The surface is reconfigured only if the
    /// mode actually changes.
    pub fn set_present_mode(&mut self, mode: wgpu::PresentMode) {
        if self.config.present_mode == mode {
            return;
        }
        log::debug!("present mode {:?} -> {mode:?}", self.config.present_mode);
        self.config.present_mode = mode;
        self.surface.configure(&self.device, &self.config);
    }

    /// Acquire the next swapchain image and start an encoder for it.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the surface is lost, outdated,
    /// or timed out.
    pub fn begin_frame(&self) -> Result<Frame, wgpu::SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder =
            self.device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Frame Encoder"),
                });
        Ok(Frame {
            surface_texture,
            view,
            encoder,
        })
    }

    /// Submit the frame's commands and present its image.
    pub fn present(&self, frame: Frame) {
        let Frame {
            surface_texture,
            encoder,
            ..
        } = frame;
        let _ = self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn zero_sized_window_has_no_extent() {
        assert_eq!(surface_extent(0, 600, 8192), None);
        assert_eq!(surface_extent(800, 0, 8192), None);
    }

    #[test]
    fn extent_is_clamped_to_texture_limit() {
        assert_eq!(surface_extent(800, 600, 8192), Some((800, 600)));
        assert_eq!(surface_extent(10_000, 600, 8192), Some((8192, 600)));
    }

    #[test]
    fn unsupported_surface_names_the_adapter() {
        let err = RenderContextError::UnsupportedSurface {
            adapter: "llvmpipe".to_owned(),
        };
        assert!(err.to_string().contains("llvmpipe"));
        assert!(err.source().is_none());
    }
}
