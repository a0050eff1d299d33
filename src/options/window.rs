use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Window", inline)]
#[serde(default)]
/// Window and presentation settings.
pub struct WindowOptions {
    /// Window title.
    #[schemars(skip)]
    pub title: String,
    /// Initial inner width in logical pixels.
    #[schemars(skip)]
    pub width: u32,
    /// Initial inner height in logical pixels.
    #[schemars(skip)]
    pub height: u32,
    /// Wait for vertical blank before presenting.
    #[schemars(title = "VSync")]
    pub vsync: bool,
    /// Background color (linear RGBA).
    #[schemars(title = "Clear Color")]
    pub clear_color: [f32; 4],
    /// Hide the pointer and keep it inside the window for mouse look.
    #[schemars(title = "Grab Cursor")]
    pub grab_cursor: bool,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            title: "flycam".into(),
            width: 800,
            height: 600,
            vsync: true,
            clear_color: [0.2, 0.3, 0.4, 1.0],
            grab_cursor: true,
        }
    }
}

impl WindowOptions {
    /// Clear color as a wgpu color.
    #[must_use]
    pub fn clear_color(&self) -> wgpu::Color {
        let [r, g, b, a] = self.clear_color.map(f64::from);
        wgpu::Color { r, g, b, a }
    }

    /// Present mode matching the vsync setting.
    #[must_use]
    pub fn present_mode(&self) -> wgpu::PresentMode {
        if self.vsync {
            wgpu::PresentMode::Fifo
        } else {
            wgpu::PresentMode::AutoNoVsync
        }
    }
}
