use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::{Camera, Projection};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Initial camera placement, projection and control parameters.
pub struct CameraOptions {
    /// Initial eye position in world space.
    #[schemars(skip)]
    pub position: [f32; 3],
    /// Initial yaw in degrees (-90 looks down -Z).
    #[schemars(title = "Yaw", range(min = -180.0, max = 180.0), extend("step" = 1.0))]
    pub yaw: f32,
    /// Initial pitch in degrees, clamped to [-89, 89].
    #[schemars(title = "Pitch", range(min = -89.0, max = 89.0), extend("step" = 1.0))]
    pub pitch: f32,
    /// Mouse-look sensitivity in degrees per pixel.
    #[schemars(title = "Sensitivity", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub sensitivity: f32,
    /// Translation speed in world units per second.
    #[schemars(title = "Move Speed", range(min = 0.1, max = 20.0), extend("step" = 0.1))]
    pub move_speed: f32,
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 3.0],
            yaw: -90.0,
            pitch: 0.0,
            sensitivity: 0.1,
            move_speed: 2.5,
            fovy: 45.0,
            znear: 0.1,
            zfar: 100.0,
        }
    }
}

impl CameraOptions {
    /// Build a camera at the configured starting pose.
    #[must_use]
    pub fn build_camera(&self) -> Camera {
        Camera::new(self.position.into(), self.yaw, self.pitch)
            .with_sensitivity(self.sensitivity)
    }

    /// Build a projection for a viewport of the given size.
    #[must_use]
    pub fn build_projection(&self, width: u32, height: u32) -> Projection {
        let mut projection = Projection {
            fovy: self.fovy,
            znear: self.znear,
            zfar: self.zfar,
            ..Projection::default()
        };
        projection.set_viewport(width, height);
        projection
    }
}
