use glam::Mat4;

use super::core::Camera;

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fovy: 45.0,
            aspect: 800.0 / 600.0,
            znear: 0.1,
            zfar: 100.0,
        }
    }
}

impl Projection {
    /// Update the aspect ratio from viewport dimensions. Zero-sized
    /// viewports (minimized windows) are ignored.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Build the projection matrix.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the view and projection matrices.
pub struct CameraUniform {
    /// World-to-view matrix.
    pub view: [[f32; 4]; 4],
    /// View-to-clip matrix.
    pub projection: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Padding for GPU alignment.
    pub(crate) _pad: f32,
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a uniform with identity matrices.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view: Mat4::IDENTITY.to_cols_array_2d(),
            projection: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            _pad: 0.0,
        }
    }

    /// Update uniform fields from the given camera and projection.
    pub fn update(&mut self, camera: &Camera, projection: &Projection) {
        self.view = camera.view_matrix().to_cols_array_2d();
        self.projection = projection.matrix().to_cols_array_2d();
        self.position = camera.position().to_array();
    }
}

#[cfg(test)]
mod tests {
    use glam::{Vec3, Vec4};

    use super::*;

    #[test]
    fn viewport_updates_aspect() {
        let mut proj = Projection::default();
        proj.set_viewport(1920, 1080);
        assert!((proj.aspect - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn zero_viewport_is_ignored() {
        let mut proj = Projection::default();
        let before = proj.aspect;
        proj.set_viewport(0, 600);
        proj.set_viewport(800, 0);
        assert_eq!(proj.aspect, before);
    }

    #[test]
    fn point_in_front_lands_inside_clip_volume() {
        let camera = Camera::default();
        let proj = Projection::default();
        let clip = proj.matrix()
            * camera.view_matrix()
            * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!((0.0..=1.0).contains(&ndc.z));
    }

    #[test]
    fn uniform_tracks_camera() {
        let camera = Camera::new(Vec3::new(1.0, 2.0, 3.0), -90.0, 0.0);
        let proj = Projection::default();
        let mut uniform = CameraUniform::new();
        uniform.update(&camera, &proj);
        assert_eq!(uniform.position, [1.0, 2.0, 3.0]);
        assert_eq!(uniform.view, camera.view_matrix().to_cols_array_2d());
        assert_eq!(size_of::<CameraUniform>() % 16, 0);
    }
}
