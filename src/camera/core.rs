use glam::{Mat4, Vec3};

/// Pitch limit in degrees. Keeps `front` away from `world_up` so the
/// right-vector cross product stays well-conditioned.
pub const PITCH_LIMIT: f32 = 89.0;

/// Degrees of rotation per pixel of pointer movement.
pub const DEFAULT_SENSITIVITY: f32 = 0.1;

/// Squared length below which `front x world_up` is treated as zero.
const DEGENERATE_EPSILON: f32 = 1e-8;

/// First-person camera driven by Euler angles.
///
/// Orientation is stored as `yaw`/`pitch` in degrees; the basis vectors
/// (`front`, `right`, `up`) are derived on demand and never cached. All
/// state is private so the pitch clamp holds after every mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    yaw: f32,
    pitch: f32,
    world_up: Vec3,
    sensitivity: f32,
    last_cursor: (f32, f32),
    first_sample: bool,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 3.0), -90.0, 0.0)
    }
}

impl Camera {
    /// Create a camera at `position` looking along (`yaw`, `pitch`) degrees,
    /// with `+Y` as world up. `pitch` is clamped to `[-89, 89]`.
    #[must_use]
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        Self::with_world_up(position, yaw, pitch, Vec3::Y)
    }

    /// Create a camera with an explicit world-up reference.
    ///
    /// `world_up` is normalized; a zero vector falls back to `+Y`.
    #[must_use]
    pub fn with_world_up(
        position: Vec3,
        yaw: f32,
        pitch: f32,
        world_up: Vec3,
    ) -> Self {
        Self {
            position,
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            world_up: world_up.try_normalize().unwrap_or(Vec3::Y),
            sensitivity: DEFAULT_SENSITIVITY,
            last_cursor: (0.0, 0.0),
            first_sample: true,
        }
    }

    /// Replace the pointer sensitivity (degrees per pixel).
    #[must_use]
    pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    /// World-space eye position.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Yaw in degrees.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in degrees, always within `[-89, 89]`.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// The fixed world-up reference vector.
    #[must_use]
    pub fn world_up(&self) -> Vec3 {
        self.world_up
    }

    /// Pointer sensitivity in degrees per pixel.
    #[must_use]
    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    /// `false` until the first pointer sample has been recorded.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        !self.first_sample
    }

    /// Viewing direction from yaw and pitch (spherical to Cartesian).
    ///
    /// `yaw = -90, pitch = 0` looks down `-Z`.
    #[must_use]
    pub fn derive_front(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.to_radians().sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.to_radians().sin_cos();
        Vec3::new(cos_pitch * cos_yaw, sin_pitch, cos_pitch * sin_yaw)
            .normalize()
    }

    /// Camera-space right vector, `front x world_up`.
    ///
    /// The operand order is `front x world_up`, not `world_up x front`, so
    /// the result points to the viewer's right in this right-handed basis.
    /// If `front` is parallel to `world_up` the cross product vanishes; the
    /// horizontal right implied by yaw alone is used instead.
    #[must_use]
    pub fn derive_right(&self) -> Vec3 {
        let right = self.derive_front().cross(self.world_up);
        if right.length_squared() > DEGENERATE_EPSILON {
            return right.normalize();
        }
        let (sin_yaw, cos_yaw) = self.yaw.to_radians().sin_cos();
        Vec3::new(-sin_yaw, 0.0, cos_yaw)
    }

    /// Camera-space up vector, `right x front`.
    #[must_use]
    pub fn derive_up(&self) -> Vec3 {
        self.derive_right().cross(self.derive_front()).normalize()
    }

    /// Right-handed view matrix looking from `position` along `front`.
    ///
    /// Uses the derived up vector rather than `world_up`, so the matrix
    /// stays finite when `front` is parallel to `world_up`.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.derive_front(), self.derive_up())
    }

    /// Feed one absolute pointer sample (screen pixels, y down).
    ///
    /// The very first sample is only recorded. Subsequent samples rotate
    /// the camera by the scaled delta; moving the pointer up raises pitch.
    pub fn apply_pointer_delta(&mut self, x: f32, y: f32) {
        if self.first_sample {
            self.last_cursor = (x, y);
            self.first_sample = false;
            return;
        }

        let (last_x, last_y) = self.last_cursor;
        let dx = x - last_x;
        let dy = last_y - y;
        self.last_cursor = (x, y);

        self.yaw += dx * self.sensitivity;
        self.pitch =
            (self.pitch + dy * self.sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Move the eye `distance` units along `direction`.
    pub fn apply_translation(&mut self, direction: Vec3, distance: f32) {
        self.position += direction * distance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn sample_orientations() -> impl Iterator<Item = (f32, f32)> {
        (-8..=8).flat_map(|i| {
            (-8..=8).map(move |j| (i as f32 * 45.0, j as f32 * 11.0))
        })
    }

    #[test]
    fn default_looks_down_negative_z() {
        let cam = Camera::new(Vec3::new(0.0, 0.0, 3.0), -90.0, 0.0);
        assert!(cam.derive_front().abs_diff_eq(Vec3::NEG_Z, EPS));
        assert!(cam.derive_right().abs_diff_eq(Vec3::X, EPS));
        assert!(cam.derive_up().abs_diff_eq(Vec3::Y, EPS));
    }

    #[test]
    fn basis_is_orthonormal() {
        for (yaw, pitch) in sample_orientations() {
            let cam = Camera::new(Vec3::ZERO, yaw, pitch);
            let (f, r, u) =
                (cam.derive_front(), cam.derive_right(), cam.derive_up());
            assert!((f.length() - 1.0).abs() < EPS, "front at {yaw},{pitch}");
            assert!((r.length() - 1.0).abs() < EPS, "right at {yaw},{pitch}");
            assert!((u.length() - 1.0).abs() < EPS, "up at {yaw},{pitch}");
            assert!(f.dot(r).abs() < EPS);
            assert!(f.dot(u).abs() < EPS);
            assert!(r.dot(u).abs() < EPS);
        }
    }

    #[test]
    fn right_falls_back_when_front_is_vertical() {
        let cam = Camera::with_world_up(Vec3::ZERO, -90.0, 0.0, Vec3::NEG_Z);
        let right = cam.derive_right();
        assert!((right.length() - 1.0).abs() < EPS);
        assert!(right.abs_diff_eq(Vec3::X, EPS));
    }

    #[test]
    fn first_sample_only_records() {
        let mut cam = Camera::default();
        assert!(!cam.is_tracking());
        cam.apply_pointer_delta(10_000.0, -5_000.0);
        assert!(cam.is_tracking());
        assert_eq!(cam.yaw(), -90.0);
        assert_eq!(cam.pitch(), 0.0);

        // second sample is relative to the first
        cam.apply_pointer_delta(10_010.0, -5_000.0);
        assert!((cam.yaw() - -89.0).abs() < EPS);
        assert_eq!(cam.pitch(), 0.0);
    }

    #[test]
    fn horizontal_motion_changes_yaw_only() {
        let mut cam = Camera::default();
        cam.apply_pointer_delta(400.0, 300.0);
        cam.apply_pointer_delta(410.0, 300.0);
        assert!((cam.yaw() - -89.0).abs() < EPS);
        assert_eq!(cam.pitch(), 0.0);
    }

    #[test]
    fn pointer_up_raises_pitch() {
        let mut cam = Camera::default();
        cam.apply_pointer_delta(400.0, 300.0);
        cam.apply_pointer_delta(400.0, 280.0);
        assert!((cam.pitch() - 2.0).abs() < EPS);
    }

    #[test]
    fn pitch_clamps_at_limit() {
        let mut cam = Camera::new(Vec3::ZERO, -90.0, 88.0);
        cam.apply_pointer_delta(400.0, 300.0);
        cam.apply_pointer_delta(400.0, 250.0);
        assert_eq!(cam.pitch(), PITCH_LIMIT);
    }

    #[test]
    fn pitch_stays_bounded_under_repeated_motion() {
        let mut cam = Camera::default();
        let mut y = 0.0;
        cam.apply_pointer_delta(0.0, y);
        for step in 0..200 {
            // swing far past both limits
            y += if step < 100 { -173.0 } else { 211.0 };
            cam.apply_pointer_delta(step as f32, y);
            assert!((-PITCH_LIMIT..=PITCH_LIMIT).contains(&cam.pitch()));
        }
        assert_eq!(cam.pitch(), -PITCH_LIMIT);
    }

    #[test]
    fn constructor_clamps_pitch() {
        let cam = Camera::new(Vec3::ZERO, 0.0, 120.0);
        assert_eq!(cam.pitch(), PITCH_LIMIT);
        let cam = Camera::new(Vec3::ZERO, 0.0, -95.0);
        assert_eq!(cam.pitch(), -PITCH_LIMIT);
    }

    #[test]
    fn custom_sensitivity_scales_delta() {
        let mut cam = Camera::default().with_sensitivity(0.5);
        cam.apply_pointer_delta(0.0, 0.0);
        cam.apply_pointer_delta(4.0, 0.0);
        assert!((cam.yaw() - -88.0).abs() < EPS);
    }

    #[test]
    fn translation_round_trips() {
        let mut cam = Camera::new(Vec3::new(1.0, 2.0, 3.0), 30.0, 20.0);
        let start = cam.position();
        let front = cam.derive_front();
        cam.apply_translation(front, 4.25);
        assert!(!cam.position().abs_diff_eq(start, EPS));
        cam.apply_translation(front, -4.25);
        assert!(cam.position().abs_diff_eq(start, EPS));
    }

    #[test]
    fn translations_combine_additively() {
        let mut cam = Camera::default();
        cam.apply_translation(cam.derive_front(), 1.0);
        cam.apply_translation(cam.derive_right(), 2.0);
        assert!(cam.position().abs_diff_eq(Vec3::new(2.0, 0.0, 2.0), EPS));
    }

    #[test]
    fn view_matrix_maps_front_to_negative_z() {
        let cam = Camera::new(Vec3::new(1.0, -2.0, 5.0), 17.0, -33.0);
        let view = cam.view_matrix();
        let eye = view.transform_point3(cam.position());
        assert!(eye.abs_diff_eq(Vec3::ZERO, EPS));
        let ahead = view.transform_point3(cam.position() + cam.derive_front());
        assert!(ahead.abs_diff_eq(Vec3::NEG_Z, 1e-4));
    }

    #[test]
    fn view_matrix_is_finite_when_front_parallels_world_up() {
        let cam = Camera::with_world_up(Vec3::ZERO, 0.0, 0.0, Vec3::X);
        assert!(cam.derive_front().abs_diff_eq(Vec3::X, EPS));
        let view = cam.view_matrix();
        assert!(!view.is_nan());
        let ahead = view.transform_point3(cam.derive_front());
        assert!(ahead.abs_diff_eq(Vec3::NEG_Z, 1e-4));
    }
}
