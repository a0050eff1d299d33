use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::Camera;

/// Engine-level actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// move_forward = "KeyW"
/// exit = "Escape"
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Fly along the view direction.
    MoveForward,
    /// Fly against the view direction.
    MoveBackward,
    /// Strafe to the camera's left.
    StrafeLeft,
    /// Strafe to the camera's right.
    StrafeRight,
    /// Rise along the camera's up vector.
    MoveUp,
    /// Sink along the camera's up vector.
    MoveDown,
    /// Close the viewer.
    Exit,
}

impl KeyAction {
    /// Whether this action is held (movement) rather than triggered once.
    #[must_use]
    pub fn is_movement(self) -> bool {
        !matches!(self, Self::Exit)
    }
}

/// Held state of the six movement keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementKeys {
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,
    up: bool,
    down: bool,
}

impl MovementKeys {
    /// Record a press or release. Non-movement actions are ignored.
    pub fn set(&mut self, action: KeyAction, pressed: bool) {
        let slot = match action {
            KeyAction::MoveForward => &mut self.forward,
            KeyAction::MoveBackward => &mut self.backward,
            KeyAction::StrafeLeft => &mut self.left,
            KeyAction::StrafeRight => &mut self.right,
            KeyAction::MoveUp => &mut self.up,
            KeyAction::MoveDown => &mut self.down,
            KeyAction::Exit => return,
        };
        *slot = pressed;
    }

    /// Release every key (e.g. when the window loses focus).
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether any movement key is held.
    #[must_use]
    pub fn any(&self) -> bool {
        *self != Self::default()
    }

    /// Unit directions to translate along this frame, one per held key.
    ///
    /// Opposing keys both yield a direction, so they cancel once applied.
    pub fn directions(&self, camera: &Camera) -> impl Iterator<Item = Vec3> {
        let front = camera.derive_front();
        let right = camera.derive_right();
        let up = camera.derive_up();
        [
            (self.forward, front),
            (self.backward, -front),
            (self.left, -right),
            (self.right, right),
            (self.up, up),
            (self.down, -up),
        ]
        .into_iter()
        .filter_map(|(held, dir)| held.then_some(dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_keys_yield_camera_directions() {
        let camera = Camera::default();
        let mut keys = MovementKeys::default();
        assert!(!keys.any());
        assert_eq!(keys.directions(&camera).count(), 0);

        keys.set(KeyAction::MoveForward, true);
        keys.set(KeyAction::StrafeRight, true);
        let dirs: Vec<Vec3> = keys.directions(&camera).collect();
        assert_eq!(dirs.len(), 2);
        assert!(dirs[0].abs_diff_eq(Vec3::NEG_Z, 1e-5));
        assert!(dirs[1].abs_diff_eq(Vec3::X, 1e-5));
    }

    #[test]
    fn opposing_keys_cancel() {
        let camera = Camera::new(Vec3::ZERO, 12.0, 34.0);
        let mut keys = MovementKeys::default();
        keys.set(KeyAction::MoveUp, true);
        keys.set(KeyAction::MoveDown, true);
        let sum: Vec3 = keys.directions(&camera).sum();
        assert!(sum.abs_diff_eq(Vec3::ZERO, 1e-6));
    }

    #[test]
    fn release_and_clear() {
        let mut keys = MovementKeys::default();
        keys.set(KeyAction::StrafeLeft, true);
        keys.set(KeyAction::StrafeLeft, false);
        assert!(!keys.any());

        keys.set(KeyAction::MoveBackward, true);
        keys.set(KeyAction::Exit, true);
        assert!(keys.any());
        keys.clear();
        assert!(!keys.any());
    }
}
