//! Discrete operations the engine performs in response to input.
//!
//! Held movement keys are not commands; they are polled once per frame from
//! [`MovementKeys`](crate::input::MovementKeys).

/// An operation produced by the
/// [`InputProcessor`](crate::input::InputProcessor).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Feed an absolute pointer position to the camera's mouse look.
    Look {
        /// Pointer x in window pixels.
        x: f32,
        /// Pointer y in window pixels, growing downwards.
        y: f32,
    },
    /// Close the viewer.
    Exit,
}
