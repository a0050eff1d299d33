/// Platform-agnostic input events.
///
/// These are fed into an [`InputProcessor`](super::InputProcessor) which
/// converts them into [`Command`](crate::engine::Command) values.
///
/// # Example
///
/// ```ignore
/// let cmd = input_processor.handle_event(
///     InputEvent::CursorMoved { x: 100.0, y: 200.0 },
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Cursor moved to an absolute position, either the real cursor or a
    /// [`VirtualPointer`](super::VirtualPointer) while the cursor is grabbed.
    CursorMoved {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels (grows downward).
        y: f32,
    },
    /// Keyboard key pressed or released.
    Key {
        /// Physical key name in `winit::keyboard::KeyCode` debug format
        /// (`"KeyW"`, `"Space"`, `"Escape"`, ...).
        key: String,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// The window lost keyboard focus; held keys are released.
    FocusLost,
}

#[cfg(feature = "viewer")]
impl InputEvent {
    /// Build a key event from a winit physical key. Keys winit cannot
    /// identify yield `None`.
    #[must_use]
    pub fn from_physical_key(
        key: winit::keyboard::PhysicalKey,
        pressed: bool,
    ) -> Option<Self> {
        let winit::keyboard::PhysicalKey::Code(code) = key else {
            return None;
        };
        Some(Self::Key {
            key: format!("{code:?}"),
            pressed,
        })
    }
}

#[cfg(all(test, feature = "viewer"))]
mod tests {
    use winit::keyboard::{KeyCode, NativeKeyCode, PhysicalKey};

    use super::*;

    #[test]
    fn physical_key_uses_debug_name() {
        assert_eq!(
            InputEvent::from_physical_key(PhysicalKey::Code(KeyCode::KeyW), true),
            Some(InputEvent::Key {
                key: "KeyW".into(),
                pressed: true
            })
        );
        assert_eq!(
            InputEvent::from_physical_key(
                PhysicalKey::Unidentified(NativeKeyCode::Unidentified),
                false
            ),
            None
        );
    }
}
