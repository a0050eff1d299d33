//! Converts raw platform events into engine commands.
//!
//! The `InputProcessor` owns all transient input state (held movement keys)
//! and the key-binding map. It is the only thing that sits between raw
//! window events and the engine's
//! [`handle_input`](crate::engine::CubeEngine::handle_input) method.

use super::event::InputEvent;
use super::keyboard::{KeyAction, MovementKeys};
use crate::engine::Command;
use crate::options::KeybindingOptions;

/// Converts raw window events into [`Command`]s.
///
/// Movement keys are *held* state rather than commands: the engine polls
/// [`movement`](Self::movement) once per frame and translates the camera
/// for every key that is down.
///
/// # Usage
///
/// ```ignore
/// if let Some(cmd) = input_processor.handle_event(event) {
///     engine.execute(cmd);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InputProcessor {
    /// Movement keys currently held.
    movement: MovementKeys,
    /// Key string → action mapping.
    key_bindings: KeybindingOptions,
}

impl InputProcessor {
    /// Create a new processor with default key bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a processor with custom key bindings.
    #[must_use]
    pub fn with_key_bindings(key_bindings: KeybindingOptions) -> Self {
        Self {
            key_bindings,
            ..Self::new()
        }
    }

    /// Movement keys currently held.
    #[must_use]
    pub fn movement(&self) -> &MovementKeys {
        &self.movement
    }

    /// Read-only access to the key bindings.
    #[must_use]
    pub fn key_bindings(&self) -> &KeybindingOptions {
        &self.key_bindings
    }

    /// Replace the key bindings. Held keys are released, since the keys
    /// that pressed them may no longer be bound.
    pub fn set_key_bindings(&mut self, key_bindings: KeybindingOptions) {
        self.key_bindings = key_bindings;
        self.movement.clear();
    }

    /// Process a raw input event and return zero or one commands.
    pub fn handle_event(&mut self, event: &InputEvent) -> Option<Command> {
        match *event {
            InputEvent::CursorMoved { x, y } => Some(Command::Look { x, y }),
            InputEvent::Key { ref key, pressed } => {
                self.handle_key(key, pressed)
            }
            InputEvent::FocusLost => {
                self.movement.clear();
                None
            }
        }
    }

    /// Key press/release — update held movement or trigger an action.
    fn handle_key(&mut self, key: &str, pressed: bool) -> Option<Command> {
        let Some(action) = self.key_bindings.lookup(key) else {
            log::debug!("unbound key {key}");
            return None;
        };

        if action.is_movement() {
            self.movement.set(action, pressed);
            return None;
        }

        match action {
            KeyAction::Exit if pressed => Some(Command::Exit),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(name: &str, pressed: bool) -> InputEvent {
        InputEvent::Key {
            key: name.into(),
            pressed,
        }
    }

    #[test]
    fn cursor_motion_becomes_look() {
        let mut input = InputProcessor::new();
        assert_eq!(
            input.handle_event(&InputEvent::CursorMoved { x: 4.0, y: 2.0 }),
            Some(Command::Look { x: 4.0, y: 2.0 })
        );
    }

    #[test]
    fn movement_keys_are_held_state() {
        let mut input = InputProcessor::new();
        assert_eq!(input.handle_event(&key("KeyW", true)), None);
        assert!(input.movement().any());
        assert_eq!(input.handle_event(&key("KeyW", false)), None);
        assert!(!input.movement().any());
    }

    #[test]
    fn exit_fires_on_press_only() {
        let mut input = InputProcessor::new();
        assert_eq!(input.handle_event(&key("Escape", true)), Some(Command::Exit));
        assert_eq!(input.handle_event(&key("Escape", false)), None);
    }

    #[test]
    fn unbound_keys_are_ignored() {
        let mut input = InputProcessor::new();
        assert_eq!(input.handle_event(&key("KeyZ", true)), None);
        assert!(!input.movement().any());
    }

    #[test]
    fn focus_loss_releases_keys() {
        let mut input = InputProcessor::new();
        let _ = input.handle_event(&key("KeyA", true));
        let _ = input.handle_event(&key("Space", true));
        assert!(input.movement().any());
        assert_eq!(input.handle_event(&InputEvent::FocusLost), None);
        assert!(!input.movement().any());
    }

    #[test]
    fn custom_bindings_are_respected() {
        let mut bindings = KeybindingOptions::default();
        bindings.bind(KeyAction::MoveForward, "ArrowUp");
        let mut input = InputProcessor::with_key_bindings(bindings);
        let _ = input.handle_event(&key("KeyW", true));
        assert!(!input.movement().any());
        let _ = input.handle_event(&key("ArrowUp", true));
        assert!(input.movement().any());

        input.set_key_bindings(KeybindingOptions::default());
        assert!(!input.movement().any());
    }
}
