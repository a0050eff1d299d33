//! Input dispatch for CubeEngine

use super::{Command, CubeEngine};
use crate::input::InputEvent;

impl CubeEngine {
    /// Process a platform-agnostic input event.
    ///
    /// Cursor motion drives mouse look, movement keys update the held state
    /// read by [`update`](Self::update), and focus loss releases every key.
    ///
    /// Returns `true` if the user asked to exit.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        self.input
            .handle_event(event)
            .is_some_and(|command| self.execute(command))
    }

    /// Execute a single command. Returns `true` for [`Command::Exit`].
    pub fn execute(&mut self, command: Command) -> bool {
        match command {
            Command::Look { x, y } => {
                self.camera_controller
                    .camera_mut()
                    .apply_pointer_delta(x, y);
                false
            }
            Command::Exit => {
                log::info!("exit requested");
                true
            }
        }
    }
}
