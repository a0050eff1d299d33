//! Input handling: event types, held movement keys, and the input
//! processor that converts raw window events into engine commands.

/// Platform-agnostic input events.
pub mod event;
/// Bindable key actions and held movement-key state.
pub mod keyboard;
/// Virtual pointer accumulated from raw mouse motion.
pub mod pointer;
/// Converts raw events into engine commands.
pub mod processor;

pub use event::InputEvent;
pub use keyboard::{KeyAction, MovementKeys};
pub use pointer::VirtualPointer;
pub use processor::InputProcessor;
