//! First-person camera.
//!
//! [`Camera`] holds the yaw/pitch state and the basis math, [`Projection`]
//! the perspective parameters, and [`CameraController`] the GPU uniform
//! they feed.

/// Camera uniform buffer and bind group management.
pub mod controller;
/// Euler-angle camera state and basis derivation.
pub mod core;
/// Perspective projection and the GPU uniform layout.
pub mod projection;

pub use self::controller::CameraController;
pub use self::core::Camera;
pub use self::projection::{CameraUniform, Projection};
