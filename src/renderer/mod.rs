//! Scene rendering.
//!
//! The cube renderer owns the pipeline, geometry, textures and depth
//! attachment; the camera uniform is bound by the caller.

pub mod cube;
pub(crate) mod pipeline_util;

pub use cube::CubeRenderer;
