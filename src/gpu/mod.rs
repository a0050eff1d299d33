//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, growable buffers, image and
//! depth textures, and bind group layout helpers.

/// Growable GPU buffers with automatic reallocation.
pub mod dynamic_buffer;
/// Bind group layout and entry helpers.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// Image textures with CPU-built mip chains, and the depth attachment.
pub mod texture;
