// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// GPU / graphics casts are intentional
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]

//! First-person fly camera over spinning textured cubes, built on wgpu.
//!
//! The camera is a classic yaw/pitch Euler-angle camera: pointer motion
//! turns it, held keys translate it along its derived basis vectors, and
//! pitch is clamped to +-89 degrees so the basis never degenerates.
//!
//! # Key entry points
//!
//! - [`camera::Camera`] - orientation state and basis/view derivation
//! - [`engine::CubeEngine`] - GPU context, renderer and per-frame update
//! - [`options::Options`] - runtime configuration (window, camera, scene,
//!   keybindings), loadable from TOML
//! - `Viewer` - standalone winit window (feature `viewer`)
//!
//! # Architecture
//!
//! Window events are converted into platform-agnostic
//! [`input::InputEvent`]s, which the [`input::InputProcessor`] turns into
//! [`engine::Command`]s or held movement state. Each frame the engine
//! applies held movement, advances the cube animation, uploads the camera
//! uniform and draws all cubes in one instanced pass.

pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod options;
pub mod renderer;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use camera::Camera;
pub use engine::{Command, CubeEngine};
pub use error::FlycamError;
pub use input::{InputEvent, InputProcessor, KeyAction};
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
