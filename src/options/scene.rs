use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Scene", inline)]
#[serde(default)]
/// Cube placement, animation and texturing.
pub struct SceneOptions {
    /// Base texture path.
    #[schemars(skip)]
    pub primary_texture: String,
    /// Overlay texture path, blended on top of the base texture.
    #[schemars(skip)]
    pub secondary_texture: String,
    /// Weight of the overlay texture (0 = base only, 1 = overlay only).
    #[schemars(title = "Texture Mix", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub texture_mix: f32,
    /// Flip decoded images vertically so row 0 is the bottom.
    #[schemars(skip)]
    pub flip_textures: bool,
    /// Spin rate in degrees per second.
    #[schemars(title = "Spin Speed", range(min = 0.0, max = 360.0), extend("step" = 1.0))]
    pub spin_speed: f32,
    /// Axis every cube spins around (normalized on use).
    #[schemars(skip)]
    pub spin_axis: [f32; 3],
    /// Extra rotation in degrees per cube index, so cubes are not in lockstep.
    #[schemars(skip)]
    pub per_cube_angle: f32,
    /// World-space centers of the cubes to draw.
    #[schemars(skip)]
    pub cube_positions: Vec<[f32; 3]>,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            primary_texture: "assets/textures/container.jpg".into(),
            secondary_texture: "assets/textures/awesomeface.png".into(),
            texture_mix: 0.2,
            flip_textures: true,
            spin_speed: 40.0,
            spin_axis: [0.5, 1.0, 0.0],
            per_cube_angle: 20.0,
            cube_positions: vec![[0.0, 0.0, 0.0]],
        }
    }
}
