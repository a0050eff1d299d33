//! Centralized viewer options with TOML preset support.
//!
//! Window, camera, scene and keybinding settings are consolidated here.
//! Options serialize to/from TOML so a preset can be passed to the binary
//! with `--options`.

mod camera;
mod keybindings;
mod scene;
mod window;

use std::path::Path;

pub use camera::CameraOptions;
pub use keybindings::KeybindingOptions;
pub use scene::SceneOptions;
pub use window::WindowOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::FlycamError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[camera]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Window and presentation settings.
    pub window: WindowOptions,
    /// Camera pose, projection and control parameters.
    pub camera: CameraOptions,
    /// Cube placement, animation and texturing.
    pub scene: SceneOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the tunable options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// The options JSON Schema, pretty-printed for `--print-schema`.
    ///
    /// # Errors
    ///
    /// Returns [`FlycamError::OptionsParse`] if the schema cannot be
    /// serialized.
    pub fn json_schema_pretty() -> Result<String, FlycamError> {
        serde_json::to_string_pretty(&Self::json_schema())
            .map_err(|e| FlycamError::OptionsParse(e.to_string()))
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`FlycamError::OptionsParse`] for malformed TOML.
    pub fn from_toml(content: &str) -> Result<Self, FlycamError> {
        let mut opts: Self = toml::from_str(content)
            .map_err(|e| FlycamError::OptionsParse(e.to_string()))?;
        opts.keybindings.rebuild_reverse_map();
        Ok(opts)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`FlycamError::Io`] if the file cannot be read and
    /// [`FlycamError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, FlycamError> {
        let content = std::fs::read_to_string(path).map_err(FlycamError::Io)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed), creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`FlycamError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), FlycamError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| FlycamError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(FlycamError::Io)?;
        }
        std::fs::write(path, content).map_err(FlycamError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyAction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = Options::from_toml(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[camera]
move_speed = 7.5
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.camera.move_speed, 7.5);
        // Everything else should be default
        assert_eq!(opts.camera.sensitivity, 0.1);
        assert_eq!(opts.window.width, 800);
        assert_eq!(opts.window.height, 600);
        assert_eq!(opts.scene.cube_positions, vec![[0.0, 0.0, 0.0]]);
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err = Options::from_toml("[camera]\nyaw = \"left\"").unwrap_err();
        assert!(matches!(err, FlycamError::OptionsParse(_)));
    }

    #[test]
    fn keybinding_lookup() {
        let opts = Options::default();
        assert_eq!(
            opts.keybindings.lookup("KeyW"),
            Some(KeyAction::MoveForward)
        );
        assert_eq!(opts.keybindings.lookup("Escape"), Some(KeyAction::Exit));
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
    }

    #[test]
    fn loaded_keybindings_rebuild_reverse_map() {
        let toml_str = r#"
[keybindings.bindings]
move_forward = "ArrowUp"
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(
            opts.keybindings.lookup("ArrowUp"),
            Some(KeyAction::MoveForward)
        );
        assert_eq!(opts.keybindings.lookup("KeyW"), None);
    }

    #[test]
    fn rebinding_replaces_old_key() {
        let mut bindings = KeybindingOptions::default();
        bindings.bind(KeyAction::Exit, "KeyQ");
        assert_eq!(bindings.lookup("KeyQ"), Some(KeyAction::Exit));
        assert_eq!(bindings.lookup("Escape"), None);
    }

    #[test]
    fn camera_options_build_starting_pose() {
        let opts = CameraOptions {
            pitch: 120.0,
            ..CameraOptions::default()
        };
        let camera = opts.build_camera();
        assert_eq!(camera.pitch(), 89.0);
        assert_eq!(camera.yaw(), -90.0);
        assert_eq!(camera.sensitivity(), 0.1);

        let projection = opts.build_projection(1000, 500);
        assert_eq!(projection.aspect, 2.0);
        assert_eq!(projection.fovy, 45.0);
    }

    #[test]
    fn save_then_load_preset() {
        let dir = std::env::temp_dir()
            .join(format!("flycam-presets-{}", std::process::id()));
        let mut opts = Options::default();
        opts.scene.texture_mix = 0.75;
        opts.save(&dir.join("bright.toml")).unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        assert_eq!(Options::list_presets(&dir), vec!["bright".to_owned()]);
        let loaded = Options::load(&dir.join("bright.toml")).unwrap();
        assert_eq!(loaded, opts);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("window"));
        assert!(props.contains_key("camera"));
        assert!(props.contains_key("scene"));
        assert!(!props.contains_key("keybindings"));

        let camera = &props["camera"]["properties"];
        assert!(camera.get("sensitivity").is_some());
        assert!(camera.get("position").is_none());
    }

    #[test]
    fn pretty_schema_is_valid_json() {
        let text = Options::json_schema_pretty().unwrap();
        assert!(text.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["title"], "Options");
        assert!(value["properties"]["scene"].is_object());
    }
}
