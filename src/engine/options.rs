//! Options methods for CubeEngine

use super::{load_textures, CubeEngine};
use crate::options::Options;

impl CubeEngine {
    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace options and apply all changes to subsystems.
    ///
    /// The camera is rebuilt only when its starting pose changed, so
    /// tweaking speeds or the field of view does not teleport the viewer.
    pub fn set_options(&mut self, new: Options) {
        let old = std::mem::replace(&mut self.options, new);
        self.apply_camera(&old);
        self.apply_scene(&old);
        self.context
            .set_present_mode(self.options.window.present_mode());
        if old.keybindings != self.options.keybindings {
            self.input
                .set_key_bindings(self.options.keybindings.clone());
        }
    }

    fn apply_camera(&mut self, old: &Options) {
        let co = &self.options.camera;
        let pose_changed = old.camera.position != co.position
            || old.camera.yaw != co.yaw
            || old.camera.pitch != co.pitch;
        if pose_changed {
            self.camera_controller.set_camera(co.build_camera());
        } else if old.camera.sensitivity != co.sensitivity {
            let camera = self.camera_controller.camera().clone();
            self.camera_controller
                .set_camera(camera.with_sensitivity(co.sensitivity));
        }
        self.camera_controller.set_projection(
            co.build_projection(self.context.width(), self.context.height()),
        );
        self.camera_controller.upload(&self.context.queue);
    }

    fn apply_scene(&mut self, old: &Options) {
        let scene = &self.options.scene;
        self.renderer
            .set_texture_mix(&self.context.queue, scene.texture_mix);

        let textures_changed = old.scene.primary_texture
            != scene.primary_texture
            || old.scene.secondary_texture != scene.secondary_texture
            || old.scene.flip_textures != scene.flip_textures;
        if textures_changed {
            match load_textures(&self.context, &self.options) {
                Ok((primary, secondary)) => self.renderer.set_textures(
                    &self.context.device,
                    primary,
                    secondary,
                ),
                Err(e) => log::warn!("keeping previous textures: {e}"),
            }
        }
    }
}
