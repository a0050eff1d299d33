use wgpu::util::DeviceExt;

use super::core::Camera;
use super::projection::{CameraUniform, Projection};
use crate::gpu::pipeline_helpers;
use crate::gpu::render_context::RenderContext;

/// Owns the camera and its GPU-side uniform, buffer and bind group.
///
/// The camera itself is mutated through [`camera_mut`](Self::camera_mut);
/// call [`upload`](Self::upload) once per frame to push the result to the
/// GPU.
pub struct CameraController {
    camera: Camera,
    projection: Projection,
    uniform: CameraUniform,
    /// Uniform buffer holding [`CameraUniform`].
    pub buffer: wgpu::Buffer,
    /// Layout of the camera bind group (group 0 in the cube pipeline).
    pub layout: wgpu::BindGroupLayout,
    /// Bind group exposing the uniform buffer at binding 0.
    pub bind_group: wgpu::BindGroup,
}

impl CameraController {
    /// Create the GPU resources for `camera` viewed through `projection`.
    #[must_use]
    pub fn new(
        context: &RenderContext,
        camera: Camera,
        projection: Projection,
    ) -> Self {
        let mut uniform = CameraUniform::new();
        uniform.update(&camera, &projection);

        let buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[pipeline_helpers::uniform_buffer(
                    0,
                    wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                )],
            },
        );

        let bind_group =
            context
                .device
                .create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("Camera Bind Group"),
                    layout: &layout,
                    entries: &[pipeline_helpers::buffer_entry(0, &buffer)],
                });

        Self {
            camera,
            projection,
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }

    /// The camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable access to the camera.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Replace the camera, e.g. after new options are applied.
    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    /// The projection parameters.
    #[must_use]
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Replace the projection, keeping the current aspect ratio.
    pub fn set_projection(&mut self, projection: Projection) {
        self.projection = Projection {
            aspect: self.projection.aspect,
            ..projection
        };
    }

    /// Update the projection's aspect ratio for a new viewport size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.projection.set_viewport(width, height);
    }

    /// Recompute the uniform and write it to the GPU buffer.
    pub fn upload(&mut self, queue: &wgpu::Queue) {
        self.uniform.update(&self.camera, &self.projection);
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}
