//! Instanced textured cube renderer.
//!
//! One 36-vertex cube mesh is drawn once per entry in
//! [`SceneOptions::cube_positions`], each instance carrying its own model
//! matrix. The fragment shader blends two textures with a configurable mix
//! factor.

use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

use super::pipeline_util;
use crate::gpu::dynamic_buffer::DynamicBuffer;
use crate::gpu::pipeline_helpers;
use crate::gpu::render_context::RenderContext;
use crate::gpu::texture::ImageTexture;
use crate::options::SceneOptions;

/// Per-vertex data: position and texture coordinates.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Texture coordinates, `v = 0` at the bottom of the image.
    pub tex_coords: [f32; 2],
}

impl Vertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];

    /// Vertex buffer layout matching `VertexInput` in the shader.
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

const fn v(x: f32, y: f32, z: f32, u: f32, w: f32) -> Vertex {
    Vertex {
        position: [x, y, z],
        tex_coords: [u, w],
    }
}

/// Unit cube centered at the origin, two triangles per face, each face
/// mapping the full texture.
pub const CUBE_VERTICES: [Vertex; 36] = [
    // back
    v(-0.5, -0.5, -0.5, 0.0, 0.0),
    v(0.5, -0.5, -0.5, 1.0, 0.0),
    v(0.5, 0.5, -0.5, 1.0, 1.0),
    v(0.5, 0.5, -0.5, 1.0, 1.0),
    v(-0.5, 0.5, -0.5, 0.0, 1.0),
    v(-0.5, -0.5, -0.5, 0.0, 0.0),
    // front
    v(-0.5, -0.5, 0.5, 0.0, 0.0),
    v(0.5, -0.5, 0.5, 1.0, 0.0),
    v(0.5, 0.5, 0.5, 1.0, 1.0),
    v(0.5, 0.5, 0.5, 1.0, 1.0),
    v(-0.5, 0.5, 0.5, 0.0, 1.0),
    v(-0.5, -0.5, 0.5, 0.0, 0.0),
    // left
    v(-0.5, 0.5, 0.5, 1.0, 0.0),
    v(-0.5, 0.5, -0.5, 1.0, 1.0),
    v(-0.5, -0.5, -0.5, 0.0, 1.0),
    v(-0.5, -0.5, -0.5, 0.0, 1.0),
    v(-0.5, -0.5, 0.5, 0.0, 0.0),
    v(-0.5, 0.5, 0.5, 1.0, 0.0),
    // right
    v(0.5, 0.5, 0.5, 1.0, 0.0),
    v(0.5, 0.5, -0.5, 1.0, 1.0),
    v(0.5, -0.5, -0.5, 0.0, 1.0),
    v(0.5, -0.5, -0.5, 0.0, 1.0),
    v(0.5, -0.5, 0.5, 0.0, 0.0),
    v(0.5, 0.5, 0.5, 1.0, 0.0),
    // bottom
    v(-0.5, -0.5, -0.5, 0.0, 1.0),
    v(0.5, -0.5, -0.5, 1.0, 1.0),
    v(0.5, -0.5, 0.5, 1.0, 0.0),
    v(0.5, -0.5, 0.5, 1.0, 0.0),
    v(-0.5, -0.5, 0.5, 0.0, 0.0),
    v(-0.5, -0.5, -0.5, 0.0, 1.0),
    // top
    v(-0.5, 0.5, -0.5, 0.0, 1.0),
    v(0.5, 0.5, -0.5, 1.0, 1.0),
    v(0.5, 0.5, 0.5, 1.0, 0.0),
    v(0.5, 0.5, 0.5, 1.0, 0.0),
    v(-0.5, 0.5, 0.5, 0.0, 0.0),
    v(-0.5, 0.5, -0.5, 0.0, 1.0),
];

/// Per-instance model matrix, split into four column attributes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CubeInstance {
    /// Column-major model matrix.
    pub model: [[f32; 4]; 4],
}

impl CubeInstance {
    const ATTRIBS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        2 => Float32x4,
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x4,
    ];

    /// Instance buffer layout matching `InstanceInput` in the shader.
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBS,
        }
    }
}

impl From<Mat4> for CubeInstance {
    fn from(model: Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
        }
    }
}

/// Model matrix of the cube at `position`, the `index`-th in the scene,
/// `elapsed` seconds into the animation.
///
/// The cube is rotated about the scene's spin axis by
/// `elapsed * spin_speed + index * per_cube_angle` degrees, then translated.
/// A zero spin axis falls back to `+Y`.
#[must_use]
pub fn model_matrix(
    position: Vec3,
    index: usize,
    elapsed: f32,
    scene: &SceneOptions,
) -> Mat4 {
    let axis = Vec3::from(scene.spin_axis)
        .try_normalize()
        .unwrap_or(Vec3::Y);
    let degrees = elapsed * scene.spin_speed + index as f32 * scene.per_cube_angle;
    Mat4::from_translation(position)
        * Mat4::from_axis_angle(axis, degrees.to_radians())
}

/// Instances for every cube in the scene at time `elapsed`.
#[must_use]
pub fn scene_instances(elapsed: f32, scene: &SceneOptions) -> Vec<CubeInstance> {
    scene
        .cube_positions
        .iter()
        .enumerate()
        .map(|(i, &p)| model_matrix(p.into(), i, elapsed, scene).into())
        .collect()
}

/// Texture mix factor, padded to 16 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct MaterialUniform {
    mix_factor: f32,
    _pad: [f32; 3],
}

impl MaterialUniform {
    fn new(mix_factor: f32) -> Self {
        Self {
            mix_factor: mix_factor.clamp(0.0, 1.0),
            _pad: [0.0; 3],
        }
    }
}

/// Draws the scene's cubes with two blended textures and a depth test.
pub struct CubeRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    instances: DynamicBuffer,
    instance_count: u32,
    material_buffer: wgpu::Buffer,
    material_layout: wgpu::BindGroupLayout,
    material_bind_group: wgpu::BindGroup,
    /// Kept alive alongside the bind group that samples them.
    _textures: [ImageTexture; 2],
}

impl CubeRenderer {
    /// Build the pipeline and buffers. `camera_layout` is bound at group 0.
    #[must_use]
    pub fn new(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        primary: ImageTexture,
        secondary: ImageTexture,
        texture_mix: f32,
    ) -> Self {
        let device = &context.device;

        let vertex_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Cube Vertex Buffer"),
                contents: bytemuck::cast_slice(&CUBE_VERTICES),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let instances = DynamicBuffer::new(
            device,
            "Cube Instance Buffer",
            size_of::<CubeInstance>() as u64,
            wgpu::BufferUsages::VERTEX,
        );

        let material_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Cube Material Buffer"),
                contents: bytemuck::cast_slice(&[MaterialUniform::new(
                    texture_mix,
                )]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let material_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Cube Material Layout"),
                entries: &[
                    pipeline_helpers::texture_2d(0),
                    pipeline_helpers::filtering_sampler(1),
                    pipeline_helpers::texture_2d(2),
                    pipeline_helpers::filtering_sampler(3),
                    pipeline_helpers::uniform_buffer(
                        4,
                        wgpu::ShaderStages::FRAGMENT,
                    ),
                ],
            });

        let material_bind_group = Self::create_material_bind_group(
            device,
            &material_layout,
            &primary,
            &secondary,
            &material_buffer,
        );

        let pipeline =
            Self::create_pipeline(context, camera_layout, &material_layout);

        Self {
            pipeline,
            vertex_buffer,
            instances,
            instance_count: 0,
            material_buffer,
            material_layout,
            material_bind_group,
            _textures: [primary, secondary],
        }
    }

    fn create_material_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        primary: &ImageTexture,
        secondary: &ImageTexture,
        material_buffer: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Cube Material Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&primary.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&primary.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(
                        &secondary.view,
                    ),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(
                        &secondary.sampler,
                    ),
                },
                pipeline_helpers::buffer_entry(4, material_buffer),
            ],
        })
    }

    fn create_pipeline(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        material_layout: &wgpu::BindGroupLayout,
    ) -> wgpu::RenderPipeline {
        let device = &context.device;
        let shader = device.create_shader_module(wgpu::include_wgsl!(
            "../../assets/shaders/cube.wgsl"
        ));

        let pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Cube Pipeline Layout"),
                bind_group_layouts: &[camera_layout, material_layout],
                push_constant_ranges: &[],
            });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Cube Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::layout(), CubeInstance::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &pipeline_util::color_target(context.format()),
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: Some(pipeline_util::depth_stencil_state()),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }

    /// Upload new per-cube instances.
    pub fn set_instances(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        instances: &[CubeInstance],
    ) {
        let _ = self.instances.write(device, queue, instances);
        self.instance_count = instances.len() as u32;
    }

    /// Number of cubes drawn per frame.
    #[must_use]
    pub fn instance_count(&self) -> u32 {
        self.instance_count
    }

    /// Update the weight of the secondary texture.
    pub fn set_texture_mix(&self, queue: &wgpu::Queue, mix_factor: f32) {
        queue.write_buffer(
            &self.material_buffer,
            0,
            bytemuck::cast_slice(&[MaterialUniform::new(mix_factor)]),
        );
    }

    /// Replace both textures.
    pub fn set_textures(
        &mut self,
        device: &wgpu::Device,
        primary: ImageTexture,
        secondary: ImageTexture,
    ) {
        self.material_bind_group = Self::create_material_bind_group(
            device,
            &self.material_layout,
            &primary,
            &secondary,
            &self.material_buffer,
        );
        self._textures = [primary, secondary];
    }

    /// Clear `target` and `depth`, then draw every cube.
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        depth: &wgpu::TextureView,
        clear_color: wgpu::Color,
        camera_bind_group: &wgpu::BindGroup,
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Cube Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                depth_slice: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(
                wgpu::RenderPassDepthStencilAttachment {
                    view: depth,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                },
            ),
            ..Default::default()
        });

        if self.instance_count == 0 {
            return;
        }

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, camera_bind_group, &[]);
        pass.set_bind_group(1, &self.material_bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_vertex_buffer(1, self.instances.buffer().slice(..));
        pass.draw(0..CUBE_VERTICES.len() as u32, 0..self.instance_count);
    }
}
