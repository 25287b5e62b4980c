//! wgpu renderer for the cube scene
//!
//! Two pipelines share one uniform bind group: a lit, instanced mesh pipeline
//! for the ground plane and the cubes, and an unlit line-list pipeline for
//! helpers. egui's render pass carries no depth attachment, so draw order is
//! the caller's responsibility (see [`SceneFrame`]).

use eframe::wgpu;
use eframe::wgpu::util::DeviceExt;
use std::mem;
use std::ops::Range;

use super::config::GraphicsConfig;
use super::instance::{LineVertex, MeshInstance, SceneFrame, SceneUniforms};
use super::mesh::{Mesh3D, Vertex3D};
use crate::constants::scene;

/// GPU buffers of one static mesh
struct MeshBuffers {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl MeshBuffers {
    fn new(device: &wgpu::Device, label: &str, mesh: &Mesh3D) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Vertex Buffer")),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Index Buffer")),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }
}

/// Growable vertex buffer rewritten every frame
struct DynamicBuffer {
    label: &'static str,
    buffer: wgpu::Buffer,
    capacity: u64,
}

impl DynamicBuffer {
    fn new(device: &wgpu::Device, label: &'static str, capacity: u64) -> Self {
        Self {
            label,
            buffer: Self::allocate(device, label, capacity),
            capacity,
        }
    }

    fn allocate(device: &wgpu::Device, label: &str, size: u64) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn write(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        let needed = bytes.len() as u64;
        if needed > self.capacity {
            self.capacity = needed.next_power_of_two();
            self.buffer = Self::allocate(device, self.label, self.capacity);
            log::debug!("Grew {} to {} bytes", self.label, self.capacity);
        }
        queue.write_buffer(&self.buffer, 0, bytes);
    }
}

/// Draw counts of the frame last uploaded
#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct FrameCounts {
    planes: u32,
    cubes: u32,
    line_vertices: u32,
}

/// GPU renderer for the cube scene
pub struct SceneRenderer {
    mesh_pipeline: wgpu::RenderPipeline,
    mirrored_mesh_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    cube_mesh: MeshBuffers,
    plane_mesh: MeshBuffers,
    instance_buffer: DynamicBuffer,
    line_buffer: DynamicBuffer,
    counts: FrameCounts,
    /// Winding of each uploaded mesh instance, in buffer order
    front_faces: Vec<wgpu::FrontFace>,
}

impl std::fmt::Debug for SceneRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneRenderer")
            .field("counts", &self.counts)
            .field("instance_capacity", &self.instance_buffer.capacity)
            .field("line_capacity", &self.line_buffer.capacity)
            .finish()
    }
}

impl SceneRenderer {
    pub fn new(device: &wgpu::Device, config: &GraphicsConfig) -> Self {
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Scene Uniform Buffer"),
            size: mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("Scene Bind Group Layout"),
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
            label: Some("Scene Bind Group"),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let mesh_pipeline = Self::create_mesh_pipeline(device, &pipeline_layout, config, wgpu::FrontFace::Ccw);
        let mirrored_mesh_pipeline =
            Self::create_mesh_pipeline(device, &pipeline_layout, config, wgpu::FrontFace::Cw);
        let line_pipeline = Self::create_line_pipeline(device, &pipeline_layout, config);

        let instance_capacity = (mem::size_of::<MeshInstance>() * 8) as u64;
        let line_capacity = (mem::size_of::<LineVertex>() * 8) as u64;

        Self {
            mesh_pipeline,
            mirrored_mesh_pipeline,
            line_pipeline,
            uniform_buffer,
            uniform_bind_group,
            cube_mesh: MeshBuffers::new(device, "Cube", &Mesh3D::cube()),
            plane_mesh: MeshBuffers::new(device, "Plane", &Mesh3D::plane(scene::BASE_SIZE)),
            instance_buffer: DynamicBuffer::new(device, "Scene Instance Buffer", instance_capacity),
            line_buffer: DynamicBuffer::new(device, "Scene Line Buffer", line_capacity),
            counts: FrameCounts::default(),
            front_faces: Vec::new(),
        }
    }

    fn create_mesh_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        config: &GraphicsConfig,
        front_face: wgpu::FrontFace,
    ) -> wgpu::RenderPipeline {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Mesh Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/mesh.wgsl").into()),
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Scene Mesh Pipeline"),
            layout: Some(layout),
            cache: None,
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex3D::desc(), MeshInstance::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(config.color_target_state(wgpu::BlendState::REPLACE))],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None, // No depth buffer in egui callback system
            multisample: config.multisample_state(),
            multiview: None,
        })
    }

    fn create_line_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        config: &GraphicsConfig,
    ) -> wgpu::RenderPipeline {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Line Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/lines.wgsl").into()),
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Scene Line Pipeline"),
            layout: Some(layout),
            cache: None,
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[LineVertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(config.color_target_state(wgpu::BlendState::REPLACE))],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: config.multisample_state(),
            multiview: None,
        })
    }

    /// Upload uniforms, instances and line vertices of a frame
    pub fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, frame: &SceneFrame) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[frame.uniforms]));

        let instances = frame.mesh_instances();
        self.front_faces = instances.iter().map(MeshInstance::front_face).collect();
        self.instance_buffer
            .write(device, queue, bytemuck::cast_slice(&instances));
        self.line_buffer
            .write(device, queue, bytemuck::cast_slice(&frame.lines));

        self.counts = FrameCounts {
            planes: frame.planes.len() as u32,
            cubes: frame.cubes.len() as u32,
            line_vertices: frame.lines.len() as u32,
        };
    }

    /// Draw the last uploaded frame: planes, then lines, then cubes
    pub fn render(&self, render_pass: &mut wgpu::RenderPass<'static>) {
        let counts = self.counts;
        render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);

        if counts.planes > 0 {
            self.draw_meshes(render_pass, &self.plane_mesh, 0..counts.planes);
        }

        if counts.line_vertices > 0 {
            render_pass.set_pipeline(&self.line_pipeline);
            render_pass.set_vertex_buffer(0, self.line_buffer.buffer.slice(..));
            render_pass.draw(0..counts.line_vertices, 0..1);
        }

        if counts.cubes > 0 {
            let first = counts.planes;
            self.draw_meshes(render_pass, &self.cube_mesh, first..first + counts.cubes);
        }
    }

    fn draw_meshes(
        &self,
        render_pass: &mut wgpu::RenderPass<'static>,
        mesh: &MeshBuffers,
        instances: Range<u32>,
    ) {
        render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        render_pass.set_vertex_buffer(1, self.instance_buffer.buffer.slice(..));
        render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);

        // One draw per run of equal winding keeps the instance order intact
        for (front_face, run) in winding_runs(&self.front_faces, instances) {
            let pipeline = match front_face {
                wgpu::FrontFace::Cw => &self.mirrored_mesh_pipeline,
                wgpu::FrontFace::Ccw => &self.mesh_pipeline,
            };
            render_pass.set_pipeline(pipeline);
            render_pass.draw_indexed(0..mesh.index_count, 0, run);
        }
    }
}

/// Split `instances` into consecutive runs sharing one winding. Instances
/// without a recorded winding count as counter-clockwise.
fn winding_runs(front_faces: &[wgpu::FrontFace], instances: Range<u32>) -> Vec<(wgpu::FrontFace, Range<u32>)> {
    let face_of = |i: u32| {
        front_faces
            .get(i as usize)
            .copied()
            .unwrap_or(wgpu::FrontFace::Ccw)
    };

    let mut runs: Vec<(wgpu::FrontFace, Range<u32>)> = Vec::new();
    for i in instances {
        let face = face_of(i);
        match runs.last_mut() {
            Some((last, run)) if *last == face => run.end = i + 1,
            _ => runs.push((face, i..i + 1)),
        }
    }
    runs
}
