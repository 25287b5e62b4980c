//! Static mesh geometry uploaded once to the GPU

use bytemuck::{Pod, Zeroable};
use eframe::wgpu;
use glam::Vec3;
use std::mem;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex3D {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex3D {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] = [
        wgpu::VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x3,
        },
        wgpu::VertexAttribute {
            offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
            shader_location: 1,
            format: wgpu::VertexFormat::Float32x3,
        },
    ];

    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<Vertex3D>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Indexed triangle mesh, counter-clockwise front faces
#[derive(Debug, Clone)]
pub struct Mesh3D {
    pub vertices: Vec<Vertex3D>,
    pub indices: Vec<u32>,
}

impl Mesh3D {
    /// Unit cube centered on the origin, edges of length 1
    pub fn cube() -> Self {
        // (normal, u, v) with u x v == normal
        let faces = [
            (Vec3::X, Vec3::Y, Vec3::Z),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::Z, Vec3::X),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::Y, Vec3::X),
        ];

        let mut mesh = Self {
            vertices: Vec::with_capacity(24),
            indices: Vec::with_capacity(36),
        };
        for (normal, u, v) in faces {
            mesh.push_quad(normal * 0.5, u * 0.5, v * 0.5, normal);
        }
        mesh
    }

    /// Square in the XY plane facing +Z, like a plane before it is laid flat
    pub fn plane(size: f32) -> Self {
        let half = size * 0.5;
        let mut mesh = Self {
            vertices: Vec::with_capacity(4),
            indices: Vec::with_capacity(6),
        };
        mesh.push_quad(Vec3::ZERO, Vec3::X * half, Vec3::Y * half, Vec3::Z);
        mesh
    }

    fn push_quad(&mut self, center: Vec3, u: Vec3, v: Vec3, normal: Vec3) {
        let base = self.vertices.len() as u32;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            self.vertices.push(Vertex3D {
                position: (center + u * su + v * sv).to_array(),
                normal: normal.to_array(),
            });
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_outward_winding(mesh: &Mesh3D) {
        for tri in mesh.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vec3::from_array(mesh.vertices[i as usize].position));
            let face_normal = (b - a).cross(c - a).normalize();
            let vertex_normal = Vec3::from_array(mesh.vertices[tri[0] as usize].normal);
            assert!(face_normal.dot(vertex_normal) > 0.999, "triangle {tri:?} wound backwards");
        }
    }

    #[test]
    fn test_cube_geometry() {
        let cube = Mesh3D::cube();
        assert_eq!(cube.vertices.len(), 24);
        assert_eq!(cube.indices.len(), 36);
        for vertex in &cube.vertices {
            assert!(vertex.position.iter().all(|c| c.abs() == 0.5));
        }
        assert_outward_winding(&cube);
    }

    #[test]
    fn test_plane_geometry() {
        let plane = Mesh3D::plane(10.0);
        assert_eq!(plane.indices.len(), 6);
        for vertex in &plane.vertices {
            assert_eq!(vertex.position[2], 0.0);
            assert_eq!(vertex.position[0].abs(), 5.0);
        }
        assert_outward_winding(&plane);
    }
}
