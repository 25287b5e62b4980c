//! Per-frame GPU data: instances, line vertices and uniforms
//!
//! A [`SceneFrame`] is an immutable snapshot built on the UI thread and handed
//! to the paint callback, which uploads it as-is.

use bytemuck::{Pod, Zeroable};
use eframe::wgpu;
use glam::{Mat3, Mat4, Vec3};
use std::mem;

/// Instance data for one lit mesh in GPU memory
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshInstance {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 4]; 3], // Inverse-transpose of the model's upper 3x3, padded
    pub color: [f32; 4],       // Linear RGBA
}

impl MeshInstance {
    const ATTRIBUTES: [wgpu::VertexAttribute; 8] = wgpu::vertex_attr_array![
        2 => Float32x4,
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x4,
        6 => Float32x4,
        7 => Float32x4,
        8 => Float32x4,
        9 => Float32x4,
    ];

    pub fn new(model: Mat4, color: [f32; 4]) -> Self {
        let normal = Mat3::from_mat4(model).inverse().transpose();
        let pad = |v: Vec3| [v.x, v.y, v.z, 0.0];
        Self {
            model: model.to_cols_array_2d(),
            normal: [pad(normal.x_axis), pad(normal.y_axis), pad(normal.z_axis)],
            color,
        }
    }

    /// A model with a negative determinant reverses triangle winding
    pub fn is_mirrored(&self) -> bool {
        Mat4::from_cols_array_2d(&self.model).determinant() < 0.0
    }

    /// Winding of this instance's front faces after the model transform
    pub fn front_face(&self) -> wgpu::FrontFace {
        if self.is_mirrored() {
            wgpu::FrontFace::Cw
        } else {
            wgpu::FrontFace::Ccw
        }
    }

    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<MeshInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Colored vertex for line lists (helpers, overlays)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl LineVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3,
    ];

    pub fn new(position: Vec3, color: [f32; 3]) -> Self {
        Self {
            position: position.to_array(),
            color,
        }
    }

    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<LineVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Uniform data shared by every pipeline
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub camera_position: [f32; 4],
    pub light_position: [f32; 4], // w = point light intensity
    pub ambient: [f32; 4],        // x = ambient intensity
}

impl SceneUniforms {
    pub fn new(
        view_proj: Mat4,
        camera_position: Vec3,
        light_position: Vec3,
        light_intensity: f32,
        ambient_intensity: f32,
    ) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            camera_position: camera_position.extend(1.0).to_array(),
            light_position: light_position.extend(light_intensity).to_array(),
            ambient: [ambient_intensity, 0.0, 0.0, 0.0],
        }
    }
}

/// Everything the renderer draws in one frame, in draw order:
/// planes, then lines, then cubes.
///
/// There is no depth buffer, so cubes must arrive sorted back to front by
/// center. Cubes that intersect each other can still occlude wrongly.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneFrame {
    pub uniforms: SceneUniforms,
    pub planes: Vec<MeshInstance>,
    pub lines: Vec<LineVertex>,
    pub cubes: Vec<MeshInstance>,
}

impl SceneFrame {
    /// Plane and cube instances packed into one buffer, planes first
    pub fn mesh_instances(&self) -> Vec<MeshInstance> {
        self.planes.iter().chain(self.cubes.iter()).copied().collect()
    }
}

/// Convert an sRGB channel triple into linear RGBA
pub fn srgb_to_linear(rgb: [u8; 3]) -> [f32; 4] {
    egui::Rgba::from(egui::Color32::from_rgb(rgb[0], rgb[1], rgb[2])).to_array()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_matrix_of_scaled_model() {
        let model = Mat4::from_scale_rotation_translation(
            Vec3::new(2.0, 4.0, 0.5),
            glam::Quat::IDENTITY,
            Vec3::new(1.0, 2.0, 3.0),
        );
        let instance = MeshInstance::new(model, [1.0; 4]);
        assert_eq!(instance.normal[0], [0.5, 0.0, 0.0, 0.0]);
        assert_eq!(instance.normal[1], [0.0, 0.25, 0.0, 0.0]);
        assert_eq!(instance.normal[2], [0.0, 0.0, 2.0, 0.0]);
        assert_eq!(instance.model[3], [1.0, 2.0, 3.0, 1.0]);
    }

    #[test]
    fn test_negative_scale_flips_winding() {
        let plain = MeshInstance::new(Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0)), [1.0; 4]);
        assert!(!plain.is_mirrored());
        assert_eq!(plain.front_face(), wgpu::FrontFace::Ccw);

        let mirrored = MeshInstance::new(Mat4::from_scale(Vec3::new(-2.0, 1.0, 1.0)), [1.0; 4]);
        assert!(mirrored.is_mirrored());
        assert_eq!(mirrored.front_face(), wgpu::FrontFace::Cw);

        // Two negative axes cancel out
        let doubled = MeshInstance::new(Mat4::from_scale(Vec3::new(-1.0, -1.0, 1.0)), [1.0; 4]);
        assert_eq!(doubled.front_face(), wgpu::FrontFace::Ccw);
    }

    #[test]
    fn test_srgb_to_linear() {
        assert_eq!(srgb_to_linear([0, 0, 0]), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(srgb_to_linear([255, 255, 255]), [1.0, 1.0, 1.0, 1.0]);
        let mid = srgb_to_linear([128, 128, 128])[0];
        assert!((mid - 0.2158).abs() < 1e-3);
    }

    #[test]
    fn test_uniform_layout() {
        assert_eq!(mem::size_of::<SceneUniforms>(), 112);
        assert_eq!(mem::size_of::<MeshInstance>(), 128);
    }
}
