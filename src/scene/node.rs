//! Retained mesh node: the renderable transform and color of one object

use glam::{Mat4, Quat, Vec3};

use crate::gpu::{srgb_to_linear, MeshInstance};
use crate::project::parse_hex_color;

#[derive(Debug, Clone, PartialEq)]
pub struct MeshNode {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    /// Linear RGBA
    pub color: [f32; 4],
}

impl Default for MeshNode {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

impl MeshNode {
    pub fn model(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    pub fn instance(&self) -> MeshInstance {
        MeshInstance::new(self.model(), self.color)
    }

    /// Set the color from a `#rrggbb` string. An unparseable string keeps
    /// the previous color and returns `false`.
    pub fn set_hex_color(&mut self, color: &str) -> bool {
        match parse_hex_color(color) {
            Some(rgb) => {
                self.color = srgb_to_linear(rgb);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_color_keeps_previous() {
        let mut node = MeshNode::default();
        assert!(node.set_hex_color("#ff0000"));
        assert_eq!(node.color, [1.0, 0.0, 0.0, 1.0]);
        assert!(!node.set_hex_color("red"));
        assert_eq!(node.color, [1.0, 0.0, 0.0, 1.0]);
    }
}
