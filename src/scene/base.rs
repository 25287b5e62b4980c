//! Static ground plane

use glam::Quat;

use super::node::MeshNode;
use crate::constants::scene;

/// 10x10 plane laid flat on y = 0; drawn but never picked
#[derive(Debug, Clone, PartialEq)]
pub struct Base {
    node: MeshNode,
}

impl Base {
    pub fn new() -> Self {
        let mut node = MeshNode {
            rotation: Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2),
            ..MeshNode::default()
        };
        node.set_hex_color(scene::BASE_COLOR);
        Self { node }
    }

    pub fn node(&self) -> &MeshNode {
        &self.node
    }
}

impl Default for Base {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_base_faces_up() {
        let base = Base::new();
        let normal = base.node().model().transform_vector3(Vec3::Z);
        assert!((normal - Vec3::Y).length() < 1e-6);
    }
}
