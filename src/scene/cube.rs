//! One interactive cube of the scene

use glam::Vec3;
use rand::Rng;

use super::node::MeshNode;
use super::SceneEvent;
use crate::project::{random_palette_color, CubeState};

/// Retained render state of the cube at a fixed index
#[derive(Debug, Clone, PartialEq)]
pub struct Cube {
    index: usize,
    node: MeshNode,
    /// Bit patterns of the dimensions last pushed into the node's scale
    synced_dimensions: Option<[u64; 3]>,
}

impl Cube {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            node: MeshNode::default(),
            synced_dimensions: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn node(&self) -> &MeshNode {
        &self.node
    }

    /// Bring the node in line with the stored state. Position and color are
    /// taken as given; scale goes through [`Cube::sync_scale`].
    pub fn sync(&mut self, state: &CubeState) {
        self.node.translation = to_vec3(state.position);
        if !self.node.set_hex_color(&state.color) {
            log::warn!("Cube {} has unparseable color {:?}", self.index, state.color);
        }
        self.sync_scale(state.dimensions());
    }

    /// Push new dimensions into the node's scale, only when they changed.
    /// Returns whether the scale was written.
    pub fn sync_scale(&mut self, dimensions: [f64; 3]) -> bool {
        let bits = dimensions.map(f64::to_bits);
        if self.synced_dimensions == Some(bits) {
            return false;
        }
        self.node.scale = to_vec3(dimensions);
        self.synced_dimensions = Some(bits);
        true
    }

    /// World-space bounding box of the scaled cube
    pub fn bounds(&self) -> (Vec3, Vec3) {
        let half = self.node.scale.abs() * 0.5;
        (self.node.translation - half, self.node.translation + half)
    }

    /// React to a click on this cube.
    ///
    /// In debug mode the click asks for selection (also when already
    /// selected). Otherwise the cube gets a random palette color and keeps
    /// every other field.
    pub fn on_click<R: Rng + ?Sized>(&self, state: &CubeState, debug_mode: bool, rng: &mut R) -> SceneEvent {
        if debug_mode {
            SceneEvent::Select(self.index)
        } else {
            SceneEvent::UpdateCube {
                index: self.index,
                state: state.with_color(random_palette_color(rng)),
            }
        }
    }

    /// Commit a gizmo move: only the position changes
    pub fn on_translate(&self, state: &CubeState, position: [f64; 3]) -> SceneEvent {
        SceneEvent::UpdateCube {
            index: self.index,
            state: state.with_position(position),
        }
    }
}

fn to_vec3(values: [f64; 3]) -> Vec3 {
    Vec3::new(values[0] as f32, values[1] as f32, values[2] as f32)
}
