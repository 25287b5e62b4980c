//! Orbit camera controls
//!
//! Primary drag orbits, secondary drag pans, scrolling zooms. Each
//! manipulation has its own enable flag so callers can lock one of them
//! without remounting the controls.

use egui::Vec2;

use super::camera::Camera3D;
use crate::constants::camera;

#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    pub enable_rotate: bool,
    pub enable_pan: bool,
    pub enable_zoom: bool,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            enable_rotate: true,
            enable_pan: true,
            enable_zoom: true,
        }
    }
}

impl OrbitControls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Orbit by a pointer drag. Returns whether the camera moved.
    pub fn rotate(&self, camera: &mut Camera3D, drag: Vec2) -> bool {
        if !self.enable_rotate || drag == Vec2::ZERO {
            return false;
        }
        camera.orbit(
            drag.x * camera::ORBIT_SENSITIVITY,
            -drag.y * camera::ORBIT_SENSITIVITY,
        );
        true
    }

    /// Pan by a pointer drag in a viewport of the given height
    pub fn pan(&self, camera: &mut Camera3D, drag: Vec2, viewport_height: f32) -> bool {
        if !self.enable_pan || drag == Vec2::ZERO {
            return false;
        }
        camera.pan(drag.x, drag.y, viewport_height);
        true
    }

    /// Zoom by a scroll delta; positive scrolls move closer
    pub fn zoom(&self, camera: &mut Camera3D, scroll: f32) -> bool {
        if !self.enable_zoom || scroll == 0.0 {
            return false;
        }
        camera.dolly((-scroll * camera::ZOOM_SENSITIVITY).exp());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::vec2;

    #[test]
    fn test_rotate_respects_flag() {
        let mut controls = OrbitControls::new();
        let mut camera = Camera3D::default();

        controls.enable_rotate = false;
        assert!(!controls.rotate(&mut camera, vec2(30.0, 10.0)));
        assert_eq!(camera, Camera3D::default());

        controls.enable_rotate = true;
        assert!(controls.rotate(&mut camera, vec2(30.0, 10.0)));
        assert_ne!(camera.position, Camera3D::default().position);
    }

    #[test]
    fn test_pan_and_zoom_independent_of_rotate() {
        let controls = OrbitControls {
            enable_rotate: false,
            ..OrbitControls::default()
        };
        let mut camera = Camera3D::default();

        assert!(controls.pan(&mut camera, vec2(10.0, 0.0), 600.0));
        let distance = camera.distance();
        assert!(controls.zoom(&mut camera, 120.0));
        assert!(camera.distance() < distance);
    }
}
