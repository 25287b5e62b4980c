//! Translate-only gizmo: one arrow per world axis, dragged in screen space
//!
//! Arrows are picked and drawn as 2D segments projected from the 3D axes. A
//! pointer movement is projected onto the screen direction of the grabbed
//! arrow and converted back to world units along that axis.

use egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};
use glam::Vec3;

use crate::constants::gizmo;
use crate::viewport::Camera3D;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn direction(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    pub fn color(self) -> Color32 {
        match self {
            Axis::X => Color32::from_rgb(255, 64, 64),
            Axis::Y => Color32::from_rgb(64, 255, 64),
            Axis::Z => Color32::from_rgb(64, 96, 255),
        }
    }
}

/// Which cube and arrow are being dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GizmoDrag {
    pub index: usize,
    pub axis: Axis,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct TranslateGizmo {
    drag: Option<GizmoDrag>,
}

impl TranslateGizmo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<GizmoDrag> {
        self.drag
    }

    pub fn begin(&mut self, index: usize, axis: Axis) {
        log::debug!("Gizmo drag started on cube {index} along {axis:?}");
        self.drag = Some(GizmoDrag { index, axis });
    }

    pub fn end(&mut self) {
        if self.drag.take().is_some() {
            log::debug!("Gizmo drag ended");
        }
    }

    /// Arrow picked under the pointer, nearest first
    pub fn hit_test(camera: &Camera3D, rect: Rect, center: Vec3, pointer: Pos2) -> Option<Axis> {
        Axis::ALL
            .into_iter()
            .filter_map(|axis| {
                let (start, end) = handle_segment(camera, rect, center, axis)?;
                let distance = distance_to_line_segment(pointer, start, end);
                (distance <= gizmo::PICK_RADIUS).then_some((axis, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(axis, _)| axis)
    }

    /// World distance along `axis` matching a pointer movement
    pub fn axis_drag_delta(camera: &Camera3D, rect: Rect, center: Vec3, axis: Axis, pointer_delta: Vec2) -> f32 {
        let Some((start, end)) = handle_segment(camera, rect, center, axis) else {
            return 0.0;
        };
        let screen_axis = end - start;
        let length_sq = screen_axis.length_sq();
        if length_sq < 1e-6 {
            // Arrow points straight at the camera
            return 0.0;
        }
        pointer_delta.dot(screen_axis) / length_sq * gizmo::AXIS_LENGTH
    }

    /// Draw the arrows over the viewport
    pub fn paint(&self, painter: &Painter, camera: &Camera3D, rect: Rect, center: Vec3, hovered: Option<Axis>) {
        let highlighted = self.drag.map(|drag| drag.axis).or(hovered);
        for axis in Axis::ALL {
            let Some((start, end)) = handle_segment(camera, rect, center, axis) else {
                continue;
            };
            let color = if highlighted == Some(axis) {
                Color32::YELLOW
            } else {
                axis.color()
            };
            painter.line_segment([start, end], Stroke::new(gizmo::STROKE_WIDTH, color));
            painter.circle_filled(end, gizmo::STROKE_WIDTH * 2.0, color);
        }
    }
}

/// Screen-space segment of an arrow, if both ends are in front of the camera
fn handle_segment(camera: &Camera3D, rect: Rect, center: Vec3, axis: Axis) -> Option<(Pos2, Pos2)> {
    let start = camera.world_to_screen(center, rect)?;
    let end = camera.world_to_screen(center + axis.direction() * gizmo::AXIS_LENGTH, rect)?;
    Some((start, end))
}

/// Minimum distance from a point to a line segment
fn distance_to_line_segment(point: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let ab_len_sq = ab.length_sq();
    if ab_len_sq == 0.0 {
        return (point - a).length();
    }
    let t = ((point - a).dot(ab) / ab_len_sq).clamp(0.0, 1.0);
    (point - (a + ab * t)).length()
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::vec2;

    fn setup() -> (Camera3D, Rect) {
        let mut camera = Camera3D::default();
        camera.set_aspect(800.0 / 600.0);
        (camera, Rect::from_min_size(Pos2::ZERO, vec2(800.0, 600.0)))
    }

    #[test]
    fn test_distance_to_segment() {
        let a = Pos2::new(0.0, 0.0);
        let b = Pos2::new(10.0, 0.0);
        assert_eq!(distance_to_line_segment(Pos2::new(5.0, 3.0), a, b), 3.0);
        assert_eq!(distance_to_line_segment(Pos2::new(13.0, 4.0), a, b), 5.0);
        assert_eq!(distance_to_line_segment(Pos2::new(3.0, 4.0), a, a), 5.0);
    }

    #[test]
    fn test_hit_test_picks_arrow_tip() {
        let (camera, rect) = setup();
        let center = Vec3::new(0.0, 0.5, 0.0);
        for axis in Axis::ALL {
            let tip = camera
                .world_to_screen(center + axis.direction() * gizmo::AXIS_LENGTH, rect)
                .unwrap();
            assert_eq!(TranslateGizmo::hit_test(&camera, rect, center, tip), Some(axis));
        }
        assert_eq!(TranslateGizmo::hit_test(&camera, rect, center, Pos2::new(5.0, 5.0)), None);
    }

    #[test]
    fn test_drag_along_screen_axis_moves_arrow_length() {
        let (camera, rect) = setup();
        let center = Vec3::new(1.0, 0.5, -1.0);
        let start = camera.world_to_screen(center, rect).unwrap();
        let end = camera
            .world_to_screen(center + Vec3::X * gizmo::AXIS_LENGTH, rect)
            .unwrap();

        let delta = TranslateGizmo::axis_drag_delta(&camera, rect, center, Axis::X, end - start);
        assert!((delta - gizmo::AXIS_LENGTH).abs() < 1e-4);

        // Perpendicular motion does not move the cube
        let perpendicular = (end - start).rot90();
        let delta = TranslateGizmo::axis_drag_delta(&camera, rect, center, Axis::X, perpendicular);
        assert!(delta.abs() < 1e-4);
    }

    #[test]
    fn test_begin_and_end() {
        let mut gizmo = TranslateGizmo::new();
        gizmo.begin(4, Axis::Z);
        assert_eq!(gizmo.active(), Some(GizmoDrag { index: 4, axis: Axis::Z }));
        gizmo.end();
        assert_eq!(gizmo.active(), None);
    }
}
