//! 3D scene: lights, cubes, ground plane, camera controls and helpers
//!
//! The scene never owns cube data. Each frame it receives the authoritative
//! [`CubeSet`] through [`SceneProps`], mirrors it into retained mesh nodes,
//! and reports user interaction back as [`SceneEvent`]s for the editor to
//! apply.

pub mod base;
pub mod cube;
pub mod gizmo;
pub mod node;

pub use base::Base;
pub use cube::Cube;
pub use gizmo::{Axis, TranslateGizmo};
pub use node::MeshNode;

use egui::{PointerButton, Rect, Sense, Ui};
use glam::Vec3;
use rand::Rng;

use crate::constants::{lighting, scene, CUBE_COUNT};
use crate::gpu::{LineVertex, SceneFrame, SceneRenderCallback, SceneUniforms};
use crate::project::{CubeSet, CubeState};
use crate::theme;
use crate::viewport::{Camera3D, OrbitControls, Ray};

/// Request from the scene to the owner of the cube data
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    /// Select the cube at this index
    Select(usize),
    /// Replace the cube at `index` with `state`
    UpdateCube { index: usize, state: CubeState },
}

/// Per-frame inputs of the scene
#[derive(Debug, Clone, Copy)]
pub struct SceneProps<'a> {
    pub cubes: &'a CubeSet,
    pub debug_mode: bool,
    pub selected: Option<usize>,
    pub rotation_locked: bool,
}

/// Non-pickable visual aids added to the scene graph
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneHelper {
    /// Red/green/blue lines along +X/+Y/+Z from the origin
    Axes { size: f32 },
}

impl SceneHelper {
    fn line_vertices(&self) -> Vec<LineVertex> {
        match *self {
            SceneHelper::Axes { size } => [
                (Vec3::X, [1.0, 0.0, 0.0]),
                (Vec3::Y, [0.0, 1.0, 0.0]),
                (Vec3::Z, [0.0, 0.0, 1.0]),
            ]
            .into_iter()
            .flat_map(|(axis, color)| {
                [
                    LineVertex::new(Vec3::ZERO, color),
                    LineVertex::new(axis * size, color),
                ]
            })
            .collect(),
        }
    }
}

pub struct Scene {
    camera: Camera3D,
    controls: OrbitControls,
    cubes: Vec<Cube>,
    base: Base,
    helpers: Vec<SceneHelper>,
    gizmo: TranslateGizmo,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            camera: Camera3D::default(),
            controls: OrbitControls::default(),
            cubes: (0..CUBE_COUNT).map(Cube::new).collect(),
            base: Base::new(),
            helpers: Vec::new(),
            gizmo: TranslateGizmo::new(),
        }
    }

    pub fn camera(&self) -> &Camera3D {
        &self.camera
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    pub fn helpers(&self) -> &[SceneHelper] {
        &self.helpers
    }

    pub fn cubes(&self) -> &[Cube] {
        &self.cubes
    }

    /// Replace one cube, leaving the others and their order untouched
    pub fn update_cube(cubes: &CubeSet, index: usize, state: CubeState) -> CubeSet {
        cubes.replace(index, state)
    }

    /// Add the axes helper in debug mode, remove it otherwise.
    /// Returns whether the helper list changed.
    pub fn sync_debug_overlay(&mut self, debug_mode: bool) -> bool {
        let present = self
            .helpers
            .iter()
            .any(|helper| matches!(helper, SceneHelper::Axes { .. }));

        match (debug_mode, present) {
            (true, false) => {
                self.helpers.push(SceneHelper::Axes {
                    size: scene::AXES_HELPER_SIZE,
                });
                log::debug!("Axes helper added");
                true
            }
            (false, true) => {
                self.helpers
                    .retain(|helper| !matches!(helper, SceneHelper::Axes { .. }));
                log::debug!("Axes helper removed");
                true
            }
            _ => false,
        }
    }

    /// Disable orbiting while rotation is locked; pan and zoom are untouched
    pub fn sync_rotation_lock(&mut self, rotation_locked: bool) {
        let enable_rotate = !rotation_locked;
        if self.controls.enable_rotate != enable_rotate {
            self.controls.enable_rotate = enable_rotate;
            log::debug!("Orbit rotation enabled: {enable_rotate}");
        }
    }

    /// Mirror the cube data into the retained nodes
    pub fn sync_cubes(&mut self, cubes: &CubeSet) {
        for (cube, state) in self.cubes.iter_mut().zip(cubes.iter()) {
            cube.sync(state);
        }
    }

    /// Apply all per-frame props that do not need a `Ui`
    pub fn sync(&mut self, props: &SceneProps<'_>) {
        self.sync_debug_overlay(props.debug_mode);
        self.sync_rotation_lock(props.rotation_locked);
        self.sync_cubes(props.cubes);
        if !props.debug_mode || props.selected.is_none() {
            self.gizmo.end();
        }
    }

    /// Index of the nearest cube hit by the ray
    pub fn pick(&self, ray: &Ray) -> Option<usize> {
        self.cubes
            .iter()
            .filter_map(|cube| {
                let (min, max) = cube.bounds();
                ray.intersect_box(min, max).map(|t| (cube.index(), t))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }

    /// Resolve a click along `ray`. A hit cube consumes the click; a miss
    /// produces nothing.
    pub fn click<R: Rng + ?Sized>(&self, props: &SceneProps<'_>, ray: &Ray, rng: &mut R) -> Option<SceneEvent> {
        let index = self.pick(ray)?;
        let state = props.cubes.get(index)?;
        Some(self.cubes[index].on_click(state, props.debug_mode, rng))
    }

    /// Gizmo center of the cube that can currently be translated
    fn gizmo_target(&self, props: &SceneProps<'_>) -> Option<(usize, Vec3)> {
        if !props.debug_mode {
            return None;
        }
        let index = props.selected?;
        self.cubes
            .get(index)
            .map(|cube| (index, cube.node().translation))
    }

    /// Snapshot of everything to draw this frame
    pub fn build_frame(&self) -> SceneFrame {
        let uniforms = SceneUniforms::new(
            self.camera.build_view_projection_matrix(),
            self.camera.position,
            Vec3::from_array(lighting::POINT_LIGHT_POSITION),
            lighting::POINT_LIGHT_INTENSITY,
            lighting::AMBIENT_INTENSITY,
        );

        // No depth buffer: draw cubes back to front
        let eye = self.camera.position;
        let mut ordered: Vec<&Cube> = self.cubes.iter().collect();
        ordered.sort_by(|a, b| {
            let da = a.node().translation.distance_squared(eye);
            let db = b.node().translation.distance_squared(eye);
            db.total_cmp(&da)
        });

        SceneFrame {
            uniforms,
            planes: vec![self.base.node().instance()],
            lines: self
                .helpers
                .iter()
                .flat_map(SceneHelper::line_vertices)
                .collect(),
            cubes: ordered.iter().map(|cube| cube.node().instance()).collect(),
        }
    }

    /// Lay out, interact with and paint the viewport filling `ui`
    pub fn show<R: Rng + ?Sized>(&mut self, ui: &mut Ui, props: SceneProps<'_>, rng: &mut R) -> Vec<SceneEvent> {
        self.sync(&props);

        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        self.camera.set_aspect(rect.width() / rect.height());

        let mut events = Vec::new();
        let target = self.gizmo_target(&props);

        if let Some(drag) = self.gizmo.active() {
            if response.dragged_by(PointerButton::Primary) {
                if let Some(event) = self.drag_gizmo(&props, rect, drag, response.drag_delta()) {
                    events.push(event);
                }
            }
            if response.drag_stopped() || !response.dragged_by(PointerButton::Primary) {
                self.gizmo.end();
            }
        } else {
            let mut grabbed = false;
            if response.drag_started_by(PointerButton::Primary) {
                // The drag starts past egui's threshold; pick where the press happened
                let press_origin = ui.input(|i| i.pointer.press_origin());
                if let (Some((index, center)), Some(origin)) = (target, press_origin) {
                    if let Some(axis) = TranslateGizmo::hit_test(&self.camera, rect, center, origin) {
                        self.gizmo.begin(index, axis);
                        grabbed = true;

                        let moved = response.interact_pointer_pos().map(|pos| pos - origin);
                        if let Some(event) = moved.and_then(|delta| {
                            self.drag_gizmo(&props, rect, gizmo::GizmoDrag { index, axis }, delta)
                        }) {
                            events.push(event);
                        }
                    }
                }
            }

            if !grabbed && response.dragged_by(PointerButton::Primary) {
                self.controls.rotate(&mut self.camera, response.drag_delta());
            }
            if response.dragged_by(PointerButton::Secondary) {
                self.controls
                    .pan(&mut self.camera, response.drag_delta(), rect.height());
            }
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            self.controls.zoom(&mut self.camera, scroll);
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let ray = self.camera.screen_ray(pos, rect);
                if let Some(event) = self.click(&props, &ray, rng) {
                    events.push(event);
                }
            }
        }

        if ui.is_rect_visible(rect) {
            self.paint(ui, rect, target, response.hover_pos());
        }

        events
    }

    fn drag_gizmo(
        &self,
        props: &SceneProps<'_>,
        rect: Rect,
        drag: gizmo::GizmoDrag,
        pointer_delta: egui::Vec2,
    ) -> Option<SceneEvent> {
        let state = props.cubes.get(drag.index)?;
        let cube = self.cubes.get(drag.index)?;
        let center = cube.node().translation;

        let distance = TranslateGizmo::axis_drag_delta(&self.camera, rect, center, drag.axis, pointer_delta);
        if distance == 0.0 {
            return None;
        }

        let offset = drag.axis.direction() * distance;
        let position = [
            state.position[0] + offset.x as f64,
            state.position[1] + offset.y as f64,
            state.position[2] + offset.z as f64,
        ];
        log::debug!("Cube {} dragged to {:?}", drag.index, position);
        Some(cube.on_translate(state, position))
    }

    fn paint(&self, ui: &Ui, rect: Rect, target: Option<(usize, Vec3)>, hover: Option<egui::Pos2>) {
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, theme::colors().viewport_background);

        painter.add(egui_wgpu::Callback::new_paint_callback(
            rect,
            SceneRenderCallback::new(self.build_frame()),
        ));

        if let Some((_, center)) = target {
            let hovered = hover.and_then(|pos| TranslateGizmo::hit_test(&self.camera, rect, center, pos));
            self.gizmo
                .paint(&painter, &self.camera, rect, center, hovered);
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
