//! Top-level editor: owns the cube data and every piece of UI state

pub mod edit_form;
pub mod file_manager;
pub mod input;
pub mod overlay;

pub use edit_form::{Dimension, EditBuffer};
pub use file_manager::{FileManager, ProjectError};
pub use input::Shortcut;
pub use overlay::{OverlayAction, OverlayView};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::project::CubeSet;
use crate::scene::{Scene, SceneEvent, SceneProps};

/// Main application state for the cube editor
pub struct CubeEditor {
    cubes: CubeSet,
    debug_mode: bool,
    selected: Option<usize>,
    edit: Option<EditBuffer>,
    rotation_locked: bool,
    rotation_shortcut: Shortcut,
    scene: Scene,
    file_manager: FileManager,
    rng: StdRng,
}

impl CubeEditor {
    pub fn new() -> Self {
        Self::with_parts(FileManager::new(), StdRng::from_os_rng())
    }

    /// Editor saving through `file_manager` and coloring cubes from `rng`
    pub fn with_parts(file_manager: FileManager, rng: StdRng) -> Self {
        Self {
            cubes: CubeSet::initial(),
            debug_mode: false,
            selected: None,
            edit: None,
            rotation_locked: false,
            rotation_shortcut: Shortcut::rotation_lock(),
            scene: Scene::new(),
            file_manager,
            rng,
        }
    }

    pub fn cubes(&self) -> &CubeSet {
        &self.cubes
    }

    pub fn debug_mode(&self) -> bool {
        self.debug_mode
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn edit_buffer(&self) -> Option<&EditBuffer> {
        self.edit.as_ref()
    }

    pub fn edit_buffer_mut(&mut self) -> Option<&mut EditBuffer> {
        self.edit.as_mut()
    }

    pub fn rotation_locked(&self) -> bool {
        self.rotation_locked
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn file_manager(&self) -> &FileManager {
        &self.file_manager
    }

    /// Turning debug mode off also clears the selection
    pub fn set_debug_mode(&mut self, enabled: bool) {
        if self.debug_mode == enabled {
            return;
        }
        self.debug_mode = enabled;
        log::info!("Debug mode {}", if enabled { "enabled" } else { "disabled" });
        if !enabled {
            self.select(None);
        }
    }

    /// Change the selection. A new selection starts a fresh edit buffer;
    /// reselecting the current cube keeps the pending edits.
    pub fn select(&mut self, index: Option<usize>) {
        let index = index.filter(|&i| self.debug_mode && i < self.cubes.len());
        if index == self.selected {
            return;
        }
        self.selected = index;
        self.edit = index.and_then(|i| self.cubes.get(i)).map(EditBuffer::new);
        log::debug!("Selection changed to {index:?}");
    }

    /// Write the edit buffer into the selected cube, verbatim
    pub fn apply(&mut self) -> bool {
        let (Some(index), Some(edit)) = (self.selected, self.edit.as_ref()) else {
            return false;
        };
        let state = edit.state().clone();
        log::debug!("Applying edits to cube {index}");
        self.set_cubes(Scene::update_cube(&self.cubes, index, state));
        true
    }

    pub fn toggle_rotation_lock(&mut self) {
        self.rotation_locked = !self.rotation_locked;
        log::info!(
            "Rotation {}",
            if self.rotation_locked { "locked" } else { "unlocked" }
        );
    }

    /// Export the cubes; failures are logged only
    pub fn save_project(&mut self) {
        match self.file_manager.save_project(&self.cubes) {
            Ok(path) => log::info!("Project saved to {}", path.display()),
            Err(err) => log::error!("Saving project failed: {err}"),
        }
    }

    pub fn apply_scene_event(&mut self, event: SceneEvent) {
        match event {
            SceneEvent::Select(index) => self.select(Some(index)),
            SceneEvent::UpdateCube { index, state } => {
                self.set_cubes(Scene::update_cube(&self.cubes, index, state));
            }
        }
    }

    pub fn apply_overlay_action(&mut self, action: OverlayAction) {
        match action {
            OverlayAction::SetDebugMode(enabled) => self.set_debug_mode(enabled),
            OverlayAction::EditDimension(dimension, text) => {
                if let Some(edit) = self.edit.as_mut() {
                    edit.set_text(dimension, text);
                }
            }
            OverlayAction::EditColor(rgb) => {
                if let Some(edit) = self.edit.as_mut() {
                    edit.set_color(rgb);
                }
            }
            OverlayAction::Apply => {
                self.apply();
            }
            OverlayAction::SaveProject => self.save_project(),
        }
    }

    /// Replace the cube data; the edit buffer follows the stored state of
    /// the selected cube
    fn set_cubes(&mut self, cubes: CubeSet) {
        self.cubes = cubes;
        if let Some(index) = self.selected {
            self.edit = self.cubes.get(index).map(EditBuffer::new);
        }
    }

    /// Run one frame of input handling and layout
    pub fn ui(&mut self, ctx: &egui::Context) {
        if self.rotation_shortcut.consume(ctx) {
            self.toggle_rotation_lock();
        }

        let events = egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let props = SceneProps {
                    cubes: &self.cubes,
                    debug_mode: self.debug_mode,
                    selected: self.selected,
                    rotation_locked: self.rotation_locked,
                };
                self.scene.show(ui, props, &mut self.rng)
            })
            .inner;
        for event in events {
            self.apply_scene_event(event);
        }

        let view = OverlayView {
            debug_mode: self.debug_mode,
            selected: self.selected,
            edit: self.edit.as_ref(),
            rotation_locked: self.rotation_locked,
        };
        for action in overlay::show(ctx, &view) {
            self.apply_overlay_action(action);
        }
    }
}

impl Default for CubeEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl eframe::App for CubeEditor {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui(ctx);
    }
}
