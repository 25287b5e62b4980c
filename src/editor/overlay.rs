//! Screen-space controls drawn over the viewport
//!
//! The overlay reads editor state through [`OverlayView`] and reports what the
//! user did as [`OverlayAction`]s; it never mutates editor state itself.

use egui::{Align2, Area, Context, Frame, Grid, Id, RichText, Stroke, TextEdit, Ui};

use super::edit_form::{Dimension, EditBuffer};
use crate::constants::ui;
use crate::theme;

const INSTRUCTIONS: [&str; 7] = [
    "Enable debug mode to select and edit cubes",
    "Click a cube to select it",
    "Edit the values, then press Apply",
    "Drag the arrows to move the selected cube",
    "Disable debug mode and click a cube for a random color",
    "Press SPACE to lock or unlock camera rotation",
    "Press Save Project to download the scene",
];

/// User request coming from the overlay
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayAction {
    SetDebugMode(bool),
    EditDimension(Dimension, String),
    EditColor([u8; 3]),
    Apply,
    SaveProject,
}

/// Editor state the overlay displays
#[derive(Debug, Clone, Copy)]
pub struct OverlayView<'a> {
    pub debug_mode: bool,
    pub selected: Option<usize>,
    pub edit: Option<&'a EditBuffer>,
    pub rotation_locked: bool,
}

pub fn show(ctx: &Context, view: &OverlayView<'_>) -> Vec<OverlayAction> {
    let mut actions = Vec::new();

    Area::new(Id::new("overlay_controls"))
        .anchor(Align2::LEFT_TOP, [ui::OVERLAY_MARGIN, ui::OVERLAY_MARGIN])
        .show(ctx, |ui| {
            panel_frame().show(ui, |ui| {
                let mut debug_mode = view.debug_mode;
                if ui.checkbox(&mut debug_mode, "Debug mode").changed() {
                    actions.push(OverlayAction::SetDebugMode(debug_mode));
                }

                if view.debug_mode {
                    if let (Some(index), Some(edit)) = (view.selected, view.edit) {
                        ui.separator();
                        edit_panel(ui, index, edit, &mut actions);
                    }
                }

                ui.separator();
                if ui.button("Save Project").clicked() {
                    actions.push(OverlayAction::SaveProject);
                }
            });
        });

    Area::new(Id::new("overlay_instructions"))
        .anchor(Align2::LEFT_BOTTOM, [ui::OVERLAY_MARGIN, -ui::OVERLAY_MARGIN])
        .interactable(false)
        .show(ctx, |ui| {
            panel_frame().show(ui, |ui| {
                ui.label(RichText::new("Instructions").strong().color(theme::colors().panel_heading));
                for line in INSTRUCTIONS {
                    ui.label(RichText::new(format!("• {line}")).color(theme::colors().instructions_text));
                }
            });
        });

    Area::new(Id::new("overlay_rotation_badge"))
        .anchor(Align2::RIGHT_TOP, [-ui::OVERLAY_MARGIN, ui::OVERLAY_MARGIN])
        .interactable(false)
        .show(ctx, |ui| rotation_badge(ui, view.rotation_locked));

    actions
}

fn panel_frame() -> Frame {
    let colors = theme::colors();
    Frame::new()
        .fill(colors.panel_background)
        .stroke(Stroke::new(1.0, colors.panel_border))
        .inner_margin(ui::FRAME_MARGIN)
        .corner_radius(ui::FRAME_ROUNDING)
}

fn edit_panel(ui: &mut Ui, index: usize, edit: &EditBuffer, actions: &mut Vec<OverlayAction>) {
    ui.label(
        RichText::new(format!("Edit cube {}", index + 1))
            .strong()
            .color(theme::colors().panel_heading),
    );

    Grid::new("edit_cube_fields").num_columns(2).show(ui, |ui| {
        for dimension in Dimension::ALL {
            ui.label(dimension.label());
            let mut text = edit.text(dimension).to_owned();
            let response = ui.add(TextEdit::singleline(&mut text).desired_width(ui::FIELD_WIDTH));
            if response.changed() {
                actions.push(OverlayAction::EditDimension(dimension, text));
            }
            ui.end_row();
        }

        ui.label("Color");
        let mut rgb = edit.color_rgb();
        if ui.color_edit_button_srgb(&mut rgb).changed() {
            actions.push(OverlayAction::EditColor(rgb));
        }
        ui.end_row();
    });

    if ui.button("Apply").clicked() {
        actions.push(OverlayAction::Apply);
    }
}

fn rotation_badge(ui: &mut Ui, locked: bool) {
    let colors = theme::colors();
    let label = if locked {
        "Rotation: Locked"
    } else {
        "Rotation: Unlocked"
    };
    Frame::new()
        .fill(colors.rotation_badge(locked))
        .inner_margin(ui::FRAME_MARGIN)
        .corner_radius(ui::FRAME_ROUNDING)
        .show(ui, |ui| {
            ui.label(RichText::new(label).strong().color(colors.badge_text));
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::CubeState;

    fn run(view: &OverlayView<'_>) -> Vec<OverlayAction> {
        let ctx = Context::default();
        let mut actions = Vec::new();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            actions = show(ctx, view);
        });
        actions
    }

    /// Every piece of text painted once the overlay has settled
    fn painted_text(view: &OverlayView<'_>) -> Vec<String> {
        let ctx = Context::default();
        let mut output = ctx.run(egui::RawInput::default(), |ctx| {
            show(ctx, view);
        });
        // Areas and grids are laid out invisibly the first time they appear
        for _ in 0..2 {
            output = ctx.run(egui::RawInput::default(), |ctx| {
                show(ctx, view);
            });
        }
        output
            .shapes
            .iter()
            .filter_map(|clipped| match &clipped.shape {
                egui::Shape::Text(text) => Some(text.galley.text().to_owned()),
                _ => None,
            })
            .collect()
    }

    fn has(texts: &[String], wanted: &str) -> bool {
        texts.iter().any(|text| text == wanted)
    }

    #[test]
    fn test_idle_overlay_reports_nothing() {
        let edit = EditBuffer::new(&CubeState::initial(0));
        let view = OverlayView {
            debug_mode: true,
            selected: Some(0),
            edit: Some(&edit),
            rotation_locked: true,
        };
        assert!(run(&view).is_empty());
    }

    #[test]
    fn test_edit_form_shown_for_selection_in_debug() {
        let edit = EditBuffer::new(&CubeState::initial(2));
        let texts = painted_text(&OverlayView {
            debug_mode: true,
            selected: Some(2),
            edit: Some(&edit),
            rotation_locked: false,
        });
        assert!(has(&texts, "Edit cube 3"));
        for label in ["Width", "Height", "Depth", "Color", "Apply"] {
            assert!(has(&texts, label), "missing {label}");
        }
        assert!(has(&texts, "Debug mode"));
        assert!(has(&texts, "Save Project"));
    }

    #[test]
    fn test_edit_form_hidden_without_debug_mode() {
        let edit = EditBuffer::new(&CubeState::initial(2));
        let texts = painted_text(&OverlayView {
            debug_mode: false,
            selected: Some(2),
            edit: Some(&edit),
            rotation_locked: false,
        });
        assert!(!texts.iter().any(|text| text.starts_with("Edit cube")));
        assert!(!has(&texts, "Apply"));
        assert!(has(&texts, "Debug mode"));
        assert!(has(&texts, "Save Project"));
    }

    #[test]
    fn test_edit_form_hidden_without_selection() {
        let texts = painted_text(&OverlayView {
            debug_mode: true,
            selected: None,
            edit: None,
            rotation_locked: false,
        });
        assert!(!texts.iter().any(|text| text.starts_with("Edit cube")));
        assert!(!has(&texts, "Apply"));
        assert!(!has(&texts, "Width"));
    }

    #[test]
    fn test_rotation_badge_text() {
        let locked = painted_text(&OverlayView {
            debug_mode: false,
            selected: None,
            edit: None,
            rotation_locked: true,
        });
        assert!(has(&locked, "Rotation: Locked"));
        assert!(!has(&locked, "Rotation: Unlocked"));

        let unlocked = painted_text(&OverlayView {
            debug_mode: false,
            selected: None,
            edit: None,
            rotation_locked: false,
        });
        assert!(has(&unlocked, "Rotation: Unlocked"));
        assert!(!has(&unlocked, "Rotation: Locked"));
    }
}
