//! Colors of the editor overlay and viewport
//!
//! Layout sizes live in [`crate::constants::ui`]; this module only holds the
//! palette the overlay is painted with.

use egui::Color32;

use crate::constants::scene;

/// Color palette for the overlay
pub struct Colors {
    // Viewport
    pub viewport_background: Color32,

    // Overlay panels
    pub panel_background: Color32,
    pub panel_border: Color32,
    pub panel_heading: Color32,
    pub instructions_text: Color32,

    // Rotation badge
    pub badge_locked: Color32,
    pub badge_unlocked: Color32,
    pub badge_text: Color32,
}

impl Colors {
    pub fn dark() -> Self {
        let [r, g, b] = scene::BACKGROUND;
        Self {
            viewport_background: Color32::from_rgb(r, g, b),

            panel_background: Color32::from_rgba_unmultiplied(31, 41, 55, 230),
            panel_border: Color32::from_rgb(55, 65, 81),
            panel_heading: Color32::WHITE,
            instructions_text: Color32::from_rgb(209, 213, 219),

            badge_locked: Color32::from_rgb(220, 38, 38),
            badge_unlocked: Color32::from_rgb(22, 163, 74),
            badge_text: Color32::WHITE,
        }
    }

    /// Badge fill for the current rotation lock state
    pub fn rotation_badge(&self, locked: bool) -> Color32 {
        if locked {
            self.badge_locked
        } else {
            self.badge_unlocked
        }
    }
}

/// Complete theme of the editor
pub struct Theme {
    pub colors: Colors,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            colors: Colors::dark(),
        }
    }
}

static GLOBAL_THEME: once_cell::sync::Lazy<Theme> = once_cell::sync::Lazy::new(Theme::dark);

/// Get the global theme
pub fn theme() -> &'static Theme {
    &GLOBAL_THEME
}

pub fn colors() -> &'static Colors {
    &theme().colors
}
