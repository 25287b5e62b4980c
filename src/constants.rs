//! Application-wide constants and default values
//!
//! Centralized location for all hard-coded values of the cube editor

/// Number of cubes in a project; the cube array never grows or shrinks
pub const CUBE_COUNT: usize = 6;

/// Cube color palette
pub mod palette {
    /// Initial colors, one per cube, also the pool for random recoloring
    pub const COLORS: [&str; super::CUBE_COUNT] = [
        "#ff0000", "#00ff00", "#0000ff", "#ffff00", "#ff00ff", "#00ffff",
    ];
}

/// Initial cube layout on the ground plane
pub mod layout {
    /// Cubes per grid row
    pub const COLUMNS: usize = 3;

    /// Distance between neighbouring cube centers
    pub const SPACING: f64 = 2.0;

    /// Height of the cube centers so unit cubes rest on the plane
    pub const RESTING_HEIGHT: f64 = 0.5;

    /// Offset applied to the column coordinate
    pub const COLUMN_OFFSET: f64 = -2.0;

    /// Offset applied to the row coordinate
    pub const ROW_OFFSET: f64 = -1.0;
}

/// Camera defaults and manipulation sensitivity
pub mod camera {
    /// Initial eye position
    pub const POSITION: [f32; 3] = [5.0, 5.0, 5.0];

    /// Vertical field of view in degrees
    pub const FOV_DEGREES: f32 = 60.0;

    pub const NEAR: f32 = 0.1;
    pub const FAR: f32 = 1000.0;

    /// Radians of orbit per dragged point
    pub const ORBIT_SENSITIVITY: f32 = 0.01;

    /// Zoom factor per scrolled point
    pub const ZOOM_SENSITIVITY: f32 = 0.001;

    /// Closest the eye may get to the orbit target
    pub const MIN_DISTANCE: f32 = 0.5;
}

/// Scene lighting
pub mod lighting {
    pub const AMBIENT_INTENSITY: f32 = 0.5;
    pub const POINT_LIGHT_POSITION: [f32; 3] = [10.0, 10.0, 10.0];
    pub const POINT_LIGHT_INTENSITY: f32 = 1.0;
}

/// Static scene content
pub mod scene {
    /// Edge length of the ground plane
    pub const BASE_SIZE: f32 = 10.0;

    /// Ground plane color
    pub const BASE_COLOR: &str = "#cccccc";

    /// Axis length of the debug axes helper
    pub const AXES_HELPER_SIZE: f32 = 5.0;

    /// Clear color behind the scene
    pub const BACKGROUND: [u8; 3] = [17, 24, 39];
}

/// Translate gizmo sizing
pub mod gizmo {
    /// Arrow length in world units
    pub const AXIS_LENGTH: f32 = 1.5;

    /// Pick tolerance around an arrow in screen points
    pub const PICK_RADIUS: f32 = 8.0;

    /// Stroke width of an arrow in screen points
    pub const STROKE_WIDTH: f32 = 3.0;
}

/// Project export
pub mod project {
    /// File name used by "Save Project"
    pub const FILE_NAME: &str = "cube_project.json";
}

/// UI spacing and sizing constants
pub mod ui {
    /// Default window size
    pub const WINDOW_SIZE: [f32; 2] = [1280.0, 800.0];

    /// Distance of the overlay panels from the window edges
    pub const OVERLAY_MARGIN: f32 = 16.0;

    /// Inner margin of overlay frames
    pub const FRAME_MARGIN: f32 = 8.0;

    /// Rounding of overlay frames
    pub const FRAME_ROUNDING: f32 = 6.0;

    /// Width of the numeric inputs in the edit form
    pub const FIELD_WIDTH: f32 = 80.0;
}
