//! Cube editor library
//!
//! An interactive 3D scene of six cubes on a ground plane, with a debug mode
//! for selecting, moving and resizing cubes and a JSON project export.

pub mod constants;
pub mod editor;
pub mod gpu;
pub mod project;
pub mod scene;
pub mod theme;
pub mod viewport;

pub use editor::CubeEditor;
pub use project::{CubeSet, CubeState};
