//! Viewport navigation: camera, orbit controls and picking rays

pub mod camera;
pub mod controls;

pub use camera::{Camera3D, Ray};
pub use controls::OrbitControls;
