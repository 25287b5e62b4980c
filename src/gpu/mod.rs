//! GPU rendering module
//!
//! Draws the cube scene with wgpu inside an egui paint callback.
//!
//! ## Architecture
//!
//! - [`config`] - surface format and multisample settings
//! - [`mesh`] - static cube and plane geometry
//! - [`instance`] - per-frame instance, line and uniform data
//! - [`scene_rendering`] - pipelines, buffers and draw calls
//! - [`scene_callback`] - egui paint callback integration
//! - `shaders/` - WGSL shaders for lit meshes and lines

pub mod config;
pub mod instance;
pub mod mesh;
pub mod scene_callback;
pub mod scene_rendering;

pub use config::{global_sample_count, GraphicsConfig};
pub use instance::{srgb_to_linear, LineVertex, MeshInstance, SceneFrame, SceneUniforms};
pub use mesh::{Mesh3D, Vertex3D};
pub use scene_callback::SceneRenderCallback;
pub use scene_rendering::SceneRenderer;
