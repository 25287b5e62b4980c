//! egui paint callback that hands a [`SceneFrame`] to the shared renderer

use once_cell::sync::Lazy;
use std::sync::{Arc, Mutex};

use super::config::GraphicsConfig;
use super::instance::SceneFrame;
use super::scene_rendering::SceneRenderer;

/// Renderer shared by every frame, created on the first prepare
pub static GLOBAL_SCENE_RENDERER: Lazy<Arc<Mutex<Option<SceneRenderer>>>> =
    Lazy::new(|| Arc::new(Mutex::new(None)));

/// Paint callback carrying one frame of scene data
pub struct SceneRenderCallback {
    frame: SceneFrame,
}

impl SceneRenderCallback {
    pub fn new(frame: SceneFrame) -> Self {
        Self { frame }
    }
}

impl egui_wgpu::CallbackTrait for SceneRenderCallback {
    fn prepare(
        &self,
        device: &eframe::wgpu::Device,
        queue: &eframe::wgpu::Queue,
        _screen_descriptor: &egui_wgpu::ScreenDescriptor,
        _egui_encoder: &mut eframe::wgpu::CommandEncoder,
        _callback_resources: &mut egui_wgpu::CallbackResources,
    ) -> Vec<eframe::wgpu::CommandBuffer> {
        let mut renderer_lock = match GLOBAL_SCENE_RENDERER.lock() {
            Ok(lock) => lock,
            Err(_) => return Vec::new(), // Skip rendering if mutex is poisoned
        };

        let renderer = renderer_lock.get_or_insert_with(|| {
            log::info!("Creating scene renderer");
            SceneRenderer::new(device, &GraphicsConfig::global())
        });
        renderer.upload(device, queue, &self.frame);

        Vec::new()
    }

    fn paint(
        &self,
        _info: egui::PaintCallbackInfo,
        render_pass: &mut eframe::wgpu::RenderPass<'static>,
        _callback_resources: &egui_wgpu::CallbackResources,
    ) {
        let renderer_lock = match GLOBAL_SCENE_RENDERER.lock() {
            Ok(lock) => lock,
            Err(_) => return,
        };
        if let Some(renderer) = renderer_lock.as_ref() {
            renderer.render(render_pass);
        }
    }
}
