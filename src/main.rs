//! Cube editor - interactive 3D cube scene
//!
//! Opens a window with the cube scene and its overlay controls.

use cube_editor::constants::ui;
use cube_editor::gpu::GraphicsConfig;
use cube_editor::CubeEditor;

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = eframe::NativeOptions {
        renderer: eframe::Renderer::Wgpu,
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(ui::WINDOW_SIZE)
            .with_title("Cube Editor"),
        ..Default::default()
    };

    eframe::run_native(
        "Cube Editor",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            match cc.wgpu_render_state.as_ref() {
                Some(render_state) => {
                    GraphicsConfig::install(render_state.target_format);
                }
                None => log::warn!("No wgpu render state; using default graphics settings"),
            }
            Ok(Box::new(CubeEditor::new()))
        }),
    )
}
