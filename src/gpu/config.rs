//! Centralized graphics configuration for consistent eframe::wgpu settings

use eframe::wgpu;
use once_cell::sync::OnceCell;

static GRAPHICS_CONFIG: OnceCell<GraphicsConfig> = OnceCell::new();

/// Global graphics configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphicsConfig {
    pub sample_count: u32,
    pub texture_format: wgpu::TextureFormat,
}

impl GraphicsConfig {
    /// Record the surface format egui renders into. The first call wins.
    pub fn install(texture_format: wgpu::TextureFormat) -> bool {
        let installed = GRAPHICS_CONFIG
            .set(Self {
                sample_count: global_sample_count(),
                texture_format,
            })
            .is_ok();
        if installed {
            log::info!("Graphics configured for {texture_format:?}");
        }
        installed
    }

    /// Get the global graphics configuration
    pub fn global() -> Self {
        GRAPHICS_CONFIG.get().copied().unwrap_or(Self {
            sample_count: global_sample_count(),
            texture_format: wgpu::TextureFormat::Bgra8Unorm,
        })
    }

    /// Create multisample state from config
    pub fn multisample_state(&self) -> wgpu::MultisampleState {
        wgpu::MultisampleState {
            count: self.sample_count,
            mask: !0,
            alpha_to_coverage_enabled: false,
        }
    }

    /// Create color target state from config
    pub fn color_target_state(&self, blend: wgpu::BlendState) -> wgpu::ColorTargetState {
        wgpu::ColorTargetState {
            format: self.texture_format,
            blend: Some(blend),
            write_mask: wgpu::ColorWrites::ALL,
        }
    }
}

/// Get the global sample count (for eframe configuration)
pub fn global_sample_count() -> u32 {
    1 // Multisampling off for compatibility with egui's render pass
}
