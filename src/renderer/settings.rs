//! Renderer Settings
//!
//! [`RenderSettings`] configures the forward renderer once, at initialization.
//! Everything scene-specific (background, lights, camera) lives on the scene
//! host instead; these settings only describe how frames reach the surface.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use stage3d::renderer::RenderSettings;
//!
//! // Defaults: vsync on, high-performance adapter, black clear color
//! let settings = RenderSettings::default();
//!
//! // Uncapped frame rate with a faint ambient term
//! let settings = RenderSettings {
//!     vsync: false,
//!     ambient: 0.1,
//!     ..Default::default()
//! };
//!
//! App::new()
//!     .with_settings(settings)
//!     .run(MyScene::default())?;
//! ```

/// Global configuration for the renderer.
///
/// # Fields at a Glance
///
/// | Field              | Default              | Notes                                  |
/// |--------------------|----------------------|----------------------------------------|
/// | `vsync`            | `true`               | `AutoVsync` vs `AutoNoVsync`           |
/// | `power_preference` | `HighPerformance`    | Adapter selection hint                 |
/// | `clear_color`      | black                | Used when the scene has no background  |
/// | `ambient`          | `0.05`               | Added to lit materials, white          |
/// | `depth_format`     | `Depth32Float`       | Recreated on every resize              |
#[derive(Debug, Clone)]
pub struct RenderSettings {
    /// Enable vertical sync.
    ///
    /// When `false`, frames are presented as fast as the surface allows,
    /// which is what the FPS counter in the demo window is for.
    pub vsync: bool,

    /// GPU power preference used when requesting the adapter.
    pub power_preference: wgpu::PowerPreference,

    /// Clear color for frames whose scene sets no background.
    ///
    /// Components are linear; the surface is sRGB.
    pub clear_color: wgpu::Color,

    /// Constant white ambient term applied to Lambert and Phong surfaces,
    /// on top of any ambient lights in the scene.
    ///
    /// Zero matches an unlit-by-default scene: faces turned away from every
    /// directional light render black (plus emissive).
    pub ambient: f32,

    /// Depth buffer format.
    pub depth_format: wgpu::TextureFormat,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            vsync: true,
            power_preference: wgpu::PowerPreference::HighPerformance,
            clear_color: wgpu::Color::BLACK,
            ambient: 0.05,
            depth_format: wgpu::TextureFormat::Depth32Float,
        }
    }
}

impl RenderSettings {
    #[must_use]
    pub fn present_mode(&self) -> wgpu::PresentMode {
        if self.vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        }
    }
}
