//! Material definitions.
//!
//! A closed set of materials covering what the demo scenes draw: lit surfaces
//! (Phong / Lambert), lines and point sprites. Colors are given as sRGB hex and
//! stored linear.

use glam::Vec3;

use crate::assets::TextureHandle;
use crate::resources::color::hex_to_linear;

/// Blinn-Phong lit surface.
#[derive(Debug, Clone, PartialEq)]
pub struct PhongMaterial {
    pub color: Vec3,
    pub emissive: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
    pub flat_shading: bool,
    pub vertex_colors: bool,
    pub opacity: f32,
    pub transparent: bool,
}

impl PhongMaterial {
    #[must_use]
    pub fn new(color: u32) -> Self {
        Self {
            color: hex_to_linear(color),
            emissive: Vec3::ZERO,
            specular: hex_to_linear(0x111111),
            shininess: 30.0,
            flat_shading: false,
            vertex_colors: false,
            opacity: 1.0,
            transparent: false,
        }
    }

    #[must_use]
    pub fn with_emissive(mut self, emissive: u32) -> Self {
        self.emissive = hex_to_linear(emissive);
        self
    }

    #[must_use]
    pub fn with_flat_shading(mut self, flat: bool) -> Self {
        self.flat_shading = flat;
        self
    }

    #[must_use]
    pub fn with_vertex_colors(mut self, enabled: bool) -> Self {
        self.vertex_colors = enabled;
        self
    }
}

/// Diffuse-only lit surface.
#[derive(Debug, Clone, PartialEq)]
pub struct LambertMaterial {
    pub color: Vec3,
    pub emissive: Vec3,
    pub opacity: f32,
    pub transparent: bool,
}

impl LambertMaterial {
    #[must_use]
    pub fn new(color: u32) -> Self {
        Self {
            color: hex_to_linear(color),
            emissive: Vec3::ZERO,
            opacity: 1.0,
            transparent: false,
        }
    }

    /// Blends with `opacity`; anything below 1 is drawn in the transparent pass.
    #[must_use]
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self.transparent = opacity < 1.0;
        self
    }
}

/// Unlit lines.
#[derive(Debug, Clone, PartialEq)]
pub struct LineBasicMaterial {
    pub color: Vec3,
    pub opacity: f32,
    pub transparent: bool,
    pub vertex_colors: bool,
}

impl LineBasicMaterial {
    #[must_use]
    pub fn new(color: u32) -> Self {
        Self {
            color: hex_to_linear(color),
            opacity: 1.0,
            transparent: false,
            vertex_colors: false,
        }
    }

    #[must_use]
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self.transparent = opacity < 1.0;
        self
    }

    #[must_use]
    pub fn with_vertex_colors(mut self, enabled: bool) -> Self {
        self.vertex_colors = enabled;
        self
    }
}

/// Camera-facing point sprites.
#[derive(Debug, Clone, PartialEq)]
pub struct PointsMaterial {
    pub color: Vec3,
    /// World-space size, used when the geometry has no `size` attribute.
    pub size: f32,
    pub vertex_colors: bool,
    /// Scale sprites with distance to the camera.
    pub size_attenuation: bool,
    /// Fragments whose sprite alpha is below this are discarded.
    pub alpha_test: f32,
    /// Sprite texture; `None` draws a procedural disc.
    pub sprite: Option<TextureHandle>,
}

impl PointsMaterial {
    #[must_use]
    pub fn new(color: u32) -> Self {
        Self {
            color: hex_to_linear(color),
            size: 1.0,
            vertex_colors: false,
            size_attenuation: true,
            alpha_test: 0.0,
            sprite: None,
        }
    }

    #[must_use]
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub fn with_vertex_colors(mut self, enabled: bool) -> Self {
        self.vertex_colors = enabled;
        self
    }

    #[must_use]
    pub fn with_size_attenuation(mut self, enabled: bool) -> Self {
        self.size_attenuation = enabled;
        self
    }

    #[must_use]
    pub fn with_alpha_test(mut self, alpha_test: f32) -> Self {
        self.alpha_test = alpha_test;
        self
    }

    #[must_use]
    pub fn with_sprite(mut self, sprite: TextureHandle) -> Self {
        self.sprite = Some(sprite);
        self
    }
}

/// Lighting model selector shared with the shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ShadingModel {
    Unlit = 0,
    Lambert = 1,
    Phong = 2,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    Phong(PhongMaterial),
    Lambert(LambertMaterial),
    LineBasic(LineBasicMaterial),
    Points(PointsMaterial),
}

impl Material {
    #[must_use]
    pub fn color(&self) -> Vec3 {
        match self {
            Material::Phong(m) => m.color,
            Material::Lambert(m) => m.color,
            Material::LineBasic(m) => m.color,
            Material::Points(m) => m.color,
        }
    }

    #[must_use]
    pub fn opacity(&self) -> f32 {
        match self {
            Material::Phong(m) => m.opacity,
            Material::Lambert(m) => m.opacity,
            Material::LineBasic(m) => m.opacity,
            Material::Points(_) => 1.0,
        }
    }

    #[must_use]
    pub fn is_transparent(&self) -> bool {
        match self {
            Material::Phong(m) => m.transparent,
            Material::Lambert(m) => m.transparent,
            Material::LineBasic(m) => m.transparent,
            Material::Points(_) => false,
        }
    }

    #[must_use]
    pub fn vertex_colors(&self) -> bool {
        match self {
            Material::Phong(m) => m.vertex_colors,
            Material::Lambert(_) => false,
            Material::LineBasic(m) => m.vertex_colors,
            Material::Points(m) => m.vertex_colors,
        }
    }

    #[must_use]
    pub fn shading_model(&self) -> ShadingModel {
        match self {
            Material::Phong(_) => ShadingModel::Phong,
            Material::Lambert(_) => ShadingModel::Lambert,
            Material::LineBasic(_) | Material::Points(_) => ShadingModel::Unlit,
        }
    }

    /// Whether the material is meant for filled triangles.
    #[must_use]
    pub fn is_surface(&self) -> bool {
        matches!(self, Material::Phong(_) | Material::Lambert(_))
    }
}

impl From<PhongMaterial> for Material {
    fn from(m: PhongMaterial) -> Self {
        Material::Phong(m)
    }
}

impl From<LambertMaterial> for Material {
    fn from(m: LambertMaterial) -> Self {
        Material::Lambert(m)
    }
}

impl From<LineBasicMaterial> for Material {
    fn from(m: LineBasicMaterial) -> Self {
        Material::LineBasic(m)
    }
}

impl From<PointsMaterial> for Material {
    fn from(m: PointsMaterial) -> Self {
        Material::Points(m)
    }
}
