use crate::assets::{GeometryHandle, MaterialHandle};

/// How the geometry's vertices are assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawMode {
    Triangles,
    /// Pairs of vertices (`LineSegments`).
    Lines,
    /// One connected polyline (`Line`).
    LineStrip,
    Points,
}

#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: String,

    // === 资源引用 ===
    pub geometry: GeometryHandle,
    pub material: MaterialHandle,
    pub mode: DrawMode,

    // 绘制顺序 (Render Order)
    pub render_order: i32,
}

impl Mesh {
    #[must_use]
    pub fn new(geometry: GeometryHandle, material: MaterialHandle) -> Self {
        Self::with_mode(geometry, material, DrawMode::Triangles)
    }

    #[must_use]
    pub fn with_mode(geometry: GeometryHandle, material: MaterialHandle, mode: DrawMode) -> Self {
        let name = match mode {
            DrawMode::Triangles => "Mesh",
            DrawMode::Lines => "LineSegments",
            DrawMode::LineStrip => "Line",
            DrawMode::Points => "Points",
        };
        Self {
            name: name.to_string(),
            geometry,
            material,
            mode,
            render_order: 0,
        }
    }
}
