use glam::Vec3;

use super::{VertexBuffers, min_segments, positive};
use crate::errors::Result;
use crate::resources::geometry::Geometry;

#[derive(Debug, Clone, PartialEq)]
pub struct PlaneOptions {
    pub width: f32,
    pub height: f32,
    pub width_segments: u32,
    pub height_segments: u32,
}

impl Default for PlaneOptions {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            width_segments: 1,
            height_segments: 1,
        }
    }
}

/// XY plane facing +Z.
pub fn create_plane(options: &PlaneOptions) -> Result<Geometry> {
    positive("plane", "width", options.width)?;
    positive("plane", "height", options.height)?;
    min_segments("plane", "width_segments", options.width_segments, 1)?;
    min_segments("plane", "height_segments", options.height_segments, 1)?;

    let PlaneOptions {
        width,
        height,
        width_segments: cols,
        height_segments: rows,
    } = *options;

    let mut buf = VertexBuffers::default();
    for row in 0..=rows {
        // 第一行在顶部
        let y = height * (0.5 - row as f32 / rows as f32);
        for col in 0..=cols {
            let x = width * (col as f32 / cols as f32 - 0.5);
            buf.push(Vec3::new(x, y, 0.0), Vec3::Z);
        }
    }
    buf.quad_grid(0, cols, rows);

    Ok(buf.into_geometry())
}
