use glam::Vec3;

use super::{VertexBuffers, min_segments, positive};
use crate::errors::Result;
use crate::resources::geometry::Geometry;

#[derive(Debug, Clone, PartialEq)]
pub struct BoxOptions {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    pub depth_segments: u32,
}

impl Default for BoxOptions {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            depth: 1.0,
            width_segments: 1,
            height_segments: 1,
            depth_segments: 1,
        }
    }
}

impl BoxOptions {
    /// Single-segment box.
    #[must_use]
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            width,
            height,
            depth,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_segments(mut self, width: u32, height: u32, depth: u32) -> Self {
        self.width_segments = width;
        self.height_segments = height;
        self.depth_segments = depth;
        self
    }
}

/// Axis-aligned box centered on the origin, 6 faces with split vertices.
pub fn create_box(options: &BoxOptions) -> Result<Geometry> {
    positive("box", "width", options.width)?;
    positive("box", "height", options.height)?;
    positive("box", "depth", options.depth)?;
    min_segments("box", "width_segments", options.width_segments, 1)?;
    min_segments("box", "height_segments", options.height_segments, 1)?;
    min_segments("box", "depth_segments", options.depth_segments, 1)?;

    let BoxOptions {
        width: w,
        height: h,
        depth: d,
        width_segments: ws,
        height_segments: hs,
        depth_segments: ds,
    } = *options;

    let mut buf = VertexBuffers::default();
    // (u, v, w) axes, u/v direction, face extents, grid
    build_face(&mut buf, [2, 1, 0], -1.0, -1.0, d, h, w, ds, hs); // +X
    build_face(&mut buf, [2, 1, 0], 1.0, -1.0, d, h, -w, ds, hs); // -X
    build_face(&mut buf, [0, 2, 1], 1.0, 1.0, w, d, h, ws, ds); // +Y
    build_face(&mut buf, [0, 2, 1], 1.0, -1.0, w, d, -h, ws, ds); // -Y
    build_face(&mut buf, [0, 1, 2], 1.0, -1.0, w, h, d, ws, hs); // +Z
    build_face(&mut buf, [0, 1, 2], -1.0, -1.0, w, h, -d, ws, hs); // -Z

    Ok(buf.into_geometry())
}

/// One box face as a `grid_x × grid_y` grid; the sign of `depth` picks the side.
fn build_face(
    buf: &mut VertexBuffers,
    axes: [usize; 3],
    u_dir: f32,
    v_dir: f32,
    width: f32,
    height: f32,
    depth: f32,
    grid_x: u32,
    grid_y: u32,
) {
    let [u, v, w] = axes;
    let segment_width = width / grid_x as f32;
    let segment_height = height / grid_y as f32;
    let width_half = width / 2.0;
    let height_half = height / 2.0;
    let depth_half = depth / 2.0;

    let start = buf.len();

    for iy in 0..=grid_y {
        let y = iy as f32 * segment_height - height_half;
        for ix in 0..=grid_x {
            let x = ix as f32 * segment_width - width_half;

            let mut position = Vec3::ZERO;
            position[u] = x * u_dir;
            position[v] = y * v_dir;
            position[w] = depth_half;

            let mut normal = Vec3::ZERO;
            normal[w] = if depth > 0.0 { 1.0 } else { -1.0 };

            buf.push(position, normal);
        }
    }

    buf.quad_grid(start, grid_x, grid_y);
}
