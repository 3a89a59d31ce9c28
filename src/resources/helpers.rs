//! Line geometries derived from other geometries, plus the ground grid.
//!
//! All outputs are meant to be drawn with [`DrawMode::Lines`](super::mesh::DrawMode::Lines).

use glam::Vec3;
use rustc_hash::{FxHashMap, FxHashSet};

use super::color::hex_to_linear;
use super::geometry::{Attribute, COLOR, Geometry, NORMAL, POSITION};

/// Center line color of [`grid`].
pub const GRID_CENTER_COLOR: u32 = 0x44_44_44;
/// Color of the remaining [`grid`] lines.
pub const GRID_LINE_COLOR: u32 = 0x88_88_88;

/// Every unique triangle edge as a line segment.
///
/// Shares the source positions and indexes them pairwise.
#[must_use]
pub fn wireframe(source: &Geometry) -> Geometry {
    let mut seen: FxHashSet<(u32, u32)> = FxHashSet::default();
    let mut index: Vec<u32> = Vec::new();

    source.for_each_triangle(|a, b, c| {
        for (u, v) in [(a, b), (b, c), (c, a)] {
            let (u, v) = (u as u32, v as u32);
            let key = (u.min(v), u.max(v));
            if seen.insert(key) {
                index.extend_from_slice(&[key.0, key.1]);
            }
        }
    });

    let mut geo = Geometry::new();
    if let Some(pos) = source.get_attribute(POSITION) {
        geo.set_attribute(POSITION, pos.clone());
    }
    geo.set_indices(index);
    geo.compute_bounding_box();
    geo
}

/// Edges whose adjacent faces meet at more than `threshold_deg`, plus open
/// boundary edges.
///
/// Positions are matched after rounding to four decimals so non-indexed
/// geometry (one vertex per triangle corner) is handled too.
#[must_use]
pub fn edges(source: &Geometry, threshold_deg: f32) -> Geometry {
    const PRECISION: f32 = 1e4;
    let threshold_dot = threshold_deg.to_radians().cos();
    let quantize = |p: Vec3| -> [i64; 3] {
        [
            (p.x * PRECISION).round() as i64,
            (p.y * PRECISION).round() as i64,
            (p.z * PRECISION).round() as i64,
        ]
    };

    struct HalfEdge {
        a: Vec3,
        b: Vec3,
        normal: Vec3,
    }

    let mut open: FxHashMap<([i64; 3], [i64; 3]), HalfEdge> = FxHashMap::default();
    let mut lines: Vec<Vec3> = Vec::new();

    source.for_each_triangle(|i0, i1, i2| {
        let (Some(p0), Some(p1), Some(p2)) =
            (source.position(i0), source.position(i1), source.position(i2))
        else {
            return;
        };
        let keys = [quantize(p0), quantize(p1), quantize(p2)];
        if keys[0] == keys[1] || keys[1] == keys[2] || keys[2] == keys[0] {
            return;
        }
        let normal = (p1 - p0).cross(p2 - p0).normalize_or_zero();
        let corners = [p0, p1, p2];

        for j in 0..3 {
            let k = (j + 1) % 3;
            let (ka, kb) = (keys[j], keys[k]);
            if let Some(twin) = open.remove(&(kb, ka)) {
                if normal.dot(twin.normal) <= threshold_dot {
                    lines.extend_from_slice(&[twin.a, twin.b]);
                }
            } else {
                open.insert(
                    (ka, kb),
                    HalfEdge {
                        a: corners[j],
                        b: corners[k],
                        normal,
                    },
                );
            }
        }
    });

    // 边界边
    for edge in open.into_values() {
        lines.extend_from_slice(&[edge.a, edge.b]);
    }

    let mut geo = Geometry::from_positions(&lines);
    geo.compute_bounding_box();
    geo
}

/// Square grid on the XZ plane, `size` wide with `divisions` cells per side.
///
/// Carries a per-vertex `color` attribute; the two center lines are darker.
#[must_use]
pub fn grid(size: f32, divisions: u32) -> Geometry {
    let divisions = divisions.max(1);
    let center = divisions / 2;
    let step = size / divisions as f32;
    let half = size / 2.0;

    let center_color = hex_to_linear(GRID_CENTER_COLOR);
    let line_color = hex_to_linear(GRID_LINE_COLOR);

    let mut positions = Vec::with_capacity((divisions as usize + 1) * 4);
    let mut colors = Vec::with_capacity(positions.capacity());

    for i in 0..=divisions {
        let k = -half + i as f32 * step;
        positions.extend_from_slice(&[
            Vec3::new(-half, 0.0, k),
            Vec3::new(half, 0.0, k),
            Vec3::new(k, 0.0, -half),
            Vec3::new(k, 0.0, half),
        ]);
        let color = if i == center { center_color } else { line_color };
        colors.extend_from_slice(&[color; 4]);
    }

    let mut geo = Geometry::from_positions(&positions);
    geo.set_attribute(COLOR, Attribute::from_vec3(&colors));
    geo.compute_bounding_box();
    geo
}

/// One segment per vertex, from the vertex along its normal.
///
/// Empty when the source has no normals.
#[must_use]
pub fn vertex_normals(source: &Geometry, size: f32) -> Geometry {
    let mut lines = Vec::new();
    if let (Some(pos), Some(nor)) = (source.get_attribute(POSITION), source.get_attribute(NORMAL)) {
        for (p, n) in pos.iter_vec3().zip(nor.iter_vec3()) {
            lines.push(p);
            lines.push(p + n * size);
        }
    }
    let mut geo = Geometry::from_positions(&lines);
    geo.compute_bounding_box();
    geo
}
