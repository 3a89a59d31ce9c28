use std::f32::consts::FRAC_PI_2;

use glam::{Vec2, Vec3};

use super::shape::{Shape, signed_area, triangulate};
use super::{min_segments, non_negative, positive};
use crate::errors::{Result, StageError};
use crate::resources::geometry::Geometry;

#[derive(Debug, Clone, PartialEq)]
pub struct ExtrudeOptions {
    pub shape: Shape,
    pub depth: f32,
    pub steps: u32,
    pub bevel_enabled: bool,
    pub bevel_thickness: f32,
    pub bevel_size: f32,
    pub bevel_segments: u32,
    pub curve_segments: u32,
}

impl ExtrudeOptions {
    #[must_use]
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            depth: 1.0,
            steps: 1,
            bevel_enabled: true,
            bevel_thickness: 0.2,
            bevel_size: 0.1,
            bevel_segments: 3,
            curve_segments: 12,
        }
    }
}

/// Extrudes a shape along +Z with optional rounded bevels.
///
/// Output is non-indexed with flat normals.
pub fn create_extrude(options: &ExtrudeOptions) -> Result<Geometry> {
    positive("extrude", "depth", options.depth)?;
    min_segments("extrude", "steps", options.steps, 1)?;
    min_segments("extrude", "curve_segments", options.curve_segments, 1)?;
    if options.bevel_enabled {
        non_negative("extrude", "bevel_thickness", options.bevel_thickness)?;
        non_negative("extrude", "bevel_size", options.bevel_size)?;
        min_segments("extrude", "bevel_segments", options.bevel_segments, 1)?;
    }

    let mut contour = options.shape.extract_points(options.curve_segments);
    if contour.iter().any(|p| !p.is_finite()) {
        return Err(StageError::invalid("extrude", "path points must be finite"));
    }
    if contour.len() >= 3 && signed_area(&contour) < 0.0 {
        contour.reverse();
    }
    let cap = triangulate(&contour).map_err(|e| match e {
        StageError::InvalidParameter { reason, .. } => StageError::invalid("extrude", reason),
        other => other,
    })?;

    let miters = bevel_offsets(&contour);
    let layers = build_layers(&contour, &miters, options);

    let mut positions: Vec<Vec3> = Vec::new();

    let (Some(front), Some(back)) = (layers.first(), layers.last()) else {
        return Err(StageError::invalid("extrude", "no layers generated"));
    };

    // 前盖朝 -Z，反转绕序
    for &[a, b, c] in &cap {
        positions.extend_from_slice(&[front[c], front[b], front[a]]);
    }
    for &[a, b, c] in &cap {
        positions.extend_from_slice(&[back[a], back[b], back[c]]);
    }

    let n = contour.len();
    for pair in layers.windows(2) {
        let (near, far) = (&pair[0], &pair[1]);
        for i in 0..n {
            let j = (i + 1) % n;
            let (a, b, c, d) = (near[i], near[j], far[j], far[i]);
            positions.extend_from_slice(&[a, b, c, a, c, d]);
        }
    }

    let mut geo = Geometry::from_positions(&positions);
    geo.compute_vertex_normals();
    geo.compute_bounding_box();
    Ok(geo)
}

/// Outward miter vector per contour vertex, for a counter-clockwise contour.
fn bevel_offsets(contour: &[Vec2]) -> Vec<Vec2> {
    let n = contour.len();
    (0..n)
        .map(|i| {
            let prev = contour[(i + n - 1) % n];
            let cur = contour[i];
            let next = contour[(i + 1) % n];

            let outward = |from: Vec2, to: Vec2| {
                let d = (to - from).normalize_or_zero();
                Vec2::new(d.y, -d.x)
            };
            let n1 = outward(prev, cur);
            let n2 = outward(cur, next);

            let denom = 1.0 + n1.dot(n2);
            if denom.abs() < 1e-6 {
                return n1;
            }
            let miter = (n1 + n2) / denom;
            miter.clamp_length_max(4.0)
        })
        .collect()
}

fn build_layers(contour: &[Vec2], miters: &[Vec2], o: &ExtrudeOptions) -> Vec<Vec<Vec3>> {
    let layer = |offset: f32, z: f32| -> Vec<Vec3> {
        contour
            .iter()
            .zip(miters)
            .map(|(p, m)| (*p + *m * offset).extend(z))
            .collect()
    };

    let mut layers = Vec::new();
    let segments = o.bevel_segments;

    if o.bevel_enabled {
        for b in 0..segments {
            let t = b as f32 / segments as f32;
            let z = o.bevel_thickness * (t * FRAC_PI_2).cos();
            let size = o.bevel_size * (t * FRAC_PI_2).sin();
            layers.push(layer(size, -z));
        }
    }

    let body = if o.bevel_enabled { o.bevel_size } else { 0.0 };
    for s in 0..=o.steps {
        layers.push(layer(body, o.depth * s as f32 / o.steps as f32));
    }

    if o.bevel_enabled {
        for b in (0..segments).rev() {
            let t = b as f32 / segments as f32;
            let z = o.bevel_thickness * (t * FRAC_PI_2).cos();
            let size = o.bevel_size * (t * FRAC_PI_2).sin();
            layers.push(layer(size, o.depth + z));
        }
    }

    layers
}
