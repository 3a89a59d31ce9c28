use std::f32::consts::TAU;

use glam::Vec3;

use super::{VertexBuffers, min_segments, positive};
use crate::errors::{Result, StageError};
use crate::resources::geometry::Geometry;

#[derive(Debug, Clone, PartialEq)]
pub struct TorusKnotOptions {
    pub radius: f32,
    pub tube: f32,
    pub tubular_segments: u32,
    pub radial_segments: u32,
    /// Windings around the axis of rotational symmetry.
    pub p: u32,
    /// Windings around a circle in the interior of the torus.
    pub q: u32,
}

impl Default for TorusKnotOptions {
    fn default() -> Self {
        Self {
            radius: 1.0,
            tube: 0.4,
            tubular_segments: 64,
            radial_segments: 8,
            p: 2,
            q: 3,
        }
    }
}

pub fn create_torus_knot(options: &TorusKnotOptions) -> Result<Geometry> {
    positive("torus_knot", "radius", options.radius)?;
    positive("torus_knot", "tube", options.tube)?;
    min_segments("torus_knot", "tubular_segments", options.tubular_segments, 3)?;
    min_segments("torus_knot", "radial_segments", options.radial_segments, 3)?;
    if options.p == 0 || options.q == 0 {
        return Err(StageError::invalid("torus_knot", "p and q must be at least 1"));
    }

    let TorusKnotOptions {
        radius,
        tube,
        tubular_segments,
        radial_segments,
        p,
        q,
    } = *options;
    let (p, q) = (p as f32, q as f32);

    let mut buf = VertexBuffers::default();

    for i in 0..=tubular_segments {
        let u = i as f32 / tubular_segments as f32 * p * TAU;

        let p1 = knot_point(u, p, q, radius);
        let p2 = knot_point(u + 0.01, p, q, radius);

        // 由曲线上相邻两点构造局部坐标系
        let tangent = p2 - p1;
        let mut normal = p2 + p1;
        let binormal = tangent.cross(normal).normalize_or_zero();
        normal = binormal.cross(tangent).normalize_or_zero();

        for j in 0..=radial_segments {
            let v = j as f32 / radial_segments as f32 * TAU;
            let cx = -tube * v.cos();
            let cy = tube * v.sin();

            let position = p1 + normal * cx + binormal * cy;
            buf.push(position, (position - p1).normalize_or_zero());
        }
    }

    let stride = radial_segments + 1;
    for j in 1..=tubular_segments {
        for i in 1..=radial_segments {
            let a = stride * (j - 1) + (i - 1);
            let b = stride * j + (i - 1);
            let c = stride * j + i;
            let d = stride * (j - 1) + i;

            buf.triangle(a, b, d);
            buf.triangle(b, c, d);
        }
    }

    Ok(buf.into_geometry())
}

fn knot_point(u: f32, p: f32, q: f32, radius: f32) -> Vec3 {
    let qu_over_p = q / p * u;
    let cs = qu_over_p.cos();
    Vec3::new(
        radius * (2.0 + cs) * 0.5 * u.cos(),
        radius * (2.0 + cs) * u.sin() * 0.5,
        radius * qu_over_p.sin() * 0.5,
    )
}
