use std::f32::consts::TAU;
use std::sync::Arc;

use super::curve::{Curve, SinCurve, compute_frenet_frames};
use super::{VertexBuffers, min_segments, positive};
use crate::errors::Result;
use crate::resources::geometry::Geometry;

/// A tube swept along an arbitrary [`Curve`].
#[derive(Debug, Clone)]
pub struct TubeOptions {
    pub path: Arc<dyn Curve>,
    pub tubular_segments: u32,
    pub radius: f32,
    pub radial_segments: u32,
    pub closed: bool,
}

impl Default for TubeOptions {
    fn default() -> Self {
        Self {
            path: Arc::new(SinCurve::default()),
            tubular_segments: 64,
            radius: 1.0,
            radial_segments: 8,
            closed: false,
        }
    }
}

impl TubeOptions {
    #[must_use]
    pub fn new(path: Arc<dyn Curve>) -> Self {
        Self {
            path,
            ..Default::default()
        }
    }
}

pub fn create_tube(options: &TubeOptions) -> Result<Geometry> {
    positive("tube", "radius", options.radius)?;
    min_segments("tube", "tubular_segments", options.tubular_segments, 1)?;
    min_segments("tube", "radial_segments", options.radial_segments, 3)?;

    let tubular = options.tubular_segments;
    let radial = options.radial_segments;
    let frames = compute_frenet_frames(options.path.as_ref(), tubular, options.closed);

    let mut buf = VertexBuffers::default();
    let mut ring = |i: u32| {
        let point = options.path.point_at(i as f32 / tubular as f32);
        let n = frames.normals[i as usize];
        let b = frames.binormals[i as usize];

        for j in 0..=radial {
            let v = j as f32 / radial as f32 * TAU;
            let normal = (n * -v.cos() + b * v.sin()).normalize_or_zero();
            buf.push(point + normal * options.radius, normal);
        }
    };

    for i in 0..tubular {
        ring(i);
    }
    // 闭合曲线复用第一个截面
    ring(if options.closed { 0 } else { tubular });

    let stride = radial + 1;
    for j in 1..=tubular {
        for i in 1..=radial {
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

