use std::f32::consts::TAU;

use glam::Vec3;

use super::{VertexBuffers, arc, min_segments, positive};
use crate::errors::Result;
use crate::resources::geometry::Geometry;

#[derive(Debug, Clone, PartialEq)]
pub struct TorusOptions {
    /// Distance from the center of the torus to the center of the tube.
    pub radius: f32,
    pub tube: f32,
    pub radial_segments: u32,
    pub tubular_segments: u32,
    pub arc: f32,
}

impl Default for TorusOptions {
    fn default() -> Self {
        Self {
            radius: 1.0,
            tube: 0.4,
            radial_segments: 12,
            tubular_segments: 48,
            arc: TAU,
        }
    }
}

/// Torus lying in the XY plane.
pub fn create_torus(options: &TorusOptions) -> Result<Geometry> {
    positive("torus", "radius", options.radius)?;
    positive("torus", "tube", options.tube)?;
    min_segments("torus", "radial_segments", options.radial_segments, 2)?;
    min_segments("torus", "tubular_segments", options.tubular_segments, 3)?;
    arc("torus", "arc", 0.0, options.arc)?;

    let TorusOptions {
        radius,
        tube,
        radial_segments,
        tubular_segments,
        arc,
    } = *options;

    let mut buf = VertexBuffers::default();

    for j in 0..=radial_segments {
        let v = j as f32 / radial_segments as f32 * TAU;
        for i in 0..=tubular_segments {
            let u = i as f32 / tubular_segments as f32 * arc;

            let ring = radius + tube * v.cos();
            let position = Vec3::new(ring * u.cos(), ring * u.sin(), tube * v.sin());
            let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            buf.push(position, (position - center).normalize_or_zero());
        }
    }

    let stride = tubular_segments + 1;
    for j in 1..=radial_segments {
        for i in 1..=tubular_segments {
            let a = stride * j + i - 1;
            let b = stride * (j - 1) + i - 1;
            let c = stride * (j - 1) + i;
            let d = stride * j + i;

            buf.triangle(a, b, d);
            buf.triangle(b, c, d);
        }
    }

    Ok(buf.into_geometry())
}
