use std::f32::consts::TAU;

use glam::Vec3;

use super::{VertexBuffers, arc, min_segments, positive};
use crate::errors::Result;
use crate::resources::geometry::Geometry;

#[derive(Debug, Clone, PartialEq)]
pub struct CircleOptions {
    pub radius: f32,
    pub segments: u32,
    pub theta_start: f32,
    pub theta_length: f32,
}

impl Default for CircleOptions {
    fn default() -> Self {
        Self {
            radius: 1.0,
            segments: 32,
            theta_start: 0.0,
            theta_length: TAU,
        }
    }
}

/// Flat disc (or sector) in the XY plane, fanned around the center.
pub fn create_circle(options: &CircleOptions) -> Result<Geometry> {
    positive("circle", "radius", options.radius)?;
    min_segments("circle", "segments", options.segments, 3)?;
    arc("circle", "theta", options.theta_start, options.theta_length)?;

    let segments = options.segments;
    let mut buf = VertexBuffers::default();

    let center = buf.push(Vec3::ZERO, Vec3::Z);
    for s in 0..=segments {
        let segment = options.theta_start + s as f32 / segments as f32 * options.theta_length;
        let (sin, cos) = segment.sin_cos();
        buf.push(Vec3::new(options.radius * cos, options.radius * sin, 0.0), Vec3::Z);
    }

    for i in 1..=segments {
        buf.triangle(i, i + 1, center);
    }

    Ok(buf.into_geometry())
}
