use std::f32::consts::TAU;

use glam::Vec3;

use super::{VertexBuffers, arc, min_segments, non_negative, positive};
use crate::errors::{Result, StageError};
use crate::resources::geometry::Geometry;

#[derive(Debug, Clone, PartialEq)]
pub struct RingOptions {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub theta_segments: u32,
    pub phi_segments: u32,
    pub theta_start: f32,
    pub theta_length: f32,
}

impl Default for RingOptions {
    fn default() -> Self {
        Self {
            inner_radius: 0.5,
            outer_radius: 1.0,
            theta_segments: 32,
            phi_segments: 1,
            theta_start: 0.0,
            theta_length: TAU,
        }
    }
}

/// Annulus in the XY plane facing +Z.
pub fn create_ring(options: &RingOptions) -> Result<Geometry> {
    non_negative("ring", "inner_radius", options.inner_radius)?;
    positive("ring", "outer_radius", options.outer_radius)?;
    if options.outer_radius <= options.inner_radius {
        return Err(StageError::invalid(
            "ring",
            format!(
                "outer_radius ({}) must exceed inner_radius ({})",
                options.outer_radius, options.inner_radius
            ),
        ));
    }
    min_segments("ring", "theta_segments", options.theta_segments, 3)?;
    min_segments("ring", "phi_segments", options.phi_segments, 1)?;
    arc("ring", "theta", options.theta_start, options.theta_length)?;

    let theta_segments = options.theta_segments;
    let phi_segments = options.phi_segments;
    let radius_step = (options.outer_radius - options.inner_radius) / phi_segments as f32;

    let mut buf = VertexBuffers::default();
    let mut radius = options.inner_radius;

    for _ in 0..=phi_segments {
        for i in 0..=theta_segments {
            let segment =
                options.theta_start + i as f32 / theta_segments as f32 * options.theta_length;
            let (sin, cos) = segment.sin_cos();
            buf.push(Vec3::new(radius * cos, radius * sin, 0.0), Vec3::Z);
        }
        radius += radius_step;
    }

    for j in 0..phi_segments {
        let level = j * (theta_segments + 1);
        for i in 0..theta_segments {
            let segment = i + level;
            let a = segment;
            let b = segment + theta_segments + 1;
            let c = segment + theta_segments + 2;
            let d = segment + 1;

            buf.triangle(a, b, d);
            buf.triangle(b, c, d);
        }
    }

    Ok(buf.into_geometry())
}
