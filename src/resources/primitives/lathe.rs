use std::f32::consts::TAU;

use glam::{Vec2, Vec3};

use super::{VertexBuffers, arc, min_segments};
use crate::errors::{Result, StageError};
use crate::resources::geometry::Geometry;

/// Surface of revolution around the Y axis.
#[derive(Debug, Clone, PartialEq)]
pub struct LatheOptions {
    /// Profile in the XY plane; `x` is the distance from the axis.
    pub points: Vec<Vec2>,
    pub segments: u32,
    pub phi_start: f32,
    pub phi_length: f32,
}

impl Default for LatheOptions {
    fn default() -> Self {
        Self {
            points: vec![Vec2::new(0.0, -0.5), Vec2::new(0.5, 0.0), Vec2::new(0.0, 0.5)],
            segments: 12,
            phi_start: 0.0,
            phi_length: TAU,
        }
    }
}

impl LatheOptions {
    #[must_use]
    pub fn new(points: Vec<Vec2>, segments: u32) -> Self {
        Self {
            points,
            segments,
            ..Default::default()
        }
    }
}

pub fn create_lathe(options: &LatheOptions) -> Result<Geometry> {
    if options.points.len() < 2 {
        return Err(StageError::invalid(
            "lathe",
            format!("profile needs at least 2 points, got {}", options.points.len()),
        ));
    }
    if options.points.iter().any(|p| !p.is_finite()) {
        return Err(StageError::invalid("lathe", "profile points must be finite"));
    }
    min_segments("lathe", "segments", options.segments, 1)?;
    arc("lathe", "phi", options.phi_start, options.phi_length)?;

    let segments = options.segments;
    let profile_len = options.points.len() as u32;

    let mut buf = VertexBuffers::default();
    for i in 0..=segments {
        let phi = options.phi_start + i as f32 / segments as f32 * options.phi_length;
        let (sin, cos) = phi.sin_cos();
        for p in &options.points {
            buf.push(Vec3::new(p.x * sin, p.y, p.x * cos), Vec3::ZERO);
        }
    }

    for i in 0..segments {
        for j in 0..profile_len - 1 {
            let base = j + i * profile_len;
            let a = base;
            let b = base + profile_len;
            let c = base + profile_len + 1;
            let d = base + 1;

            buf.triangle(a, b, d);
            buf.triangle(c, d, b);
        }
    }

    let mut geo = buf.into_geometry();
    geo.compute_vertex_normals();
    Ok(geo)
}
