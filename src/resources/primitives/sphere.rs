use std::f32::consts::{PI, TAU};

use glam::Vec3;

use super::{VertexBuffers, finite, min_segments, positive};
use crate::errors::{Result, StageError};
use crate::resources::geometry::Geometry;

#[derive(Debug, Clone, PartialEq)]
pub struct SphereOptions {
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    pub phi_start: f32,
    pub phi_length: f32,
    pub theta_start: f32,
    pub theta_length: f32,
}

impl Default for SphereOptions {
    fn default() -> Self {
        Self {
            radius: 1.0,
            width_segments: 32,
            height_segments: 16,
            phi_start: 0.0,
            phi_length: TAU,
            theta_start: 0.0,
            theta_length: PI,
        }
    }
}

impl SphereOptions {
    #[must_use]
    pub fn new(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        Self {
            radius,
            width_segments,
            height_segments,
            ..Default::default()
        }
    }
}

/// UV sphere. `phi` sweeps around Y, `theta` from the north pole down.
pub fn create_sphere(options: &SphereOptions) -> Result<Geometry> {
    positive("sphere", "radius", options.radius)?;
    min_segments("sphere", "width_segments", options.width_segments, 3)?;
    min_segments("sphere", "height_segments", options.height_segments, 2)?;
    super::arc("sphere", "phi", options.phi_start, options.phi_length)?;
    finite("sphere", "theta_start", options.theta_start)?;
    if !(options.theta_length > 0.0 && options.theta_length <= PI + 1e-4) {
        return Err(StageError::invalid(
            "sphere",
            format!("theta length must be in (0, π], got {}", options.theta_length),
        ));
    }

    let SphereOptions {
        radius,
        width_segments,
        height_segments,
        phi_start,
        phi_length,
        theta_start,
        theta_length,
    } = *options;
    let theta_end = (theta_start + theta_length).min(PI);

    let mut buf = VertexBuffers::default();
    let mut grid: Vec<Vec<u32>> = Vec::with_capacity(height_segments as usize + 1);

    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        let theta = theta_start + v * theta_length;
        let mut row = Vec::with_capacity(width_segments as usize + 1);

        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            let phi = phi_start + u * phi_length;

            let position = Vec3::new(
                -radius * phi.cos() * theta.sin(),
                radius * theta.cos(),
                radius * phi.sin() * theta.sin(),
            );
            row.push(buf.push(position, position.normalize_or_zero()));
        }
        grid.push(row);
    }

    for iy in 0..height_segments as usize {
        for ix in 0..width_segments as usize {
            let a = grid[iy][ix + 1];
            let b = grid[iy][ix];
            let c = grid[iy + 1][ix];
            let d = grid[iy + 1][ix + 1];

            // 极点处的三角形退化，跳过
            if iy != 0 || theta_start > 0.0 {
                buf.triangle(a, b, d);
            }
            if iy != height_segments as usize - 1 || theta_end < PI {
                buf.triangle(b, c, d);
            }
        }
    }

    Ok(buf.into_geometry())
}
