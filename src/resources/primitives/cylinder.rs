use std::f32::consts::TAU;

use glam::Vec3;

use super::{VertexBuffers, arc, min_segments, non_negative, positive};
use crate::errors::{Result, StageError};
use crate::resources::geometry::Geometry;

#[derive(Debug, Clone, PartialEq)]
pub struct CylinderOptions {
    pub radius_top: f32,
    pub radius_bottom: f32,
    pub height: f32,
    pub radial_segments: u32,
    pub height_segments: u32,
    pub open_ended: bool,
    pub theta_start: f32,
    pub theta_length: f32,
}

impl Default for CylinderOptions {
    fn default() -> Self {
        Self {
            radius_top: 1.0,
            radius_bottom: 1.0,
            height: 1.0,
            radial_segments: 32,
            height_segments: 1,
            open_ended: false,
            theta_start: 0.0,
            theta_length: TAU,
        }
    }
}

/// A cylinder whose top radius is zero.
#[derive(Debug, Clone, PartialEq)]
pub struct ConeOptions {
    pub radius: f32,
    pub height: f32,
    pub radial_segments: u32,
    pub height_segments: u32,
    pub open_ended: bool,
    pub theta_start: f32,
    pub theta_length: f32,
}

impl Default for ConeOptions {
    fn default() -> Self {
        Self {
            radius: 1.0,
            height: 1.0,
            radial_segments: 32,
            height_segments: 1,
            open_ended: false,
            theta_start: 0.0,
            theta_length: TAU,
        }
    }
}

impl From<&ConeOptions> for CylinderOptions {
    fn from(cone: &ConeOptions) -> Self {
        Self {
            radius_top: 0.0,
            radius_bottom: cone.radius,
            height: cone.height,
            radial_segments: cone.radial_segments,
            height_segments: cone.height_segments,
            open_ended: cone.open_ended,
            theta_start: cone.theta_start,
            theta_length: cone.theta_length,
        }
    }
}

pub fn create_cone(options: &ConeOptions) -> Result<Geometry> {
    positive("cone", "radius", options.radius)?;
    build("cone", &CylinderOptions::from(options))
}

/// Y-aligned cylinder (or frustum) centered on the origin.
pub fn create_cylinder(options: &CylinderOptions) -> Result<Geometry> {
    build("cylinder", options)
}

fn build(primitive: &'static str, o: &CylinderOptions) -> Result<Geometry> {
    non_negative(primitive, "radius_top", o.radius_top)?;
    non_negative(primitive, "radius_bottom", o.radius_bottom)?;
    if o.radius_top == 0.0 && o.radius_bottom == 0.0 {
        return Err(StageError::invalid(primitive, "radius_top and radius_bottom are both zero"));
    }
    positive(primitive, "height", o.height)?;
    min_segments(primitive, "radial_segments", o.radial_segments, 3)?;
    min_segments(primitive, "height_segments", o.height_segments, 1)?;
    arc(primitive, "theta", o.theta_start, o.theta_length)?;

    let mut buf = VertexBuffers::default();
    generate_torso(&mut buf, o);

    if !o.open_ended {
        if o.radius_top > 0.0 {
            generate_cap(&mut buf, o, true);
        }
        if o.radius_bottom > 0.0 {
            generate_cap(&mut buf, o, false);
        }
    }

    Ok(buf.into_geometry())
}

fn generate_torso(buf: &mut VertexBuffers, o: &CylinderOptions) {
    let half_height = o.height / 2.0;
    let slope = (o.radius_bottom - o.radius_top) / o.height;
    let radial = o.radial_segments;

    let mut index_rows: Vec<Vec<u32>> = Vec::with_capacity(o.height_segments as usize + 1);

    for y in 0..=o.height_segments {
        let v = y as f32 / o.height_segments as f32;
        let radius = v * (o.radius_bottom - o.radius_top) + o.radius_top;

        let mut row = Vec::with_capacity(radial as usize + 1);
        for x in 0..=radial {
            let u = x as f32 / radial as f32;
            let theta = u * o.theta_length + o.theta_start;
            let (sin, cos) = theta.sin_cos();

            let position = Vec3::new(radius * sin, -v * o.height + half_height, radius * cos);
            let normal = Vec3::new(sin, slope, cos).normalize();
            row.push(buf.push(position, normal));
        }
        index_rows.push(row);
    }

    for x in 0..radial as usize {
        for y in 0..o.height_segments as usize {
            let a = index_rows[y][x];
            let b = index_rows[y + 1][x];
            let c = index_rows[y + 1][x + 1];
            let d = index_rows[y][x + 1];

            // 顶/底半径为 0 时跳过退化三角形
            if o.radius_top > 0.0 || y != 0 {
                buf.triangle(a, b, d);
            }
            if o.radius_bottom > 0.0 || y != o.height_segments as usize - 1 {
                buf.triangle(b, c, d);
            }
        }
    }
}

fn generate_cap(buf: &mut VertexBuffers, o: &CylinderOptions, top: bool) {
    let radius = if top { o.radius_top } else { o.radius_bottom };
    let sign = if top { 1.0 } else { -1.0 };
    let y = o.height / 2.0 * sign;
    let normal = Vec3::new(0.0, sign, 0.0);
    let radial = o.radial_segments;

    // One center vertex per segment
    let center_start = buf.len();
    for _ in 1..=radial {
        buf.push(Vec3::new(0.0, y, 0.0), normal);
    }

    let rim_start = buf.len();
    for x in 0..=radial {
        let u = x as f32 / radial as f32;
        let theta = u * o.theta_length + o.theta_start;
        let (sin, cos) = theta.sin_cos();
        buf.push(Vec3::new(radius * sin, y, radius * cos), normal);
    }

    for x in 0..radial {
        let c = center_start + x;
        let i = rim_start + x;
        if top {
            buf.triangle(i, i + 1, c);
        } else {
            buf.triangle(i + 1, i, c);
        }
    }
}
