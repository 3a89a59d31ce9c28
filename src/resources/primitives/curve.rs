use std::fmt::Debug;

use glam::{Quat, Vec3};

/// A parametric 3D curve over `t ∈ [0, 1]`.
pub trait Curve: Send + Sync + Debug {
    fn point_at(&self, t: f32) -> Vec3;

    /// Unit tangent. The default uses a central finite difference.
    fn tangent_at(&self, t: f32) -> Vec3 {
        const DELTA: f32 = 1e-4;
        let t1 = (t - DELTA).max(0.0);
        let t2 = (t + DELTA).min(1.0);
        (self.point_at(t2) - self.point_at(t1)).normalize_or_zero()
    }
}

/// One period of a sine wave along X: `(3t - 1.5, sin 2πt, 0) * scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SinCurve {
    pub scale: f32,
}

impl SinCurve {
    #[must_use]
    pub fn new(scale: f32) -> Self {
        Self { scale }
    }
}

impl Default for SinCurve {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl Curve for SinCurve {
    fn point_at(&self, t: f32) -> Vec3 {
        let tx = t * 3.0 - 1.5;
        let ty = (std::f32::consts::TAU * t).sin();
        Vec3::new(tx, ty, 0.0) * self.scale
    }
}

/// Rotation-minimizing frames sampled at `segments + 1` points.
#[derive(Debug, Clone, Default)]
pub struct FrenetFrames {
    pub tangents: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub binormals: Vec<Vec3>,
}

/// Parallel-transport frames along `curve`.
///
/// The first normal is perpendicular to the tangent along its smallest
/// component. For closed curves the accumulated twist is spread evenly so the
/// last frame meets the first.
#[must_use]
pub fn compute_frenet_frames(curve: &dyn Curve, segments: u32, closed: bool) -> FrenetFrames {
    let segments = segments.max(1) as usize;
    let tangents: Vec<Vec3> = (0..=segments)
        .map(|i| curve.tangent_at(i as f32 / segments as f32))
        .collect();

    let mut normals = vec![Vec3::ZERO; segments + 1];
    let mut binormals = vec![Vec3::ZERO; segments + 1];

    let t0 = tangents[0];
    let abs = t0.abs();
    let axis = if abs.x <= abs.y && abs.x <= abs.z {
        Vec3::X
    } else if abs.y <= abs.z {
        Vec3::Y
    } else {
        Vec3::Z
    };
    let side = t0.cross(axis).normalize_or_zero();
    normals[0] = t0.cross(side);
    binormals[0] = t0.cross(normals[0]);

    for i in 1..=segments {
        normals[i] = normals[i - 1];
        let axis = tangents[i - 1].cross(tangents[i]);
        if axis.length() > f32::EPSILON {
            let theta = tangents[i - 1].dot(tangents[i]).clamp(-1.0, 1.0).acos();
            normals[i] = Quat::from_axis_angle(axis.normalize(), theta) * normals[i];
        }
        binormals[i] = tangents[i].cross(normals[i]);
    }

    if closed {
        let mut theta = normals[0].dot(normals[segments]).clamp(-1.0, 1.0).acos() / segments as f32;
        if tangents[0].dot(normals[0].cross(normals[segments])) > 0.0 {
            theta = -theta;
        }
        for i in 1..=segments {
            normals[i] = Quat::from_axis_angle(tangents[i], theta * i as f32) * normals[i];
            binormals[i] = tangents[i].cross(normals[i]);
        }
    }

    FrenetFrames {
        tangents,
        normals,
        binormals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sin_curve_endpoints() {
        let c = SinCurve::new(2.0);
        assert!((c.point_at(0.0) - Vec3::new(-3.0, 0.0, 0.0)).length() < 1e-5);
        assert!((c.point_at(1.0) - Vec3::new(3.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn frames_are_orthonormal() {
        let frames = compute_frenet_frames(&SinCurve::default(), 20, false);
        assert_eq!(frames.normals.len(), 21);
        for ((t, n), b) in frames
            .tangents
            .iter()
            .zip(&frames.normals)
            .zip(&frames.binormals)
        {
            assert!(t.dot(*n).abs() < 1e-3);
            assert!(t.dot(*b).abs() < 1e-3);
            assert!((n.length() - 1.0).abs() < 1e-3);
        }
    }
}
