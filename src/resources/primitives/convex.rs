//! Incremental 3D convex hull.

use glam::Vec3;
use rustc_hash::FxHashSet;

use crate::errors::{Result, StageError};
use crate::resources::geometry::Geometry;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvexOptions {
    pub points: Vec<Vec3>,
}

impl ConvexOptions {
    #[must_use]
    pub fn new(points: Vec<Vec3>) -> Self {
        Self { points }
    }
}

/// Hull of a point set as non-indexed triangles with flat normals.
pub fn create_convex(options: &ConvexOptions) -> Result<Geometry> {
    let (points, faces) = convex_hull(&options.points)?;

    let mut positions = Vec::with_capacity(faces.len() * 3);
    for [a, b, c] in faces {
        positions.extend_from_slice(&[points[a], points[b], points[c]]);
    }

    let mut geo = Geometry::from_positions(&positions);
    geo.compute_vertex_normals();
    geo.compute_bounding_box();
    Ok(geo)
}

#[derive(Debug, Clone, Copy)]
struct Face {
    v: [usize; 3],
    normal: Vec3,
    offset: f32,
}

impl Face {
    fn new(points: &[Vec3], v: [usize; 3]) -> Self {
        let [a, b, c] = v.map(|i| points[i]);
        let normal = (b - a).cross(c - a).normalize_or_zero();
        Self {
            v,
            normal,
            offset: normal.dot(a),
        }
    }

    fn distance(&self, p: Vec3) -> f32 {
        self.normal.dot(p) - self.offset
    }

    fn edges(&self) -> [(usize, usize); 3] {
        let [a, b, c] = self.v;
        [(a, b), (b, c), (c, a)]
    }
}

/// Returns the deduplicated points and outward-facing (CCW) triangles.
pub fn convex_hull(input: &[Vec3]) -> Result<(Vec<Vec3>, Vec<[usize; 3]>)> {
    if input.iter().any(|p| !p.is_finite()) {
        return Err(StageError::invalid("convex", "points must be finite"));
    }

    let extent = input.iter().fold(0.0_f32, |m, p| m.max(p.abs().max_element()));
    let eps = (extent * 1e-6).max(1e-9);

    let mut points: Vec<Vec3> = Vec::with_capacity(input.len());
    for &p in input {
        if !points.iter().any(|q| q.distance(p) <= eps) {
            points.push(p);
        }
    }
    if points.len() < 4 {
        return Err(StageError::invalid(
            "convex",
            format!("need at least 4 distinct points, got {}", points.len()),
        ));
    }

    let [i0, i1, i2, i3] = initial_simplex(&points, eps)?;

    let mut faces: Vec<Face> = [
        ([i0, i1, i2], i3),
        ([i0, i1, i3], i2),
        ([i0, i2, i3], i1),
        ([i1, i2, i3], i0),
    ]
    .into_iter()
    .map(|(v, opposite)| {
        let face = Face::new(&points, v);
        if face.distance(points[opposite]) > 0.0 {
            Face::new(&points, [v[0], v[2], v[1]])
        } else {
            face
        }
    })
    .collect();

    for p in 0..points.len() {
        if [i0, i1, i2, i3].contains(&p) {
            continue;
        }
        let point = points[p];

        let (visible, kept): (Vec<Face>, Vec<Face>) =
            faces.into_iter().partition(|f| f.distance(point) > eps);
        faces = kept;
        if visible.is_empty() {
            continue;
        }

        let visible_edges: FxHashSet<(usize, usize)> =
            visible.iter().flat_map(Face::edges).collect();

        // 地平线：反向边不在可见面中的边
        for f in &visible {
            for (u, v) in f.edges() {
                if !visible_edges.contains(&(v, u)) {
                    faces.push(Face::new(&points, [u, v, p]));
                }
            }
        }
    }

    Ok((points, faces.into_iter().map(|f| f.v).collect()))
}

fn initial_simplex(points: &[Vec3], eps: f32) -> Result<[usize; 4]> {
    let farthest = |score: &dyn Fn(Vec3) -> f32| {
        points
            .iter()
            .enumerate()
            .map(|(i, p)| (i, score(*p)))
            .fold((0, f32::NEG_INFINITY), |best, cur| if cur.1 > best.1 { cur } else { best })
    };

    let i0 = 0;
    let p0 = points[i0];

    let (i1, d1) = farthest(&|p| p.distance(p0));
    if d1 <= eps {
        return Err(StageError::invalid("convex", "points are coincident"));
    }
    let dir = (points[i1] - p0).normalize();

    let (i2, d2) = farthest(&|p| (p - p0).cross(dir).length());
    if d2 <= eps {
        return Err(StageError::invalid("convex", "points are collinear"));
    }
    let normal = (points[i1] - p0).cross(points[i2] - p0).normalize();

    let (i3, d3) = farthest(&|p| (p - p0).dot(normal).abs());
    if d3 <= eps {
        return Err(StageError::invalid("convex", "points are coplanar"));
    }

    Ok([i0, i1, i2, i3])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube_points() -> Vec<Vec3> {
        let mut pts = Vec::new();
        for x in [-1.0, 1.0] {
            for y in [-1.0, 1.0] {
                for z in [-1.0, 1.0] {
                    pts.push(Vec3::new(x, y, z));
                }
            }
        }
        pts
    }

    #[test]
    fn cube_hull_has_twelve_outward_faces() {
        let mut pts = cube_points();
        pts.push(Vec3::ZERO);
        pts.push(Vec3::new(1.0, 1.0, 1.0));

        let (points, faces) = convex_hull(&pts).unwrap();
        assert_eq!(points.len(), 9);
        assert_eq!(faces.len(), 12);

        for [a, b, c] in faces {
            let n = (points[b] - points[a]).cross(points[c] - points[a]);
            let centroid = (points[a] + points[b] + points[c]) / 3.0;
            assert!(n.dot(centroid) > 0.0, "face must point away from the center");
        }
    }

    #[test]
    fn coplanar_points_are_rejected() {
        let pts = vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::new(1.0, 1.0, 0.0)];
        assert!(matches!(
            convex_hull(&pts),
            Err(StageError::InvalidParameter { primitive: "convex", .. })
        ));
    }
}
