//! 2D outlines and their triangulation.

use glam::{Vec2, Vec3};

use super::{VertexBuffers, min_segments};
use crate::errors::{Result, StageError};
use crate::resources::geometry::Geometry;

const EPS: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
enum PathSegment {
    Line(Vec2),
    Quadratic { control: Vec2, end: Vec2 },
    Bezier { c1: Vec2, c2: Vec2, end: Vec2 },
}

/// A single closed outline built from path commands.
///
/// The contour closes implicitly from the last point back to the first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shape {
    start: Vec2,
    current: Vec2,
    segments: Vec<PathSegment>,
}

impl Shape {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Closed polygon through `points`.
    #[must_use]
    pub fn from_points(points: &[Vec2]) -> Self {
        let mut shape = Self::new();
        if let Some((first, rest)) = points.split_first() {
            shape.move_to(first.x, first.y);
            for p in rest {
                shape.line_to(p.x, p.y);
            }
        }
        shape
    }

    /// Starts the contour over at `(x, y)`.
    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.start = Vec2::new(x, y);
        self.current = self.start;
        self.segments.clear();
        self
    }

    pub fn line_to(&mut self, x: f32, y: f32) -> &mut Self {
        let end = Vec2::new(x, y);
        self.segments.push(PathSegment::Line(end));
        self.current = end;
        self
    }

    pub fn quadratic_curve_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) -> &mut Self {
        let end = Vec2::new(x, y);
        self.segments.push(PathSegment::Quadratic {
            control: Vec2::new(cx, cy),
            end,
        });
        self.current = end;
        self
    }

    pub fn bezier_curve_to(
        &mut self,
        c1x: f32,
        c1y: f32,
        c2x: f32,
        c2y: f32,
        x: f32,
        y: f32,
    ) -> &mut Self {
        let end = Vec2::new(x, y);
        self.segments.push(PathSegment::Bezier {
            c1: Vec2::new(c1x, c1y),
            c2: Vec2::new(c2x, c2y),
            end,
        });
        self.current = end;
        self
    }

    /// Samples the outline, `divisions` points per curve segment.
    ///
    /// Consecutive duplicates and the closing duplicate are removed.
    #[must_use]
    pub fn extract_points(&self, divisions: u32) -> Vec<Vec2> {
        let divisions = divisions.max(1);
        let mut points = vec![self.start];
        let mut from = self.start;

        for seg in &self.segments {
            match *seg {
                PathSegment::Line(end) => {
                    points.push(end);
                    from = end;
                }
                PathSegment::Quadratic { control, end } => {
                    for i in 1..=divisions {
                        let t = i as f32 / divisions as f32;
                        let k = 1.0 - t;
                        points.push(from * k * k + control * 2.0 * k * t + end * t * t);
                    }
                    from = end;
                }
                PathSegment::Bezier { c1, c2, end } => {
                    for i in 1..=divisions {
                        let t = i as f32 / divisions as f32;
                        let k = 1.0 - t;
                        points.push(
                            from * k * k * k
                                + c1 * 3.0 * k * k * t
                                + c2 * 3.0 * k * t * t
                                + end * t * t * t,
                        );
                    }
                    from = end;
                }
            }
        }

        points.dedup_by(|b, a| a.distance_squared(*b) < EPS * EPS);
        if points.len() > 1
            && let (Some(first), Some(last)) = (points.first(), points.last())
            && first.distance_squared(*last) < EPS * EPS
        {
            points.pop();
        }
        points
    }
}

/// Twice the signed area; positive for counter-clockwise contours.
#[must_use]
pub fn signed_area(contour: &[Vec2]) -> f32 {
    let n = contour.len();
    (0..n)
        .map(|i| contour[i].perp_dot(contour[(i + 1) % n]))
        .sum::<f32>()
}

fn cross(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b - a).perp_dot(c - a)
}

fn point_in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    cross(a, b, p) >= -EPS && cross(b, c, p) >= -EPS && cross(c, a, p) >= -EPS
}

/// Ear-clipping triangulation of a simple polygon.
///
/// Returns counter-clockwise triangles as indices into `contour`, whatever the
/// winding of the input. Collinear vertices produce no triangles.
pub fn triangulate(contour: &[Vec2]) -> Result<Vec<[usize; 3]>> {
    if contour.len() < 3 {
        return Err(StageError::invalid(
            "shape",
            format!("contour needs at least 3 points, got {}", contour.len()),
        ));
    }

    let mut remaining: Vec<usize> = (0..contour.len()).collect();
    if signed_area(contour) < 0.0 {
        remaining.reverse();
    }

    let mut triangles = Vec::with_capacity(contour.len() - 2);

    while remaining.len() > 3 {
        let n = remaining.len();
        let mut clipped = false;

        for i in 0..n {
            let prev = remaining[(i + n - 1) % n];
            let cur = remaining[i];
            let next = remaining[(i + 1) % n];
            let (a, b, c) = (contour[prev], contour[cur], contour[next]);
            let turn = cross(a, b, c);

            // 共线顶点直接移除
            if turn.abs() <= EPS {
                remaining.remove(i);
                clipped = true;
                break;
            }
            if turn < 0.0 {
                continue;
            }

            let blocked = remaining.iter().any(|&k| {
                k != prev && k != cur && k != next && point_in_triangle(contour[k], a, b, c)
            });
            if !blocked {
                triangles.push([prev, cur, next]);
                remaining.remove(i);
                clipped = true;
                break;
            }
        }

        if !clipped {
            return Err(StageError::invalid(
                "shape",
                "contour is self-intersecting; no ear found",
            ));
        }
    }

    if let [a, b, c] = remaining[..]
        && cross(contour[a], contour[b], contour[c]) > EPS
    {
        triangles.push([a, b, c]);
    }

    if triangles.is_empty() {
        return Err(StageError::invalid("shape", "contour has zero area"));
    }
    Ok(triangles)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShapeOptions {
    pub shape: Shape,
    pub curve_segments: u32,
}

impl ShapeOptions {
    #[must_use]
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            curve_segments: 12,
        }
    }
}

/// Flat triangulated shape in the XY plane facing +Z.
pub fn create_shape(options: &ShapeOptions) -> Result<Geometry> {
    min_segments("shape", "curve_segments", options.curve_segments, 1)?;
    let contour = options.shape.extract_points(options.curve_segments);
    if contour.iter().any(|p| !p.is_finite()) {
        return Err(StageError::invalid("shape", "path points must be finite"));
    }
    let triangles = triangulate(&contour)?;

    let mut buf = VertexBuffers::default();
    for p in &contour {
        buf.push(p.extend(0.0), Vec3::Z);
    }
    for [a, b, c] in triangles {
        buf.triangle(a as u32, b as u32, c as u32);
    }
    Ok(buf.into_geometry())
}
