//! Parametric geometry generators.
//!
//! Every generator takes an options struct (with three.js-compatible defaults)
//! and returns `Result<Geometry>`: out-of-range parameters are rejected with
//! [`StageError::InvalidParameter`] instead of being clamped.
//!
//! [`Primitive`] is the closed set of parameter sets a model builder accepts.

pub mod box_shape;
pub mod circle;
pub mod convex;
pub mod curve;
pub mod cylinder;
pub mod extrude;
pub mod lathe;
pub mod plane;
pub mod polyhedron;
pub mod ring;
pub mod shape;
pub mod sphere;
pub mod torus;
pub mod torus_knot;
pub mod tube;

use glam::Vec3;

use crate::errors::{Result, StageError};
use crate::resources::geometry::{Attribute, Geometry, NORMAL, POSITION};

pub use box_shape::{BoxOptions, create_box};
pub use circle::{CircleOptions, create_circle};
pub use convex::{ConvexOptions, create_convex};
pub use curve::{Curve, SinCurve};
pub use cylinder::{ConeOptions, CylinderOptions, create_cone, create_cylinder};
pub use extrude::{ExtrudeOptions, create_extrude};
pub use lathe::{LatheOptions, create_lathe};
pub use plane::{PlaneOptions, create_plane};
pub use polyhedron::dodecahedron_vertices;
pub use ring::{RingOptions, create_ring};
pub use shape::{Shape, ShapeOptions, create_shape};
pub use sphere::{SphereOptions, create_sphere};
pub use torus::{TorusOptions, create_torus};
pub use torus_knot::{TorusKnotOptions, create_torus_knot};
pub use tube::{TubeOptions, create_tube};

/// A parametric shape with its parameters.
#[derive(Debug, Clone)]
pub enum Primitive {
    Box(BoxOptions),
    Circle(CircleOptions),
    Cone(ConeOptions),
    Cylinder(CylinderOptions),
    Sphere(SphereOptions),
    Ring(RingOptions),
    Plane(PlaneOptions),
    Torus(TorusOptions),
    TorusKnot(TorusKnotOptions),
    Shape(ShapeOptions),
    Tube(TubeOptions),
    Lathe(LatheOptions),
    Extrude(ExtrudeOptions),
    Convex(ConvexOptions),
}

impl Primitive {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Primitive::Box(_) => "box",
            Primitive::Circle(_) => "circle",
            Primitive::Cone(_) => "cone",
            Primitive::Cylinder(_) => "cylinder",
            Primitive::Sphere(_) => "sphere",
            Primitive::Ring(_) => "ring",
            Primitive::Plane(_) => "plane",
            Primitive::Torus(_) => "torus",
            Primitive::TorusKnot(_) => "torus_knot",
            Primitive::Shape(_) => "shape",
            Primitive::Tube(_) => "tube",
            Primitive::Lathe(_) => "lathe",
            Primitive::Extrude(_) => "extrude",
            Primitive::Convex(_) => "convex",
        }
    }

    /// Validates the parameters and tessellates the shape.
    pub fn build(&self) -> Result<Geometry> {
        match self {
            Primitive::Box(o) => create_box(o),
            Primitive::Circle(o) => create_circle(o),
            Primitive::Cone(o) => create_cone(o),
            Primitive::Cylinder(o) => create_cylinder(o),
            Primitive::Sphere(o) => create_sphere(o),
            Primitive::Ring(o) => create_ring(o),
            Primitive::Plane(o) => create_plane(o),
            Primitive::Torus(o) => create_torus(o),
            Primitive::TorusKnot(o) => create_torus_knot(o),
            Primitive::Shape(o) => create_shape(o),
            Primitive::Tube(o) => create_tube(o),
            Primitive::Lathe(o) => create_lathe(o),
            Primitive::Extrude(o) => create_extrude(o),
            Primitive::Convex(o) => create_convex(o),
        }
    }
}

// ============================================================================
// Shared helpers
// ============================================================================

/// Indexed position/normal accumulator used by the generators.
#[derive(Debug, Default)]
pub(crate) struct VertexBuffers {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl VertexBuffers {
    pub fn push(&mut self, position: Vec3, normal: Vec3) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position);
        self.normals.push(normal);
        index
    }

    pub fn triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Two triangles per cell of a `(cols + 1) x (rows + 1)` vertex grid
    /// stored row by row from `base`.
    pub fn quad_grid(&mut self, base: u32, cols: u32, rows: u32) {
        let stride = cols + 1;
        for row in 0..rows {
            for col in 0..cols {
                let a = base + col + stride * row;
                let b = a + stride;
                self.triangle(a, b, a + 1);
                self.triangle(b, b + 1, a + 1);
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> u32 {
        self.positions.len() as u32
    }

    #[must_use]
    pub fn into_geometry(self) -> Geometry {
        let mut geo = Geometry::new();
        geo.set_attribute(POSITION, Attribute::from_vec3(&self.positions));
        geo.set_attribute(NORMAL, Attribute::from_vec3(&self.normals));
        geo.set_indices(self.indices);
        geo.compute_bounding_box();
        geo
    }
}

pub(crate) fn positive(primitive: &'static str, field: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(StageError::invalid(
            primitive,
            format!("{field} must be a positive finite number, got {value}"),
        ))
    }
}

pub(crate) fn non_negative(primitive: &'static str, field: &str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(StageError::invalid(
            primitive,
            format!("{field} must be a non-negative finite number, got {value}"),
        ))
    }
}

pub(crate) fn finite(primitive: &'static str, field: &str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(StageError::invalid(primitive, format!("{field} must be finite, got {value}")))
    }
}

pub(crate) fn min_segments(primitive: &'static str, field: &str, value: u32, min: u32) -> Result<()> {
    if value >= min {
        Ok(())
    } else {
        Err(StageError::invalid(
            primitive,
            format!("{field} must be at least {min}, got {value}"),
        ))
    }
}

/// Arc lengths must lie in `(0, 2π]`; starts must be finite.
pub(crate) fn arc(primitive: &'static str, field: &str, start: f32, length: f32) -> Result<()> {
    finite(primitive, field, start)?;
    if length.is_finite() && length > 0.0 && length <= std::f32::consts::TAU + 1e-4 {
        Ok(())
    } else {
        Err(StageError::invalid(
            primitive,
            format!("{field} length must be in (0, 2π], got {length}"),
        ))
    }
}
