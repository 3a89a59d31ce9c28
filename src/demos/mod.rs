//! Demo Scenes
//!
//! Each demo is a [`SceneBuilder`](crate::host::SceneBuilder) plus a
//! `config()` describing its camera, light, background and controls. The
//! binaries under `demos/` pair the two with [`App`](crate::app::App).
//!
//! | Demo | Content |
//! |------|---------|
//! | [`Basic`] | Spinning Phong cube |
//! | [`BufferGeometry`] | Hand-assembled colored quad with its normals |
//! | [`GeometryShowcase`] | Every primitive generator with a wireframe overlay |
//! | [`Convex`] | Convex hull of a dodecahedron |
//! | [`Terrain`] | Random height field over a grid |
//! | [`SinCos`] | Emissive sphere on a sum of circular orbits |
//! | [`Edges`] | A cube next to its edge lines |
//! | [`CsvLine`] | Polyline read from comma-separated records |
//! | [`AntennaBeam`] | Point sprites read from comma-separated records |

mod antenna_beam;
mod basic;
mod buffer_geometry;
mod convex;
mod csv_line;
mod edges;
mod geometry_showcase;
mod sin_cos;
mod terrain;

pub use antenna_beam::AntennaBeam;
pub use basic::Basic;
pub use buffer_geometry::BufferGeometry;
pub use convex::Convex;
pub use csv_line::CsvLine;
pub use edges::Edges;
pub use geometry_showcase::{GeometryShowcase, heart_shape};
pub use sin_cos::{SinCos, orbit_position};
pub use terrain::Terrain;

use crate::errors::Result;
use crate::host::ModelBuilder;
use crate::resources::helpers;
use crate::resources::{DrawMode, LineBasicMaterial};
use crate::scene::NodeHandle;

/// Records shared by the data-driven demos.
pub const DEFAULT_DATA_PATH: &str = "data/data2.csv";

/// Adds a faint ground grid as a fixture.
fn add_grid(builder: &mut ModelBuilder<'_>, size: f32, divisions: u32) -> Result<NodeHandle> {
    let material = LineBasicMaterial::new(0xff_ff_ff)
        .with_vertex_colors(true)
        .with_opacity(0.25);
    builder.add_fixture(helpers::grid(size, divisions), material, DrawMode::Lines, glam::Vec3::ZERO)
}
