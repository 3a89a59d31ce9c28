use glam::Vec3;

use crate::errors::Result;
use crate::host::{HostConfig, ModelBuilder, OrbitConfig, SceneBuilder};
use crate::resources::geometry::{Attribute, COLOR, Geometry};
use crate::resources::helpers;
use crate::resources::{DrawMode, LineBasicMaterial, PhongMaterial};

/// Length of the normal segments drawn over the quad.
const NORMAL_SIZE: f32 = 0.1;

/// A two-triangle quad assembled by hand, one color per corner.
#[derive(Debug, Default)]
pub struct BufferGeometry;

impl BufferGeometry {
    #[must_use]
    pub fn config() -> HostConfig {
        HostConfig::new()
            .with_camera_position(Vec3::new(0.0, 0.0, 2.0))
            .with_orbit(OrbitConfig::default())
    }

    /// Quad in the XY plane with red, green, blue and yellow corners.
    #[must_use]
    pub fn quad() -> Geometry {
        let mut geometry = Geometry::from_positions(&[
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(-1.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
        ]);
        geometry.set_attribute(
            COLOR,
            Attribute::from_vec3(&[Vec3::X, Vec3::Y, Vec3::Z, Vec3::new(1.0, 1.0, 0.0)]),
        );
        geometry.set_indices(vec![0, 1, 2, 2, 1, 3]);
        geometry.compute_vertex_normals();
        geometry.compute_bounding_box();
        geometry
    }
}

impl SceneBuilder for BufferGeometry {
    fn build(&mut self, builder: &mut ModelBuilder<'_>) -> Result<()> {
        let geometry = Self::quad();
        let normals = helpers::vertex_normals(&geometry, NORMAL_SIZE);

        let material = PhongMaterial::new(0xff_ff_ff).with_vertex_colors(true);
        builder.add_geometry(geometry, material, DrawMode::Triangles, Vec3::ZERO)?;
        builder.add_fixture(normals, LineBasicMaterial::new(0xff_ff_00), DrawMode::Lines, Vec3::ZERO)?;
        Ok(())
    }
}
