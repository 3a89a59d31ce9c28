use glam::Vec3;

use crate::errors::Result;
use crate::host::{HostConfig, LightConfig, ModelBuilder, OrbitConfig, SceneBuilder, SurfaceStyle};
use crate::resources::LambertMaterial;
use crate::resources::primitives::{ConvexOptions, Primitive, dodecahedron_vertices};

/// Translucent hull of the twenty corners of a dodecahedron.
#[derive(Debug, Clone, Copy)]
pub struct Convex {
    pub radius: f32,
}

impl Default for Convex {
    fn default() -> Self {
        Self { radius: 10.0 }
    }
}

impl Convex {
    #[must_use]
    pub fn config() -> HostConfig {
        HostConfig::new()
            .with_camera_position(Vec3::new(0.0, 0.0, 30.0))
            .with_light(LightConfig::white_at(Vec3::new(-4.0, 4.0, 10.0)))
            .with_orbit(OrbitConfig::default())
    }
}

impl SceneBuilder for Convex {
    fn build(&mut self, builder: &mut ModelBuilder<'_>) -> Result<()> {
        let hull = Primitive::Convex(ConvexOptions::new(dodecahedron_vertices(self.radius)));
        let material = LambertMaterial::new(0xff_ff_00).with_opacity(0.8);
        builder.build_primitive(&hull, &SurfaceStyle::new(material), Vec3::new(-4.0, 2.0, 0.0))?;
        Ok(())
    }
}
