use glam::{Vec2, Vec3};

use crate::errors::Result;
use crate::host::{FrameState, HostConfig, ModelBuilder, SceneBuilder, SceneHost, SurfaceStyle};
use crate::resources::PhongMaterial;
use crate::resources::primitives::{Primitive, SphereOptions};
use crate::scene::NodeHandle;

/// `(radius, angular speed)` of each summed circle.
const ORBITS: [(f32, f32); 3] = [(10.0, 1.0), (5.0, 3.0), (2.0, 15.0)];

/// XY offset at `t` seconds: the sum of three circular motions.
#[must_use]
pub fn orbit_position(t: f32) -> Vec2 {
    ORBITS
        .iter()
        .map(|&(radius, speed)| Vec2::new((t * speed).cos(), (t * speed).sin()) * radius)
        .sum()
}

/// A glowing sphere tracing an epicycle in the XY plane.
#[derive(Debug, Default)]
pub struct SinCos {
    sun: Option<NodeHandle>,
}

impl SinCos {
    #[must_use]
    pub fn config() -> HostConfig {
        HostConfig::new().with_camera_position(Vec3::new(0.0, 0.0, 30.0))
    }
}

impl SceneBuilder for SinCos {
    fn build(&mut self, builder: &mut ModelBuilder<'_>) -> Result<()> {
        let material = PhongMaterial::new(0x00_00_00)
            .with_emissive(0xff_ff_00)
            .with_flat_shading(true);
        let sun = builder.build_primitive(
            &Primitive::Sphere(SphereOptions::new(1.0, 12, 12)),
            &SurfaceStyle::new(material),
            Vec3::ZERO,
        )?;
        self.sun = Some(sun);
        Ok(())
    }

    fn update(&mut self, host: &mut SceneHost, frame: &FrameState) -> Result<()> {
        let Some(sun) = self.sun else {
            return Ok(());
        };
        let offset = orbit_position((frame.elapsed_ms * 0.001) as f32);
        if let Some(node) = host.scene_mut().get_node_mut(sun) {
            let z = node.transform.position.z;
            node.transform.position = offset.extend(z);
        }
        Ok(())
    }
}
