use glam::Vec3;

use crate::errors::Result;
use crate::host::{FrameState, HostConfig, ModelBuilder, SceneBuilder, SceneHost, SurfaceStyle};
use crate::resources::PhongMaterial;
use crate::resources::primitives::{BoxOptions, Primitive};

/// A unit cube spinning in front of the camera.
#[derive(Debug, Default)]
pub struct Basic;

impl Basic {
    #[must_use]
    pub fn config() -> HostConfig {
        HostConfig::new().with_camera_position(Vec3::new(0.0, 0.0, 2.0))
    }
}

impl SceneBuilder for Basic {
    fn build(&mut self, builder: &mut ModelBuilder<'_>) -> Result<()> {
        builder.build_primitive(
            &Primitive::Box(BoxOptions::new(1.0, 1.0, 1.0)),
            &SurfaceStyle::new(PhongMaterial::new(0x04_4a_88)),
            Vec3::ZERO,
        )?;
        Ok(())
    }

    fn update(&mut self, host: &mut SceneHost, frame: &FrameState) -> Result<()> {
        host.spin_renderables(frame.elapsed_ms);
        Ok(())
    }
}
