use glam::Vec3;

use crate::errors::Result;
use crate::host::{FrameState, HostConfig, ModelBuilder, SceneBuilder, SceneHost, SurfaceStyle};
use crate::resources::helpers;
use crate::resources::primitives::{BoxOptions, Primitive};
use crate::resources::{DrawMode, LineBasicMaterial, PhongMaterial};

/// A cube and, beside it, the cube's hard edges drawn as lines.
#[derive(Debug, Clone, Copy)]
pub struct Edges {
    /// Dihedral angle in degrees above which an edge is drawn.
    pub threshold_deg: f32,
}

impl Default for Edges {
    fn default() -> Self {
        Self { threshold_deg: 1.0 }
    }
}

impl Edges {
    #[must_use]
    pub fn config() -> HostConfig {
        HostConfig::new().with_camera_position(Vec3::new(0.0, 0.0, 2.0))
    }
}

impl SceneBuilder for Edges {
    fn build(&mut self, builder: &mut ModelBuilder<'_>) -> Result<()> {
        let cube = Primitive::Box(BoxOptions::new(1.0, 1.0, 1.0));
        let outline = helpers::edges(&cube.build()?, self.threshold_deg);

        builder.build_primitive(
            &cube,
            &SurfaceStyle::new(PhongMaterial::new(0x04_4a_88)),
            Vec3::new(1.0, 0.0, 0.0),
        )?;
        builder.add_geometry(
            outline,
            LineBasicMaterial::new(0xff_00_00),
            DrawMode::Lines,
            Vec3::new(-1.0, 0.0, 0.0),
        )?;
        Ok(())
    }

    fn update(&mut self, host: &mut SceneHost, frame: &FrameState) -> Result<()> {
        host.spin_renderables(frame.elapsed_ms);
        Ok(())
    }
}
