use std::f32::consts::FRAC_PI_2;

use glam::Vec3;

use crate::assets::{AssetSource, ColorMapping, DataMapping};
use crate::errors::Result;
use crate::host::{HostConfig, ModelBuilder, OrbitConfig, SceneBuilder};
use crate::resources::{DrawMode, Image, PointsMaterial};

use super::{DEFAULT_DATA_PATH, add_grid};

/// Side of the generated disc sprite, in pixels.
const SPRITE_SIZE: u32 = 64;

/// Records drawn as round point sprites colored by their own coordinates.
#[derive(Debug, Clone)]
pub struct AntennaBeam {
    pub data: AssetSource,
    pub point_size: f32,
    pub alpha_test: f32,
}

impl Default for AntennaBeam {
    fn default() -> Self {
        Self {
            data: AssetSource::path(DEFAULT_DATA_PATH),
            point_size: 0.1,
            alpha_test: 0.8,
        }
    }
}

impl AntennaBeam {
    /// Unlit; camera raised above the grid.
    #[must_use]
    pub fn config() -> HostConfig {
        HostConfig::new()
            .without_light()
            .with_camera_position(Vec3::new(0.0, 1.0, 2.0))
            .with_orbit(OrbitConfig {
                max_polar_angle: FRAC_PI_2,
                ..Default::default()
            })
    }

    #[must_use]
    pub fn with_data(mut self, data: AssetSource) -> Self {
        self.data = data;
        self
    }

    /// Vertex `(x, y, z)`, color `(z, y, x)`, stood up from Z-up to Y-up.
    #[must_use]
    pub fn mapping(&self, material: PointsMaterial) -> DataMapping {
        DataMapping::new(DrawMode::Points, material)
            .with_color(ColorMapping::Channels([2, 1, 0]))
            .with_point_size(self.point_size)
            .with_rotate_x(-FRAC_PI_2)
    }
}

impl SceneBuilder for AntennaBeam {
    fn build(&mut self, builder: &mut ModelBuilder<'_>) -> Result<()> {
        add_grid(builder, 10.0, 100)?;

        let sprite = builder.assets().add_texture(Image::disc(SPRITE_SIZE));
        let material = PointsMaterial::new(0xff_ff_ff)
            .with_vertex_colors(true)
            .with_size_attenuation(true)
            .with_alpha_test(self.alpha_test)
            .with_sprite(sprite);

        builder.build_from_external_data(self.data.clone(), self.mapping(material));
        Ok(())
    }
}
