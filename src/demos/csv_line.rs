use std::f32::consts::FRAC_PI_2;
use std::path::PathBuf;

use glam::Vec3;

use crate::assets::{AssetSource, ColorMapping, DataMapping};
use crate::errors::Result;
use crate::host::{AssetOptions, HostConfig, LightConfig, ModelBuilder, OrbitConfig, SceneBuilder};
use crate::resources::{DrawMode, LineBasicMaterial};

use super::{DEFAULT_DATA_PATH, add_grid};

/// Records drawn as one polyline, red growing with the third field.
#[derive(Debug, Clone)]
pub struct CsvLine {
    pub data: AssetSource,
    pub model: Option<PathBuf>,
}

impl Default for CsvLine {
    fn default() -> Self {
        Self {
            data: AssetSource::path(DEFAULT_DATA_PATH),
            model: None,
        }
    }
}

impl CsvLine {
    #[must_use]
    pub fn config() -> HostConfig {
        HostConfig::new()
            .with_camera_position(Vec3::new(0.0, 0.0, 2.0))
            .with_light(LightConfig::white_at(Vec3::new(-4.0, 4.0, 10.0)))
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

    #[must_use]
    pub fn with_model(mut self, path: impl Into<PathBuf>) -> Self {
        self.model = Some(path.into());
        self
    }

    /// Vertex `(y, z, x)`, color `(1.9 z, 0.1, 0)`.
    #[must_use]
    pub fn mapping() -> DataMapping {
        DataMapping::new(
            DrawMode::LineStrip,
            LineBasicMaterial::new(0xff_ff_ff).with_vertex_colors(true),
        )
        .with_position([1, 2, 0])
        .with_color(ColorMapping::Ramp {
            column: 2,
            scale: 1.9,
            green: 0.1,
            blue: 0.0,
        })
    }
}

impl SceneBuilder for CsvLine {
    fn build(&mut self, builder: &mut ModelBuilder<'_>) -> Result<()> {
        add_grid(builder, 100.0, 100)?;
        builder.build_from_external_data(self.data.clone(), Self::mapping());

        if let Some(path) = &self.model {
            builder.build_from_asset(AssetSource::path(path), AssetOptions::default());
        }
        Ok(())
    }
}
