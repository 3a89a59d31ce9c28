use std::f32::consts::FRAC_PI_2;
use std::path::PathBuf;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::assets::AssetSource;
use crate::errors::Result;
use crate::host::{AssetOptions, HostConfig, LightConfig, ModelBuilder, OrbitConfig, SceneBuilder};
use crate::resources::geometry::{Geometry, POSITION};
use crate::resources::helpers;
use crate::resources::primitives::{PlaneOptions, create_plane};
use crate::resources::{DrawMode, LineBasicMaterial, PhongMaterial};

use super::add_grid;

/// Upper bound (exclusive) of the random terrain height.
pub const MAX_HEIGHT: f32 = 0.1;

/// A 100 x 100 cell height field lying on the XZ plane.
#[derive(Debug, Clone)]
pub struct Terrain {
    pub seed: u64,
    /// OBJ model placed on the terrain once loaded.
    pub model: Option<PathBuf>,
}

impl Default for Terrain {
    fn default() -> Self {
        Self {
            seed: 0x7e55_e11a,
            model: None,
        }
    }
}

impl Terrain {
    #[must_use]
    pub fn config() -> HostConfig {
        HostConfig::new()
            .with_camera_position(Vec3::new(0.0, 0.0, 2.0))
            .with_light(LightConfig::white_at(Vec3::new(-4.0, 4.0, 10.0)))
            .with_background(0xf0_f0_f0)
            .with_orbit(OrbitConfig {
                max_polar_angle: FRAC_PI_2,
                ..Default::default()
            })
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_model(mut self, path: impl Into<PathBuf>) -> Self {
        self.model = Some(path.into());
        self
    }

    /// Unit plane rotated onto XZ with every height drawn from `[0, MAX_HEIGHT)`.
    pub fn height_field(seed: u64) -> Result<Geometry> {
        let mut geometry = create_plane(&PlaneOptions {
            width: 1.0,
            height: 1.0,
            width_segments: 100,
            height_segments: 100,
        })?;
        // 平面默认朝 +Z，转到水平面
        geometry.rotate_x(-FRAC_PI_2);

        let mut rng = StdRng::seed_from_u64(seed);
        if let Some(positions) = geometry.get_attribute_mut(POSITION) {
            for i in 0..positions.count() {
                if let Some(mut p) = positions.get_vec3(i) {
                    p.y = rng.random_range(0.0..MAX_HEIGHT);
                    positions.set_vec3(i, p);
                }
            }
        }
        geometry.compute_vertex_normals();
        geometry.compute_bounding_box();
        Ok(geometry)
    }
}

impl SceneBuilder for Terrain {
    fn build(&mut self, builder: &mut ModelBuilder<'_>) -> Result<()> {
        let geometry = Self::height_field(self.seed)?;
        let wire = helpers::wireframe(&geometry);

        let node = builder.add_geometry(geometry, PhongMaterial::new(0x51_51_51), DrawMode::Triangles, Vec3::ZERO)?;
        builder.add_child(node, wire, LineBasicMaterial::new(0xff_ff_00), DrawMode::Lines)?;
        add_grid(builder, 100.0, 100)?;

        if let Some(path) = &self.model {
            let ticket = builder.build_from_asset(AssetSource::path(path), AssetOptions::default());
            log::info!("Loading model '{}' (load #{})", path.display(), ticket.id());
        }
        Ok(())
    }
}
