use std::sync::Arc;

use uuid::Uuid;

use crate::assets::handle::{GeometryHandle, MaterialHandle, TextureHandle};
use crate::assets::io::{AssetSource, asset_runtime};
use crate::assets::storage::AssetStorage;
use crate::assets::texture;
use crate::errors::Result;
use crate::resources::geometry::Geometry;
use crate::resources::image::Image;
use crate::resources::material::Material;

/// Namespace for texture uuids derived from their source name.
const TEXTURE_NAMESPACE: Uuid = Uuid::from_u128(0x6c1f_2a4e_93d0_4b8e_a5f1_07c3_d2b9_e411);

/// Shared asset pools.
///
/// Cloning is cheap; clones share the same storage, so loader tasks can hold
/// one while the host thread reads from another.
#[derive(Clone)]
pub struct AssetServer {
    pub geometries: Arc<AssetStorage<GeometryHandle, Geometry>>,
    pub materials: Arc<AssetStorage<MaterialHandle, Material>>,
    pub textures: Arc<AssetStorage<TextureHandle, Image>>,
}

impl Default for AssetServer {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetServer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            geometries: Arc::new(AssetStorage::new()),
            materials: Arc::new(AssetStorage::new()),
            textures: Arc::new(AssetStorage::new()),
        }
    }

    pub fn add_geometry(&self, geometry: Geometry) -> GeometryHandle {
        self.geometries.add(geometry)
    }

    pub fn add_material(&self, material: impl Into<Material>) -> MaterialHandle {
        self.materials.add(material)
    }

    pub fn add_texture(&self, image: Image) -> TextureHandle {
        self.textures.add(image)
    }

    /// Loads and decodes an image, blocking on the asset runtime.
    ///
    /// The same source name always maps to the same handle.
    pub fn load_texture(&self, source: &AssetSource) -> Result<TextureHandle> {
        let uuid = Uuid::new_v5(&TEXTURE_NAMESPACE, source.name().as_bytes());
        if let Some(handle) = self.textures.handle_by_uuid(&uuid) {
            return Ok(handle);
        }

        let image = asset_runtime()?.block_on(texture::load_image(source.clone()))?;
        log::info!(
            "Loaded texture '{}' ({}x{})",
            source.name(),
            image.width,
            image.height
        );
        Ok(self.textures.add_with_uuid(uuid, image))
    }
}
