use glam::Vec3;

use crate::assets::io::read_with_progress;
use crate::assets::loader::{LoadPayload, LoadTicket};
use crate::assets::tabular::{self, DataMapping};
use crate::assets::{AssetServer, AssetSource, obj};
use crate::errors::Result;
use crate::host::frame_loop::FrameState;
use crate::host::scene_host::SceneHost;
use crate::resources::geometry::Geometry;
use crate::resources::helpers;
use crate::resources::material::{LineBasicMaterial, Material, PhongMaterial};
use crate::resources::mesh::{DrawMode, Mesh};
use crate::resources::primitives::Primitive;
use crate::scene::{Light, Node, NodeHandle};

/// Per-demo scene content.
///
/// `build` runs once during [`SceneHost::initialize`]; `update` runs once per
/// frame after the frame is rendered.
pub trait SceneBuilder {
    fn build(&mut self, builder: &mut ModelBuilder<'_>) -> Result<()>;

    fn update(&mut self, _host: &mut SceneHost, _frame: &FrameState) -> Result<()> {
        Ok(())
    }
}

/// Surface material plus an optional wireframe overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceStyle {
    pub material: Material,
    pub wireframe: Option<LineBasicMaterial>,
}

impl SurfaceStyle {
    #[must_use]
    pub fn new(material: impl Into<Material>) -> Self {
        Self {
            material: material.into(),
            wireframe: None,
        }
    }

    #[must_use]
    pub fn with_wireframe(mut self, color: u32) -> Self {
        self.wireframe = Some(LineBasicMaterial::new(color));
        self
    }
}

/// Options for [`ModelBuilder::build_from_asset`].
#[derive(Debug, Clone, PartialEq)]
pub struct AssetOptions {
    pub scale: Vec3,
    pub material: Material,
}

impl Default for AssetOptions {
    fn default() -> Self {
        Self {
            scale: Vec3::new(0.0005, 0.0005, 0.0004),
            material: PhongMaterial::new(0xc0_c0_c0).into(),
        }
    }
}

/// Adds content to a [`SceneHost`].
///
/// Renderables created here are registered with the host; fixtures (lights,
/// helpers) only join the scene.
pub struct ModelBuilder<'a> {
    host: &'a mut SceneHost,
}

impl<'a> ModelBuilder<'a> {
    pub fn new(host: &'a mut SceneHost) -> Self {
        Self { host }
    }

    #[must_use]
    pub fn assets(&self) -> &AssetServer {
        self.host.assets()
    }

    pub fn set_background(&mut self, color: u32) {
        self.host.scene_mut().set_background_hex(color);
    }

    /// Tessellates `primitive` into a group holding a surface mesh and, if the
    /// style asks for it, a wireframe overlay. The group is placed at
    /// `position` and registered.
    ///
    /// Invalid parameters fail before anything is added.
    pub fn build_primitive(
        &mut self,
        primitive: &Primitive,
        style: &SurfaceStyle,
        position: Vec3,
    ) -> Result<NodeHandle> {
        let geometry = primitive.build()?;
        let wire = style.wireframe.as_ref().map(|_| helpers::wireframe(&geometry));

        let assets = self.host.assets().clone();
        let surface = Mesh::new(
            assets.add_geometry(geometry),
            assets.add_material(style.material.clone()),
        );

        let scene = self.host.scene_mut();
        let mut group = Node::new(primitive.name());
        group.transform.position = position;
        let group = scene.insert_detached(group);

        scene.add_mesh_to_parent(surface, group);

        if let (Some(wire), Some(material)) = (wire, &style.wireframe) {
            let lines = Mesh::with_mode(
                assets.add_geometry(wire),
                assets.add_material(material.clone()),
                DrawMode::Lines,
            );
            scene.add_mesh_to_parent(lines, group);
        }

        self.host.register(group);
        log::debug!("Built {} at {position}", primitive.name());
        Ok(group)
    }

    /// Adds a drawable made from caller-assembled geometry and registers it.
    pub fn add_geometry(
        &mut self,
        geometry: Geometry,
        material: impl Into<Material>,
        mode: DrawMode,
        position: Vec3,
    ) -> Result<NodeHandle> {
        let node = self.insert_drawable(geometry, material.into(), mode, position)?;
        self.host.register(node);
        Ok(node)
    }

    /// Adds a helper drawable (grid, normals, edges) to the scene root
    /// without registering it as a renderable.
    pub fn add_fixture(
        &mut self,
        geometry: Geometry,
        material: impl Into<Material>,
        mode: DrawMode,
        position: Vec3,
    ) -> Result<NodeHandle> {
        let node = self.insert_drawable(geometry, material.into(), mode, position)?;
        self.host.scene_mut().attach_to_root(node);
        Ok(node)
    }

    /// Adds a drawable as a child of an existing node.
    pub fn add_child(
        &mut self,
        parent: NodeHandle,
        geometry: Geometry,
        material: impl Into<Material>,
        mode: DrawMode,
    ) -> Result<NodeHandle> {
        geometry.validate()?;
        let assets = self.host.assets().clone();
        let mesh = Mesh::with_mode(
            assets.add_geometry(geometry),
            assets.add_material(material.into()),
            mode,
        );
        Ok(self.host.scene_mut().add_mesh_to_parent(mesh, parent))
    }

    pub fn add_light(&mut self, light: Light, position: Vec3) -> NodeHandle {
        self.host.scene_mut().add_light(light, position)
    }

    fn insert_drawable(
        &mut self,
        geometry: Geometry,
        material: Material,
        mode: DrawMode,
        position: Vec3,
    ) -> Result<NodeHandle> {
        geometry.validate()?;
        let assets = self.host.assets().clone();
        let mesh = Mesh::with_mode(assets.add_geometry(geometry), assets.add_material(material), mode);

        let scene = self.host.scene_mut();
        let mut node = scene.mesh_node(mesh);
        node.transform.position = position;
        Ok(scene.insert_detached(node))
    }

    /// Loads comma-separated records asynchronously and registers one
    /// drawable built with `mapping`. Nothing is added until completion.
    pub fn build_from_external_data(&mut self, source: AssetSource, mapping: DataMapping) -> LoadTicket {
        let name = source.name().into_owned();
        self.host.loads.spawn(name.clone(), move |sink| async move {
            let bytes = read_with_progress(&source, |p| sink.report(p)).await?;
            let geometry = tabular::load_tabular(&bytes, &mapping, &name)?;
            log::info!("'{name}': {} records", geometry.vertex_count());
            Ok(LoadPayload::Drawable {
                geometry,
                material: mapping.resolved_material(),
                mode: mapping.mode,
                position: Vec3::ZERO,
            })
        })
    }

    /// Loads an OBJ model asynchronously and registers it as one scaled group.
    /// On failure the load is marked failed and the scene is left unchanged.
    pub fn build_from_asset(&mut self, source: AssetSource, options: AssetOptions) -> LoadTicket {
        let name = source.name().into_owned();
        self.host.loads.spawn(name.clone(), move |sink| async move {
            let bytes = read_with_progress(&source, |p| {
                log::debug!("'{name}': {p:.0}% loaded");
                sink.report(p);
            })
            .await?;
            let geometries = obj::parse_obj(&bytes, &name)?;
            Ok(LoadPayload::Model {
                name,
                geometries,
                material: options.material,
                scale: options.scale,
            })
        })
    }
}
