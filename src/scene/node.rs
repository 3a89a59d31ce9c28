use std::borrow::Cow;

use glam::{Affine3A, Vec3};

use crate::scene::transform::Transform;
use crate::scene::{LightKey, MeshKey, NodeHandle};

/// 场景节点
///
/// Links a transform into the hierarchy and optionally points at one mesh or
/// one light in the scene's component pools. A node with neither is a group:
/// loaded models hang their meshes under one, scaled as a whole.
///
/// `parent` and `children` are only changed through [`Scene::attach`] so the
/// two sides never disagree.
///
/// [`Scene::attach`]: crate::scene::Scene::attach
#[derive(Debug, Clone)]
pub struct Node {
    pub name: Cow<'static, str>,

    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,

    pub transform: Transform,

    pub mesh: Option<MeshKey>,
    pub light: Option<LightKey>,

    /// Hidden nodes prune their whole subtree from rendering.
    pub visible: bool,
}

impl Node {
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
            mesh: None,
            light: None,
            visible: true,
        }
    }

    pub(crate) fn with_mesh(name: impl Into<Cow<'static, str>>, mesh: MeshKey) -> Self {
        Self {
            mesh: Some(mesh),
            ..Self::new(name)
        }
    }

    pub(crate) fn with_light(light: LightKey, position: Vec3) -> Self {
        let mut node = Self::new("Light");
        node.light = Some(light);
        node.transform.position = position;
        node
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    /// Neither a mesh nor a light.
    #[must_use]
    pub fn is_group(&self) -> bool {
        self.mesh.is_none() && self.light.is_none()
    }

    /// Refreshed by [`Scene::update_matrix_world`](crate::scene::Scene::update_matrix_world).
    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.transform.world_matrix
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new("Group")
    }
}
