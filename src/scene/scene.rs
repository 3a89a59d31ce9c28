use glam::{Affine3A, Vec3};
use slotmap::SlotMap;

use crate::resources::color::hex_to_linear;
use crate::resources::mesh::Mesh;
use crate::scene::light::Light;
use crate::scene::node::Node;
use crate::scene::transform_system;
use crate::scene::{LightKey, MeshKey, NodeHandle};

/// 场景图结构
///
/// Scene 是纯数据层：节点层级 + 组件池 (meshes / lights)。
/// 节点按插入顺序保存在 `root_nodes` 中，渲染与更新都按此顺序遍历。
pub struct Scene {
    pub nodes: SlotMap<NodeHandle, Node>,
    pub root_nodes: Vec<NodeHandle>,

    // ====组件池====
    pub meshes: SlotMap<MeshKey, Mesh>,
    pub lights: SlotMap<LightKey, Light>,

    /// Linear RGB clear color; `None` uses the renderer's default.
    pub background: Option<Vec3>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root_nodes: Vec::new(),
            meshes: SlotMap::with_key(),
            lights: SlotMap::with_key(),
            background: None,
        }
    }

    pub fn set_background_hex(&mut self, color: u32) {
        self.background = Some(hex_to_linear(color));
    }

    /// 添加一个节点到场景 (默认放在根节点)
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.root_nodes.push(handle);
        handle
    }

    /// Inserts `child` under `parent`. Falls back to the root when the parent is gone.
    pub fn add_to_parent(&mut self, child: Node, parent: NodeHandle) -> NodeHandle {
        let handle = self.nodes.insert(child);
        self.attach(handle, parent);
        handle
    }

    /// Inserts a node that is not yet part of the hierarchy.
    ///
    /// The caller must place it with [`Scene::attach`] or [`Scene::attach_to_root`].
    pub(crate) fn insert_detached(&mut self, node: Node) -> NodeHandle {
        self.nodes.insert(node)
    }

    /// Makes a detached node a root node. No-op if it already has a place.
    pub(crate) fn attach_to_root(&mut self, handle: NodeHandle) -> bool {
        let Some(node) = self.nodes.get(handle) else {
            return false;
        };
        if node.parent.is_some() || self.root_nodes.contains(&handle) {
            return false;
        }
        self.root_nodes.push(handle);
        true
    }

    /// 核心逻辑：建立父子关系 (Attach)
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) {
        if child == parent {
            log::warn!("Cannot attach node to itself!");
            return;
        }

        // 1. Detach from old
        let old_parent = self.nodes.get(child).and_then(|n| n.parent);
        if let Some(p) = old_parent {
            if let Some(n) = self.nodes.get_mut(p)
                && let Some(i) = n.children.iter().position(|&x| x == child)
            {
                n.children.remove(i);
            }
        } else if let Some(i) = self.root_nodes.iter().position(|&x| x == child) {
            self.root_nodes.remove(i);
        }

        // 2. Attach to new
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        } else {
            log::error!("Parent node not found during attach!");
            self.root_nodes.push(child);
            return;
        }

        // 3. Update child
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
            c.transform.mark_dirty();
        }
    }

    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    /// Whether `handle` is a root node.
    #[must_use]
    pub fn is_root(&self, handle: NodeHandle) -> bool {
        self.root_nodes.contains(&handle)
    }

    /// Number of nodes in the subtree rooted at `handle`, including itself.
    #[must_use]
    pub fn subtree_len(&self, handle: NodeHandle) -> usize {
        let mut count = 0;
        let mut stack = vec![handle];
        while let Some(h) = stack.pop() {
            if let Some(node) = self.nodes.get(h) {
                count += 1;
                stack.extend_from_slice(&node.children);
            }
        }
        count
    }

    // ========================================================================
    // 组件 API
    // ========================================================================

    /// Adds a mesh node at the root.
    pub fn add_mesh(&mut self, mesh: Mesh) -> NodeHandle {
        let node = self.mesh_node(mesh);
        self.add_node(node)
    }

    pub fn add_mesh_to_parent(&mut self, mesh: Mesh, parent: NodeHandle) -> NodeHandle {
        let node = self.mesh_node(mesh);
        self.add_to_parent(node, parent)
    }

    pub(crate) fn mesh_node(&mut self, mesh: Mesh) -> Node {
        let name = mesh.name.clone();
        Node::with_mesh(name, self.meshes.insert(mesh))
    }

    /// Adds a light node at `position`.
    pub fn add_light(&mut self, light: Light, position: Vec3) -> NodeHandle {
        let key = self.lights.insert(light);
        self.add_node(Node::with_light(key, position))
    }

    /// Iterates lights together with their world matrices.
    pub fn iter_lights(&self) -> impl Iterator<Item = (&Light, &Affine3A)> {
        self.nodes.values().filter_map(move |node| {
            let key = node.light?;
            let light = self.lights.get(key)?;
            Some((light, &node.transform.world_matrix))
        })
    }

    // ========================================================================
    // 矩阵更新
    // ========================================================================

    /// 更新整个场景的世界矩阵，每帧渲染前调用
    pub fn update_matrix_world(&mut self) {
        transform_system::update_hierarchy_iterative(&mut self.nodes, &self.root_nodes);
    }
}
