//! 变换系统 (Transform System)
//!
//! 负责场景图的矩阵层级更新，与 Scene 解耦以避免借用冲突。
//! 只需要借用 nodes SlotMap 和 root_nodes 列表。

use glam::Affine3A;
use slotmap::SlotMap;

use crate::scene::NodeHandle;
use crate::scene::node::Node;

/// Updates world matrices for every node reachable from `roots`.
///
/// Iterative depth-first walk, so deep hierarchies cannot overflow the stack.
/// A node's world matrix is recomputed only when its local matrix or an
/// ancestor's world matrix changed.
pub fn update_hierarchy_iterative(nodes: &mut SlotMap<NodeHandle, Node>, roots: &[NodeHandle]) {
    // 工作栈：(节点句柄, 父世界矩阵, 父是否变化)
    let mut stack: Vec<(NodeHandle, Affine3A, bool)> = Vec::with_capacity(64);

    for &root_handle in roots.iter().rev() {
        stack.push((root_handle, Affine3A::IDENTITY, false));
    }

    while let Some((node_handle, parent_world_matrix, parent_changed)) = stack.pop() {
        let Some(node) = nodes.get_mut(node_handle) else {
            continue;
        };

        let local_changed = node.transform.update_local_matrix();
        let world_needs_update = local_changed || parent_changed;

        if world_needs_update {
            let new_world = parent_world_matrix * *node.transform.local_matrix();
            node.transform.set_world_matrix(new_world);
        }

        let current_world = node.transform.world_matrix;
        for &child_handle in node.children.iter().rev() {
            stack.push((child_handle, current_world, world_needs_update));
        }
    }
}

/// Collects `(handle, world matrix)` for every visible node, parents first.
///
/// Hidden nodes prune their whole subtree.
#[must_use]
pub fn collect_visible(
    nodes: &SlotMap<NodeHandle, Node>,
    roots: &[NodeHandle],
) -> Vec<(NodeHandle, Affine3A)> {
    let mut out = Vec::with_capacity(nodes.len());
    let mut stack: Vec<NodeHandle> = roots.iter().rev().copied().collect();

    while let Some(handle) = stack.pop() {
        let Some(node) = nodes.get(handle) else {
            continue;
        };
        if !node.visible {
            continue;
        }
        out.push((handle, node.transform.world_matrix));
        stack.extend(node.children.iter().rev().copied());
    }

    out
}
