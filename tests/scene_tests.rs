//! Scene Graph Tests
//!
//! Tests for:
//! - Scene: add nodes, attach hierarchy, subtree queries
//! - Transform: dirty checking, world matrix propagation, Euler round-trip
//! - collect_visible: hidden subtrees are pruned
//! - Camera: aspect updates, view matrix
//! - Lights: direction and world position
//! - AssetServer: shared pools, uuid deduplication

use std::f32::consts::FRAC_PI_2;

use glam::{Affine3A, Vec3};

use stage3d::assets::AssetServer;
use stage3d::resources::geometry::Geometry;
use stage3d::resources::material::{Material, PhongMaterial, PointsMaterial};
use stage3d::resources::mesh::{DrawMode, Mesh};
use stage3d::resources::Image;
use stage3d::scene::transform_system::collect_visible;
use stage3d::scene::{Camera, Light, LightKind, Node, Scene, Transform};

const EPSILON: f32 = 1e-4;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    approx(a.x, b.x) && approx(a.y, b.y) && approx(a.z, b.z)
}

fn world_position(scene: &Scene, handle: stage3d::NodeHandle) -> Vec3 {
    scene
        .get_node(handle)
        .expect("node")
        .world_matrix()
        .translation
        .into()
}

// ============================================================================
// Hierarchy
// ============================================================================

#[test]
fn add_node_is_root() {
    let mut scene = Scene::new();
    let a = scene.add_node(Node::new("a"));
    let b = scene.add_node(Node::new("b"));
    assert_eq!(scene.root_nodes, vec![a, b]);
    assert!(scene.is_root(a));
}

#[test]
fn attach_moves_node_out_of_roots() {
    let mut scene = Scene::new();
    let parent = scene.add_node(Node::new("parent"));
    let child = scene.add_node(Node::new("child"));

    scene.attach(child, parent);

    assert!(!scene.is_root(child));
    assert_eq!(scene.get_node(child).unwrap().parent(), Some(parent));
    assert_eq!(scene.get_node(parent).unwrap().children(), &[child]);
    assert_eq!(scene.subtree_len(parent), 2);
}

#[test]
fn reattach_detaches_from_old_parent() {
    let mut scene = Scene::new();
    let p1 = scene.add_node(Node::new("p1"));
    let p2 = scene.add_node(Node::new("p2"));
    let child = scene.add_to_parent(Node::new("child"), p1);

    scene.attach(child, p2);

    assert!(scene.get_node(p1).unwrap().children().is_empty());
    assert_eq!(scene.get_node(p2).unwrap().children(), &[child]);
}

#[test]
fn attach_to_self_is_ignored() {
    let mut scene = Scene::new();
    let a = scene.add_node(Node::new("a"));
    scene.attach(a, a);
    assert!(scene.is_root(a));
    assert!(scene.get_node(a).unwrap().parent().is_none());
}

#[test]
fn mesh_node_names_follow_draw_mode() {
    let assets = AssetServer::new();
    let geometry = assets.add_geometry(Geometry::from_positions(&[Vec3::ZERO]));
    let material = assets.add_material(PointsMaterial::new(0xffffff));

    let mut scene = Scene::new();
    let handle = scene.add_mesh(Mesh::with_mode(geometry, material, DrawMode::Points));

    let node = scene.get_node(handle).unwrap();
    assert_eq!(node.name, "Points");
    let mesh = &scene.meshes[node.mesh.unwrap()];
    assert_eq!(mesh.mode, DrawMode::Points);
}

// ============================================================================
// Transforms
// ============================================================================

#[test]
fn child_world_matrix_includes_parent() {
    let mut scene = Scene::new();
    let parent = scene.add_node(Node::new("parent"));
    let child = scene.add_to_parent(Node::new("child"), parent);

    scene.get_node_mut(parent).unwrap().transform.position = Vec3::new(1.0, 0.0, 0.0);
    scene.get_node_mut(parent).unwrap().transform.scale = Vec3::splat(2.0);
    scene.get_node_mut(child).unwrap().transform.position = Vec3::new(0.0, 1.0, 0.0);
    scene.update_matrix_world();

    assert!(vec3_approx(world_position(&scene, child), Vec3::new(1.0, 2.0, 0.0)));
}

#[test]
fn parent_change_propagates_on_next_update() {
    let mut scene = Scene::new();
    let parent = scene.add_node(Node::new("parent"));
    let child = scene.add_to_parent(Node::new("child"), parent);
    scene.update_matrix_world();

    scene.get_node_mut(parent).unwrap().transform.position = Vec3::new(0.0, 0.0, -3.0);
    scene.update_matrix_world();

    assert!(vec3_approx(world_position(&scene, child), Vec3::new(0.0, 0.0, -3.0)));
}

#[test]
fn transform_reports_changes_once() {
    let mut t = Transform::new();
    assert!(t.update_local_matrix());
    assert!(!t.update_local_matrix());

    t.position = Vec3::X;
    assert!(t.update_local_matrix());
    assert!(!t.update_local_matrix());

    t.mark_dirty();
    assert!(t.update_local_matrix());
}

#[test]
fn euler_round_trip() {
    let mut t = Transform::new();
    t.set_rotation_euler(0.3, 0.2, 0.1);
    assert!(vec3_approx(t.rotation_euler(), Vec3::new(0.3, 0.2, 0.1)));
}

#[test]
fn look_at_faces_target() {
    let mut t = Transform::new();
    t.position = Vec3::new(0.0, 0.0, 5.0);
    t.look_at(Vec3::ZERO, Vec3::Y);
    let forward = t.rotation * Vec3::NEG_Z;
    assert!(vec3_approx(forward, Vec3::NEG_Z));
}

#[test]
fn hidden_node_prunes_subtree() {
    let mut scene = Scene::new();
    let a = scene.add_node(Node::new("a"));
    let hidden = scene.add_node(Node::new("hidden"));
    let under_hidden = scene.add_to_parent(Node::new("under"), hidden);
    scene.get_node_mut(hidden).unwrap().visible = false;
    scene.update_matrix_world();

    let visible: Vec<_> = collect_visible(&scene.nodes, &scene.root_nodes)
        .into_iter()
        .map(|(h, _)| h)
        .collect();
    assert_eq!(visible, vec![a]);
    assert!(!visible.contains(&under_hidden));
}

#[test]
fn collect_visible_lists_parents_first() {
    let mut scene = Scene::new();
    let root = scene.add_node(Node::new("root"));
    let child = scene.add_to_parent(Node::new("child"), root);
    let other = scene.add_node(Node::new("other"));
    scene.update_matrix_world();

    let order: Vec<_> = collect_visible(&scene.nodes, &scene.root_nodes)
        .into_iter()
        .map(|(h, _)| h)
        .collect();
    assert_eq!(order, vec![root, child, other]);
}

// ============================================================================
// Camera & Lights
// ============================================================================

#[test]
fn camera_set_aspect_updates_projection() {
    let mut camera = Camera::new_perspective(75.0, 1.0, 0.1, 1000.0);
    let before = camera.projection_matrix();
    camera.set_aspect(2.0);
    let after = camera.projection_matrix();

    assert!(approx(camera.aspect, 2.0));
    // x scale halves when the aspect doubles
    assert!(approx(after.x_axis.x * 2.0, before.x_axis.x));
    assert!(approx(after.y_axis.y, before.y_axis.y));
    assert!(approx(camera.fov_degrees(), 75.0));
}

#[test]
fn camera_view_matrix_moves_world_opposite() {
    let mut camera = Camera::new_perspective(75.0, 1.0, 0.1, 1000.0);
    camera.transform.position = Vec3::new(0.0, 0.0, 2.0);
    let p = camera.view_matrix().transform_point3(Vec3::ZERO);
    assert!(vec3_approx(p, Vec3::new(0.0, 0.0, -2.0)));
}

#[test]
fn directional_light_points_at_origin() {
    let light = Light::new_directional(0xffffff, 1.0);
    let dir = light.direction_from(Vec3::new(0.0, 10.0, 0.0)).unwrap();
    assert!(vec3_approx(dir, Vec3::NEG_Y));
    assert!(Light::new_ambient(0xffffff, 0.05).direction_from(Vec3::ONE).is_none());
}

#[test]
fn lights_report_world_position() {
    let mut scene = Scene::new();
    scene.add_light(Light::new_directional(0xffffff, 1.0), Vec3::new(-4.0, 4.0, 10.0));
    scene.update_matrix_world();

    let lights: Vec<_> = scene.iter_lights().collect();
    assert_eq!(lights.len(), 1);
    let (light, world) = lights[0];
    assert!(matches!(light.kind, LightKind::Directional { .. }));
    assert!(vec3_approx(world.translation.into(), Vec3::new(-4.0, 4.0, 10.0)));
}

#[test]
fn rotation_applies_before_translation() {
    let mut scene = Scene::new();
    let node = scene.add_node(Node::new("n"));
    {
        let t = &mut scene.get_node_mut(node).unwrap().transform;
        t.position = Vec3::new(0.0, 1.0, 0.0);
        t.set_rotation_euler(FRAC_PI_2, 0.0, 0.0);
    }
    scene.update_matrix_world();

    let world: Affine3A = *scene.get_node(node).unwrap().world_matrix();
    let p = world.transform_point3(Vec3::Y);
    assert!(vec3_approx(p, Vec3::new(0.0, 1.0, 1.0)));
}

// ============================================================================
// Asset Server
// ============================================================================

#[test]
fn asset_server_clones_share_storage() {
    let assets = AssetServer::new();
    let clone = assets.clone();
    let handle = clone.add_material(PhongMaterial::new(0x515151));

    let material = assets.materials.get(handle).expect("shared material");
    assert!(matches!(*material, Material::Phong(_)));
    assert_eq!(assets.materials.len(), 1);
}

#[test]
fn storage_uuid_deduplicates() {
    let assets = AssetServer::new();
    let uuid = uuid::Uuid::new_v4();
    let a = assets.textures.add_with_uuid(uuid, Image::white());
    let b = assets.textures.add_with_uuid(uuid, Image::disc(8));

    assert_eq!(a, b);
    assert_eq!(assets.textures.len(), 1);
    assert_eq!(assets.textures.handle_by_uuid(&uuid), Some(a));
    assert_eq!(assets.textures.get(a).unwrap().width, 1);
}

#[test]
fn disc_sprite_is_opaque_at_center_clear_at_corner() {
    let disc = Image::disc(64);
    assert_eq!(disc.alpha_at(32, 32), Some(255));
    assert_eq!(disc.alpha_at(0, 0), Some(0));
    assert_eq!(disc.alpha_at(64, 0), None);
}
