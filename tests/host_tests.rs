//! Scene Host Tests
//!
//! Tests for:
//! - Initialization against resolved, unresolved and degenerate containers
//! - Camera aspect after initialization and resize
//! - Renderable registry: insertion order, uniqueness, scene-root membership
//! - Fixtures and lights staying out of the registry
//! - Builder failures aborting initialization
//! - Spin animation being a pure function of elapsed time

use glam::{EulerRot, Vec3};

use stage3d::errors::{Result, StageError};
use stage3d::host::{FixedContainer, HostConfig, LightConfig, ModelBuilder, SceneBuilder, SceneHost, SurfaceStyle};
use stage3d::resources::helpers;
use stage3d::resources::primitives::{BoxOptions, Primitive, SphereOptions};
use stage3d::resources::{DrawMode, LineBasicMaterial, PhongMaterial};
use stage3d::scene::NodeHandle;

const EPSILON: f32 = 1e-4;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

/// Builds nothing.
struct Empty;

impl SceneBuilder for Empty {
    fn build(&mut self, _builder: &mut ModelBuilder<'_>) -> Result<()> {
        Ok(())
    }
}

/// Adds `count` cubes in a row and remembers their handles.
#[derive(Default)]
struct Cubes {
    count: usize,
    handles: Vec<NodeHandle>,
}

impl SceneBuilder for Cubes {
    fn build(&mut self, builder: &mut ModelBuilder<'_>) -> Result<()> {
        let style = SurfaceStyle::new(PhongMaterial::new(0x44_88_cc)).with_wireframe(0xff_ff_00);
        for i in 0..self.count {
            let handle = builder.build_primitive(
                &Primitive::Box(BoxOptions::new(1.0, 1.0, 1.0)),
                &style,
                Vec3::new(i as f32, 0.0, 0.0),
            )?;
            self.handles.push(handle);
        }
        Ok(())
    }
}

fn host_with(width: u32, height: u32, builder: &mut impl SceneBuilder) -> SceneHost {
    SceneHost::initialize(&FixedContainer::new(width, height), HostConfig::new(), builder).unwrap()
}

// ============================================================================
// Initialization
// ============================================================================

#[test]
fn initialize_sets_camera_aspect_from_container() {
    let host = host_with(800, 600, &mut Empty);
    assert!(approx(host.camera().aspect, 800.0 / 600.0));
    assert_eq!(host.viewport().width, 800);
    assert_eq!(host.viewport().height, 600);
}

#[test]
fn initialize_rejects_unresolved_container() {
    let result = SceneHost::initialize(&FixedContainer::unresolved(), HostConfig::new(), &mut Empty);
    assert!(matches!(result, Err(StageError::Configuration(_))));
}

#[test]
fn initialize_rejects_zero_sized_container() {
    for (w, h) in [(0, 600), (800, 0), (0, 0)] {
        let result = SceneHost::initialize(&FixedContainer::new(w, h), HostConfig::new(), &mut Empty);
        assert!(
            matches!(result, Err(StageError::Configuration(_))),
            "{w}x{h} should be rejected"
        );
    }
}

#[test]
fn initialize_places_camera_and_light_from_config() {
    let config = HostConfig::new()
        .with_camera_position(Vec3::new(0.0, 0.0, 30.0))
        .with_light(LightConfig::white_at(Vec3::new(-4.0, 4.0, 10.0)));
    let host = SceneHost::initialize(&FixedContainer::new(640, 480), config, &mut Empty).unwrap();

    assert_eq!(host.camera().position(), Vec3::new(0.0, 0.0, 30.0));
    assert_eq!(host.scene().lights.len(), 1);
    assert!(host.renderables().is_empty());
}

#[test]
fn config_without_light_adds_no_light() {
    let config = HostConfig::new().without_light().with_background(0xf0_f0_f0);
    let host = SceneHost::initialize(&FixedContainer::new(640, 480), config, &mut Empty).unwrap();

    assert!(host.scene().lights.is_empty());
    assert!(host.scene().background.is_some());
}

#[test]
fn orbit_controls_only_when_configured() {
    let host = host_with(640, 480, &mut Empty);
    assert!(host.controls().is_none());

    let config = HostConfig::new().with_orbit(stage3d::host::OrbitConfig::default());
    let host = SceneHost::initialize(&FixedContainer::new(640, 480), config, &mut Empty).unwrap();
    assert!(host.controls().is_some());
}

#[test]
fn builder_error_aborts_initialization() {
    struct Broken;
    impl SceneBuilder for Broken {
        fn build(&mut self, builder: &mut ModelBuilder<'_>) -> Result<()> {
            builder.build_primitive(
                &Primitive::Sphere(SphereOptions::new(0.0, 8, 8)),
                &SurfaceStyle::new(PhongMaterial::new(0xff_ff_ff)),
                Vec3::ZERO,
            )?;
            Ok(())
        }
    }

    let result = SceneHost::initialize(&FixedContainer::new(640, 480), HostConfig::new(), &mut Broken);
    assert!(matches!(
        result,
        Err(StageError::InvalidParameter { primitive: "sphere", .. })
    ));
}

#[test]
fn hosts_are_independent() {
    let mut a = Cubes {
        count: 2,
        ..Default::default()
    };
    let mut b = Cubes {
        count: 5,
        ..Default::default()
    };
    let host_a = host_with(800, 600, &mut a);
    let host_b = host_with(400, 400, &mut b);

    assert_eq!(host_a.renderables().len(), 2);
    assert_eq!(host_b.renderables().len(), 5);
    assert!(approx(host_b.camera().aspect, 1.0));
}

// ============================================================================
// Resize
// ============================================================================

#[test]
fn resize_keeps_aspect_in_sync() {
    let mut container = FixedContainer::new(800, 600);
    let mut host = SceneHost::initialize(&container, HostConfig::new(), &mut Empty).unwrap();

    container.set_size(400, 300);
    assert!(host.on_resize(&container));
    assert!(approx(host.camera().aspect, 4.0 / 3.0));

    container.set_size(1920, 1080);
    assert!(host.on_resize(&container));
    assert!(approx(host.camera().aspect, 1920.0 / 1080.0));
}

#[test]
fn repeated_resize_is_idempotent() {
    let mut container = FixedContainer::new(800, 600);
    let mut host = SceneHost::initialize(&container, HostConfig::new(), &mut Empty).unwrap();

    container.set_size(1000, 500);
    host.on_resize(&container);
    let first = (host.viewport(), host.camera().projection_matrix());
    host.on_resize(&container);

    assert_eq!(host.viewport(), first.0);
    assert_eq!(host.camera().projection_matrix(), first.1);
}

#[test]
fn zero_size_resize_keeps_last_viewport() {
    let mut container = FixedContainer::new(800, 600);
    let mut host = SceneHost::initialize(&container, HostConfig::new(), &mut Empty).unwrap();

    container.set_size(0, 300);
    assert!(!host.on_resize(&container));
    assert_eq!(host.viewport().width, 800);
    assert!(approx(host.camera().aspect, 800.0 / 600.0));

    container.set_unresolved();
    assert!(!host.on_resize(&container));
    assert_eq!(host.viewport().height, 600);
}

#[test]
fn resize_updates_input_screen_size() {
    let mut container = FixedContainer::new(800, 600);
    let mut host = SceneHost::initialize(&container, HostConfig::new(), &mut Empty).unwrap();

    container.set_size(1024, 768);
    host.on_resize(&container);
    assert_eq!(host.input().screen_size(), glam::Vec2::new(1024.0, 768.0));
}

// ============================================================================
// Registry
// ============================================================================

#[test]
fn registry_keeps_insertion_order() {
    let mut cubes = Cubes {
        count: 4,
        ..Default::default()
    };
    let host = host_with(800, 600, &mut cubes);

    assert_eq!(host.renderables(), cubes.handles.as_slice());
}

#[test]
fn every_renderable_is_a_scene_root_exactly_once() {
    let mut cubes = Cubes {
        count: 3,
        ..Default::default()
    };
    let host = host_with(800, 600, &mut cubes);

    for handle in host.renderables() {
        let occurrences = host.scene().root_nodes.iter().filter(|&h| h == handle).count();
        assert_eq!(occurrences, 1);
        assert!(host.scene().get_node(*handle).unwrap().parent().is_none());
    }
}

#[test]
fn primitive_group_holds_surface_and_wireframe() {
    let mut cubes = Cubes {
        count: 1,
        ..Default::default()
    };
    let host = host_with(800, 600, &mut cubes);
    let group = host.renderables()[0];

    // group + surface + wireframe
    assert_eq!(host.scene().subtree_len(group), 3);
    let node = host.scene().get_node(group).unwrap();
    assert_eq!(node.transform.position, Vec3::ZERO);
    assert_eq!(node.children().len(), 2);
}

#[test]
fn register_rejects_duplicates_and_unknown_nodes() {
    let mut cubes = Cubes {
        count: 1,
        ..Default::default()
    };
    let mut host = host_with(800, 600, &mut cubes);
    let handle = cubes.handles[0];

    assert!(!host.register(handle));
    assert_eq!(host.renderables().len(), 1);

    // a child node cannot be registered
    let child = host.scene().get_node(handle).unwrap().children()[0];
    assert!(!host.register(child));
    assert_eq!(host.renderables().len(), 1);
}

#[test]
fn fixtures_are_not_renderables() {
    struct WithGrid;
    impl SceneBuilder for WithGrid {
        fn build(&mut self, builder: &mut ModelBuilder<'_>) -> Result<()> {
            builder.add_fixture(
                helpers::grid(10.0, 10),
                LineBasicMaterial::new(0xff_ff_ff).with_vertex_colors(true),
                DrawMode::Lines,
                Vec3::ZERO,
            )?;
            builder.build_primitive(
                &Primitive::Box(BoxOptions::default()),
                &SurfaceStyle::new(PhongMaterial::new(0xff_00_00)),
                Vec3::ZERO,
            )?;
            Ok(())
        }
    }

    let host = host_with(800, 600, &mut WithGrid);
    assert_eq!(host.renderables().len(), 1);
    // light + grid + box group
    assert_eq!(host.scene().root_nodes.len(), 3);
}

#[test]
fn add_geometry_rejects_invalid_geometry() {
    struct BadGeometry;
    impl SceneBuilder for BadGeometry {
        fn build(&mut self, builder: &mut ModelBuilder<'_>) -> Result<()> {
            let geometry = stage3d::resources::Geometry::new();
            builder.add_geometry(geometry, PhongMaterial::new(0), DrawMode::Triangles, Vec3::ZERO)?;
            Ok(())
        }
    }

    let result = SceneHost::initialize(&FixedContainer::new(8, 8), HostConfig::new(), &mut BadGeometry);
    assert!(matches!(result, Err(StageError::InvalidParameter { .. })));
}

// ============================================================================
// Spin
// ============================================================================

#[test]
fn spin_sets_rotation_from_elapsed_seconds() {
    let mut cubes = Cubes {
        count: 2,
        ..Default::default()
    };
    let mut host = host_with(800, 600, &mut cubes);

    host.spin_renderables(500.0);
    for handle in host.renderables() {
        let rotation = host.scene().get_node(*handle).unwrap().transform.rotation;
        let (x, y, z) = rotation.to_euler(EulerRot::XYZ);
        assert!(approx(x, 0.5));
        assert!(approx(y, 0.5));
        assert!(approx(z, 0.0));
    }
}

#[test]
fn spin_twice_equals_spin_once() {
    let mut cubes = Cubes {
        count: 1,
        ..Default::default()
    };
    let mut host = host_with(800, 600, &mut cubes);
    let handle = cubes.handles[0];

    host.spin_renderables(2345.0);
    let once = host.scene().get_node(handle).unwrap().transform.rotation;
    host.spin_renderables(2345.0);
    let twice = host.scene().get_node(handle).unwrap().transform.rotation;

    assert_eq!(once, twice);
}

#[test]
fn spin_leaves_fixtures_alone() {
    struct Fixture;
    impl SceneBuilder for Fixture {
        fn build(&mut self, builder: &mut ModelBuilder<'_>) -> Result<()> {
            builder.add_fixture(helpers::grid(1.0, 2), LineBasicMaterial::new(0), DrawMode::Lines, Vec3::ZERO)?;
            Ok(())
        }
    }

    let mut host = host_with(100, 100, &mut Fixture);
    host.spin_renderables(1000.0);
    for handle in host.scene().root_nodes.clone() {
        let rotation = host.scene().get_node(handle).unwrap().transform.rotation;
        assert_eq!(rotation, glam::Quat::IDENTITY);
    }
}
