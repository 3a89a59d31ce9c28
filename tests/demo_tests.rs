//! Demo Scene Tests
//!
//! Tests for:
//! - Every demo building headless against its own configuration
//! - Renderable counts per demo (fixtures excluded)
//! - Sun orbit position and per-frame update
//! - Terrain height field range and determinism
//! - Data-driven demos completing their loads from in-memory records

use std::time::{Duration, Instant};

use glam::{Vec2, Vec3};

use stage3d::assets::{AssetSource, LoadId, LoadState};
use stage3d::demos::{
    AntennaBeam, Basic, BufferGeometry, Convex, CsvLine, Edges, GeometryShowcase, SinCos, Terrain, orbit_position,
};
use stage3d::host::{FixedContainer, FrameState, HostConfig, SceneBuilder, SceneHost};
use stage3d::resources::geometry::{COLOR, POSITION};
use stage3d::resources::{DrawMode, Material};

const EPSILON: f32 = 1e-4;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn build(config: HostConfig, demo: &mut impl SceneBuilder) -> SceneHost {
    SceneHost::initialize(&FixedContainer::new(800, 600), config, demo).unwrap()
}

fn frame_at(elapsed_ms: f64) -> FrameState {
    FrameState {
        elapsed_ms,
        dt: 0.016,
        frame_count: 1,
    }
}

fn wait_for(host: &mut SceneHost, id: LoadId) -> LoadState {
    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        host.poll_loads();
        if let Some(state) = host.load_state(id)
            && state.is_finished()
        {
            return state;
        }
        assert!(Instant::now() < deadline, "load #{id} did not finish");
        std::thread::sleep(Duration::from_millis(5));
    }
}

/// Waits until the host has no pending loads left.
fn drain(host: &mut SceneHost) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while host.pending_loads() > 0 {
        host.poll_loads();
        assert!(Instant::now() < deadline, "loads did not finish");
        std::thread::sleep(Duration::from_millis(5));
    }
    host.poll_loads();
}

const RECORDS: &str = "0.0,0.0,0.0\n0.5,0.25,0.1\n1.0,0.5,0.2\n1.5,0.75,0.3\n";

// ============================================================================
// Static Demos
// ============================================================================

#[test]
fn basic_has_one_cube() {
    let host = build(Basic::config(), &mut Basic);
    assert_eq!(host.renderables().len(), 1);
    assert!(approx(host.camera().position().z, 2.0));
}

#[test]
fn basic_update_spins_the_cube() {
    let mut demo = Basic;
    let mut host = build(Basic::config(), &mut demo);
    demo.update(&mut host, &frame_at(500.0)).unwrap();

    let cube = host.renderables()[0];
    let rotation = host.scene().get_node(cube).unwrap().transform.rotation_euler();
    assert!(approx(rotation.x, 0.5));
    assert!(approx(rotation.y, 0.5));
}

#[test]
fn buffer_geometry_keeps_normals_helper_out_of_registry() {
    let host = build(BufferGeometry::config(), &mut BufferGeometry);
    assert_eq!(host.renderables().len(), 1);
    assert!(host.controls().is_some());

    let quad = BufferGeometry::quad();
    assert_eq!(quad.vertex_count(), 4);
    assert_eq!(quad.indices().unwrap(), &[0, 1, 2, 2, 1, 3]);
    assert!(quad.has_attribute(COLOR));
}

#[test]
fn showcase_registers_every_primitive() {
    let host = build(GeometryShowcase::config(), &mut GeometryShowcase);
    let primitives = GeometryShowcase::primitives();
    assert_eq!(primitives.len(), 13);
    assert_eq!(host.renderables().len(), 13);

    for (handle, (_, position)) in host.renderables().iter().zip(&primitives) {
        let node = host.scene().get_node(*handle).unwrap();
        assert_eq!(node.transform.position, *position);
        // group + surface + wireframe overlay
        assert_eq!(host.scene().subtree_len(*handle), 3);
    }
}

#[test]
fn orbit_controls_follow_demo_config() {
    for config in [
        BufferGeometry::config(),
        GeometryShowcase::config(),
        Convex::config(),
        Terrain::config(),
        CsvLine::config(),
        AntennaBeam::config(),
    ] {
        assert!(config.orbit.is_some());
        let host = build(config, &mut Basic);
        assert!(host.controls().is_some());
    }
    assert!(Basic::config().orbit.is_none());
}

#[test]
fn showcase_primitives_all_build() {
    for (primitive, _) in GeometryShowcase::primitives() {
        let geometry = primitive.build().unwrap();
        geometry.validate().unwrap();
    }
}

#[test]
fn convex_hull_is_translucent_and_still() {
    let mut demo = Convex::default();
    let mut host = build(Convex::config(), &mut demo);
    assert_eq!(host.renderables().len(), 1);

    let hull = host.renderables()[0];
    let group = host.scene().get_node(hull).unwrap();
    assert!(group.is_group());
    let surface = host.scene().get_node(group.children()[0]).unwrap();
    let mesh_key = surface.mesh.unwrap();
    let material = host
        .assets()
        .materials
        .get(host.scene().meshes[mesh_key].material)
        .unwrap();
    assert!(matches!(*material, Material::Lambert(_)));
    assert!(material.is_transparent());

    demo.update(&mut host, &frame_at(2000.0)).unwrap();
    let rotation = host.scene().get_node(hull).unwrap().transform.rotation;
    assert!(rotation.abs_diff_eq(glam::Quat::IDENTITY, EPSILON));
}

#[test]
fn edges_pairs_cube_with_its_outline() {
    let host = build(Edges::config(), &mut Edges::default());
    assert_eq!(host.renderables().len(), 2);

    let outline = host.renderables()[1];
    let mesh_key = host.scene().get_node(outline).unwrap().mesh.unwrap();
    let mesh = &host.scene().meshes[mesh_key];
    assert_eq!(mesh.mode, DrawMode::Lines);
    let geometry = host.assets().geometries.get(mesh.geometry).unwrap();
    assert_eq!(geometry.vertex_count(), 24);
}

// ============================================================================
// Sun Orbit
// ============================================================================

#[test]
fn orbit_starts_on_positive_x() {
    let p = orbit_position(0.0);
    assert!(approx(p.x, 17.0));
    assert!(approx(p.y, 0.0));
}

#[test]
fn orbit_stays_within_summed_radii() {
    for i in 0..100 {
        let p = orbit_position(i as f32 * 0.37);
        assert!(p.length() <= 17.0 + EPSILON);
    }
}

#[test]
fn sun_follows_orbit_each_frame() {
    let mut demo = SinCos::default();
    let mut host = build(SinCos::config(), &mut demo);
    assert_eq!(host.renderables().len(), 1);

    demo.update(&mut host, &frame_at(1500.0)).unwrap();
    let sun = host.renderables()[0];
    let position = host.scene().get_node(sun).unwrap().transform.position;
    let expected: Vec2 = orbit_position(1.5);
    assert!(approx(position.x, expected.x));
    assert!(approx(position.y, expected.y));
    assert!(approx(position.z, 0.0));
}

// ============================================================================
// Terrain
// ============================================================================

#[test]
fn terrain_heights_are_bounded() {
    let geometry = Terrain::height_field(7).unwrap();
    assert_eq!(geometry.vertex_count(), 101 * 101);
    for p in geometry.positions() {
        assert!((0.0..0.1).contains(&p.y), "height {} out of range", p.y);
        assert!(p.x.abs() <= 0.5 + EPSILON && p.z.abs() <= 0.5 + EPSILON);
    }
}

#[test]
fn terrain_is_deterministic_per_seed() {
    let a = Terrain::height_field(42).unwrap().positions();
    let b = Terrain::height_field(42).unwrap().positions();
    let c = Terrain::height_field(43).unwrap().positions();
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn terrain_without_model_builds_surface_only() {
    let mut demo = Terrain::default();
    assert!(demo.model.is_none());
    let host = build(Terrain::config(), &mut demo);
    assert_eq!(host.renderables().len(), 1);
    assert_eq!(host.pending_loads(), 0);
    assert!(host.scene().background.is_some());
}

#[test]
fn terrain_with_missing_model_keeps_scene() {
    let mut demo = Terrain::default().with_model("does/not/exist.obj");
    let mut host = build(Terrain::config(), &mut demo);
    let roots = host.scene().root_nodes.len();
    drain(&mut host);
    assert_eq!(host.renderables().len(), 1);
    assert_eq!(host.scene().root_nodes.len(), roots);
}

// ============================================================================
// Data-driven Demos
// ============================================================================

#[test]
fn csv_line_loads_polyline() {
    let mut demo = CsvLine::default().with_data(AssetSource::from_bytes("records.csv", RECORDS));
    let mut host = build(CsvLine::config(), &mut demo);
    assert!(host.renderables().is_empty());
    drain(&mut host);

    assert_eq!(host.renderables().len(), 1);
    let line = host.renderables()[0];
    let mesh_key = host.scene().get_node(line).unwrap().mesh.unwrap();
    let mesh = &host.scene().meshes[mesh_key];
    assert_eq!(mesh.mode, DrawMode::LineStrip);

    let geometry = host.assets().geometries.get(mesh.geometry).unwrap();
    assert_eq!(geometry.get_attribute(POSITION).unwrap().count(), 4);
    // record (x, y, z) drawn at (y, z, x)
    let second = geometry.position(1).unwrap();
    assert!((second - Vec3::new(0.25, 0.1, 0.5)).length() < EPSILON);
}

#[test]
fn antenna_beam_loads_points() {
    let mut demo = AntennaBeam::default().with_data(AssetSource::from_bytes("beam.csv", RECORDS));
    let mut host = build(AntennaBeam::config(), &mut demo);
    let sprites = host.assets().textures.len();
    assert_eq!(sprites, 1);
    drain(&mut host);

    assert_eq!(host.renderables().len(), 1);
    let points = host.renderables()[0];
    let mesh_key = host.scene().get_node(points).unwrap().mesh.unwrap();
    let mesh = &host.scene().meshes[mesh_key];
    assert_eq!(mesh.mode, DrawMode::Points);

    let material = host.assets().materials.get(mesh.material).unwrap();
    let Material::Points(points_material) = &*material else {
        panic!("expected a points material");
    };
    assert!(points_material.sprite.is_some());
    assert!(points_material.size_attenuation);
}

#[test]
fn antenna_beam_malformed_data_fails_without_renderables() {
    let mut demo = AntennaBeam::default().with_data(AssetSource::from_bytes("beam.csv", "a,b,c\nx,y,z\n"));
    let mut host = build(AntennaBeam::config(), &mut demo);
    // load ids start at 1
    let state = wait_for(&mut host, 1);
    assert!(matches!(state, LoadState::Failed(_)));
    assert!(host.renderables().is_empty());
}
