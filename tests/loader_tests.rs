//! Asset Loading Tests
//!
//! Tests for:
//! - CSV record parsing under both row policies
//! - Field mapping onto position / color attributes
//! - Progress reporting while reading sources
//! - Asynchronous external-data and OBJ loads through a scene host
//! - Failure and cancellation leaving the scene unchanged
//! - Texture decoding and deduplication by source name

use std::f32::consts::FRAC_PI_2;
use std::io::Cursor;
use std::time::{Duration, Instant};

use glam::Vec3;

use stage3d::assets::io::read_with_progress;
use stage3d::assets::obj::parse_obj;
use stage3d::assets::tabular::{build_geometry, load_tabular, parse_rows};
use stage3d::assets::{AssetServer, AssetSource, ColorMapping, DataMapping, LoadId, LoadState, RowPolicy};
use stage3d::errors::{Result, StageError};
use stage3d::host::{AssetOptions, FixedContainer, HostConfig, ModelBuilder, SceneBuilder, SceneHost};
use stage3d::resources::geometry::{COLOR, NORMAL, POSITION};
use stage3d::resources::{DrawMode, Geometry, LineBasicMaterial, Material, PointsMaterial};

const EPSILON: f32 = 1e-4;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    approx(a.x, b.x) && approx(a.y, b.y) && approx(a.z, b.z)
}

fn line_mapping() -> DataMapping {
    DataMapping::new(DrawMode::LineStrip, LineBasicMaterial::new(0xff_ff_ff).with_vertex_colors(true))
}

fn colors(geometry: &Geometry) -> Vec<Vec3> {
    geometry.get_attribute(COLOR).unwrap().iter_vec3().collect()
}

struct Empty;

impl SceneBuilder for Empty {
    fn build(&mut self, _builder: &mut ModelBuilder<'_>) -> Result<()> {
        Ok(())
    }
}

fn empty_host() -> SceneHost {
    SceneHost::initialize(&FixedContainer::new(800, 600), HostConfig::new(), &mut Empty).unwrap()
}

/// Polls the host until `id` leaves the pending state.
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

const RECORDS: &str = "0.1,0.2,0.3\n0.4,0.5,0.6\n0.7,0.8,0.9\n";

// ============================================================================
// Row Parsing
// ============================================================================

#[test]
fn well_formed_rows_keep_order() {
    let parsed = parse_rows(RECORDS, RowPolicy::Skip, "records").unwrap();
    assert_eq!(
        parsed.records,
        vec![[0.1, 0.2, 0.3], [0.4, 0.5, 0.6], [0.7, 0.8, 0.9]]
    );
    assert_eq!(parsed.skipped, 0);
}

#[test]
fn skip_policy_drops_malformed_rows() {
    let text = "1,2,3\n1,x,3\n\n4,5\n7,8,9\n";
    let parsed = parse_rows(text, RowPolicy::Skip, "records").unwrap();

    assert_eq!(parsed.records, vec![[1.0, 2.0, 3.0], [7.0, 8.0, 9.0]]);
    assert_eq!(parsed.skipped, 2);
    assert_eq!(parsed.first_skipped, Some((2, "1,x,3".to_string())));
}

#[test]
fn reject_policy_fails_on_first_malformed_row() {
    let result = parse_rows("1,2,3\n1,2,nope\n", RowPolicy::Reject, "records");
    let Err(StageError::AssetLoad { source_name, reason }) = result else {
        panic!("expected an asset error");
    };
    assert_eq!(source_name, "records");
    assert!(reason.contains("line 2"), "{reason}");
}

#[test]
fn all_malformed_rows_is_an_error_even_when_skipping() {
    let result = parse_rows("a,b,c\nd,e,f\n", RowPolicy::Skip, "records");
    assert!(matches!(result, Err(StageError::AssetLoad { .. })));
}

#[test]
fn non_finite_values_never_reach_the_buffer() {
    let text = "1,2,3\nNaN,0,0\n0,inf,0\n4,5,6\n";
    let geometry = load_tabular(text.as_bytes(), &line_mapping(), "records").unwrap();

    assert_eq!(geometry.vertex_count(), 2);
    let positions = geometry.get_attribute(POSITION).unwrap();
    assert!(positions.values.iter().all(|v| v.is_finite()));
}

#[test]
fn invalid_utf8_is_an_asset_error() {
    let result = load_tabular(&[0xff, 0xfe, 0x00], &line_mapping(), "binary");
    assert!(matches!(result, Err(StageError::AssetLoad { .. })));
}

// ============================================================================
// Mapping
// ============================================================================

#[test]
fn n_rows_give_n_positions_and_colors() {
    let geometry = load_tabular(RECORDS.as_bytes(), &line_mapping(), "records").unwrap();

    assert_eq!(geometry.get_attribute(POSITION).unwrap().count(), 3);
    assert_eq!(geometry.get_attribute(COLOR).unwrap().count(), 3);
    assert!(vec3_approx(geometry.position(1).unwrap(), Vec3::new(0.4, 0.5, 0.6)));
}

#[test]
fn position_columns_are_permuted() {
    let mapping = line_mapping().with_position([1, 2, 0]);
    let geometry = build_geometry(&[[1.0, 2.0, 3.0]], &mapping, "records").unwrap();
    assert!(vec3_approx(geometry.position(0).unwrap(), Vec3::new(2.0, 3.0, 1.0)));
}

#[test]
fn ramp_color_scales_one_field() {
    let mapping = line_mapping().with_color(ColorMapping::Ramp {
        column: 2,
        scale: 1.9,
        green: 0.1,
        blue: 0.0,
    });
    let geometry = build_geometry(&[[0.0, 0.0, 0.5], [0.0, 0.0, 0.25]], &mapping, "records").unwrap();

    let c = colors(&geometry);
    assert!(vec3_approx(c[0], Vec3::new(0.95, 0.1, 0.0)));
    assert!(vec3_approx(c[1], Vec3::new(0.475, 0.1, 0.0)));
}

#[test]
fn channel_color_reorders_fields() {
    let mapping = line_mapping().with_color(ColorMapping::Channels([2, 1, 0]));
    let geometry = build_geometry(&[[0.1, 0.2, 0.3]], &mapping, "records").unwrap();
    assert!(vec3_approx(colors(&geometry)[0], Vec3::new(0.3, 0.2, 0.1)));
}

#[test]
fn rotate_x_stands_z_up_data_upright() {
    let mapping = line_mapping().with_rotate_x(-FRAC_PI_2);
    let geometry = build_geometry(&[[0.0, 0.0, 1.0]], &mapping, "records").unwrap();
    // +Z rotated by -90° about X lands on +Y
    assert!(vec3_approx(geometry.position(0).unwrap(), Vec3::Y));
}

#[test]
fn out_of_range_column_is_rejected() {
    let mapping = line_mapping().with_position([0, 1, 3]);
    let result = build_geometry(&[[0.0, 0.0, 0.0]], &mapping, "records");
    assert!(matches!(result, Err(StageError::AssetLoad { .. })));
}

#[test]
fn point_size_override_applies_to_points_material() {
    let mapping = DataMapping::new(DrawMode::Points, PointsMaterial::new(0xff_ff_ff)).with_point_size(0.1);
    let Material::Points(points) = mapping.resolved_material() else {
        panic!("expected a points material");
    };
    assert!(approx(points.size, 0.1));
}

// ============================================================================
// Progress
// ============================================================================

#[test]
fn progress_is_monotonic_and_ends_at_100() {
    let bytes = vec![b'x'; 200 * 1024];
    let source = AssetSource::from_bytes("big", bytes.clone());

    let mut reported = Vec::new();
    let data = futures::executor::block_on(read_with_progress(&source, |p| reported.push(p))).unwrap();

    assert_eq!(data, bytes);
    assert!(reported.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(reported.last().copied(), Some(100.0));
}

#[test]
fn missing_file_is_an_asset_error() {
    let source = AssetSource::path("definitely/not/here.csv");
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let result = runtime.block_on(read_with_progress(&source, |_| {}));
    assert!(matches!(result, Err(StageError::AssetLoad { .. })));
}

// ============================================================================
// Host Loads
// ============================================================================

#[test]
fn external_data_becomes_one_registered_drawable() {
    let mut host = empty_host();
    let ticket = host.model_builder().build_from_external_data(
        AssetSource::from_bytes("records.csv", RECORDS),
        line_mapping().with_position([1, 2, 0]),
    );
    assert!(host.renderables().is_empty());

    let LoadState::Completed(node) = wait_for(&mut host, ticket.id()) else {
        panic!("load did not complete");
    };
    assert_eq!(host.renderables(), &[node]);

    let scene = host.scene();
    let mesh = scene.meshes.get(scene.get_node(node).unwrap().mesh.unwrap()).unwrap();
    assert_eq!(mesh.mode, DrawMode::LineStrip);
    let geometry = host.assets().geometries.get(mesh.geometry).unwrap();
    assert_eq!(geometry.vertex_count(), 3);
    assert!(vec3_approx(geometry.position(0).unwrap(), Vec3::new(0.2, 0.3, 0.1)));
}

#[test]
fn external_data_from_file() {
    let path = std::env::temp_dir().join(format!("stage3d-records-{}.csv", std::process::id()));
    std::fs::write(&path, RECORDS).unwrap();

    let mut host = empty_host();
    let ticket = host
        .model_builder()
        .build_from_external_data(AssetSource::path(&path), line_mapping());
    let state = wait_for(&mut host, ticket.id());
    std::fs::remove_file(&path).ok();

    assert!(matches!(state, LoadState::Completed(_)));
    assert_eq!(host.renderables().len(), 1);
}

#[test]
fn failed_external_data_leaves_scene_unchanged() {
    let mut host = empty_host();
    let roots = host.scene().root_nodes.len();

    let missing = host
        .model_builder()
        .build_from_external_data(AssetSource::path("no/such/records.csv"), line_mapping());
    let garbage = host
        .model_builder()
        .build_from_external_data(AssetSource::from_bytes("garbage.csv", "a,b,c\n"), line_mapping());

    assert!(matches!(wait_for(&mut host, missing.id()), LoadState::Failed(_)));
    assert!(matches!(wait_for(&mut host, garbage.id()), LoadState::Failed(_)));
    assert_eq!(host.scene().root_nodes.len(), roots);
    assert!(host.renderables().is_empty());
}

// ============================================================================
// OBJ
// ============================================================================

const TRIANGLE_OBJ: &str = "o tri\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";

#[test]
fn obj_triangle_gets_computed_normals() {
    let geometries = parse_obj(TRIANGLE_OBJ.as_bytes(), "tri.obj").unwrap();
    assert_eq!(geometries.len(), 1);

    let geometry = &geometries[0];
    assert_eq!(geometry.vertex_count(), 3);
    assert_eq!(geometry.indices(), Some(&[0, 1, 2][..]));
    let normal = geometry.get_attribute(NORMAL).unwrap().get_vec3(0).unwrap();
    assert!(vec3_approx(normal, Vec3::Z));
}

#[test]
fn empty_external_data_fails_without_drawable() {
    let mut host = empty_host();
    let ticket = host
        .model_builder()
        .build_from_external_data(AssetSource::from_bytes("empty.csv", "\n\n"), line_mapping());

    let state = wait_for(&mut host, ticket.id());
    assert!(matches!(state, LoadState::Failed(_)));
    assert!(host.renderables().is_empty());
}

#[test]
fn obj_without_geometry_is_an_error() {
    let result = parse_obj(b"# nothing here\n", "empty.obj");
    assert!(matches!(result, Err(StageError::AssetLoad { .. })));
}

#[test]
fn obj_model_is_one_scaled_group() {
    let mut host = empty_host();
    let options = AssetOptions::default();
    let scale = options.scale;
    let ticket = host
        .model_builder()
        .build_from_asset(AssetSource::from_bytes("tri.obj", TRIANGLE_OBJ), options);

    let LoadState::Completed(group) = wait_for(&mut host, ticket.id()) else {
        panic!("model did not load");
    };
    let node = host.scene().get_node(group).unwrap();
    assert_eq!(node.transform.scale, scale);
    assert_eq!(node.children().len(), 1);
    assert_eq!(host.renderables(), &[group]);
}

#[test]
fn cancelled_model_is_discarded() {
    let mut host = empty_host();
    let ticket = host
        .model_builder()
        .build_from_asset(AssetSource::path("no/such/model.obj"), AssetOptions::default());
    ticket.cancel();

    assert_eq!(wait_for(&mut host, ticket.id()), LoadState::Cancelled);
    assert!(host.renderables().is_empty());
    assert_eq!(host.pending_loads(), 0);
}

// ============================================================================
// Textures
// ============================================================================

fn png_bytes() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(4, 2, image::Rgba([255, 0, 0, 128]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

#[test]
fn texture_is_decoded_and_deduplicated() {
    let assets = AssetServer::new();
    let source = AssetSource::from_bytes("sprite.png", png_bytes());

    let first = assets.load_texture(&source).unwrap();
    let second = assets.load_texture(&source).unwrap();
    assert_eq!(first, second);
    assert_eq!(assets.textures.len(), 1);

    let image = assets.textures.get(first).unwrap();
    assert_eq!((image.width, image.height), (4, 2));
    assert_eq!(image.alpha_at(0, 0), Some(128));
}

#[test]
fn corrupt_texture_is_a_decode_error() {
    let assets = AssetServer::new();
    let result = assets.load_texture(&AssetSource::from_bytes("bad.png", b"not a png".to_vec()));
    assert!(matches!(result, Err(StageError::ImageDecode(_))));
}
