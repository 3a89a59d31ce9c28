//! Frame Loop Tests
//!
//! Tests for:
//! - Scheduling: no frame runs before `schedule`, every frame reschedules
//! - Frame timing handed to the builder (elapsed, dt, frame index)
//! - Per-frame failures being logged, counted and survived
//! - Resize routing to the host and renderer
//! - Loads that finish many frames later appearing on the next frame

use std::time::{Duration, Instant};

use futures::channel::oneshot;
use glam::Vec3;

use stage3d::assets::{AssetServer, LoadPayload, LoadState};
use stage3d::errors::{Result, StageError};
use stage3d::host::{
    FixedContainer, FrameLoop, FrameOutcome, FrameRenderer, FrameState, HostConfig, LoopState, ModelBuilder,
    SceneBuilder, SceneHost, SurfaceStyle,
};
use stage3d::resources::primitives::{BoxOptions, Primitive};
use stage3d::resources::{DrawMode, Geometry, LineBasicMaterial, PhongMaterial};
use stage3d::scene::{Camera, Scene};

const EPSILON: f32 = 1e-4;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

/// Records what it was asked to draw.
#[derive(Default)]
struct RecordingRenderer {
    frames: usize,
    roots_per_frame: Vec<usize>,
    resizes: Vec<(u32, u32)>,
    fail_on: Option<usize>,
}

impl FrameRenderer for RecordingRenderer {
    fn resize(&mut self, width: u32, height: u32, _scale_factor: f32) {
        self.resizes.push((width, height));
    }

    fn render(&mut self, scene: &Scene, _camera: &Camera, _assets: &AssetServer) -> Result<()> {
        let index = self.frames;
        self.frames += 1;
        self.roots_per_frame.push(scene.root_nodes.len());
        if self.fail_on == Some(index) {
            return Err(StageError::RendererNotReady);
        }
        Ok(())
    }
}

/// Spins its cube and records every frame state it sees.
#[derive(Default)]
struct Spinner {
    frames: Vec<FrameState>,
    fail_update_on: Option<u64>,
}

impl SceneBuilder for Spinner {
    fn build(&mut self, builder: &mut ModelBuilder<'_>) -> Result<()> {
        builder.build_primitive(
            &Primitive::Box(BoxOptions::default()),
            &SurfaceStyle::new(PhongMaterial::new(0x04_4a_88)),
            Vec3::ZERO,
        )?;
        Ok(())
    }

    fn update(&mut self, host: &mut SceneHost, frame: &FrameState) -> Result<()> {
        self.frames.push(*frame);
        host.spin_renderables(frame.elapsed_ms);
        if self.fail_update_on == Some(frame.frame_count) {
            return Err(StageError::asset("update", "scripted failure"));
        }
        Ok(())
    }
}

fn setup(builder: &mut Spinner) -> (SceneHost, FrameLoop, RecordingRenderer) {
    let host = SceneHost::initialize(&FixedContainer::new(800, 600), HostConfig::new(), builder).unwrap();
    (host, FrameLoop::new(), RecordingRenderer::default())
}

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

fn line_payload() -> LoadPayload {
    LoadPayload::Drawable {
        geometry: Geometry::from_positions(&[Vec3::ZERO, Vec3::X, Vec3::Y]),
        material: LineBasicMaterial::new(0xff_00_00).into(),
        mode: DrawMode::LineStrip,
        position: Vec3::ZERO,
    }
}

// ============================================================================
// Scheduling
// ============================================================================

#[test]
fn nothing_runs_until_scheduled() {
    let mut spinner = Spinner::default();
    let (mut host, mut frame_loop, mut renderer) = setup(&mut spinner);

    assert_eq!(frame_loop.state(), LoopState::Idle);
    let outcome = frame_loop.run_frame(&mut host, &mut spinner, &mut renderer, ms(0));

    assert_eq!(outcome, FrameOutcome::NotScheduled);
    assert_eq!(renderer.frames, 0);
    assert!(spinner.frames.is_empty());
}

#[test]
fn schedule_requests_a_single_redraw() {
    let mut frame_loop = FrameLoop::new();
    assert!(frame_loop.schedule());
    assert!(!frame_loop.schedule());
    assert_eq!(frame_loop.state(), LoopState::Scheduled);

    frame_loop.pause();
    assert_eq!(frame_loop.state(), LoopState::Idle);
    assert!(frame_loop.schedule());
}

#[test]
fn every_frame_renders_then_updates_and_reschedules() {
    let mut spinner = Spinner::default();
    let (mut host, mut frame_loop, mut renderer) = setup(&mut spinner);
    frame_loop.schedule();

    for i in 0..5 {
        let outcome = frame_loop.run_frame(&mut host, &mut spinner, &mut renderer, ms(i * 16));
        assert_eq!(outcome, FrameOutcome::Presented { loads_applied: 0 });
        assert_eq!(frame_loop.state(), LoopState::Scheduled);
    }

    assert_eq!(renderer.frames, 5);
    assert_eq!(spinner.frames.len(), 5);
    assert_eq!(frame_loop.frame_count(), 5);
}

#[test]
fn frame_state_carries_elapsed_and_delta() {
    let mut spinner = Spinner::default();
    let (mut host, mut frame_loop, mut renderer) = setup(&mut spinner);
    frame_loop.schedule();

    frame_loop.run_frame(&mut host, &mut spinner, &mut renderer, ms(100));
    frame_loop.run_frame(&mut host, &mut spinner, &mut renderer, ms(150));
    frame_loop.run_frame(&mut host, &mut spinner, &mut renderer, ms(250));

    let frames = &spinner.frames;
    assert_eq!(frames[0].dt, 0.0);
    assert_eq!(frames[0].frame_count, 0);
    assert!((frames[1].elapsed_ms - 150.0).abs() < 1e-9);
    assert!(approx(frames[1].dt, 0.05));
    assert!(approx(frames[2].dt, 0.1));
    assert_eq!(frames[2].frame_count, 2);
}

#[test]
fn update_spins_the_cube_from_elapsed_time() {
    let mut spinner = Spinner::default();
    let (mut host, mut frame_loop, mut renderer) = setup(&mut spinner);
    frame_loop.schedule();

    frame_loop.run_frame(&mut host, &mut spinner, &mut renderer, ms(1000));
    let cube = host.renderables()[0];
    let rotation = host.scene().get_node(cube).unwrap().transform.rotation;
    let (x, y, _) = rotation.to_euler(glam::EulerRot::XYZ);
    assert!(approx(x, 1.0));
    assert!(approx(y, 1.0));
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn render_failure_is_counted_and_loop_continues() {
    let mut spinner = Spinner::default();
    let (mut host, mut frame_loop, mut renderer) = setup(&mut spinner);
    renderer.fail_on = Some(1);
    frame_loop.schedule();

    let outcomes: Vec<_> = (0..4)
        .map(|i| frame_loop.run_frame(&mut host, &mut spinner, &mut renderer, ms(i * 16)))
        .collect();

    assert_eq!(outcomes[1], FrameOutcome::Failed { loads_applied: 0 });
    assert_eq!(outcomes[2], FrameOutcome::Presented { loads_applied: 0 });
    assert_eq!(frame_loop.failed_frames(), 1);
    assert_eq!(frame_loop.state(), LoopState::Scheduled);
    // update still ran on the failed frame
    assert_eq!(spinner.frames.len(), 4);
}

#[test]
fn update_failure_is_counted() {
    let mut spinner = Spinner {
        fail_update_on: Some(0),
        ..Default::default()
    };
    let (mut host, mut frame_loop, mut renderer) = setup(&mut spinner);
    frame_loop.schedule();

    let first = frame_loop.run_frame(&mut host, &mut spinner, &mut renderer, ms(0));
    let second = frame_loop.run_frame(&mut host, &mut spinner, &mut renderer, ms(16));

    assert_eq!(first, FrameOutcome::Failed { loads_applied: 0 });
    assert_eq!(second, FrameOutcome::Presented { loads_applied: 0 });
    assert_eq!(frame_loop.failed_frames(), 1);
}

// ============================================================================
// Resize
// ============================================================================

#[test]
fn resize_reaches_renderer_only_when_usable() {
    let mut spinner = Spinner::default();
    let (mut host, _, mut renderer) = setup(&mut spinner);
    let mut container = FixedContainer::new(400, 300);

    assert!(FrameLoop::resize(&mut host, &mut renderer, &container));
    container.set_size(0, 0);
    assert!(!FrameLoop::resize(&mut host, &mut renderer, &container));

    assert_eq!(renderer.resizes, vec![(400, 300)]);
    assert!(approx(host.camera().aspect, 4.0 / 3.0));
}

// ============================================================================
// Late loads
// ============================================================================

#[test]
fn load_finishing_after_many_frames_appears_on_next_frame() {
    let mut spinner = Spinner::default();
    let (mut host, mut frame_loop, mut renderer) = setup(&mut spinner);
    frame_loop.schedule();

    let (release, gate) = oneshot::channel::<()>();
    let ticket = host.spawn_load("gated", move |_sink| async move {
        gate.await
            .map_err(|_| StageError::asset("gated", "gate dropped"))?;
        Ok(line_payload())
    });

    let roots_before = host.scene().root_nodes.len();
    for i in 0..12 {
        let outcome = frame_loop.run_frame(&mut host, &mut spinner, &mut renderer, ms(i * 16));
        assert_eq!(outcome, FrameOutcome::Presented { loads_applied: 0 });
    }
    assert!(matches!(host.load_state(ticket.id()), Some(LoadState::Pending { .. })));
    assert_eq!(host.renderables().len(), 1);

    release.send(()).unwrap();

    let deadline = Instant::now() + Duration::from_secs(10);
    let mut frame = 12;
    loop {
        let outcome = frame_loop.run_frame(&mut host, &mut spinner, &mut renderer, ms(frame * 16));
        frame += 1;
        if outcome == (FrameOutcome::Presented { loads_applied: 1 }) {
            break;
        }
        assert!(Instant::now() < deadline, "load never completed");
        std::thread::sleep(Duration::from_millis(5));
    }

    // visible in the very frame that applied it
    assert_eq!(renderer.roots_per_frame.last().copied(), Some(roots_before + 1));
    assert_eq!(host.renderables().len(), 2);
    assert!(matches!(host.load_state(ticket.id()), Some(LoadState::Completed(_))));
    assert_eq!(host.pending_loads(), 0);
}

#[test]
fn cancelled_load_never_appears() {
    let mut spinner = Spinner::default();
    let (mut host, mut frame_loop, mut renderer) = setup(&mut spinner);
    frame_loop.schedule();

    let (release, gate) = oneshot::channel::<()>();
    let ticket = host.spawn_load("cancelled", move |_sink| async move {
        let _ = gate.await;
        Ok(line_payload())
    });

    ticket.cancel();
    let _ = release.send(());

    for i in 0..20 {
        let outcome = frame_loop.run_frame(&mut host, &mut spinner, &mut renderer, ms(i * 16));
        assert_eq!(outcome, FrameOutcome::Presented { loads_applied: 0 });
        std::thread::sleep(Duration::from_millis(2));
    }

    assert_eq!(host.load_state(ticket.id()), Some(LoadState::Cancelled));
    assert_eq!(host.renderables().len(), 1);
    assert_eq!(host.pending_loads(), 0);
}

#[test]
fn failed_load_leaves_scene_unchanged() {
    let mut spinner = Spinner::default();
    let (mut host, mut frame_loop, mut renderer) = setup(&mut spinner);
    frame_loop.schedule();

    let ticket = host.spawn_load("broken", |_sink| async { Err(StageError::asset("broken", "no such file")) });
    let roots_before = host.scene().root_nodes.len();

    let deadline = Instant::now() + Duration::from_secs(10);
    let mut frame = 0;
    while !host.load_state(ticket.id()).is_some_and(|s| s.is_finished()) {
        frame_loop.run_frame(&mut host, &mut spinner, &mut renderer, ms(frame * 16));
        frame += 1;
        assert!(Instant::now() < deadline, "load never failed");
        std::thread::sleep(Duration::from_millis(5));
    }

    assert!(matches!(host.load_state(ticket.id()), Some(LoadState::Failed(_))));
    assert_eq!(host.scene().root_nodes.len(), roots_before);
    assert_eq!(host.renderables().len(), 1);
    assert_eq!(frame_loop.failed_frames(), 0);
}
