use std::time::Duration;

use crate::assets::AssetServer;
use crate::errors::Result;
use crate::host::builder::SceneBuilder;
use crate::host::container::Container;
use crate::host::scene_host::SceneHost;
use crate::scene::{Camera, Scene};

/// Draws a host's scene. Implemented by the wgpu renderer and by test doubles.
pub trait FrameRenderer {
    fn resize(&mut self, width: u32, height: u32, scale_factor: f32);
    fn render(&mut self, scene: &Scene, camera: &Camera, assets: &AssetServer) -> Result<()>;
}

/// Timing handed to [`SceneBuilder::update`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameState {
    /// Time since the loop started, in milliseconds.
    pub elapsed_ms: f64,
    /// Seconds since the previous frame; zero on the first frame.
    pub dt: f32,
    /// Index of this frame, starting at zero.
    pub frame_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Scheduled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// `run_frame` was called without a scheduled frame.
    NotScheduled,
    Presented { loads_applied: usize },
    /// Rendering or the update step failed; the loop keeps going.
    Failed { loads_applied: usize },
}

/// Drives frames: apply finished loads, render, update, reschedule.
#[derive(Debug)]
pub struct FrameLoop {
    state: LoopState,
    frame_count: u64,
    failed_frames: u64,
    last_elapsed_ms: Option<f64>,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameLoop {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: LoopState::Idle,
            frame_count: 0,
            failed_frames: 0,
            last_elapsed_ms: None,
        }
    }

    /// Moves `Idle → Scheduled`. Returns whether a redraw must be requested.
    pub fn schedule(&mut self) -> bool {
        match self.state {
            LoopState::Idle => {
                self.state = LoopState::Scheduled;
                true
            }
            LoopState::Scheduled => false,
        }
    }

    /// Stops scheduling; the next `run_frame` is a no-op until rescheduled.
    pub fn pause(&mut self) {
        self.state = LoopState::Idle;
    }

    /// Runs one frame.
    ///
    /// Errors from rendering or from the builder's update are logged and
    /// counted; they never stop the loop.
    pub fn run_frame<B, R>(
        &mut self,
        host: &mut SceneHost,
        builder: &mut B,
        renderer: &mut R,
        elapsed: Duration,
    ) -> FrameOutcome
    where
        B: SceneBuilder + ?Sized,
        R: FrameRenderer + ?Sized,
    {
        if self.state != LoopState::Scheduled {
            return FrameOutcome::NotScheduled;
        }

        let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
        let dt = self
            .last_elapsed_ms
            .map_or(0.0, |last| ((elapsed_ms - last).max(0.0) / 1000.0) as f32);
        self.last_elapsed_ms = Some(elapsed_ms);

        let frame = FrameState {
            elapsed_ms,
            dt,
            frame_count: self.frame_count,
        };

        // 1. 先放入已完成的加载，使其从本帧开始可见
        let loads_applied = host.poll_loads();
        host.prepare_frame(dt);

        let mut failed = false;

        // 2. render
        if let Err(e) = renderer.render(host.scene(), host.camera(), host.assets()) {
            log::error!("Frame {}: render failed: {e}", frame.frame_count);
            failed = true;
        }

        // 3. update
        if let Err(e) = builder.update(host, &frame) {
            log::error!("Frame {}: update failed: {e}", frame.frame_count);
            failed = true;
        }

        host.end_frame();

        // 4. reschedule
        self.frame_count += 1;
        self.state = LoopState::Scheduled;

        if failed {
            self.failed_frames += 1;
            FrameOutcome::Failed { loads_applied }
        } else {
            FrameOutcome::Presented { loads_applied }
        }
    }

    /// Routes a container resize to the host and, if the size is usable, to
    /// the renderer.
    pub fn resize<C, R>(host: &mut SceneHost, renderer: &mut R, container: &C) -> bool
    where
        C: Container + ?Sized,
        R: FrameRenderer + ?Sized,
    {
        if !host.on_resize(container) {
            return false;
        }
        let vp = host.viewport();
        renderer.resize(vp.width, vp.height, vp.scale_factor);
        true
    }

    #[must_use]
    pub fn state(&self) -> LoopState {
        self.state
    }

    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    #[must_use]
    pub fn failed_frames(&self) -> u64 {
        self.failed_frames
    }
}
