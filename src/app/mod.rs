//! Winit-based Application Shell
//!
//! Opens a window, initializes the [`Renderer`] and a [`SceneHost`] inside it,
//! and drives a [`FrameLoop`] from winit's redraw events.
//!
//! # Example
//!
//! ```rust,ignore
//! use stage3d::app::App;
//! use stage3d::demos::Basic;
//! use stage3d::host::HostConfig;
//!
//! fn main() -> stage3d::Result<()> {
//!     App::new()
//!         .with_title("Basic")
//!         .with_config(HostConfig::new())
//!         .run(Basic::default())
//! }
//! ```
//!
//! # Lifecycle
//!
//! 1. `resumed`: create the window, then the renderer, then the host (which
//!    runs [`SceneBuilder::build`] once)
//! 2. `Resized` / `ScaleFactorChanged`: [`FrameLoop::resize`]
//! 3. `RedrawRequested`: [`FrameLoop::run_frame`]
//! 4. `CloseRequested` or Escape: exit
//!
//! A failure during step 1 stops the event loop and is returned from
//! [`App::run`].

pub mod input_adapter;

use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::errors::{Result, StageError};
use crate::host::{FrameLoop, FrameOutcome, HostConfig, SceneBuilder, SceneHost};
use crate::renderer::{RenderSettings, Renderer};
use crate::utils::fps_counter::FpsCounter;

/// Application builder.
pub struct App {
    title: String,
    render_settings: RenderSettings,
    host_config: HostConfig,
    size: (f64, f64),
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: "stage3d".into(),
            render_settings: RenderSettings::default(),
            host_config: HostConfig::new(),
            size: (1280.0, 720.0),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_settings(mut self, settings: RenderSettings) -> Self {
        self.render_settings = settings;
        self
    }

    /// Camera, light, background and orbit controls for the host.
    #[must_use]
    pub fn with_config(mut self, config: HostConfig) -> Self {
        self.host_config = config;
        self
    }

    /// Initial window size in logical pixels.
    #[must_use]
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.size = (width, height);
        self
    }

    /// Runs `builder` in a new window until it is closed.
    ///
    /// Blocks the current thread.
    pub fn run<B: SceneBuilder + 'static>(self, builder: B) -> Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut runner = AppRunner::new(self, builder);
        event_loop.run_app(&mut runner)?;

        match runner.fatal.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

struct AppRunner<B: SceneBuilder> {
    title: String,
    size: (f64, f64),
    host_config: Option<HostConfig>,
    builder: B,

    window: Option<Arc<Window>>,
    renderer: Renderer,
    host: Option<SceneHost>,
    frame_loop: FrameLoop,

    start_time: Instant,
    fps: FpsCounter,
    fatal: Option<StageError>,
}

impl<B: SceneBuilder> AppRunner<B> {
    fn new(app: App, builder: B) -> Self {
        Self {
            title: app.title,
            size: app.size,
            host_config: Some(app.host_config),
            builder,
            window: None,
            renderer: Renderer::new(app.render_settings),
            host: None,
            frame_loop: FrameLoop::new(),
            start_time: Instant::now(),
            fps: FpsCounter::new(),
            fatal: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(self.size.0, self.size.1));

        let window = event_loop
            .create_window(window_attributes)
            .map_err(|e| StageError::Configuration(format!("failed to create window: {e}")))?;
        let window = Arc::new(window);
        self.window = Some(window.clone());

        log::info!("Initializing renderer backend...");
        let size = window.inner_size();
        pollster::block_on(self.renderer.init(window.clone(), size.width, size.height))?;

        let config = self.host_config.take().unwrap_or_default();
        let host = SceneHost::initialize(&*window, config, &mut self.builder)?;
        self.host = Some(host);

        self.start_time = Instant::now();
        if self.frame_loop.schedule() {
            window.request_redraw();
        }
        Ok(())
    }

    fn redraw(&mut self) {
        let (Some(window), Some(host)) = (&self.window, &mut self.host) else {
            return;
        };

        let outcome = self
            .frame_loop
            .run_frame(host, &mut self.builder, &mut self.renderer, self.start_time.elapsed());

        match outcome {
            FrameOutcome::Presented { loads_applied } | FrameOutcome::Failed { loads_applied } if loads_applied > 0 => {
                log::info!("{loads_applied} load(s) added to the scene");
            }
            _ => {}
        }

        if let Some(fps) = self.fps.update() {
            log::info!("FPS: {fps:.1}");
            window.set_title(&format!("{} | FPS: {fps:.1}", self.title));
        }
    }
}

impl<B: SceneBuilder> ApplicationHandler for AppRunner<B> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.init(event_loop) {
            log::error!("Fatal initialization error: {e}");
            self.fatal = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let (Some(window), Some(host)) = (&self.window, &mut self.host) else {
            if matches!(event, WindowEvent::CloseRequested) {
                event_loop.exit();
            }
            return;
        };

        if let Some(input) = input_adapter::translate(&event) {
            host.input_mut().apply(input);
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            _ if input_adapter::is_escape_pressed(&event) => event_loop.exit(),
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                FrameLoop::resize(host, &mut self.renderer, &**window);
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if self.host.is_some()
            && let Some(window) = &self.window
        {
            window.request_redraw();
        }
    }
}
