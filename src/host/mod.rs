//! Scene host, model builder and frame loop shared by every demo scene.

pub mod builder;
pub mod config;
pub mod container;
pub mod frame_loop;
pub mod scene_host;

pub use builder::{AssetOptions, ModelBuilder, SceneBuilder, SurfaceStyle};
pub use config::{CameraConfig, HostConfig, LightConfig, OrbitConfig};
pub use container::{Container, FixedContainer, Viewport};
pub use frame_loop::{FrameLoop, FrameOutcome, FrameRenderer, FrameState, LoopState};
pub use scene_host::SceneHost;
