#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

//! # stage3d
//!
//! Small 3D demo scenes on top of `wgpu`: a reusable [`SceneHost`] owns
//! viewport, camera, lights and the renderable registry, a [`ModelBuilder`]
//! fills it (parametric primitives, hand-built geometry, CSV records, OBJ
//! models), and a [`FrameLoop`] drives load hand-off, rendering and per-frame
//! updates.
//!
//! ```rust,ignore
//! use stage3d::app::App;
//! use stage3d::demos::Basic;
//!
//! fn main() -> stage3d::Result<()> {
//!     App::new().with_config(Basic::config()).run(Basic::default())
//! }
//! ```

pub mod assets;
pub mod demos;
pub mod errors;
pub mod host;
pub mod renderer;
pub mod resources;
pub mod scene;
pub mod utils;

#[cfg(feature = "winit")]
pub mod app;

pub use assets::{AssetServer, AssetSource, ColorMapping, DataMapping, LoadState, LoadTicket, RowPolicy};
pub use errors::{Result, StageError};
pub use host::{
    FixedContainer, FrameLoop, FrameOutcome, FrameRenderer, FrameState, HostConfig, ModelBuilder, SceneBuilder,
    SceneHost, SurfaceStyle,
};
pub use renderer::{RenderSettings, Renderer};
pub use resources::primitives::*;
pub use resources::{
    DrawMode, Geometry, Image, LambertMaterial, LineBasicMaterial, Material, Mesh, PhongMaterial, PointsMaterial,
};
pub use scene::{Camera, Light, Node, NodeHandle, Scene};
pub use utils::OrbitControls;

#[cfg(feature = "winit")]
pub use app::App;
