//! Utility Module
//!
//! - [`OrbitControls`]: camera orbit controller for interactive viewing
//! - [`FpsCounter`]: frame rate measurement, logged by the app runner

pub mod fps_counter;
pub mod orbit_control;

pub use fps_counter::FpsCounter;
pub use orbit_control::OrbitControls;
