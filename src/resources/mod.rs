//! 核心资源定义模块
//!
//! CPU-side data that does not depend on the GPU backend:
//! - Geometry: vertex attributes and index
//! - Material / Mesh: surface description and draw mode
//! - Image: RGBA8 pixel data for sprites
//! - primitives / helpers: geometry generators
//! - Input: per-frame keyboard and mouse state

pub mod color;
pub mod geometry;
pub mod helpers;
pub mod image;
pub mod input;
pub mod material;
pub mod mesh;
pub mod primitives;

// 重新导出常用类型
pub use color::{hex_to_linear, hex_to_srgb};
pub use geometry::{Attribute, BoundingBox, Geometry};
pub use image::Image;
pub use input::{ButtonState, Input, InputEvent, Key, MouseButton};
pub use material::{
    LambertMaterial, LineBasicMaterial, Material, PhongMaterial, PointsMaterial, ShadingModel,
};
pub use mesh::{DrawMode, Mesh};
pub use primitives::Primitive;
