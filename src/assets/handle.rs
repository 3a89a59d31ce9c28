//! Strongly-typed asset keys.
//!
//! Handles are plain `slotmap` keys: `Copy`, cheap to hash, and only
//! meaningful for the [`AssetServer`](super::AssetServer) that issued them.

use slotmap::new_key_type;

new_key_type! {
    pub struct GeometryHandle;
    pub struct MaterialHandle;
    pub struct TextureHandle;
}
