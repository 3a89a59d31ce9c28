//! Hex color helpers.
//!
//! Material colors are written as sRGB hex literals (`0x515151`) and stored in
//! linear space, which is what the shaders light in.

use glam::Vec3;

/// Splits `0xRRGGBB` into sRGB components in `[0, 1]`.
#[must_use]
pub fn hex_to_srgb(hex: u32) -> Vec3 {
    let r = ((hex >> 16) & 0xff) as f32 / 255.0;
    let g = ((hex >> 8) & 0xff) as f32 / 255.0;
    let b = (hex & 0xff) as f32 / 255.0;
    Vec3::new(r, g, b)
}

#[must_use]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// `0xRRGGBB` to linear RGB.
#[must_use]
pub fn hex_to_linear(hex: u32) -> Vec3 {
    let s = hex_to_srgb(hex);
    Vec3::new(srgb_to_linear(s.x), srgb_to_linear(s.y), srgb_to_linear(s.z))
}
