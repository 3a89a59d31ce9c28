//! GPU uniform layouts.
//!
//! Both structs mirror the WGSL declarations in `shaders/scene.wgsl`
//! field-for-field; every member is a 16-byte aligned vector or matrix so the
//! Rust and WGSL layouts agree without explicit padding.

use bytemuck::{Pod, Zeroable};
use glam::{Affine3A, Mat3, Mat4, Vec3};

use crate::resources::Material;

/// Byte stride between per-object uniform blocks in the dynamic buffer.
///
/// Must be a multiple of `min_uniform_buffer_offset_alignment` (256 on every
/// backend wgpu supports).
pub const OBJECT_STRIDE: u64 = 256;

/// Group 0: per-frame camera and lighting.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct FrameUniforms {
    pub view_proj: [[f32; 4]; 4],
    /// xyz: camera world position
    pub camera_position: [f32; 4],
    /// xyz: unit vector pointing towards the light; w: 1 when a directional light exists
    pub light_direction: [f32; 4],
    /// rgb: color * intensity
    pub light_color: [f32; 4],
    /// rgb: ambient term (settings + ambient lights)
    pub ambient: [f32; 4],
    /// xy: surface size in physical pixels
    pub viewport: [f32; 4],
}

impl FrameUniforms {
    #[must_use]
    pub fn new(view_proj: Mat4, camera_position: Vec3, size: (u32, u32)) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            camera_position: camera_position.extend(1.0).to_array(),
            light_direction: [0.0, 0.0, 1.0, 0.0],
            light_color: [0.0; 4],
            ambient: [0.0; 4],
            viewport: [size.0 as f32, size.1 as f32, 0.0, 0.0],
        }
    }

    pub fn set_directional(&mut self, towards_light: Vec3, radiance: Vec3) {
        self.light_direction = towards_light.extend(1.0).to_array();
        self.light_color = radiance.extend(1.0).to_array();
    }

    pub fn set_ambient(&mut self, ambient: Vec3) {
        self.ambient = ambient.extend(1.0).to_array();
    }
}

// 标志位
pub const FLAG_VERTEX_COLORS: u32 = 1;
pub const FLAG_FLAT_SHADING: u32 = 1 << 1;
pub const FLAG_SIZE_ATTENUATION: u32 = 1 << 2;
pub const FLAG_SPRITE: u32 = 1 << 3;

/// Group 1: per-object transform and material parameters.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct ObjectUniforms {
    pub model: [[f32; 4]; 4],
    /// Inverse-transpose of the model's 3x3 part, padded to 4x4.
    pub normal_matrix: [[f32; 4]; 4],
    /// rgb: base color; a: opacity
    pub color: [f32; 4],
    /// rgb: emissive; a: shininess
    pub emissive: [f32; 4],
    /// rgb: specular; a: alpha test threshold
    pub specular: [f32; 4],
    /// x: point size; yzw unused
    pub point: [f32; 4],
    /// x: shading model; y: flags
    pub params: [u32; 4],
}

const _: () = assert!(std::mem::size_of::<ObjectUniforms>() as u64 <= OBJECT_STRIDE);

impl ObjectUniforms {
    #[must_use]
    pub fn new(world: &Affine3A, material: &Material) -> Self {
        let model = Mat4::from(*world);
        let normal_matrix = Mat4::from_mat3(Mat3::from(world.matrix3).inverse().transpose());

        let mut uniforms = Self {
            model: model.to_cols_array_2d(),
            normal_matrix: normal_matrix.to_cols_array_2d(),
            color: material.color().extend(material.opacity()).to_array(),
            emissive: [0.0; 4],
            specular: [0.0; 4],
            point: [1.0, 0.0, 0.0, 0.0],
            params: [material.shading_model() as u32, 0, 0, 0],
        };

        let mut flags = 0;
        if material.vertex_colors() {
            flags |= FLAG_VERTEX_COLORS;
        }

        match material {
            Material::Phong(m) => {
                uniforms.emissive = m.emissive.extend(m.shininess).to_array();
                uniforms.specular = m.specular.extend(0.0).to_array();
                if m.flat_shading {
                    flags |= FLAG_FLAT_SHADING;
                }
            }
            Material::Lambert(m) => {
                uniforms.emissive = m.emissive.extend(0.0).to_array();
            }
            Material::LineBasic(_) => {}
            Material::Points(m) => {
                uniforms.point[0] = m.size;
                uniforms.specular[3] = m.alpha_test;
                if m.size_attenuation {
                    flags |= FLAG_SIZE_ATTENUATION;
                }
                if m.sprite.is_some() {
                    flags |= FLAG_SPRITE;
                }
            }
        }

        uniforms.params[1] = flags;
        uniforms
    }

    #[must_use]
    pub fn shading_model(&self) -> u32 {
        self.params[0]
    }

    #[must_use]
    pub fn flags(&self) -> u32 {
        self.params[1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{PhongMaterial, PointsMaterial, ShadingModel};

    #[test]
    fn object_block_fits_stride() {
        assert_eq!(std::mem::size_of::<ObjectUniforms>(), 208);
        assert_eq!(std::mem::size_of::<FrameUniforms>() % 16, 0);
    }

    #[test]
    fn phong_flags() {
        let material: Material = PhongMaterial::new(0xff0000).with_flat_shading(true).into();
        let u = ObjectUniforms::new(&Affine3A::IDENTITY, &material);
        assert_eq!(u.shading_model(), ShadingModel::Phong as u32);
        assert_eq!(u.flags() & FLAG_FLAT_SHADING, FLAG_FLAT_SHADING);
        assert_eq!(u.flags() & FLAG_VERTEX_COLORS, 0);
    }

    #[test]
    fn points_carry_size_and_alpha_test() {
        let material: Material = PointsMaterial::new(0xffffff)
            .with_size(0.1)
            .with_alpha_test(0.8)
            .with_vertex_colors(true)
            .into();
        let u = ObjectUniforms::new(&Affine3A::IDENTITY, &material);
        assert_eq!(u.shading_model(), ShadingModel::Unlit as u32);
        assert!((u.point[0] - 0.1).abs() < 1e-6);
        assert!((u.specular[3] - 0.8).abs() < 1e-6);
        assert_eq!(u.flags() & FLAG_SIZE_ATTENUATION, FLAG_SIZE_ATTENUATION);
        assert_eq!(u.flags() & FLAG_VERTEX_COLORS, FLAG_VERTEX_COLORS);
    }
}
