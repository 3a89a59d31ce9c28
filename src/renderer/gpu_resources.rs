//! GPU-side mirrors of CPU assets.
//!
//! Geometries and sprite textures are uploaded the first time a frame draws
//! them and cached by asset handle; assets are immutable once added, so a
//! cached upload never goes stale. Per-object uniforms live in one dynamic
//! uniform buffer (group 1) that grows on demand, recreating its bind group.

use std::num::NonZeroU64;

use rustc_hash::FxHashMap;
use wgpu::util::DeviceExt;

use crate::assets::{GeometryHandle, TextureHandle};
use crate::renderer::uniforms::{FrameUniforms, OBJECT_STRIDE, ObjectUniforms};
use crate::resources::geometry::{COLOR, NORMAL, SIZE};
use crate::resources::{Geometry, Image};

const INITIAL_OBJECT_CAPACITY: u64 = 128;

/// Flattens a geometry into the interleaved layout of
/// [`VERTEX_STRIDE`](crate::renderer::pipeline::VERTEX_STRIDE).
///
/// Missing normals become zero (the shader falls back to face normals),
/// missing colors become white, missing sizes become `-1` (use the material's).
#[must_use]
pub fn interleave(geometry: &Geometry) -> Vec<f32> {
    let count = geometry.vertex_count();
    let normals = geometry.get_attribute(NORMAL).filter(|a| a.item_size == 3);
    let colors = geometry.get_attribute(COLOR).filter(|a| a.item_size == 3);
    let sizes = geometry.get_attribute(SIZE).filter(|a| a.item_size == 1);

    let mut out = Vec::with_capacity(count * 10);
    for i in 0..count {
        let position = geometry.position(i).unwrap_or_default();
        let normal = normals.and_then(|a| a.get_vec3(i)).unwrap_or_default();
        let color = colors.and_then(|a| a.get_vec3(i)).unwrap_or(glam::Vec3::ONE);
        let size = sizes.and_then(|a| a.get_f32(i)).unwrap_or(-1.0);
        out.extend_from_slice(&position.to_array());
        out.extend_from_slice(&normal.to_array());
        out.extend_from_slice(&color.to_array());
        out.push(size);
    }
    out
}

pub struct GpuGeometry {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: Option<wgpu::Buffer>,
    pub vertex_count: u32,
    pub index_count: u32,
}

impl GpuGeometry {
    fn new(device: &wgpu::Device, geometry: &Geometry) -> Self {
        let vertices = interleave(geometry);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Geometry Vertices"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let (index_buffer, index_count) = match geometry.indices() {
            Some(indices) if !indices.is_empty() => {
                let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Geometry Indices"),
                    contents: bytemuck::cast_slice(indices),
                    usage: wgpu::BufferUsages::INDEX,
                });
                (Some(buffer), indices.len() as u32)
            }
            _ => (None, 0),
        };

        Self {
            vertex_buffer,
            index_buffer,
            vertex_count: geometry.vertex_count() as u32,
            index_count,
        }
    }
}

pub struct GpuResources {
    pub frame_layout: wgpu::BindGroupLayout,
    pub object_layout: wgpu::BindGroupLayout,
    pub sprite_layout: wgpu::BindGroupLayout,

    frame_buffer: wgpu::Buffer,
    pub frame_bind_group: wgpu::BindGroup,

    object_buffer: wgpu::Buffer,
    pub object_bind_group: wgpu::BindGroup,
    object_capacity: u64,
    object_staging: Vec<u8>,

    sampler: wgpu::Sampler,
    default_sprite: wgpu::BindGroup,

    geometries: FxHashMap<GeometryHandle, GpuGeometry>,
    sprites: FxHashMap<TextureHandle, wgpu::BindGroup>,
}

impl GpuResources {
    #[must_use]
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Frame Uniforms Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Object Uniforms Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: NonZeroU64::new(std::mem::size_of::<ObjectUniforms>() as u64),
                },
                count: None,
            }],
        });

        let sprite_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Sprite Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let frame_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Frame Uniforms"),
            contents: bytemuck::bytes_of(&FrameUniforms::new(glam::Mat4::IDENTITY, glam::Vec3::ZERO, (1, 1))),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame Uniforms BindGroup"),
            layout: &frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        let object_buffer = Self::create_object_buffer(device, INITIAL_OBJECT_CAPACITY);
        let object_bind_group = Self::create_object_bind_group(device, &object_layout, &object_buffer);

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Sprite Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let default_sprite = Self::upload_sprite(device, queue, &sprite_layout, &sampler, &Image::disc(64));

        Self {
            frame_layout,
            object_layout,
            sprite_layout,
            frame_buffer,
            frame_bind_group,
            object_buffer,
            object_bind_group,
            object_capacity: INITIAL_OBJECT_CAPACITY,
            object_staging: Vec::new(),
            sampler,
            default_sprite,
            geometries: FxHashMap::default(),
            sprites: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn bind_group_layouts(&self) -> [&wgpu::BindGroupLayout; 3] {
        [&self.frame_layout, &self.object_layout, &self.sprite_layout]
    }

    // ========================================================================
    // Uniforms
    // ========================================================================

    pub fn write_frame(&self, queue: &wgpu::Queue, uniforms: &FrameUniforms) {
        queue.write_buffer(&self.frame_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    /// Uploads one block per object at `index * OBJECT_STRIDE`, growing the
    /// buffer (and its bind group) when needed.
    pub fn write_objects(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, objects: &[ObjectUniforms]) {
        if objects.is_empty() {
            return;
        }

        let needed = objects.len() as u64;
        if needed > self.object_capacity {
            let capacity = needed.next_power_of_two();
            log::debug!("Growing object uniform buffer: {} -> {capacity}", self.object_capacity);
            self.object_buffer = Self::create_object_buffer(device, capacity);
            self.object_bind_group = Self::create_object_bind_group(device, &self.object_layout, &self.object_buffer);
            self.object_capacity = capacity;
        }

        let stride = OBJECT_STRIDE as usize;
        self.object_staging.clear();
        self.object_staging.resize(objects.len() * stride, 0);
        for (i, object) in objects.iter().enumerate() {
            let bytes = bytemuck::bytes_of(object);
            self.object_staging[i * stride..i * stride + bytes.len()].copy_from_slice(bytes);
        }
        queue.write_buffer(&self.object_buffer, 0, &self.object_staging);
    }

    fn create_object_buffer(device: &wgpu::Device, capacity: u64) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Object Uniforms"),
            size: capacity * OBJECT_STRIDE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn create_object_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        buffer: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Object Uniforms BindGroup"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer,
                    offset: 0,
                    size: NonZeroU64::new(std::mem::size_of::<ObjectUniforms>() as u64),
                }),
            }],
        })
    }

    // ========================================================================
    // Geometry
    // ========================================================================

    pub fn prepare_geometry(&mut self, device: &wgpu::Device, handle: GeometryHandle, geometry: &Geometry) {
        self.geometries
            .entry(handle)
            .or_insert_with(|| GpuGeometry::new(device, geometry));
    }

    #[must_use]
    pub fn geometry(&self, handle: GeometryHandle) -> Option<&GpuGeometry> {
        self.geometries.get(&handle)
    }

    // ========================================================================
    // Sprites
    // ========================================================================

    pub fn prepare_sprite(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, handle: TextureHandle, image: &Image) {
        if self.sprites.contains_key(&handle) {
            return;
        }
        let bind_group = Self::upload_sprite(device, queue, &self.sprite_layout, &self.sampler, image);
        self.sprites.insert(handle, bind_group);
    }

    /// The sprite for `handle`, or the built-in disc.
    #[must_use]
    pub fn sprite(&self, handle: Option<TextureHandle>) -> &wgpu::BindGroup {
        handle
            .and_then(|h| self.sprites.get(&h))
            .unwrap_or(&self.default_sprite)
    }

    fn upload_sprite(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        image: &Image,
    ) -> wgpu::BindGroup {
        let size = wgpu::Extent3d {
            width: image.width.max(1),
            height: image.height.max(1),
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(&image.label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        if image.data.len() as u64 >= u64::from(size.width) * u64::from(size.height) * 4 {
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                &image.data,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * size.width),
                    rows_per_image: Some(size.height),
                },
                size,
            );
        } else {
            log::warn!("Sprite '{}' has too little pixel data; leaving it blank", image.label);
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Sprite BindGroup"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        })
    }
}
