//! Render pipeline cache.
//!
//! One shader module, one pipeline layout, and lazily created pipelines keyed
//! by [`PipelineKey`]. Pipelines are created before a render pass begins so
//! the pass only ever borrows the cache immutably.

use rustc_hash::FxHashMap;

use crate::resources::DrawMode;

/// Interleaved vertex: position, normal, color, per-vertex point size.
pub const VERTEX_STRIDE: u64 = 10 * 4;

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
    0 => Float32x3,
    1 => Float32x3,
    2 => Float32x3,
    3 => Float32,
];

/// Everything that distinguishes one scene pipeline from another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PipelineKey {
    pub mode: DrawMode,
    /// Alpha blending on, depth writes off.
    pub transparent: bool,
}

pub struct PipelineCache {
    shader: wgpu::ShaderModule,
    layout: wgpu::PipelineLayout,
    color_format: wgpu::TextureFormat,
    depth_format: wgpu::TextureFormat,
    pipelines: FxHashMap<PipelineKey, wgpu::RenderPipeline>,
}

impl PipelineCache {
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        bind_group_layouts: &[&wgpu::BindGroupLayout],
        color_format: wgpu::TextureFormat,
        depth_format: wgpu::TextureFormat,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/scene.wgsl").into()),
        });

        let bind_group_layouts: Vec<Option<&wgpu::BindGroupLayout>> =
            bind_group_layouts.iter().copied().map(Some).collect();
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &bind_group_layouts,
            immediate_size: 0,
        });

        Self {
            shader,
            layout,
            color_format,
            depth_format,
            pipelines: FxHashMap::default(),
        }
    }

    /// Creates the pipeline for `key` if it does not exist yet.
    pub fn prepare(&mut self, device: &wgpu::Device, key: PipelineKey) {
        if self.pipelines.contains_key(&key) {
            return;
        }
        log::debug!("Creating pipeline {key:?}");
        let pipeline = self.create(device, key);
        self.pipelines.insert(key, pipeline);
    }

    #[must_use]
    pub fn get(&self, key: PipelineKey) -> Option<&wgpu::RenderPipeline> {
        self.pipelines.get(&key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pipelines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pipelines.is_empty()
    }

    fn create(&self, device: &wgpu::Device, key: PipelineKey) -> wgpu::RenderPipeline {
        let (vs_entry, fs_entry, step_mode, topology) = match key.mode {
            DrawMode::Triangles => (
                "vs_surface",
                "fs_surface",
                wgpu::VertexStepMode::Vertex,
                wgpu::PrimitiveTopology::TriangleList,
            ),
            DrawMode::Lines => (
                "vs_surface",
                "fs_surface",
                wgpu::VertexStepMode::Vertex,
                wgpu::PrimitiveTopology::LineList,
            ),
            DrawMode::LineStrip => (
                "vs_surface",
                "fs_surface",
                wgpu::VertexStepMode::Vertex,
                wgpu::PrimitiveTopology::LineStrip,
            ),
            // 每个点是一个实例化的四边形
            DrawMode::Points => (
                "vs_points",
                "fs_points",
                wgpu::VertexStepMode::Instance,
                wgpu::PrimitiveTopology::TriangleList,
            ),
        };

        let blend = if key.transparent {
            Some(wgpu::BlendState::ALPHA_BLENDING)
        } else {
            Some(wgpu::BlendState::REPLACE)
        };

        let label = format!("Scene Pipeline {:?}{}", key.mode, if key.transparent { " (blend)" } else { "" });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&label),
            layout: Some(&self.layout),
            vertex: wgpu::VertexState {
                module: &self.shader,
                entry_point: Some(vs_entry),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: VERTEX_STRIDE,
                    step_mode,
                    attributes: &VERTEX_ATTRIBUTES,
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &self.shader,
                entry_point: Some(fs_entry),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.color_format,
                    blend,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Both sides are drawn; the fragment stage flips back-facing normals.
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: self.depth_format,
                depth_write_enabled: Some(!key.transparent),
                depth_compare: Some(wgpu::CompareFunction::LessEqual),
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        })
    }
}
