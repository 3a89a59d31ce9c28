//! Forward Renderer
//!
//! A single-pass forward renderer drawing a [`Scene`] straight into the window
//! surface:
//!
//! - [`context`]: device, queue, surface and depth buffer
//! - [`gpu_resources`]: cached vertex buffers, sprites and uniform buffers
//! - [`pipeline`]: one pipeline per draw mode and blend state
//! - [`uniforms`]: `bytemuck` layouts shared with `shaders/scene.wgsl`
//!
//! Opaque objects draw first in `render_order`, then transparent objects
//! back-to-front with depth writes disabled. The scene background, when set,
//! overrides [`RenderSettings::clear_color`].

pub mod context;
pub mod gpu_resources;
pub mod pipeline;
pub mod settings;
pub mod uniforms;

use std::cmp::Ordering;

use glam::Vec3;

use crate::assets::{AssetServer, GeometryHandle, TextureHandle};
use crate::errors::{Result, StageError};
use crate::host::FrameRenderer;
use crate::resources::{DrawMode, Material};
use crate::scene::light::LightKind;
use crate::scene::transform_system::collect_visible;
use crate::scene::{Camera, Scene};

pub use context::WgpuContext;
pub use settings::RenderSettings;

use self::gpu_resources::GpuResources;
use self::pipeline::{PipelineCache, PipelineKey};
use self::uniforms::{FrameUniforms, OBJECT_STRIDE, ObjectUniforms};

/// Everything that exists only after [`Renderer::init`].
struct GpuState {
    context: WgpuContext,
    resources: GpuResources,
    pipelines: PipelineCache,
}

#[derive(Debug, Clone, Copy)]
struct DrawItem {
    key: PipelineKey,
    geometry: GeometryHandle,
    sprite: Option<TextureHandle>,
    object_index: u32,
    render_order: i32,
    /// Squared distance to the camera; sorts transparent items.
    depth: f32,
}

pub struct Renderer {
    settings: RenderSettings,
    state: Option<GpuState>,
    scale_factor: f32,

    // 每帧复用
    draws: Vec<DrawItem>,
    objects: Vec<ObjectUniforms>,
}

impl Renderer {
    #[must_use]
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            state: None,
            scale_factor: 1.0,
            draws: Vec::new(),
            objects: Vec::new(),
        }
    }

    /// Creates the device and configures `window`'s surface at `width x height`
    /// physical pixels.
    pub async fn init<W>(&mut self, window: W, width: u32, height: u32) -> Result<()>
    where
        W: Into<wgpu::SurfaceTarget<'static>>,
    {
        let context = WgpuContext::new(window, &self.settings, width, height).await?;
        let resources = GpuResources::new(&context.device, &context.queue);
        let pipelines = PipelineCache::new(
            &context.device,
            &resources.bind_group_layouts(),
            context.color_format(),
            context.depth_format,
        );

        log::info!(
            "Renderer initialized: {}x{} {:?}",
            context.config.width,
            context.config.height,
            context.color_format()
        );

        self.state = Some(GpuState {
            context,
            resources,
            pipelines,
        });
        Ok(())
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    #[must_use]
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    #[must_use]
    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    /// Surface size in physical pixels, once initialized.
    #[must_use]
    pub fn size(&self) -> Option<(u32, u32)> {
        self.state.as_ref().map(|s| s.context.size())
    }

    fn frame_uniforms(&self, scene: &Scene, camera: &Camera, size: (u32, u32)) -> FrameUniforms {
        let mut frame = FrameUniforms::new(camera.view_projection_matrix(), camera.position(), size);

        let mut ambient = Vec3::splat(self.settings.ambient);
        let mut has_directional = false;
        for (light, world) in scene.iter_lights() {
            let radiance = light.color * light.intensity;
            match light.kind {
                LightKind::Ambient => ambient += radiance,
                LightKind::Directional { .. } if !has_directional => {
                    if let Some(direction) = light.direction_from(Vec3::from(world.translation)) {
                        frame.set_directional(-direction, radiance);
                        has_directional = true;
                    }
                }
                LightKind::Directional { .. } => {
                    log::trace!("Only the first directional light is shaded");
                }
            }
        }
        frame.set_ambient(ambient);
        frame
    }
}

impl FrameRenderer for Renderer {
    fn resize(&mut self, width: u32, height: u32, scale_factor: f32) {
        self.scale_factor = scale_factor;
        if let Some(state) = self.state.as_mut() {
            state.context.resize(width, height);
        }
    }

    fn render(&mut self, scene: &Scene, camera: &Camera, assets: &AssetServer) -> Result<()> {
        let frame = {
            let state = self.state.as_ref().ok_or(StageError::RendererNotReady)?;
            self.frame_uniforms(scene, camera, state.context.size())
        };
        let Some(state) = self.state.as_mut() else {
            return Err(StageError::RendererNotReady);
        };
        let device = &state.context.device;

        // =========================================================
        // 1. 收集 (Collect) & 准备 GPU 资源
        // =========================================================
        self.draws.clear();
        self.objects.clear();
        let camera_position = camera.position();

        for (handle, world) in collect_visible(&scene.nodes, &scene.root_nodes) {
            let Some(mesh) = scene
                .nodes
                .get(handle)
                .and_then(|node| node.mesh)
                .and_then(|key| scene.meshes.get(key))
            else {
                continue;
            };

            let (Some(geometry), Some(material)) =
                (assets.geometries.get(mesh.geometry), assets.materials.get(mesh.material))
            else {
                log::trace!("Skipping '{}': asset missing", mesh.name);
                continue;
            };
            if geometry.vertex_count() == 0 {
                continue;
            }

            state.resources.prepare_geometry(device, mesh.geometry, &geometry);

            let sprite = match &*material {
                Material::Points(points) => points.sprite,
                _ => None,
            };
            if let Some(texture) = sprite
                && let Some(image) = assets.textures.get(texture)
            {
                state.resources.prepare_sprite(device, &state.context.queue, texture, &image);
            }

            let key = PipelineKey {
                mode: mesh.mode,
                transparent: material.is_transparent(),
            };
            state.pipelines.prepare(device, key);

            self.draws.push(DrawItem {
                key,
                geometry: mesh.geometry,
                sprite,
                object_index: self.objects.len() as u32,
                render_order: mesh.render_order,
                depth: camera_position.distance_squared(Vec3::from(world.translation)),
            });
            self.objects.push(ObjectUniforms::new(&world, &material));
        }

        // =========================================================
        // 2. 排序 (Sort): opaque first, then transparent far-to-near
        // =========================================================
        self.draws.sort_by(|a, b| {
            a.key
                .transparent
                .cmp(&b.key.transparent)
                .then(a.render_order.cmp(&b.render_order))
                .then_with(|| {
                    if a.key.transparent {
                        b.depth.total_cmp(&a.depth)
                    } else {
                        Ordering::Equal
                    }
                })
        });

        // =========================================================
        // 3. 上传 (Upload)
        // =========================================================
        state.resources.write_frame(&state.context.queue, &frame);
        state
            .resources
            .write_objects(device, &state.context.queue, &self.objects);

        // =========================================================
        // 4. 获取交换链图像
        // =========================================================
        let output = match state.context.surface.get_current_texture() {
            wgpu::CurrentSurfaceTexture::Success(output)
            | wgpu::CurrentSurfaceTexture::Suboptimal(output) => output,
            wgpu::CurrentSurfaceTexture::Lost => {
                log::warn!("Surface lost, reconfiguring");
                state.context.reconfigure();
                return Ok(());
            }
            e => {
                log::warn!("Skipping frame: {e:?}");
                return Ok(());
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let clear_color = scene.background.map_or(self.settings.clear_color, |c| wgpu::Color {
            r: f64::from(c.x),
            g: f64::from(c.y),
            b: f64::from(c.z),
            a: 1.0,
        });

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Frame Encoder"),
        });

        // =========================================================
        // 5. 绘制 (Draw)
        // =========================================================
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Forward Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &state.context.depth_texture_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            pass.set_bind_group(0, &state.resources.frame_bind_group, &[]);

            for item in &self.draws {
                let (Some(pipeline), Some(gpu_geometry)) =
                    (state.pipelines.get(item.key), state.resources.geometry(item.geometry))
                else {
                    continue;
                };

                pass.set_pipeline(pipeline);
                let offset = (u64::from(item.object_index) * OBJECT_STRIDE) as u32;
                pass.set_bind_group(1, &state.resources.object_bind_group, &[offset]);
                pass.set_bind_group(2, state.resources.sprite(item.sprite), &[]);
                pass.set_vertex_buffer(0, gpu_geometry.vertex_buffer.slice(..));

                if item.key.mode == DrawMode::Points {
                    // 6 corners per point, one instance per vertex
                    pass.draw(0..6, 0..gpu_geometry.vertex_count);
                } else if let Some(index_buffer) = &gpu_geometry.index_buffer {
                    pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                    pass.draw_indexed(0..gpu_geometry.index_count, 0, 0..1);
                } else {
                    pass.draw(0..gpu_geometry.vertex_count, 0..1);
                }
            }
        }

        state.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}
