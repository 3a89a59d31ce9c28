//! Scene Host
//!
//! [`SceneHost`] owns everything one demo scene needs: viewport, camera,
//! scene graph, renderable registry, assets, input and pending loads. It is
//! a plain value; any number of hosts can coexist.
//!
//! # Lifecycle
//!
//! 1. [`SceneHost::initialize`] resolves the viewport, sets up camera, light
//!    and controls, then runs the [`SceneBuilder`] once
//! 2. [`SceneHost::on_resize`] on every container resize
//! 3. [`FrameLoop`](super::FrameLoop) drives frames until the window closes

use std::future::Future;

use glam::Vec3;

use crate::assets::loader::{LoadId, LoadPayload, LoadQueue, LoadState, LoadTicket, ProgressSink};
use crate::assets::AssetServer;
use crate::errors::Result;
use crate::host::builder::{ModelBuilder, SceneBuilder};
use crate::host::config::HostConfig;
use crate::host::container::{Container, Viewport};
use crate::resources::input::Input;
use crate::resources::mesh::{DrawMode, Mesh};
use crate::scene::{Camera, Light, Node, NodeHandle, Scene};
use crate::utils::OrbitControls;

/// Seconds per millisecond of animation time.
const SPIN_RATE: f64 = 0.001;

pub struct SceneHost {
    viewport: Viewport,
    camera: Camera,
    scene: Scene,
    /// Insertion-ordered; every entry is a scene root.
    renderables: Vec<NodeHandle>,
    assets: AssetServer,
    input: Input,
    controls: Option<OrbitControls>,
    pub(crate) loads: LoadQueue,
}

impl SceneHost {
    /// Sets up the host in `container` and runs `builder` once.
    ///
    /// Fails with [`StageError::Configuration`](crate::StageError::Configuration)
    /// when the container is unresolved or has a zero dimension, and with the
    /// builder's error if building the scene fails.
    pub fn initialize<C, B>(container: &C, config: HostConfig, builder: &mut B) -> Result<Self>
    where
        C: Container + ?Sized,
        B: SceneBuilder + ?Sized,
    {
        let viewport = Viewport::from_container(container)?;

        let cam = config.camera;
        let mut camera = Camera::new_perspective(cam.fov_deg, viewport.aspect(), cam.near, cam.far);
        camera.transform.position = cam.position;
        camera.transform.look_at(cam.target, Vec3::Y);

        let mut scene = Scene::new();
        if let Some(bg) = config.background {
            scene.set_background_hex(bg);
        }
        if let Some(light) = config.light {
            scene.add_light(
                Light::new_directional(light.color, light.intensity),
                light.position,
            );
        }

        let controls = config.orbit.map(|orbit| {
            let mut controls = OrbitControls::from_position(cam.position, cam.target)
                .with_max_polar_angle(orbit.max_polar_angle)
                .with_distance_range(orbit.min_distance, orbit.max_distance);
            controls.enable_damping = orbit.enable_damping;
            controls
        });

        let mut input = Input::new();
        input.set_screen_size(viewport.width, viewport.height);

        let mut host = Self {
            viewport,
            camera,
            scene,
            renderables: Vec::new(),
            assets: AssetServer::new(),
            input,
            controls,
            loads: LoadQueue::new(),
        };

        builder.build(&mut host.model_builder())?;

        log::info!(
            "Scene host ready: {}x{} (aspect {:.3}), {} renderable(s)",
            viewport.width,
            viewport.height,
            viewport.aspect(),
            host.renderables.len()
        );
        Ok(host)
    }

    /// A builder that adds to this host's scene.
    pub fn model_builder(&mut self) -> ModelBuilder<'_> {
        ModelBuilder::new(self)
    }

    /// Re-reads the container size and updates viewport and camera aspect.
    ///
    /// Returns `false` and keeps the last valid viewport when the container is
    /// unresolved or has a zero dimension (for example a minimized window).
    pub fn on_resize<C: Container + ?Sized>(&mut self, container: &C) -> bool {
        let viewport = match Viewport::from_container(container) {
            Ok(v) => v,
            Err(e) => {
                log::debug!("Resize ignored: {e}");
                return false;
            }
        };

        self.viewport = viewport;
        self.camera.set_aspect(viewport.aspect());
        self.input.set_screen_size(viewport.width, viewport.height);
        log::debug!(
            "Resized to {}x{} (aspect {:.3})",
            viewport.width,
            viewport.height,
            viewport.aspect()
        );
        true
    }

    /// Attaches `node` to the scene root and appends it to the registry.
    ///
    /// Returns `false` (and changes nothing) when the node does not exist, is
    /// already registered, or already has a parent.
    pub fn register(&mut self, node: NodeHandle) -> bool {
        let Some(n) = self.scene.get_node(node) else {
            log::warn!("register: unknown node {node:?}");
            return false;
        };
        if n.parent().is_some() || self.renderables.contains(&node) {
            return false;
        }
        if !self.scene.is_root(node) {
            self.scene.attach_to_root(node);
        }
        self.renderables.push(node);
        true
    }

    /// Sets every renderable's rotation to Euler `(t, t, 0)`, `t` in seconds.
    pub fn spin_renderables(&mut self, elapsed_ms: f64) {
        let t = (elapsed_ms * SPIN_RATE) as f32;
        for &handle in &self.renderables {
            if let Some(node) = self.scene.get_node_mut(handle) {
                node.transform.set_rotation_euler(t, t, 0.0);
            }
        }
    }

    /// Places finished loads in the scene; returns how many were registered.
    pub fn poll_loads(&mut self) -> usize {
        let mut registered = 0;
        for (id, payload) in self.loads.drain() {
            match self.place(payload) {
                Ok(node) => {
                    self.loads.complete(id, node);
                    registered += 1;
                }
                Err(e) => self.loads.fail(id, &e),
            }
        }
        registered
    }

    /// Starts a custom asynchronous load whose payload is registered on
    /// completion, exactly like the loads started by [`ModelBuilder`].
    pub fn spawn_load<F, Fut>(&mut self, name: impl Into<String>, task: F) -> LoadTicket
    where
        F: FnOnce(ProgressSink) -> Fut,
        Fut: Future<Output = Result<LoadPayload>> + Send + 'static,
    {
        self.loads.spawn(name, task)
    }

    fn place(&mut self, payload: LoadPayload) -> Result<NodeHandle> {
        let node = match payload {
            LoadPayload::Drawable {
                geometry,
                material,
                mode,
                position,
            } => {
                geometry.validate()?;
                let geometry = self.assets.add_geometry(geometry);
                let material = self.assets.add_material(material);
                let mut node = self.scene.mesh_node(Mesh::with_mode(geometry, material, mode));
                node.transform.position = position;
                self.scene.insert_detached(node)
            }
            LoadPayload::Model {
                name,
                geometries,
                material,
                scale,
            } => {
                for g in &geometries {
                    g.validate()?;
                }
                let mut group = Node::new(name);
                group.transform.scale = scale;
                let group = self.scene.insert_detached(group);

                let material = self.assets.add_material(material);
                for geometry in geometries {
                    let geometry = self.assets.add_geometry(geometry);
                    self.scene.add_mesh_to_parent(
                        Mesh::with_mode(geometry, material, DrawMode::Triangles),
                        group,
                    );
                }
                group
            }
        };
        self.register(node);
        Ok(node)
    }

    /// Per-frame bookkeeping before rendering: controls and world matrices.
    pub fn prepare_frame(&mut self, dt: f32) {
        if let Some(controls) = &mut self.controls {
            let fov = self.camera.fov_degrees();
            controls.update(&mut self.camera.transform, &self.input, fov, dt);
        }
        self.scene.update_matrix_world();
    }

    /// Clears per-frame input state.
    pub fn end_frame(&mut self) {
        self.input.end_frame();
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    #[must_use]
    pub fn renderables(&self) -> &[NodeHandle] {
        &self.renderables
    }

    #[must_use]
    pub fn assets(&self) -> &AssetServer {
        &self.assets
    }

    #[must_use]
    pub fn input(&self) -> &Input {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut Input {
        &mut self.input
    }

    #[must_use]
    pub fn controls(&self) -> Option<&OrbitControls> {
        self.controls.as_ref()
    }

    #[must_use]
    pub fn load_state(&self, id: LoadId) -> Option<LoadState> {
        self.loads.state(id)
    }

    /// Loads that have neither finished nor been cancelled.
    #[must_use]
    pub fn pending_loads(&self) -> usize {
        self.loads.pending()
    }
}
