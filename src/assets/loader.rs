//! Asynchronous loads and their hand-off to the host thread.
//!
//! Tasks run on the shared asset runtime and only produce CPU data
//! ([`LoadPayload`]). Everything that touches the scene happens on the host
//! thread when [`LoadQueue::drain`] is called.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures::future::{AbortHandle, Abortable};
use glam::Vec3;
use rustc_hash::FxHashMap;

use crate::assets::io::asset_runtime;
use crate::errors::{Result, StageError};
use crate::resources::geometry::Geometry;
use crate::resources::material::Material;
use crate::resources::mesh::DrawMode;
use crate::scene::NodeHandle;

pub type LoadId = u64;

/// Shared cancellation flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Returned by every asynchronous build call.
#[derive(Debug, Clone)]
pub struct LoadTicket {
    id: LoadId,
    token: CancellationToken,
    abort: AbortHandle,
}

impl LoadTicket {
    #[must_use]
    pub fn id(&self) -> LoadId {
        self.id
    }

    #[must_use]
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Cancels the load. A completion that is already queued is discarded.
    pub fn cancel(&self) {
        self.token.cancel();
        self.abort.abort();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Pending { progress: f32 },
    Completed(NodeHandle),
    Failed(String),
    Cancelled,
}

impl LoadState {
    #[must_use]
    pub fn is_finished(&self) -> bool {
        !matches!(self, LoadState::Pending { .. })
    }
}

/// CPU data produced by a finished load, ready to be placed in the scene.
#[derive(Debug, Clone)]
pub enum LoadPayload {
    /// A single drawable, e.g. mapped tabular data.
    Drawable {
        geometry: Geometry,
        material: Material,
        mode: DrawMode,
        position: Vec3,
    },
    /// Several meshes grouped under one scaled node.
    Model {
        name: String,
        geometries: Vec<Geometry>,
        material: Material,
        scale: Vec3,
    },
}

#[derive(Debug)]
enum LoadEvent {
    Progress { id: LoadId, percent: f32 },
    Completed { id: LoadId, payload: LoadPayload },
    Failed { id: LoadId, error: StageError },
}

/// Sends progress updates for one load.
#[derive(Clone)]
pub struct ProgressSink {
    id: LoadId,
    tx: flume::Sender<LoadEvent>,
}

impl ProgressSink {
    pub fn report(&self, percent: f32) {
        let _ = self.tx.send(LoadEvent::Progress {
            id: self.id,
            percent,
        });
    }
}

struct Entry {
    name: String,
    state: LoadState,
    token: CancellationToken,
}

/// Owns the event channel and the state of every load started by a host.
pub struct LoadQueue {
    tx: flume::Sender<LoadEvent>,
    rx: flume::Receiver<LoadEvent>,
    next_id: LoadId,
    entries: FxHashMap<LoadId, Entry>,
}

impl Default for LoadQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadQueue {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = flume::unbounded();
        Self {
            tx,
            rx,
            next_id: 1,
            entries: FxHashMap::default(),
        }
    }

    /// Starts `task` on the asset runtime.
    ///
    /// `task` receives a [`ProgressSink`] for this load. If the runtime cannot
    /// be started the load is recorded as failed immediately.
    pub fn spawn<F, Fut>(&mut self, name: impl Into<String>, task: F) -> LoadTicket
    where
        F: FnOnce(ProgressSink) -> Fut,
        Fut: Future<Output = Result<LoadPayload>> + Send + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;

        let name = name.into();
        let token = CancellationToken::new();
        let (abort, registration) = AbortHandle::new_pair();
        let ticket = LoadTicket {
            id,
            token: token.clone(),
            abort,
        };

        let sink = ProgressSink {
            id,
            tx: self.tx.clone(),
        };
        let future = Abortable::new(task(sink), registration);
        let tx = self.tx.clone();

        let state = match asset_runtime() {
            Ok(runtime) => {
                runtime.spawn(async move {
                    let event = match future.await {
                        Ok(Ok(payload)) => LoadEvent::Completed { id, payload },
                        Ok(Err(error)) => LoadEvent::Failed { id, error },
                        // 已取消：不发送任何事件
                        Err(_aborted) => return,
                    };
                    let _ = tx.send(event);
                });
                LoadState::Pending { progress: 0.0 }
            }
            Err(e) => {
                log::error!("Could not start load '{name}': {e}");
                LoadState::Failed(e.to_string())
            }
        };

        log::debug!("Load #{id} '{name}' started");
        self.entries.insert(id, Entry { name, state, token });
        ticket
    }

    /// Applies queued events and returns the completions to place.
    ///
    /// Progress only ever increases. Completions of cancelled loads are
    /// dropped here and never returned.
    pub fn drain(&mut self) -> Vec<(LoadId, LoadPayload)> {
        let mut ready = Vec::new();

        for event in self.rx.try_iter() {
            match event {
                LoadEvent::Progress { id, percent } => {
                    if let Some(entry) = self.entries.get_mut(&id)
                        && let LoadState::Pending { progress } = &mut entry.state
                        && percent > *progress
                    {
                        *progress = percent.min(100.0);
                    }
                }
                LoadEvent::Completed { id, payload } => {
                    let Some(entry) = self.entries.get_mut(&id) else {
                        continue;
                    };
                    if entry.token.is_cancelled() {
                        entry.state = LoadState::Cancelled;
                        log::debug!("Load #{id} '{}' finished after cancellation; discarded", entry.name);
                        continue;
                    }
                    ready.push((id, payload));
                }
                LoadEvent::Failed { id, error } => {
                    let Some(entry) = self.entries.get_mut(&id) else {
                        continue;
                    };
                    if entry.token.is_cancelled() {
                        entry.state = LoadState::Cancelled;
                        continue;
                    }
                    log::warn!("Load #{id} '{}' failed: {error}", entry.name);
                    entry.state = LoadState::Failed(error.to_string());
                }
            }
        }

        for entry in self.entries.values_mut() {
            if matches!(entry.state, LoadState::Pending { .. }) && entry.token.is_cancelled() {
                entry.state = LoadState::Cancelled;
            }
        }

        ready
    }

    /// Records where a drained completion was placed.
    pub fn complete(&mut self, id: LoadId, node: NodeHandle) {
        if let Some(entry) = self.entries.get_mut(&id) {
            log::info!("Load #{id} '{}' completed", entry.name);
            entry.state = LoadState::Completed(node);
        }
    }

    /// Records that a drained completion could not be placed.
    pub fn fail(&mut self, id: LoadId, error: &StageError) {
        if let Some(entry) = self.entries.get_mut(&id) {
            log::warn!("Load #{id} '{}' failed: {error}", entry.name);
            entry.state = LoadState::Failed(error.to_string());
        }
    }

    #[must_use]
    pub fn state(&self, id: LoadId) -> Option<LoadState> {
        self.entries.get(&id).map(|e| {
            if matches!(e.state, LoadState::Pending { .. }) && e.token.is_cancelled() {
                LoadState::Cancelled
            } else {
                e.state.clone()
            }
        })
    }

    /// Number of loads still pending.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.entries
            .values()
            .filter(|e| matches!(e.state, LoadState::Pending { .. }) && !e.token.is_cancelled())
            .count()
    }
}
