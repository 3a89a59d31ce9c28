use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use slotmap::{Key, SlotMap};
use uuid::Uuid;

struct Pool<H: Key, T> {
    assets: SlotMap<H, Arc<T>>,
    /// Source-derived ids of assets that must stay unique (e.g. textures by path).
    by_uuid: FxHashMap<Uuid, H>,
}

/// Thread-safe, append-only asset pool.
///
/// Assets are immutable once stored; readers get an `Arc<T>` and never block
/// each other. Loader tasks and the host thread insert through `&self`.
pub struct AssetStorage<H: Key, T> {
    pool: RwLock<Pool<H, T>>,
}

impl<H: Key, T> Default for AssetStorage<H, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Key, T> AssetStorage<H, T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            pool: RwLock::new(Pool {
                assets: SlotMap::with_key(),
                by_uuid: FxHashMap::default(),
            }),
        }
    }

    pub fn add(&self, asset: impl Into<T>) -> H {
        self.pool.write().assets.insert(Arc::new(asset.into()))
    }

    /// Stores `asset` under `uuid` unless that uuid is already known, in
    /// which case the existing handle is returned and `asset` is dropped.
    pub fn add_with_uuid(&self, uuid: Uuid, asset: impl Into<T>) -> H {
        let mut pool = self.pool.write();
        if let Some(&handle) = pool.by_uuid.get(&uuid) {
            return handle;
        }
        let handle = pool.assets.insert(Arc::new(asset.into()));
        pool.by_uuid.insert(uuid, handle);
        handle
    }

    pub fn get(&self, handle: H) -> Option<Arc<T>> {
        self.pool.read().assets.get(handle).cloned()
    }

    pub fn handle_by_uuid(&self, uuid: &Uuid) -> Option<H> {
        self.pool.read().by_uuid.get(uuid).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pool.read().assets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
