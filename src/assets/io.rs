use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use tokio::io::AsyncReadExt;
use tokio::runtime::Runtime;

use crate::errors::{Result, StageError};

/// Chunk size used when streaming sources.
const CHUNK_SIZE: usize = 64 * 1024;

/// Shared multi-threaded runtime for asset IO and decoding.
///
/// Created lazily on first use and kept for the rest of the process.
pub(crate) fn asset_runtime() -> Result<&'static Runtime> {
    static RUNTIME: OnceLock<std::result::Result<Runtime, String>> = OnceLock::new();
    RUNTIME
        .get_or_init(|| {
            tokio::runtime::Builder::new_multi_thread()
                .worker_threads(2)
                .thread_name("stage3d-assets")
                .enable_all()
                .build()
                .map_err(|e| e.to_string())
        })
        .as_ref()
        .map_err(|e| StageError::Configuration(format!("asset runtime unavailable: {e}")))
}

/// Where the bytes of an asset come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    /// A file on the local filesystem.
    Path(PathBuf),
    /// Bytes already in memory (embedded data, tests).
    Memory { name: String, bytes: Arc<Vec<u8>> },
}

impl AssetSource {
    pub fn path(path: impl AsRef<Path>) -> Self {
        Self::Path(path.as_ref().to_path_buf())
    }

    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self::Memory {
            name: name.into(),
            bytes: Arc::new(bytes.into()),
        }
    }

    /// Display name used in logs and errors.
    #[must_use]
    pub fn name(&self) -> Cow<'_, str> {
        match self {
            Self::Path(p) => p.to_string_lossy(),
            Self::Memory { name, .. } => Cow::Borrowed(name),
        }
    }
}

impl From<&str> for AssetSource {
    fn from(path: &str) -> Self {
        Self::path(path)
    }
}

impl From<PathBuf> for AssetSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

/// Tracks percent complete and only lets increases through.
struct ProgressTracker<F: FnMut(f32)> {
    total: u64,
    loaded: u64,
    last: f32,
    on_progress: F,
}

impl<F: FnMut(f32)> ProgressTracker<F> {
    fn new(total: u64, on_progress: F) -> Self {
        Self {
            total,
            loaded: 0,
            last: -1.0,
            on_progress,
        }
    }

    fn advance(&mut self, bytes: usize) {
        self.loaded += bytes as u64;
        if self.total > 0 {
            let percent = (self.loaded as f64 / self.total as f64 * 100.0).min(100.0) as f32;
            self.emit(percent);
        }
    }

    fn finish(&mut self) {
        self.emit(100.0);
    }

    fn emit(&mut self, percent: f32) {
        if percent > self.last {
            self.last = percent;
            (self.on_progress)(percent);
        }
    }
}

/// Reads the whole source in chunks, reporting `loaded / total × 100`.
///
/// Reported values never decrease and the last one is always `100`.
pub async fn read_with_progress(
    source: &AssetSource,
    on_progress: impl FnMut(f32) + Send,
) -> Result<Vec<u8>> {
    match source {
        AssetSource::Path(path) => {
            let mut file = tokio::fs::File::open(path)
                .await
                .map_err(|e| StageError::asset(source.name(), e))?;
            let total = file
                .metadata()
                .await
                .map_err(|e| StageError::asset(source.name(), e))?
                .len();

            let mut tracker = ProgressTracker::new(total, on_progress);
            let mut data = Vec::with_capacity(total as usize);
            let mut chunk = vec![0u8; CHUNK_SIZE];
            loop {
                let n = file
                    .read(&mut chunk)
                    .await
                    .map_err(|e| StageError::asset(source.name(), e))?;
                if n == 0 {
                    break;
                }
                data.extend_from_slice(&chunk[..n]);
                tracker.advance(n);
            }
            tracker.finish();
            Ok(data)
        }
        AssetSource::Memory { bytes, .. } => {
            let mut tracker = ProgressTracker::new(bytes.len() as u64, on_progress);
            for piece in bytes.chunks(CHUNK_SIZE) {
                tracker.advance(piece.len());
            }
            tracker.finish();
            Ok(bytes.as_ref().clone())
        }
    }
}
