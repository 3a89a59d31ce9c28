//! Asset storage and asynchronous loading.

pub mod handle;
pub mod io;
pub mod loader;
pub mod obj;
pub mod server;
pub mod storage;
pub mod tabular;
pub mod texture;

pub use handle::{GeometryHandle, MaterialHandle, TextureHandle};
pub use io::{AssetSource, read_with_progress};
pub use loader::{CancellationToken, LoadId, LoadPayload, LoadQueue, LoadState, LoadTicket, ProgressSink};
pub use server::AssetServer;
pub use storage::AssetStorage;
pub use tabular::{ColorMapping, DataMapping, RowPolicy};
