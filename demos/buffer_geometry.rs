//! Hand-built colored quad with its vertex normals. Drag to orbit.
//!
//! Run with `cargo run --example buffer_geometry`.

use stage3d::app::App;
use stage3d::demos::BufferGeometry;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    App::new()
        .with_title("Buffer Geometry")
        .with_config(BufferGeometry::config())
        .run(BufferGeometry::default())?;
    Ok(())
}
