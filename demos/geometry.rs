//! Every primitive generator on one screen.
//!
//! Run with `cargo run --example geometry`.

use stage3d::app::App;
use stage3d::demos::GeometryShowcase;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    App::new()
        .with_title("Geometry")
        .with_config(GeometryShowcase::config())
        .run(GeometryShowcase::default())?;
    Ok(())
}
