//! Random height field over a grid.
//!
//! Run with `cargo run --example terrain -- [model.obj]`; the OBJ model is
//! only loaded when a path is given.

use stage3d::app::App;
use stage3d::demos::Terrain;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut terrain = Terrain::default();
    if let Some(model) = std::env::args().nth(1) {
        terrain = terrain.with_model(model);
    }

    App::new()
        .with_title("Terrain")
        .with_config(Terrain::config())
        .run(terrain)?;
    Ok(())
}
