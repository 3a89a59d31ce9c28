//! Comma-separated records drawn as round point sprites.
//!
//! Run with `cargo run --example antenna_beam -- [records.csv]`.

use stage3d::app::App;
use stage3d::assets::AssetSource;
use stage3d::demos::{AntennaBeam, DEFAULT_DATA_PATH};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_DATA_PATH.to_string());

    App::new()
        .with_title("Antenna Beam")
        .with_config(AntennaBeam::config())
        .run(AntennaBeam::default().with_data(AssetSource::path(path)))?;
    Ok(())
}
