//! Comma-separated records drawn as one polyline.
//!
//! Run with `cargo run --example line -- [records.csv]`.

use stage3d::app::App;
use stage3d::assets::AssetSource;
use stage3d::demos::{CsvLine, DEFAULT_DATA_PATH};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_DATA_PATH.to_string());

    App::new()
        .with_title("Line")
        .with_config(CsvLine::config())
        .run(CsvLine::default().with_data(AssetSource::path(path)))?;
    Ok(())
}
