//! Spinning Phong cube.
//!
//! Run with `cargo run --example basic`.

use stage3d::app::App;
use stage3d::demos::Basic;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    App::new()
        .with_title("Basic")
        .with_config(Basic::config())
        .run(Basic::default())?;
    Ok(())
}
