//! Emissive sphere on a sum of circular orbits.
//!
//! Run with `cargo run --example sin_cos`.

use stage3d::app::App;
use stage3d::demos::SinCos;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    App::new()
        .with_title("Sin / Cos")
        .with_config(SinCos::config())
        .run(SinCos::default())?;
    Ok(())
}
