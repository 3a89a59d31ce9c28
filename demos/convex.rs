//! Convex hull of a dodecahedron.
//!
//! Run with `cargo run --example convex`.

use stage3d::app::App;
use stage3d::demos::Convex;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    App::new()
        .with_title("Convex")
        .with_config(Convex::config())
        .run(Convex::default())?;
    Ok(())
}
