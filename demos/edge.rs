//! A cube next to its edge lines.
//!
//! Run with `cargo run --example edge`.

use stage3d::app::App;
use stage3d::demos::Edges;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    App::new()
        .with_title("Edges")
        .with_config(Edges::config())
        .run(Edges::default())?;
    Ok(())
}
