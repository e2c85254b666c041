//! Writes the deterministic demo bundle to the default bundle path, so the
//! app can be tried without any real data exports.

use std::path::PathBuf;

use anyhow::{Context, Result};

use terradeg::config::DEFAULT_BUNDLE_PATH;
use terradeg::data::demo::demo_bundle;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let path = PathBuf::from(DEFAULT_BUNDLE_PATH);
    let bundle = demo_bundle();
    bundle.validate().context("demo bundle failed validation")?;
    bundle
        .save(&path)
        .with_context(|| format!("writing {:?}", path))?;

    println!(
        "Wrote demo bundle '{}' ({} scenes, {}x{} grid) to {:?}",
        bundle.name,
        bundle.scenes.len(),
        bundle.grid.rows,
        bundle.grid.cols,
        path
    );
    println!("Run the app with: terradeg --offline");
    Ok(())
}
