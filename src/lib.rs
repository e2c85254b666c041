#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod models;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use data::{DataBundle, EarthSession};
pub use domain::{Aoi, AoiPoint, DegClass, LcClass};
pub use models::{AoiModel, IndicatorModel, JobParams};
pub use ui::{TerradegApp, TileId};

// CLI argument parsing
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the analysis-ready data bundle
    #[arg(long)]
    pub bundle: Option<PathBuf>,

    /// Path to the backend credentials file
    #[arg(long)]
    pub credentials: Option<PathBuf>,

    /// Skip backend authentication and run against the local bundle only
    #[arg(long, default_value_t = false)]
    pub offline: bool,
}

/// Main application entry point, called by the binary once the session is
/// initialized.
pub fn run_app(cc: &eframe::CreationContext, session: EarthSession) -> Box<dyn eframe::App> {
    let app = ui::TerradegApp::new(cc, session);
    Box::new(app)
}
