#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use std::path::PathBuf;

use clap::Parser;
use eframe::NativeOptions;

use terradeg::config::APP_STATE_PATH;
use terradeg::data::session::EarthSession;
use terradeg::ui::config::UI_TEXT;
use terradeg::{Cli, run_app};

fn main() -> eframe::Result {
    // A. Init logging
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {:?}", panic_info);
    }));
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // B. Parse args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    // C. Session init (blocking). A bad bundle or bad credentials abort
    // startup; the tiles assume a live session.
    let session = match EarthSession::init(
        args.bundle.as_deref(),
        args.credentials.as_deref(),
        args.offline,
    ) {
        Ok(session) => session,
        Err(e) => {
            log::error!("session initialization failed: {:#}", e);
            std::process::exit(1);
        }
    };

    // D. Run native app
    let options = NativeOptions {
        persistence_path: Some(PathBuf::from(APP_STATE_PATH)),
        ..Default::default()
    };

    eframe::run_native(
        UI_TEXT.app_title,
        options,
        Box::new(move |cc| Ok(run_app(cc, session))),
    )
}
