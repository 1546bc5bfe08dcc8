mod app;
mod carousel;
mod config;
mod data;
mod report;
mod state;
mod ui;

use std::path::{Path, PathBuf};

use app::BestPriceApp;
use config::{AppConfig, CONFIG_FILE};
use data::model::Catalog;
use eframe::egui;
use state::{AppState, Status};

fn main() -> eframe::Result {
    env_logger::init();

    let mut config = AppConfig::load(Path::new(CONFIG_FILE)).unwrap_or_else(|e| {
        log::warn!("Ignoring {CONFIG_FILE}: {e:#}");
        AppConfig::default()
    });
    if let Some(path) = std::env::args_os().nth(1) {
        config.data_file = PathBuf::from(path);
    }

    let (catalog, load_error) = match data::loader::load_file(&config.data_file) {
        Ok(catalog) => (catalog, None),
        Err(e) => {
            log::error!("Failed to load file: {e:#}");
            (Catalog::default(), Some(format!("Error: {e:#}")))
        }
    };

    let mut state = AppState::new(config, catalog);
    state.status_message = load_error.map(Status::Error);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Best Price – Price Comparator",
        options,
        Box::new(|_cc| Ok(Box::new(BestPriceApp::new(state)))),
    )
}
