use chrono::Local;
use eframe::egui;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod actions;
mod app;
mod config;
mod errors;
mod models;
mod set_rows;
mod stats;
mod store;

use app::WorkoutApp;
use config::AppConfig;
use store::{FileBackend, Store};

fn main() -> Result<(), eframe::Error> {
    let config = AppConfig::load();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .init();

    info!("using data file {}", config.data_file().display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1024.0, 768.0]),
        ..Default::default()
    };

    eframe::run_native(
        "LiftLog",
        options,
        Box::new(move |_cc| {
            let store = Store::new(FileBackend::new(config.data_file()));
            Ok(Box::new(WorkoutApp::new(store, || Local::now().date_naive())))
        }),
    )
}
