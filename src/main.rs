mod app;
mod chart;
mod color;
mod config;
mod controller;
mod data;
mod state;
mod ui;

use anyhow::{anyhow, Context, Result};
use app::KeplerDashApp;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    let config = DashboardConfig::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_filter()))
        .init();

    // No window without data: a failed startup load ends the process.
    let catalog = data::loader::load_source(&config.source)
        .with_context(|| format!("Failed to load catalogue from {}", config.source))
        .inspect_err(|e| log::error!("{e:#}"))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 850.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    let state = AppState::new(catalog, config.debug);

    eframe::run_native(
        "Kepler Dash – Exoplanet Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(KeplerDashApp::new(state)))),
    )
    .map_err(|e| anyhow!("{e}"))
}
