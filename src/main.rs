mod app;
mod color;
mod config;
mod data;
mod export;
mod state;
mod ui;

use anyhow::Context;
use app::LaunchDashApp;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::from_env();
    let dataset = data::loader::load_file(&config.data_path)
        .inspect_err(|e| log::error!("Cannot start dashboard: {e}"))
        .with_context(|| format!("loading launch records from {}", config.data_path.display()))?;

    let bounds = dataset.payload_bounds();
    log::info!(
        "Loaded {} launches from {} ({} sites, payload {}..={} kg)",
        dataset.len(),
        config.data_path.display(),
        dataset.sites().len(),
        bounds.min,
        bounds.max
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([720.0, 560.0]),
        ..Default::default()
    };

    let state = AppState::new(config.data_path, dataset);
    eframe::run_native(
        ui::panels::DASHBOARD_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchDashApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("dashboard window failed: {e}"))
}
