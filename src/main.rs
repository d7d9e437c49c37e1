mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::CovidDashboardApp;
use config::DashboardConfig;
use data::loader::DatasetCache;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::from_env();
    let app = CovidDashboardApp::new(DatasetCache::new(&config.data_path), &config)
        .inspect_err(|e| log::error!("Startup failed: {e:#}"))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "COVID-19 Global Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
