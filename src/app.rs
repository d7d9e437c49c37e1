use anyhow::{Context, Result};
use eframe::egui;

use crate::config::DashboardConfig;
use crate::data::loader::DatasetCache;
use crate::state::AppState;
use crate::ui::{charts, map, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CovidDashboardApp {
    pub cache: DatasetCache,
    pub state: AppState,
}

impl CovidDashboardApp {
    /// Load the dataset through `cache` and build the initial state.
    /// Any failure here is fatal.
    pub fn new(cache: DatasetCache, config: &DashboardConfig) -> Result<Self> {
        let dataset = cache
            .load()
            .with_context(|| format!("loading {}", cache.path().display()))?;
        let state = AppState::new(dataset, config)
            .with_context(|| format!("{} contains no country rows", cache.path().display()))?;
        Ok(Self { cache, state })
    }
}

impl eframe::App for CovidDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters and key stats ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts and map ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.heading("COVID-19 Global Dashboard");
                    ui.small(format!("Source: {}", self.cache.path().display()));
                    charts::metric_charts(ui, &self.state);

                    ui.separator();
                    ui.heading("Global COVID-19 Case Map (Latest Date)");
                    map::case_map(ui, &self.state);
                });
        });
    }
}
