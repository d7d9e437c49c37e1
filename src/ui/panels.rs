use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use crate::data::model::Table;
use crate::state::AppState;
use crate::ui::format_count;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets and key stats
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Data");
    ui.separator();

    country_picker(ui, state);
    ui.separator();

    date_range_picker(ui, state);
    ui.separator();

    key_stats(ui, state);
    ui.separator();

    ui.strong("Export Filtered Data");
    if ui.button("Download as CSV").clicked() {
        export_dialog(state);
    }

    if let Some(msg) = &state.status_message {
        ui.label(RichText::new(msg).color(Color32::RED));
    }
}

fn country_picker(ui: &mut Ui, state: &mut AppState) {
    let n_selected = state.selection.entities.len();
    let n_total = state.dataset.entity_names().len();
    ui.strong(format!("Select countries  ({n_selected}/{n_total})"));

    ui.add(egui::TextEdit::singleline(&mut state.entity_query).hint_text("Search…"));

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all();
        }
        if ui.small_button("None").clicked() {
            state.select_none();
        }
    });

    // Collect first: toggling mutates the state the list is borrowed from.
    let names: Vec<String> = state.matching_entities().cloned().collect();
    let mut toggled: Option<String> = None;

    ScrollArea::vertical()
        .id_salt("country_list")
        .max_height(260.0)
        .auto_shrink([false, true])
        .show(ui, |ui: &mut Ui| {
            for name in &names {
                let mut checked = state.selection.entities.contains(name);
                let text = RichText::new(name).color(state.color_map.color_for(name));
                if ui.checkbox(&mut checked, text).changed() {
                    toggled = Some(name.clone());
                }
            }
        });

    if let Some(name) = toggled {
        state.toggle_entity(&name);
    }
}

fn date_range_picker(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Select date range");

    let mut start = state.selection.start;
    let mut end = state.selection.end;

    egui::Grid::new("date_range").num_columns(2).show(ui, |ui: &mut Ui| {
        ui.label("From");
        ui.add(DatePickerButton::new(&mut start).id_salt("date_start"));
        ui.end_row();
        ui.label("To");
        ui.add(DatePickerButton::new(&mut end).id_salt("date_end"));
        ui.end_row();
    });

    if let Some((min, max)) = state.dataset.date_bounds() {
        start = start.clamp(min, max);
        end = end.clamp(min, max);
    }
    state.set_date_range(start, end);

    if start > end {
        ui.label(RichText::new("Start is after end: nothing selected.").small());
    }
}

fn key_stats(ui: &mut Ui, state: &AppState) {
    ui.strong("Key Stats (Selected Data)");
    if state.view.latest.is_empty() {
        ui.label(RichText::new("No data for the current selection.").small());
    }
    let totals = state.view.totals;
    for (label, value) in [
        ("Total Vaccinations", totals.total_vaccinations),
        ("New Cases (latest)", totals.new_cases),
        ("New Deaths (latest)", totals.new_deaths),
    ] {
        ui.label(RichText::new(label).small());
        ui.label(RichText::new(format_count(value)).size(20.0).strong());
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Export filtered CSV…").clicked() {
                export_dialog(state);
                ui.close_menu();
            }
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        ui.separator();

        ui.label(format!(
            "{} rows loaded, {} visible across {} countries",
            state.dataset.records().len(),
            state.view.rated.len(),
            state.view.latest.len()
        ));
    });
}

// ---------------------------------------------------------------------------
// Export dialog
// ---------------------------------------------------------------------------

pub fn export_dialog(state: &mut AppState) {
    let artifact = match state.export() {
        Ok(artifact) => artifact,
        Err(e) => {
            log::error!("Failed to serialize view: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
            return;
        }
    };

    let file = rfd::FileDialog::new()
        .set_title("Export filtered data")
        .set_file_name(artifact.file_name)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        match artifact.save(&path) {
            Ok(()) => state.status_message = None,
            Err(e) => {
                log::error!("Failed to export: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
