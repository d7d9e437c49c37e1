use eframe::egui::{self, Align2, FontId, Sense, Ui};

use crate::color::{label_color, reds_scale};
use crate::state::AppState;
use crate::ui::format_count;

const TILE_SIZE: egui::Vec2 = egui::vec2(44.0, 26.0);

// ---------------------------------------------------------------------------
// Case map: one colour-scaled tile per ISO code
// ---------------------------------------------------------------------------

/// Latest total cases per country, coloured on the "Reds" scale.
pub fn case_map(ui: &mut Ui, state: &AppState) {
    if state.map.is_empty() {
        ui.label("No countries to show.");
        return;
    }

    scale_legend(ui);
    ui.add_space(4.0);

    ui.horizontal_wrapped(|ui: &mut Ui| {
        ui.spacing_mut().item_spacing = egui::vec2(2.0, 2.0);
        for tile in &state.map {
            let (rect, response) = ui.allocate_exact_size(TILE_SIZE, Sense::hover());
            let painter = ui.painter();
            painter.rect_filled(rect, 3.0, reds_scale(tile.intensity));
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                &tile.code,
                FontId::monospace(11.0),
                label_color(tile.intensity),
            );

            let cases = tile
                .total_cases
                .map(|v| format_count(v.trunc() as i64))
                .unwrap_or_else(|| "no data".to_string());
            response.on_hover_text(format!("{} ({})\nTotal cases: {cases}", tile.name, tile.code));
        }
    });
}

fn scale_legend(ui: &mut Ui) {
    ui.horizontal(|ui: &mut Ui| {
        ui.small("fewer cases");
        ui.spacing_mut().item_spacing.x = 0.0;
        for step in 0..=10 {
            let (rect, _) = ui.allocate_exact_size(egui::vec2(14.0, 10.0), Sense::hover());
            ui.painter()
                .rect_filled(rect, 0.0, reds_scale(Some(step as f32 / 10.0)));
        }
        ui.spacing_mut().item_spacing.x = 6.0;
        ui.small("more cases");
    });
}
