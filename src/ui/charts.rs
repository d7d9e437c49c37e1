use eframe::egui::{RichText, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::data::series::x_to_date;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Time-series charts (central panel)
// ---------------------------------------------------------------------------

fn date_label(x: f64) -> String {
    x_to_date(x).map(|d| d.to_string()).unwrap_or_default()
}

/// One line chart per metric, one line per selected country.
pub fn metric_charts(ui: &mut Ui, state: &AppState) {
    if state.view.rated.is_empty() {
        ui.label(RichText::new("No data for the current selection.").italics());
        return;
    }

    for (metric, series) in &state.view.series {
        ui.add_space(8.0);
        ui.strong(metric.title());

        let y_label = metric.axis_label();
        Plot::new(y_label)
            .legend(Legend::default())
            .height(240.0)
            .x_axis_label("date")
            .y_axis_label(y_label)
            .x_axis_formatter(|mark, _range| date_label(mark.value))
            .label_formatter(|name, point| {
                let day = date_label(point.x);
                if name.is_empty() {
                    format!("{day}\n{:.2}", point.y)
                } else {
                    format!("{name}\n{day}\n{:.2}", point.y)
                }
            })
            .allow_scroll(false)
            .allow_boxed_zoom(true)
            .allow_drag(true)
            .show(ui, |plot_ui| {
                for (name, segments) in series {
                    let color = state.color_map.color_for(name);
                    for segment in segments {
                        let points: PlotPoints = segment.iter().copied().collect();
                        plot_ui.line(Line::new(points).name(name).color(color).width(1.5));
                    }
                }
            });
    }
}
