use eframe::egui::{Color32, Ui};
use egui_plot::{Corner, Legend, Line, MarkerShape, Plot, PlotPoints, Points};

use crate::color::generate_palette;
use crate::state::{DashboardData, IndicatorView};

// ---------------------------------------------------------------------------
// Indicator trend chart
// ---------------------------------------------------------------------------

/// Line chart of the filtered indicator observations, one series per chosen
/// indicator. Null values are skipped.
pub fn indicator_chart(ui: &mut Ui, view: &IndicatorView) {
    if view.rows.is_empty() {
        ui.label("No observations match the current selection.");
    }

    Plot::new("indicator_plot")
        .legend(Legend::default().position(Corner::LeftTop))
        .height(420.0)
        .x_axis_label("Year")
        .y_axis_label("NER")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (name, color) in view.colors.legend_entries() {
                let points: Vec<[f64; 2]> = view
                    .rows
                    .iter()
                    .filter(|o| &o.indicator == name)
                    .filter_map(|o| Some([o.year? as f64, o.value?]))
                    .collect();
                if points.is_empty() {
                    continue;
                }

                plot_ui.line(
                    Line::new(PlotPoints::from(points.clone()))
                        .name(name)
                        .color(*color)
                        .width(3.0),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .name(name)
                        .color(*color)
                        .shape(MarkerShape::Circle)
                        .filled(false)
                        .radius(5.0),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// PISA chart
// ---------------------------------------------------------------------------

/// Line chart of PISA scores, one series per subject.
pub fn pisa_chart(ui: &mut Ui, data: &DashboardData, (y_min, y_max): (f64, f64)) {
    let subjects = data.pisa_subjects();
    let colors = generate_palette(subjects.len());

    Plot::new("pisa_plot")
        .legend(Legend::default())
        .height(360.0)
        .x_axis_label("Year")
        .y_axis_label("PISA Score")
        .include_y(y_min)
        .include_y(y_max)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (subject, color) in subjects.iter().zip(colors.iter().copied()) {
                let mut points: Vec<[f64; 2]> = data
                    .pisa
                    .iter()
                    .filter(|o| &o.subject == subject)
                    .map(|o| [o.year as f64, o.score])
                    .collect();
                points.sort_by(|a, b| a[0].total_cmp(&b[0]));

                plot_ui.line(
                    Line::new(PlotPoints::from(points))
                        .name(subject)
                        .color(color)
                        .width(2.0),
                );
            }
        });
}

/// Placeholder shown when a chart has nothing to bound against.
pub fn unavailable(ui: &mut Ui, message: &str) {
    ui.label(eframe::egui::RichText::new(message).color(Color32::RED));
}
