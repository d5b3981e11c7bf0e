use eframe::egui::{RichText, Ui};
use egui_plot::{Bar, BarChart, Plot};

use crate::color::{ratio_color, sequential_blues};
use crate::data::countries::{ratio_range, CountryRatio, COUNTRY_RATIOS};

// ---------------------------------------------------------------------------
// Pupil-teacher ratio view
// ---------------------------------------------------------------------------

/// Bars for the static country set, lowest ratio first, each shaded on the
/// sequential blue scale.
pub fn ratio_chart(ui: &mut Ui) {
    let range = ratio_range();
    let mut records: Vec<&CountryRatio> = COUNTRY_RATIOS.iter().collect();
    records.sort_by_key(|r| r.pupil_teacher_ratio);

    let bars: Vec<Bar> = records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            Bar::new(i as f64, r.pupil_teacher_ratio as f64)
                .name(format!("{} ({})", r.country, r.iso3))
                .fill(ratio_color(r, range))
                .width(0.7)
        })
        .collect();

    let labels: Vec<&'static str> = records.iter().map(|r| r.iso3).collect();

    ui.label(RichText::new("Pupil-Teacher Ratio in Primary Education (Lower is Better)").strong());
    ui.horizontal(|ui: &mut Ui| {
        ui.label(RichText::new(format!("{}", range.0)).color(sequential_blues(0.0)));
        ui.label("→");
        ui.label(RichText::new(format!("{} pupils per teacher", range.1)).color(sequential_blues(1.0)));
    });

    Plot::new("ratio_plot")
        .height(300.0)
        .y_axis_label("Pupils per Teacher")
        .include_y(0.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .x_axis_formatter(move |mark, _range| {
            let i = mark.value.round();
            if (mark.value - i).abs() > 1e-6 || i < 0.0 {
                return String::new();
            }
            labels.get(i as usize).map(|s| s.to_string()).unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Pupils per Teacher"));
        });
}
