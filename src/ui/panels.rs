use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – year range and indicator selection
// ---------------------------------------------------------------------------

/// Render the left selection panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Indicator trends");
    ui.separator();

    let Some(data) = &state.data else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone what we need so we can mutate state below.
    let options = data.indicator_names.clone();
    let bounds = data.year_bounds();

    // ---- Year range ----
    ui.strong("Select Year Range");
    match bounds {
        Ok(bounds) => {
            let (mut lo, mut hi) = bounds.clamp(state.selection.year_range);
            ui.add(egui::Slider::new(&mut lo, bounds.min..=bounds.max).text("from"));
            ui.add(egui::Slider::new(&mut hi, bounds.min..=bounds.max).text("to"));
            state.selection.year_range = (lo, hi);
            if lo > hi {
                ui.label(RichText::new("Start year is after end year").weak());
            }
        }
        Err(e) => {
            ui.label(RichText::new(e.to_string()).color(Color32::RED));
        }
    }
    ui.separator();

    // ---- Indicator multi-select ----
    ui.strong("Select Indicators to Display");
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all();
        }
        if ui.small_button("None").clicked() {
            state.select_none();
        }
    });

    // Swatches show the colour each series will get on this render.
    let colors = state.indicator_view().and_then(|v| v.ok()).map(|v| v.colors);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for name in &options {
                let mut checked = state.selection.is_chosen(name);
                let mut text = RichText::new(name);
                if checked {
                    if let Some(cm) = &colors {
                        text = text.color(cm.color_for(name));
                    }
                }
                if ui.checkbox(&mut checked, text).changed() {
                    state.selection.toggle(name);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open indicator table…").clicked() {
                if let Some(path) = pick_table("Open indicator table") {
                    state.reopen_indicators(&path);
                }
                ui.close_menu();
            }
            if ui.button("Open PISA table…").clicked() {
                if let Some(path) = pick_table("Open PISA table") {
                    state.reopen_pisa(&path);
                }
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(data) = &state.data {
            let visible = state
                .indicator_view()
                .and_then(|v| v.ok())
                .map_or(0, |v| v.rows.len());
            ui.label(format!(
                "{} observations loaded, {visible} visible",
                data.indicators.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

fn pick_table(title: &str) -> Option<std::path::PathBuf> {
    rfd::FileDialog::new()
        .set_title(title)
        .add_filter("Supported files", &["csv", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file()
}
