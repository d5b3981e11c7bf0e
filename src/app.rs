use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{panels, plot, ratio, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: year range + indicators ----
        egui::SidePanel::left("selection_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: the report ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| report(ui, &self.state));
        });
    }
}

// ---------------------------------------------------------------------------
// Report text
// ---------------------------------------------------------------------------

const OPENING: &str = "Despite decades of reform and policy changes on education, public perception \
    remains skeptical. News headlines and social media debates often echo the same \
    concern: has our education really progressed?";

const ACCESS: &str = "Over the past three decades Indonesia has significantly improved access to \
    education, with a key turning point around 2010. More Indonesian children are \
    in school today than ever before. But access isn't the only question anymore.";

const RATIO_QUESTION: &str = "If access is no longer the biggest problem, why does it still feel like there's \
    little progress in the actual outcomes?";

const RATIO_LEAD: &str = "In a system where access is no longer the main problem, the pupil-teacher ratio \
    becomes a key indicator of learning quality. The chart below shows the pupil-teacher \
    ratio across Southeast Asia in primary education.";

const PISA_DECLINE: &str = "Indonesia's PISA scores for Reading, Mathematics and Science have been declining \
    since their peak in 2015. This raises the question of whether the improvements in \
    access to education are truly reflected in the learning outcomes.";

const CONCLUSION: &str = "Indonesia has made commendable progress in expanding access to education, but the \
    quality of learning remains a critical concern. With declining PISA scores and a \
    high pupil-teacher ratio, the next challenge lies in ensuring that students not only \
    attend school but truly learn.";

/// The narrative report, top to bottom. A load failure replaces all of it.
fn report(ui: &mut Ui, state: &AppState) {
    let data = match (&state.data, state.fatal_error()) {
        (Some(data), None) => data,
        (_, Some(err)) => {
            ui.heading("The report cannot be rendered");
            plot::unavailable(ui, err);
            return;
        }
        (None, None) => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open an indicator table  (File → Open indicator table…)");
            });
            return;
        }
    };

    ui.heading("It's not about school, it's about learning");
    ui.label(OPENING);
    ui.label(ACCESS);
    ui.add_space(12.0);

    // ---- Indicator trends ----
    ui.label(RichText::new("Education Indicator Trends Over Decades").size(18.0).strong());
    match (data.year_bounds(), state.indicator_view()) {
        (Err(e), _) => plot::unavailable(ui, &e.to_string()),
        (Ok(_), Some(Ok(view))) => plot::indicator_chart(ui, &view),
        (Ok(_), Some(Err(e))) => plot::unavailable(ui, &e.to_string()),
        (Ok(_), None) => {}
    }
    ui.add_space(12.0);

    // ---- Pupil-teacher ratio ----
    ui.label(RichText::new("But then a natural question arises").size(16.0).strong());
    ui.label(RATIO_QUESTION);
    ui.label(RATIO_LEAD);
    ratio::ratio_chart(ui);
    ui.add_space(12.0);

    // ---- PISA ----
    ui.label(RichText::new("Indonesia PISA Scores Trends").size(18.0).strong());
    ui.label(PISA_DECLINE);
    plot::pisa_chart(ui, data, state.config.pisa_score_domain);

    egui::CollapsingHeader::new("Show raw data for PISA Scores")
        .default_open(false)
        .show(ui, |ui: &mut Ui| table::raw_table(ui, &data.pisa_raw));

    ui.add_space(12.0);
    ui.label(CONCLUSION);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrative_covers_every_section() {
        assert!(OPENING.contains("has our education really progressed?"));
        assert!(ACCESS.contains("turning point around 2010"));
        assert!(RATIO_QUESTION.contains("little progress in the actual outcomes"));
        assert!(RATIO_LEAD.contains("pupil-teacher ratio"));
        assert!(PISA_DECLINE.contains("since their peak in 2015"));
        assert!(CONCLUSION.contains("truly learn"));
    }
}
