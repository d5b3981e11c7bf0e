use std::collections::BTreeMap;
use std::path::Path;

use eframe::egui::Color32;

use crate::color::{assign_colors, ColorMap};
use crate::config::DashboardConfig;
use crate::data::filter::{filter_observations, unique_indicators, year_bounds, Selection, YearBounds};
use crate::data::loader::{load_indicator_table, load_pisa_table};
use crate::data::model::{LongTable, Observation, PisaObservation, WideTable};
use crate::data::reshape::{reshape_indicators, reshape_pisa};
use crate::error::Result;

// ---------------------------------------------------------------------------
// Loaded data (built once, read by every render)
// ---------------------------------------------------------------------------

/// Everything read from disk, already reshaped. Never mutated after loading;
/// re-opening a file builds a new value.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub indicators: LongTable,
    /// Multi-select options, in first-appearance order.
    pub indicator_names: Vec<String>,
    pub pisa: Vec<PisaObservation>,
    /// The PISA table as loaded, for the raw-data view.
    pub pisa_raw: WideTable,
    /// Cells coerced to null in the indicator table.
    pub indicator_warnings: usize,
    /// Cells coerced to null in the PISA table.
    pub pisa_warnings: usize,
}

impl DashboardData {
    /// Load and reshape both tables named in `config`.
    pub fn load(config: &DashboardConfig) -> Result<Self> {
        let wide = load_indicator_table(&config.indicator_path)?;
        let pisa_raw = load_pisa_table(&config.pisa_path)?;
        Ok(Self::from_tables(&wide, pisa_raw))
    }

    /// Build from already-loaded wide tables.
    pub fn from_tables(indicators: &WideTable, pisa_raw: WideTable) -> Self {
        let reshaped = reshape_indicators(indicators);
        let (pisa, pisa_warnings) = reshape_pisa(&pisa_raw);
        let indicator_names = unique_indicators(&reshaped.table.observations);

        DashboardData {
            indicator_names,
            indicators: reshaped.table,
            pisa,
            pisa_raw,
            indicator_warnings: reshaped.warnings.len(),
            pisa_warnings: pisa_warnings.len(),
        }
    }

    /// A copy with the indicator table replaced.
    pub fn with_indicators(&self, path: &Path) -> Result<Self> {
        let wide = load_indicator_table(path)?;
        let reshaped = reshape_indicators(&wide);
        Ok(DashboardData {
            indicator_names: unique_indicators(&reshaped.table.observations),
            indicators: reshaped.table,
            indicator_warnings: reshaped.warnings.len(),
            pisa: self.pisa.clone(),
            pisa_raw: self.pisa_raw.clone(),
            pisa_warnings: self.pisa_warnings,
        })
    }

    /// A copy with the PISA table replaced.
    pub fn with_pisa(&self, path: &Path) -> Result<Self> {
        let pisa_raw = load_pisa_table(path)?;
        let (pisa, warnings) = reshape_pisa(&pisa_raw);
        Ok(DashboardData {
            pisa,
            pisa_raw,
            pisa_warnings: warnings.len(),
            ..self.clone()
        })
    }

    /// Cells coerced to null across both tables.
    pub fn warning_count(&self) -> usize {
        self.indicator_warnings + self.pisa_warnings
    }

    /// Bounds for the year-range control.
    pub fn year_bounds(&self) -> Result<YearBounds> {
        year_bounds(&self.indicators.observations)
    }

    /// PISA subjects in column order.
    pub fn pisa_subjects(&self) -> &[String] {
        &self.pisa_raw.value_columns
    }
}

// ---------------------------------------------------------------------------
// Per-render output
// ---------------------------------------------------------------------------

/// What the indicator chart draws on one render.
#[derive(Debug, Clone)]
pub struct IndicatorView {
    pub rows: Vec<Observation>,
    pub colors: ColorMap,
}

/// Filter the indicator collection and colour the chosen series.
pub fn indicator_view(
    data: &DashboardData,
    selection: &Selection,
    palette: &[Color32],
    overrides: &BTreeMap<String, Color32>,
) -> Result<IndicatorView> {
    Ok(IndicatorView {
        rows: filter_observations(&data.indicators.observations, selection),
        colors: assign_colors(selection.chosen(), palette, overrides)?,
    })
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded data (None when the startup load failed).
    pub data: Option<DashboardData>,

    /// Fatal diagnostic shown instead of the report.
    pub load_error: Option<String>,

    /// Invalid palette or colour override. Survives data reloads, since only
    /// a new config can fix it.
    pub config_error: Option<String>,

    /// Current control values. Filtering is recomputed from these each frame.
    pub selection: Selection,

    pub palette: Vec<Color32>,
    pub color_overrides: BTreeMap<String, Color32>,

    /// Non-fatal status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    /// Load everything named in `config`. Failures are kept as a diagnostic
    /// rather than returned, so the window can still open and show them.
    pub fn from_config(config: DashboardConfig) -> Self {
        let mut state = AppState {
            config,
            data: None,
            load_error: None,
            config_error: None,
            selection: Selection::default(),
            palette: Vec::new(),
            color_overrides: BTreeMap::new(),
            status_message: None,
        };

        let colors = state
            .config
            .palette_colors()
            .and_then(|p| Ok((p, state.config.color_override_map()?)));
        match colors {
            Ok((palette, overrides)) => {
                state.palette = palette;
                state.color_overrides = overrides;
            }
            Err(e) => {
                log::error!("{e}");
                state.config_error = Some(e.to_string());
            }
        }

        match DashboardData::load(&state.config) {
            Ok(data) => state.set_data(data),
            Err(e) => {
                log::error!("Failed to load dashboard data: {e}");
                state.load_error = Some(e.to_string());
            }
        }
        state
    }

    /// Ingest newly loaded data and reset the selection to its defaults.
    pub fn set_data(&mut self, data: DashboardData) {
        self.selection = match Selection::default_for(
            &data.indicators.observations,
            &self.config.default_indicators,
        ) {
            Ok(sel) => sel,
            Err(e) => {
                log::warn!("{e}");
                Selection::default()
            }
        };
        log::info!(
            "{} indicator observations, {} PISA scores, {} cells coerced to null",
            data.indicators.len(),
            data.pisa.len(),
            data.warning_count()
        );
        self.data = Some(data);
        self.load_error = None;
        self.status_message = None;
    }

    /// Replace the indicator table from a user-picked file.
    pub fn reopen_indicators(&mut self, path: &Path) {
        let Some(result) = self.data.as_ref().map(|d| d.with_indicators(path)) else {
            self.config.indicator_path = path.to_path_buf();
            self.reload();
            return;
        };
        match result {
            Ok(data) => {
                self.config.indicator_path = path.to_path_buf();
                self.set_data(data);
            }
            Err(e) => self.report(e),
        }
    }

    /// Replace the PISA table from a user-picked file. The indicator
    /// selection is kept.
    pub fn reopen_pisa(&mut self, path: &Path) {
        let Some(result) = self.data.as_ref().map(|d| d.with_pisa(path)) else {
            self.config.pisa_path = path.to_path_buf();
            self.reload();
            return;
        };
        match result {
            Ok(data) => {
                self.config.pisa_path = path.to_path_buf();
                self.data = Some(data);
                self.status_message = None;
            }
            Err(e) => self.report(e),
        }
    }

    fn reload(&mut self) {
        match DashboardData::load(&self.config) {
            Ok(data) => self.set_data(data),
            Err(e) => {
                log::error!("Failed to load dashboard data: {e}");
                self.load_error = Some(e.to_string());
            }
        }
    }

    fn report(&mut self, e: crate::error::DashboardError) {
        log::error!("Failed to load file: {e}");
        self.status_message = Some(format!("Error: {e}"));
    }

    /// Select every indicator, in option order.
    pub fn select_all(&mut self) {
        if let Some(data) = &self.data {
            self.selection.set_chosen(data.indicator_names.clone());
        }
    }

    /// Deselect every indicator.
    pub fn select_none(&mut self) {
        self.selection.clear();
    }

    /// The diagnostic that halts the report, if any. Config errors come first.
    pub fn fatal_error(&self) -> Option<&str> {
        self.config_error.as_deref().or(self.load_error.as_deref())
    }

    /// Filtered rows and colours for this frame.
    pub fn indicator_view(&self) -> Option<Result<IndicatorView>> {
        let data = self.data.as_ref()?;
        Some(indicator_view(data, &self.selection, &self.palette, &self.color_overrides))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::default_palette;

    fn data() -> DashboardData {
        let mut wide = WideTable::new(
            "Indicator",
            vec!["2000".into(), "2005".into(), "2010".into()],
        );
        wide.push_row("NER Primary Education", vec!["90".into(), "92".into(), "95".into()]);
        wide.push_row("NER Lower Secondary Education", vec!["60".into(), "".into(), "75".into()]);
        wide.push_row("Other", vec!["1".into(), "2".into(), "3".into()]);

        let mut pisa = WideTable::new("Year", vec!["Reading".into()]);
        pisa.push_row("2000", vec!["371".into()]);

        DashboardData::from_tables(&wide, pisa)
    }

    fn state() -> AppState {
        let mut state = AppState {
            config: DashboardConfig::default(),
            data: None,
            load_error: None,
            config_error: None,
            selection: Selection::default(),
            palette: default_palette(),
            color_overrides: BTreeMap::new(),
            status_message: None,
        };
        state.set_data(data());
        state
    }

    #[test]
    fn defaults_pick_present_indicators() {
        let s = state();
        assert_eq!(s.selection.year_range, (2000, 2010));
        assert_eq!(
            s.selection.chosen(),
            ["NER Primary Education", "NER Lower Secondary Education"]
        );
    }

    #[test]
    fn view_filters_and_colours() {
        let mut s = state();
        s.selection.year_range = (2005, 2010);
        let view = s.indicator_view().unwrap().unwrap();
        assert_eq!(view.rows.len(), 4);
        assert!(view.rows.iter().all(|o| o.indicator != "Other"));
        assert_eq!(view.colors.color_for("NER Primary Education"), default_palette()[0]);
    }

    #[test]
    fn select_all_and_none() {
        let mut s = state();
        s.select_all();
        assert_eq!(s.selection.chosen().len(), 3);
        s.select_none();
        assert!(s.indicator_view().unwrap().unwrap().rows.is_empty());
    }

    #[test]
    fn reopened_indicators_keep_pisa_side() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.csv");
        std::fs::write(&path, "Indicator,2001\nB,oops\n").unwrap();

        let mut before = data();
        before.pisa_warnings = 7;
        let after = before.with_indicators(&path).unwrap();
        assert_eq!(after.indicator_names, vec!["B"]);
        assert_eq!(after.indicator_warnings, 1);
        assert_eq!(after.pisa, before.pisa);
        assert_eq!(after.pisa_warnings, 7);
    }

    #[test]
    fn missing_files_leave_a_diagnostic() {
        let config = DashboardConfig {
            indicator_path: "/no/such/wide.csv".into(),
            ..Default::default()
        };
        let s = AppState::from_config(config);
        assert!(s.data.is_none());
        assert!(s.load_error.is_some());
    }

    #[test]
    fn bad_palette_survives_reopen() {
        let bundled = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        let config = DashboardConfig {
            indicator_path: bundled.join("education-indicator-long.csv"),
            pisa_path: bundled.join("pisa-score.csv"),
            palette: vec!["#nothex".into()],
            ..Default::default()
        };
        let mut s = AppState::from_config(config);
        let initial = s.fatal_error().map(str::to_string);
        assert!(initial.as_deref().is_some_and(|e| e.contains("#nothex")));

        s.reopen_indicators(&bundled.join("education-indicator-long.csv"));
        assert!(s.data.is_some());
        assert_eq!(s.fatal_error().map(str::to_string), initial);
    }

    #[test]
    fn no_years_means_no_bounds() {
        let mut wide = WideTable::new("Indicator", vec!["N/A".into()]);
        wide.push_row("A", vec!["1".into()]);
        let data = DashboardData::from_tables(&wide, WideTable::new("Year", Vec::new()));
        assert!(data.year_bounds().is_err());
    }
}
