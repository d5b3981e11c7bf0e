//! Dashboard configuration.
//!
//! Every field has a default, so a config file only needs the keys it
//! changes:
//!
//! ```json
//! {
//!   "indicator_path": "data/education-indicator-long.csv",
//!   "palette": ["#92242a", "#4777af"],
//!   "color_overrides": { "NER Primary Education": "#000000" }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use eframe::egui::Color32;
use serde::{Deserialize, Serialize};

use crate::color::{default_palette, parse_hex, parse_palette};
use crate::error::{DashboardError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Wide indicator-by-year table (`.csv` or `.parquet`).
    pub indicator_path: PathBuf,
    /// PISA score table (`.csv` or `.parquet`).
    pub pisa_path: PathBuf,
    /// Series palette as `#rrggbb` strings.
    pub palette: Vec<String>,
    /// Indicators chosen on first render, when present in the data.
    pub default_indicators: Vec<String>,
    /// Y-axis bounds of the PISA chart.
    pub pisa_score_domain: (f64, f64),
    /// Fixed colours for specific indicators.
    pub color_overrides: BTreeMap<String, String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            indicator_path: PathBuf::from("data/education-indicator-long.csv"),
            pisa_path: PathBuf::from("data/pisa-score.csv"),
            palette: crate::color::DEFAULT_PALETTE.iter().map(|s| s.to_string()).collect(),
            default_indicators: vec![
                "NER Primary Education".to_string(),
                "NER Lower Secondary Education".to_string(),
                "NER Upper Secondary Education".to_string(),
            ],
            pisa_score_domain: (350.0, 410.0),
            color_overrides: BTreeMap::new(),
        }
    }
}

impl DashboardConfig {
    /// Read a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| DashboardError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_json(&text).map_err(|e| match e {
            DashboardError::Config { reason, .. } => DashboardError::Config {
                path: path.to_path_buf(),
                reason,
            },
            other => other,
        })
    }

    /// Parse a JSON config document.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| DashboardError::Config {
            path: PathBuf::from("<inline>"),
            reason: e.to_string(),
        })
    }

    /// The configured palette; falls back to the built-in one when empty.
    pub fn palette_colors(&self) -> Result<Vec<Color32>> {
        if self.palette.is_empty() {
            return Ok(default_palette());
        }
        parse_palette(&self.palette)
    }

    pub fn color_override_map(&self) -> Result<BTreeMap<String, Color32>> {
        self.color_overrides
            .iter()
            .map(|(name, hex)| Ok((name.clone(), parse_hex(hex)?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_keeps_defaults() {
        let cfg = DashboardConfig::from_json(r#"{ "pisa_path": "other.csv" }"#).unwrap();
        assert_eq!(cfg.pisa_path, PathBuf::from("other.csv"));
        assert_eq!(cfg.indicator_path, DashboardConfig::default().indicator_path);
        assert_eq!(cfg.palette.len(), 10);
        assert_eq!(cfg.pisa_score_domain, (350.0, 410.0));
    }

    #[test]
    fn empty_palette_falls_back() {
        let cfg = DashboardConfig {
            palette: Vec::new(),
            ..Default::default()
        };
        assert_eq!(cfg.palette_colors().unwrap(), default_palette());
    }

    #[test]
    fn bad_palette_entry_is_an_error() {
        let cfg = DashboardConfig {
            palette: vec!["#nothex".into()],
            ..Default::default()
        };
        assert!(matches!(cfg.palette_colors(), Err(DashboardError::InvalidColor(_))));
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = DashboardConfig::from_json(r##"{ "color_overrides": { "A": "#ff0000" } }"##).unwrap();
        let map = cfg.color_override_map().unwrap();
        assert_eq!(map.get("A"), Some(&Color32::from_rgb(255, 0, 0)));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = DashboardConfig::load(Path::new("/no/such/config.json")).unwrap_err();
        assert!(matches!(err, DashboardError::Config { .. }));
    }

    #[test]
    fn malformed_json_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ nope").unwrap();
        match DashboardConfig::load(&path) {
            Err(DashboardError::Config { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected config error, got {other:?}"),
        }
    }
}
