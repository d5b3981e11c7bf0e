//! Error types for the dashboard library.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading, configuring, or bounding the dashboard data.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// A source file is missing, unreadable, or could not be decoded.
    #[error("cannot load '{path}': {reason}")]
    DataLoad { path: PathBuf, reason: String },

    /// A source file lacks its identifier column.
    #[error("'{path}' has no '{column}' column")]
    MissingColumn { path: PathBuf, column: String },

    /// File extension not supported by the loader.
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    /// Nothing to derive year bounds from.
    #[error("no data: {0}")]
    NoData(String),

    /// Configuration file could not be read or parsed.
    #[error("configuration error in '{path}': {reason}")]
    Config { path: PathBuf, reason: String },

    /// A palette entry is not a `#rrggbb` colour, or the palette is empty.
    #[error("invalid colour: {0}")]
    InvalidColor(String),
}

impl DashboardError {
    pub(crate) fn data_load(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        DashboardError::DataLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether this error belongs to the fatal load family (the whole report
    /// cannot render).
    pub fn is_data_load(&self) -> bool {
        matches!(
            self,
            DashboardError::DataLoad { .. }
                | DashboardError::MissingColumn { .. }
                | DashboardError::UnsupportedFormat(_)
        )
    }
}

/// Result type alias for dashboard operations.
pub type Result<T> = std::result::Result<T, DashboardError>;

// ---------------------------------------------------------------------------
// ParseWarning – non-fatal coercion failure
// ---------------------------------------------------------------------------

/// Which coercion failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// A year header (or PISA `Year` cell) is not an integer.
    Year,
    /// A value cell is blank or not a number.
    Value,
}

/// A single header or cell that failed numeric coercion.
///
/// The affected observation carries a null marker; nothing else is lost.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseWarning {
    pub kind: WarningKind,
    /// Header of the value column the cell came from.
    pub column: String,
    /// Source row index, `None` for header-level failures.
    pub row: Option<usize>,
    pub raw: String,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            WarningKind::Year => "year",
            WarningKind::Value => "value",
        };
        match self.row {
            Some(row) => write!(f, "column '{}', row {row}: {what} '{}' is not numeric", self.column, self.raw),
            None => write!(f, "column '{}': {what} '{}' is not numeric", self.column, self.raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_family_classification() {
        assert!(DashboardError::data_load("a.csv", "gone").is_data_load());
        assert!(DashboardError::UnsupportedFormat("xlsx".into()).is_data_load());
        assert!(!DashboardError::NoData("empty".into()).is_data_load());
    }

    #[test]
    fn warning_display_mentions_column() {
        let w = ParseWarning {
            kind: WarningKind::Year,
            column: "N/A".into(),
            row: None,
            raw: "N/A".into(),
        };
        assert_eq!(w.to_string(), "column 'N/A': year 'N/A' is not numeric");
    }
}
