use std::fmt;

// ---------------------------------------------------------------------------
// WideTable – one row per category, one column per year (or subject)
// ---------------------------------------------------------------------------

/// A source table as loaded from disk, before any numeric coercion.
///
/// Cells stay as text so that the reshaper is the only place deciding what
/// counts as a number.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WideTable {
    /// Name of the identifier column (`Indicator` or `Year`).
    pub id_column: String,
    /// Headers of every other column, trimmed, in source order.
    pub value_columns: Vec<String>,
    pub rows: Vec<WideRow>,
}

/// One source row: the identifier cell plus one cell per value column.
#[derive(Debug, Clone, PartialEq)]
pub struct WideRow {
    pub id: String,
    /// Same length as [`WideTable::value_columns`].
    pub cells: Vec<String>,
}

impl WideTable {
    pub fn new(id_column: impl Into<String>, value_columns: Vec<String>) -> Self {
        WideTable {
            id_column: id_column.into(),
            value_columns,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding or truncating cells to the column count.
    pub fn push_row(&mut self, id: impl Into<String>, mut cells: Vec<String>) {
        cells.resize(self.value_columns.len(), String::new());
        self.rows.push(WideRow {
            id: id.into(),
            cells,
        });
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Observation – one row of the long-form indicator table
// ---------------------------------------------------------------------------

/// A single (indicator, year, value) observation.
///
/// `year` is `None` when the source header was not an integer; `value` is
/// `None` when the cell was blank or not numeric.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub indicator: String,
    pub year: Option<i32>,
    pub value: Option<f64>,
}

impl Observation {
    pub fn new(indicator: impl Into<String>, year: Option<i32>, value: Option<f64>) -> Self {
        Observation {
            indicator: indicator.into(),
            year,
            value,
        }
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year = self.year.map_or_else(|| "<null>".to_string(), |y| y.to_string());
        let value = self.value.map_or_else(|| "<null>".to_string(), |v| format!("{v:.2}"));
        write!(f, "{} {year}: {value}", self.indicator)
    }
}

// ---------------------------------------------------------------------------
// PisaObservation
// ---------------------------------------------------------------------------

/// One PISA score: a subject's mean score in a survey year.
#[derive(Debug, Clone, PartialEq)]
pub struct PisaObservation {
    pub year: i32,
    pub subject: String,
    pub score: f64,
}

// ---------------------------------------------------------------------------
// LongTable – the indicator observations handed to the filter engine
// ---------------------------------------------------------------------------

/// The deduplicated long-form indicator collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LongTable {
    pub observations: Vec<Observation>,
}

impl LongTable {
    pub fn new(observations: Vec<Observation>) -> Self {
        LongTable { observations }
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_row_pads_short_rows() {
        let mut t = WideTable::new("Indicator", vec!["2000".into(), "2001".into()]);
        t.push_row("A", vec!["1".into()]);
        assert_eq!(t.rows[0].cells, vec!["1".to_string(), String::new()]);
    }

    #[test]
    fn observation_display_shows_nulls() {
        let o = Observation::new("NER", None, Some(91.5));
        assert_eq!(o.to_string(), "NER <null>: 91.50");
    }
}
