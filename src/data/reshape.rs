use std::collections::HashSet;

use super::model::{LongTable, Observation, PisaObservation, WideTable};
use crate::error::{ParseWarning, WarningKind};

// ---------------------------------------------------------------------------
// Coercion
// ---------------------------------------------------------------------------

/// Parse a year header or cell. Accepts integral text such as `"2000"` or
/// `"2000.0"`; anything else is `None`.
pub fn parse_year(raw: &str) -> Option<i32> {
    let s = raw.trim();
    if let Ok(y) = s.parse::<i32>() {
        return Some(y);
    }
    let f = s.parse::<f64>().ok()?;
    if f.is_finite() && f.fract() == 0.0 && f >= i32::MIN as f64 && f <= i32::MAX as f64 {
        Some(f as i32)
    } else {
        None
    }
}

/// Parse a value cell. Blank, unparsable and NaN cells are `None`.
///
/// Only non-blank failures are reported as warnings; a blank cell is a missing
/// survey year, not bad data.
pub fn parse_value(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

// ---------------------------------------------------------------------------
// Melt
// ---------------------------------------------------------------------------

/// Output of a melt: the long rows plus every coercion failure met on the way.
#[derive(Debug, Clone, Default)]
pub struct Melted {
    pub observations: Vec<Observation>,
    pub warnings: Vec<ParseWarning>,
}

/// Convert a wide table into one observation per (row, value column).
///
/// Rows are emitted column-major: every row for the first value column, then
/// every row for the second, and so on. Duplicates are kept; see
/// [`dedup_first`].
pub fn melt(table: &WideTable) -> Melted {
    let mut out = Melted {
        observations: Vec::with_capacity(table.len() * table.value_columns.len()),
        warnings: Vec::new(),
    };

    for (col_idx, header) in table.value_columns.iter().enumerate() {
        let year = parse_year(header);
        if year.is_none() {
            out.warnings.push(ParseWarning {
                kind: WarningKind::Year,
                column: header.clone(),
                row: None,
                raw: header.clone(),
            });
        }

        for (row_idx, row) in table.rows.iter().enumerate() {
            let raw = row.cells.get(col_idx).map(String::as_str).unwrap_or("");
            let value = parse_value(raw);
            if value.is_none() && !raw.trim().is_empty() {
                out.warnings.push(ParseWarning {
                    kind: WarningKind::Value,
                    column: header.clone(),
                    row: Some(row_idx),
                    raw: raw.to_string(),
                });
            }
            out.observations.push(Observation::new(row.id.clone(), year, value));
        }
    }

    out
}

/// Keep only the first observation for each (indicator, year) key.
///
/// Two null years under the same indicator share a key.
pub fn dedup_first(observations: Vec<Observation>) -> Vec<Observation> {
    let mut seen: HashSet<(String, Option<i32>)> = HashSet::with_capacity(observations.len());
    let before = observations.len();
    let kept: Vec<Observation> = observations
        .into_iter()
        .filter(|o| seen.insert((o.indicator.clone(), o.year)))
        .collect();

    let dropped = before - kept.len();
    if dropped > 0 {
        log::debug!("Dropped {dropped} duplicate (indicator, year) observations");
    }
    kept
}

/// Result of reshaping the indicator table.
#[derive(Debug, Clone, Default)]
pub struct Reshaped {
    pub table: LongTable,
    pub warnings: Vec<ParseWarning>,
}

/// Melt the wide indicator table and deduplicate it, first occurrence wins.
pub fn reshape_indicators(table: &WideTable) -> Reshaped {
    let Melted {
        observations,
        warnings,
    } = melt(table);

    log_warnings("indicator", &warnings);

    Reshaped {
        table: LongTable::new(dedup_first(observations)),
        warnings,
    }
}

/// Melt the PISA table (`Year` id column, one column per subject).
///
/// Rows whose year or score is null are left out. Unparsable text is reported
/// as a warning; blank scores are skipped quietly.
pub fn reshape_pisa(table: &WideTable) -> (Vec<PisaObservation>, Vec<ParseWarning>) {
    let mut observations = Vec::new();
    let mut warnings = Vec::new();

    let years: Vec<Option<i32>> = table.rows.iter().map(|r| parse_year(&r.id)).collect();
    for (row_idx, (row, year)) in table.rows.iter().zip(&years).enumerate() {
        if year.is_none() {
            warnings.push(ParseWarning {
                kind: WarningKind::Year,
                column: table.id_column.clone(),
                row: Some(row_idx),
                raw: row.id.clone(),
            });
        }
    }

    for (col_idx, subject) in table.value_columns.iter().enumerate() {
        for (row_idx, (row, year)) in table.rows.iter().zip(&years).enumerate() {
            let Some(year) = *year else {
                continue;
            };
            let raw = row.cells.get(col_idx).map(String::as_str).unwrap_or("");
            match parse_value(raw) {
                Some(score) => observations.push(PisaObservation {
                    year,
                    subject: subject.clone(),
                    score,
                }),
                None if raw.trim().is_empty() => {}
                None => warnings.push(ParseWarning {
                    kind: WarningKind::Value,
                    column: subject.clone(),
                    row: Some(row_idx),
                    raw: raw.to_string(),
                }),
            }
        }
    }

    log_warnings("PISA", &warnings);
    (observations, warnings)
}

fn log_warnings(source: &str, warnings: &[ParseWarning]) {
    for w in warnings {
        log::debug!("{source}: {w}");
    }
    if !warnings.is_empty() {
        log::info!("{source} table: {} cells coerced to null", warnings.len());
    }
}
