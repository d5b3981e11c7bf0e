use std::collections::HashSet;

use super::model::Observation;
use crate::error::{DashboardError, Result};

// ---------------------------------------------------------------------------
// Year bounds
// ---------------------------------------------------------------------------

/// Inclusive range of non-null years present in the indicator collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearBounds {
    pub min: i32,
    pub max: i32,
}

impl YearBounds {
    /// Clamp both ends of `(lo, hi)` into the bounds. The order of the ends
    /// is preserved, so an inverted range stays inverted.
    pub fn clamp(&self, (lo, hi): (i32, i32)) -> (i32, i32) {
        (lo.clamp(self.min, self.max), hi.clamp(self.min, self.max))
    }

    /// The full range as a `(lo, hi)` pair.
    pub fn full_range(&self) -> (i32, i32) {
        (self.min, self.max)
    }
}

/// Minimum and maximum non-null year in `observations`.
pub fn year_bounds(observations: &[Observation]) -> Result<YearBounds> {
    let mut years = observations.iter().filter_map(|o| o.year);
    let first = years.next().ok_or_else(|| {
        DashboardError::NoData(if observations.is_empty() {
            "indicator table has no observations".to_string()
        } else {
            "indicator table has no numeric year columns".to_string()
        })
    })?;

    let bounds = years.fold(YearBounds { min: first, max: first }, |b, y| YearBounds {
        min: b.min.min(y),
        max: b.max.max(y),
    });
    Ok(bounds)
}

/// Indicator names in order of first appearance.
pub fn unique_indicators(observations: &[Observation]) -> Vec<String> {
    let mut seen = HashSet::new();
    observations
        .iter()
        .filter(|o| seen.insert(o.indicator.as_str()))
        .map(|o| o.indicator.clone())
        .collect()
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// The user's current choice: an inclusive year range and the chosen
/// indicators in selection order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    pub year_range: (i32, i32),
    chosen: Vec<String>,
}

impl Selection {
    /// Build a selection, dropping repeated names but keeping the first
    /// position of each.
    pub fn new<I, S>(year_range: (i32, i32), chosen: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let chosen = chosen
            .into_iter()
            .map(Into::into)
            .filter(|name: &String| seen.insert(name.clone()))
            .collect();
        Selection { year_range, chosen }
    }

    /// Initial selection: the full year range and those `defaults` that
    /// exist in `observations`.
    pub fn default_for(observations: &[Observation], defaults: &[String]) -> Result<Self> {
        let bounds = year_bounds(observations)?;
        let available: HashSet<&str> = observations.iter().map(|o| o.indicator.as_str()).collect();
        let chosen = defaults
            .iter()
            .filter(|name| available.contains(name.as_str()));
        Ok(Selection::new(bounds.full_range(), chosen.cloned()))
    }

    /// Chosen indicators, in selection order.
    pub fn chosen(&self) -> &[String] {
        &self.chosen
    }

    pub fn is_chosen(&self, indicator: &str) -> bool {
        self.chosen.iter().any(|c| c == indicator)
    }

    /// Add or remove an indicator. Newly added names go to the end.
    pub fn toggle(&mut self, indicator: &str) {
        if let Some(pos) = self.chosen.iter().position(|c| c == indicator) {
            self.chosen.remove(pos);
        } else {
            self.chosen.push(indicator.to_string());
        }
    }

    pub fn set_chosen(&mut self, chosen: Vec<String>) {
        *self = Selection::new(self.year_range, chosen);
    }

    pub fn clear(&mut self) {
        self.chosen.clear();
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Observations with a year in `lo..=hi` and a chosen indicator, in input
/// order.
///
/// Null years never match. An inverted range or an empty chosen set yields
/// an empty result.
pub fn filter_observations(observations: &[Observation], selection: &Selection) -> Vec<Observation> {
    let (lo, hi) = selection.year_range;
    if lo > hi || selection.chosen.is_empty() {
        return Vec::new();
    }
    let chosen: HashSet<&str> = selection.chosen.iter().map(String::as_str).collect();

    observations
        .iter()
        .filter(|o| matches!(o.year, Some(y) if lo <= y && y <= hi))
        .filter(|o| chosen.contains(o.indicator.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs() -> Vec<Observation> {
        vec![
            Observation::new("A", Some(2000), Some(1.0)),
            Observation::new("B", Some(2000), Some(2.0)),
            Observation::new("A", Some(2005), Some(3.0)),
            Observation::new("B", None, Some(4.0)),
            Observation::new("C", Some(2010), None),
        ]
    }

    #[test]
    fn bounds_ignore_null_years() {
        assert_eq!(year_bounds(&obs()).unwrap(), YearBounds { min: 2000, max: 2010 });
    }

    #[test]
    fn bounds_of_empty_collection_is_no_data() {
        assert!(matches!(year_bounds(&[]), Err(DashboardError::NoData(_))));
        let only_null = vec![Observation::new("A", None, Some(1.0))];
        assert!(matches!(year_bounds(&only_null), Err(DashboardError::NoData(_))));
    }

    #[test]
    fn filter_is_stable_and_inclusive() {
        let sel = Selection::new((2000, 2005), ["A", "B"]);
        let out = filter_observations(&obs(), &sel);
        assert_eq!(out, obs()[..3].to_vec());
    }

    #[test]
    fn null_year_never_matches() {
        let sel = Selection::new((i32::MIN, i32::MAX), ["B"]);
        let out = filter_observations(&obs(), &sel);
        assert_eq!(out, vec![Observation::new("B", Some(2000), Some(2.0))]);
    }

    #[test]
    fn null_values_pass_through() {
        let sel = Selection::new((2010, 2010), ["C"]);
        assert_eq!(filter_observations(&obs(), &sel).len(), 1);
    }

    #[test]
    fn inverted_range_is_empty() {
        let sel = Selection::new((2005, 2000), ["A", "B", "C"]);
        assert!(filter_observations(&obs(), &sel).is_empty());
    }

    #[test]
    fn empty_chosen_set_is_empty() {
        let sel = Selection::new((2000, 2010), Vec::<String>::new());
        assert!(filter_observations(&obs(), &sel).is_empty());
    }

    #[test]
    fn unique_indicators_in_first_appearance_order() {
        assert_eq!(unique_indicators(&obs()), vec!["A", "B", "C"]);
    }

    #[test]
    fn default_selection_skips_unknown_names() {
        let defaults = vec!["C".to_string(), "Z".to_string(), "A".to_string()];
        let sel = Selection::default_for(&obs(), &defaults).unwrap();
        assert_eq!(sel.year_range, (2000, 2010));
        assert_eq!(sel.chosen(), ["C", "A"]);
    }

    #[test]
    fn toggle_appends_and_removes() {
        let mut sel = Selection::new((2000, 2010), ["A", "A", "B"]);
        assert_eq!(sel.chosen(), ["A", "B"]);
        sel.toggle("A");
        sel.toggle("C");
        sel.toggle("A");
        assert_eq!(sel.chosen(), ["B", "C", "A"]);
    }

    #[test]
    fn clamp_keeps_order() {
        let b = YearBounds { min: 2000, max: 2010 };
        assert_eq!(b.clamp((1990, 2020)), (2000, 2010));
        assert_eq!(b.clamp((2008, 2003)), (2008, 2003));
    }
}
