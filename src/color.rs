use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

use crate::data::countries::CountryRatio;
use crate::error::{DashboardError, Result};

/// Series colours used when no palette is configured.
pub const DEFAULT_PALETTE: [&str; 10] = [
    "#92242a", "#4777af", "#7d8c9c", "#e69d00", "#0072b2", "#009e73", "#cc79a7", "#56b4e9",
    "#d55e00", "#f0e442",
];

// ---------------------------------------------------------------------------
// Hex parsing
// ---------------------------------------------------------------------------

/// Parse a `#rrggbb` (or `rrggbb`) string.
pub fn parse_hex(s: &str) -> Result<Color32> {
    let rgb: Srgb<u8> = s
        .trim()
        .parse()
        .map_err(|e| DashboardError::InvalidColor(format!("'{s}': {e}")))?;
    Ok(Color32::from_rgb(rgb.red, rgb.green, rgb.blue))
}

/// Parse every entry of a hex palette.
pub fn parse_palette<S: AsRef<str>>(entries: &[S]) -> Result<Vec<Color32>> {
    entries.iter().map(|s| parse_hex(s.as_ref())).collect()
}

/// The built-in ten-colour palette.
pub fn default_palette() -> Vec<Color32> {
    DEFAULT_PALETTE
        .iter()
        .filter_map(|s| parse_hex(s).ok())
        .collect()
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            let rgb: Srgb<u8> = rgb.into_format();
            Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Sequential scale for the pupil-teacher ratio view
// ---------------------------------------------------------------------------

/// Light-to-dark blue scale. `t` is clamped to `[0, 1]`.
pub fn sequential_blues(t: f32) -> Color32 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let light: LinSrgb = Srgb::new(0xde_u8, 0xeb, 0xf7).into_format::<f32>().into_linear();
    let dark: LinSrgb = Srgb::new(0x08_u8, 0x30, 0x6b).into_format::<f32>().into_linear();
    let mixed: Srgb<u8> = Srgb::<f32>::from_linear(light.mix(dark, t)).into_format();
    Color32::from_rgb(mixed.red, mixed.green, mixed.blue)
}

/// Shade for one country given the ratio range of the set.
pub fn ratio_color(record: &CountryRatio, (min, max): (u32, u32)) -> Color32 {
    let span = max.saturating_sub(min);
    if span == 0 {
        return sequential_blues(0.5);
    }
    let t = record.pupil_teacher_ratio.saturating_sub(min) as f32 / span as f32;
    sequential_blues(t)
}

// ---------------------------------------------------------------------------
// Color mapping: chosen indicator → Color32
// ---------------------------------------------------------------------------

/// Colours for the chosen indicators, in chosen order.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMap {
    entries: Vec<(String, Color32)>,
    default_color: Color32,
}

/// Assign each chosen indicator `palette[i % palette.len()]`, where `i` is its
/// position in `chosen`. Names present in `overrides` take that colour
/// instead but still consume their palette slot.
pub fn assign_colors(
    chosen: &[String],
    palette: &[Color32],
    overrides: &BTreeMap<String, Color32>,
) -> Result<ColorMap> {
    if palette.is_empty() {
        return Err(DashboardError::InvalidColor("palette is empty".to_string()));
    }
    let entries = chosen
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let color = overrides
                .get(name)
                .copied()
                .unwrap_or(palette[i % palette.len()]);
            (name.clone(), color)
        })
        .collect();

    Ok(ColorMap {
        entries,
        default_color: Color32::GRAY,
    })
}

impl ColorMap {
    /// Look up the colour for an indicator; unknown names are grey.
    pub fn color_for(&self, indicator: &str) -> Color32 {
        self.entries
            .iter()
            .find(|(name, _)| name == indicator)
            .map(|(_, c)| *c)
            .unwrap_or(self.default_color)
    }

    /// Return the legend entries (indicator → colour) in chosen order.
    pub fn legend_entries(&self) -> &[(String, Color32)] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_hex_with_and_without_hash() {
        assert_eq!(parse_hex("#92242a").unwrap(), Color32::from_rgb(0x92, 0x24, 0x2a));
        assert_eq!(parse_hex("4777af").unwrap(), Color32::from_rgb(0x47, 0x77, 0xaf));
        assert!(matches!(parse_hex("#zzzzzz"), Err(DashboardError::InvalidColor(_))));
    }

    #[test]
    fn default_palette_has_ten_colours() {
        assert_eq!(default_palette().len(), 10);
    }

    #[test]
    fn colours_follow_chosen_position() {
        let palette = vec![Color32::RED, Color32::GREEN, Color32::BLUE];
        let chosen = names(&["X", "Y", "Z"]);
        let first = assign_colors(&chosen, &palette, &BTreeMap::new()).unwrap();
        let again = assign_colors(&chosen, &palette, &BTreeMap::new()).unwrap();
        assert_eq!(first, again);
        assert_eq!(first.color_for("X"), Color32::RED);
        assert_eq!(first.color_for("Y"), Color32::GREEN);
        assert_eq!(first.color_for("Z"), Color32::BLUE);
        assert_eq!(first.color_for("W"), Color32::GRAY);
    }

    #[test]
    fn palette_cycles() {
        let palette = vec![Color32::RED, Color32::GREEN];
        let map = assign_colors(&names(&["a", "b", "c"]), &palette, &BTreeMap::new()).unwrap();
        assert_eq!(map.color_for("c"), Color32::RED);
    }

    #[test]
    fn override_keeps_other_slots() {
        let palette = vec![Color32::RED, Color32::GREEN, Color32::BLUE];
        let mut overrides = BTreeMap::new();
        overrides.insert("a".to_string(), Color32::BLACK);
        let map = assign_colors(&names(&["a", "b"]), &palette, &overrides).unwrap();
        assert_eq!(map.color_for("a"), Color32::BLACK);
        assert_eq!(map.color_for("b"), Color32::GREEN);
    }

    #[test]
    fn empty_palette_is_rejected() {
        assert!(assign_colors(&names(&["a"]), &[], &BTreeMap::new()).is_err());
    }

    #[test]
    fn blues_get_darker() {
        let light = sequential_blues(0.0);
        let dark = sequential_blues(1.0);
        assert!(dark.r() < light.r());
        assert!(dark.b() < light.b());
        assert_eq!(sequential_blues(2.0), dark);
    }

    #[test]
    fn generate_palette_is_distinct() {
        let p = generate_palette(3);
        assert_eq!(p.len(), 3);
        assert_ne!(p[0], p[1]);
        assert!(generate_palette(0).is_empty());
    }
}
