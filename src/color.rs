use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

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
            to_color32(rgb)
        })
        .collect()
}

fn to_color32(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

// ---------------------------------------------------------------------------
// Country → line colour
// ---------------------------------------------------------------------------

/// Assigns each country a distinct line colour.
///
/// Colours are spread over the whole dataset's country list, so a country
/// keeps its colour when the selection changes.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new(entities: &BTreeSet<String>) -> Self {
        let palette = generate_palette(entities.len());
        let mapping = entities.iter().cloned().zip(palette).collect();
        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given country.
    pub fn color_for(&self, entity: &str) -> Color32 {
        self.mapping
            .get(entity)
            .copied()
            .unwrap_or(self.default_color)
    }
}

// ---------------------------------------------------------------------------
// Continuous "Reds" scale for the case map
// ---------------------------------------------------------------------------

const REDS_LOW: (f32, f32, f32) = (1.0, 0.96, 0.94);
const REDS_HIGH: (f32, f32, f32) = (0.40, 0.0, 0.05);

/// Colour for the case map at `t ∈ [0, 1]`, pale pink to dark red.
/// `None` (no data) is drawn grey.
pub fn reds_scale(t: Option<f32>) -> Color32 {
    let Some(t) = t else {
        return Color32::from_gray(110);
    };
    let low: LinSrgb = Srgb::new(REDS_LOW.0, REDS_LOW.1, REDS_LOW.2).into_linear();
    let high: LinSrgb = Srgb::new(REDS_HIGH.0, REDS_HIGH.1, REDS_HIGH.2).into_linear();
    let mixed = low.mix(high, t.clamp(0.0, 1.0));
    to_color32(Srgb::from_linear(mixed))
}

/// Text colour that stays readable on top of a [`reds_scale`] fill.
pub fn label_color(t: Option<f32>) -> Color32 {
    match t {
        Some(t) if t > 0.5 => Color32::WHITE,
        _ => Color32::BLACK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        let colors = generate_palette(4);
        assert_eq!(colors.len(), 4);
        assert_ne!(colors[0], colors[2]);
    }

    #[test]
    fn countries_get_stable_distinct_colors() {
        let names: BTreeSet<String> = ["India", "Kenya"].iter().map(|s| s.to_string()).collect();
        let map = ColorMap::new(&names);
        assert_ne!(map.color_for("India"), map.color_for("Kenya"));
        assert_eq!(map.color_for("Atlantis"), Color32::GRAY);
    }

    #[test]
    fn reds_scale_darkens_with_intensity() {
        let pale = reds_scale(Some(0.0));
        let dark = reds_scale(Some(1.0));
        assert!(pale.g() > dark.g());
        assert!(pale.r() > dark.r());
        assert_eq!(reds_scale(Some(2.0)), dark);
        assert_eq!(reds_scale(None), Color32::from_gray(110));
    }
}
