use std::str::FromStr;

use eframe::egui::Color32;
use palette::{LinSrgb, Mix, Srgb};
use serde::{Deserialize, Serialize};

use crate::data::model::Category;

// ---------------------------------------------------------------------------
// Hex parsing
// ---------------------------------------------------------------------------

/// Parse `#RRGGBB` (or `RRGGBB`) into a colour.
pub fn hex_color(hex: &str) -> Option<Color32> {
    let rgb = Srgb::<u8>::from_str(hex).ok()?;
    Some(Color32::from_rgb(rgb.red, rgb.green, rgb.blue))
}

// ---------------------------------------------------------------------------
// Category colours (periodic table cells)
// ---------------------------------------------------------------------------

/// Fill used when a category has no entry in [`CATEGORY_COLORS`].
pub const FALLBACK_HEX: &str = "#FFFFFF";

/// Fixed category → fill lookup for grid cells.
pub const CATEGORY_COLORS: [(Category, &str); 11] = [
    (Category::AlkaliMetal, "#FF5733"),
    (Category::AlkalineEarthMetal, "#FFBD33"),
    (Category::TransitionMetal, "#FFC300"),
    (Category::PostTransitionMetal, "#33FFBD"),
    (Category::Metalloid, "#33FFF3"),
    (Category::Nonmetal, "#337BFF"),
    (Category::Halogen, "#8D33FF"),
    (Category::NobleGas, "#C700FF"),
    (Category::Lanthanide, "#FF33A8"),
    (Category::Actinide, "#FF3333"),
    (Category::Unknown, "#D3D3D3"),
];

pub fn category_color(category: Category) -> Color32 {
    let hex = CATEGORY_COLORS
        .iter()
        .find(|(c, _)| *c == category)
        .map_or(FALLBACK_HEX, |(_, hex)| *hex);
    hex_color(hex).unwrap_or(Color32::WHITE)
}

/// Row tint for radioactive elements in the table view.
pub const RADIOACTIVE_HIGHLIGHT: Color32 = Color32::from_rgb(0xFF, 0xB6, 0xC1);

// ---------------------------------------------------------------------------
// Qualitative palette (trend lines, radar polygons)
// ---------------------------------------------------------------------------

/// The nine-colour "Set1" qualitative palette.
pub const SET1: [Color32; 9] = [
    Color32::from_rgb(228, 26, 28),
    Color32::from_rgb(55, 126, 184),
    Color32::from_rgb(77, 175, 74),
    Color32::from_rgb(152, 78, 163),
    Color32::from_rgb(255, 127, 0),
    Color32::from_rgb(255, 255, 51),
    Color32::from_rgb(166, 86, 40),
    Color32::from_rgb(247, 129, 191),
    Color32::from_rgb(153, 153, 153),
];

/// Colour for the `index`-th rendered series, cycling through [`SET1`].
pub fn qualitative_color(index: usize) -> Color32 {
    SET1[index % SET1.len()]
}

// ---------------------------------------------------------------------------
// Continuous colour scales (scatter colour channel)
// ---------------------------------------------------------------------------

/// Continuous colour scale for numeric colour channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorScale {
    #[default]
    Viridis,
    Cividis,
    Plasma,
    Inferno,
    Jet,
}

impl ColorScale {
    pub const ALL: [ColorScale; 5] = [
        ColorScale::Viridis,
        ColorScale::Cividis,
        ColorScale::Plasma,
        ColorScale::Inferno,
        ColorScale::Jet,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ColorScale::Viridis => "Viridis",
            ColorScale::Cividis => "Cividis",
            ColorScale::Plasma => "Plasma",
            ColorScale::Inferno => "Inferno",
            ColorScale::Jet => "Jet",
        }
    }

    /// Evenly spaced control points, low to high.
    fn stops(self) -> &'static [&'static str] {
        match self {
            ColorScale::Viridis => &["#440154", "#3B528B", "#21918C", "#5EC962", "#FDE725"],
            ColorScale::Cividis => &["#00224E", "#35456C", "#666970", "#948E77", "#C8B866", "#FEE838"],
            ColorScale::Plasma => &["#0D0887", "#7E03A8", "#CC4778", "#F89540", "#F0F921"],
            ColorScale::Inferno => &["#000004", "#57106E", "#BC3754", "#F98E09", "#FCFFA4"],
            ColorScale::Jet => &["#000083", "#003CAA", "#05FFFF", "#FFFF00", "#FA0000", "#800000"],
        }
    }

    /// Colour at position `t` in `[0, 1]`; out-of-range or NaN is clamped.
    pub fn sample(self, t: f64) -> Color32 {
        let stops: Vec<LinSrgb> = self
            .stops()
            .iter()
            .filter_map(|hex| Srgb::<u8>::from_str(hex).ok())
            .map(|c| c.into_linear())
            .collect();
        if stops.len() < 2 {
            return Color32::GRAY;
        }

        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) } as f32;
        let scaled = t * (stops.len() - 1) as f32;
        let i = (scaled.floor() as usize).min(stops.len() - 2);
        let mixed = stops[i].mix(stops[i + 1], scaled - i as f32);
        let rgb: Srgb<u8> = Srgb::from_linear(mixed);
        Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_parses_with_and_without_hash() {
        assert_eq!(hex_color("#FF5733"), Some(Color32::from_rgb(0xFF, 0x57, 0x33)));
        assert_eq!(hex_color("337BFF"), Some(Color32::from_rgb(0x33, 0x7B, 0xFF)));
        assert_eq!(hex_color("not a colour"), None);
    }

    #[test]
    fn test_every_category_has_a_color() {
        for category in Category::ALL {
            assert_ne!(category_color(category), Color32::WHITE, "{category}");
        }
        assert_eq!(category_color(Category::Unknown), Color32::from_rgb(0xD3, 0xD3, 0xD3));
    }

    #[test]
    fn test_qualitative_palette_cycles() {
        assert_eq!(qualitative_color(0), SET1[0]);
        assert_eq!(qualitative_color(9), SET1[0]);
        assert_eq!(qualitative_color(10), SET1[1]);
    }

    #[test]
    fn test_color_scale_endpoints_match_stops() {
        assert_eq!(ColorScale::Viridis.sample(0.0), Color32::from_rgb(0x44, 0x01, 0x54));
        assert_eq!(ColorScale::Viridis.sample(1.0), Color32::from_rgb(0xFD, 0xE7, 0x25));
        assert_eq!(ColorScale::Viridis.sample(-3.0), ColorScale::Viridis.sample(0.0));
        assert_eq!(ColorScale::Jet.sample(f64::NAN), ColorScale::Jet.sample(0.0));
    }
}
