//! Chart types and styling structures

use std::collections::BTreeMap;

use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};

/// Chart configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub style: StyleConfig,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: "Weekly Email Open Frequencies".to_string(),
            width: 1200,
            height: 800,
            x_label: None,
            y_label: Some("Number of Users".to_string()),
            style: StyleConfig::default(),
        }
    }
}

/// Font configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontConfig {
    pub family: String,
    pub size: u32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
            size: 14,
        }
    }
}

/// Margin configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarginConfig {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self {
            top: 20,
            right: 20,
            bottom: 50,
            left: 60,
        }
    }
}

/// Chart styling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleConfig {
    pub background_color: String,
    pub title_font: FontConfig,
    pub label_font: FontConfig,
    pub margins: MarginConfig,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: "#FFFFFF".to_string(),
            title_font: FontConfig {
                family: "sans-serif".to_string(),
                size: 24,
            },
            label_font: FontConfig::default(),
            margins: MarginConfig::default(),
        }
    }
}

/// Colors keyed by open-count, with a fallback for unmapped buckets.
///
/// Keeping one color per open-count across every bar is what makes the
/// stacked segments comparable between weeks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorPalette {
    colors: BTreeMap<u32, String>,
    fallback: String,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            colors: BTreeMap::from([
                (1, "#1f77b4".to_string()), // blue
                (2, "#ff7f0e".to_string()), // orange
                (3, "#2ca02c".to_string()), // green
                (4, "#d62728".to_string()), // red
            ]),
            fallback: "#333333".to_string(),
        }
    }
}

impl ColorPalette {
    pub fn new(colors: BTreeMap<u32, String>, fallback: impl Into<String>) -> Self {
        Self {
            colors,
            fallback: fallback.into(),
        }
    }

    /// Light-to-dark blue ramp for the first cohort of a combined chart
    pub fn blue_shades() -> Self {
        Self {
            colors: BTreeMap::from([
                (1, "#add8e6".to_string()),
                (2, "#1f77b4".to_string()),
                (3, "#1565c0".to_string()),
                (4, "#0d47a1".to_string()),
            ]),
            fallback: "#333333".to_string(),
        }
    }

    /// Light-to-dark green ramp for the second cohort of a combined chart
    pub fn green_shades() -> Self {
        Self {
            colors: BTreeMap::from([
                (1, "#90ee90".to_string()),
                (2, "#2ca02c".to_string()),
                (3, "#008000".to_string()),
                (4, "#006400".to_string()),
            ]),
            fallback: "#333333".to_string(),
        }
    }

    /// Resolve the color for an open-count bucket
    pub fn color_for(&self, frequency: u32) -> RGBColor {
        let hex = self.colors.get(&frequency).unwrap_or(&self.fallback);
        parse_hex_color(hex).unwrap_or(RGBColor(0, 0, 0))
    }
}

/// Parse a `#rrggbb` color string
pub fn parse_hex_color(color_str: &str) -> Option<RGBColor> {
    let hex = color_str.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(RGBColor(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FF0000"), Some(RGBColor(255, 0, 0)));
        assert_eq!(parse_hex_color("#1f77b4"), Some(RGBColor(31, 119, 180)));
        assert_eq!(parse_hex_color("1f77b4"), None);
        assert_eq!(parse_hex_color("#FFF"), None);
        assert_eq!(parse_hex_color("#ZZ0000"), None);
    }

    #[test]
    fn test_default_palette_colors() {
        let palette = ColorPalette::default();
        assert_eq!(palette.color_for(1), RGBColor(31, 119, 180));
        assert_eq!(palette.color_for(2), RGBColor(255, 127, 14));
        // Unmapped bucket falls back to dark gray
        assert_eq!(palette.color_for(9), RGBColor(51, 51, 51));
    }

    #[test]
    fn test_cohort_shade_ramps_differ() {
        let blue = ColorPalette::blue_shades();
        let green = ColorPalette::green_shades();
        assert_ne!(blue.color_for(1), green.color_for(1));
        assert_ne!(blue.color_for(4), green.color_for(4));
    }

    #[test]
    fn test_invalid_palette_entry_falls_back_to_black() {
        let palette = ColorPalette::new(BTreeMap::from([(1, "nope".to_string())]), "#333333");
        assert_eq!(palette.color_for(1), RGBColor(0, 0, 0));
    }
}
