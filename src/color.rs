use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Outcome;

/// CSS `darkgray`, used for marker borders.
pub const DARK_GRAY: Color32 = Color32::from_rgb(169, 169, 169);

/// Heading colour of the dashboard title.
pub const HEADING: Color32 = Color32::from_rgb(0x50, 0x3D, 0x36);

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
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// `#rrggbb` form of a colour, for exported chart data.
pub fn to_hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

// ---------------------------------------------------------------------------
// Color mapping: slice label → Color32
// ---------------------------------------------------------------------------

/// Maps pie slice labels (site names, or Success/Failure) to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Assign palette colours to labels in the order given.
    pub fn new<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let labels: Vec<&str> = labels.into_iter().collect();
        let palette = generate_palette(labels.len());
        let mapping = labels
            .into_iter()
            .zip(palette)
            .map(|(label, c)| (label.to_string(), c))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a label.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}

// ---------------------------------------------------------------------------
// Scatter presentation constants
// ---------------------------------------------------------------------------

/// Scatter marker colour keyed by outcome value, never by row position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeColors {
    pub failure: Color32,
    pub success: Color32,
}

impl Default for OutcomeColors {
    fn default() -> Self {
        OutcomeColors {
            failure: Color32::BLACK,
            success: Color32::RED,
        }
    }
}

impl OutcomeColors {
    pub fn color_for(&self, outcome: Outcome) -> Color32 {
        match outcome {
            Outcome::Failure => self.failure,
            Outcome::Success => self.success,
        }
    }
}

/// Fixed marker and background styling for the scatter chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    /// Marker diameter in points.
    pub size: f32,
    pub border_width: f32,
    pub border_color: Color32,
    pub plot_background: Color32,
    pub paper_background: Color32,
    pub text_color: Color32,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        MarkerStyle {
            size: 10.0,
            border_width: 1.0,
            border_color: DARK_GRAY,
            plot_background: Color32::WHITE,
            paper_background: Color32::WHITE,
            text_color: Color32::BLACK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size_and_distinct_colors() {
        assert!(generate_palette(0).is_empty());
        let colors = generate_palette(4);
        assert_eq!(colors.len(), 4);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn color_map_falls_back_to_gray() {
        let map = ColorMap::new(["KSC LC-39A", "CCAFS LC-40"]);
        assert_ne!(map.color_for("KSC LC-39A"), map.color_for("CCAFS LC-40"));
        assert_eq!(map.color_for("unknown"), Color32::GRAY);
    }

    #[test]
    fn outcome_colors_are_keyed_by_outcome() {
        let colors = OutcomeColors::default();
        assert_eq!(colors.color_for(Outcome::Failure), Color32::BLACK);
        assert_eq!(colors.color_for(Outcome::Success), Color32::RED);
    }

    #[test]
    fn hex_formatting() {
        assert_eq!(to_hex(DARK_GRAY), "#a9a9a9");
        assert_eq!(to_hex(Color32::RED), "#ff0000");
    }
}
