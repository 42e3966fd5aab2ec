use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Outcome;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

fn hsl_color(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let hsl = Hsl::new(hue, saturation, lightness);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| hsl_color(((i as f32 / n as f32) * 360.0 + 210.0) % 360.0, 0.75, 0.55))
        .collect()
}

/// Fixed colour per launch outcome: green for success, red for failure.
pub fn outcome_color(outcome: Outcome) -> Color32 {
    match outcome {
        Outcome::Success => hsl_color(140.0, 0.60, 0.45),
        Outcome::Failure => hsl_color(0.0, 0.70, 0.55),
    }
}

// ---------------------------------------------------------------------------
// Color mapping: slice label → Color32
// ---------------------------------------------------------------------------

/// Maps pie-slice labels to colours.
///
/// Launch sites get palette colours assigned once per dataset so a site keeps
/// its colour across redraws; "Success" / "Failed" use [`outcome_color`].
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map for the given launch sites.
    pub fn new(sites: &[String]) -> Self {
        let palette = generate_palette(sites.len());
        let mut mapping: BTreeMap<String, Color32> = sites
            .iter()
            .zip(palette)
            .map(|(site, c)| (site.clone(), c))
            .collect();
        for outcome in [Outcome::Success, Outcome::Failure] {
            mapping.insert(outcome.label().to_string(), outcome_color(outcome));
        }

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a slice label.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}
