use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::charts::CategoryOrder;

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
            let hue = (i as f32 / n as f32) * 300.0;
            let hsl = Hsl::new(hue, 0.65, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Bar colours: category → Color32
// ---------------------------------------------------------------------------

/// Colours for the bars of one chart.
///
/// Fixed axes colour each category by its position so a category keeps its
/// colour as filters change. Long axes (time buckets) and free-form axes use
/// a single colour.
#[derive(Debug, Clone)]
pub struct BarColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

/// Axes longer than this are drawn in one colour.
const MAX_DISTINCT: usize = 12;

impl BarColors {
    pub fn for_order(order: &CategoryOrder) -> Self {
        let default_color = Color32::from_rgb(99, 140, 210);
        let mapping = match order {
            CategoryOrder::Fixed(cats) if cats.len() <= MAX_DISTINCT => cats
                .iter()
                .cloned()
                .zip(generate_palette(cats.len()))
                .collect(),
            _ => BTreeMap::new(),
        };
        BarColors {
            mapping,
            default_color,
        }
    }

    pub fn color_for(&self, category: &str) -> Color32 {
        self.mapping
            .get(category)
            .copied()
            .unwrap_or(self.default_color)
    }
}
