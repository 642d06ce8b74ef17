use std::collections::HashMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color mapping: student name → Color32
// ---------------------------------------------------------------------------

/// Hue step between consecutive students (the golden angle), so neighbours
/// in the roster never share a hue however many students there are.
const HUE_STEP: f32 = 137.508;

/// Assigns each student one colour for the lifetime of the dashboard, so a
/// student keeps the same bar colour whichever subject is selected.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: HashMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map from the student roster (first-occurrence order).
    pub fn new(students: &[String]) -> Self {
        let mapping = students
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), roster_color(i)))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, student: &str) -> Color32 {
        self.mapping
            .get(student)
            .copied()
            .unwrap_or(self.default_color)
    }
}

fn roster_color(position: usize) -> Color32 {
    let hue = (position as f32 * HUE_STEP) % 360.0;
    let rgb: Srgb = Hsl::new(hue, 0.65, 0.5).into_color();
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}
