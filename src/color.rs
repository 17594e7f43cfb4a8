use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

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

// ---------------------------------------------------------------------------
// Color mapping: category → Color32
// ---------------------------------------------------------------------------

/// Fixed colours for every value of a categorical column.
///
/// The palette is built over the whole domain, not the values currently on
/// screen, so a category keeps its colour while filters change.
#[derive(Debug, Clone)]
pub struct CategoryColors<T> {
    mapping: Vec<(T, Color32)>,
    default_color: Color32,
}

impl<T: Copy + PartialEq> CategoryColors<T> {
    pub fn new(domain: &[T]) -> Self {
        let mapping = domain
            .iter()
            .copied()
            .zip(generate_palette(domain.len()))
            .collect();
        CategoryColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a category.
    pub fn color_for(&self, value: T) -> Color32 {
        self.mapping
            .iter()
            .find(|(v, _)| *v == value)
            .map(|(_, c)| *c)
            .unwrap_or(self.default_color)
    }
}
