use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Brand colours
// ---------------------------------------------------------------------------

pub const INDIGO: Color32 = Color32::from_rgb(0x66, 0x7e, 0xea);
pub const PURPLE: Color32 = Color32::from_rgb(0x76, 0x4b, 0xa2);
pub const CORAL: Color32 = Color32::from_rgb(0xff, 0x6b, 0x6b);
pub const TEAL: Color32 = Color32::from_rgb(0x4e, 0xcd, 0xc4);
pub const SUNFLOWER: Color32 = Color32::from_rgb(0xff, 0xd9, 0x3d);

/// Fixed palette used for chart series, in order.
pub const BRAND: [Color32; 5] = [INDIGO, PURPLE, CORAL, TEAL, SUNFLOWER];

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

/// `n` series colours: the brand palette first, generated hues after it.
pub fn series_colors(n: usize) -> Vec<Color32> {
    let extra = n.saturating_sub(BRAND.len());
    BRAND
        .iter()
        .copied()
        .chain(generate_palette(extra))
        .take(n)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_colors_start_with_brand() {
        assert_eq!(series_colors(3), vec![INDIGO, PURPLE, CORAL]);
        assert_eq!(series_colors(5), BRAND.to_vec());
        assert!(series_colors(0).is_empty());
    }

    #[test]
    fn test_series_colors_extend_past_brand() {
        let colors = series_colors(8);
        assert_eq!(colors.len(), 8);
        assert_eq!(&colors[..5], &BRAND);
        assert_eq!(&colors[5..], generate_palette(3).as_slice());
    }

    #[test]
    fn test_generate_palette_distinct() {
        let colors = generate_palette(6);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
