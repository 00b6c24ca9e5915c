use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Categorical palette (pie slices)
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

// ---------------------------------------------------------------------------
// Sequential scale (choropleth)
// ---------------------------------------------------------------------------

/// Stops of a plasma-like scale, dark purple → yellow.
const PLASMA_STOPS: [(f32, f32, f32); 5] = [
    (0.050, 0.030, 0.528),
    (0.494, 0.012, 0.658),
    (0.798, 0.280, 0.470),
    (0.973, 0.585, 0.253),
    (0.940, 0.975, 0.131),
];

/// Colour at position `t` (clamped to 0..=1) of the sequential scale.
pub fn sequential(t: f64) -> Color32 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) } as f32;
    let segments = (PLASMA_STOPS.len() - 1) as f32;
    let pos = t * segments;
    let idx = (pos.floor() as usize).min(PLASMA_STOPS.len() - 2);
    let local = pos - idx as f32;

    let (r0, g0, b0) = PLASMA_STOPS[idx];
    let (r1, g1, b1) = PLASMA_STOPS[idx + 1];
    let a: LinSrgb = Srgb::new(r0, g0, b0).into_linear();
    let b: LinSrgb = Srgb::new(r1, g1, b1).into_linear();
    let mixed: Srgb = Srgb::from_linear(a.mix(b, local));
    to_color32(mixed)
}

/// Same colour with the given opacity (0..=1).
pub fn with_alpha(color: Color32, alpha: f32) -> Color32 {
    let a = (alpha.clamp(0.0, 1.0) * 255.0) as u8;
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), a)
}

fn to_color32(rgb: Srgb) -> Color32 {
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_size_and_distinctness() {
        assert!(generate_palette(0).is_empty());
        let colors = generate_palette(6);
        assert_eq!(colors.len(), 6);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_sequential_endpoints() {
        let low = sequential(0.0);
        let high = sequential(1.0);
        assert!(low.b() > low.r(), "low end is purple/blue");
        assert!(high.r() > high.b() && high.g() > high.b(), "high end is yellow");
        assert_eq!(sequential(-3.0), low);
        assert_eq!(sequential(7.0), high);
        assert_eq!(sequential(f64::NAN), low);
    }

    #[test]
    fn test_with_alpha() {
        let c = with_alpha(Color32::from_rgb(10, 20, 30), 0.0);
        assert_eq!(c.a(), 0);
    }
}
