//! Color utilities for formations and the terminal renderer.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// A 24-bit packed RGB color (`0xRRGGBB`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgb(pub u32);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0x000000);
    pub const WHITE: Rgb = Rgb(0xFFFFFF);

    /// Build a packed color from its channels.
    pub const fn from_channels(r: u8, g: u8, b: u8) -> Self {
        Rgb(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Split into `(r, g, b)`. Bits above the low 24 are ignored.
    pub const fn channels(self) -> (u8, u8, u8) {
        (
            ((self.0 >> 16) & 0xFF) as u8,
            ((self.0 >> 8) & 0xFF) as u8,
            (self.0 & 0xFF) as u8,
        )
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        let (r, g, b) = rgb.channels();
        Color::Rgb(r, g, b)
    }
}

/// Map a particle speed ratio (0.0-1.0) to a color from cool blue to warm red.
///
/// Used for particles that carry no formation color while dispersed.
pub fn speed_to_color(value: f32) -> Color {
    let value = if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    };

    // Hue: 240 (blue) -> 60 (yellow) -> 0 (red)
    let hue = 240.0 - (value * 240.0);

    // Faster = more saturated and brighter
    let saturation = 0.5 + (value * 0.5);
    let lightness = 0.25 + (value * 0.3);

    hsl_to_rgb(hue, saturation, lightness).into()
}

/// Convert HSL (hue in degrees, saturation and lightness in 0.0-1.0) to a
/// packed color. Hue wraps around.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Rgb {
    let sector = h.rem_euclid(360.0) / 60.0;
    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());

    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    let m = l - chroma / 2.0;
    let channel = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgb::from_channels(channel(r), channel(g), channel(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channels_round_trip() {
        let c = Rgb::from_channels(0x12, 0x34, 0x56);
        assert_eq!(c, Rgb(0x123456));
        assert_eq!(c.channels(), (0x12, 0x34, 0x56));
        assert_eq!(Color::from(c), Color::Rgb(0x12, 0x34, 0x56));
    }

    #[test]
    fn test_channels_ignore_high_bits() {
        assert_eq!(Rgb(0xFF00_0000).channels(), (0, 0, 0));
    }

    #[test]
    fn test_grayscale_when_unsaturated() {
        assert_eq!(hsl_to_rgb(120.0, 0.0, 0.5), Rgb(0x808080));
        assert_eq!(hsl_to_rgb(0.0, 0.0, 0.0), Rgb::BLACK);
        assert_eq!(hsl_to_rgb(0.0, 0.0, 1.0), Rgb::WHITE);
    }

    #[test]
    fn test_primary_hues() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), Rgb(0xFF0000));
        assert_eq!(hsl_to_rgb(120.0, 1.0, 0.5), Rgb(0x00FF00));
        assert_eq!(hsl_to_rgb(240.0, 1.0, 0.5), Rgb(0x0000FF));
        assert_eq!(hsl_to_rgb(60.0, 1.0, 0.5), Rgb(0xFFFF00));
        // Wraps
        assert_eq!(hsl_to_rgb(360.0, 1.0, 0.5), Rgb(0xFF0000));
        assert_eq!(hsl_to_rgb(-120.0, 1.0, 0.5), Rgb(0x0000FF));
    }

    #[test]
    fn test_speed_color_extremes() {
        // Slow particles are blue-dominant, fast ones red-dominant
        let Color::Rgb(r, _, b) = speed_to_color(0.0) else {
            panic!("expected rgb");
        };
        assert!(b > r);
        let Color::Rgb(r, _, b) = speed_to_color(1.0) else {
            panic!("expected rgb");
        };
        assert!(r > b);
        assert_eq!(speed_to_color(f32::NAN), speed_to_color(0.0));
    }
}
