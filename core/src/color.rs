//! Color Type
//!
//! Discrete 8-bit RGB colors produced by rasterizing the palette, with
//! the string representations the UI cycles through (hex, rgb, hsl) and
//! the HSL conversions the theming layer needs.

use serde::{Deserialize, Serialize};

/// An RGB color with values 0-255 per channel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

/// Display format for a sampled color's string representation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorFormat {
    /// `#rrggbb`
    #[default]
    Hex,
    /// `rgb(r, g, b)`
    Rgb,
    /// `hsl(h, s%, l%)`
    Hsl,
}

impl ColorFormat {
    /// The next format in the hex → rgb → hsl cycle.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Hex => Self::Rgb,
            Self::Rgb => Self::Hsl,
            Self::Hsl => Self::Hex,
        }
    }
}

impl Color {
    /// Create a new RGB color
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from unit-range channel values.
    ///
    /// Values outside `[0, 1]` are clamped; the palette formula is
    /// unclamped and can overshoot when amplitude plus offset exceeds 1.
    #[must_use]
    pub fn from_unit(r: f64, g: f64, b: f64) -> Self {
        let scale = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::rgb(scale(r), scale(g), scale(b))
    }

    /// Format as a hex string like `#ff8800`
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Format as `rgb(r, g, b)`
    #[must_use]
    pub fn to_rgb_string(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    /// Format as `hsl(h, s%, l%)` with integer components
    #[must_use]
    pub fn to_hsl_string(&self) -> String {
        let (h, s, l) = self.to_hsl();
        format!(
            "hsl({}, {}%, {}%)",
            h.round() as u16,
            (s * 100.0).round() as u8,
            (l * 100.0).round() as u8
        )
    }

    /// Format in the given display format
    #[must_use]
    pub fn format(&self, format: ColorFormat) -> String {
        match format {
            ColorFormat::Hex => self.to_hex(),
            ColorFormat::Rgb => self.to_rgb_string(),
            ColorFormat::Hsl => self.to_hsl_string(),
        }
    }

    /// Convert to HSL: hue in degrees `[0, 360)`, saturation and
    /// lightness in `[0, 1]`.
    #[must_use]
    pub fn to_hsl(&self) -> (f64, f64, f64) {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;
        let l = (max + min) / 2.0;

        if delta < f64::EPSILON {
            return (0.0, 0.0, l);
        }

        let s = delta / (1.0 - (2.0 * l - 1.0).abs());
        let h = if (max - r).abs() < f64::EPSILON {
            60.0 * (((g - b) / delta).rem_euclid(6.0))
        } else if (max - g).abs() < f64::EPSILON {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };

        (h.rem_euclid(360.0), s, l)
    }

    /// The hue component alone, in degrees `[0, 360)`
    #[must_use]
    pub fn hue(&self) -> f64 {
        self.to_hsl().0
    }

    /// Build a color from HSL components (hue in degrees, s/l in `[0, 1]`)
    #[must_use]
    pub fn from_hsl(h: f64, s: f64, l: f64) -> Self {
        let h = h.rem_euclid(360.0);
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match (h / 60.0) as u8 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Self::from_unit(r + m, g + m, b + m)
    }

    /// Linear interpolation between two colors
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| {
            (f64::from(a) * (1.0 - t) + f64::from(b) * t).round() as u8
        };
        Self::rgb(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
        )
    }
}
