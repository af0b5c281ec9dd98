//! Gradient Rasterization
//!
//! Turns a palette into a row of discrete RGBA samples plus the running
//! average color the theming layer derives its accent hue from. The
//! buffer is also the thing the sampler indexes into when the user
//! picks a color off the gradient.

use crate::color::Color;
use crate::palette::Palette;

/// Bytes per sample in the raster buffer (RGBA)
const BYTES_PER_SAMPLE: usize = 4;

/// A rasterized gradient: `width` RGBA samples plus their average.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GradientRaster {
    width: usize,
    /// RGBA bytes, `width * 4` long
    pixels: Vec<u8>,
    average: Option<Color>,
}

impl GradientRaster {
    /// Rasterize `palette` into `width` samples.
    ///
    /// Each sample evaluates the palette at `x / width`, clamps to the
    /// unit range, and scales to 8-bit. Alpha is always 255. A zero
    /// width yields an empty raster with no average.
    #[must_use]
    pub fn render(palette: &Palette, width: usize) -> Self {
        let mut pixels = Vec::with_capacity(width * BYTES_PER_SAMPLE);
        let mut sum = [0.0f64; 3];

        for x in 0..width {
            let u = x as f64 / width as f64;
            let raw = palette.color_at(u);
            let color = Color::from_unit(raw[0], raw[1], raw[2]);

            sum[0] += f64::from(color.r);
            sum[1] += f64::from(color.g);
            sum[2] += f64::from(color.b);

            pixels.extend_from_slice(&[color.r, color.g, color.b, 255]);
        }

        let average = (width > 0).then(|| {
            let n = width as f64;
            Color::rgb(
                (sum[0] / n).round() as u8,
                (sum[1] / n).round() as u8,
                (sum[2] / n).round() as u8,
            )
        });

        Self {
            width,
            pixels,
            average,
        }
    }

    /// Number of samples in the raster.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// The raw RGBA byte buffer.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The sample at index `x`, if in range.
    #[must_use]
    pub fn pixel(&self, x: usize) -> Option<Color> {
        if x >= self.width {
            return None;
        }
        let off = x * BYTES_PER_SAMPLE;
        Some(Color::rgb(
            self.pixels[off],
            self.pixels[off + 1],
            self.pixels[off + 2],
        ))
    }

    /// Sample at a fractional position `u` in `[0, 1)`.
    ///
    /// This is the click path: a viewport coordinate divided by the
    /// viewport width lands here and indexes `floor(u * width)`.
    #[must_use]
    pub fn sample(&self, u: f64) -> Option<Color> {
        if !(0.0..1.0).contains(&u) {
            return None;
        }
        self.pixel((u * self.width as f64).floor() as usize)
    }

    /// Average color over all samples, `None` for an empty raster.
    #[must_use]
    pub const fn average(&self) -> Option<Color> {
        self.average
    }

    /// Hue of the average color, in degrees.
    #[must_use]
    pub fn average_hue(&self) -> Option<f64> {
        self.average.map(|c| c.hue())
    }
}
