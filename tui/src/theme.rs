//! Theme and Colors
//!
//! Fixed chrome colors for the UI plus the dynamic accent derived from
//! the rendered gradient: the hue opposite the gradient's average color,
//! so the accent always contrasts with whatever palette is on screen.

use ratatui::style::Color;

// ============================================================================
// Chrome
// ============================================================================

/// Default foreground for labels and values
pub const TEXT: Color = Color::Rgb(220, 220, 220);

/// Dim text for hints and separators
pub const DIM_GRAY: Color = Color::Rgb(100, 100, 100);

/// Selected-cell highlight background
pub const SELECTION_BG: Color = Color::Rgb(60, 60, 90);

/// Plot colors for the three channel curves
pub const CURVE_RED: Color = Color::Rgb(255, 90, 90);
/// Green channel curve
pub const CURVE_GREEN: Color = Color::Rgb(90, 220, 90);
/// Blue channel curve
pub const CURVE_BLUE: Color = Color::Rgb(110, 140, 255);

// ============================================================================
// Dynamic Accent
// ============================================================================

/// Accent color complementary to the gradient's average hue.
///
/// Takes the average hue, rotates it 180 degrees, and rebuilds a
/// saturated midtone from it. Falls back to plain white when the
/// gradient is gray (no meaningful hue).
#[must_use]
pub fn complement_accent(average_hue: Option<f64>) -> Color {
    match average_hue {
        Some(hue) => {
            let c = cospal_core::Color::from_hsl((hue + 180.0).rem_euclid(360.0), 0.6, 0.55);
            Color::Rgb(c.r, c.g, c.b)
        }
        None => Color::White,
    }
}
