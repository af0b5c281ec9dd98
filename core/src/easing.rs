//! Animation Timing
//!
//! Easing functions and scalar interpolation used by the randomize
//! transition. Progress values are frame-rate independent: callers feed
//! in elapsed/duration ratios and get remapped values back.

use serde::{Deserialize, Serialize};

/// Easing functions for smooth animation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum EasingFunction {
    /// No easing (constant speed)
    Linear,

    /// Slow start, fast end
    EaseIn,

    /// Fast start, slow end
    EaseOut,

    /// Slow start and end
    #[default]
    EaseInOut,
}

impl EasingFunction {
    /// Apply the easing function to a progress value (0.0 to 1.0)
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => 1.0 - (1.0 - t).powi(2),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// Linear interpolation: `a` at `t == 0`, `b` at `t == 1`.
#[must_use]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_endpoints() {
        for easing in [
            EasingFunction::Linear,
            EasingFunction::EaseIn,
            EasingFunction::EaseOut,
            EasingFunction::EaseInOut,
        ] {
            assert!(easing.apply(0.0).abs() < 1e-12, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-12, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_easing_clamps_out_of_range_input() {
        assert_eq!(EasingFunction::EaseInOut.apply(-0.5), 0.0);
        assert_eq!(EasingFunction::EaseInOut.apply(1.5), 1.0);
    }

    #[test]
    fn test_ease_in_out_midpoint_and_shape() {
        let easing = EasingFunction::EaseInOut;
        assert!((easing.apply(0.5) - 0.5).abs() < 1e-12);
        // Slow start: below the diagonal in the first half
        assert!(easing.apply(0.25) < 0.25);
        // Slow end: above the diagonal in the second half
        assert!(easing.apply(0.75) > 0.75);
    }

    #[test]
    fn test_easing_monotonic() {
        for easing in [
            EasingFunction::Linear,
            EasingFunction::EaseIn,
            EasingFunction::EaseOut,
            EasingFunction::EaseInOut,
        ] {
            let mut prev = easing.apply(0.0);
            for i in 1..=100 {
                let next = easing.apply(f64::from(i) / 100.0);
                assert!(next >= prev, "{easing:?} not monotonic at step {i}");
                prev = next;
            }
        }
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.0), 0.0);
        assert_eq!(lerp(0.0, 10.0, 1.0), 10.0);
        assert!((lerp(2.0, 4.0, 0.5) - 3.0).abs() < 1e-12);
        assert!((lerp(4.0, 2.0, 0.25) - 3.5).abs() < 1e-12);
    }
}
