//! Palette Parameters
//!
//! A [`Parameter`] is one of the four coefficient vectors of the cosine
//! palette formula: a triple of real values, one per RGB channel. The
//! same type serves as offset (A), amplitude (B), frequency (C), and
//! phase shift (D) depending on which palette slot holds it.

use rand::Rng;
use thiserror::Error;

/// Default lower bound for randomized offset/amplitude parameters.
pub const RANDOM_MIN: f64 = -0.125;

/// Default upper bound for randomized offset/amplitude parameters.
pub const RANDOM_MAX: f64 = 1.125;

/// Separator between the three channel values in a share code.
pub const CHANNEL_SEPARATOR: char = 'c';

/// Errors produced while decoding a share code.
///
/// The encoder emits exactly three `c`-separated numbers per parameter
/// and four `p`-separated parameters per palette, each number with
/// three fractional digits. Decoding is lenient about the digit count
/// but strict about arity and finiteness, so malformed input never
/// leaks NaN into evaluation.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ShareCodeError {
    /// A parameter section did not contain exactly three channel values.
    #[error("expected 3 channel values, found {0}")]
    ChannelCount(usize),

    /// The palette section did not contain exactly four parameters.
    #[error("expected 4 parameters, found {0}")]
    ParameterCount(usize),

    /// A channel value failed to parse as a floating point literal.
    #[error("invalid number {value:?}")]
    InvalidNumber {
        /// The offending token.
        value: String,
    },

    /// A channel value parsed but is not a finite number.
    #[error("non-finite channel value {value:?}")]
    NonFinite {
        /// The offending token.
        value: String,
    },
}

/// One coefficient vector of the palette: a value per RGB channel.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Parameter {
    /// Red-channel coefficient
    pub r: f64,
    /// Green-channel coefficient
    pub g: f64,
    /// Blue-channel coefficient
    pub b: f64,
}

impl Parameter {
    /// Create a parameter from explicit channel coefficients.
    #[must_use]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// The all-zero parameter (startup value before restore/randomize).
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Draw each channel independently and uniformly from `[from, to)`.
    pub fn randomize_in(&mut self, rng: &mut impl Rng, from: f64, to: f64) {
        self.r = rng.gen_range(from..to);
        self.g = rng.gen_range(from..to);
        self.b = rng.gen_range(from..to);
    }

    /// Randomize over the default offset/amplitude range `[-0.125, 1.125)`.
    pub fn randomize(&mut self, rng: &mut impl Rng) {
        self.randomize_in(rng, RANDOM_MIN, RANDOM_MAX);
    }

    /// Linear interpolation between two parameters, per channel.
    #[must_use]
    pub fn lerp(source: &Self, target: &Self, t: f64) -> Self {
        Self {
            r: crate::easing::lerp(source.r, target.r, t),
            g: crate::easing::lerp(source.g, target.g, t),
            b: crate::easing::lerp(source.b, target.b, t),
        }
    }

    /// Encode as `"{r:.3}c{g:.3}c{b:.3}"`.
    ///
    /// The three-decimal rounding is the precision contract of the share
    /// code: round trips reproduce values to within 5e-4.
    #[must_use]
    pub fn to_share(&self) -> String {
        format!(
            "{:.3}{sep}{:.3}{sep}{:.3}",
            self.r,
            self.g,
            self.b,
            sep = CHANNEL_SEPARATOR
        )
    }

    /// Decode a parameter from its share-code section.
    ///
    /// # Errors
    ///
    /// Returns [`ShareCodeError`] when the section does not hold exactly
    /// three parsable, finite numbers.
    pub fn from_share(section: &str) -> Result<Self, ShareCodeError> {
        let parts: Vec<&str> = section.split(CHANNEL_SEPARATOR).collect();
        if parts.len() != 3 {
            return Err(ShareCodeError::ChannelCount(parts.len()));
        }

        let mut channels = [0.0f64; 3];
        for (slot, part) in channels.iter_mut().zip(&parts) {
            let value: f64 = part.parse().map_err(|_| ShareCodeError::InvalidNumber {
                value: (*part).to_string(),
            })?;
            if !value.is_finite() {
                return Err(ShareCodeError::NonFinite {
                    value: (*part).to_string(),
                });
            }
            *slot = value;
        }

        Ok(Self::new(channels[0], channels[1], channels[2]))
    }
}
