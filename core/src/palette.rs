//! Cosine Palette Model
//!
//! A [`Palette`] is the four-parameter cosine color function
//! `color(x) = a + b * cos(2*pi * (c*x + d))`, evaluated per channel.
//! Evaluation is a pure function of the twelve coefficients and `x`;
//! callers clamp when rasterizing because offset plus amplitude can
//! leave the unit range.

use std::f64::consts::TAU;

use rand::Rng;
use thiserror::Error;

use crate::parameter::{Parameter, ShareCodeError};

/// Separator between the four parameter sections in a share code.
pub const PARAMETER_SEPARATOR: char = 'p';

/// Randomize range for the frequency parameter.
pub const FREQUENCY_RANGE: (f64, f64) = (0.0, 2.0);

/// Randomize range for the phase-shift parameter.
pub const SHIFT_RANGE: (f64, f64) = (0.0, 1.0);

/// Channel index outside `{0, 1, 2}`.
///
/// This is a contract violation by the caller, not a runtime condition,
/// so it carries the offending index and nothing else.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("invalid channel index {0} (expected 0, 1, or 2)")]
pub struct InvalidChannel(
    /// The offending channel index
    pub usize,
);

/// The cosine color function: four RGB parameter vectors.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Palette {
    /// Offset (vertical shift of the wave)
    pub a: Parameter,
    /// Amplitude
    pub b: Parameter,
    /// Frequency
    pub c: Parameter,
    /// Phase shift
    pub d: Parameter,
}

impl Palette {
    /// Create a palette from its four parameters.
    #[must_use]
    pub const fn new(a: Parameter, b: Parameter, c: Parameter, d: Parameter) -> Self {
        Self { a, b, c, d }
    }

    /// The all-zero palette used at startup before restore or randomize.
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(
            Parameter::zero(),
            Parameter::zero(),
            Parameter::zero(),
            Parameter::zero(),
        )
    }

    /// Evaluate one channel at position `x`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidChannel`] for any channel index outside `{0, 1, 2}`.
    pub fn channel(&self, x: f64, ch: usize) -> Result<f64, InvalidChannel> {
        let value = match ch {
            0 => self.a.r + self.b.r * (TAU * (self.c.r * x + self.d.r)).cos(),
            1 => self.a.g + self.b.g * (TAU * (self.c.g * x + self.d.g)).cos(),
            2 => self.a.b + self.b.b * (TAU * (self.c.b * x + self.d.b)).cos(),
            other => return Err(InvalidChannel(other)),
        };
        Ok(value)
    }

    /// Evaluate all three channels at position `x`.
    ///
    /// Returns raw, unclamped values; offset plus amplitude can exceed
    /// the unit range and the rasterizer clamps when scaling to 8-bit.
    #[must_use]
    pub fn color_at(&self, x: f64) -> [f64; 3] {
        [
            self.a.r + self.b.r * (TAU * (self.c.r * x + self.d.r)).cos(),
            self.a.g + self.b.g * (TAU * (self.c.g * x + self.d.g)).cos(),
            self.a.b + self.b.b * (TAU * (self.c.b * x + self.d.b)).cos(),
        ]
    }

    /// Randomize all four parameters.
    ///
    /// Offset and amplitude draw from the default `[-0.125, 1.125)`
    /// range; frequency from `[0, 2)` so the wave stays non-negative and
    /// low; phase shift from `[0, 1)` since it is periodic in that span.
    pub fn randomize(&mut self, rng: &mut impl Rng) {
        self.a.randomize(rng);
        self.b.randomize(rng);
        self.c
            .randomize_in(rng, FREQUENCY_RANGE.0, FREQUENCY_RANGE.1);
        self.d.randomize_in(rng, SHIFT_RANGE.0, SHIFT_RANGE.1);
    }

    /// A freshly randomized copy, leaving `self` untouched.
    #[must_use]
    pub fn randomized(&self, rng: &mut impl Rng) -> Self {
        let mut copy = *self;
        copy.randomize(rng);
        copy
    }

    /// Interpolate every coefficient between two palettes.
    #[must_use]
    pub fn lerp(source: &Self, target: &Self, t: f64) -> Self {
        Self {
            a: Parameter::lerp(&source.a, &target.a, t),
            b: Parameter::lerp(&source.b, &target.b, t),
            c: Parameter::lerp(&source.c, &target.c, t),
            d: Parameter::lerp(&source.d, &target.d, t),
        }
    }

    /// Encode as `"{a}p{b}p{c}p{d}"` with 3-decimal channel values.
    #[must_use]
    pub fn to_share(&self) -> String {
        format!(
            "{}{sep}{}{sep}{}{sep}{}",
            self.a.to_share(),
            self.b.to_share(),
            self.c.to_share(),
            self.d.to_share(),
            sep = PARAMETER_SEPARATOR
        )
    }

    /// Decode a palette from a share code.
    ///
    /// # Errors
    ///
    /// Returns [`ShareCodeError`] when the code does not hold exactly
    /// four parameter sections of three finite numbers each. Malformed
    /// codes never produce a palette with NaN coefficients.
    pub fn from_share(code: &str) -> Result<Self, ShareCodeError> {
        let sections: Vec<&str> = code.split(PARAMETER_SEPARATOR).collect();
        if sections.len() != 4 {
            return Err(ShareCodeError::ParameterCount(sections.len()));
        }

        Ok(Self::new(
            Parameter::from_share(sections[0])?,
            Parameter::from_share(sections[1])?,
            Parameter::from_share(sections[2])?,
            Parameter::from_share(sections[3])?,
        ))
    }
}
