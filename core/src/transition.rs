//! Randomize Transition
//!
//! One-shot animated blend from the current palette to a freshly
//! randomized target. Timestamps are injected by the caller's frame
//! loop rather than read internally, which keeps the blend math pure
//! and lets tests drive time explicitly.

use std::time::{Duration, Instant};

use rand::Rng;

use crate::easing::EasingFunction;
use crate::palette::Palette;

/// Duration of the randomize animation
pub const RANDOMIZE_DURATION: Duration = Duration::from_millis(500);

/// An in-flight randomize animation.
///
/// Captures source and target snapshots at creation; each tick blends
/// the twelve coefficients between them with an eased progress value.
/// Not reentrant: the owner keeps at most one alive and ignores new
/// randomize requests until [`is_complete`](Self::is_complete).
#[derive(Clone, Debug)]
pub struct RandomizeTransition {
    source: Palette,
    target: Palette,
    start: Instant,
    duration: Duration,
    easing: EasingFunction,
}

impl RandomizeTransition {
    /// Start a transition from `current` toward a randomized target.
    pub fn new(current: &Palette, rng: &mut impl Rng, now: Instant) -> Self {
        Self {
            source: *current,
            target: current.randomized(rng),
            start: now,
            duration: RANDOMIZE_DURATION,
            easing: EasingFunction::EaseInOut,
        }
    }

    /// Start a transition toward an explicit target palette.
    pub fn toward(current: &Palette, target: Palette, now: Instant) -> Self {
        Self {
            source: *current,
            target,
            start: now,
            duration: RANDOMIZE_DURATION,
            easing: EasingFunction::EaseInOut,
        }
    }

    /// Override the default duration and easing (from configuration).
    #[must_use]
    pub const fn with_timing(mut self, duration: Duration, easing: EasingFunction) -> Self {
        self.duration = duration;
        self.easing = easing;
        self
    }

    /// The palette this transition is heading to.
    #[must_use]
    pub const fn target(&self) -> &Palette {
        &self.target
    }

    /// Raw progress in `[0, 1]` at time `now`.
    #[must_use]
    pub fn progress(&self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Whether the transition has run its full duration at `now`.
    #[must_use]
    pub fn is_complete(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.duration
    }

    /// The blended palette at time `now`.
    ///
    /// At or past the full duration this returns the target exactly
    /// (progress clamps to 1 and eased(1) is 1).
    #[must_use]
    pub fn palette_at(&self, now: Instant) -> Palette {
        let eased = self.easing.apply(self.progress(now));
        Palette::lerp(&self.source, &self.target, eased)
    }
}
