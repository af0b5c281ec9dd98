//! Quiescence Timer
//!
//! Persistence is debounced: every palette change resets a pending
//! deadline and the save fires only once no further change has arrived
//! for the full delay. Time is injected so the event loop decides when
//! "now" is and tests can step it manually.

use std::time::{Duration, Instant};

/// Default quiescence delay before a pending save fires
pub const PERSIST_DELAY: Duration = Duration::from_millis(500);

/// Reset-on-event, fire-once-after-quiescence timer.
#[derive(Clone, Copy, Debug)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(PERSIST_DELAY)
    }
}

impl Debouncer {
    /// Create a debouncer with the given quiescence delay.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Record an event at `now`, (re)arming the deadline.
    pub fn poke(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Check whether the quiescence period has elapsed at `now`.
    ///
    /// Returns `true` at most once per armed deadline and disarms the
    /// timer when it does.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Whether a save is pending.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Drop any pending deadline without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_after_delay() {
        let mut debouncer = Debouncer::new(Duration::from_millis(500));
        let t0 = Instant::now();

        debouncer.poke(t0);
        assert!(!debouncer.fire(t0 + Duration::from_millis(499)));
        assert!(debouncer.fire(t0 + Duration::from_millis(500)));
        // disarmed after firing
        assert!(!debouncer.fire(t0 + Duration::from_millis(501)));
        assert!(!debouncer.is_armed());
    }

    #[test]
    fn test_poke_resets_pending_deadline() {
        let mut debouncer = Debouncer::new(Duration::from_millis(500));
        let t0 = Instant::now();

        debouncer.poke(t0);
        debouncer.poke(t0 + Duration::from_millis(400));
        // 500ms after the first poke is only 100ms after the second
        assert!(!debouncer.fire(t0 + Duration::from_millis(500)));
        assert!(debouncer.fire(t0 + Duration::from_millis(900)));
    }

    #[test]
    fn test_unarmed_never_fires() {
        let mut debouncer = Debouncer::default();
        assert!(!debouncer.fire(Instant::now() + Duration::from_secs(60)));
    }

    #[test]
    fn test_cancel() {
        let mut debouncer = Debouncer::default();
        let t0 = Instant::now();
        debouncer.poke(t0);
        debouncer.cancel();
        assert!(!debouncer.fire(t0 + Duration::from_secs(1)));
    }
}
