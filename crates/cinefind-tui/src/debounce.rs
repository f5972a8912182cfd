//! Quiet-window debouncer.
//!
//! Time is passed in explicitly so the event loop drives it from its tick
//! and tests can step through it without sleeping.

use std::time::{Duration, Instant};

/// Default quiet window for search input.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(600);

/// Collapses a burst of values into the last one after a quiet window.
#[derive(Debug, Clone)]
pub struct Debouncer {
    /// Quiet window.
    delay: Duration,
    /// Latest value and the instant it was scheduled.
    pending: Option<(String, Instant)>,
}

impl Debouncer {
    /// Creates a debouncer with the given quiet window.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedules `value`, replacing any pending value and restarting the window.
    pub fn schedule(&mut self, value: String, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Returns the pending value once its quiet window has elapsed.
    pub fn take_due(&mut self, now: Instant) -> Option<String> {
        let due = self
            .deadline()
            .is_some_and(|deadline| now >= deadline);
        if due {
            self.pending.take().map(|(value, _)| value)
        } else {
            None
        }
    }

    /// Returns when the pending value becomes due, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending
            .as_ref()
            .and_then(|(_, at)| at.checked_add(self.delay))
    }

    /// Returns `true` if a value is waiting.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
