//! Trailing-edge debouncing for bursty inputs such as window resizes.
//!
//! Each trigger replaces the pending value and pushes the deadline out by the
//! full delay. The value is released once, when [`Debouncer::poll`] is called
//! at or after the deadline. Time is passed in by the caller so the engine
//! and its tests share one clock.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Record a new value; restarts the delay.
    pub fn trigger(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    /// Whether a value is waiting to be released.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value will be released, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at)
    }

    /// Release the latest value if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => self.pending.take().map(|(v, _)| v),
            _ => None,
        }
    }

    /// Drop the pending value without releasing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_single_trigger_fires_after_delay() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(100 * MS);
        d.trigger(1, t0);

        assert_eq!(d.poll(t0 + 99 * MS), None);
        assert_eq!(d.poll(t0 + 100 * MS), Some(1));
        assert_eq!(d.poll(t0 + 200 * MS), None);
        assert!(!d.is_pending());
    }

    #[test]
    fn test_burst_coalesces_to_latest() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(100 * MS);
        d.trigger((800, 600), t0);
        d.trigger((900, 600), t0 + 30 * MS);
        d.trigger((1000, 700), t0 + 60 * MS);

        // Deadline moved to t0 + 160ms.
        assert_eq!(d.poll(t0 + 120 * MS), None);
        assert_eq!(d.deadline(), Some(t0 + 160 * MS));
        assert_eq!(d.poll(t0 + 160 * MS), Some((1000, 700)));
        assert_eq!(d.poll(t0 + 500 * MS), None);
    }

    #[test]
    fn test_cancel() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(10 * MS);
        d.trigger("x", t0);
        d.cancel();
        assert_eq!(d.poll(t0 + 50 * MS), None);
    }
}
