//! Trailing-edge debouncer for resize bursts.

use std::time::{Duration, Instant};

/// Coalesces a burst of events into one firing after a quiet period.
///
/// Each [`touch`](Self::touch) pushes the deadline out to `now + quiet`;
/// [`poll`](Self::poll) fires once the deadline passes and then disarms.
#[derive(Debug, Clone)]
pub struct ResizeDebouncer {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl ResizeDebouncer {
    /// Idle debouncer with the given quiet period.
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    /// Record an event and push the deadline out.
    pub fn touch(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    /// When the pending burst settles.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Whether a burst is waiting to settle.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// True once, when the deadline has passed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drop the pending burst.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(250);

    #[test]
    fn burst_fires_once_after_last_event() {
        let t0 = Instant::now();
        let mut d = ResizeDebouncer::new(QUIET);
        d.touch(t0);
        d.touch(t0 + Duration::from_millis(100));
        d.touch(t0 + Duration::from_millis(200));

        assert!(!d.poll(t0 + Duration::from_millis(300)));
        assert!(d.poll(t0 + Duration::from_millis(450)));
        assert!(!d.poll(t0 + Duration::from_millis(900)));
        assert!(!d.is_pending());
    }

    #[test]
    fn cancel_disarms() {
        let t0 = Instant::now();
        let mut d = ResizeDebouncer::new(QUIET);
        d.touch(t0);
        d.cancel();
        assert!(!d.poll(t0 + QUIET));
    }
}
