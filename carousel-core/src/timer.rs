//! Deadline-based auto-advance timer
//!
//! The timer never reads the clock. Callers pass `now` in, and the host
//! sleeps until [`AutoAdvanceTimer::deadline`]. At most one timer is live at
//! any moment: it is a single optional deadline, not a list of callbacks.

use std::time::{Duration, Instant};

/// Identifies one live timer. A fresh handle is issued on every start from
/// the stopped state; a redundant start returns the live handle unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

impl TimerHandle {
    /// Monotonic id, unique per controller.
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Single-deadline auto-advance timer.
#[derive(Debug, Clone)]
pub struct AutoAdvanceTimer {
    interval: Duration,
    live: Option<(TimerHandle, Instant)>,
    next_id: u64,
}

impl AutoAdvanceTimer {
    /// Stopped timer with the given cadence.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            live: None,
            next_id: 1,
        }
    }

    /// Cadence between ticks.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether a deadline is armed.
    pub fn is_running(&self) -> bool {
        self.live.is_some()
    }

    /// Handle of the live timer.
    pub fn handle(&self) -> Option<TimerHandle> {
        self.live.map(|(handle, _)| handle)
    }

    /// Next instant at which [`poll`](Self::poll) will fire.
    pub fn deadline(&self) -> Option<Instant> {
        self.live.map(|(_, deadline)| deadline)
    }

    /// Start the timer. Idempotent: a running timer keeps its handle and
    /// its current countdown.
    pub fn start(&mut self, now: Instant) -> TimerHandle {
        if let Some((handle, _)) = self.live {
            return handle;
        }
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.live = Some((handle, now + self.interval));
        handle
    }

    /// Cancel the live timer. Returns the handle that was cancelled, if any.
    pub fn stop(&mut self) -> Option<TimerHandle> {
        self.live.take().map(|(handle, _)| handle)
    }

    /// Stop then start: the countdown restarts from zero under a new handle.
    pub fn restart(&mut self, now: Instant) -> TimerHandle {
        self.stop();
        self.start(now)
    }

    /// Returns true when the deadline has passed, and schedules the next
    /// deadline one full interval after `now`. Missed ticks are delayed, not
    /// replayed, so a late poll fires once.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.live {
            Some((handle, deadline)) if now >= deadline => {
                self.live = Some((handle, now + self.interval));
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(5_000);

    #[test]
    fn start_twice_keeps_one_timer() {
        let t0 = Instant::now();
        let mut timer = AutoAdvanceTimer::new(INTERVAL);
        let first = timer.start(t0);
        let second = timer.start(t0 + Duration::from_millis(1_000));
        assert_eq!(first, second);
        assert_eq!(timer.deadline(), Some(t0 + INTERVAL));
    }

    #[test]
    fn poll_fires_once_per_interval() {
        let t0 = Instant::now();
        let mut timer = AutoAdvanceTimer::new(INTERVAL);
        timer.start(t0);
        assert!(!timer.poll(t0 + INTERVAL - Duration::from_millis(1)));
        assert!(timer.poll(t0 + INTERVAL));
        assert!(!timer.poll(t0 + INTERVAL));
        assert_eq!(timer.deadline(), Some(t0 + INTERVAL * 2));
    }

    #[test]
    fn late_poll_does_not_replay_missed_ticks() {
        let t0 = Instant::now();
        let mut timer = AutoAdvanceTimer::new(INTERVAL);
        timer.start(t0);
        let late = t0 + INTERVAL * 3;
        assert!(timer.poll(late));
        assert!(!timer.poll(late));
        assert_eq!(timer.deadline(), Some(late + INTERVAL));
    }

    #[test]
    fn stop_is_idempotent() {
        let t0 = Instant::now();
        let mut timer = AutoAdvanceTimer::new(INTERVAL);
        assert_eq!(timer.stop(), None);
        let handle = timer.start(t0);
        assert_eq!(timer.stop(), Some(handle));
        assert_eq!(timer.stop(), None);
        assert!(!timer.poll(t0 + INTERVAL * 10));
    }

    #[test]
    fn restart_resets_countdown_with_new_handle() {
        let t0 = Instant::now();
        let mut timer = AutoAdvanceTimer::new(INTERVAL);
        let first = timer.start(t0);
        let later = t0 + Duration::from_millis(4_000);
        let second = timer.restart(later);
        assert_ne!(first, second);
        assert_eq!(timer.deadline(), Some(later + INTERVAL));
    }
}
