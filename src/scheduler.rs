//! Timers for the tick loop and the settings debounce.
//!
//! Portable timing without async or platform-specific timers: the caller
//! passes the current time to `poll` and sleeps until the returned deadline.

use embassy_time::{Duration, Instant};

/// Period of the animation tick and of the overlay fade
pub const TICK_PERIOD: Duration = Duration::from_millis(25);

/// Default quiet interval before settings are written
pub const DEFAULT_SAVE_DEBOUNCE: Duration = Duration::from_millis(60_000);

/// Repeating timer
///
/// Expires immediately when started, then once per period. If the caller
/// falls more than two periods behind, the backlog is skipped instead of
/// replayed.
#[derive(Debug, Clone, Copy)]
pub struct PeriodicTimer {
    period: Duration,
    next: Option<Instant>,
}

impl PeriodicTimer {
    pub const fn new(period: Duration) -> Self {
        Self { period, next: None }
    }

    /// Start or restart the timer
    pub fn start(&mut self, now: Instant) {
        self.next = Some(now);
    }

    pub fn stop(&mut self) {
        self.next = None;
    }

    pub const fn is_running(&self) -> bool {
        self.next.is_some()
    }

    /// Next expiry, if running
    pub const fn deadline(&self) -> Option<Instant> {
        self.next
    }

    /// Check for expiry. Returns `true` at most once per call.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(mut next) = self.next else {
            return false;
        };
        if now < next {
            return false;
        }

        let max_drift = self.period.as_millis() * 2;
        if now.as_millis() > next.as_millis() + max_drift {
            next = now;
        }
        self.next = Some(next + self.period);
        true
    }
}

/// Delayed one-shot that is pushed back on every reschedule
///
/// Bursts of requests collapse into one expiry after `delay` of quiet.
#[derive(Debug, Clone, Copy)]
pub struct SaveDebouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl SaveDebouncer {
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Schedule, or reschedule if already pending
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns `true` once when the deadline has passed
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Timing information returned by a poll
#[derive(Debug, Clone, Copy)]
pub struct PollResult {
    /// Earliest pending deadline, `None` when nothing is scheduled
    pub next_deadline: Option<Instant>,
    /// How long the caller may sleep (zero if a deadline already passed)
    pub sleep_duration: Option<Duration>,
}

impl PollResult {
    pub(crate) fn new(now: Instant, deadlines: &[Option<Instant>]) -> Self {
        let next_deadline = deadlines.iter().flatten().min().copied();
        let sleep_duration = next_deadline.map(|deadline| {
            if deadline.as_millis() > now.as_millis() {
                Duration::from_millis(deadline.as_millis() - now.as_millis())
            } else {
                Duration::from_millis(0)
            }
        });
        Self {
            next_deadline,
            sleep_duration,
        }
    }
}
