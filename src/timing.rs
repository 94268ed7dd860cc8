//! Rate-limiting primitives: trailing-edge debounce and leading-edge throttle.
//!
//! DESIGN
//! ======
//! Neither type owns a real timer. Each holds exactly one timer slot (a
//! deadline plus the arguments to deliver) and the owner drives it:
//! `call(args, now)` arms or replaces the slot, `poll(now)` fires it once the
//! deadline has passed, and `next_deadline()` tells an event loop how long it
//! may sleep. Re-arming overwrites the slot, so timers can never stack.
//!
//! Time is always passed in explicitly, which keeps the behavior
//! deterministic under test and lets a host use any clock it likes.

#[cfg(test)]
#[path = "timing_test.rs"]
mod timing_test;

use std::time::{Duration, Instant};

// =============================================================================
// DEBOUNCE
// =============================================================================

/// Runs once, `quiet` after the most recent call, with that call's arguments.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    #[must_use]
    pub fn new(quiet: Duration) -> Self {
        Self { quiet, pending: None }
    }

    #[must_use]
    pub fn quiet(&self) -> Duration {
        self.quiet
    }

    /// Record an event. Cancels any unfired invocation and restarts the quiet period.
    pub fn call(&mut self, args: T, now: Instant) {
        self.pending = Some((now + self.quiet, args));
    }

    /// Fire the pending invocation if its quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.pending.take() {
            Some((deadline, args)) if now >= deadline => Some(args),
            other => {
                self.pending = other;
                None
            }
        }
    }

    /// Drop the pending invocation without running it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, args)| args)
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }
}

// =============================================================================
// THROTTLE
// =============================================================================

/// Runs immediately, then at most once per `interval`.
///
/// Calls that land inside the interval are collapsed into a single trailing
/// invocation carrying the newest arguments, due at the interval boundary.
/// The final state of a burst is therefore never dropped.
#[derive(Debug, Clone)]
pub struct Throttle<T> {
    interval: Duration,
    last_run: Option<Instant>,
    trailing: Option<(Instant, T)>,
}

impl<T> Throttle<T> {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self { interval, last_run: None, trailing: None }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Offer a call. Returns the arguments back if they should run now;
    /// otherwise they replace the trailing slot and `None` is returned.
    pub fn call(&mut self, args: T, now: Instant) -> Option<T> {
        match self.last_run {
            Some(last) if now.saturating_duration_since(last) < self.interval => {
                self.trailing = Some((last + self.interval, args));
                None
            }
            _ => {
                self.trailing = None;
                self.last_run = Some(now);
                Some(args)
            }
        }
    }

    /// Fire the trailing invocation if its boundary has been reached.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.trailing.take() {
            Some((due, args)) if now >= due => {
                self.last_run = Some(now);
                Some(args)
            }
            other => {
                self.trailing = other;
                None
            }
        }
    }

    /// Drop the trailing invocation without running it.
    pub fn cancel(&mut self) -> Option<T> {
        self.trailing.take().map(|(_, args)| args)
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.trailing.is_some()
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.trailing.as_ref().map(|(due, _)| *due)
    }
}
