// SPDX-License-Identifier: MPL-2.0
//! Cancellable timers and per-frame loops driven by injected time.
//!
//! Nothing here owns a thread or a platform timer. A [`Timer`] is a deadline
//! the host polls; a [`FrameLoop`] is a recurring frame request the host
//! services on every animation frame while it is running. Cancelling either
//! is just clearing state, so nothing can leak past an unmount.

use std::time::{Duration, Instant};

/// One-shot cancellable deadline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timer {
    deadline: Option<Instant>,
}

impl Timer {
    /// Arms (or re-arms) the timer to fire `delay` after `now`.
    pub fn arm(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    /// Arms the timer for an absolute deadline.
    pub fn arm_at(&mut self, deadline: Instant) {
        self.deadline = Some(deadline);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fires the timer if its deadline has passed. A fired timer disarms.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Recurring per-frame callback request. At most one run is active.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameLoop {
    running: bool,
}

impl FrameLoop {
    /// Starts a run, replacing any active one.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Cancels the active run. Safe to call when idle.
    pub fn stop(&mut self) {
        self.running = false;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Number of running loops (0 or 1).
    #[must_use]
    pub fn active_count(&self) -> usize {
        usize::from(self.running)
    }
}

/// Earliest of two optional deadlines.
#[must_use]
pub fn earliest(a: Option<Instant>, b: Option<Instant>) -> Option<Instant> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, None) => a,
        (None, b) => b,
    }
}
