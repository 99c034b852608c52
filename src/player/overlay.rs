// SPDX-License-Identifier: MPL-2.0
//! Auto-hide for the info/action overlay drawn over a playing video.

use crate::player::timer::Timer;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct OverlayVisibility {
    visible: bool,
    /// Pinned while a modal (add-to-list) is open.
    pinned: bool,
    timeout: Duration,
    hide_timer: Timer,
}

impl OverlayVisibility {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            visible: true,
            pinned: false,
            timeout,
            hide_timer: Timer::default(),
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.hide_timer.deadline()
    }

    /// Shows the overlay and restarts the hide countdown.
    pub fn show_and_reset(&mut self, now: Instant) {
        self.visible = true;
        self.hide_timer.cancel();
        if !self.pinned {
            self.hide_timer.arm(now, self.timeout);
        }
    }

    /// Shows the overlay with no countdown (paused or parked slide).
    pub fn show_static(&mut self) {
        self.visible = true;
        self.hide_timer.cancel();
    }

    pub fn set_pinned(&mut self, pinned: bool, now: Instant) {
        self.pinned = pinned;
        if pinned {
            self.show_static();
        } else {
            self.show_and_reset(now);
        }
    }

    /// Hides the overlay if the countdown elapsed while media was playing.
    /// Returns true when it was hidden by this call.
    pub fn tick(&mut self, now: Instant, media_playing: bool) -> bool {
        if self.hide_timer.fire(now) && media_playing && self.visible {
            self.visible = false;
            return true;
        }
        false
    }
}

impl Default for OverlayVisibility {
    fn default() -> Self {
        Self::new(Duration::from_millis(
            crate::config::defaults::DEFAULT_OVERLAY_TIMEOUT_MS,
        ))
    }
}
