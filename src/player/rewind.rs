// SPDX-License-Identifier: MPL-2.0
//! Simulated backward playback.
//!
//! Media decoders only play forward, so rewind pauses the element and walks
//! its position backwards on every animation frame:
//!
//! ```text
//! target = max(0, anchor_position - elapsed_real_secs * speed)
//! ```
//!
//! Frames that land while the element is still servicing a seek are skipped.
//! Reaching 0 stops the loop and resumes forward playback from the start.

use crate::domain::video::{PlaybackRate, RewindSpeed};
use crate::player::media::MediaElement;
use crate::player::timer::FrameLoop;
use std::time::Instant;

/// Wall-clock and media positions captured when rewind started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewindAnchor {
    pub started_at: Instant,
    pub media_secs: f64,
}

/// Result of servicing one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RewindStep {
    /// Not running; nothing happened.
    Idle,
    /// Position moved (or the frame was skipped during a seek).
    Rewound { target_secs: f64 },
    /// The start of the media was reached; forward playback resumed.
    ReachedStart,
}

#[derive(Debug, Clone, Default)]
pub struct RewindSimulator {
    speed: RewindSpeed,
    anchor: Option<RewindAnchor>,
    frames: FrameLoop,
}

impl RewindSimulator {
    #[must_use]
    pub fn new(speed: RewindSpeed) -> Self {
        Self {
            speed,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.frames.is_running()
    }

    /// Number of live per-frame loops (0 or 1).
    #[must_use]
    pub fn active_loops(&self) -> usize {
        self.frames.active_count()
    }

    #[must_use]
    pub fn anchor(&self) -> Option<RewindAnchor> {
        self.anchor
    }

    /// Pauses the element, anchors at its current position and schedules
    /// the frame loop. Any loop already running is stopped first.
    pub fn start<M: MediaElement>(&mut self, media: &mut M, now: Instant) {
        self.stop();
        media.pause();
        media.set_playback_rate(PlaybackRate::NORMAL);
        let anchor = RewindAnchor {
            started_at: now,
            media_secs: media.current_time(),
        };
        log::debug!("rewind started at {:.3}s", anchor.media_secs);
        self.anchor = Some(anchor);
        self.frames.start();
    }

    /// Cancels the frame loop and clears the anchor. Idempotent.
    pub fn stop(&mut self) {
        if self.frames.is_running() {
            log::debug!("rewind stopped");
        }
        self.frames.stop();
        self.anchor = None;
    }

    /// Services one animation frame.
    pub fn on_frame<M: MediaElement>(&mut self, media: &mut M, now: Instant) -> RewindStep {
        let Some(anchor) = self.anchor.filter(|_| self.frames.is_running()) else {
            self.frames.stop();
            return RewindStep::Idle;
        };

        let elapsed = now.saturating_duration_since(anchor.started_at).as_secs_f64();
        let target_secs = (anchor.media_secs - elapsed * self.speed.value()).max(0.0);

        if !media.is_seeking() {
            media.set_current_time(target_secs);
        }

        if target_secs > 0.0 {
            return RewindStep::Rewound { target_secs };
        }

        self.stop();
        media.set_current_time(0.0);
        if let Err(err) = media.play() {
            log::debug!("resume after rewind refused: {err}");
        }
        log::debug!("rewind reached the start; resuming forward playback");
        RewindStep::ReachedStart
    }
}
