// SPDX-License-Identifier: MPL-2.0
//! Media element abstraction.
//!
//! The player never decodes anything itself; it drives whatever element the
//! host provides through [`MediaElement`]. [`SimulatedMedia`] is an in-memory
//! element used by the replay tool, the async driver tests and the test suite.

use crate::domain::video::PlaybackRate;
use crate::error::MediaError;
use std::time::Duration;

/// Operations the player needs from a playable media element.
///
/// Mirrors the subset of an HTML media element the gesture layer touches:
/// play/pause, position, rate, mute and the in-flight seek flag.
pub trait MediaElement {
    /// Starts forward playback. Platforms may refuse (autoplay policy);
    /// hosts whose refusal arrives later report it as a message instead.
    fn play(&mut self) -> Result<(), MediaError>;

    fn pause(&mut self);

    fn is_paused(&self) -> bool;

    /// Current position in seconds.
    fn current_time(&self) -> f64;

    /// Seeks to `secs`.
    fn set_current_time(&mut self, secs: f64);

    /// Duration in seconds, `None` until metadata is loaded.
    fn duration(&self) -> Option<f64>;

    /// True while a seek is being serviced.
    fn is_seeking(&self) -> bool;

    fn playback_rate(&self) -> PlaybackRate;

    fn set_playback_rate(&mut self, rate: PlaybackRate);

    fn is_muted(&self) -> bool;

    fn set_muted(&mut self, muted: bool);
}

/// In-memory media element that advances linearly with time.
#[derive(Debug, Clone)]
pub struct SimulatedMedia {
    position_secs: f64,
    duration_secs: Option<f64>,
    paused: bool,
    rate: PlaybackRate,
    muted: bool,
    seeking: bool,
    looping: bool,
    autoplay_allowed: bool,
    play_calls: usize,
    seeks: usize,
}

impl SimulatedMedia {
    /// Creates a paused element of the given duration, looping like the
    /// feed's video elements do.
    #[must_use]
    pub fn new(duration_secs: f64) -> Self {
        Self {
            position_secs: 0.0,
            duration_secs: (duration_secs.is_finite() && duration_secs > 0.0)
                .then_some(duration_secs),
            paused: true,
            rate: PlaybackRate::NORMAL,
            muted: false,
            seeking: false,
            looping: true,
            autoplay_allowed: true,
            play_calls: 0,
            seeks: 0,
        }
    }

    /// Element whose metadata has not loaded yet.
    #[must_use]
    pub fn without_metadata() -> Self {
        Self {
            duration_secs: None,
            ..Self::new(0.0)
        }
    }

    /// Sets whether `play()` is accepted.
    #[must_use]
    pub fn with_autoplay(mut self, allowed: bool) -> Self {
        self.autoplay_allowed = allowed;
        self
    }

    #[must_use]
    pub fn with_position(mut self, secs: f64) -> Self {
        self.position_secs = self.clamp_position(secs);
        self
    }

    #[must_use]
    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn set_autoplay_allowed(&mut self, allowed: bool) {
        self.autoplay_allowed = allowed;
    }

    /// Marks a seek as in flight (or finished).
    pub fn set_seeking(&mut self, seeking: bool) {
        self.seeking = seeking;
    }

    /// Number of accepted or refused `play()` calls.
    #[must_use]
    pub fn play_calls(&self) -> usize {
        self.play_calls
    }

    /// Number of position assignments.
    #[must_use]
    pub fn seeks(&self) -> usize {
        self.seeks
    }

    /// Advances playback by `elapsed` of real time.
    pub fn advance(&mut self, elapsed: Duration) {
        if self.paused {
            return;
        }
        let Some(duration) = self.duration_secs else {
            return;
        };
        let next = self.position_secs + elapsed.as_secs_f64() * self.rate.value();
        if next < duration {
            self.position_secs = next;
        } else if self.looping {
            self.position_secs = next % duration;
        } else {
            self.position_secs = duration;
            self.paused = true;
        }
    }

    fn clamp_position(&self, secs: f64) -> f64 {
        let secs = if secs.is_finite() { secs.max(0.0) } else { 0.0 };
        match self.duration_secs {
            Some(duration) => secs.min(duration),
            None => secs,
        }
    }
}

impl MediaElement for SimulatedMedia {
    fn play(&mut self) -> Result<(), MediaError> {
        self.play_calls += 1;
        if !self.autoplay_allowed {
            return Err(MediaError::PlayRejected);
        }
        if self.duration_secs.is_none() {
            return Err(MediaError::NotReady);
        }
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn current_time(&self) -> f64 {
        self.position_secs
    }

    fn set_current_time(&mut self, secs: f64) {
        self.seeks += 1;
        self.position_secs = self.clamp_position(secs);
    }

    fn duration(&self) -> Option<f64> {
        self.duration_secs
    }

    fn is_seeking(&self) -> bool {
        self.seeking
    }

    fn playback_rate(&self) -> PlaybackRate {
        self.rate
    }

    fn set_playback_rate(&mut self, rate: PlaybackRate) {
        self.rate = rate;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_abs_diff_eq, POSITION_EPSILON};

    #[test]
    fn starts_paused_at_zero() {
        let media = SimulatedMedia::new(10.0);
        assert!(media.is_paused());
        assert_abs_diff_eq!(media.current_time(), 0.0);
        assert_eq!(media.duration(), Some(10.0));
    }

    #[test]
    fn advance_respects_rate() {
        let mut media = SimulatedMedia::new(10.0);
        media.play().unwrap();
        media.set_playback_rate(PlaybackRate::new(2.0));
        media.advance(Duration::from_millis(500));
        assert_abs_diff_eq!(media.current_time(), 1.0, epsilon = POSITION_EPSILON);
    }

    #[test]
    fn advance_does_nothing_while_paused() {
        let mut media = SimulatedMedia::new(10.0);
        media.advance(Duration::from_secs(3));
        assert_abs_diff_eq!(media.current_time(), 0.0);
    }

    #[test]
    fn looping_wraps_at_end() {
        let mut media = SimulatedMedia::new(4.0).with_position(3.5);
        media.play().unwrap();
        media.advance(Duration::from_secs(1));
        assert_abs_diff_eq!(media.current_time(), 0.5, epsilon = POSITION_EPSILON);
        assert!(!media.is_paused());
    }

    #[test]
    fn non_looping_stops_at_end() {
        let mut media = SimulatedMedia::new(4.0).with_position(3.5).with_looping(false);
        media.play().unwrap();
        media.advance(Duration::from_secs(1));
        assert_abs_diff_eq!(media.current_time(), 4.0);
        assert!(media.is_paused());
    }

    #[test]
    fn refused_autoplay_stays_paused() {
        let mut media = SimulatedMedia::new(10.0).with_autoplay(false);
        assert_eq!(media.play(), Err(MediaError::PlayRejected));
        assert!(media.is_paused());
        assert_eq!(media.play_calls(), 1);
    }

    #[test]
    fn play_without_metadata_is_not_ready() {
        let mut media = SimulatedMedia::without_metadata();
        assert_eq!(media.play(), Err(MediaError::NotReady));
    }

    #[test]
    fn set_current_time_clamps_to_duration() {
        let mut media = SimulatedMedia::new(10.0);
        media.set_current_time(42.0);
        assert_abs_diff_eq!(media.current_time(), 10.0);
        media.set_current_time(-1.0);
        assert_abs_diff_eq!(media.current_time(), 0.0);
        assert_eq!(media.seeks(), 2);
    }
}
