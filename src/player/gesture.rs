// SPDX-License-Identifier: MPL-2.0
//! Pointer gesture classifier with double-tap and long-press detection.
//!
//! Turns the raw pointer stream of the full-screen video surface into at most
//! one discrete [`Gesture`] per call. Priority is fixed: the double-tap check
//! runs first on pointer-down, then the long-press timer, then
//! displacement-based cancellation on move.
//!
//! A single tap is only reported once the double-tap window has elapsed, so
//! the two taps of a double tap produce one like and no play toggle.

use crate::config::GestureSettings;
use crate::domain::gesture::{Direction, Gesture, GestureMode, Point, PointerId};
use crate::player::timer::{earliest, Timer};
use std::time::{Duration, Instant};

/// Thresholds used by the classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureThresholds {
    pub long_press: Duration,
    pub move_threshold: f32,
    pub double_tap_window: Duration,
    pub double_tap_tolerance: f32,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self::from(&GestureSettings::default())
    }
}

impl From<&GestureSettings> for GestureThresholds {
    fn from(settings: &GestureSettings) -> Self {
        Self {
            long_press: settings.long_press_delay(),
            move_threshold: settings.move_threshold_px,
            double_tap_window: settings.double_tap_window(),
            double_tap_tolerance: settings.double_tap_tolerance_px,
        }
    }
}

/// The pointer currently pressed on the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSession {
    pub start: Point,
    pub started_at: Instant,
    pub pointer_id: PointerId,
    /// Set when the pointer-down was used up by a double tap.
    consumed: bool,
}

impl PointerSession {
    fn new(pointer_id: PointerId, start: Point, started_at: Instant) -> Self {
        Self {
            start,
            started_at,
            pointer_id,
            consumed: false,
        }
    }

    #[must_use]
    pub fn is_consumed(&self) -> bool {
        self.consumed
    }
}

/// Last tap seen, for double-tap comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DoubleTapTracker {
    last: Option<(Instant, Point)>,
}

impl DoubleTapTracker {
    /// True if a tap at `point`/`now` pairs with the previous tap.
    #[must_use]
    pub fn matches(&self, now: Instant, point: Point, thresholds: &GestureThresholds) -> bool {
        self.last.is_some_and(|(at, last_point)| {
            let within_window = now.saturating_duration_since(at) <= thresholds.double_tap_window;
            let dx = (last_point.x - point.x).abs();
            let dy = (last_point.y - point.y).abs();
            within_window
                && dx < thresholds.double_tap_tolerance
                && dy < thresholds.double_tap_tolerance
        })
    }

    pub fn record(&mut self, now: Instant, point: Point) {
        self.last = Some((now, point));
    }

    pub fn clear(&mut self) {
        self.last = None;
    }

    #[must_use]
    pub fn last_tap(&self) -> Option<(Instant, Point)> {
        self.last
    }
}

/// Gesture state machine for one player instance.
#[derive(Debug, Clone, Default)]
pub struct GestureClassifier {
    thresholds: GestureThresholds,
    mode: GestureMode,
    session: Option<PointerSession>,
    taps: DoubleTapTracker,
    long_press: Timer,
    single_tap: Timer,
    captured: Option<PointerId>,
}

impl GestureClassifier {
    #[must_use]
    pub fn new(thresholds: GestureThresholds) -> Self {
        Self {
            thresholds,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn mode(&self) -> GestureMode {
        self.mode
    }

    #[must_use]
    pub fn session(&self) -> Option<&PointerSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn thresholds(&self) -> &GestureThresholds {
        &self.thresholds
    }

    /// Pointer captured by an active long press.
    #[must_use]
    pub fn captured_pointer(&self) -> Option<PointerId> {
        self.captured
    }

    #[must_use]
    pub fn is_long_press_pending(&self) -> bool {
        self.long_press.is_armed()
    }

    #[must_use]
    pub fn is_tap_pending(&self) -> bool {
        self.single_tap.is_armed()
    }

    /// Earliest instant at which [`tick`](Self::tick) has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        earliest(self.long_press.deadline(), self.single_tap.deadline())
    }

    pub fn pointer_down(&mut self, pointer_id: PointerId, point: Point, now: Instant) -> Option<Gesture> {
        if self.session.is_some() || self.mode == GestureMode::Seeking {
            return None;
        }

        if self.taps.matches(now, point, &self.thresholds) {
            self.single_tap.cancel();
            self.long_press.cancel();
            self.taps.clear();
            self.session = Some(PointerSession {
                consumed: true,
                ..PointerSession::new(pointer_id, point, now)
            });
            self.mode = GestureMode::Idle;
            log::debug!("double tap at ({}, {})", point.x, point.y);
            return Some(Gesture::DoubleTap);
        }

        // A tap still waiting out the window is not part of this gesture.
        let flushed = self.single_tap.is_armed().then_some(Gesture::Tap);
        self.single_tap.cancel();

        self.taps.record(now, point);
        self.long_press.arm(now, self.thresholds.long_press);
        self.session = Some(PointerSession::new(pointer_id, point, now));
        self.mode = GestureMode::PendingTap;
        flushed
    }

    pub fn pointer_move(&mut self, pointer_id: PointerId, point: Point) -> Option<Gesture> {
        let session = self.session.filter(|s| s.pointer_id == pointer_id && !s.consumed)?;
        let delta = point.delta_from(session.start);
        let threshold = self.thresholds.move_threshold;

        match self.mode {
            GestureMode::PendingTap => {
                if self.long_press.is_armed() && delta.is_vertical_beyond(threshold) {
                    // Let vertical swipes scroll the feed.
                    self.long_press.cancel();
                }
                None
            }
            GestureMode::LongPressActive { direction } => {
                if !delta.is_horizontal_beyond(threshold) {
                    return None;
                }
                let wanted = if delta.dx > 0.0 {
                    Direction::Forward
                } else {
                    Direction::Rewind
                };
                if direction == Some(wanted) {
                    return None;
                }
                self.mode = GestureMode::LongPressActive {
                    direction: Some(wanted),
                };
                Some(Gesture::DirectionChanged(wanted))
            }
            GestureMode::Idle | GestureMode::Seeking => None,
        }
    }

    pub fn pointer_up(&mut self, pointer_id: PointerId, point: Point, now: Instant) -> Option<Gesture> {
        let session = self.end_session(pointer_id)?;

        if self.mode.is_long_press() {
            self.mode = GestureMode::Idle;
            return Some(Gesture::LongPressEnded);
        }
        if session.consumed {
            self.mode = GestureMode::Idle;
            return None;
        }

        let delta = point.delta_from(session.start);
        if !delta.is_within(self.thresholds.move_threshold) {
            self.mode = GestureMode::Idle;
            return None;
        }

        let window_end = session.started_at + self.thresholds.double_tap_window;
        if now >= window_end {
            self.mode = GestureMode::Idle;
            Some(Gesture::Tap)
        } else {
            self.single_tap.arm_at(window_end);
            self.mode = GestureMode::PendingTap;
            None
        }
    }

    /// Pointer cancelled by the platform: never a tap.
    pub fn pointer_cancel(&mut self, pointer_id: PointerId) -> Option<Gesture> {
        self.end_session(pointer_id)?;
        let was_long_press = self.mode.is_long_press();
        self.mode = GestureMode::Idle;
        was_long_press.then_some(Gesture::LongPressEnded)
    }

    /// Services the long-press and deferred single-tap timers.
    pub fn tick(&mut self, now: Instant) -> Option<Gesture> {
        if self.long_press.fire(now) {
            if let (Some(session), GestureMode::PendingTap) = (self.session, self.mode) {
                self.mode = GestureMode::LongPressActive {
                    direction: Some(Direction::Forward),
                };
                self.captured = Some(session.pointer_id);
                log::debug!("long press entered");
                return Some(Gesture::LongPressStarted);
            }
        }
        if self.single_tap.fire(now) && self.session.is_none() {
            self.mode = GestureMode::Idle;
            return Some(Gesture::Tap);
        }
        None
    }

    /// Rewind reached the start of the media while the press is still held.
    pub fn clear_direction(&mut self) {
        if self.mode.is_long_press() {
            self.mode = GestureMode::LongPressActive { direction: None };
        }
    }

    /// The progress scrubber took the pointer. Returns a tap that was
    /// still waiting out the double-tap window, if any.
    pub fn enter_seeking(&mut self) -> Option<Gesture> {
        let flushed = self.single_tap.is_armed().then_some(Gesture::Tap);
        self.single_tap.cancel();
        self.long_press.cancel();
        self.session = None;
        self.captured = None;
        self.mode = GestureMode::Seeking;
        flushed
    }

    pub fn exit_seeking(&mut self) {
        if self.mode == GestureMode::Seeking {
            self.mode = GestureMode::Idle;
        }
    }

    /// Drops every timer, the session and the tap history.
    pub fn reset(&mut self) {
        self.long_press.cancel();
        self.single_tap.cancel();
        self.session = None;
        self.captured = None;
        self.taps.clear();
        self.mode = GestureMode::Idle;
    }

    fn end_session(&mut self, pointer_id: PointerId) -> Option<PointerSession> {
        if self.session.is_some_and(|s| s.pointer_id != pointer_id) {
            return None;
        }
        self.long_press.cancel();
        self.captured = None;
        self.session.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestClock;

    const ID: PointerId = PointerId(1);

    fn classifier() -> GestureClassifier {
        GestureClassifier::new(GestureThresholds::default())
    }

    #[test]
    fn quick_tap_is_reported_after_window() {
        let clock = TestClock::new();
        let mut g = classifier();

        assert_eq!(g.pointer_down(ID, Point::new(100.0, 100.0), clock.at(0)), None);
        assert_eq!(g.pointer_up(ID, Point::new(102.0, 101.0), clock.at(150)), None);
        assert!(g.is_tap_pending());
        assert_eq!(g.tick(clock.at(299)), None);
        assert_eq!(g.tick(clock.at(300)), Some(Gesture::Tap));
        assert_eq!(g.mode(), GestureMode::Idle);
    }

    #[test]
    fn double_tap_fires_once_without_tap() {
        let clock = TestClock::new();
        let mut g = classifier();

        g.pointer_down(ID, Point::new(50.0, 50.0), clock.at(0));
        g.pointer_up(ID, Point::new(50.0, 50.0), clock.at(40));
        assert_eq!(
            g.pointer_down(ID, Point::new(55.0, 52.0), clock.at(100)),
            Some(Gesture::DoubleTap)
        );
        assert_eq!(g.pointer_up(ID, Point::new(55.0, 52.0), clock.at(140)), None);
        assert_eq!(g.tick(clock.at(1_000)), None);
        assert!(!g.is_long_press_pending());
        assert!(!g.is_tap_pending());
    }

    #[test]
    fn taps_too_far_apart_in_time_are_not_double() {
        let clock = TestClock::new();
        let mut g = classifier();

        g.pointer_down(ID, Point::new(50.0, 50.0), clock.at(0));
        g.pointer_up(ID, Point::new(50.0, 50.0), clock.at(40));
        assert_eq!(g.tick(clock.at(300)), Some(Gesture::Tap));
        assert_eq!(g.pointer_down(ID, Point::new(50.0, 50.0), clock.at(301)), None);
    }

    #[test]
    fn taps_too_far_apart_in_space_flush_first_tap() {
        let clock = TestClock::new();
        let mut g = classifier();

        g.pointer_down(ID, Point::new(50.0, 50.0), clock.at(0));
        g.pointer_up(ID, Point::new(50.0, 50.0), clock.at(40));
        assert_eq!(
            g.pointer_down(ID, Point::new(50.0, 90.0), clock.at(100)),
            Some(Gesture::Tap)
        );
        assert_eq!(g.mode(), GestureMode::PendingTap);
    }

    #[test]
    fn hold_enters_long_press_forward() {
        let clock = TestClock::new();
        let mut g = classifier();

        g.pointer_down(ID, Point::new(100.0, 100.0), clock.at(0));
        assert_eq!(g.tick(clock.at(350)), Some(Gesture::LongPressStarted));
        assert_eq!(
            g.mode(),
            GestureMode::LongPressActive {
                direction: Some(Direction::Forward)
            }
        );
        assert_eq!(g.captured_pointer(), Some(ID));
    }

    #[test]
    fn vertical_move_cancels_long_press() {
        let clock = TestClock::new();
        let mut g = classifier();

        g.pointer_down(ID, Point::new(100.0, 100.0), clock.at(0));
        g.pointer_move(ID, Point::new(102.0, 130.0));
        assert!(!g.is_long_press_pending());
        assert_eq!(g.tick(clock.at(400)), None);
        assert_eq!(g.pointer_up(ID, Point::new(102.0, 160.0), clock.at(420)), None);
        assert_eq!(g.mode(), GestureMode::Idle);
    }

    #[test]
    fn horizontal_move_before_long_press_keeps_timer() {
        let clock = TestClock::new();
        let mut g = classifier();

        g.pointer_down(ID, Point::new(100.0, 100.0), clock.at(0));
        g.pointer_move(ID, Point::new(130.0, 102.0));
        assert!(g.is_long_press_pending());
    }

    #[test]
    fn drag_switches_direction_during_long_press() {
        let clock = TestClock::new();
        let mut g = classifier();

        g.pointer_down(ID, Point::new(100.0, 100.0), clock.at(0));
        g.tick(clock.at(300));
        assert_eq!(
            g.pointer_move(ID, Point::new(50.0, 100.0)),
            Some(Gesture::DirectionChanged(Direction::Rewind))
        );
        assert_eq!(g.pointer_move(ID, Point::new(40.0, 100.0)), None);
        assert_eq!(
            g.pointer_move(ID, Point::new(130.0, 104.0)),
            Some(Gesture::DirectionChanged(Direction::Forward))
        );
    }

    #[test]
    fn release_after_long_press_ends_without_tap() {
        let clock = TestClock::new();
        let mut g = classifier();

        g.pointer_down(ID, Point::new(100.0, 100.0), clock.at(0));
        g.tick(clock.at(300));
        assert_eq!(
            g.pointer_up(ID, Point::new(100.0, 100.0), clock.at(800)),
            Some(Gesture::LongPressEnded)
        );
        assert_eq!(g.mode(), GestureMode::Idle);
        assert_eq!(g.captured_pointer(), None);
        assert_eq!(g.tick(clock.at(2_000)), None);
    }

    #[test]
    fn cancel_never_taps() {
        let clock = TestClock::new();
        let mut g = classifier();

        g.pointer_down(ID, Point::new(100.0, 100.0), clock.at(0));
        assert_eq!(g.pointer_cancel(ID), None);
        assert_eq!(g.tick(clock.at(1_000)), None);
        assert_eq!(g.mode(), GestureMode::Idle);
    }

    #[test]
    fn cancel_during_long_press_ends_it() {
        let clock = TestClock::new();
        let mut g = classifier();

        g.pointer_down(ID, Point::new(100.0, 100.0), clock.at(0));
        g.tick(clock.at(300));
        assert_eq!(g.pointer_cancel(ID), Some(Gesture::LongPressEnded));
    }

    #[test]
    fn second_pointer_is_ignored_while_session_active() {
        let clock = TestClock::new();
        let mut g = classifier();

        g.pointer_down(ID, Point::new(100.0, 100.0), clock.at(0));
        assert_eq!(g.pointer_down(PointerId(2), Point::new(100.0, 100.0), clock.at(50)), None);
        assert_eq!(g.pointer_up(PointerId(2), Point::new(100.0, 100.0), clock.at(60)), None);
        assert_eq!(g.session().map(|s| s.pointer_id), Some(ID));
    }

    #[test]
    fn slow_release_within_tolerance_taps_immediately() {
        let clock = TestClock::new();
        let mut g = classifier();

        g.pointer_down(ID, Point::new(100.0, 100.0), clock.at(0));
        g.pointer_move(ID, Point::new(100.0, 140.0));
        assert_eq!(
            g.pointer_up(ID, Point::new(101.0, 103.0), clock.at(500)),
            Some(Gesture::Tap)
        );
    }

    #[test]
    fn seeking_blocks_pointer_down() {
        let clock = TestClock::new();
        let mut g = classifier();

        assert_eq!(g.enter_seeking(), None);
        assert_eq!(g.pointer_down(ID, Point::new(1.0, 1.0), clock.at(0)), None);
        assert_eq!(g.mode(), GestureMode::Seeking);
        g.exit_seeking();
        assert_eq!(g.mode(), GestureMode::Idle);
    }

    #[test]
    fn clear_direction_only_applies_to_long_press() {
        let clock = TestClock::new();
        let mut g = classifier();

        g.clear_direction();
        assert_eq!(g.mode(), GestureMode::Idle);

        g.pointer_down(ID, Point::new(100.0, 100.0), clock.at(0));
        g.tick(clock.at(300));
        g.clear_direction();
        assert_eq!(g.mode(), GestureMode::LongPressActive { direction: None });
    }

    #[test]
    fn reset_clears_everything() {
        let clock = TestClock::new();
        let mut g = classifier();

        g.pointer_down(ID, Point::new(100.0, 100.0), clock.at(0));
        g.reset();
        assert_eq!(g.next_deadline(), None);
        assert!(g.session().is_none());
        assert_eq!(g.mode(), GestureMode::Idle);
    }
}
