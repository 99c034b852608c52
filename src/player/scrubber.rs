// SPDX-License-Identifier: MPL-2.0
//! Progress scrubber: drag along the progress bar to seek.
//!
//! The scrubber captures its pointer exclusively, so the gesture classifier
//! never sees the same pointer stream.

use crate::domain::gesture::{Point, PointerId, Rect};
use crate::domain::video::ProgressPercent;
use crate::player::media::MediaElement;

#[derive(Debug, Clone, Default)]
pub struct ProgressScrubber {
    region: Rect,
    captured: Option<PointerId>,
}

impl ProgressScrubber {
    #[must_use]
    pub fn new(region: Rect) -> Self {
        Self {
            region,
            captured: None,
        }
    }

    /// Updates the on-screen bounds of the progress bar.
    pub fn set_region(&mut self, region: Rect) {
        self.region = region;
    }

    #[must_use]
    pub fn region(&self) -> Rect {
        self.region
    }

    /// True if a pointer-down at `point` belongs to the scrubber.
    #[must_use]
    pub fn hit(&self, point: Point) -> bool {
        self.region.width > 0.0 && self.region.contains(point)
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.captured.is_some()
    }

    #[must_use]
    pub fn captured_pointer(&self) -> Option<PointerId> {
        self.captured
    }

    /// Horizontal position of `x` within the bar, clamped to 0–1.
    #[must_use]
    pub fn ratio_at(&self, x: f32) -> f64 {
        if self.region.width <= 0.0 {
            return 0.0;
        }
        let ratio = f64::from((x - self.region.x) / self.region.width);
        if ratio.is_finite() {
            ratio.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Captures the pointer and seeks to where it landed.
    pub fn pointer_down<M: MediaElement>(
        &mut self,
        pointer_id: PointerId,
        point: Point,
        media: &mut M,
    ) -> ProgressPercent {
        self.captured = Some(pointer_id);
        self.seek_to(point.x, media)
    }

    /// Seeks while captured; `None` when the pointer is not ours.
    pub fn pointer_move<M: MediaElement>(
        &mut self,
        pointer_id: PointerId,
        point: Point,
        media: &mut M,
    ) -> Option<ProgressPercent> {
        if self.captured != Some(pointer_id) {
            return None;
        }
        Some(self.seek_to(point.x, media))
    }

    /// Releases capture. Returns true if the pointer was ours.
    pub fn pointer_up(&mut self, pointer_id: PointerId) -> bool {
        if self.captured != Some(pointer_id) {
            return false;
        }
        self.captured = None;
        true
    }

    /// Drops any capture without seeking.
    pub fn release(&mut self) {
        self.captured = None;
    }

    fn seek_to<M: MediaElement>(&self, x: f32, media: &mut M) -> ProgressPercent {
        let ratio = self.ratio_at(x);
        let duration = media.duration().filter(|d| d.is_finite()).unwrap_or(0.0);
        media.set_current_time(duration * ratio);
        ProgressPercent::from_ratio(ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::media::SimulatedMedia;
    use crate::test_utils::assert_abs_diff_eq;

    const ID: PointerId = PointerId(7);

    fn bar() -> ProgressScrubber {
        ProgressScrubber::new(Rect::new(20.0, 600.0, 200.0, 24.0))
    }

    #[test]
    fn ratio_is_clamped() {
        let scrubber = bar();
        assert_abs_diff_eq!(scrubber.ratio_at(0.0), 0.0);
        assert_abs_diff_eq!(scrubber.ratio_at(120.0), 0.5);
        assert_abs_diff_eq!(scrubber.ratio_at(500.0), 1.0);
    }

    #[test]
    fn zero_width_region_maps_to_start() {
        let scrubber = ProgressScrubber::default();
        assert_abs_diff_eq!(scrubber.ratio_at(50.0), 0.0);
        assert!(!scrubber.hit(Point::new(0.0, 0.0)));
    }

    #[test]
    fn down_seeks_and_captures() {
        let mut scrubber = bar();
        let mut media = SimulatedMedia::new(40.0);

        let progress = scrubber.pointer_down(ID, Point::new(70.0, 610.0), &mut media);

        assert!(scrubber.is_dragging());
        assert_abs_diff_eq!(progress.value(), 25.0);
        assert_abs_diff_eq!(media.current_time(), 10.0);
    }

    #[test]
    fn move_follows_only_captured_pointer() {
        let mut scrubber = bar();
        let mut media = SimulatedMedia::new(40.0);
        scrubber.pointer_down(ID, Point::new(20.0, 610.0), &mut media);

        assert!(scrubber
            .pointer_move(PointerId(99), Point::new(220.0, 610.0), &mut media)
            .is_none());
        // Leaving the bar vertically keeps scrubbing.
        let progress = scrubber
            .pointer_move(ID, Point::new(220.0, 300.0), &mut media)
            .unwrap();
        assert_abs_diff_eq!(progress.value(), 100.0);
        assert_abs_diff_eq!(media.current_time(), 40.0);
    }

    #[test]
    fn up_releases_capture() {
        let mut scrubber = bar();
        let mut media = SimulatedMedia::new(40.0);
        scrubber.pointer_down(ID, Point::new(20.0, 610.0), &mut media);

        assert!(!scrubber.pointer_up(PointerId(2)));
        assert!(scrubber.pointer_up(ID));
        assert!(!scrubber.is_dragging());
        assert!(scrubber
            .pointer_move(ID, Point::new(100.0, 610.0), &mut media)
            .is_none());
    }

    #[test]
    fn unknown_duration_seeks_to_zero() {
        let mut scrubber = bar();
        let mut media = SimulatedMedia::without_metadata().with_position(3.0);
        scrubber.pointer_down(ID, Point::new(120.0, 610.0), &mut media);
        assert_abs_diff_eq!(media.current_time(), 0.0);
    }
}
