// SPDX-License-Identifier: MPL-2.0
//! Tracks whether a slide is the active one.
//!
//! Activity is computed outside the player, either by comparing the feed's
//! current index to the slide index or from how much of the slide is inside
//! the scrolling viewport. The controller only reports edges.

use crate::config::defaults::DEFAULT_ACTIVE_VISIBILITY_RATIO;

/// Edge reported when activity changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Activated,
    Deactivated,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivationController {
    active: bool,
    visibility_threshold: f32,
}

impl Default for ActivationController {
    fn default() -> Self {
        Self::new(DEFAULT_ACTIVE_VISIBILITY_RATIO)
    }
}

impl ActivationController {
    /// Starts inactive, so the first `update(true)` is an activation.
    #[must_use]
    pub fn new(visibility_threshold: f32) -> Self {
        Self {
            active: false,
            visibility_threshold,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn visibility_threshold(&self) -> f32 {
        self.visibility_threshold
    }

    /// True if `ratio` of the slide being visible makes it active.
    #[must_use]
    pub fn is_visible_enough(&self, ratio: f32) -> bool {
        ratio.is_finite() && ratio >= self.visibility_threshold
    }

    pub fn update(&mut self, active: bool) -> Option<Transition> {
        if active == self.active {
            return None;
        }
        self.active = active;
        Some(if active {
            Transition::Activated
        } else {
            Transition::Deactivated
        })
    }

    pub fn update_ratio(&mut self, ratio: f32) -> Option<Transition> {
        self.update(self.is_visible_enough(ratio))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_only_edges() {
        let mut activation = ActivationController::default();
        assert_eq!(activation.update(false), None);
        assert_eq!(activation.update(true), Some(Transition::Activated));
        assert_eq!(activation.update(true), None);
        assert_eq!(activation.update(false), Some(Transition::Deactivated));
    }

    #[test]
    fn ratio_threshold_is_inclusive() {
        let mut activation = ActivationController::default();
        assert_eq!(activation.update_ratio(0.54), None);
        assert_eq!(activation.update_ratio(0.55), Some(Transition::Activated));
        assert_eq!(activation.update_ratio(0.9), None);
        assert_eq!(activation.update_ratio(0.1), Some(Transition::Deactivated));
        assert!(!activation.is_visible_enough(f32::NAN));
    }
}
