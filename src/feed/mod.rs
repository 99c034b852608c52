// SPDX-License-Identifier: MPL-2.0
//! Vertical feed navigation.
//!
//! Decides which slide is active, either from swipe gestures moving a
//! current index or from intersection ratios reported by a scrolling
//! container. Each slide's player is told only whether it is active.

pub mod video;

pub use video::{Author, Video};

use crate::config::defaults::DEFAULT_ACTIVE_VISIBILITY_RATIO;

/// How slide activity is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivationSource {
    /// Swipes move a current index.
    #[default]
    Index,
    /// The slide most visible past the threshold becomes current.
    Intersection,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedNavigator {
    len: usize,
    current: usize,
    source: ActivationSource,
    visibility_threshold: f32,
}

impl FeedNavigator {
    #[must_use]
    pub fn new(len: usize, source: ActivationSource) -> Self {
        Self {
            len,
            current: 0,
            source,
            visibility_threshold: DEFAULT_ACTIVE_VISIBILITY_RATIO,
        }
    }

    #[must_use]
    pub fn with_visibility_threshold(mut self, threshold: f32) -> Self {
        self.visibility_threshold = threshold;
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn source(&self) -> ActivationSource {
        self.source
    }

    #[must_use]
    pub fn is_active(&self, index: usize) -> bool {
        !self.is_empty() && index == self.current
    }

    /// Next video. Returns true if the current index changed.
    pub fn swipe_up(&mut self) -> bool {
        let next = (self.current + 1).min(self.len.saturating_sub(1));
        self.move_to(next)
    }

    /// Previous video. Returns true if the current index changed.
    pub fn swipe_down(&mut self) -> bool {
        let prev = self.current.saturating_sub(1);
        self.move_to(prev)
    }

    /// Reports how much of slide `index` is visible. Only used in
    /// intersection mode; returns true if the current index changed.
    pub fn observe(&mut self, index: usize, ratio: f32) -> bool {
        if self.source != ActivationSource::Intersection || index >= self.len {
            return false;
        }
        self.is_visible_enough(ratio) && self.move_to(index)
    }

    /// True if a slide this visible should become the current one.
    #[must_use]
    pub fn is_visible_enough(&self, ratio: f32) -> bool {
        ratio.is_finite() && ratio >= self.visibility_threshold
    }

    /// Feed length changed (pagination, deletion).
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.current = self.current.min(len.saturating_sub(1));
    }

    fn move_to(&mut self, index: usize) -> bool {
        if index == self.current || index >= self.len {
            return false;
        }
        log::debug!("feed moved from slide {} to {}", self.current, index);
        self.current = index;
        true
    }
}
