// SPDX-License-Identifier: MPL-2.0
//! Derived playback intent.
//!
//! The intent is never stored: it is derived on demand from the player's
//! mode and play state and only reported. Mode transitions drive the media
//! element directly.

use super::newtypes::PlaybackRate;

/// What the media element should currently be doing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackIntent {
    /// Whether the element should be playing forward.
    pub playing: bool,
    /// Whether audio should be muted.
    pub muted: bool,
    /// Rate for forward playback.
    pub rate: PlaybackRate,
}

impl PlaybackIntent {
    /// Intent of a slide that is not on screen.
    #[must_use]
    pub fn parked(muted: bool) -> Self {
        Self {
            playing: false,
            muted,
            rate: PlaybackRate::NORMAL,
        }
    }

    /// Returns true if playback is faster than normal.
    #[must_use]
    pub fn is_fast_forward(&self) -> bool {
        self.playing && self.rate.value() > PlaybackRate::NORMAL.value()
    }
}
