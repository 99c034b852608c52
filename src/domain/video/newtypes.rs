// SPDX-License-Identifier: MPL-2.0
//! Video playback newtypes.
//!
//! This module provides type-safe wrappers for playback values,
//! ensuring they are always within valid ranges.

// =============================================================================
// PlaybackRate
// =============================================================================

/// Playback rate bounds (0.25x to 4.0x).
pub mod rate_bounds {
    /// Minimum playback rate.
    pub const MIN: f64 = 0.25;
    /// Maximum playback rate.
    pub const MAX: f64 = 4.0;
    /// Normal playback rate.
    pub const NORMAL: f64 = 1.0;
}

/// Playback rate, guaranteed to be within valid range (0.25x - 4.0x).
///
/// This newtype enforces validity at the type level, making it impossible
/// to hand an out-of-range rate to a media element.
///
/// # Example
///
/// ```
/// use riceswipe::domain::video::PlaybackRate;
///
/// let rate = PlaybackRate::new(2.0);
/// assert_eq!(rate.value(), 2.0);
///
/// // Values outside range are clamped
/// let too_fast = PlaybackRate::new(100.0);
/// assert_eq!(too_fast.value(), 4.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackRate(f64);

impl PlaybackRate {
    /// Normal (1.0x) playback.
    pub const NORMAL: Self = Self(rate_bounds::NORMAL);

    /// Creates a new playback rate, clamping to valid range.
    /// Non-finite input falls back to normal speed.
    #[must_use]
    pub fn new(rate: f64) -> Self {
        if !rate.is_finite() {
            return Self::NORMAL;
        }
        Self(rate.clamp(rate_bounds::MIN, rate_bounds::MAX))
    }

    /// Returns the rate value as f64.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Returns true if this is normal speed.
    #[must_use]
    pub fn is_normal(self) -> bool {
        (self.0 - rate_bounds::NORMAL).abs() < 0.001
    }
}

impl Default for PlaybackRate {
    fn default() -> Self {
        Self::NORMAL
    }
}

// =============================================================================
// RewindSpeed
// =============================================================================

/// Simulated rewind speed, in media seconds consumed per real second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewindSpeed(f64);

impl RewindSpeed {
    /// Lowest speed that still visibly moves backwards.
    pub const MIN: f64 = 0.5;
    /// Highest supported speed.
    pub const MAX: f64 = 16.0;
    /// Default speed (3 seconds per second).
    pub const DEFAULT: f64 = 3.0;

    /// Creates a new rewind speed, clamping to valid range.
    #[must_use]
    pub fn new(speed: f64) -> Self {
        if !speed.is_finite() {
            return Self::default();
        }
        Self(speed.clamp(Self::MIN, Self::MAX))
    }

    /// Returns the speed value as f64.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for RewindSpeed {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

// =============================================================================
// ProgressPercent
// =============================================================================

/// Playback progress as a percentage of the duration (0–100).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProgressPercent(f64);

impl ProgressPercent {
    /// Creates a progress value, clamping to 0–100.
    #[must_use]
    pub fn new(percent: f64) -> Self {
        if !percent.is_finite() {
            return Self(0.0);
        }
        Self(percent.clamp(0.0, 100.0))
    }

    /// Progress of `position` within `duration`; `None` when the duration
    /// is unknown or zero.
    #[must_use]
    pub fn from_position(position_secs: f64, duration_secs: f64) -> Option<Self> {
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return None;
        }
        Some(Self::new(position_secs / duration_secs * 100.0))
    }

    /// Progress corresponding to a 0–1 ratio.
    #[must_use]
    pub fn from_ratio(ratio: f64) -> Self {
        Self::new(ratio * 100.0)
    }

    /// Returns the percentage as f64.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn rate_clamps_to_valid_range() {
        assert_abs_diff_eq!(PlaybackRate::new(0.01).value(), rate_bounds::MIN);
        assert_abs_diff_eq!(PlaybackRate::new(100.0).value(), rate_bounds::MAX);
        assert_abs_diff_eq!(PlaybackRate::new(2.0).value(), 2.0);
    }

    #[test]
    fn rate_nan_is_normal() {
        assert!(PlaybackRate::new(f64::NAN).is_normal());
    }

    #[test]
    fn rate_default_is_normal() {
        assert!(PlaybackRate::default().is_normal());
        assert!(!PlaybackRate::new(2.0).is_normal());
    }

    #[test]
    fn rewind_speed_clamps() {
        assert_abs_diff_eq!(RewindSpeed::new(0.0).value(), RewindSpeed::MIN);
        assert_abs_diff_eq!(RewindSpeed::new(99.0).value(), RewindSpeed::MAX);
        assert_abs_diff_eq!(RewindSpeed::default().value(), 3.0);
    }

    #[test]
    fn progress_from_position() {
        let progress = ProgressPercent::from_position(5.0, 20.0).unwrap();
        assert_abs_diff_eq!(progress.value(), 25.0);
        assert!(ProgressPercent::from_position(5.0, 0.0).is_none());
        assert!(ProgressPercent::from_position(5.0, f64::NAN).is_none());
    }

    #[test]
    fn progress_clamps_overshoot() {
        let progress = ProgressPercent::from_position(25.0, 20.0).unwrap();
        assert_abs_diff_eq!(progress.value(), 100.0);
        assert_abs_diff_eq!(ProgressPercent::from_ratio(-0.5).value(), 0.0);
    }
}
