// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the player. Constants are organized by category.
//!
//! # Categories
//!
//! - **Gesture**: Tap, double-tap and long-press thresholds
//! - **Playback**: Fast-forward rate and simulated rewind speed
//! - **Visibility**: Slide activation and overlay auto-hide
//! - **Frame Loop**: Cadence of per-frame callbacks in the async driver

// ==========================================================================
// Gesture Defaults
// ==========================================================================

/// Delay before a held pointer enters long-press mode (milliseconds).
pub const DEFAULT_LONG_PRESS_MS: u64 = 300;

/// Displacement (pixels) under which a pointer is still considered a tap,
/// and over which a move may cancel a long-press or pick a direction.
pub const DEFAULT_MOVE_THRESHOLD_PX: f32 = 10.0;

/// Maximum time between two pointer-downs for a double tap (milliseconds).
pub const DEFAULT_DOUBLE_TAP_WINDOW_MS: u64 = 300;

/// Per-axis distance (pixels) two taps may be apart and still form a double tap.
pub const DEFAULT_DOUBLE_TAP_TOLERANCE_PX: f32 = 30.0;

/// Minimum movement threshold (pixels).
pub const MIN_MOVE_THRESHOLD_PX: f32 = 1.0;

/// Maximum movement threshold (pixels).
pub const MAX_MOVE_THRESHOLD_PX: f32 = 200.0;

/// Minimum double-tap tolerance (pixels).
pub const MIN_DOUBLE_TAP_TOLERANCE_PX: f32 = 1.0;

/// Maximum double-tap tolerance (pixels).
pub const MAX_DOUBLE_TAP_TOLERANCE_PX: f32 = 500.0;

/// Minimum allowed long-press / double-tap delay.
pub const MIN_GESTURE_DELAY_MS: u64 = 50;

/// Maximum allowed long-press / double-tap delay.
pub const MAX_GESTURE_DELAY_MS: u64 = 2_000;

// ==========================================================================
// Playback Defaults
// ==========================================================================

/// Playback rate while fast-forwarding during a long press.
pub const DEFAULT_FAST_FORWARD_RATE: f64 = 2.0;

/// Simulated rewind speed, in media seconds per real second.
pub const DEFAULT_REWIND_SPEED: f64 = 3.0;

// ==========================================================================
// Visibility Defaults
// ==========================================================================

/// Fraction of a slide that must be visible for it to become active.
pub const DEFAULT_ACTIVE_VISIBILITY_RATIO: f32 = 0.55;

/// Lowest accepted activation ratio; a slide must be at least partly visible.
pub const MIN_ACTIVE_VISIBILITY_RATIO: f32 = 0.01;

/// Highest accepted activation ratio (fully visible).
pub const MAX_ACTIVE_VISIBILITY_RATIO: f32 = 1.0;

/// Overlay auto-hide timeout while playing (milliseconds).
pub const DEFAULT_OVERLAY_TIMEOUT_MS: u64 = 3_000;

/// Minimum overlay timeout (milliseconds).
pub const MIN_OVERLAY_TIMEOUT_MS: u64 = 500;

/// Maximum overlay timeout (milliseconds).
pub const MAX_OVERLAY_TIMEOUT_MS: u64 = 30_000;

// ==========================================================================
// Frame Loop Defaults
// ==========================================================================

/// Interval between animation frames in the async driver (~60 fps).
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;

/// Minimum frame interval.
pub const MIN_FRAME_INTERVAL_MS: u64 = 4;

/// Maximum frame interval.
pub const MAX_FRAME_INTERVAL_MS: u64 = 100;

/// Fallback label for videos whose author has no display name.
pub const DEFAULT_AUTHOR_NAME: &str = "User";
