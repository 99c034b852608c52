// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons and deterministic time.
//!
//! This module re-exports the `approx` crate's assertion macros for float comparison,
//! which properly handle floating-point precision issues that `assert_eq!` cannot.

use std::time::{Duration, Instant};

// Re-export approx macros for convenient use in tests
pub use approx::{assert_abs_diff_eq, assert_relative_eq};

/// Default epsilon for f64 comparisons of media positions.
pub const POSITION_EPSILON: f64 = 1e-6;

/// Fixed origin for timestamps in a test, with millisecond offsets.
#[derive(Debug, Clone, Copy)]
pub struct TestClock {
    origin: Instant,
}

impl TestClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Instant `ms` milliseconds after the origin.
    pub fn at(&self, ms: u64) -> Instant {
        self.origin + Duration::from_millis(ms)
    }
}
