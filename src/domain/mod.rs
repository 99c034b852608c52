// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core value types with ZERO external dependencies.
//!
//! This module contains pure domain types and value objects.
//! It has no dependencies on external crates (except `std`) to ensure
//! testability.
//!
//! # Modules
//!
//! - [`gesture`]: Pointer and gesture types ([`Point`](gesture::Point),
//!   [`GestureMode`](gesture::GestureMode), [`Gesture`](gesture::Gesture))
//! - [`video`]: Video playback types ([`PlaybackRate`](video::PlaybackRate),
//!   [`ProgressPercent`](video::ProgressPercent), [`PlaybackIntent`](video::PlaybackIntent))

pub mod gesture;
pub mod video;
