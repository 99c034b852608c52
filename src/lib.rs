// SPDX-License-Identifier: MPL-2.0
//! `riceswipe` is the gesture and playback core of a vertical short-video feed.
//!
//! It classifies pointer input on a full-screen video (tap, double tap,
//! long press with drag-to-scrub), simulates backward playback, drives
//! autoplay from slide visibility and seeks from a progress scrubber. The
//! media element is abstracted, so the whole core runs headless on
//! injected time.

#![doc(html_root_url = "https://docs.rs/riceswipe/0.3.0")]

pub mod config;
pub mod domain;
pub mod error;
pub mod feed;
pub mod player;
pub mod replay;

#[cfg(test)]
pub(crate) mod test_utils;
