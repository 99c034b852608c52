// SPDX-License-Identifier: MPL-2.0
//! Gesture and playback core of a feed slide.
//!
//! Everything here runs on injected time: the host passes the current
//! instant into each call and services [`VideoPlayer::next_deadline`] and
//! [`VideoPlayer::wants_frame`]. [`driver`] does that on a Tokio runtime.

pub mod activation;
pub mod driver;
pub mod gesture;
pub mod like;
pub mod media;
pub mod overlay;
pub mod rewind;
pub mod scrubber;
mod state;
pub mod timer;

pub use activation::{ActivationController, Transition};
pub use driver::PlayerHandle;
pub use gesture::{GestureClassifier, GestureThresholds};
pub use like::{LikeMethod, LikeRequest, LikeState};
pub use media::{MediaElement, SimulatedMedia};
pub use overlay::OverlayVisibility;
pub use rewind::{RewindSimulator, RewindStep};
pub use scrubber::ProgressScrubber;
pub use state::{Effect, Message, PlayerSnapshot, VideoPlayer};
pub use timer::{FrameLoop, Timer};
