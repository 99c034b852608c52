// SPDX-License-Identifier: MPL-2.0
//! Optimistic like/unlike with rollback.
//!
//! The visible state flips immediately; the request is sent by the host and
//! its outcome settled later. A failed request silently restores the state
//! captured when it was issued.

use crate::error::LikeError;

/// HTTP verb of the like endpoint: `POST` likes, `DELETE` unlikes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeMethod {
    Post,
    Delete,
}

impl LikeMethod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

/// Liked flag and like count shown on a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LikeState {
    pub liked: bool,
    pub count: u64,
}

/// Boundary call the host must perform for an optimistic toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikeRequest {
    pub video_id: String,
    pub method: LikeMethod,
    /// State before the optimistic change, restored on failure.
    pub previous: LikeState,
}

impl LikeRequest {
    /// Relative API path of the like endpoint for this video.
    #[must_use]
    pub fn path(&self) -> String {
        format!("/api/videos/{}/like", self.video_id)
    }
}

impl LikeState {
    #[must_use]
    pub fn new(liked: bool, count: u64) -> Self {
        Self { liked, count }
    }

    /// Flips the state optimistically and returns the request to send.
    pub fn toggle(&mut self, video_id: &str) -> LikeRequest {
        let previous = *self;
        let method = if previous.liked {
            LikeMethod::Delete
        } else {
            LikeMethod::Post
        };
        self.liked = !previous.liked;
        self.count = if previous.liked {
            previous.count.saturating_sub(1)
        } else {
            previous.count.saturating_add(1)
        };
        LikeRequest {
            video_id: video_id.to_string(),
            method,
            previous,
        }
    }

    /// Replaces the state with fresh server data.
    pub fn reset(&mut self, liked: bool, count: u64) {
        *self = Self::new(liked, count);
    }

    /// Applies the outcome of `request`; failures roll back.
    pub fn settle(&mut self, request: &LikeRequest, outcome: Result<(), LikeError>) {
        if let Err(err) = outcome {
            log::warn!(
                "{} {} failed ({err}); reverting like state",
                request.method.as_str(),
                request.path()
            );
            *self = request.previous;
        }
    }
}
