// SPDX-License-Identifier: MPL-2.0
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),
    #[error("Config Error: {0}")]
    Config(String),
    #[error("Script Error: {0}")]
    Script(String),
    #[error("Media Error: {0}")]
    Media(#[from] MediaError),
}

/// Failures reported by a media element.
///
/// None of these are fatal to the player: they are absorbed by the
/// state machines and only surface as a paused visual state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaError {
    /// The platform refused to start playback (autoplay policy).
    #[error("playback start was rejected by the platform")]
    PlayRejected,

    /// The element has no source loaded yet.
    #[error("media element is not ready")]
    NotReady,
}

/// Failure of the like/unlike boundary call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("like request failed: {0}")]
pub struct LikeError(pub String);

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
