// SPDX-License-Identifier: MPL-2.0
//! Deterministic replay of gesture scripts.
//!
//! A script describes one video and a list of timestamped events. Replay
//! runs them against a [`SimulatedMedia`] on a virtual clock, advancing
//! playback and servicing timers and animation frames between events, and
//! records one [`TraceEntry`] per event (plus one per timer or frame that
//! produced an effect).
//!
//! ```toml
//! [video]
//! duration_secs = 30.0
//! start_secs = 12.0
//!
//! [[event]]
//! at_ms = 0
//! kind = "activate"
//!
//! [[event]]
//! at_ms = 500
//! kind = "down"
//! x = 100.0
//! y = 200.0
//! ```

use crate::config::defaults::{MAX_FRAME_INTERVAL_MS, MIN_FRAME_INTERVAL_MS};
use crate::config::GestureSettings;
use crate::domain::gesture::{Point, PointerId, Rect};
use crate::error::{Error, LikeError, Result};
use crate::feed::{Author, Video};
use crate::player::{Effect, LikeRequest, Message, PlayerSnapshot, SimulatedMedia, VideoPlayer};
use serde::Deserialize;
use std::collections::VecDeque;
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScriptVideo {
    pub id: String,
    pub duration_secs: f64,
    pub start_secs: f64,
    pub autoplay_allowed: bool,
    pub looping: bool,
    pub liked: bool,
    pub like_count: u64,
    /// Storage key of the original upload, for URL resolution.
    pub object_key: Option<String>,
}

impl Default for ScriptVideo {
    fn default() -> Self {
        Self {
            id: "script".into(),
            duration_secs: 30.0,
            start_secs: 0.0,
            autoplay_allowed: true,
            looping: true,
            liked: false,
            like_count: 0,
            object_key: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    Down,
    Move,
    Up,
    Cancel,
    Activate,
    Deactivate,
    /// Intersection ratio report; needs `ratio`.
    Visibility,
    /// Progress bar bounds; needs `x`, `y`, `width`, `height`.
    ScrubRegion,
    /// Like button pressed.
    Like,
    /// Oldest pending like request succeeded.
    LikeOk,
    /// Oldest pending like request failed.
    LikeFail,
    Mute,
    ModalOpen,
    ModalClose,
    SeekingStart,
    SeekingEnd,
    /// No input; only lets time pass.
    Wait,
}

impl EventKind {
    fn label(self) -> &'static str {
        match self {
            Self::Down => "down",
            Self::Move => "move",
            Self::Up => "up",
            Self::Cancel => "cancel",
            Self::Activate => "activate",
            Self::Deactivate => "deactivate",
            Self::Visibility => "visibility",
            Self::ScrubRegion => "scrub-region",
            Self::Like => "like",
            Self::LikeOk => "like-ok",
            Self::LikeFail => "like-fail",
            Self::Mute => "mute",
            Self::ModalOpen => "modal-open",
            Self::ModalClose => "modal-close",
            Self::SeekingStart => "seeking-start",
            Self::SeekingEnd => "seeking-end",
            Self::Wait => "wait",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScriptEvent {
    pub at_ms: u64,
    pub kind: EventKind,
    #[serde(default)]
    pub x: Option<f32>,
    #[serde(default)]
    pub y: Option<f32>,
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
    #[serde(default = "default_pointer")]
    pub pointer: i32,
    #[serde(default)]
    pub ratio: Option<f32>,
}

fn default_pointer() -> i32 {
    1
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub video: ScriptVideo,
    #[serde(default, rename = "event")]
    pub events: Vec<ScriptEvent>,
}

impl Script {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let script: Script =
            toml::from_str(content).map_err(|err| Error::Script(err.to_string()))?;
        script.validate()?;
        Ok(script)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<()> {
        let mut last = 0;
        for (index, event) in self.events.iter().enumerate() {
            if event.at_ms < last {
                return Err(Error::Script(format!(
                    "event {index} at {}ms is earlier than the previous event ({last}ms)",
                    event.at_ms
                )));
            }
            last = event.at_ms;
        }
        Ok(())
    }

    /// Feed item for `[video]`, when it names a storage key.
    pub fn feed_video(&self) -> Option<Video> {
        let key = self.video.object_key.clone()?;
        Some(Video {
            id: self.video.id.clone(),
            title: self.video.id.clone(),
            description: None,
            author: Author {
                id: "script".into(),
                name: None,
            },
            r2_object_key: key,
            original_url: None,
            compressed_paths: None,
            like_count: self.video.like_count,
            is_liked: self.video.liked,
        })
    }

    /// Builds the media element described by `[video]`.
    pub fn media(&self) -> SimulatedMedia {
        SimulatedMedia::new(self.video.duration_secs)
            .with_position(self.video.start_secs)
            .with_autoplay(self.video.autoplay_allowed)
            .with_looping(self.video.looping)
    }
}

/// One line of replay output.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceEntry {
    pub at_ms: u64,
    pub event: &'static str,
    pub snapshot: PlayerSnapshot,
    pub effects: Vec<Effect>,
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.snapshot;
        write!(
            f,
            "{:>6}ms {:<13} mode={:<9} rate={:.2} pos={:>7.3}s {} liked={}/{}",
            self.at_ms,
            self.event,
            s.mode.label(),
            s.rate.value(),
            s.position_secs,
            if s.playing { "playing" } else { "paused " },
            s.liked,
            s.like_count,
        )?;
        for effect in &self.effects {
            write!(f, " [{}]", describe(effect))?;
        }
        Ok(())
    }
}

fn describe(effect: &Effect) -> String {
    match effect {
        Effect::PlaybackToggled { playing: true } => "play".into(),
        Effect::PlaybackToggled { playing: false } => "pause".into(),
        Effect::OverlayRevealed => "overlay-shown".into(),
        Effect::OverlayHidden => "overlay-hidden".into(),
        Effect::SendLike(request) => format!("{} {}", request.method.as_str(), request.path()),
        Effect::LongPressStarted => "long-press".into(),
        Effect::DirectionChanged(direction) => format!("direction={direction:?}").to_lowercase(),
        Effect::LongPressEnded => "long-press-end".into(),
        Effect::RewindReachedStart => "rewind-at-start".into(),
        Effect::Seeked(progress) => format!("seek {:.1}%", progress.value()),
        Effect::Activated { playing } => format!("activated playing={playing}"),
        Effect::Deactivated => "deactivated".into(),
    }
}

/// Replays `script` and returns its trace.
pub fn replay(
    script: &Script,
    settings: &GestureSettings,
    frame_interval: Duration,
) -> Result<Vec<TraceEntry>> {
    let frame_ms = u64::try_from(frame_interval.as_millis())
        .unwrap_or(MAX_FRAME_INTERVAL_MS)
        .clamp(MIN_FRAME_INTERVAL_MS, MAX_FRAME_INTERVAL_MS);
    let mut session = Session::new(script, settings);

    for (index, event) in script.events.iter().enumerate() {
        session.advance_to(event.at_ms, frame_ms);
        let effects = session
            .apply(event)
            .map_err(|err| Error::Script(format!("event {index} ({}): {err}", event.kind.label())))?;
        session.record(event.at_ms, event.kind.label(), effects);
    }

    log::info!("replayed {} events", script.events.len());
    Ok(session.trace)
}

struct Session {
    player: VideoPlayer<SimulatedMedia>,
    origin: Instant,
    clock_ms: u64,
    pending_likes: VecDeque<LikeRequest>,
    trace: Vec<TraceEntry>,
}

impl Session {
    fn new(script: &Script, settings: &GestureSettings) -> Self {
        let player = match script.feed_video() {
            Some(video) => VideoPlayer::for_video(&video, script.media(), settings),
            None => {
                let mut player =
                    VideoPlayer::new(script.video.id.clone(), script.media(), settings);
                player.reset_like(script.video.liked, script.video.like_count);
                player
            }
        };
        Self {
            player,
            origin: Instant::now(),
            clock_ms: 0,
            pending_likes: VecDeque::new(),
            trace: Vec::new(),
        }
    }

    fn at(&self, ms: u64) -> Instant {
        self.origin + Duration::from_millis(ms)
    }

    /// Moves the clock to `target_ms` one frame at a time.
    fn advance_to(&mut self, target_ms: u64, frame_ms: u64) {
        while self.clock_ms < target_ms {
            let next = self.clock_ms.saturating_add(frame_ms).min(target_ms);
            self.player
                .media_mut()
                .advance(Duration::from_millis(next - self.clock_ms));
            self.clock_ms = next;
            let now = self.at(next);

            let effects = self.player.tick(now);
            self.record(next, "timer", effects);

            if self.player.wants_frame() {
                let effects = self.player.on_frame(now);
                self.record(next, "frame", effects);
            } else {
                self.player.on_time_update();
            }
        }
    }

    fn record(&mut self, at_ms: u64, event: &'static str, effects: Vec<Effect>) {
        for effect in &effects {
            if let Effect::SendLike(request) = effect {
                self.pending_likes.push_back(request.clone());
            }
        }
        let is_input = event != "timer" && event != "frame";
        if is_input || !effects.is_empty() {
            self.trace.push(TraceEntry {
                at_ms,
                event,
                snapshot: self.player.snapshot(),
                effects,
            });
        }
    }

    fn apply(&mut self, event: &ScriptEvent) -> std::result::Result<Vec<Effect>, String> {
        let now = self.at(event.at_ms);
        let id = PointerId(event.pointer);
        let message = match event.kind {
            EventKind::Down => Message::PointerDown {
                id,
                point: point(event)?,
            },
            EventKind::Move => Message::PointerMove {
                id,
                point: point(event)?,
            },
            EventKind::Up => Message::PointerUp {
                id,
                point: point(event)?,
            },
            EventKind::Cancel => Message::PointerCancel { id },
            EventKind::Activate => Message::SetActive(true),
            EventKind::Deactivate => Message::SetActive(false),
            EventKind::Visibility => {
                Message::Visibility(event.ratio.ok_or("needs a ratio")?)
            }
            EventKind::ScrubRegion => {
                let origin = point(event)?;
                let (Some(width), Some(height)) = (event.width, event.height) else {
                    return Err("needs width and height".into());
                };
                Message::ScrubberRegion(Rect::new(origin.x, origin.y, width, height))
            }
            EventKind::Like => Message::LikePressed,
            EventKind::LikeOk | EventKind::LikeFail => {
                let request = self
                    .pending_likes
                    .pop_front()
                    .ok_or("no like request is pending")?;
                let outcome = if event.kind == EventKind::LikeOk {
                    Ok(())
                } else {
                    Err(LikeError("scripted failure".into()))
                };
                Message::LikeSettled { request, outcome }
            }
            EventKind::Mute => Message::ToggleMute,
            EventKind::ModalOpen => Message::ListModalOpen(true),
            EventKind::ModalClose => Message::ListModalOpen(false),
            EventKind::SeekingStart | EventKind::SeekingEnd => {
                self.player
                    .media_mut()
                    .set_seeking(event.kind == EventKind::SeekingStart);
                return Ok(Vec::new());
            }
            EventKind::Wait => return Ok(Vec::new()),
        };
        Ok(self.player.handle(message, now))
    }
}

fn point(event: &ScriptEvent) -> std::result::Result<Point, String> {
    match (event.x, event.y) {
        (Some(x), Some(y)) => Ok(Point::new(x, y)),
        _ => Err("needs x and y".into()),
    }
}
