// SPDX-License-Identifier: MPL-2.0
//! Player for one feed slide.
//!
//! Composes the gesture classifier, rewind simulator, progress scrubber,
//! overlay auto-hide and like state around the single media element of the
//! slide. Only the current gesture mode mutates the element's rate, position
//! or play state; deactivation parks the element and clears every mode.
//!
//! Every entry point takes the current instant. Due timers are serviced
//! before any pointer event is interpreted, so event order matches what a
//! real event loop would have delivered.

use super::activation::{ActivationController, Transition};
use super::gesture::{GestureClassifier, GestureThresholds};
use super::like::{LikeRequest, LikeState};
use super::media::MediaElement;
use super::overlay::OverlayVisibility;
use super::rewind::{RewindSimulator, RewindStep};
use super::scrubber::ProgressScrubber;
use crate::config::GestureSettings;
use crate::domain::gesture::{Direction, Gesture, GestureMode, Point, PointerId, Rect};
use crate::domain::video::{PlaybackIntent, PlaybackRate, ProgressPercent};
use crate::error::LikeError;
use crate::feed::Video;
use crate::player::timer::earliest;
use std::time::Instant;

/// Input to [`VideoPlayer::handle`].
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    PointerDown { id: PointerId, point: Point },
    PointerMove { id: PointerId, point: Point },
    PointerUp { id: PointerId, point: Point },
    PointerCancel { id: PointerId },
    /// Activity computed from the feed's current index.
    SetActive(bool),
    /// Fraction of the slide visible in the scrolling container.
    Visibility(f32),
    /// Timer deadline reached.
    Tick,
    /// Animation frame.
    Frame,
    /// The element reported a new position.
    TimeUpdate,
    /// The element started or stopped playing on its own.
    MediaPlaying(bool),
    /// A pending `play()` was refused by the platform.
    PlayRejected,
    ToggleMute,
    LikePressed,
    LikeSettled {
        request: LikeRequest,
        outcome: Result<(), LikeError>,
    },
    ListModalOpen(bool),
    ScrubberRegion(Rect),
}

/// Observable outcome of a message.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    PlaybackToggled { playing: bool },
    OverlayRevealed,
    OverlayHidden,
    /// Host must perform the like/unlike call and settle it.
    SendLike(LikeRequest),
    LongPressStarted,
    DirectionChanged(Direction),
    LongPressEnded,
    RewindReachedStart,
    Seeked(ProgressPercent),
    Activated { playing: bool },
    Deactivated,
}

/// Point-in-time view of a player, for rendering and traces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerSnapshot {
    pub mode: GestureMode,
    pub active: bool,
    pub playing: bool,
    pub position_secs: f64,
    pub rate: PlaybackRate,
    pub muted: bool,
    pub liked: bool,
    pub like_count: u64,
    pub progress: ProgressPercent,
    pub overlay_visible: bool,
    pub rewind_loops: usize,
}

#[derive(Debug)]
pub struct VideoPlayer<M: MediaElement> {
    video_id: String,
    media: M,
    fast_forward_rate: PlaybackRate,
    gesture: GestureClassifier,
    rewind: RewindSimulator,
    scrubber: ProgressScrubber,
    overlay: OverlayVisibility,
    activation: ActivationController,
    like: LikeState,
    playing: bool,
    progress: ProgressPercent,
    /// The pending tap started while the overlay was hidden.
    tap_reveals_only: bool,
}

impl<M: MediaElement> VideoPlayer<M> {
    /// Creates an inactive player around `media`.
    pub fn new(video_id: impl Into<String>, media: M, settings: &GestureSettings) -> Self {
        let settings = settings.sanitized();
        Self {
            video_id: video_id.into(),
            playing: !media.is_paused(),
            media,
            fast_forward_rate: settings.fast_forward_rate(),
            gesture: GestureClassifier::new(GestureThresholds::from(&settings)),
            rewind: RewindSimulator::new(settings.rewind_speed()),
            scrubber: ProgressScrubber::default(),
            overlay: OverlayVisibility::new(settings.overlay_timeout()),
            activation: ActivationController::new(settings.active_visibility_ratio),
            like: LikeState::default(),
            progress: ProgressPercent::default(),
            tap_reveals_only: false,
        }
    }

    /// Creates a player for a feed item, seeding the like state.
    pub fn for_video(video: &Video, media: M, settings: &GestureSettings) -> Self {
        let mut player = Self::new(video.id.clone(), media, settings);
        player.like = LikeState::new(video.is_liked, video.like_count);
        player
    }

    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    pub fn mode(&self) -> GestureMode {
        self.gesture.mode()
    }

    pub fn gesture(&self) -> &GestureClassifier {
        &self.gesture
    }

    pub fn is_active(&self) -> bool {
        self.activation.is_active()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn like_state(&self) -> LikeState {
        self.like
    }

    pub fn progress(&self) -> ProgressPercent {
        self.progress
    }

    pub fn is_overlay_visible(&self) -> bool {
        self.overlay.is_visible()
    }

    pub fn rewind_loops(&self) -> usize {
        self.rewind.active_loops()
    }

    /// Pointer held by the scrubber or by a long press.
    pub fn captured_pointer(&self) -> Option<PointerId> {
        self.scrubber
            .captured_pointer()
            .or_else(|| self.gesture.captured_pointer())
    }

    /// Earliest instant at which [`tick`](Self::tick) must run.
    pub fn next_deadline(&self) -> Option<Instant> {
        earliest(self.gesture.next_deadline(), self.overlay.deadline())
    }

    /// True while animation frames must be delivered to [`on_frame`](Self::on_frame).
    pub fn wants_frame(&self) -> bool {
        self.rewind.is_running()
    }

    /// What the element should be doing, derived from the current mode and
    /// play state. Reported only; the mode transitions drive the element.
    pub fn intent(&self) -> PlaybackIntent {
        let muted = self.media.is_muted();
        if !self.is_active() {
            return PlaybackIntent::parked(muted);
        }
        match self.gesture.mode().direction() {
            Some(Direction::Forward) => PlaybackIntent {
                playing: self.playing,
                muted,
                rate: self.fast_forward_rate,
            },
            Some(Direction::Rewind) => PlaybackIntent {
                playing: false,
                muted,
                rate: PlaybackRate::NORMAL,
            },
            None => PlaybackIntent {
                playing: self.playing,
                muted,
                rate: PlaybackRate::NORMAL,
            },
        }
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            mode: self.gesture.mode(),
            active: self.is_active(),
            playing: self.playing,
            position_secs: self.media.current_time(),
            rate: self.media.playback_rate(),
            muted: self.media.is_muted(),
            liked: self.like.liked,
            like_count: self.like.count,
            progress: self.progress,
            overlay_visible: self.overlay.is_visible(),
            rewind_loops: self.rewind.active_loops(),
        }
    }

    /// Dispatches a message to the matching operation.
    pub fn handle(&mut self, message: Message, now: Instant) -> Vec<Effect> {
        match message {
            Message::PointerDown { id, point } => self.pointer_down(id, point, now),
            Message::PointerMove { id, point } => self.pointer_move(id, point, now),
            Message::PointerUp { id, point } => self.pointer_up(id, point, now),
            Message::PointerCancel { id } => self.pointer_cancel(id, now),
            Message::SetActive(active) => self.set_active(active, now),
            Message::Visibility(ratio) => self.set_visibility(ratio, now),
            Message::Tick => self.tick(now),
            Message::Frame => self.on_frame(now),
            Message::TimeUpdate => {
                self.on_time_update();
                Vec::new()
            }
            Message::MediaPlaying(playing) => {
                self.on_media_playing(playing);
                Vec::new()
            }
            Message::PlayRejected => {
                self.on_play_rejected();
                Vec::new()
            }
            Message::ToggleMute => {
                self.toggle_mute(now);
                Vec::new()
            }
            Message::LikePressed => vec![self.press_like(now)],
            Message::LikeSettled { request, outcome } => {
                self.settle_like(&request, outcome);
                Vec::new()
            }
            Message::ListModalOpen(open) => {
                self.set_list_modal_open(open, now);
                Vec::new()
            }
            Message::ScrubberRegion(region) => {
                self.scrubber.set_region(region);
                Vec::new()
            }
        }
    }

    // ---------------------------------------------------------------------
    // Pointer input
    // ---------------------------------------------------------------------

    /// Inactive slides ignore pointer input entirely.
    pub fn pointer_down(&mut self, id: PointerId, point: Point, now: Instant) -> Vec<Effect> {
        let mut effects = self.tick(now);
        if !self.is_active() {
            return effects;
        }

        if self.scrubber.hit(point) && !self.scrubber.is_dragging() && self.gesture.session().is_none() {
            if let Some(flushed) = self.gesture.enter_seeking() {
                self.apply(flushed, now, &mut effects);
            }
            let progress = self.scrubber.pointer_down(id, point, &mut self.media);
            self.progress = progress;
            self.overlay.show_and_reset(now);
            effects.push(Effect::Seeked(progress));
            return effects;
        }

        let overlay_was_hidden = !self.overlay.is_visible();
        if let Some(gesture) = self.gesture.pointer_down(id, point, now) {
            self.apply(gesture, now, &mut effects);
        }
        if self.gesture.session().is_some_and(|s| s.pointer_id == id) {
            self.tap_reveals_only = overlay_was_hidden;
            self.overlay.show_and_reset(now);
        }
        self.sync_playing();
        effects
    }

    pub fn pointer_move(&mut self, id: PointerId, point: Point, now: Instant) -> Vec<Effect> {
        let mut effects = self.tick(now);

        if let Some(progress) = self.scrubber.pointer_move(id, point, &mut self.media) {
            self.progress = progress;
            self.overlay.show_and_reset(now);
            effects.push(Effect::Seeked(progress));
            return effects;
        }

        if let Some(gesture) = self.gesture.pointer_move(id, point) {
            self.apply(gesture, now, &mut effects);
        }
        self.sync_playing();
        effects
    }

    pub fn pointer_up(&mut self, id: PointerId, point: Point, now: Instant) -> Vec<Effect> {
        let mut effects = self.tick(now);

        if self.scrubber.pointer_up(id) {
            self.gesture.exit_seeking();
            self.overlay.show_and_reset(now);
            return effects;
        }

        if let Some(gesture) = self.gesture.pointer_up(id, point, now) {
            self.apply(gesture, now, &mut effects);
        }
        self.sync_playing();
        effects
    }

    pub fn pointer_cancel(&mut self, id: PointerId, now: Instant) -> Vec<Effect> {
        let mut effects = self.tick(now);

        if self.scrubber.pointer_up(id) {
            self.gesture.exit_seeking();
            return effects;
        }

        if let Some(gesture) = self.gesture.pointer_cancel(id) {
            self.apply(gesture, now, &mut effects);
        }
        self.sync_playing();
        effects
    }

    // ---------------------------------------------------------------------
    // Time
    // ---------------------------------------------------------------------

    /// Services due timers: long press, deferred tap, overlay hide.
    pub fn tick(&mut self, now: Instant) -> Vec<Effect> {
        let mut effects = Vec::new();
        if let Some(gesture) = self.gesture.tick(now) {
            self.apply(gesture, now, &mut effects);
        }
        if self.overlay.tick(now, !self.media.is_paused()) {
            effects.push(Effect::OverlayHidden);
        }
        self.sync_playing();
        effects
    }

    /// Services one animation frame of the rewind loop.
    pub fn on_frame(&mut self, now: Instant) -> Vec<Effect> {
        let mut effects = Vec::new();
        match self.rewind.on_frame(&mut self.media, now) {
            RewindStep::ReachedStart => {
                self.gesture.clear_direction();
                effects.push(Effect::RewindReachedStart);
            }
            RewindStep::Rewound { .. } | RewindStep::Idle => {}
        }
        self.on_time_update();
        self.sync_playing();
        effects
    }

    // ---------------------------------------------------------------------
    // Activation
    // ---------------------------------------------------------------------

    pub fn set_active(&mut self, active: bool, now: Instant) -> Vec<Effect> {
        let transition = self.activation.update(active);
        self.apply_transition(transition, now)
    }

    pub fn set_visibility(&mut self, ratio: f32, now: Instant) -> Vec<Effect> {
        let transition = self.activation.update_ratio(ratio);
        self.apply_transition(transition, now)
    }

    /// Cancels every timer and loop; the player can be dropped afterwards.
    pub fn unmount(&mut self) {
        self.gesture.reset();
        self.rewind.stop();
        self.scrubber.release();
        self.overlay.show_static();
        log::debug!("player for {} unmounted", self.video_id);
    }

    fn apply_transition(&mut self, transition: Option<Transition>, now: Instant) -> Vec<Effect> {
        match transition {
            Some(Transition::Activated) => {
                let playing = self.try_play();
                self.overlay.show_and_reset(now);
                log::debug!("slide {} activated (playing: {playing})", self.video_id);
                vec![Effect::Activated { playing }]
            }
            Some(Transition::Deactivated) => {
                self.park();
                log::debug!("slide {} deactivated", self.video_id);
                vec![Effect::Deactivated]
            }
            None => Vec::new(),
        }
    }

    /// Paused, at 0, normal rate, no gesture state left behind.
    fn park(&mut self) {
        self.gesture.reset();
        self.rewind.stop();
        self.scrubber.release();
        self.media.pause();
        self.media.set_current_time(0.0);
        self.media.set_playback_rate(PlaybackRate::NORMAL);
        self.playing = false;
        self.progress = ProgressPercent::default();
        self.tap_reveals_only = false;
        self.overlay.show_static();
    }

    // ---------------------------------------------------------------------
    // Media notifications and controls
    // ---------------------------------------------------------------------

    pub fn on_time_update(&mut self) {
        let duration = self.media.duration().unwrap_or(0.0);
        if let Some(progress) = ProgressPercent::from_position(self.media.current_time(), duration) {
            self.progress = progress;
        }
    }

    pub fn on_media_playing(&mut self, playing: bool) {
        self.playing = playing;
        if !playing {
            self.overlay.show_static();
        }
    }

    /// A `play()` the host reported as refused after the fact.
    pub fn on_play_rejected(&mut self) {
        log::debug!("autoplay refused for {}", self.video_id);
        self.media.pause();
        self.playing = false;
        self.overlay.show_static();
    }

    pub fn toggle_mute(&mut self, now: Instant) {
        let muted = !self.media.is_muted();
        self.media.set_muted(muted);
        self.overlay.show_and_reset(now);
    }

    pub fn press_like(&mut self, now: Instant) -> Effect {
        self.overlay.show_and_reset(now);
        Effect::SendLike(self.like.toggle(&self.video_id))
    }

    pub fn settle_like(&mut self, request: &LikeRequest, outcome: Result<(), LikeError>) {
        self.like.settle(request, outcome);
    }

    /// The parent delivered fresh server state for this video.
    pub fn reset_like(&mut self, liked: bool, count: u64) {
        self.like.reset(liked, count);
    }

    pub fn set_list_modal_open(&mut self, open: bool, now: Instant) {
        self.overlay.set_pinned(open, now);
    }

    pub fn set_scrubber_region(&mut self, region: Rect) {
        self.scrubber.set_region(region);
    }

    // ---------------------------------------------------------------------
    // Gesture effects
    // ---------------------------------------------------------------------

    fn apply(&mut self, gesture: Gesture, now: Instant, effects: &mut Vec<Effect>) {
        if !self.is_active() {
            log::trace!("dropping {gesture:?} on inactive slide {}", self.video_id);
            return;
        }
        match gesture {
            Gesture::Tap => {
                if std::mem::take(&mut self.tap_reveals_only) {
                    self.overlay.show_and_reset(now);
                    effects.push(Effect::OverlayRevealed);
                } else {
                    effects.push(self.toggle_play(now));
                }
            }
            Gesture::DoubleTap => effects.push(self.press_like(now)),
            Gesture::LongPressStarted => {
                self.media.set_playback_rate(self.fast_forward_rate);
                log::debug!("fast-forward at {}x", self.fast_forward_rate.value());
                effects.push(Effect::LongPressStarted);
            }
            Gesture::DirectionChanged(Direction::Forward) => {
                self.rewind.stop();
                if self.media.is_paused() {
                    self.try_play();
                }
                self.media.set_playback_rate(self.fast_forward_rate);
                effects.push(Effect::DirectionChanged(Direction::Forward));
            }
            Gesture::DirectionChanged(Direction::Rewind) => {
                self.rewind.start(&mut self.media, now);
                effects.push(Effect::DirectionChanged(Direction::Rewind));
            }
            Gesture::LongPressEnded => {
                self.media.set_playback_rate(PlaybackRate::NORMAL);
                self.rewind.stop();
                if self.media.is_paused() {
                    self.try_play();
                }
                self.overlay.show_and_reset(now);
                log::debug!("long press released");
                effects.push(Effect::LongPressEnded);
            }
        }
    }

    fn toggle_play(&mut self, now: Instant) -> Effect {
        if self.media.is_paused() {
            let playing = self.try_play();
            if playing {
                self.overlay.show_and_reset(now);
            }
            Effect::PlaybackToggled { playing }
        } else {
            self.media.pause();
            self.playing = false;
            self.overlay.show_static();
            Effect::PlaybackToggled { playing: false }
        }
    }

    /// Starts playback, absorbing a refusal into a paused visual state.
    fn try_play(&mut self) -> bool {
        match self.media.play() {
            Ok(()) => {
                self.playing = true;
                true
            }
            Err(err) => {
                log::debug!("play() for {} refused: {err}", self.video_id);
                self.playing = false;
                false
            }
        }
    }

    fn sync_playing(&mut self) {
        self.playing = !self.media.is_paused();
    }
}
