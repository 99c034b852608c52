// SPDX-License-Identifier: MPL-2.0
//! Async host loop for a [`VideoPlayer`].
//!
//! Stands in for the browser event loop: messages arrive over an unbounded
//! channel, timer deadlines become `sleep_until`, and the rewind loop gets a
//! frame every `frame_interval` while it runs. Effects are forwarded to the
//! host. Dropping every command sender unmounts the player and ends the task.

use super::media::MediaElement;
use super::state::{Effect, Message, VideoPlayer};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Handle to a player running in its own task.
pub struct PlayerHandle<M: MediaElement> {
    /// Channel for sending messages to the player task.
    command_tx: mpsc::UnboundedSender<Message>,

    /// Effects emitted by the player, in order.
    effect_rx: mpsc::UnboundedReceiver<Effect>,

    task: JoinHandle<VideoPlayer<M>>,
}

impl<M> PlayerHandle<M>
where
    M: MediaElement + Send + 'static,
{
    /// Spawns `player` on the current Tokio runtime.
    pub fn spawn(player: VideoPlayer<M>, frame_interval: Duration) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (effect_tx, effect_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(player, command_rx, effect_tx, frame_interval));
        Self {
            command_tx,
            effect_rx,
            task,
        }
    }

    /// Sends a message to the player. Fails only if the task has ended.
    pub fn send(&self, message: Message) -> crate::error::Result<()> {
        self.command_tx
            .send(message)
            .map_err(|_| crate::error::Error::Io("player task has stopped".into()))
    }

    /// Receives the next effect, waiting if none is queued.
    pub async fn recv_effect(&mut self) -> Option<Effect> {
        self.effect_rx.recv().await
    }

    /// Drains every effect already emitted.
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        while let Ok(effect) = self.effect_rx.try_recv() {
            effects.push(effect);
        }
        effects
    }

    /// Closes the command channel and waits for the unmounted player.
    pub async fn shutdown(self) -> crate::error::Result<VideoPlayer<M>> {
        drop(self.command_tx);
        self.task
            .await
            .map_err(|err| crate::error::Error::Io(format!("player task failed: {err}")))
    }
}

fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

async fn sleep_until(deadline: Option<tokio::time::Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}

/// Runs `player` until every sender of `commands` is dropped, then
/// unmounts it and hands it back.
pub async fn run<M: MediaElement>(
    mut player: VideoPlayer<M>,
    mut commands: mpsc::UnboundedReceiver<Message>,
    effects: mpsc::UnboundedSender<Effect>,
    frame_interval: Duration,
) -> VideoPlayer<M> {
    let mut next_frame: Option<tokio::time::Instant> = None;

    loop {
        next_frame = match (player.wants_frame(), next_frame) {
            (true, None) => Some(tokio::time::Instant::now() + frame_interval),
            (true, pending) => pending,
            (false, _) => None,
        };
        let deadline = player.next_deadline().map(tokio::time::Instant::from_std);

        let emitted = tokio::select! {
            biased;

            message = commands.recv() => match message {
                Some(message) => player.handle(message, now()),
                None => break,
            },

            () = sleep_until(deadline) => player.handle(Message::Tick, now()),

            () = sleep_until(next_frame) => {
                next_frame = None;
                player.handle(Message::Frame, now())
            }
        };

        for effect in emitted {
            if effects.send(effect).is_err() {
                log::trace!("effect receiver dropped");
            }
        }
    }

    player.unmount();
    player
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GestureSettings;
    use crate::domain::gesture::{Direction, Point, PointerId};
    use crate::player::media::SimulatedMedia;

    const FINGER: PointerId = PointerId(1);
    const FRAME: Duration = Duration::from_millis(16);

    fn spawn_player(position: f64) -> PlayerHandle<SimulatedMedia> {
        let media = SimulatedMedia::new(30.0).with_position(position);
        let player = VideoPlayer::new("v1", media, &GestureSettings::default());
        PlayerHandle::spawn(player, FRAME)
    }

    #[tokio::test(start_paused = true)]
    async fn long_press_timer_fires_without_input() {
        let mut handle = spawn_player(5.0);
        handle.send(Message::SetActive(true)).unwrap();
        handle
            .send(Message::PointerDown {
                id: FINGER,
                point: Point::new(100.0, 100.0),
            })
            .unwrap();

        tokio::time::sleep(Duration::from_millis(350)).await;

        assert_eq!(
            handle.drain_effects(),
            vec![Effect::Activated { playing: true }, Effect::LongPressStarted]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn rewind_is_driven_by_frames() {
        let mut handle = spawn_player(10.0);
        handle.send(Message::SetActive(true)).unwrap();
        handle
            .send(Message::PointerDown {
                id: FINGER,
                point: Point::new(100.0, 100.0),
            })
            .unwrap();
        tokio::time::sleep(Duration::from_millis(350)).await;
        handle
            .send(Message::PointerMove {
                id: FINGER,
                point: Point::new(40.0, 100.0),
            })
            .unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(handle
            .drain_effects()
            .contains(&Effect::DirectionChanged(Direction::Rewind)));

        let player = handle.shutdown().await.unwrap();
        let position = player.media().current_time();
        assert!(position < 10.0 && position > 9.5, "position was {position}");
        assert_eq!(player.rewind_loops(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn closing_channel_unmounts() {
        let handle = spawn_player(0.0);
        handle.send(Message::SetActive(true)).unwrap();
        handle
            .send(Message::PointerDown {
                id: FINGER,
                point: Point::new(10.0, 10.0),
            })
            .unwrap();

        let player = handle.shutdown().await.unwrap();

        assert_eq!(player.next_deadline(), None);
        assert!(!player.wants_frame());
    }
}
