// SPDX-License-Identifier: MPL-2.0
//! Tokio host for a playback controller.
//!
//! The controller lives inside a single task. Callers talk to it through an
//! unbounded command channel and observe it through a `watch` channel of
//! [`PlaybackSnapshot`]s. The task only polls the frame interval while a
//! frame is pending, and only sleeps on the hide deadline while the timer is
//! armed, so an idle or paused session costs nothing.

use super::controller::{PlaybackController, PlaybackSnapshot, ProgressSurface};
use super::engine::{EngineEvent, MediaEngine};
use crate::config::FRAME_INTERVAL_MS;
use crate::error::EngineError;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

/// Commands accepted by a running session task.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Open {
        source: String,
        title: Option<String>,
    },
    Close,
    TogglePlay,
    ToggleMute,
    ToggleFullscreen,
    BeginSeek,
    SeekPreview(f64),
    CommitSeek(f64),
    EndSeek,
    Activity,
    /// Forwards a notification from an engine that pushes events.
    Engine(EngineEvent),
    /// Closes the session and stops the task.
    Shutdown,
}

/// Cloneable handle to a running session task.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    commands: mpsc::UnboundedSender<SessionCommand>,
    snapshots: watch::Receiver<PlaybackSnapshot>,
}

impl SessionHandle {
    /// Sends a command. Fails with [`EngineError::Closed`] once the task has stopped.
    pub fn send(&self, command: SessionCommand) -> Result<(), EngineError> {
        self.commands
            .send(command)
            .map_err(|_| EngineError::Closed)
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.snapshots.borrow().clone()
    }

    /// A receiver that is notified whenever the snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<PlaybackSnapshot> {
        self.snapshots.clone()
    }
}

/// Spawns the session task on the current tokio runtime.
///
/// The controller is handed back through the join handle when the task stops.
pub fn spawn<E, S>(
    controller: PlaybackController<E, S>,
) -> (SessionHandle, JoinHandle<PlaybackController<E, S>>)
where
    E: MediaEngine + Send + 'static,
    S: ProgressSurface + Send + 'static,
{
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (snapshot_tx, snapshot_rx) = watch::channel(controller.snapshot());
    let task = tokio::spawn(run(controller, command_rx, snapshot_tx));
    (
        SessionHandle {
            commands: command_tx,
            snapshots: snapshot_rx,
        },
        task,
    )
}

fn now() -> Instant {
    time::Instant::now().into_std()
}

async fn run<E, S>(
    mut controller: PlaybackController<E, S>,
    mut commands: mpsc::UnboundedReceiver<SessionCommand>,
    snapshots: watch::Sender<PlaybackSnapshot>,
) -> PlaybackController<E, S>
where
    E: MediaEngine,
    S: ProgressSurface,
{
    let mut frames = time::interval(Duration::from_millis(FRAME_INTERVAL_MS));
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        let sampling = controller.pending_frame().is_some();
        let hide_at = controller.hide_deadline().map(|(_, deadline)| deadline);
        // Only polled while armed; the fallback just keeps the expression valid.
        let hide_sleep = time::sleep_until(
            hide_at
                .map(time::Instant::from_std)
                .unwrap_or_else(time::Instant::now),
        );

        tokio::select! {
            command = commands.recv() => match command {
                None | Some(SessionCommand::Shutdown) => break,
                Some(command) => apply(&mut controller, command, now()),
            },
            _ = frames.tick(), if sampling => {
                controller.advance_to(now());
            }
            _ = hide_sleep, if hide_at.is_some() => {
                controller.advance_to(now());
            }
        }

        publish(&controller, &snapshots);
    }

    controller.close();
    publish(&controller, &snapshots);
    log::debug!("session task stopped");
    controller
}

fn apply<E, S>(controller: &mut PlaybackController<E, S>, command: SessionCommand, now: Instant)
where
    E: MediaEngine,
    S: ProgressSurface,
{
    match command {
        SessionCommand::Open { source, title } => controller.open(source, title),
        SessionCommand::Close => controller.close(),
        SessionCommand::TogglePlay => controller.toggle_play(now),
        SessionCommand::ToggleMute => controller.toggle_mute(),
        SessionCommand::ToggleFullscreen => controller.toggle_fullscreen(),
        SessionCommand::BeginSeek => controller.begin_seek(),
        SessionCommand::SeekPreview(secs) => controller.update_seek_preview(secs),
        SessionCommand::CommitSeek(secs) => controller.commit_seek(secs),
        SessionCommand::EndSeek => controller.end_seek(now),
        SessionCommand::Activity => controller.report_activity(now),
        SessionCommand::Engine(event) => controller.on_engine_event(event, now),
        SessionCommand::Shutdown => {}
    }
    controller.pump_engine_events(now);
}

fn publish<E, S>(controller: &PlaybackController<E, S>, snapshots: &watch::Sender<PlaybackSnapshot>)
where
    E: MediaEngine,
    S: ProgressSurface,
{
    let next = controller.snapshot();
    snapshots.send_if_modified(|current| {
        if *current == next {
            false
        } else {
            *current = next;
            true
        }
    });
}
