// SPDX-License-Identifier: MPL-2.0
//! Media engine contract.
//!
//! The playback controller treats the engine as an opaque capability set:
//! anything that can load a seekable source, play, pause, report its position
//! and toggle mute/fullscreen can sit behind this trait.

use crate::error::EngineError;
use std::time::Instant;

/// Notifications emitted by a media engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineEvent {
    /// Metadata became available; carries the total duration in seconds.
    MetadataReady { duration_secs: f64 },

    /// The playback position changed (periodic or after a seek).
    TimeChanged { position_secs: f64 },

    /// Playback reached the end of the media.
    Ended,
}

/// A single media-playback engine, exclusively owned by one controller.
pub trait MediaEngine {
    /// Loads a source without starting playback.
    fn load(&mut self, source: &str) -> Result<(), EngineError>;

    /// Starts playback. `Ok` means the engine confirmed it is playing.
    fn play(&mut self) -> Result<(), EngineError>;

    fn pause(&mut self);

    /// Current playback position in seconds.
    fn position(&self) -> f64;

    fn set_position(&mut self, secs: f64);

    fn set_muted(&mut self, muted: bool);

    fn is_fullscreen(&self) -> bool;

    fn request_fullscreen(&mut self) -> Result<(), EngineError>;

    fn exit_fullscreen(&mut self) -> Result<(), EngineError>;

    /// Brings a clock-driven engine up to `now` before it is sampled.
    ///
    /// Engines that track their own position ignore this.
    fn sync_to(&mut self, _now: Instant) {}

    /// Returns the next queued notification, for engines that do not push
    /// events into the controller themselves.
    fn poll_event(&mut self) -> Option<EngineEvent> {
        None
    }
}
