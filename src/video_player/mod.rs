// SPDX-License-Identifier: MPL-2.0
//! Video playback control for the preview modal.
//!
//! The [`PlaybackController`] is a single-threaded state machine driven by
//! discrete callbacks (user input, engine notifications, display frames and
//! the auto-hide timer). [`runner`] hosts it on a tokio task; the iced app
//! in [`crate::app`] hosts it directly in its update loop.

pub mod auto_hide;
mod controller;
pub mod engine;
pub mod runner;
pub mod sampler;
pub mod session;
mod simulated;
pub mod time_format;

pub use auto_hide::{ControlsVisibility, HideDelay};
pub use controller::{
    ControllerSettings, FrameOutcome, PlaybackController, PlaybackSnapshot, ProgressBar,
    ProgressSurface,
};
pub use engine::{EngineEvent, MediaEngine};
pub use runner::{SessionCommand, SessionHandle};
pub use sampler::{CancelToken, SamplerState};
pub use session::{PlaybackSession, SessionId};
pub use simulated::SimulatedEngine;

use crate::config::Config;

/// Creates a controller over `engine` configured from the user settings.
pub fn create_controller<E: MediaEngine>(engine: E, config: &Config) -> PlaybackController<E> {
    PlaybackController::new(engine, ControllerSettings::from_config(config))
}
