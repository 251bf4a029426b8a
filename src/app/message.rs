// SPDX-License-Identifier: MPL-2.0
//! Application messages and launch flags.

use crate::ui::video_modal;
use iced::window;
use std::time::Instant;

/// Top-level messages handled by [`App::update`](super::App).
#[derive(Debug, Clone)]
pub enum Message {
    /// The host asks for the modal to open (`true`) or close (`false`).
    ModalOpenChange(bool),
    Modal(video_modal::Message),
    /// Display frame / timer tick.
    Tick(Instant),
    /// A window event revealed the main window id.
    WindowSeen(window::Id),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Flags {
    /// Media URL bound to the preview session.
    pub source: Option<String>,
    /// Title shown in the modal header.
    pub title: Option<String>,
    /// Length of the simulated media in seconds.
    pub duration_secs: Option<f64>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `PREVIEW_MODAL_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
}
