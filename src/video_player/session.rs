// SPDX-License-Identifier: MPL-2.0
//! State of one open modal, from open to close.

use crate::config::DEFAULT_TITLE;

/// Identity of a playback session.
///
/// Ids increase monotonically per controller, so a timer registered by an
/// earlier session can never be mistaken for one of the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    #[must_use]
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Media state of one open modal.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSession {
    pub id: SessionId,
    pub source_url: String,
    pub title: String,
    /// True only while the engine has confirmed playback.
    pub is_playing: bool,
    pub is_muted: bool,
    /// Declarative position shown by the readout, in seconds.
    pub current_time: f64,
    /// Total duration, `None` until metadata is ready.
    pub duration: Option<f64>,
    pub is_seeking: bool,
    pub controls_visible: bool,
}

impl PlaybackSession {
    /// Creates a session with every field at its default.
    #[must_use]
    pub fn new(id: SessionId, source_url: String, title: Option<String>, muted: bool) -> Self {
        Self {
            id,
            source_url,
            title: title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            is_playing: false,
            is_muted: muted,
            current_time: 0.0,
            duration: None,
            is_seeking: false,
            controls_visible: true,
        }
    }

    /// Clamps a candidate position to `[0, duration]`.
    ///
    /// Before metadata arrives only the lower bound applies.
    #[must_use]
    pub fn clamp_time(&self, secs: f64) -> f64 {
        let secs = if secs.is_finite() { secs.max(0.0) } else { 0.0 };
        match self.duration {
            Some(total) => secs.min(total),
            None => secs,
        }
    }
}
