// SPDX-License-Identifier: MPL-2.0
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Config Error: {0}")]
    Config(String),

    #[error("Engine Error: {0}")]
    Engine(#[from] EngineError),
}

/// Failures reported by a media engine.
///
/// The playback controller recovers from every one of these locally; they are
/// logged but never shown to the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// No media has been loaded yet, or metadata is still pending.
    #[error("Media engine is not ready")]
    NotReady,

    /// The engine refused to start playback (e.g. autoplay policy).
    #[error("Playback was rejected: {0}")]
    PlaybackRejected(String),

    /// Fullscreen is not supported or was denied.
    #[error("Fullscreen is unavailable")]
    FullscreenUnavailable,

    /// The source could not be loaded.
    #[error("Failed to load media: {0}")]
    Load(String),

    /// The engine has been shut down.
    #[error("Media engine is closed")]
    Closed,
}

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
