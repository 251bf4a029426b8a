// SPDX-License-Identifier: MPL-2.0
//! Deterministic, clock-driven media engine.
//!
//! `SimulatedEngine` advances its position from the `Instant`s handed to
//! [`MediaEngine::sync_to`], so tests can drive playback on a virtual timeline
//! and the demo can drive it from the wall clock.

use super::engine::{EngineEvent, MediaEngine};
use crate::error::EngineError;
use std::collections::VecDeque;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct SimulatedEngine {
    duration_secs: f64,
    source: Option<String>,
    position_secs: f64,
    playing: bool,
    muted: bool,
    fullscreen: bool,
    fullscreen_supported: bool,
    autoplay_blocked: bool,
    /// Last instant the position was advanced to. `None` until the first sync
    /// after playback starts.
    last_sync: Option<Instant>,
    events: VecDeque<EngineEvent>,
}

impl SimulatedEngine {
    /// Creates an engine whose media lasts `duration_secs`.
    #[must_use]
    pub fn new(duration_secs: f64) -> Self {
        Self {
            duration_secs: duration_secs.max(0.0),
            source: None,
            position_secs: 0.0,
            playing: false,
            muted: false,
            fullscreen: false,
            fullscreen_supported: true,
            autoplay_blocked: false,
            last_sync: None,
            events: VecDeque::new(),
        }
    }

    /// Makes every `play()` fail as if blocked by an autoplay policy.
    #[must_use]
    pub fn with_autoplay_blocked(mut self) -> Self {
        self.autoplay_blocked = true;
        self
    }

    /// Makes fullscreen requests fail.
    #[must_use]
    pub fn without_fullscreen(mut self) -> Self {
        self.fullscreen_supported = false;
        self
    }

    pub fn set_autoplay_blocked(&mut self, blocked: bool) {
        self.autoplay_blocked = blocked;
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }
}

impl MediaEngine for SimulatedEngine {
    fn load(&mut self, source: &str) -> Result<(), EngineError> {
        // Unbind the previous media first so a failed load leaves nothing playable.
        self.source = None;
        self.position_secs = 0.0;
        self.playing = false;
        self.last_sync = None;
        self.events.clear();

        if source.trim().is_empty() {
            return Err(EngineError::Load("empty source".to_string()));
        }
        self.source = Some(source.to_string());
        self.events.push_back(EngineEvent::MetadataReady {
            duration_secs: self.duration_secs,
        });
        Ok(())
    }

    fn play(&mut self) -> Result<(), EngineError> {
        if self.source.is_none() {
            return Err(EngineError::NotReady);
        }
        if self.autoplay_blocked {
            return Err(EngineError::PlaybackRejected(
                "autoplay policy denied playback".to_string(),
            ));
        }
        if self.position_secs >= self.duration_secs {
            self.position_secs = 0.0;
        }
        self.playing = true;
        self.last_sync = None;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
        self.last_sync = None;
    }

    fn position(&self) -> f64 {
        self.position_secs
    }

    fn set_position(&mut self, secs: f64) {
        self.position_secs = secs.clamp(0.0, self.duration_secs);
        // Re-anchor on the next sync so time spent before the seek is not replayed.
        self.last_sync = None;
        self.events.push_back(EngineEvent::TimeChanged {
            position_secs: self.position_secs,
        });
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn request_fullscreen(&mut self) -> Result<(), EngineError> {
        if !self.fullscreen_supported {
            return Err(EngineError::FullscreenUnavailable);
        }
        self.fullscreen = true;
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> Result<(), EngineError> {
        if !self.fullscreen_supported {
            return Err(EngineError::FullscreenUnavailable);
        }
        self.fullscreen = false;
        Ok(())
    }

    fn sync_to(&mut self, now: Instant) {
        if !self.playing {
            return;
        }
        let Some(last) = self.last_sync.replace(now) else {
            return;
        };
        let elapsed = now.saturating_duration_since(last).as_secs_f64();
        self.position_secs = (self.position_secs + elapsed).min(self.duration_secs);
        if self.position_secs >= self.duration_secs {
            self.playing = false;
            self.last_sync = None;
            self.events.push_back(EngineEvent::Ended);
        }
    }

    fn poll_event(&mut self) -> Option<EngineEvent> {
        self.events.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn loaded(duration: f64) -> SimulatedEngine {
        let mut engine = SimulatedEngine::new(duration);
        engine.load("preview.mp4").expect("load should succeed");
        engine
    }

    #[test]
    fn load_queues_metadata() {
        let mut engine = loaded(125.0);
        assert_eq!(
            engine.poll_event(),
            Some(EngineEvent::MetadataReady {
                duration_secs: 125.0
            })
        );
        assert_eq!(engine.poll_event(), None);
    }

    #[test]
    fn load_rejects_empty_source() {
        let mut engine = SimulatedEngine::new(10.0);
        assert!(matches!(engine.load("  "), Err(EngineError::Load(_))));
    }

    #[test]
    fn failed_load_unbinds_previous_media() {
        let mut engine = loaded(30.0);
        engine.play().unwrap();

        assert!(engine.load("").is_err());

        assert_eq!(engine.source(), None);
        assert!(!engine.is_playing());
        assert_eq!(engine.poll_event(), None);
        assert_eq!(engine.play(), Err(EngineError::NotReady));
    }

    #[test]
    fn play_before_load_is_not_ready() {
        let mut engine = SimulatedEngine::new(10.0);
        assert_eq!(engine.play(), Err(EngineError::NotReady));
    }

    #[test]
    fn blocked_autoplay_rejects_play() {
        let mut engine = SimulatedEngine::new(10.0).with_autoplay_blocked();
        engine.load("preview.mp4").unwrap();
        assert!(matches!(
            engine.play(),
            Err(EngineError::PlaybackRejected(_))
        ));
        assert!(!engine.is_playing());
    }

    #[test]
    fn sync_advances_only_while_playing() {
        let mut engine = loaded(60.0);
        let t0 = Instant::now();
        engine.sync_to(t0 + Duration::from_secs(5));
        assert_eq!(engine.position(), 0.0);

        engine.play().unwrap();
        engine.sync_to(t0);
        engine.sync_to(t0 + Duration::from_secs(2));
        assert!((engine.position() - 2.0).abs() < 1e-9);

        engine.pause();
        engine.sync_to(t0 + Duration::from_secs(10));
        assert!((engine.position() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn reaching_the_end_stops_and_reports_ended() {
        let mut engine = loaded(1.0);
        let _ = engine.poll_event();
        let t0 = Instant::now();
        engine.play().unwrap();
        engine.sync_to(t0);
        engine.sync_to(t0 + Duration::from_secs(3));

        assert_eq!(engine.position(), 1.0);
        assert!(!engine.is_playing());
        assert_eq!(engine.poll_event(), Some(EngineEvent::Ended));
    }

    #[test]
    fn set_position_clamps_and_reports() {
        let mut engine = loaded(30.0);
        let _ = engine.poll_event();
        engine.set_position(45.0);
        assert_eq!(engine.position(), 30.0);
        assert_eq!(
            engine.poll_event(),
            Some(EngineEvent::TimeChanged {
                position_secs: 30.0
            })
        );
    }

    #[test]
    fn fullscreen_toggles_unless_unsupported() {
        let mut engine = loaded(10.0);
        engine.request_fullscreen().unwrap();
        assert!(engine.is_fullscreen());
        engine.exit_fullscreen().unwrap();
        assert!(!engine.is_fullscreen());

        let mut unsupported = SimulatedEngine::new(10.0).without_fullscreen();
        assert_eq!(
            unsupported.request_fullscreen(),
            Err(EngineError::FullscreenUnavailable)
        );
        assert!(!unsupported.is_fullscreen());
    }
}
