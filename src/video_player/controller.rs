// SPDX-License-Identifier: MPL-2.0
//! Playback controller for the video preview modal.
//!
//! Mediates between one [`MediaEngine`] and the visual control surface. Three
//! independent sources update the shared position:
//! - the sampler, once per display frame while playing,
//! - seek gestures on the progress slider,
//! - engine notifications (metadata, time changes, end of media).
//!
//! The progress element is written imperatively on every frame through
//! [`ProgressSurface`], while the numeric readout and everything else in
//! [`PlaybackSnapshot`] changes at most a few times per second.
//!
//! Nothing here blocks or spawns: pending work is exposed as [`CancelToken`]s
//! that the host redeems through [`PlaybackController::on_frame`] and
//! [`PlaybackController::on_hide_timer`] (or simply [`PlaybackController::advance_to`]).

use super::auto_hide::{ControlsVisibility, HideDelay};
use super::engine::{EngineEvent, MediaEngine};
use super::sampler::{CancelToken, ReadoutGate, SamplerState, TokenSource};
use super::session::{PlaybackSession, SessionId};
use super::time_format::{format_readout, progress_percent};
use crate::config::{
    Config, DEFAULT_READOUT_INTERVAL_MS, DEFAULT_TITLE, MAX_READOUT_INTERVAL_MS,
    MIN_READOUT_INTERVAL_MS,
};
use std::time::{Duration, Instant};

/// The imperatively updated progress element (slider value and fill).
pub trait ProgressSurface {
    fn set_progress(&mut self, position_secs: f64, percent: f64);
}

/// Default surface: remembers the last written position.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProgressBar {
    pub position_secs: f64,
    pub percent: f64,
}

impl ProgressSurface for ProgressBar {
    fn set_progress(&mut self, position_secs: f64, percent: f64) {
        self.position_secs = position_secs;
        self.percent = percent;
    }
}

/// Validated runtime settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerSettings {
    pub hide_delay: HideDelay,
    pub readout_interval: Duration,
    pub start_muted: bool,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            hide_delay: HideDelay::default(),
            readout_interval: Duration::from_millis(u64::from(DEFAULT_READOUT_INTERVAL_MS)),
            start_muted: false,
        }
    }
}

impl ControllerSettings {
    /// Builds settings from the user configuration, clamping out-of-range values.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let defaults = Self::default();
        let hide_delay = config
            .controls
            .hide_delay_secs
            .map_or(defaults.hide_delay, HideDelay::new);
        let readout_ms = config
            .playback
            .readout_interval_ms
            .unwrap_or(DEFAULT_READOUT_INTERVAL_MS)
            .clamp(MIN_READOUT_INTERVAL_MS, MAX_READOUT_INTERVAL_MS);
        Self {
            hide_delay,
            readout_interval: Duration::from_millis(u64::from(readout_ms)),
            start_muted: config.playback.start_muted.unwrap_or(false),
        }
    }
}

/// Result of redeeming a frame token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// The token was cancelled or belongs to another session; nothing changed.
    Stale,
    /// The engine was sampled and the surface written.
    Sampled {
        position_secs: f64,
        readout_refreshed: bool,
    },
}

/// Low-frequency, declarative view of the session for renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSnapshot {
    pub is_open: bool,
    pub title: String,
    pub is_playing: bool,
    pub is_muted: bool,
    pub is_seeking: bool,
    pub is_fullscreen: bool,
    pub controls_visible: bool,
    pub current_time: f64,
    pub duration: Option<f64>,
    pub readout: String,
    pub progress_percent: f64,
}

impl Default for PlaybackSnapshot {
    fn default() -> Self {
        Self {
            is_open: false,
            title: DEFAULT_TITLE.to_string(),
            is_playing: false,
            is_muted: false,
            is_seeking: false,
            is_fullscreen: false,
            controls_visible: true,
            current_time: 0.0,
            duration: None,
            readout: format_readout(0.0, None),
            progress_percent: 0.0,
        }
    }
}

/// Owns one playback session at a time and its engine.
pub struct PlaybackController<E, S = ProgressBar> {
    engine: E,
    surface: S,
    settings: ControllerSettings,
    session: Option<PlaybackSession>,
    last_session_id: SessionId,
    tokens: TokenSource,
    sampler: SamplerState,
    pending_frame: Option<CancelToken>,
    visibility: ControlsVisibility,
    readout: ReadoutGate,
}

impl<E: MediaEngine> PlaybackController<E, ProgressBar> {
    pub fn new(engine: E, settings: ControllerSettings) -> Self {
        Self::with_surface(engine, ProgressBar::default(), settings)
    }
}

impl<E: MediaEngine, S: ProgressSurface> PlaybackController<E, S> {
    pub fn with_surface(engine: E, surface: S, settings: ControllerSettings) -> Self {
        let readout = ReadoutGate::new(settings.readout_interval);
        Self {
            engine,
            surface,
            settings,
            session: None,
            last_session_id: SessionId::new(0),
            tokens: TokenSource::default(),
            sampler: SamplerState::Idle,
            pending_frame: None,
            visibility: ControlsVisibility::Visible,
            readout,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    pub fn session(&self) -> Option<&PlaybackSession> {
        self.session.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn sampler_state(&self) -> SamplerState {
        self.sampler
    }

    /// The frame the host should deliver next, if the sampler is running.
    pub fn pending_frame(&self) -> Option<CancelToken> {
        self.pending_frame
    }

    /// The armed auto-hide timer, if any.
    pub fn hide_deadline(&self) -> Option<(CancelToken, Instant)> {
        self.visibility.pending()
    }

    pub fn controls_visible(&self) -> bool {
        self.visibility.is_visible()
    }

    /// Position under the user's finger while a seek gesture is active.
    pub fn seek_preview(&self) -> Option<f64> {
        self.session
            .as_ref()
            .filter(|s| s.is_seeking)
            .map(|s| s.current_time)
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        let Some(session) = &self.session else {
            return PlaybackSnapshot::default();
        };
        PlaybackSnapshot {
            is_open: true,
            title: session.title.clone(),
            is_playing: session.is_playing,
            is_muted: session.is_muted,
            is_seeking: session.is_seeking,
            is_fullscreen: self.engine.is_fullscreen(),
            controls_visible: session.controls_visible,
            current_time: session.current_time,
            duration: session.duration,
            readout: format_readout(session.current_time, session.duration),
            progress_percent: progress_percent(session.current_time, session.duration),
        }
    }

    // =========================================================================
    // Session lifecycle
    // =========================================================================

    /// Binds a new session to `source`. Media is loaded but not started.
    ///
    /// Any session still open is closed first.
    pub fn open(&mut self, source: impl Into<String>, title: Option<String>) {
        if self.session.is_some() {
            self.close();
        }

        let id = self.last_session_id.next();
        self.last_session_id = id;
        let source = source.into();

        if let Err(err) = self.engine.load(&source) {
            log::warn!("session {id}: failed to load {source}: {err}");
        }

        let session = PlaybackSession::new(id, source, title, self.settings.start_muted);
        self.engine.set_muted(session.is_muted);
        log::info!("session {id}: opened {}", session.source_url);
        self.session = Some(session);

        self.visibility.show();
        self.readout.reset();
        self.refresh_sampler();
        self.sync_visibility();
        self.surface.set_progress(0.0, 0.0);
    }

    /// Pauses the engine, rewinds it and cancels every pending frame and timer.
    ///
    /// Calling it again (or without an open session) only re-asserts the
    /// cancelled state.
    pub fn close(&mut self) {
        self.pending_frame = None;
        self.visibility.show();
        self.sampler = SamplerState::Idle;
        self.readout.reset();

        let Some(session) = self.session.take() else {
            return;
        };

        self.engine.pause();
        self.engine.set_position(0.0);
        if self.engine.is_fullscreen() {
            if let Err(err) = self.engine.exit_fullscreen() {
                log::debug!("session {}: leaving fullscreen failed: {err}", session.id);
            }
        }
        self.surface.set_progress(0.0, 0.0);
        log::info!("session {}: closed", session.id);
    }

    // =========================================================================
    // Controls
    // =========================================================================

    /// Toggles between playing and paused.
    ///
    /// Playback only counts as started once the engine confirms it; a refused
    /// `play()` leaves the session paused with controls visible.
    pub fn toggle_play(&mut self, now: Instant) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        if session.is_playing {
            self.engine.sync_to(now);
            self.engine.pause();
            session.is_playing = false;
            session.current_time = session.clamp_time(self.engine.position());
            let percent = progress_percent(session.current_time, session.duration);
            self.surface.set_progress(session.current_time, percent);
        } else {
            match self.engine.play() {
                Ok(()) => {
                    session.is_playing = true;
                    self.engine.sync_to(now);
                }
                Err(err) => {
                    log::warn!("session {}: playback did not start: {err}", session.id);
                }
            }
        }

        self.refresh_sampler();
        self.refresh_auto_hide(now);
    }

    pub fn toggle_mute(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.is_muted = !session.is_muted;
        self.engine.set_muted(session.is_muted);
    }

    /// Enters fullscreen, or leaves it if already fullscreen. Failures are ignored.
    pub fn toggle_fullscreen(&mut self) {
        let Some(session) = &self.session else {
            return;
        };
        let result = if self.engine.is_fullscreen() {
            self.engine.exit_fullscreen()
        } else {
            self.engine.request_fullscreen()
        };
        if let Err(err) = result {
            log::debug!("session {}: fullscreen toggle ignored: {err}", session.id);
        }
    }

    /// Records the media duration. Only the first valid report per session counts.
    pub fn on_metadata_ready(&mut self, duration_secs: f64) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.duration.is_some() {
            return;
        }
        if !duration_secs.is_finite() || duration_secs < 0.0 {
            log::debug!("session {}: ignoring duration {duration_secs}", session.id);
            return;
        }

        session.duration = Some(duration_secs);
        session.current_time = session.clamp_time(session.current_time);
        if !self.sampler.is_sampling() {
            let percent = progress_percent(session.current_time, session.duration);
            self.surface.set_progress(session.current_time, percent);
        }
    }

    // =========================================================================
    // Seeking
    // =========================================================================

    /// Starts a seek gesture, suspends the sampler and keeps the controls
    /// shown until the gesture ends.
    pub fn begin_seek(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.is_seeking = true;
        self.refresh_sampler();
        self.visibility.show();
        self.sync_visibility();
    }

    /// Shows a candidate position without moving the engine.
    pub fn update_seek_preview(&mut self, secs: f64) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !session.is_seeking {
            return;
        }
        let time = session.clamp_time(secs);
        session.current_time = time;
        self.surface
            .set_progress(time, progress_percent(time, session.duration));
    }

    /// Moves the engine to `secs` (clamped to the media bounds).
    pub fn commit_seek(&mut self, secs: f64) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let time = session.clamp_time(secs);
        self.engine.set_position(time);
        session.current_time = time;
        self.surface
            .set_progress(time, progress_percent(time, session.duration));
    }

    /// Ends the seek gesture. The next frame samples the engine's true position
    /// and the hide timer starts over.
    pub fn end_seek(&mut self, now: Instant) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !session.is_seeking {
            return;
        }
        session.is_seeking = false;
        self.readout.mark(now);
        self.refresh_sampler();
        self.refresh_auto_hide(now);
    }

    /// Pointer movement or any interaction over the surface.
    pub fn report_activity(&mut self, now: Instant) {
        if self.session.is_none() {
            return;
        }
        self.visibility.show();
        self.refresh_auto_hide(now);
    }

    // =========================================================================
    // Engine notifications and scheduled callbacks
    // =========================================================================

    pub fn on_engine_event(&mut self, event: EngineEvent, now: Instant) {
        match event {
            EngineEvent::MetadataReady { duration_secs } => self.on_metadata_ready(duration_secs),
            EngineEvent::TimeChanged { position_secs } => {
                let Some(session) = self.session.as_mut() else {
                    return;
                };
                // Only a fallback: the sampler and seek gestures own the position otherwise.
                if session.is_playing || session.is_seeking {
                    return;
                }
                session.current_time = session.clamp_time(position_secs);
                let percent = progress_percent(session.current_time, session.duration);
                self.surface.set_progress(session.current_time, percent);
            }
            EngineEvent::Ended => {
                let Some(session) = self.session.as_mut() else {
                    return;
                };
                session.is_playing = false;
                let end = session.duration.unwrap_or_else(|| self.engine.position());
                if !session.is_seeking {
                    session.current_time = session.clamp_time(end);
                    let percent = progress_percent(session.current_time, session.duration);
                    self.surface.set_progress(session.current_time, percent);
                }
                log::debug!("session {}: reached end of media", session.id);
                self.refresh_sampler();
                self.refresh_auto_hide(now);
            }
        }
    }

    /// Drains notifications from engines that queue them.
    pub fn pump_engine_events(&mut self, now: Instant) {
        while let Some(event) = self.engine.poll_event() {
            self.on_engine_event(event, now);
        }
    }

    /// Sampler tick for the frame identified by `token`.
    ///
    /// Writes the surface every time, refreshes the readout only when the
    /// gate allows, and requests the next frame based on the state as it is
    /// after this tick.
    pub fn on_frame(&mut self, token: CancelToken, now: Instant) -> FrameOutcome {
        if self.pending_frame != Some(token) {
            return FrameOutcome::Stale;
        }
        self.pending_frame = None;

        let Some(session) = self.session.as_mut() else {
            return FrameOutcome::Stale;
        };
        if token.session() != session.id || !self.sampler.is_sampling() {
            return FrameOutcome::Stale;
        }

        self.engine.sync_to(now);
        let position = session.clamp_time(self.engine.position());
        self.surface
            .set_progress(position, progress_percent(position, session.duration));

        let readout_refreshed = self.readout.try_refresh(now);
        if readout_refreshed {
            session.current_time = position;
        }

        if self.sampler.is_sampling() {
            self.pending_frame = Some(self.tokens.issue(session.id));
        }

        FrameOutcome::Sampled {
            position_secs: position,
            readout_refreshed,
        }
    }

    /// Auto-hide timer callback. Returns true if the controls were hidden.
    pub fn on_hide_timer(&mut self, token: CancelToken) -> bool {
        let Some(session) = self.session.as_ref() else {
            return false;
        };
        if token.session() != session.id {
            return false;
        }
        let hidden = self.visibility.fire(token);
        if hidden {
            log::debug!("session {}: controls hidden after inactivity", session.id);
            self.sync_visibility();
        }
        hidden
    }

    /// Runs everything that is due at `now`: engine notifications, the hide
    /// timer if its deadline has passed, then the pending frame.
    pub fn advance_to(&mut self, now: Instant) -> Option<FrameOutcome> {
        self.pump_engine_events(now);

        if let Some((token, deadline)) = self.visibility.pending() {
            if now >= deadline {
                self.on_hide_timer(token);
            }
        }

        let token = self.pending_frame?;
        let outcome = self.on_frame(token, now);
        // The frame may have pushed the engine to its end.
        self.pump_engine_events(now);
        Some(outcome)
    }

    // =========================================================================
    // Internal transitions
    // =========================================================================

    /// Recomputes sampler eligibility and requests or cancels the frame.
    fn refresh_sampler(&mut self) {
        let next = match &self.session {
            Some(session) => SamplerState::derive(session.is_playing, session.is_seeking),
            None => SamplerState::Idle,
        };
        self.sampler = next;

        match (next, &self.session) {
            (SamplerState::Sampling, Some(session)) => {
                if self.pending_frame.is_none() {
                    self.pending_frame = Some(self.tokens.issue(session.id));
                }
            }
            _ => self.pending_frame = None,
        }
    }

    /// Arms the hide timer while playing outside a seek, keeps controls visible otherwise.
    fn refresh_auto_hide(&mut self, now: Instant) {
        match &self.session {
            Some(session) if session.is_playing && !session.is_seeking => {
                let token = self.tokens.issue(session.id);
                self.visibility.arm(token, now, self.settings.hide_delay);
            }
            _ => self.visibility.show(),
        }
        self.sync_visibility();
    }

    fn sync_visibility(&mut self) {
        let visible = self.visibility.is_visible();
        if let Some(session) = self.session.as_mut() {
            session.controls_visible = visible;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::video_player::SimulatedEngine;

    fn opened(duration: f64) -> (PlaybackController<SimulatedEngine>, Instant) {
        let mut controller =
            PlaybackController::new(SimulatedEngine::new(duration), ControllerSettings::default());
        let t0 = Instant::now();
        controller.open("preview.mp4", Some("Residences".into()));
        controller.pump_engine_events(t0);
        (controller, t0)
    }

    #[test]
    fn open_loads_without_starting() {
        let (controller, _) = opened(125.0);
        let session = controller.session().expect("session should be open");

        assert_eq!(session.source_url, "preview.mp4");
        assert_eq!(session.title, "Residences");
        assert!(!session.is_playing);
        assert_eq!(session.current_time, 0.0);
        assert_eq!(session.duration, Some(125.0));
        assert!(!controller.engine().is_playing());
        assert_eq!(controller.sampler_state(), SamplerState::Idle);
    }

    #[test]
    fn duration_is_unknown_before_metadata() {
        let mut controller =
            PlaybackController::new(SimulatedEngine::new(60.0), ControllerSettings::default());
        controller.open("preview.mp4", None);

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.duration, None);
        assert_eq!(snapshot.progress_percent, 0.0);
        assert_eq!(snapshot.readout, "0:00 / 0:00");
        assert_eq!(snapshot.title, DEFAULT_TITLE);
    }

    #[test]
    fn metadata_is_recorded_once_per_session() {
        let (mut controller, _) = opened(125.0);
        controller.on_metadata_ready(10.0);
        assert_eq!(controller.session().unwrap().duration, Some(125.0));
    }

    #[test]
    fn invalid_duration_is_ignored() {
        let mut controller =
            PlaybackController::new(SimulatedEngine::new(60.0), ControllerSettings::default());
        controller.open("preview.mp4", None);
        controller.on_metadata_ready(f64::NAN);
        assert_eq!(controller.session().unwrap().duration, None);
        controller.on_metadata_ready(60.0);
        assert_eq!(controller.session().unwrap().duration, Some(60.0));
    }

    #[test]
    fn toggle_play_starts_sampling_and_arms_timer() {
        let (mut controller, t0) = opened(60.0);
        controller.toggle_play(t0);

        assert!(controller.session().unwrap().is_playing);
        assert_eq!(controller.sampler_state(), SamplerState::Sampling);
        assert!(controller.pending_frame().is_some());
        let (_, deadline) = controller.hide_deadline().expect("timer should be armed");
        assert_eq!(deadline, t0 + Duration::from_secs(3));
    }

    #[test]
    fn toggle_play_twice_pauses_and_shows_controls() {
        let (mut controller, t0) = opened(60.0);
        controller.toggle_play(t0);
        controller.toggle_play(t0 + Duration::from_millis(500));

        assert!(!controller.session().unwrap().is_playing);
        assert!(!controller.engine().is_playing());
        assert_eq!(controller.sampler_state(), SamplerState::Idle);
        assert!(controller.pending_frame().is_none());
        assert!(controller.hide_deadline().is_none());
        assert!(controller.controls_visible());
    }

    #[test]
    fn pause_syncs_readout_to_engine_position() {
        let (mut controller, t0) = opened(60.0);
        controller.toggle_play(t0);
        controller.advance_to(t0 + Duration::from_millis(16));
        controller.advance_to(t0 + Duration::from_millis(100));
        controller.toggle_play(t0 + Duration::from_millis(100));

        let session = controller.session().unwrap();
        assert!((session.current_time - controller.engine().position()).abs() < 1e-9);
    }

    #[test]
    fn rejected_play_stays_paused() {
        let mut controller = PlaybackController::new(
            SimulatedEngine::new(60.0).with_autoplay_blocked(),
            ControllerSettings::default(),
        );
        let now = Instant::now();
        controller.open("preview.mp4", None);
        controller.toggle_play(now);

        assert!(!controller.session().unwrap().is_playing);
        assert_eq!(controller.sampler_state(), SamplerState::Idle);
        assert!(controller.hide_deadline().is_none());
        assert!(controller.snapshot().controls_visible);
    }

    #[test]
    fn toggle_play_without_session_is_a_no_op() {
        let mut controller =
            PlaybackController::new(SimulatedEngine::new(60.0), ControllerSettings::default());
        controller.toggle_play(Instant::now());
        assert!(controller.session().is_none());
        assert!(!controller.engine().is_playing());
    }

    #[test]
    fn toggle_mute_applies_to_engine_immediately() {
        let (mut controller, _) = opened(60.0);
        controller.toggle_mute();
        assert!(controller.session().unwrap().is_muted);
        assert!(controller.engine().is_muted());
        controller.toggle_mute();
        assert!(!controller.engine().is_muted());
    }

    #[test]
    fn start_muted_setting_applies_to_each_session() {
        let settings = ControllerSettings {
            start_muted: true,
            ..ControllerSettings::default()
        };
        let mut controller = PlaybackController::new(SimulatedEngine::new(60.0), settings);
        controller.open("a.mp4", None);
        controller.toggle_mute();
        controller.open("b.mp4", None);

        assert!(controller.session().unwrap().is_muted);
        assert!(controller.engine().is_muted());
    }

    #[test]
    fn fullscreen_failure_is_silent() {
        let mut controller = PlaybackController::new(
            SimulatedEngine::new(60.0).without_fullscreen(),
            ControllerSettings::default(),
        );
        controller.open("preview.mp4", None);
        controller.toggle_fullscreen();
        assert!(!controller.snapshot().is_fullscreen);
    }

    #[test]
    fn fullscreen_toggles_both_ways() {
        let (mut controller, _) = opened(60.0);
        controller.toggle_fullscreen();
        assert!(controller.snapshot().is_fullscreen);
        controller.toggle_fullscreen();
        assert!(!controller.snapshot().is_fullscreen);
    }

    #[test]
    fn close_resets_and_cancels_everything() {
        let (mut controller, t0) = opened(60.0);
        controller.toggle_play(t0);
        controller.toggle_fullscreen();
        controller.advance_to(t0 + Duration::from_millis(16));
        controller.advance_to(t0 + Duration::from_secs(1));

        controller.close();

        assert!(controller.session().is_none());
        assert!(controller.pending_frame().is_none());
        assert!(controller.hide_deadline().is_none());
        assert!(!controller.engine().is_playing());
        assert_eq!(controller.engine().position(), 0.0);
        assert!(!controller.engine().is_fullscreen());
        assert_eq!(controller.surface().position_secs, 0.0);
        assert_eq!(controller.snapshot(), PlaybackSnapshot::default());
    }

    #[test]
    fn frame_token_from_closed_session_is_stale() {
        let (mut controller, t0) = opened(60.0);
        controller.toggle_play(t0);
        let old = controller.pending_frame().unwrap();

        controller.close();
        controller.open("again.mp4", None);
        controller.pump_engine_events(t0);
        controller.toggle_play(t0);

        assert_eq!(
            controller.on_frame(old, t0 + Duration::from_millis(16)),
            FrameOutcome::Stale
        );
        assert!(controller.pending_frame().is_some());
    }

    #[test]
    fn hide_timer_from_closed_session_is_ignored() {
        let (mut controller, t0) = opened(60.0);
        controller.toggle_play(t0);
        let (old, _) = controller.hide_deadline().unwrap();

        controller.close();
        controller.open("again.mp4", None);

        assert!(!controller.on_hide_timer(old));
        assert!(controller.controls_visible());
    }

    #[test]
    fn each_frame_requests_the_next_while_playing() {
        let (mut controller, t0) = opened(60.0);
        controller.toggle_play(t0);
        let first = controller.pending_frame().unwrap();

        let outcome = controller.on_frame(first, t0 + Duration::from_millis(16));

        assert!(matches!(outcome, FrameOutcome::Sampled { .. }));
        let second = controller.pending_frame().expect("next frame requested");
        assert_ne!(first, second);
        // Redeeming the same token twice does nothing.
        assert_eq!(
            controller.on_frame(first, t0 + Duration::from_millis(32)),
            FrameOutcome::Stale
        );
    }

    #[test]
    fn begin_seek_cancels_pending_frame() {
        let (mut controller, t0) = opened(60.0);
        controller.toggle_play(t0);
        let token = controller.pending_frame().unwrap();

        controller.begin_seek();

        assert_eq!(controller.sampler_state(), SamplerState::Suspended);
        assert!(controller.pending_frame().is_none());
        assert_eq!(
            controller.on_frame(token, t0 + Duration::from_millis(16)),
            FrameOutcome::Stale
        );
    }

    #[test]
    fn seek_preview_does_not_move_engine() {
        let (mut controller, _) = opened(60.0);
        controller.begin_seek();
        controller.update_seek_preview(42.0);

        assert_eq!(controller.seek_preview(), Some(42.0));
        assert_eq!(controller.surface().position_secs, 42.0);
        assert_eq!(controller.surface().percent, 70.0);
        assert_eq!(controller.engine().position(), 0.0);
    }

    #[test]
    fn seek_preview_outside_gesture_is_ignored() {
        let (mut controller, _) = opened(60.0);
        controller.update_seek_preview(42.0);
        assert_eq!(controller.session().unwrap().current_time, 0.0);
        assert_eq!(controller.seek_preview(), None);
    }

    #[test]
    fn commit_seek_clamps_to_duration() {
        let (mut controller, _) = opened(60.0);
        controller.commit_seek(500.0);
        assert_eq!(controller.engine().position(), 60.0);
        assert_eq!(controller.session().unwrap().current_time, 60.0);

        controller.commit_seek(-4.0);
        assert_eq!(controller.engine().position(), 0.0);
    }

    #[test]
    fn end_seek_resumes_sampling_when_playing() {
        let (mut controller, t0) = opened(60.0);
        controller.toggle_play(t0);
        controller.begin_seek();
        controller.commit_seek(30.0);
        controller.end_seek(t0 + Duration::from_millis(200));

        assert_eq!(controller.sampler_state(), SamplerState::Sampling);
        assert!(controller.pending_frame().is_some());
    }

    #[test]
    fn time_changed_is_ignored_while_playing() {
        let (mut controller, t0) = opened(60.0);
        controller.toggle_play(t0);
        controller.on_engine_event(EngineEvent::TimeChanged { position_secs: 20.0 }, t0);
        assert_eq!(controller.session().unwrap().current_time, 0.0);
    }

    #[test]
    fn time_changed_updates_readout_while_paused() {
        let (mut controller, t0) = opened(60.0);
        controller.on_engine_event(EngineEvent::TimeChanged { position_secs: 20.0 }, t0);
        assert_eq!(controller.session().unwrap().current_time, 20.0);
        assert_eq!(controller.surface().position_secs, 20.0);
    }

    #[test]
    fn ended_stops_sampling_and_shows_controls() {
        let (mut controller, t0) = opened(1.0);
        controller.toggle_play(t0);
        controller.advance_to(t0 + Duration::from_millis(16));
        controller.advance_to(t0 + Duration::from_secs(2));

        let session = controller.session().unwrap();
        assert!(!session.is_playing);
        assert_eq!(session.current_time, 1.0);
        assert_eq!(controller.sampler_state(), SamplerState::Idle);
        assert!(controller.pending_frame().is_none());
        assert!(controller.controls_visible());
        assert_eq!(controller.snapshot().readout, "0:01 / 0:01");
    }

    #[test]
    fn settings_from_config_clamps_values() {
        let mut config = Config::default();
        config.controls.hide_delay_secs = Some(0);
        config.playback.readout_interval_ms = Some(10_000);
        config.playback.start_muted = Some(true);

        let settings = ControllerSettings::from_config(&config);

        assert_eq!(settings.hide_delay.value(), 1);
        assert_eq!(
            settings.readout_interval,
            Duration::from_millis(u64::from(MAX_READOUT_INTERVAL_MS))
        );
        assert!(settings.start_muted);
    }

    #[test]
    fn load_failure_keeps_session_inert() {
        let mut controller =
            PlaybackController::new(SimulatedEngine::new(60.0), ControllerSettings::default());
        let now = Instant::now();
        controller.open("earlier.mp4", None);
        controller.close();
        controller.open("", None);
        controller.toggle_play(now);

        assert!(controller.is_open());
        assert!(!controller.session().unwrap().is_playing);
        assert_eq!(controller.engine_mut().play(), Err(EngineError::NotReady));
        assert_eq!(controller.engine().source(), None);
    }

    #[test]
    fn seek_gesture_keeps_controls_visible() {
        let (mut controller, t0) = opened(60.0);
        controller.toggle_play(t0);
        controller.begin_seek();
        controller.update_seek_preview(10.0);

        assert!(controller.hide_deadline().is_none());
        controller.advance_to(t0 + Duration::from_millis(3100));
        assert!(controller.controls_visible());
        assert!(controller.snapshot().is_seeking);

        controller.commit_seek(10.0);
        controller.end_seek(t0 + Duration::from_millis(3200));
        let (_, deadline) = controller.hide_deadline().expect("timer re-armed after seek");
        assert_eq!(deadline, t0 + Duration::from_millis(6200));
    }

    #[test]
    fn activity_during_seek_does_not_arm_timer() {
        let (mut controller, t0) = opened(60.0);
        controller.toggle_play(t0);
        controller.begin_seek();
        controller.report_activity(t0 + Duration::from_millis(500));

        assert!(controller.hide_deadline().is_none());
        assert!(controller.controls_visible());
    }

    #[test]
    fn pause_includes_time_since_last_frame() {
        let (mut controller, t0) = opened(60.0);
        controller.toggle_play(t0);
        controller.advance_to(t0 + Duration::from_millis(16));
        controller.toggle_play(t0 + Duration::from_millis(100));

        let session = controller.session().unwrap();
        assert!((session.current_time - 0.1).abs() < 1e-9);
        assert!((controller.surface().position_secs - 0.1).abs() < 1e-9);
    }
}
