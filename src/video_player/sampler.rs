// SPDX-License-Identifier: MPL-2.0
//! Sampler eligibility, cancellation tokens and readout throttling.
//!
//! The sampler copies the engine position into the progress surface once per
//! display frame. It only runs in [`SamplerState::Sampling`]; every pending
//! frame or timer is represented by a [`CancelToken`] that the host hands back
//! when the callback fires.

use super::session::SessionId;
use std::time::{Duration, Instant};

/// Whether the high-frequency sampler may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplerState {
    /// No session, or the session is not playing.
    #[default]
    Idle,
    /// Playing and not seeking: one frame is requested at a time.
    Sampling,
    /// A seek gesture owns the position; no frame may be pending.
    Suspended,
}

impl SamplerState {
    /// Derives the sampler state from the two playback flags.
    #[must_use]
    pub fn derive(is_playing: bool, is_seeking: bool) -> Self {
        match (is_playing, is_seeking) {
            (_, true) => Self::Suspended,
            (true, false) => Self::Sampling,
            (false, false) => Self::Idle,
        }
    }

    #[must_use]
    pub fn is_sampling(self) -> bool {
        self == Self::Sampling
    }
}

/// Handle for one scheduled callback (a frame request or a timer).
///
/// A token is only honoured if it is still the one the controller holds;
/// cancelling simply drops the controller's copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CancelToken {
    session: SessionId,
    generation: u64,
}

impl CancelToken {
    #[must_use]
    pub fn session(self) -> SessionId {
        self.session
    }

    #[must_use]
    pub fn generation(self) -> u64 {
        self.generation
    }
}

/// Issues tokens with a controller-wide generation counter.
#[derive(Debug, Default)]
pub struct TokenSource {
    next_generation: u64,
}

impl TokenSource {
    pub fn issue(&mut self, session: SessionId) -> CancelToken {
        self.next_generation = self.next_generation.wrapping_add(1);
        CancelToken {
            session,
            generation: self.next_generation,
        }
    }
}

/// Wall-clock gate for the numeric readout.
///
/// The first sample always passes; afterwards a sample passes only when
/// strictly more than `interval` has elapsed since the last one that passed.
#[derive(Debug, Clone)]
pub struct ReadoutGate {
    interval: Duration,
    last_refresh: Option<Instant>,
}

impl ReadoutGate {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_refresh: None,
        }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns true and records `now` if the readout may refresh.
    pub fn try_refresh(&mut self, now: Instant) -> bool {
        let due = match self.last_refresh {
            None => true,
            Some(last) => now.saturating_duration_since(last) > self.interval,
        };
        if due {
            self.last_refresh = Some(now);
        }
        due
    }

    /// Marks the readout as refreshed at `now` by some other path.
    pub fn mark(&mut self, now: Instant) {
        self.last_refresh = Some(now);
    }

    pub fn reset(&mut self) {
        self.last_refresh = None;
    }
}
