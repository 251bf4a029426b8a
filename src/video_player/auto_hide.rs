// SPDX-License-Identifier: MPL-2.0
//! Auto-hide state machine for the playback controls.
//!
//! ```text
//!   Visible ──arm──▶ HidingScheduled ──timer fires──▶ Hidden
//!      ▲                   │                            │
//!      └────── show ───────┴────────── show / arm ──────┘
//! ```
//!
//! Arming always replaces the previous token, so a re-armed timer can never
//! fire twice.

use super::sampler::CancelToken;
use crate::config::{DEFAULT_HIDE_DELAY_SECS, MAX_HIDE_DELAY_SECS, MIN_HIDE_DELAY_SECS};
use std::time::{Duration, Instant};

/// Auto-hide delay in seconds.
///
/// This newtype enforces validity at the type level, ensuring the value
/// is always within the valid range (1–30 seconds).
///
/// # Example
///
/// ```
/// use preview_modal::video_player::HideDelay;
///
/// let delay = HideDelay::new(5);
/// assert_eq!(delay.value(), 5);
///
/// // Values outside range are clamped
/// let too_high = HideDelay::new(100);
/// assert_eq!(too_high.value(), 30);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HideDelay(u32);

impl HideDelay {
    /// Creates a new delay value, clamping to valid range.
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self(value.clamp(MIN_HIDE_DELAY_SECS, MAX_HIDE_DELAY_SECS))
    }

    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_secs(u64::from(self.0))
    }
}

impl Default for HideDelay {
    fn default() -> Self {
        Self(DEFAULT_HIDE_DELAY_SECS)
    }
}

/// Visibility of the on-screen controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlsVisibility {
    #[default]
    Visible,
    HidingScheduled {
        token: CancelToken,
        deadline: Instant,
    },
    Hidden,
}

impl ControlsVisibility {
    #[must_use]
    pub fn is_visible(self) -> bool {
        !matches!(self, Self::Hidden)
    }

    /// Returns the armed timer, if any.
    #[must_use]
    pub fn pending(self) -> Option<(CancelToken, Instant)> {
        match self {
            Self::HidingScheduled { token, deadline } => Some((token, deadline)),
            _ => None,
        }
    }

    /// Shows the controls and (re)arms the timer, cancelling any prior one.
    pub fn arm(&mut self, token: CancelToken, now: Instant, delay: HideDelay) {
        *self = Self::HidingScheduled {
            token,
            deadline: now + delay.as_duration(),
        };
    }

    /// Shows the controls and disarms the timer.
    pub fn show(&mut self) {
        *self = Self::Visible;
    }

    /// Handles a timer firing. Only the currently armed token hides the controls.
    ///
    /// Returns true if the controls were hidden.
    pub fn fire(&mut self, token: CancelToken) -> bool {
        match *self {
            Self::HidingScheduled { token: armed, .. } if armed == token => {
                *self = Self::Hidden;
                true
            }
            _ => false,
        }
    }
}
