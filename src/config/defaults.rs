// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Controls**: auto-hide delay for the on-screen controls
//! - **Readout**: refresh interval of the numeric time readout
//! - **Sampler**: display refresh cadence used by hosts that tick the controller

// ==========================================================================
// Controls Defaults
// ==========================================================================

/// Default auto-hide delay for the playback controls (in seconds).
pub const DEFAULT_HIDE_DELAY_SECS: u32 = 3;

/// Minimum auto-hide delay (in seconds).
pub const MIN_HIDE_DELAY_SECS: u32 = 1;

/// Maximum auto-hide delay (in seconds).
pub const MAX_HIDE_DELAY_SECS: u32 = 30;

// ==========================================================================
// Readout Defaults
// ==========================================================================

/// Default minimum interval between numeric readout refreshes (4 per second).
pub const DEFAULT_READOUT_INTERVAL_MS: u32 = 250;

/// Minimum readout interval in milliseconds.
pub const MIN_READOUT_INTERVAL_MS: u32 = 50;

/// Maximum readout interval in milliseconds.
pub const MAX_READOUT_INTERVAL_MS: u32 = 1000;

// ==========================================================================
// Sampler Defaults
// ==========================================================================

/// Frame cadence hosts use to drive the sampler (~60 Hz).
pub const FRAME_INTERVAL_MS: u64 = 16;

/// Title shown when the host does not provide one.
pub const DEFAULT_TITLE: &str = "Video Player";
