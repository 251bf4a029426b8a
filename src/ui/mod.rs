// SPDX-License-Identifier: MPL-2.0
//! User interface components.
//!
//! Views follow the Elm-style "state down, messages up" pattern: they read a
//! [`PlaybackSnapshot`](crate::video_player::PlaybackSnapshot) and emit
//! messages that the app turns into controller calls.
//!
//! - [`video_modal`] - Modal video player with progress slider and auto-hiding controls

pub mod video_modal;
