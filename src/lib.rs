// SPDX-License-Identifier: MPL-2.0
//! `preview_modal` is a custom video preview modal built with the Iced GUI framework.
//!
//! The core is a headless [`video_player::PlaybackController`] that keeps a
//! progress bar smooth, throttles the time readout, handles seek gestures and
//! hides idle controls. The [`app`] module hosts it in a small demo window.

#![doc(html_root_url = "https://docs.rs/preview_modal/0.1.0")]

pub mod app;
pub mod config;
pub mod error;
pub mod ui;
pub mod video_player;
