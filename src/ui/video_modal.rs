// SPDX-License-Identifier: MPL-2.0
//! Video preview modal.
//!
//! Renders the title bar, the video surface and the control strip. The
//! slider follows the imperatively written [`ProgressBar`] so it moves every
//! frame, while the readout text comes from the throttled snapshot.

use crate::video_player::{PlaybackSnapshot, ProgressBar};
use iced::widget::{
    button, column, container, mouse_area, progress_bar, row, slider, text, Space,
};
use iced::{Alignment, Element, Length};
use std::ops::RangeInclusive;

/// Slider step in seconds (1ms precision).
const SLIDER_STEP_SECS: f64 = 0.001;

const SPACING: f32 = 8.0;
const PADDING: f32 = 12.0;
const READOUT_SIZE: f32 = 14.0;
const TITLE_SIZE: f32 = 18.0;
const MODAL_WIDTH: f32 = 720.0;
const VIDEO_HEIGHT: f32 = 360.0;
const HEADER_HEIGHT: f32 = 32.0;
const CONTROLS_HEIGHT: f32 = 36.0;
const OVERLAY_SIZE: f32 = 32.0;

/// Messages emitted by the modal.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    TogglePlay,
    ToggleMute,
    ToggleFullscreen,

    /// Slider is being dragged. Position in seconds; the engine is not moved yet.
    SeekPreview(f64),

    /// Slider released: commit the previewed position and end the gesture.
    SeekRelease,

    /// Pointer moved over the player.
    PointerMoved,

    Close,
}

/// Range of the timeline slider. Empty until the duration is known.
pub fn timeline_range(snapshot: &PlaybackSnapshot) -> RangeInclusive<f64> {
    0.0..=snapshot.duration.unwrap_or(0.0)
}

/// Value shown by the timeline slider.
pub fn timeline_position(snapshot: &PlaybackSnapshot, progress: ProgressBar) -> f64 {
    let end = *timeline_range(snapshot).end();
    progress.position_secs.clamp(0.0, end)
}

fn play_label(is_playing: bool) -> &'static str {
    if is_playing {
        "Pause"
    } else {
        "Play"
    }
}

fn mute_label(is_muted: bool) -> &'static str {
    if is_muted {
        "Unmute"
    } else {
        "Mute"
    }
}

fn fullscreen_label(is_fullscreen: bool) -> &'static str {
    if is_fullscreen {
        "Exit fullscreen"
    } else {
        "Fullscreen"
    }
}

/// Whether the large centred play button covers the video.
pub fn shows_play_overlay(snapshot: &PlaybackSnapshot) -> bool {
    !snapshot.is_playing
}

/// Whether the close button and the control strip are shown.
///
/// Hidden chrome keeps its space so the layout does not jump when it returns.
pub fn shows_chrome(snapshot: &PlaybackSnapshot) -> bool {
    snapshot.controls_visible
}

/// Renders the modal for an open session.
pub fn view<'a>(snapshot: &PlaybackSnapshot, progress: ProgressBar) -> Element<'a, Message> {
    let close: Element<'a, Message> = if shows_chrome(snapshot) {
        button(text("Close")).on_press(Message::Close).into()
    } else {
        Space::new().into()
    };
    let header = row![
        text(snapshot.title.clone()).size(TITLE_SIZE),
        Space::new().width(Length::Fill),
        close,
    ]
    .spacing(SPACING)
    .height(Length::Fixed(HEADER_HEIGHT))
    .align_y(Alignment::Center);

    let overlay: Element<'a, Message> = if shows_play_overlay(snapshot) {
        button(text("Play").size(OVERLAY_SIZE))
            .on_press(Message::TogglePlay)
            .padding(PADDING * 2.0)
            .style(button::secondary)
            .into()
    } else {
        Space::new().into()
    };

    // Clicking anywhere on the video toggles playback.
    let surface = mouse_area(
        container(column![
            container(overlay).center(Length::Fill),
            progress_bar(0.0..=100.0, progress.percent as f32).girth(4.0),
        ])
        .width(Length::Fill)
        .height(Length::Fixed(VIDEO_HEIGHT))
        .style(container::dark),
    )
    .on_press(Message::TogglePlay);

    let strip: Element<'a, Message> = if shows_chrome(snapshot) {
        controls(snapshot, progress)
    } else {
        Space::new().height(Length::Fixed(CONTROLS_HEIGHT)).into()
    };

    let body = column![header, surface, strip].spacing(SPACING);
    let player = mouse_area(body).on_move(|_| Message::PointerMoved);

    container(player)
        .width(Length::Fixed(MODAL_WIDTH))
        .padding(PADDING)
        .style(container::rounded_box)
        .into()
}

fn controls<'a>(snapshot: &PlaybackSnapshot, progress: ProgressBar) -> Element<'a, Message> {
    // on_change only previews; the engine moves once on release
    let timeline = slider(
        timeline_range(snapshot),
        timeline_position(snapshot, progress),
        Message::SeekPreview,
    )
    .on_release(Message::SeekRelease)
    .step(SLIDER_STEP_SECS)
    .width(Length::Fill);

    row![
        button(text(play_label(snapshot.is_playing))).on_press(Message::TogglePlay),
        timeline,
        text(snapshot.readout.clone()).size(READOUT_SIZE),
        button(text(mute_label(snapshot.is_muted))).on_press(Message::ToggleMute),
        button(text(fullscreen_label(snapshot.is_fullscreen)))
            .on_press(Message::ToggleFullscreen),
    ]
    .spacing(SPACING)
    .height(Length::Fixed(CONTROLS_HEIGHT))
    .align_y(Alignment::Center)
    .into()
}
