// SPDX-License-Identifier: MPL-2.0
//! Event and tick subscriptions for the application.

use super::Message;
use crate::config::FRAME_INTERVAL_MS;
use iced::{event, time, Subscription};
use std::time::Duration;

/// Listens to window events only to learn the window id needed for
/// fullscreen changes.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, _status, window_id| match event {
        event::Event::Window(_) | event::Event::Mouse(iced::mouse::Event::CursorEntered) => {
            Some(Message::WindowSeen(window_id))
        }
        _ => None,
    })
}

/// Drives the controller while it has a pending frame or an armed hide timer.
///
/// A paused session with visible controls needs no ticks at all.
pub fn create_tick_subscription(has_pending_work: bool) -> Subscription<Message> {
    if has_pending_work {
        time::every(Duration::from_millis(FRAME_INTERVAL_MS)).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
