// SPDX-License-Identifier: MPL-2.0
//! Demo application hosting the video preview modal.
//!
//! The `App` plays the role of the hosting page: it owns the "modal open"
//! flag, forwards modal messages to the [`PlaybackController`] and keeps the
//! window mode in step with the engine's fullscreen state.

mod message;
pub mod paths;
mod subscription;

pub use message::{Flags, Message};

use crate::config;
use crate::ui::video_modal;
use crate::video_player::engine::MediaEngine;
use crate::video_player::{create_controller, PlaybackController, SimulatedEngine};
use iced::widget::{button, column, container, text};
use iced::{window, Alignment, Element, Length, Subscription, Task, Theme};
use std::fmt;
use std::time::Instant;

pub const WINDOW_DEFAULT_WIDTH: u32 = 960;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 640;
pub const MIN_WINDOW_WIDTH: u32 = 760;
pub const MIN_WINDOW_HEIGHT: u32 = 520;

/// Media bound to the session when `--source` is not given.
pub const DEFAULT_SOURCE: &str = "residences-preview.mp4";

/// Length of the simulated media when `--duration` is not given.
pub const DEFAULT_DURATION_SECS: f64 = 125.0;

/// Root Iced application state.
pub struct App {
    controller: PlaybackController<SimulatedEngine>,
    source: String,
    title: Option<String>,
    modal_open: bool,
    fullscreen: bool,
    window_id: Option<window::Id>,
    /// Config load problem shown on the landing panel.
    config_warning: Option<String>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("source", &self.source)
            .field("modal_open", &self.modal_open)
            .field("fullscreen", &self.fullscreen)
            .finish()
    }
}

/// Builds the window settings
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires a `Fn` boot closure; flags are consumed on the first call
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();

        let duration = flags
            .duration_secs
            .filter(|secs| secs.is_finite() && *secs > 0.0)
            .unwrap_or(DEFAULT_DURATION_SECS);
        let engine = SimulatedEngine::new(duration);

        let app = App {
            controller: create_controller(engine, &config),
            source: flags.source.unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
            title: flags.title,
            modal_open: false,
            fullscreen: false,
            window_id: None,
            config_warning,
        };
        (app, Task::none())
    }

    fn title(&self) -> String {
        if self.modal_open {
            let snapshot = self.controller.snapshot();
            format!("{} - Preview Modal", snapshot.title)
        } else {
            "Preview Modal".to_string()
        }
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        let has_pending_work = self.modal_open
            && (self.controller.pending_frame().is_some()
                || self.controller.hide_deadline().is_some());

        Subscription::batch([
            subscription::create_event_subscription(),
            subscription::create_tick_subscription(has_pending_work),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ModalOpenChange(true) => {
                self.controller.open(self.source.clone(), self.title.clone());
                self.controller.pump_engine_events(Instant::now());
                self.modal_open = true;
                Task::none()
            }
            Message::ModalOpenChange(false) => {
                self.controller.close();
                self.modal_open = false;
                self.sync_window_mode()
            }
            Message::Modal(message) => self.handle_modal_message(message, Instant::now()),
            Message::Tick(now) => {
                self.controller.advance_to(now);
                Task::none()
            }
            Message::WindowSeen(id) => {
                self.window_id.get_or_insert(id);
                Task::none()
            }
        }
    }

    fn handle_modal_message(&mut self, message: video_modal::Message, now: Instant) -> Task<Message> {
        match message {
            video_modal::Message::TogglePlay => self.controller.toggle_play(now),
            video_modal::Message::ToggleMute => self.controller.toggle_mute(),
            video_modal::Message::ToggleFullscreen => {
                self.controller.toggle_fullscreen();
                return self.sync_window_mode();
            }
            video_modal::Message::SeekPreview(secs) => {
                if self.controller.seek_preview().is_none() {
                    self.controller.begin_seek();
                }
                self.controller.update_seek_preview(secs);
            }
            video_modal::Message::SeekRelease => {
                if let Some(secs) = self.controller.seek_preview() {
                    self.controller.commit_seek(secs);
                }
                self.controller.end_seek(now);
            }
            video_modal::Message::PointerMoved => self.controller.report_activity(now),
            video_modal::Message::Close => {
                return Task::done(Message::ModalOpenChange(false));
            }
        }
        self.controller.pump_engine_events(now);
        Task::none()
    }

    /// Switches the window mode when the engine's fullscreen state changed.
    fn sync_window_mode(&mut self) -> Task<Message> {
        let desired = self.controller.engine().is_fullscreen();
        if self.fullscreen == desired {
            return Task::none();
        }
        let Some(window_id) = self.window_id else {
            return Task::none();
        };

        self.fullscreen = desired;
        let mode = if desired {
            window::Mode::Fullscreen
        } else {
            window::Mode::Windowed
        };
        window::set_mode(window_id, mode)
    }

    fn view(&self) -> Element<'_, Message> {
        if self.modal_open {
            let snapshot = self.controller.snapshot();
            let modal = video_modal::view(&snapshot, *self.controller.surface()).map(Message::Modal);
            return container(modal)
                .center(Length::Fill)
                .style(container::dark)
                .into();
        }

        let mut landing = column![
            text("Residences").size(28),
            text(format!("Preview: {}", self.source)),
            button(text("Watch preview")).on_press(Message::ModalOpenChange(true)),
        ]
        .spacing(12)
        .align_x(Alignment::Center);

        if let Some(warning) = &self.config_warning {
            landing = landing.push(text(warning.clone()).size(12));
        }

        container(landing).center(Length::Fill).into()
    }
}
