// SPDX-License-Identifier: MPL-2.0
//! Application root: owns the viewing session and wires iced events into it.
//!
//! The window shows the composite raster with a transparent pointer overlay
//! on top. Keyboard commands add or delete markers, step the time index and
//! change the presentation adjustments.

pub mod overlay;

use crate::config::{self, DisplayConfig};
use crate::markers::LabelFonts;
use crate::media::Frame;
use crate::session::ViewerSession;
use iced::widget::{canvas, center, image, stack, text};
use iced::{event, keyboard, window, ContentFit, Element, Length, Subscription, Task, Theme};
use overlay::{MarkerOverlay, PointerMessage};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

const WINDOW_DEFAULT_WIDTH: f32 = 1024.0;
const WINDOW_DEFAULT_HEIGHT: f32 = 768.0;
const MIN_WINDOW_WIDTH: f32 = 320.0;
const MIN_WINDOW_HEIGHT: f32 = 240.0;

/// Rotation applied by one rotate command, in degrees.
const ROTATE_STEP_DEGREES: f32 = 90.0;

/// Launch parameters.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// One image per time index; a single image is shown at every index.
    pub images: Vec<PathBuf>,
    pub time_index: usize,
}

/// Keyboard-driven commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    AddMarker,
    DeleteSelected,
    StepTime { forward: bool },
    Zoom { zoom_in: bool },
    Rotate,
    MirrorHorizontal,
    MirrorVertical,
}

#[derive(Debug, Clone)]
pub enum Message {
    Pointer(PointerMessage),
    Command(Command),
}

pub struct App {
    session: ViewerSession,
    display: DisplayConfig,
    images: Vec<PathBuf>,
    /// Last composite published by the pipeline.
    latest: Rc<RefCell<Option<image::Handle>>>,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("images", &self.images)
            .field("time_index", &self.session.time_index())
            .finish_non_exhaustive()
    }
}

/// Converts a published frame into an iced image handle.
fn frame_handle(frame: &Frame<'_>) -> image::Handle {
    let raster = frame.raster;
    let mut rgba = Vec::with_capacity(raster.data().len());
    for pixel in raster.pixels() {
        let color = pixel.demultiply();
        rgba.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
    }
    image::Handle::from_rgba(raster.width(), raster.height(), rgba)
}

/// Maps a key press to a command. Shortcuts with Ctrl/Cmd or Alt are left
/// to the platform.
#[must_use]
pub fn command_for_key(key: &keyboard::Key, modifiers: keyboard::Modifiers) -> Option<Command> {
    use keyboard::key::Named;

    if modifiers.command() || modifiers.alt() {
        return None;
    }
    match key {
        keyboard::Key::Named(Named::Delete | Named::Backspace) => Some(Command::DeleteSelected),
        keyboard::Key::Named(Named::ArrowRight) => Some(Command::StepTime { forward: true }),
        keyboard::Key::Named(Named::ArrowLeft) => Some(Command::StepTime { forward: false }),
        keyboard::Key::Character(c) => match c.as_str() {
            "a" | "A" => Some(Command::AddMarker),
            "+" | "=" => Some(Command::Zoom { zoom_in: true }),
            "-" => Some(Command::Zoom { zoom_in: false }),
            "r" | "R" => Some(Command::Rotate),
            "h" | "H" => Some(Command::MirrorHorizontal),
            "v" | "V" => Some(Command::MirrorVertical),
            _ => None,
        },
        _ => None,
    }
}

/// Entry point used by `main.rs` to launch the iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    // iced requires a `Fn` boot; the flags are consumed on the first call.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window::Settings {
            size: iced::Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
            min_size: Some(iced::Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)),
            ..window::Settings::default()
        })
        .subscription(App::subscription)
        .run()
}

impl App {
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let config = config::load().unwrap_or_else(|err| {
            tracing::warn!(%err, "using default configuration");
            config::Config::default()
        });

        let mut session = ViewerSession::new(&config, LabelFonts::system());
        let latest = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&latest);
        session.subscribe(move |frame: &Frame<'_>| {
            *sink.borrow_mut() = Some(frame_handle(frame));
        });

        let mut app = Self {
            session,
            display: config.display,
            images: flags.images,
            latest,
        };
        app.session.set_time_index(flags.time_index);
        app.load_current_image();
        (app, Task::none())
    }

    fn title(&self) -> String {
        let name = self
            .current_image()
            .and_then(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned());
        match name {
            Some(name) => format!("{name} [t={}] - MarkLens", self.session.time_index()),
            None => "MarkLens".to_string(),
        }
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        event::listen_with(|event, status, _window| {
            if status == event::Status::Captured {
                return None;
            }
            match event {
                event::Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
                    command_for_key(&key, modifiers).map(Message::Command)
                }
                _ => None,
            }
        })
    }

    /// Image shown at the current time index.
    fn current_image(&self) -> Option<&PathBuf> {
        if self.images.len() > 1 {
            self.images.get(self.session.time_index())
        } else {
            self.images.first()
        }
    }

    fn load_current_image(&mut self) {
        let Some(path) = self.current_image().cloned() else {
            return;
        };
        if !self.session.load_image(&path) {
            *self.latest.borrow_mut() = None;
            return;
        }
        self.session.redraw();
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Pointer(pointer) => self.handle_pointer(pointer),
            Message::Command(command) => self.handle_command(command),
        }
        Task::none()
    }

    fn handle_pointer(&mut self, message: PointerMessage) {
        match message {
            PointerMessage::Moved(point) => {
                self.session.pointer_moved(point);
            }
            PointerMessage::Pressed => {
                self.session.pointer_pressed();
            }
            PointerMessage::Dragged(point) => {
                if let Err(err) = self.session.pointer_dragged(point) {
                    tracing::warn!(%err, "drag rejected");
                }
            }
            PointerMessage::Released { click } => {
                self.session.pointer_released();
                if let Some((point, count)) = click {
                    self.session.pointer_clicked(point, count);
                }
            }
        }
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::AddMarker => {
                if self.session.pipeline().has_image() {
                    self.session.add_marker();
                    self.session.redraw();
                }
            }
            Command::DeleteSelected => {
                if self.session.delete_selected().is_some() {
                    self.session.redraw();
                }
            }
            Command::StepTime { forward } => self.step_time(forward),
            Command::Zoom { zoom_in } => {
                let mut adjustments = self.session.adjustments().clone();
                adjustments.zoom = self.display.step_zoom(adjustments.zoom(), zoom_in).value();
                self.apply_adjustments(adjustments);
            }
            Command::Rotate => {
                let mut adjustments = self.session.adjustments().clone();
                adjustments.rotation = crate::domain::marker::normalize_degrees(
                    adjustments.rotation + ROTATE_STEP_DEGREES,
                );
                self.apply_adjustments(adjustments);
            }
            Command::MirrorHorizontal => {
                let mut adjustments = self.session.adjustments().clone();
                adjustments.mirror_x = !adjustments.mirror_x;
                self.apply_adjustments(adjustments);
            }
            Command::MirrorVertical => {
                let mut adjustments = self.session.adjustments().clone();
                adjustments.mirror_y = !adjustments.mirror_y;
                self.apply_adjustments(adjustments);
            }
        }
    }

    fn apply_adjustments(&mut self, adjustments: crate::media::ImageAdjustments) {
        self.session.set_adjustments(adjustments);
        self.session.redraw();
    }

    fn step_time(&mut self, forward: bool) {
        let current = self.session.time_index();
        let mut next = if forward {
            current.saturating_add(1)
        } else {
            current.saturating_sub(1)
        };
        if self.images.len() > 1 {
            next = next.min(self.images.len() - 1);
        }
        if next == current {
            return;
        }
        self.session.set_time_index(next);
        if self.images.len() > 1 {
            self.load_current_image();
        } else {
            self.session.redraw();
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let Some(handle) = self.latest.borrow().clone() else {
            return center(text("No image loaded")).into();
        };
        let (raster_width, raster_height) = self.session.pipeline().size().unwrap_or((0, 0));
        let overlay = MarkerOverlay {
            raster_width,
            raster_height,
            cursor: self.session.cursor(),
        };

        stack![
            image(handle)
                .content_fit(ContentFit::Contain)
                .width(Length::Fill)
                .height(Length::Fill),
            Element::from(canvas(overlay).width(Length::Fill).height(Length::Fill))
                .map(Message::Pointer),
        ]
        .into()
    }
}
