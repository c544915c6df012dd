// SPDX-License-Identifier: MPL-2.0
//! Transparent canvas laid over the displayed raster.
//!
//! It draws nothing itself: markers are already part of the composite. It
//! converts widget-space pointer events into raster pixel coordinates,
//! separates clicks from drags and reports the handler's cursor back to iced.

use crate::config::defaults::DOUBLE_CLICK_MILLIS;
use crate::interaction::CursorIcon;
use iced::mouse;
use iced::widget::canvas;
use iced::{Rectangle, Renderer, Theme};
use std::time::{Duration, Instant};
use tiny_skia::Point;

const DOUBLE_CLICK_THRESHOLD: Duration = Duration::from_millis(DOUBLE_CLICK_MILLIS);

/// Pointer travel (widget pixels) below which a press-release is a click.
const DRAG_THRESHOLD: f32 = 2.0;

/// Pointer events in raster pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerMessage {
    Moved(Point),
    Pressed,
    Dragged(Point),
    /// Button released; `click` carries the position and click count when
    /// the pointer did not travel.
    Released { click: Option<(Point, u32)> },
}

/// Counts consecutive clicks.
#[derive(Debug, Clone, Default)]
pub struct ClickTracker {
    last: Option<Instant>,
}

impl ClickTracker {
    /// Registers a click at `now`; returns 2 for the second click of a
    /// double click and 1 otherwise.
    pub fn register(&mut self, now: Instant) -> u32 {
        let double = self
            .last
            .is_some_and(|last| now.duration_since(last) <= DOUBLE_CLICK_THRESHOLD);
        // A third quick click starts a new pair.
        self.last = if double { None } else { Some(now) };
        if double {
            2
        } else {
            1
        }
    }
}

#[derive(Debug, Default)]
pub struct PointerState {
    pressed_at: Option<iced::Point>,
    dragging: bool,
    clicks: ClickTracker,
}

/// Canvas program forwarding pointer events for a `width x height` raster
/// displayed with `ContentFit::Contain`.
pub struct MarkerOverlay {
    pub raster_width: u32,
    pub raster_height: u32,
    pub cursor: CursorIcon,
}

impl MarkerOverlay {
    /// Converts a widget-relative position into raster pixels.
    ///
    /// Positions outside the displayed image map outside the raster.
    fn to_raster(&self, position: iced::Point, bounds: Rectangle) -> Option<Point> {
        if self.raster_width == 0 || self.raster_height == 0 || bounds.width <= 0.0 || bounds.height <= 0.0 {
            return None;
        }
        let (width, height) = (self.raster_width as f32, self.raster_height as f32);
        let scale = (bounds.width / width).min(bounds.height / height);
        let offset_x = (bounds.width - width * scale) / 2.0;
        let offset_y = (bounds.height - height * scale) / 2.0;
        Some(Point::from_xy(
            (position.x - offset_x) / scale,
            (position.y - offset_y) / scale,
        ))
    }
}

impl canvas::Program<PointerMessage> for MarkerOverlay {
    type State = PointerState;

    fn update(
        &self,
        state: &mut Self::State,
        event: &iced::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<iced::widget::Action<PointerMessage>> {
        use iced::widget::Action;

        let position = cursor.position_in(bounds);
        match event {
            iced::Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                let position = position?;
                if let Some(pressed_at) = state.pressed_at {
                    if pressed_at.distance(position) > DRAG_THRESHOLD {
                        state.dragging = true;
                    }
                    if state.dragging {
                        let point = self.to_raster(position, bounds)?;
                        return Some(Action::publish(PointerMessage::Dragged(point)).and_capture());
                    }
                    return None;
                }
                let point = self.to_raster(position, bounds)?;
                Some(Action::publish(PointerMessage::Moved(point)))
            }
            iced::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                state.pressed_at = Some(position?);
                state.dragging = false;
                Some(Action::publish(PointerMessage::Pressed).and_capture())
            }
            iced::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                state.pressed_at.take()?;
                let click = if state.dragging {
                    None
                } else {
                    position
                        .and_then(|position| self.to_raster(position, bounds))
                        .map(|point| (point, state.clicks.register(Instant::now())))
                };
                state.dragging = false;
                Some(Action::publish(PointerMessage::Released { click }).and_capture())
            }
            _ => None,
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        _renderer: &Renderer,
        _theme: &Theme,
        _bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        Vec::new()
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if !cursor.is_over(bounds) {
            return mouse::Interaction::default();
        }
        match self.cursor {
            CursorIcon::Default => mouse::Interaction::Idle,
            CursorIcon::Hand => mouse::Interaction::Pointer,
            CursorIcon::Crosshair => mouse::Interaction::Crosshair,
            CursorIcon::Move => mouse::Interaction::Grabbing,
        }
    }
}
