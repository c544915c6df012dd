// SPDX-License-Identifier: MPL-2.0
//! Pointer-driven marker editing.
//!
//! [`MarkerInteraction`] is a small state machine fed with device-space
//! pointer events. Each event is mapped into marker space through the
//! inverse of the current marker-space transform, hit-tested against the
//! visible markers, and only then may mutate the selected marker.
//!
//! ```text
//!            press (selected)          double-click on selection
//!   Move <──────────────────── None ───────────────────────────> Resize
//!        ─────────────────────>     <──────── single click ───── Resize/Rotate
//!               release                        hover on rotate handle
//!                                        Resize <──────────────> Rotate
//! ```
//!
//! Resize and rotate have no cancel path: a single click ends them.

pub mod motion;
pub mod resize;

use crate::domain::marker::DragPoint;
use crate::error::Result;
use crate::geometry::{distance, invert, map_point, uniform_scale};
use crate::markers::{
    ArrowEnd, FontMetrics, Marker, MarkerGeometry, MarkerId, MarkerSource, LINE_WIDTH,
};
use tiny_skia::{Point, Transform};

/// Editing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    None,
    Move,
    Resize,
    Rotate,
}

/// Pointer shape requested by the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorIcon {
    #[default]
    Default,
    Hand,
    Crosshair,
    Move,
}

/// Handle grabbed for a resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveHandle {
    Box(DragPoint),
    Arrow(ArrowEnd),
}

/// What the handler needs to know about the current view.
#[derive(Clone, Copy)]
pub struct PointerContext<'a> {
    /// Marker space → device pixels.
    pub transform: Transform,
    pub time_index: usize,
    pub metrics: &'a dyn FontMetrics,
}

impl PointerContext<'_> {
    /// # Panics
    ///
    /// Panics if the transform is singular.
    fn to_marker_space(&self, device: Point) -> Point {
        map_point(invert(self.transform), device)
    }

    /// Handle hit radius: one line width on screen, whatever the zoom.
    fn handle_tolerance(&self) -> f32 {
        LINE_WIDTH / uniform_scale(self.transform)
    }
}

/// Selection and editing state of one viewing session.
#[derive(Debug, Clone, Default)]
pub struct MarkerInteraction {
    mode: Mode,
    selected: Option<MarkerId>,
    handle: Option<ActiveHandle>,
    cursor: CursorIcon,
}

impl MarkerInteraction {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn selected(&self) -> Option<MarkerId> {
        self.selected
    }

    #[must_use]
    pub fn cursor(&self) -> CursorIcon {
        self.cursor
    }

    #[must_use]
    pub fn active_handle(&self) -> Option<ActiveHandle> {
        self.handle
    }

    /// Drops the selection and returns to [`Mode::None`].
    pub fn reset(&mut self) {
        if self.selected.is_some() || self.mode != Mode::None {
            tracing::debug!(mode = ?self.mode, "interaction reset");
        }
        *self = Self::default();
    }

    /// Pointer moved with no button held. Returns whether anything changed.
    pub fn hover(&mut self, markers: &dyn MarkerSource, ctx: &PointerContext<'_>, device: Point) -> bool {
        let before = self.clone();
        let point = ctx.to_marker_space(device);
        match self.mode {
            Mode::None => self.hover_labels(markers, ctx, point),
            Mode::Resize | Mode::Rotate => self.hover_handles(markers, ctx, point),
            Mode::Move => {}
        }
        self.changed_since(&before)
    }

    /// Button released without dragging; `count` is 2 for a double click.
    pub fn click(
        &mut self,
        markers: &dyn MarkerSource,
        ctx: &PointerContext<'_>,
        device: Point,
        count: u32,
    ) -> bool {
        let before = self.clone();
        let point = ctx.to_marker_space(device);
        let on_selection = self
            .selected
            .and_then(|id| markers.marker(id))
            .is_some_and(|marker| marker.label_area(ctx.metrics).contains(point));

        if count >= 2 && on_selection {
            self.set_mode(Mode::Resize);
            self.handle = None;
            self.cursor = CursorIcon::Crosshair;
        } else {
            self.set_mode(Mode::None);
            self.handle = None;
            self.hover_labels(markers, ctx, point);
        }
        self.changed_since(&before)
    }

    /// Button pressed.
    pub fn press(&mut self) -> bool {
        if self.selected.is_some() && self.mode == Mode::None {
            self.set_mode(Mode::Move);
            self.cursor = CursorIcon::Move;
            return true;
        }
        false
    }

    /// Button released.
    pub fn release(&mut self) -> bool {
        if self.mode != Mode::Move {
            return false;
        }
        self.set_mode(Mode::None);
        self.cursor = if self.selected.is_some() {
            CursorIcon::Hand
        } else {
            CursorIcon::Default
        };
        true
    }

    /// Pointer moved with a button held. Returns whether a marker changed.
    ///
    /// # Errors
    ///
    /// Propagates a rejected size from a resize; the geometry is left as it
    /// was before the event.
    pub fn drag(
        &mut self,
        markers: &mut dyn MarkerSource,
        ctx: &PointerContext<'_>,
        device: Point,
    ) -> Result<bool> {
        let Some(id) = self.selected else {
            return Ok(false);
        };
        let point = ctx.to_marker_space(device);
        let Some(marker) = markers.marker_mut(id) else {
            tracing::debug!(?id, "selected marker disappeared");
            self.reset();
            return Ok(false);
        };

        match (self.mode, self.handle, &mut marker.geometry) {
            (Mode::Move, _, geometry) => {
                motion::move_marker(geometry, point);
                Ok(true)
            }
            (Mode::Resize, Some(ActiveHandle::Box(handle)), MarkerGeometry::Shape(shape)) => {
                let next = resize::resize_box(shape, handle, point).inspect_err(|err| {
                    tracing::error!(%err, ?id, "resize rejected");
                })?;
                self.handle = Some(ActiveHandle::Box(next));
                Ok(true)
            }
            (Mode::Resize, Some(ActiveHandle::Arrow(end)), MarkerGeometry::Arrow(arrow)) => {
                arrow.set_endpoint(end, point);
                Ok(true)
            }
            (Mode::Rotate, _, MarkerGeometry::Shape(shape)) => {
                motion::rotate_box(shape, point);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn hover_labels(&mut self, markers: &dyn MarkerSource, ctx: &PointerContext<'_>, point: Point) {
        let hit = markers
            .markers_for_image(ctx.time_index)
            .into_iter()
            .find(|marker| marker.label_area(ctx.metrics).contains(point))
            .map(|marker| marker.id);
        self.selected = hit;
        self.cursor = if hit.is_some() {
            CursorIcon::Hand
        } else {
            CursorIcon::Default
        };
    }

    fn hover_handles(&mut self, markers: &dyn MarkerSource, ctx: &PointerContext<'_>, point: Point) {
        let Some(marker) = self.selected.and_then(|id| markers.marker(id)) else {
            self.reset();
            return;
        };
        let tolerance = ctx.handle_tolerance();
        let near = |handle: Point| distance(handle, point) <= tolerance;

        if marker.rotate_point().is_some_and(near) {
            self.set_mode(Mode::Rotate);
            self.handle = None;
        } else {
            self.set_mode(Mode::Resize);
            self.handle = marker
                .scale_points()
                .into_iter()
                .position(near)
                .and_then(|index| handle_at(marker, index));
        }
    }

    fn set_mode(&mut self, mode: Mode) {
        if mode != self.mode {
            tracing::debug!(from = ?self.mode, to = ?mode, selected = ?self.selected, "interaction mode");
            self.mode = mode;
        }
    }

    fn changed_since(&self, before: &Self) -> bool {
        self.mode != before.mode
            || self.selected != before.selected
            || self.handle != before.handle
            || self.cursor != before.cursor
    }
}

/// Maps a position in `scale_points()` to the handle it stands for.
fn handle_at(marker: &Marker, index: usize) -> Option<ActiveHandle> {
    match marker.geometry {
        MarkerGeometry::Shape(_) => DragPoint::from_ordinal(index).map(ActiveHandle::Box),
        MarkerGeometry::Arrow(_) => ArrowEnd::from_index(index).map(ActiveHandle::Arrow),
    }
}
