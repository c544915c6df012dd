// SPDX-License-Identifier: MPL-2.0
//! Handle-driven resize of box markers.
//!
//! Each drag event is applied incrementally: the pointer and the grabbed
//! handle are both de-rotated about the box center, their difference grows
//! or shrinks the box along the handle's signed axes, and the center moves
//! by half that difference, re-rotated, so the opposite edge stays put.
//!
//! When the pointer crosses the opposite edge a dimension would turn
//! negative. It is negated instead and the grabbed handle is remapped to its
//! mirror, so the same physical corner keeps following the pointer.

use crate::domain::marker::DragPoint;
use crate::error::Result;
use crate::geometry::rotate_about;
use crate::markers::{MarkerShape, ShapeMarker};
use tiny_skia::Point;

/// Resizes `shape` by dragging `handle` to `pointer` (marker space).
///
/// Returns the handle to use for the next drag event, which differs from
/// `handle` when the box flipped.
///
/// # Errors
///
/// Returns the size setter's error if a negative size reached it; the flip
/// handling makes that unreachable.
pub fn resize_box(shape: &mut ShapeMarker, handle: DragPoint, pointer: Point) -> Result<DragPoint> {
    let center = shape.center();
    let theta = shape.rotation().radians();
    let (sin, cos) = theta.sin_cos();

    let origin = shape.scale_points()[handle.ordinal()];
    let pointer_local = rotate_about(pointer, center, -theta);
    let origin_local = rotate_about(origin, center, -theta);

    let x_sign = f32::from(handle.x_sign());
    let y_sign = f32::from(handle.y_sign());
    // Mid-edge handles move along one axis only.
    let dx = if handle.x_sign() == 0 {
        0.0
    } else {
        pointer_local.x - origin_local.x
    };
    let dy = if handle.y_sign() == 0 {
        0.0
    } else {
        pointer_local.y - origin_local.y
    };

    let mut width = shape.width() + x_sign * dx;
    let mut height = shape.height() + y_sign * dy;
    let x = center.x + (dx / 2.0) * cos - (dy / 2.0) * sin;
    let y = center.y + (dy / 2.0) * cos + (dx / 2.0) * sin;

    let flipped_x = width < 0.0;
    let flipped_y = height < 0.0;
    if flipped_x {
        width = -width;
    }
    if flipped_y {
        height = -height;
    }
    let next = match (flipped_x, flipped_y) {
        (true, true) => handle.opposite(),
        (true, false) => handle.mirror_across_y(),
        (false, true) => handle.mirror_across_x(),
        (false, false) => handle,
    };
    if next != handle {
        tracing::debug!(from = ?handle, to = ?next, "resize crossed the opposite edge");
    }

    shape.set_size(width.round(), height.round())?;
    shape.set_center(Point::from_xy(x.round(), y.round()));
    Ok(next)
}
