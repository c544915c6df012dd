// SPDX-License-Identifier: MPL-2.0
//! Move and rotate gestures.
//!
//! Both mappings are tuned for feel rather than derived: moving pins the
//! marker's rotated top-left corner (where its label hangs) to the pointer,
//! and rotating turns by a coarse amount driven by the horizontal offset
//! from the rotate handle.

use crate::config::defaults::ROTATE_DELTA_DIVISOR;
use crate::geometry::rotate_about;
use crate::markers::{MarkerGeometry, MarkerShape, ShapeMarker};
use tiny_skia::Point;

/// Moves a marker so its anchor corner follows `pointer` (marker space).
pub fn move_marker(geometry: &mut MarkerGeometry, pointer: Point) {
    match geometry {
        MarkerGeometry::Shape(shape) => {
            let (sin, cos) = shape.rotation().radians().sin_cos();
            let (w, h) = (shape.width(), shape.height());
            shape.set_center(Point::from_xy(
                pointer.x + (w * cos - h * sin) / 2.0,
                pointer.y + (h * cos + w * sin) / 2.0,
            ));
        }
        MarkerGeometry::Arrow(arrow) => arrow.move_start_to(pointer),
    }
}

/// Rotates a box marker from its rotate handle toward `pointer`.
///
/// The pointer and the handle are de-rotated about the center; their
/// horizontal offset `delta` turns the box by `delta / 100 + sign(delta)`
/// degrees.
pub fn rotate_box(shape: &mut ShapeMarker, pointer: Point) {
    let Some(handle) = shape.rotate_point() else {
        return;
    };
    let center = shape.pivot();
    let theta = shape.rotation().radians();
    let pointer_local = rotate_about(pointer, center, -theta);
    let handle_local = rotate_about(handle, center, -theta);

    let delta = pointer_local.x - handle_local.x;
    let direction = if delta > 0.0 {
        1.0
    } else if delta < 0.0 {
        -1.0
    } else {
        0.0
    };
    let rotation = shape
        .rotation()
        .rotated_by(delta / ROTATE_DELTA_DIVISOR + direction);
    shape.set_rotation(rotation);
}
