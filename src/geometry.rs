// SPDX-License-Identifier: MPL-2.0
//! Planar helpers shared by the marker model, the transform pipeline and the
//! interaction handler.
//!
//! Points and affine transforms are `tiny_skia` types so the same values drive
//! rasterization and hit-testing.

use tiny_skia::{Point, Rect, Transform};

/// Axis-aligned rectangle with a top-left origin.
///
/// Unlike [`tiny_skia::Rect`], a zero-sized bounds is valid.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    #[must_use]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds the corner-origin bounds of a box given its center and size.
    #[must_use]
    pub fn from_center(center: Point, width: f32, height: f32) -> Self {
        Self::new(
            center.x - width / 2.0,
            center.y - height / 2.0,
            width,
            height,
        )
    }

    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[must_use]
    pub fn origin(&self) -> Point {
        Point::from_xy(self.x, self.y)
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::from_xy(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Converts to a `tiny_skia` rectangle; `None` when degenerate or non-finite.
    #[must_use]
    pub fn to_rect(&self) -> Option<Rect> {
        // tiny-skia accepts zero-sized rectangles.
        if !(self.width > 0.0 && self.height > 0.0) {
            return None;
        }
        Rect::from_xywh(self.x, self.y, self.width, self.height)
    }
}

/// Rotates `point` about `pivot` by `radians` (clockwise on a y-down raster).
#[must_use]
pub fn rotate_about(point: Point, pivot: Point, radians: f32) -> Point {
    if radians == 0.0 {
        return point;
    }
    let (sin, cos) = radians.sin_cos();
    let dx = point.x - pivot.x;
    let dy = point.y - pivot.y;
    Point::from_xy(
        pivot.x + dx * cos - dy * sin,
        pivot.y + dx * sin + dy * cos,
    )
}

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: Point, b: Point) -> f32 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Applies `transform` to a single point.
#[must_use]
pub fn map_point(transform: Transform, point: Point) -> Point {
    let mut points = [point];
    transform.map_points(&mut points);
    points[0]
}

/// Inverts a transform that is built only from mirroring, rotation, uniform
/// scale and translation.
///
/// # Panics
///
/// Panics if the transform is singular. The marker-space transform is
/// invertible by construction, so reaching this is a bug.
#[must_use]
pub fn invert(transform: Transform) -> Transform {
    // A scale-only singular matrix inverts to inf/NaN entries instead of None.
    match transform.invert().filter(|inverse| inverse.is_finite()) {
        Some(inverse) => inverse,
        None => panic!("marker-space transform is not invertible: {transform:?}"),
    }
}

/// Uniform scale factor of a similarity transform.
#[must_use]
pub fn uniform_scale(transform: Transform) -> f32 {
    let det = transform.sx * transform.sy - transform.kx * transform.ky;
    det.abs().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        distance(a, b) < 1e-3
    }

    #[test]
    fn from_center_converts_to_corner() {
        let bounds = Bounds::from_center(Point::from_xy(300.0, 300.0), 200.0, 100.0);
        assert_eq!(bounds, Bounds::new(200.0, 250.0, 200.0, 100.0));
        assert!(close(bounds.center(), Point::from_xy(300.0, 300.0)));
    }

    #[test]
    fn contains_is_inclusive() {
        let bounds = Bounds::new(10.0, 20.0, 30.0, 40.0);
        assert!(bounds.contains(Point::from_xy(10.0, 20.0)));
        assert!(bounds.contains(Point::from_xy(40.0, 60.0)));
        assert!(!bounds.contains(Point::from_xy(9.0, 30.0)));
        assert!(!bounds.contains(Point::from_xy(41.0, 30.0)));
        assert!(!bounds.contains(Point::from_xy(20.0, 19.0)));
        assert!(!bounds.contains(Point::from_xy(20.0, 61.0)));
    }

    #[test]
    fn zero_sized_bounds_has_no_rect() {
        assert!(Bounds::new(0.0, 0.0, 0.0, 10.0).to_rect().is_none());
        assert!(Bounds::new(0.0, 0.0, 5.0, 10.0).to_rect().is_some());
    }

    #[test]
    fn rotate_about_quarter_turn() {
        let rotated = rotate_about(
            Point::from_xy(10.0, 0.0),
            Point::from_xy(0.0, 0.0),
            std::f32::consts::FRAC_PI_2,
        );
        assert!(close(rotated, Point::from_xy(0.0, 10.0)));
    }

    #[test]
    fn rotate_and_back_is_identity() {
        let pivot = Point::from_xy(5.0, -3.0);
        let point = Point::from_xy(42.0, 17.0);
        let there = rotate_about(point, pivot, 1.1);
        assert!(close(rotate_about(there, pivot, -1.1), point));
    }

    #[test]
    fn invert_round_trips() {
        let transform = Transform::from_rotate_at(30.0, 50.0, 50.0)
            .pre_translate(10.0, 20.0)
            .pre_scale(2.0, 2.0);
        let point = Point::from_xy(7.0, 9.0);
        let back = map_point(invert(transform), map_point(transform, point));
        assert!(close(back, point));
        assert!((uniform_scale(transform) - 2.0).abs() < 1e-4);
    }

    #[test]
    #[should_panic(expected = "not invertible")]
    fn invert_singular_panics() {
        let _ = invert(Transform::from_scale(0.0, 1.0));
    }

    #[test]
    #[should_panic(expected = "not invertible")]
    fn invert_collapsed_rotation_panics() {
        let _ = invert(Transform::from_rotate(30.0).pre_scale(0.0, 0.0));
    }

    #[test]
    fn negative_or_nan_sized_bounds_has_no_rect() {
        assert!(Bounds::new(0.0, 0.0, -1.0, 10.0).to_rect().is_none());
        assert!(Bounds::new(0.0, 0.0, 10.0, f32::NAN).to_rect().is_none());
        assert!(Bounds::new(0.0, 0.0, 10.0, 1.0).to_rect().is_some());
    }
}
