// SPDX-License-Identifier: MPL-2.0
//! Box marker: a rectangle, ellipse or triangle inscribed in a rotated box.
//!
//! The stored position is the box **center**, which is also the rotation
//! pivot. Every geometric query converts center + size to corner + size first.

use super::{angle_serde, point_serde, MarkerShape};
use crate::config::defaults::ROTATE_HANDLE_OFFSET;
use crate::domain::marker::MarkerAngle;
use crate::error::{Error, Result};
use crate::geometry::{rotate_about, Bounds};
use serde::{Deserialize, Serialize};
use tiny_skia::{Path, PathBuilder, Point, Transform};

/// Primitive drawn inside the bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Ellipse,
    Triangle,
}

/// Non-negative box size, persisted as `[width, height]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "[f32; 2]", into = "[f32; 2]")]
pub struct MarkerSize {
    width: f32,
    height: f32,
}

impl MarkerSize {
    /// Creates a size; negative or non-finite dimensions are rejected.
    pub fn new(width: f32, height: f32) -> Result<Self> {
        let valid = |v: f32| v.is_finite() && v >= 0.0;
        if !valid(width) || !valid(height) {
            return Err(Error::InvalidSize { width, height });
        }
        Ok(Self { width, height })
    }

    #[must_use]
    pub fn width(self) -> f32 {
        self.width
    }

    #[must_use]
    pub fn height(self) -> f32 {
        self.height
    }
}

impl TryFrom<[f32; 2]> for MarkerSize {
    type Error = Error;

    fn try_from([width, height]: [f32; 2]) -> Result<Self> {
        Self::new(width, height)
    }
}

impl From<MarkerSize> for [f32; 2] {
    fn from(size: MarkerSize) -> Self {
        [size.width, size.height]
    }
}

/// Box marker geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeMarker {
    #[serde(rename = "position", with = "point_serde")]
    center: Point,
    size: MarkerSize,
    shape: ShapeKind,
    #[serde(with = "angle_serde")]
    rotation: MarkerAngle,
}

impl ShapeMarker {
    /// Creates a box marker centered on `center`.
    pub fn new(
        center: Point,
        width: f32,
        height: f32,
        shape: ShapeKind,
        rotation_degrees: f32,
    ) -> Result<Self> {
        let size = MarkerSize::new(width, height)?;
        Ok(Self::from_parts(
            center,
            size,
            shape,
            MarkerAngle::new(rotation_degrees),
        ))
    }

    #[must_use]
    pub fn from_parts(center: Point, size: MarkerSize, shape: ShapeKind, rotation: MarkerAngle) -> Self {
        Self {
            center,
            size,
            shape,
            rotation,
        }
    }

    #[must_use]
    pub fn center(&self) -> Point {
        self.center
    }

    pub fn set_center(&mut self, center: Point) {
        self.center = center;
    }

    #[must_use]
    pub fn width(&self) -> f32 {
        self.size.width
    }

    #[must_use]
    pub fn height(&self) -> f32 {
        self.size.height
    }

    #[must_use]
    pub fn size(&self) -> MarkerSize {
        self.size
    }

    /// Sets the width; a negative value is rejected and leaves the marker unchanged.
    pub fn set_width(&mut self, width: f32) -> Result<()> {
        self.size = MarkerSize::new(width, self.size.height)?;
        Ok(())
    }

    /// Sets the height; a negative value is rejected and leaves the marker unchanged.
    pub fn set_height(&mut self, height: f32) -> Result<()> {
        self.size = MarkerSize::new(self.size.width, height)?;
        Ok(())
    }

    /// Sets both dimensions atomically.
    pub fn set_size(&mut self, width: f32, height: f32) -> Result<()> {
        self.size = MarkerSize::new(width, height)?;
        Ok(())
    }

    #[must_use]
    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    pub fn set_shape(&mut self, shape: ShapeKind) {
        self.shape = shape;
    }

    pub fn set_rotation(&mut self, rotation: MarkerAngle) {
        self.rotation = rotation;
    }

    /// Unrotated, corner-origin bounds.
    #[must_use]
    pub fn shape_bounds(&self) -> Bounds {
        Bounds::from_center(self.center, self.size.width, self.size.height)
    }

    fn rotated(&self, point: Point) -> Point {
        rotate_about(point, self.center, self.rotation.radians())
    }

    fn unrotated_outline(&self) -> Option<Path> {
        let bounds = self.shape_bounds();
        let rect = bounds.to_rect()?;
        match self.shape {
            ShapeKind::Rectangle => Some(PathBuilder::from_rect(rect)),
            ShapeKind::Ellipse => PathBuilder::from_oval(rect),
            ShapeKind::Triangle => {
                let mut builder = PathBuilder::new();
                builder.move_to(bounds.center().x, bounds.y);
                builder.line_to(bounds.right(), bounds.bottom());
                builder.line_to(bounds.x, bounds.bottom());
                builder.close();
                builder.finish()
            }
        }
    }
}

impl MarkerShape for ShapeMarker {
    /// Eight handles in scan order: x ∈ {0, 1, 2} outer, y ∈ {0, 1, 2} inner,
    /// skipping the center; matches `DragPoint` ordinals.
    fn scale_points(&self) -> Vec<Point> {
        let bounds = self.shape_bounds();
        let mut points = Vec::with_capacity(8);
        for x in 0..3u8 {
            for y in 0..3u8 {
                if x == 1 && y == 1 {
                    continue;
                }
                let corner = Point::from_xy(
                    bounds.x + f32::from(x) / 2.0 * bounds.width,
                    bounds.y + f32::from(y) / 2.0 * bounds.height,
                );
                points.push(self.rotated(corner));
            }
        }
        points
    }

    fn rotate_point(&self) -> Option<Point> {
        let handle = Point::from_xy(
            self.center.x,
            self.center.y - (self.size.height / 2.0 + ROTATE_HANDLE_OFFSET),
        );
        Some(self.rotated(handle))
    }

    fn label_anchor(&self) -> Point {
        self.rotated(self.shape_bounds().origin())
    }

    fn pivot(&self) -> Point {
        self.center
    }

    fn rotation(&self) -> MarkerAngle {
        self.rotation
    }

    fn outline(&self) -> Option<Path> {
        let path = self.unrotated_outline()?;
        if !self.rotation.is_rotated() {
            return Some(path);
        }
        path.transform(Transform::from_rotate_at(
            self.rotation.degrees(),
            self.center.x,
            self.center.y,
        ))
    }
}
