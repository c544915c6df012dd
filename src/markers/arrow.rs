// SPDX-License-Identifier: MPL-2.0
//! Arrow marker: a shaft from `start` to `tip` with a two-stroke head.
//!
//! Arrows carry no rotation of their own; direction comes from the vector
//! between the endpoints.

use super::{point_serde, MarkerShape};
use crate::config::defaults::ARROW_HEAD_LENGTH;
use crate::domain::marker::MarkerAngle;
use serde::{Deserialize, Serialize};
use tiny_skia::{Path, PathBuilder, Point};

/// Angle between the shaft and each head stroke.
const HEAD_SPREAD: f32 = std::f32::consts::FRAC_PI_6;

/// Which endpoint of an arrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowEnd {
    Start,
    Tip,
}

impl ArrowEnd {
    /// Index of this endpoint in the arrow's scale points.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            ArrowEnd::Start => 0,
            ArrowEnd::Tip => 1,
        }
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(ArrowEnd::Start),
            1 => Some(ArrowEnd::Tip),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrowMarker {
    #[serde(with = "point_serde")]
    start: Point,
    #[serde(with = "point_serde")]
    tip: Point,
}

impl ArrowMarker {
    #[must_use]
    pub fn new(start: Point, tip: Point) -> Self {
        Self { start, tip }
    }

    #[must_use]
    pub fn start(&self) -> Point {
        self.start
    }

    #[must_use]
    pub fn tip(&self) -> Point {
        self.tip
    }

    #[must_use]
    pub fn endpoint(&self, end: ArrowEnd) -> Point {
        match end {
            ArrowEnd::Start => self.start,
            ArrowEnd::Tip => self.tip,
        }
    }

    pub fn set_endpoint(&mut self, end: ArrowEnd, point: Point) {
        match end {
            ArrowEnd::Start => self.start = point,
            ArrowEnd::Tip => self.tip = point,
        }
    }

    /// Moves the arrow so `start` lands on `position`, keeping its vector.
    pub fn move_start_to(&mut self, position: Point) {
        let dx = position.x - self.start.x;
        let dy = position.y - self.start.y;
        self.start = position;
        self.tip = Point::from_xy(self.tip.x + dx, self.tip.y + dy);
    }

    /// Direction of the arrow in radians; `None` when both endpoints coincide.
    #[must_use]
    pub fn direction(&self) -> Option<f32> {
        let dx = self.tip.x - self.start.x;
        let dy = self.tip.y - self.start.y;
        if dx == 0.0 && dy == 0.0 {
            None
        } else {
            Some(dy.atan2(dx))
        }
    }
}

impl MarkerShape for ArrowMarker {
    fn scale_points(&self) -> Vec<Point> {
        vec![self.start, self.tip]
    }

    fn rotate_point(&self) -> Option<Point> {
        None
    }

    fn label_anchor(&self) -> Point {
        self.start
    }

    fn pivot(&self) -> Point {
        self.start
    }

    fn rotation(&self) -> MarkerAngle {
        MarkerAngle::ZERO
    }

    fn outline(&self) -> Option<Path> {
        let angle = self.direction()?;
        let mut builder = PathBuilder::new();
        builder.move_to(self.start.x, self.start.y);
        builder.line_to(self.tip.x, self.tip.y);
        for side in [-HEAD_SPREAD, HEAD_SPREAD] {
            let back = angle + std::f32::consts::PI + side;
            builder.move_to(self.tip.x, self.tip.y);
            builder.line_to(
                self.tip.x + ARROW_HEAD_LENGTH * back.cos(),
                self.tip.y + ARROW_HEAD_LENGTH * back.sin(),
            );
        }
        builder.finish()
    }
}
