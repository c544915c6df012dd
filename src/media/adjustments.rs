// SPDX-License-Identifier: MPL-2.0
//! User-editable image adjustments and the transforms derived from them.
//!
//! Three values are derived for a source of size `W x H`:
//!
//! - the **presentation transform**: mirror about the image center, then
//!   rotate about the image center;
//! - the **zoom rect**: a centered rectangle of size `W·z x H·z`;
//! - the **marker-space transform**: presentation, then translate to the zoom
//!   rect origin, then scale by `z`.
//!
//! The marker-space transform maps original image coordinates (where markers
//! live) to pixels of the presented raster. It is built only from
//! reflections, a rotation, a uniform scale and translations, so it is always
//! invertible.

use crate::domain::editing::{AdjustmentPercent, ZoomPercent};
use crate::domain::marker::normalize_degrees;
use crate::geometry::Bounds;
use serde::{Deserialize, Serialize};
use tiny_skia::Transform;

/// Mirror, rotation, zoom and tone settings for the displayed image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageAdjustments {
    /// Mirror left to right.
    pub mirror_x: bool,
    /// Mirror top to bottom.
    pub mirror_y: bool,
    /// Presentation rotation in degrees, clockwise.
    pub rotation: f32,
    /// Zoom in percent.
    pub zoom: f32,
    /// Brightness, -100..=100.
    pub brightness: i32,
    /// Contrast, -100..=100.
    pub contrast: i32,
}

impl Default for ImageAdjustments {
    fn default() -> Self {
        Self {
            mirror_x: false,
            mirror_y: false,
            rotation: 0.0,
            zoom: ZoomPercent::default().value(),
            brightness: AdjustmentPercent::default().value(),
            contrast: AdjustmentPercent::default().value(),
        }
    }
}

impl ImageAdjustments {
    /// Rotation normalized into `[0, 360)`.
    #[must_use]
    pub fn rotation_degrees(&self) -> f32 {
        normalize_degrees(self.rotation)
    }

    #[must_use]
    pub fn zoom(&self) -> ZoomPercent {
        ZoomPercent::new(self.zoom)
    }

    #[must_use]
    pub fn brightness(&self) -> AdjustmentPercent {
        AdjustmentPercent::new(self.brightness)
    }

    #[must_use]
    pub fn contrast(&self) -> AdjustmentPercent {
        AdjustmentPercent::new(self.contrast)
    }

    /// Whether switching from `other` to `self` changes the pixels of the
    /// source before any geometric transform.
    #[must_use]
    pub fn tone_differs(&self, other: &Self) -> bool {
        self.brightness() != other.brightness() || self.contrast() != other.contrast()
    }

    /// Mirror, then rotate, both about the center of a `width x height` image.
    #[must_use]
    pub fn presentation_transform(&self, width: f32, height: f32) -> Transform {
        let (sx, tx) = if self.mirror_x { (-1.0, width) } else { (1.0, 0.0) };
        let (sy, ty) = if self.mirror_y { (-1.0, height) } else { (1.0, 0.0) };
        Transform::from_rotate_at(self.rotation_degrees(), width / 2.0, height / 2.0)
            .pre_translate(tx, ty)
            .pre_scale(sx, sy)
    }

    /// Centered rectangle the source is scaled into.
    #[must_use]
    pub fn zoom_rect(&self, width: f32, height: f32) -> Bounds {
        let factor = self.zoom().as_factor();
        let zoomed_width = width * factor;
        let zoomed_height = height * factor;
        Bounds::new(
            (width - zoomed_width) / 2.0,
            (height - zoomed_height) / 2.0,
            zoomed_width,
            zoomed_height,
        )
    }

    /// Presentation, then zoom rect origin, then zoom scale.
    #[must_use]
    pub fn marker_space_transform(&self, width: f32, height: f32) -> Transform {
        let zoom_rect = self.zoom_rect(width, height);
        let factor = self.zoom().as_factor();
        self.presentation_transform(width, height)
            .pre_translate(zoom_rect.x, zoom_rect.y)
            .pre_scale(factor, factor)
    }
}
