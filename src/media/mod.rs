// SPDX-License-Identifier: MPL-2.0
//! Raster side of the viewer.
//!
//! This module loads the base image, applies tone adjustments and owns the
//! [`TransformPipeline`] that composes the presented raster with markers.

pub mod adjustments;
pub mod image;
pub mod image_transform;
pub mod pipeline;

pub use adjustments::ImageAdjustments;
pub use image::load_image;
pub use pipeline::{Frame, RedrawStatus, TransformPipeline};
