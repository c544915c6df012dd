// SPDX-License-Identifier: MPL-2.0
//! Transform pipeline: source image + adjustments → composite raster.
//!
//! The pipeline keeps two caches. The *toned* raster is the source after
//! brightness and contrast; it only changes with the source or the tone
//! settings. The *base* raster is the toned raster drawn through the
//! marker-space transform; it only changes with the source or any
//! adjustment. Every redraw copies the base raster, strokes the markers
//! visible at the current time index on top and hands the result to the
//! subscribed listeners.

use super::adjustments::ImageAdjustments;
use super::image::load_image;
use super::image_transform::{apply_adjustments, dynamic_to_pixmap};
use crate::geometry::{invert, map_point};
use crate::markers::{LabelFonts, LabelMetrics, MarkerSource, RasterCanvas};
use image_rs::DynamicImage;
use std::fmt;
use std::path::Path;
use tiny_skia::{FilterQuality, Pixmap, PixmapPaint, Point, Transform};

/// Outcome of [`TransformPipeline::redraw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedrawStatus {
    /// The base raster was rebuilt before drawing markers.
    Full,
    /// The cached base raster was reused.
    MarkersOnly,
    /// No image is loaded; nothing was drawn.
    NoImage,
}

/// A finished composite, as handed to listeners.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub raster: &'a Pixmap,
    /// Marker space → raster pixels.
    pub marker_space: Transform,
    pub time_index: usize,
}

type Listener = Box<dyn FnMut(&Frame<'_>)>;

pub struct TransformPipeline {
    source: Option<DynamicImage>,
    adjustments: ImageAdjustments,
    metrics: LabelMetrics,
    fonts: LabelFonts,
    toned: Option<Pixmap>,
    base: Option<Pixmap>,
    composite: Option<Pixmap>,
    marker_space: Transform,
    time_index: usize,
    listeners: Vec<Listener>,
}

impl fmt::Debug for TransformPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformPipeline")
            .field("size", &self.size())
            .field("adjustments", &self.adjustments)
            .field("marker_space", &self.marker_space)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl TransformPipeline {
    #[must_use]
    pub fn new(adjustments: ImageAdjustments, metrics: LabelMetrics, fonts: LabelFonts) -> Self {
        Self {
            source: None,
            adjustments,
            metrics,
            fonts,
            toned: None,
            base: None,
            composite: None,
            marker_space: Transform::identity(),
            time_index: 0,
            listeners: Vec::new(),
        }
    }

    /// Loads the base image from disk.
    ///
    /// On failure the previous image and every cached raster are dropped and
    /// the error is logged; it does not propagate. Returns whether an image
    /// is now loaded.
    pub fn load_image(&mut self, path: &Path) -> bool {
        match load_image(path) {
            Ok(image) => {
                tracing::debug!(path = %path.display(), "loaded base image");
                self.set_source(image);
                true
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "failed to load base image");
                self.clear();
                false
            }
        }
    }

    /// Replaces the base image.
    pub fn set_source(&mut self, image: DynamicImage) {
        self.source = Some(image);
        self.toned = None;
        self.base = None;
        self.refresh_transform();
    }

    /// Drops the base image and every cached raster.
    pub fn clear(&mut self) {
        self.source = None;
        self.toned = None;
        self.base = None;
        self.composite = None;
        self.marker_space = Transform::identity();
    }

    /// Applies new adjustments; caches are only invalidated by real changes.
    pub fn set_adjustments(&mut self, adjustments: ImageAdjustments) {
        if adjustments == self.adjustments {
            return;
        }
        if adjustments.tone_differs(&self.adjustments) {
            self.toned = None;
        }
        self.adjustments = adjustments;
        self.base = None;
        self.refresh_transform();
    }

    #[must_use]
    pub fn adjustments(&self) -> &ImageAdjustments {
        &self.adjustments
    }

    #[must_use]
    pub fn label_metrics(&self) -> &LabelMetrics {
        &self.metrics
    }

    #[must_use]
    pub fn has_image(&self) -> bool {
        self.source.is_some()
    }

    /// Source (and raster) dimensions.
    #[must_use]
    pub fn size(&self) -> Option<(u32, u32)> {
        self.source
            .as_ref()
            .map(|image| (image.width(), image.height()))
    }

    /// Marker space → raster pixels.
    #[must_use]
    pub fn marker_space_transform(&self) -> Transform {
        self.marker_space
    }

    /// Maps a raster pixel position back into marker space.
    ///
    /// # Panics
    ///
    /// Panics if the marker-space transform is singular, which its
    /// construction rules out.
    #[must_use]
    pub fn to_marker_space(&self, device: Point) -> Point {
        map_point(invert(self.marker_space), device)
    }

    #[must_use]
    pub fn to_device(&self, marker: Point) -> Point {
        map_point(self.marker_space, marker)
    }

    /// Latest composite, if one was drawn since the image was loaded.
    #[must_use]
    pub fn frame(&self) -> Option<Frame<'_>> {
        self.composite.as_ref().map(|raster| Frame {
            raster,
            marker_space: self.marker_space,
            time_index: self.time_index,
        })
    }

    /// Registers a callback fired synchronously at the end of each redraw.
    pub fn subscribe(&mut self, listener: impl FnMut(&Frame<'_>) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Redraws the composite for `time_index`.
    ///
    /// Rebuilds the base raster first if the source or adjustments changed
    /// since the last redraw, then draws every marker visible at
    /// `time_index` in collection order.
    pub fn redraw(&mut self, markers: &dyn MarkerSource, time_index: usize) -> RedrawStatus {
        self.time_index = time_index;
        let Some(source) = self.source.as_ref() else {
            self.composite = None;
            return RedrawStatus::NoImage;
        };

        let mut status = RedrawStatus::MarkersOnly;
        if self.base.is_none() {
            if self.toned.is_none() {
                let toned = apply_adjustments(
                    source,
                    self.adjustments.brightness(),
                    self.adjustments.contrast(),
                );
                match dynamic_to_pixmap(&toned) {
                    Ok(pixmap) => self.toned = Some(pixmap),
                    Err(err) => {
                        tracing::warn!(error = %err, "cannot rasterize base image");
                        self.clear();
                        return RedrawStatus::NoImage;
                    }
                }
            }
            let Some(toned) = self.toned.as_ref() else {
                return RedrawStatus::NoImage;
            };
            let Some(mut base) = Pixmap::new(toned.width(), toned.height()) else {
                return RedrawStatus::NoImage;
            };
            let paint = PixmapPaint {
                quality: FilterQuality::Bilinear,
                ..PixmapPaint::default()
            };
            base.draw_pixmap(0, 0, toned.as_ref(), &paint, self.marker_space, None);
            tracing::debug!(adjustments = ?self.adjustments, "rebuilt base raster");
            self.base = Some(base);
            status = RedrawStatus::Full;
        }

        let Some(base) = self.base.as_ref() else {
            return RedrawStatus::NoImage;
        };
        let mut composite = base.clone();
        {
            let mut canvas =
                RasterCanvas::new(&mut composite, self.marker_space, self.metrics, &self.fonts);
            for marker in markers.markers_for_image(time_index) {
                marker.draw(&mut canvas);
            }
        }
        self.composite = Some(composite);

        if let Some(raster) = self.composite.as_ref() {
            let frame = Frame {
                raster,
                marker_space: self.marker_space,
                time_index,
            };
            for listener in &mut self.listeners {
                listener(&frame);
            }
        }
        status
    }

    fn refresh_transform(&mut self) {
        self.marker_space = match self.size() {
            Some((width, height)) => self
                .adjustments
                .marker_space_transform(width as f32, height as f32),
            None => Transform::identity(),
        };
    }
}
