// SPDX-License-Identifier: MPL-2.0
//! One viewing session: a transform pipeline, an interaction handler and the
//! markers they operate on.
//!
//! The session is the only owner of the handler's selection. Every entry
//! point that can invalidate it (image load failure, time change, marker
//! deletion) resets it here.

use crate::config::Config;
use crate::error::Result;
use crate::interaction::{CursorIcon, MarkerInteraction, Mode, PointerContext};
use crate::markers::{
    LabelFonts, LabelMetrics, Marker, MarkerCollection, MarkerDefaults, MarkerId, VisibilityRange,
};
use crate::media::{Frame, ImageAdjustments, RedrawStatus, TransformPipeline};
use image_rs::DynamicImage;
use std::path::Path;
use tiny_skia::Point;

#[derive(Debug)]
pub struct ViewerSession {
    pipeline: TransformPipeline,
    interaction: MarkerInteraction,
    markers: MarkerCollection,
    marker_defaults: MarkerDefaults,
    time_index: usize,
}

impl ViewerSession {
    #[must_use]
    pub fn new(config: &Config, fonts: LabelFonts) -> Self {
        let metrics = LabelMetrics::new(config.markers.font_size());
        Self {
            pipeline: TransformPipeline::new(config.adjustments.clone(), metrics, fonts),
            interaction: MarkerInteraction::new(),
            markers: MarkerCollection::new(),
            marker_defaults: config.markers.marker_defaults(),
            time_index: 0,
        }
    }

    #[must_use]
    pub fn markers(&self) -> &MarkerCollection {
        &self.markers
    }

    /// Direct access for edit forms; call [`Self::redraw`] afterwards.
    pub fn marker_mut(&mut self, id: MarkerId) -> Option<&mut Marker> {
        self.markers.get_mut(id)
    }

    /// Loads the base image. On failure the raster is cleared and the
    /// selection reset; the error is only logged.
    pub fn load_image(&mut self, path: &Path) -> bool {
        let loaded = self.pipeline.load_image(path);
        if !loaded {
            self.interaction.reset();
        }
        loaded
    }

    pub fn set_image(&mut self, image: DynamicImage) {
        self.pipeline.set_source(image);
    }

    #[must_use]
    pub fn adjustments(&self) -> &ImageAdjustments {
        self.pipeline.adjustments()
    }

    pub fn set_adjustments(&mut self, adjustments: ImageAdjustments) {
        self.pipeline.set_adjustments(adjustments);
    }

    #[must_use]
    pub fn time_index(&self) -> usize {
        self.time_index
    }

    /// Switches to another time index; the selection does not carry over.
    pub fn set_time_index(&mut self, time_index: usize) {
        if time_index != self.time_index {
            self.time_index = time_index;
            self.interaction.reset();
        }
    }

    /// Adds a default marker at the image center, visible at the current
    /// time index only.
    pub fn add_marker(&mut self) -> MarkerId {
        let center = self
            .pipeline
            .size()
            .map(|(w, h)| Point::from_xy(w as f32 / 2.0, h as f32 / 2.0))
            .unwrap_or_else(|| Point::from_xy(0.0, 0.0));
        let range = VisibilityRange::single(self.time_index);
        let id = self.markers.add_default(range, center, &self.marker_defaults);
        tracing::debug!(?id, time_index = self.time_index, "added marker");
        id
    }

    pub fn insert_marker(&mut self, marker: Marker) -> MarkerId {
        self.markers.add(marker)
    }

    pub fn delete_marker(&mut self, id: MarkerId) -> Option<Marker> {
        let removed = self.markers.remove(id)?;
        if self.interaction.selected() == Some(id) {
            self.interaction.reset();
        }
        Some(removed)
    }

    pub fn delete_selected(&mut self) -> Option<Marker> {
        let id = self.interaction.selected()?;
        self.delete_marker(id)
    }

    pub fn redraw(&mut self) -> RedrawStatus {
        let status = self.pipeline.redraw(&self.markers, self.time_index);
        if status == RedrawStatus::NoImage && self.interaction.selected().is_some() {
            self.interaction.reset();
        }
        status
    }

    #[must_use]
    pub fn frame(&self) -> Option<Frame<'_>> {
        self.pipeline.frame()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&Frame<'_>) + 'static) {
        self.pipeline.subscribe(listener);
    }

    #[must_use]
    pub fn pipeline(&self) -> &TransformPipeline {
        &self.pipeline
    }

    #[must_use]
    pub fn selected(&self) -> Option<MarkerId> {
        self.interaction.selected()
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.interaction.mode()
    }

    #[must_use]
    pub fn cursor(&self) -> CursorIcon {
        self.interaction.cursor()
    }

    // -------------------------------------------------------------------------
    // Pointer events (raster pixel coordinates)
    // -------------------------------------------------------------------------

    pub fn pointer_moved(&mut self, device: Point) -> bool {
        if !self.pipeline.has_image() {
            return false;
        }
        let ctx = PointerContext {
            transform: self.pipeline.marker_space_transform(),
            time_index: self.time_index,
            metrics: self.pipeline.label_metrics(),
        };
        self.interaction.hover(&self.markers, &ctx, device)
    }

    pub fn pointer_clicked(&mut self, device: Point, count: u32) -> bool {
        if !self.pipeline.has_image() {
            return false;
        }
        let ctx = PointerContext {
            transform: self.pipeline.marker_space_transform(),
            time_index: self.time_index,
            metrics: self.pipeline.label_metrics(),
        };
        self.interaction.click(&self.markers, &ctx, device, count)
    }

    pub fn pointer_pressed(&mut self) -> bool {
        self.interaction.press()
    }

    pub fn pointer_released(&mut self) -> bool {
        self.interaction.release()
    }

    /// Drags the selection and redraws if a marker changed.
    ///
    /// # Errors
    ///
    /// Returns the rejected geometry error of a resize.
    pub fn pointer_dragged(&mut self, device: Point) -> Result<bool> {
        if !self.pipeline.has_image() {
            return Ok(false);
        }
        let ctx = PointerContext {
            transform: self.pipeline.marker_space_transform(),
            time_index: self.time_index,
            metrics: self.pipeline.label_metrics(),
        };
        let changed = self.interaction.drag(&mut self.markers, &ctx, device)?;
        if changed {
            self.redraw();
        }
        Ok(changed)
    }
}
