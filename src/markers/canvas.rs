// SPDX-License-Identifier: MPL-2.0
//! Drawing capability used by markers.
//!
//! Markers only know how to describe themselves as paths and labels. A
//! [`MarkerCanvas`] turns those into pixels; [`RasterCanvas`] does it on a
//! `tiny_skia` pixmap through the marker-space transform, rendering label
//! text with resvg.

use super::MarkerColor;
use crate::geometry::Bounds;
use resvg::usvg;
use std::sync::Arc;
use tiny_skia::{Paint, Path, Pixmap, Stroke, Transform};

/// Text measurement used to size label areas.
pub trait FontMetrics {
    /// Advance width of `text` in marker-space units.
    fn text_width(&self, text: &str) -> f32;

    /// Height of one line of text.
    fn line_height(&self) -> f32;

    fn font_size(&self) -> f32;
}

/// Approximate metrics for a proportional sans-serif face.
///
/// Labels are short, so an average advance per character keeps hit-testing
/// and drawing in agreement without shaping the text twice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelMetrics {
    font_size: f32,
}

const AVERAGE_ADVANCE: f32 = 0.6;
const LINE_SPACING: f32 = 1.2;

impl LabelMetrics {
    #[must_use]
    pub const fn new(font_size: f32) -> Self {
        Self { font_size }
    }
}

impl FontMetrics for LabelMetrics {
    fn text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * AVERAGE_ADVANCE * self.font_size
    }

    fn line_height(&self) -> f32 {
        LINE_SPACING * self.font_size
    }

    fn font_size(&self) -> f32 {
        self.font_size
    }
}

/// Surface a marker draws itself on.
pub trait MarkerCanvas {
    /// Strokes `path` (given in marker space).
    fn stroke_path(&mut self, path: &Path, color: MarkerColor, width: f32);

    /// Draws upright `text` inside `area` (given in marker space).
    fn draw_label(&mut self, text: &str, area: Bounds, color: MarkerColor);

    fn metrics(&self) -> &dyn FontMetrics;
}

/// Font database shared by every label render.
#[derive(Clone)]
pub struct LabelFonts {
    database: Arc<usvg::fontdb::Database>,
}

impl LabelFonts {
    /// Loads the fonts installed on the system.
    #[must_use]
    pub fn system() -> Self {
        let mut database = usvg::fontdb::Database::new();
        database.load_system_fonts();
        tracing::debug!(faces = database.len(), "loaded label fonts");
        Self {
            database: Arc::new(database),
        }
    }

    /// No fonts: labels are laid out but render no glyphs.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            database: Arc::new(usvg::fontdb::Database::new()),
        }
    }
}

impl std::fmt::Debug for LabelFonts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelFonts")
            .field("faces", &self.database.len())
            .finish()
    }
}

/// Canvas drawing into a pixmap through the marker-space transform.
pub struct RasterCanvas<'a> {
    pixmap: &'a mut Pixmap,
    transform: Transform,
    metrics: LabelMetrics,
    fonts: &'a LabelFonts,
}

impl<'a> RasterCanvas<'a> {
    pub fn new(
        pixmap: &'a mut Pixmap,
        transform: Transform,
        metrics: LabelMetrics,
        fonts: &'a LabelFonts,
    ) -> Self {
        Self {
            pixmap,
            transform,
            metrics,
            fonts,
        }
    }
}

fn paint_for(color: MarkerColor) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

/// Builds a standalone SVG document holding one line of text.
fn label_svg(text: &str, area: Bounds, font_size: f32, color: MarkerColor) -> String {
    let escaped = quick_xml::escape::escape(text);
    let fill = MarkerColor { a: 255, ..color }.to_hex();
    let opacity = f32::from(color.a) / 255.0;
    // Baseline sits at the font size; the remaining line spacing is descent.
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}"><text x="0" y="{font_size}" font-family="sans-serif" font-size="{font_size}" fill="{fill}" fill-opacity="{opacity}">{escaped}</text></svg>"#,
        w = area.width,
        h = area.height,
    )
}

impl MarkerCanvas for RasterCanvas<'_> {
    fn stroke_path(&mut self, path: &Path, color: MarkerColor, width: f32) {
        let stroke = Stroke {
            width,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(path, &paint_for(color), &stroke, self.transform, None);
    }

    fn draw_label(&mut self, text: &str, area: Bounds, color: MarkerColor) {
        if area.width <= 0.0 || area.height <= 0.0 {
            return;
        }
        let svg = label_svg(text, area, self.metrics.font_size(), color);

        let mut options = usvg::Options::default();
        options.fontdb = Arc::clone(&self.fonts.database);
        let tree = match usvg::Tree::from_str(&svg, &options) {
            Ok(tree) => tree,
            Err(err) => {
                tracing::debug!(%err, label = text, "skipping unrenderable label");
                return;
            }
        };

        let transform = self.transform.pre_translate(area.x, area.y);
        resvg::render(&tree, transform, &mut self.pixmap.as_mut());
    }

    fn metrics(&self) -> &dyn FontMetrics {
        &self.metrics
    }
}
