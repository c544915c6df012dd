// SPDX-License-Identifier: MPL-2.0
//! Marker geometry model.
//!
//! A [`Marker`] is a labeled geometric annotation visible over an inclusive
//! range of time indices. Label, color and range are shared; the geometry is
//! one of the [`MarkerGeometry`] variants, each implementing [`MarkerShape`]:
//!
//! | Variant | Geometry | Drag handles |
//! |---------|----------|--------------|
//! | [`ShapeMarker`] | center, size, shape kind, rotation | 8 rotated box handles |
//! | [`ArrowMarker`] | start and tip | the two endpoints |
//!
//! All geometry lives in marker space (original image coordinates). The
//! interaction handler and the transform pipeline map it to device pixels.

pub mod arrow;
pub mod canvas;
pub mod collection;
pub mod shape;

pub use arrow::{ArrowEnd, ArrowMarker};
pub use canvas::{FontMetrics, LabelFonts, LabelMetrics, MarkerCanvas, RasterCanvas};
pub use collection::{MarkerCollection, MarkerSource};
pub use shape::{MarkerSize, ShapeKind, ShapeMarker};

use crate::config::defaults::{
    DEFAULT_MARKER_HEIGHT, DEFAULT_MARKER_LABEL, DEFAULT_MARKER_WIDTH, MARKER_LINE_WIDTH,
};
use crate::domain::marker::MarkerAngle;
use crate::error::{Error, Result};
use crate::geometry::Bounds;
use serde::{Deserialize, Serialize};
use tiny_skia::{Path, Point};

/// Stroke width of every marker; also the hit-test tolerance in device pixels.
pub const LINE_WIDTH: f32 = MARKER_LINE_WIDTH;

/// Identifier assigned by the owning [`MarkerCollection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct MarkerId(pub u64);

// =============================================================================
// Color
// =============================================================================

/// Marker color, persisted as `#rrggbb` (or `#rrggbbaa` when translucent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MarkerColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl MarkerColor {
    pub const RED: Self = Self::rgb(255, 0, 0);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parses `#rrggbb` or `#rrggbbaa`.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
        match digits.len() {
            6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self {
                r: channel(0)?,
                g: channel(2)?,
                b: channel(4)?,
                a: channel(6)?,
            }),
            _ => None,
        }
    }

    #[must_use]
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Default for MarkerColor {
    fn default() -> Self {
        Self::RED
    }
}

impl TryFrom<String> for MarkerColor {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::from_hex(&value).ok_or_else(|| format!("invalid color: {value}"))
    }
}

impl From<MarkerColor> for String {
    fn from(color: MarkerColor) -> Self {
        color.to_hex()
    }
}

// =============================================================================
// Visibility Range
// =============================================================================

/// Inclusive range of time indices a marker is visible on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRange")]
pub struct VisibilityRange {
    from: usize,
    to: usize,
}

#[derive(Deserialize)]
struct RawRange {
    from: usize,
    to: usize,
}

impl TryFrom<RawRange> for VisibilityRange {
    type Error = Error;

    fn try_from(raw: RawRange) -> Result<Self> {
        Self::new(raw.from, raw.to)
    }
}

impl VisibilityRange {
    /// Creates a range; `from` must not exceed `to`.
    pub fn new(from: usize, to: usize) -> Result<Self> {
        if from > to {
            return Err(Error::InvalidRange { from, to });
        }
        Ok(Self { from, to })
    }

    /// A range covering a single time index.
    #[must_use]
    pub fn single(index: usize) -> Self {
        Self {
            from: index,
            to: index,
        }
    }

    #[must_use]
    pub fn from(&self) -> usize {
        self.from
    }

    #[must_use]
    pub fn to(&self) -> usize {
        self.to
    }

    #[must_use]
    pub fn contains(&self, time_index: usize) -> bool {
        (self.from..=self.to).contains(&time_index)
    }
}

// =============================================================================
// Shape Capability
// =============================================================================

/// Geometric contract shared by every marker variant.
pub trait MarkerShape {
    /// Drag-handle positions in marker space, already rotated.
    fn scale_points(&self) -> Vec<Point>;

    /// Handle that starts a rotation, if the variant can be rotated.
    fn rotate_point(&self) -> Option<Point>;

    /// Rotated corner the label is anchored to.
    fn label_anchor(&self) -> Point;

    /// Rotation pivot.
    fn pivot(&self) -> Point;

    /// Own rotation of the variant.
    fn rotation(&self) -> MarkerAngle;

    /// Rotated outline to stroke; `None` when degenerate.
    fn outline(&self) -> Option<Path>;
}

/// Geometry variants of a marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MarkerGeometry {
    Shape(ShapeMarker),
    Arrow(ArrowMarker),
}

impl MarkerGeometry {
    fn as_shape(&self) -> &dyn MarkerShape {
        match self {
            MarkerGeometry::Shape(shape) => shape,
            MarkerGeometry::Arrow(arrow) => arrow,
        }
    }
}

impl MarkerShape for MarkerGeometry {
    fn scale_points(&self) -> Vec<Point> {
        self.as_shape().scale_points()
    }

    fn rotate_point(&self) -> Option<Point> {
        self.as_shape().rotate_point()
    }

    fn label_anchor(&self) -> Point {
        self.as_shape().label_anchor()
    }

    fn pivot(&self) -> Point {
        self.as_shape().pivot()
    }

    fn rotation(&self) -> MarkerAngle {
        self.as_shape().rotation()
    }

    fn outline(&self) -> Option<Path> {
        self.as_shape().outline()
    }
}

// =============================================================================
// Marker
// =============================================================================

/// Labeled annotation attached to a time range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Assigned by the owning collection; not persisted.
    #[serde(skip)]
    pub id: MarkerId,
    pub label: String,
    pub color: MarkerColor,
    #[serde(flatten)]
    pub range: VisibilityRange,
    #[serde(flatten)]
    pub geometry: MarkerGeometry,
}

impl Marker {
    #[must_use]
    pub fn new(
        label: impl Into<String>,
        color: MarkerColor,
        range: VisibilityRange,
        geometry: MarkerGeometry,
    ) -> Self {
        Self {
            id: MarkerId::default(),
            label: label.into(),
            color,
            range,
            geometry,
        }
    }

    /// Creates a box marker from the given defaults, centered on `center`.
    ///
    /// An invalid default size is replaced by the built-in one.
    #[must_use]
    pub fn with_defaults(defaults: &MarkerDefaults, range: VisibilityRange, center: Point) -> Self {
        let size = MarkerSize::new(defaults.width, defaults.height).unwrap_or_else(|err| {
            tracing::warn!(%err, "invalid default marker size");
            MarkerSize::new(DEFAULT_MARKER_WIDTH, DEFAULT_MARKER_HEIGHT).unwrap_or_default()
        });
        let shape = ShapeMarker::from_parts(center, size, defaults.shape, MarkerAngle::ZERO);
        Self::new(
            defaults.label.clone(),
            defaults.color,
            range,
            MarkerGeometry::Shape(shape),
        )
    }

    #[must_use]
    pub fn is_visible_at(&self, time_index: usize) -> bool {
        self.range.contains(time_index)
    }

    /// Label rectangle, sized by the rendered text and anchored at the rotated
    /// shape corner. The text sits above the anchor and is never rotated.
    #[must_use]
    pub fn label_area(&self, metrics: &dyn FontMetrics) -> Bounds {
        let anchor = self.geometry.label_anchor();
        let width = metrics.text_width(&self.label);
        let height = metrics.line_height();
        Bounds::new(anchor.x, anchor.y - height, width, height)
    }

    /// Strokes the rotated outline, then draws the upright label.
    pub fn draw(&self, canvas: &mut dyn MarkerCanvas) {
        if let Some(path) = self.geometry.outline() {
            canvas.stroke_path(&path, self.color, LINE_WIDTH);
        }
        if !self.label.is_empty() {
            let area = self.label_area(canvas.metrics());
            canvas.draw_label(&self.label, area, self.color);
        }
    }

    /// Structural equality of geometry (including shape kind), ignoring identity,
    /// label, color and range.
    #[must_use]
    pub fn same_geometry(&self, other: &Marker) -> bool {
        self.geometry == other.geometry
    }

    #[must_use]
    pub fn scale_points(&self) -> Vec<Point> {
        self.geometry.scale_points()
    }

    #[must_use]
    pub fn rotate_point(&self) -> Option<Point> {
        self.geometry.rotate_point()
    }
}

/// Values used when the user adds a marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerDefaults {
    pub label: String,
    pub color: MarkerColor,
    pub shape: ShapeKind,
    pub width: f32,
    pub height: f32,
}

impl Default for MarkerDefaults {
    fn default() -> Self {
        Self {
            label: DEFAULT_MARKER_LABEL.to_string(),
            color: MarkerColor::default(),
            shape: ShapeKind::default(),
            width: DEFAULT_MARKER_WIDTH,
            height: DEFAULT_MARKER_HEIGHT,
        }
    }
}

// =============================================================================
// Serde Helpers
// =============================================================================

/// Persists a point as `[x, y]`.
pub(crate) mod point_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use tiny_skia::Point;

    pub fn serialize<S: Serializer>(point: &Point, serializer: S) -> Result<S::Ok, S::Error> {
        [point.x, point.y].serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Point, D::Error> {
        let [x, y] = <[f32; 2]>::deserialize(deserializer)?;
        Ok(Point::from_xy(x, y))
    }
}

/// Persists a rotation as plain degrees, normalizing on load.
pub(crate) mod angle_serde {
    use crate::domain::marker::MarkerAngle;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(angle: &MarkerAngle, serializer: S) -> Result<S::Ok, S::Error> {
        angle.degrees().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<MarkerAngle, D::Error> {
        f32::deserialize(deserializer).map(MarkerAngle::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedMetrics;

    impl FontMetrics for FixedMetrics {
        fn text_width(&self, text: &str) -> f32 {
            10.0 * text.chars().count() as f32
        }

        fn line_height(&self) -> f32 {
            20.0
        }

        fn font_size(&self) -> f32 {
            16.0
        }
    }

    fn box_marker(rotation: f32) -> Marker {
        let shape = ShapeMarker::new(
            Point::from_xy(300.0, 300.0),
            200.0,
            100.0,
            ShapeKind::Rectangle,
            rotation,
        )
        .expect("valid size");
        Marker::new(
            "cell",
            MarkerColor::RED,
            VisibilityRange::single(0),
            MarkerGeometry::Shape(shape),
        )
    }

    #[test]
    fn invalid_default_size_uses_builtin_size() {
        let defaults = MarkerDefaults {
            width: f32::INFINITY,
            height: -5.0,
            ..MarkerDefaults::default()
        };
        let marker = Marker::with_defaults(&defaults, VisibilityRange::single(0), Point::from_xy(0.0, 0.0));
        match marker.geometry {
            MarkerGeometry::Shape(shape) => {
                assert_eq!((shape.width(), shape.height()), (DEFAULT_MARKER_WIDTH, DEFAULT_MARKER_HEIGHT));
            }
            MarkerGeometry::Arrow(_) => panic!("defaults build a box"),
        }
    }

    #[test]
    fn color_hex_round_trip() {
        let color = MarkerColor::from_hex("#12ab9f").expect("valid hex");
        assert_eq!(color, MarkerColor::rgb(0x12, 0xab, 0x9f));
        assert_eq!(color.to_hex(), "#12ab9f");
        let translucent = MarkerColor::from_hex("#00000080").expect("valid hex");
        assert_eq!(translucent.a, 0x80);
        assert_eq!(translucent.to_hex(), "#00000080");
    }

    #[test]
    fn color_rejects_malformed_hex() {
        assert!(MarkerColor::from_hex("12ab9f").is_none());
        assert!(MarkerColor::from_hex("#12ab9").is_none());
        assert!(MarkerColor::from_hex("#zzzzzz").is_none());
        assert!(MarkerColor::from_hex("#ééé").is_none());
    }

    #[test]
    fn visibility_range_is_inclusive() {
        let range = VisibilityRange::new(2, 5).expect("ordered range");
        assert!(!range.contains(1));
        assert!(range.contains(2));
        assert!(range.contains(5));
        assert!(!range.contains(6));
    }

    #[test]
    fn visibility_range_rejects_inverted_bounds() {
        assert_eq!(
            VisibilityRange::new(5, 2),
            Err(Error::InvalidRange { from: 5, to: 2 })
        );
    }

    #[test]
    fn label_area_sits_above_unrotated_corner() {
        let marker = box_marker(0.0);
        let area = marker.label_area(&FixedMetrics);
        assert_eq!(area, Bounds::new(200.0, 230.0, 40.0, 20.0));
    }

    #[test]
    fn label_area_follows_rotated_corner() {
        let marker = box_marker(90.0);
        let area = marker.label_area(&FixedMetrics);
        // Top-left corner (200, 250) rotated 90° about (300, 300) lands on (350, 200).
        assert!((area.x - 350.0).abs() < 1e-3);
        assert!((area.bottom() - 200.0).abs() < 1e-3);
        assert_eq!(area.width, 40.0);
    }

    #[test]
    fn label_hit_is_exact_at_edges() {
        let marker = box_marker(0.0);
        let area = marker.label_area(&FixedMetrics);
        assert!(area.contains(Point::from_xy(area.x, area.y)));
        assert!(area.contains(Point::from_xy(area.right(), area.bottom())));
        assert!(!area.contains(Point::from_xy(area.x - 1.0, area.y + 5.0)));
        assert!(!area.contains(Point::from_xy(area.right() + 1.0, area.y + 5.0)));
        assert!(!area.contains(Point::from_xy(area.x + 5.0, area.y - 1.0)));
        assert!(!area.contains(Point::from_xy(area.x + 5.0, area.bottom() + 1.0)));
    }

    #[test]
    fn draw_strokes_outline_then_upright_label() {
        use super::canvas::tests::RecordingCanvas;

        let marker = box_marker(30.0);
        let mut canvas = RecordingCanvas::default();
        marker.draw(&mut canvas);

        assert_eq!(canvas.strokes.len(), 1);
        let (_, color, width) = canvas.strokes[0];
        assert_eq!((color, width), (MarkerColor::RED, LINE_WIDTH));
        assert_eq!(canvas.labels.len(), 1);
        let (text, area) = &canvas.labels[0];
        assert_eq!(text, "cell");
        let anchor = marker.geometry.label_anchor();
        assert!((area.x - anchor.x).abs() < 1e-3);
        assert!((area.bottom() - anchor.y).abs() < 1e-3);
    }

    #[test]
    fn empty_label_is_not_drawn() {
        use super::canvas::tests::RecordingCanvas;

        let mut marker = box_marker(0.0);
        marker.label.clear();
        let mut canvas = RecordingCanvas::default();
        marker.draw(&mut canvas);
        assert_eq!(canvas.strokes.len(), 1);
        assert!(canvas.labels.is_empty());
    }

    #[test]
    fn clone_is_independent() {
        let original = box_marker(0.0);
        let mut copy = original.clone();
        if let MarkerGeometry::Shape(shape) = &mut copy.geometry {
            shape.set_center(Point::from_xy(0.0, 0.0));
        }
        copy.label.push('!');
        assert_ne!(copy, original);
        assert!(!copy.same_geometry(&original));
        assert_eq!(original.label, "cell");
    }

    #[test]
    fn same_geometry_ignores_label_and_color() {
        let a = box_marker(30.0);
        let mut b = box_marker(30.0);
        b.label = "other".into();
        b.color = MarkerColor::rgb(0, 0, 255);
        b.id = MarkerId(7);
        assert!(a.same_geometry(&b));
    }

    #[test]
    fn same_geometry_distinguishes_shape_kind() {
        let a = box_marker(0.0);
        let mut b = box_marker(0.0);
        if let MarkerGeometry::Shape(shape) = &mut b.geometry {
            shape.set_shape(ShapeKind::Ellipse);
        }
        assert!(!a.same_geometry(&b));
    }

    #[test]
    fn persisted_fields_keep_their_names() {
        let source = r##"
            label = "nucleus"
            color = "#00ff00"
            from = 3
            to = 9
            type = "shape"
            position = [120.0, 80.0]
            size = [40.0, 30.0]
            shape = "ellipse"
            rotation = -90.0
        "##;
        let marker: Marker = toml::from_str(source).expect("valid marker");
        assert_eq!(marker.label, "nucleus");
        assert_eq!(marker.range, VisibilityRange::new(3, 9).expect("ordered"));
        match &marker.geometry {
            MarkerGeometry::Shape(shape) => {
                assert_eq!(shape.center(), Point::from_xy(120.0, 80.0));
                assert_eq!(shape.shape(), ShapeKind::Ellipse);
                assert_eq!(shape.rotation().degrees(), 270.0);
            }
            MarkerGeometry::Arrow(_) => panic!("expected shape marker"),
        }
    }

    #[test]
    fn negative_size_is_rejected_on_load() {
        let source = r##"
            label = "bad"
            color = "#00ff00"
            from = 0
            to = 0
            type = "shape"
            position = [0.0, 0.0]
            size = [-1.0, 30.0]
            shape = "rectangle"
            rotation = 0.0
        "##;
        assert!(toml::from_str::<Marker>(source).is_err());
    }

    #[test]
    fn inverted_range_is_rejected_on_load() {
        let source = r##"
            label = "bad"
            color = "#00ff00"
            from = 4
            to = 1
            type = "arrow"
            start = [0.0, 0.0]
            tip = [10.0, 0.0]
        "##;
        assert!(toml::from_str::<Marker>(source).is_err());
    }
}
