// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Zoom**: Zoom percentage and step bounds
//! - **Adjustments**: Brightness/contrast bounds
//! - **Markers**: Stroke width, handle offsets and default marker geometry
//! - **Pointer**: Double-click timing

// ==========================================================================
// Zoom Defaults
// ==========================================================================

/// Default zoom level when opening an image (100% = original size).
pub const DEFAULT_ZOOM_PERCENT: f32 = 100.0;

/// Minimum allowed zoom percentage.
pub const MIN_ZOOM_PERCENT: f32 = 10.0;

/// Maximum allowed zoom percentage.
pub const MAX_ZOOM_PERCENT: f32 = 800.0;

/// Default zoom step for zoom in/out operations.
pub const DEFAULT_ZOOM_STEP_PERCENT: f32 = 10.0;

// ==========================================================================
// Adjustment Defaults
// ==========================================================================

/// Minimum brightness/contrast value.
pub const MIN_ADJUSTMENT: i32 = -100;

/// Maximum brightness/contrast value.
pub const MAX_ADJUSTMENT: i32 = 100;

/// Neutral brightness/contrast value.
pub const DEFAULT_ADJUSTMENT: i32 = 0;

// ==========================================================================
// Marker Defaults
// ==========================================================================

/// Stroke width of every marker, also used as the hit-test tolerance.
pub const MARKER_LINE_WIDTH: f32 = 3.0;

/// Distance of the rotate handle beyond the top edge of a box marker.
pub const ROTATE_HANDLE_OFFSET: f32 = 100.0;

/// Divisor applied to the horizontal pointer offset while rotating.
pub const ROTATE_DELTA_DIVISOR: f32 = 100.0;

/// Length of each arrow head stroke.
pub const ARROW_HEAD_LENGTH: f32 = 15.0;

/// Default label font size in marker-space units.
pub const DEFAULT_LABEL_FONT_SIZE: f32 = 14.0;

/// Default width of a newly added box marker.
pub const DEFAULT_MARKER_WIDTH: f32 = 100.0;

/// Default height of a newly added box marker.
pub const DEFAULT_MARKER_HEIGHT: f32 = 100.0;

/// Default label of a newly added marker.
pub const DEFAULT_MARKER_LABEL: &str = "Marker";

/// Default marker color as `#rrggbb`.
pub const DEFAULT_MARKER_COLOR: &str = "#ff0000";

// ==========================================================================
// Pointer Defaults
// ==========================================================================

/// Maximum delay between two presses counted as a double click.
pub const DOUBLE_CLICK_MILLIS: u64 = 350;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_ZOOM_PERCENT > 0.0);
    assert!(MIN_ZOOM_PERCENT <= DEFAULT_ZOOM_PERCENT);
    assert!(DEFAULT_ZOOM_PERCENT <= MAX_ZOOM_PERCENT);
    assert!(MIN_ADJUSTMENT < DEFAULT_ADJUSTMENT);
    assert!(DEFAULT_ADJUSTMENT < MAX_ADJUSTMENT);
    assert!(MARKER_LINE_WIDTH > 0.0);
    assert!(ROTATE_DELTA_DIVISOR > 0.0);
    assert!(DEFAULT_MARKER_WIDTH >= 0.0);
    assert!(DEFAULT_MARKER_HEIGHT >= 0.0);
    assert!(DOUBLE_CLICK_MILLIS > 0);
};
