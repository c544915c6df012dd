// SPDX-License-Identifier: MPL-2.0
//! Editing newtypes.
//!
//! This module provides type-safe wrappers for image adjustment values,
//! ensuring they are always within valid ranges.

use crate::config::defaults;

// =============================================================================
// Zoom Bounds
// =============================================================================

/// Zoom percentage bounds (10% to 800%).
pub mod zoom_bounds {
    use super::defaults;

    /// Minimum zoom percentage.
    pub const MIN: f32 = defaults::MIN_ZOOM_PERCENT;
    /// Maximum zoom percentage.
    pub const MAX: f32 = defaults::MAX_ZOOM_PERCENT;
    /// Default zoom percentage.
    pub const DEFAULT: f32 = defaults::DEFAULT_ZOOM_PERCENT;
}

// =============================================================================
// ZoomPercent
// =============================================================================

/// Zoom percentage, guaranteed to be within valid range (10%–800%).
///
/// The zoom selects a centered rectangle of the source image sized
/// `source · zoom%`; the source is scaled into that rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomPercent(f32);

impl ZoomPercent {
    /// Creates a new zoom percentage, clamping the value to the valid range.
    ///
    /// Non-finite input falls back to the default zoom.
    #[must_use]
    pub fn new(percent: f32) -> Self {
        if !percent.is_finite() {
            return Self::default();
        }
        Self(percent.clamp(zoom_bounds::MIN, zoom_bounds::MAX))
    }

    /// Returns the raw percentage value.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns the zoom as a multiplier (e.g., 100% → 1.0).
    #[must_use]
    pub fn as_factor(self) -> f32 {
        self.0 / 100.0
    }

    /// Increases zoom by the given step.
    #[must_use]
    pub fn zoom_in(self, step: f32) -> Self {
        Self::new(self.0 + step)
    }

    /// Decreases zoom by the given step.
    #[must_use]
    pub fn zoom_out(self, step: f32) -> Self {
        Self::new(self.0 - step)
    }

    /// Returns whether the zoom is at the minimum value.
    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= zoom_bounds::MIN
    }

    /// Returns whether the zoom is at the maximum value.
    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= zoom_bounds::MAX
    }
}

impl Default for ZoomPercent {
    fn default() -> Self {
        Self(zoom_bounds::DEFAULT)
    }
}

// =============================================================================
// Adjustment Bounds
// =============================================================================

/// Adjustment bounds (-100 to +100).
pub mod adjustment_bounds {
    use super::defaults;

    /// Minimum adjustment value.
    pub const MIN: i32 = defaults::MIN_ADJUSTMENT;
    /// Maximum adjustment value.
    pub const MAX: i32 = defaults::MAX_ADJUSTMENT;
    /// Default (neutral) adjustment value.
    pub const DEFAULT: i32 = defaults::DEFAULT_ADJUSTMENT;
}

// =============================================================================
// AdjustmentPercent
// =============================================================================

/// Adjustment percentage for brightness/contrast, guaranteed to be within valid range (-100 to +100).
///
/// A value of 0 means no adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdjustmentPercent(i32);

impl AdjustmentPercent {
    /// Creates a new adjustment value, clamping to the valid range.
    #[must_use]
    pub fn new(value: i32) -> Self {
        Self(value.clamp(adjustment_bounds::MIN, adjustment_bounds::MAX))
    }

    /// Returns the raw value.
    #[must_use]
    pub fn value(self) -> i32 {
        self.0
    }

    /// Returns whether this represents no adjustment (value is 0).
    #[must_use]
    pub fn is_neutral(self) -> bool {
        self.0 == adjustment_bounds::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // ZoomPercent tests
    // -------------------------------------------------------------------------

    #[test]
    fn zoom_percent_clamps() {
        assert_eq!(ZoomPercent::new(1.0).value(), zoom_bounds::MIN);
        assert_eq!(ZoomPercent::new(5000.0).value(), zoom_bounds::MAX);
        assert_eq!(ZoomPercent::new(200.0).value(), 200.0);
    }

    #[test]
    fn zoom_percent_rejects_non_finite() {
        assert_eq!(ZoomPercent::new(f32::NAN), ZoomPercent::default());
        assert_eq!(ZoomPercent::new(f32::INFINITY), ZoomPercent::default());
    }

    #[test]
    fn zoom_percent_factor() {
        assert!((ZoomPercent::new(10.0).as_factor() - 0.1).abs() < f32::EPSILON);
        assert!((ZoomPercent::new(200.0).as_factor() - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn zoom_percent_steps_stay_in_range() {
        let zoom = ZoomPercent::new(zoom_bounds::MAX).zoom_in(50.0);
        assert!(zoom.is_max());
        let zoom = ZoomPercent::new(zoom_bounds::MIN).zoom_out(50.0);
        assert!(zoom.is_min());
    }

    // -------------------------------------------------------------------------
    // AdjustmentPercent tests
    // -------------------------------------------------------------------------

    #[test]
    fn adjustment_percent_clamps() {
        assert_eq!(AdjustmentPercent::new(150).value(), adjustment_bounds::MAX);
        assert_eq!(AdjustmentPercent::new(-150).value(), adjustment_bounds::MIN);
        assert_eq!(AdjustmentPercent::new(50).value(), 50);
    }

    #[test]
    fn adjustment_percent_default_is_neutral() {
        assert!(AdjustmentPercent::default().is_neutral());
        assert!(!AdjustmentPercent::new(50).is_neutral());
    }
}
