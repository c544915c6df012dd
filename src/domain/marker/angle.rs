// SPDX-License-Identifier: MPL-2.0
//! Marker rotation angle.
//!
//! Unlike the 90° steps of the image presentation, a marker may be rotated by
//! any angle. The stored value is always normalized to `[0, 360)`.

/// Normalizes an angle in degrees into `[0, 360)`.
///
/// Non-finite input normalizes to `0`.
#[must_use]
pub fn normalize_degrees(degrees: f32) -> f32 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Marker rotation in degrees, guaranteed to lie in `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct MarkerAngle(f32);

impl MarkerAngle {
    /// No rotation.
    pub const ZERO: Self = Self(0.0);

    /// Creates a normalized angle.
    #[must_use]
    pub fn new(degrees: f32) -> Self {
        Self(normalize_degrees(degrees))
    }

    /// Returns the angle in degrees.
    #[must_use]
    pub fn degrees(self) -> f32 {
        self.0
    }

    /// Returns the angle in radians.
    #[must_use]
    pub fn radians(self) -> f32 {
        self.0.to_radians()
    }

    /// Adds `delta` degrees and re-normalizes.
    #[must_use]
    pub fn rotated_by(self, delta: f32) -> Self {
        Self::new(self.0 + delta)
    }

    /// Returns true if the angle is not zero.
    #[must_use]
    pub fn is_rotated(self) -> bool {
        self.0 != 0.0
    }
}

impl From<f32> for MarkerAngle {
    fn from(degrees: f32) -> Self {
        Self::new(degrees)
    }
}

impl From<MarkerAngle> for f32 {
    fn from(angle: MarkerAngle) -> Self {
        angle.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_integers_lands_in_range() {
        for r in -1080..=1080 {
            let n = normalize_degrees(r as f32);
            assert!((0.0..360.0).contains(&n), "{r} -> {n}");
        }
    }

    #[test]
    fn normalize_is_idempotent() {
        for r in [-720.0, -359.5, -90.0, -1e-7, 0.0, 45.0, 359.999, 360.0, 725.25] {
            let once = normalize_degrees(r);
            assert_eq!(normalize_degrees(once), once);
        }
    }

    #[test]
    fn normalize_wraps_known_values() {
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(450.0), 90.0);
        assert_eq!(normalize_degrees(f32::NAN), 0.0);
    }

    #[test]
    fn tiny_negative_never_reaches_360() {
        let n = normalize_degrees(-1e-9);
        assert!(n < 360.0);
    }

    #[test]
    fn rotated_by_renormalizes() {
        let angle = MarkerAngle::new(350.0).rotated_by(20.0);
        assert!((angle.degrees() - 10.0).abs() < 1e-4);
        let angle = MarkerAngle::ZERO.rotated_by(-1.0);
        assert_eq!(angle.degrees(), 359.0);
    }

    #[test]
    fn radians_conversion() {
        use std::f32::consts::PI;
        assert!((MarkerAngle::new(180.0).radians() - PI).abs() < 1e-5);
        assert!(!MarkerAngle::ZERO.is_rotated());
        assert!(MarkerAngle::new(90.0).is_rotated());
    }
}
