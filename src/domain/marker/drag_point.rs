// SPDX-License-Identifier: MPL-2.0
//! The eight resize handles of a marker's bounding box.
//!
//! Ordinals follow the scan order used to enumerate handle positions: outer
//! axis x ∈ {0, 1, 2}, inner axis y ∈ {0, 1, 2}, skipping the center. Each
//! handle carries the signed contribution a drag at that handle has on the
//! box width and height.

/// One of the eight handle positions on a bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragPoint {
    TopLeft,
    MiddleLeft,
    BottomLeft,
    TopCenter,
    BottomCenter,
    TopRight,
    MiddleRight,
    BottomRight,
}

/// `(x_sign, y_sign)` per ordinal.
const SIGNS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

impl DragPoint {
    /// All handles in ordinal order.
    pub const ALL: [DragPoint; 8] = [
        DragPoint::TopLeft,
        DragPoint::MiddleLeft,
        DragPoint::BottomLeft,
        DragPoint::TopCenter,
        DragPoint::BottomCenter,
        DragPoint::TopRight,
        DragPoint::MiddleRight,
        DragPoint::BottomRight,
    ];

    /// Position of this handle in [`DragPoint::ALL`] and in a box marker's scale points.
    #[must_use]
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Looks up a handle by ordinal.
    #[must_use]
    pub fn from_ordinal(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Looks up a handle by its sign pair. `(0, 0)` is not a handle.
    #[must_use]
    pub fn from_signs(x_sign: i8, y_sign: i8) -> Option<Self> {
        SIGNS
            .iter()
            .position(|&signs| signs == (x_sign, y_sign))
            .and_then(Self::from_ordinal)
    }

    /// Horizontal resize contribution: -1 on the left edge, +1 on the right, 0 centered.
    #[must_use]
    pub fn x_sign(self) -> i8 {
        SIGNS[self.ordinal()].0
    }

    /// Vertical resize contribution: -1 on the top edge, +1 on the bottom, 0 centered.
    #[must_use]
    pub fn y_sign(self) -> i8 {
        SIGNS[self.ordinal()].1
    }

    /// Point reflection through the box center.
    #[must_use]
    pub fn opposite(self) -> Self {
        self.reflect(-1, -1)
    }

    /// Reflection across the horizontal center line (swaps top and bottom).
    #[must_use]
    pub fn mirror_across_x(self) -> Self {
        self.reflect(1, -1)
    }

    /// Reflection across the vertical center line (swaps left and right).
    #[must_use]
    pub fn mirror_across_y(self) -> Self {
        self.reflect(-1, 1)
    }

    /// Mid-edge handle on the left or right edge.
    #[must_use]
    pub fn is_middle(self) -> bool {
        self.y_sign() == 0
    }

    /// Mid-edge handle on the top or bottom edge.
    #[must_use]
    pub fn is_center(self) -> bool {
        self.x_sign() == 0
    }

    /// Corner handle.
    #[must_use]
    pub fn is_corner(self) -> bool {
        !self.is_middle() && !self.is_center()
    }

    fn reflect(self, fx: i8, fy: i8) -> Self {
        let (x, y) = SIGNS[self.ordinal()];
        match Self::from_signs(x * fx, y * fy) {
            Some(point) => point,
            // Reflections keep a non-zero sign non-zero, so the pair always maps to a handle.
            None => unreachable!("reflection of a handle is always a handle"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_an_involution() {
        for point in DragPoint::ALL {
            assert_eq!(point.opposite().opposite(), point);
            assert_ne!(point.opposite(), point);
        }
    }

    #[test]
    fn mirrors_are_involutions() {
        for point in DragPoint::ALL {
            assert_eq!(point.mirror_across_x().mirror_across_x(), point);
            assert_eq!(point.mirror_across_y().mirror_across_y(), point);
        }
    }

    #[test]
    fn mirror_is_identity_on_the_mirror_line() {
        assert_eq!(DragPoint::MiddleLeft.mirror_across_x(), DragPoint::MiddleLeft);
        assert_eq!(DragPoint::MiddleRight.mirror_across_x(), DragPoint::MiddleRight);
        assert_eq!(DragPoint::TopCenter.mirror_across_y(), DragPoint::TopCenter);
        assert_eq!(DragPoint::BottomCenter.mirror_across_y(), DragPoint::BottomCenter);
    }

    #[test]
    fn mirror_swaps_edges() {
        assert_eq!(DragPoint::TopLeft.mirror_across_x(), DragPoint::BottomLeft);
        assert_eq!(DragPoint::TopLeft.mirror_across_y(), DragPoint::TopRight);
        assert_eq!(DragPoint::BottomRight.opposite(), DragPoint::TopLeft);
        assert_eq!(DragPoint::TopCenter.opposite(), DragPoint::BottomCenter);
    }

    #[test]
    fn composed_mirrors_equal_opposite() {
        for point in DragPoint::ALL {
            assert_eq!(point.mirror_across_x().mirror_across_y(), point.opposite());
        }
    }

    #[test]
    fn mid_edges_have_one_nonzero_sign_and_corners_two() {
        for point in DragPoint::ALL {
            let nonzero = [point.x_sign(), point.y_sign()]
                .iter()
                .filter(|s| **s != 0)
                .count();
            if point.is_corner() {
                assert_eq!(nonzero, 2, "{point:?}");
            } else {
                assert!(point.is_middle() ^ point.is_center(), "{point:?}");
                assert_eq!(nonzero, 1, "{point:?}");
            }
        }
    }

    #[test]
    fn ordinals_follow_scan_order() {
        let mut expected = Vec::new();
        for x in 0..3i8 {
            for y in 0..3i8 {
                if x == 1 && y == 1 {
                    continue;
                }
                expected.push((x - 1, y - 1));
            }
        }
        let actual: Vec<_> = DragPoint::ALL
            .iter()
            .map(|p| (p.x_sign(), p.y_sign()))
            .collect();
        assert_eq!(actual, expected);
        for (index, point) in DragPoint::ALL.iter().enumerate() {
            assert_eq!(point.ordinal(), index);
            assert_eq!(DragPoint::from_ordinal(index), Some(*point));
        }
    }

    #[test]
    fn center_signs_are_not_a_handle() {
        assert_eq!(DragPoint::from_signs(0, 0), None);
        assert_eq!(DragPoint::from_ordinal(8), None);
    }
}
