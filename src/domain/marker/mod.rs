// SPDX-License-Identifier: MPL-2.0
//! Marker domain types.
//!
//! - [`DragPoint`]: the closed algebra of the eight resize handles
//! - [`MarkerAngle`]: marker rotation normalized to `[0, 360)`

pub mod angle;
pub mod drag_point;

pub use angle::{normalize_degrees, MarkerAngle};
pub use drag_point::DragPoint;
