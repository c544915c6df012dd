// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core value objects with no external crate dependencies.
//!
//! # Modules
//!
//! - [`editing`]: Image adjustment types ([`ZoomPercent`](editing::ZoomPercent),
//!   [`AdjustmentPercent`](editing::AdjustmentPercent))
//! - [`marker`]: Marker algebra ([`DragPoint`](marker::DragPoint),
//!   [`MarkerAngle`](marker::MarkerAngle))

pub mod editing;
pub mod marker;
