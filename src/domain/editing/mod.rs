// SPDX-License-Identifier: MPL-2.0
//! Editing domain types.
//!
//! This module provides pure domain types for image adjustments:
//! - [`ZoomPercent`]: Zoom percentage selecting the centered zoom rectangle
//! - [`AdjustmentPercent`]: Brightness/contrast adjustment value

pub mod newtypes;

pub use newtypes::{AdjustmentPercent, ZoomPercent};
