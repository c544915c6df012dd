// SPDX-License-Identifier: MPL-2.0
//! `marklens` shows a stack of images indexed by time and lets the user place
//! labelled box and arrow markers on them.
//!
//! The image goes through a cached transform pipeline (tone adjustments,
//! mirror, rotation, zoom) and markers are drawn on top in their own
//! coordinate space. An interaction handler maps pointer events back into
//! that space to select, move, resize and rotate markers.

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod markers;
pub mod media;
pub mod session;
