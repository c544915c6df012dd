// SPDX-License-Identifier: MPL-2.0
//! Ordered marker store.
//!
//! Insertion order is the draw and hit-test order; nothing here ever reorders.

use super::{Marker, MarkerDefaults, MarkerId, VisibilityRange};
use tiny_skia::Point;

/// Read/write access to markers, as consumed by the pipeline and the
/// interaction handler.
pub trait MarkerSource {
    /// Markers visible at `time_index`, in collection order.
    fn markers_for_image(&self, time_index: usize) -> Vec<&Marker>;

    fn marker(&self, id: MarkerId) -> Option<&Marker>;

    fn marker_mut(&mut self, id: MarkerId) -> Option<&mut Marker>;
}

#[derive(Debug, Clone, Default)]
pub struct MarkerCollection {
    markers: Vec<Marker>,
    next_id: u64,
}

impl MarkerCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of `marker`, assigning it a fresh id.
    pub fn add(&mut self, mut marker: Marker) -> MarkerId {
        let id = MarkerId(self.next_id);
        self.next_id += 1;
        marker.id = id;
        self.markers.push(marker);
        id
    }

    /// Adds a box marker built from `defaults`.
    pub fn add_default(
        &mut self,
        range: VisibilityRange,
        center: Point,
        defaults: &MarkerDefaults,
    ) -> MarkerId {
        self.add(Marker::with_defaults(defaults, range, center))
    }

    pub fn remove(&mut self, id: MarkerId) -> Option<Marker> {
        let index = self.markers.iter().position(|marker| marker.id == id)?;
        Some(self.markers.remove(index))
    }

    #[must_use]
    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.iter().find(|marker| marker.id == id)
    }

    pub fn get_mut(&mut self, id: MarkerId) -> Option<&mut Marker> {
        self.markers.iter_mut().find(|marker| marker.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

impl MarkerSource for MarkerCollection {
    fn markers_for_image(&self, time_index: usize) -> Vec<&Marker> {
        self.markers
            .iter()
            .filter(|marker| marker.is_visible_at(time_index))
            .collect()
    }

    fn marker(&self, id: MarkerId) -> Option<&Marker> {
        self.get(id)
    }

    fn marker_mut(&mut self, id: MarkerId) -> Option<&mut Marker> {
        self.get_mut(id)
    }
}

impl FromIterator<Marker> for MarkerCollection {
    fn from_iter<I: IntoIterator<Item = Marker>>(iter: I) -> Self {
        let mut collection = Self::new();
        for marker in iter {
            collection.add(marker);
        }
        collection
    }
}
