//! Pickup components and the running tally of collected items.
use bevy::prelude::*;

use crate::{
    minimap::components::MarkerDisposal,
    physics::{components::ALL_LAYERS, OverlapBuffer, SpatialQuery},
};

use super::config::CollectorSettings;

/// Smallest pickup radius accepted (world units).
pub const MIN_PICKUP_RADIUS: f32 = 0.1;
/// Largest overlap buffer accepted.
pub const MAX_BUFFER_CAPACITY: usize = 256;

/// Tag required on a collider when the collector filters by tag.
#[derive(Component, Debug, Default)]
pub struct Collectible;

/// Which counter a picked-up item feeds. Unknown categories count for nothing.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickupCategory(pub u8);

impl PickupCategory {
    pub const REGOLITH: Self = Self(1);
    pub const ICE: Self = Self(2);

    pub fn slot(self) -> Option<CounterSlot> {
        match self.0 {
            1 => Some(CounterSlot::First),
            2 => Some(CounterSlot::Second),
            _ => None,
        }
    }
}

/// The two HUD counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterSlot {
    First,
    Second,
}

/// Text showing one counter of the [`CollectionTally`].
#[derive(Component, Debug, Clone, Copy)]
pub struct CounterText(pub CounterSlot);

/// Picks up everything within `radius` when the collect key is pressed.
#[derive(Component, Debug, Clone)]
pub struct ProximityCollector {
    radius: f32,
    buffer: OverlapBuffer,
    pub use_tag_filter: bool,
    pub layer_mask: u32,
    /// Ask the minimap to drop markers of collected items.
    pub notify_minimap: bool,
    pub disposal: MarkerDisposal,
}

impl ProximityCollector {
    pub fn new(radius: f32, buffer_capacity: usize) -> Self {
        Self {
            radius: radius.max(MIN_PICKUP_RADIUS),
            buffer: OverlapBuffer::with_capacity(buffer_capacity.clamp(1, MAX_BUFFER_CAPACITY)),
            use_tag_filter: true,
            layer_mask: ALL_LAYERS,
            notify_minimap: true,
            disposal: MarkerDisposal::Despawn,
        }
    }

    pub fn from_settings(settings: &CollectorSettings) -> Self {
        Self {
            use_tag_filter: settings.use_tag_filter,
            layer_mask: settings.layer_mask,
            notify_minimap: settings.notify_minimap,
            disposal: settings.marker_disposal,
            ..Self::new(settings.radius, settings.buffer_capacity)
        }
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius.max(MIN_PICKUP_RADIUS);
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn buffer_capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Clamps to `1..=256`; the buffer is only reallocated when the value changes.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn set_buffer_capacity(&mut self, capacity: usize) {
        self.buffer.resize(capacity.clamp(1, MAX_BUFFER_CAPACITY));
    }

    /// Runs the overlap query around `center` and returns the colliders found.
    pub fn gather(&mut self, center: Vec3, spatial: &SpatialQuery) -> &[Entity] {
        spatial.overlap_sphere(center, self.radius, self.layer_mask, &mut self.buffer);
        self.buffer.hits()
    }
}

/// Items collected so far, per counter.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CollectionTally {
    first: u32,
    second: u32,
}

impl CollectionTally {
    pub fn count(&self, slot: CounterSlot) -> u32 {
        match slot {
            CounterSlot::First => self.first,
            CounterSlot::Second => self.second,
        }
    }

    pub fn record(&mut self, slot: CounterSlot) {
        match slot {
            CounterSlot::First => self.first += 1,
            CounterSlot::Second => self.second += 1,
        }
    }
}
