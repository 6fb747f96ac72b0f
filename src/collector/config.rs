use bevy::prelude::*;
use serde::Deserialize;

use crate::{
    core::config::load_or_default,
    minimap::components::MarkerDisposal,
    physics::components::ALL_LAYERS,
};

use super::components::{CounterSlot, MAX_BUFFER_CAPACITY, MIN_PICKUP_RADIUS};

const CONFIG_PATH: &str = "config/collector.toml";

#[derive(Debug, Clone, Deserialize, Default)]
struct RawCollectorConfig {
    #[serde(default)]
    pickup: RawPickup,
    #[serde(default)]
    minimap: RawMinimapLink,
    #[serde(default)]
    counters: RawCounters,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawPickup {
    radius: f32,
    buffer_capacity: usize,
    use_tag_filter: bool,
    layer_mask: Option<u32>,
}

impl Default for RawPickup {
    fn default() -> Self {
        Self {
            radius: 3.0,
            buffer_capacity: 32,
            use_tag_filter: true,
            layer_mask: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawMinimapLink {
    notify: bool,
    marker_disposal: MarkerDisposal,
}

impl Default for RawMinimapLink {
    fn default() -> Self {
        Self {
            notify: true,
            marker_disposal: MarkerDisposal::Despawn,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawCounters {
    first_label: String,
    second_label: String,
}

impl Default for RawCounters {
    fn default() -> Self {
        Self {
            first_label: "Regolith".to_string(),
            second_label: "Ice".to_string(),
        }
    }
}

/// Runtime pickup tuning derived from `config/collector.toml`.
#[derive(Resource, Debug, Clone)]
pub struct CollectorSettings {
    pub radius: f32,
    pub buffer_capacity: usize,
    pub use_tag_filter: bool,
    pub layer_mask: u32,
    pub notify_minimap: bool,
    pub marker_disposal: MarkerDisposal,
    pub first_label: String,
    pub second_label: String,
}

impl CollectorSettings {
    pub fn load_or_default() -> Self {
        load_or_default::<RawCollectorConfig>(CONFIG_PATH).into()
    }

    pub fn label(&self, slot: CounterSlot) -> &str {
        match slot {
            CounterSlot::First => &self.first_label,
            CounterSlot::Second => &self.second_label,
        }
    }
}

impl Default for CollectorSettings {
    fn default() -> Self {
        RawCollectorConfig::default().into()
    }
}

impl From<RawCollectorConfig> for CollectorSettings {
    fn from(value: RawCollectorConfig) -> Self {
        Self {
            radius: value.pickup.radius.max(MIN_PICKUP_RADIUS),
            buffer_capacity: value.pickup.buffer_capacity.clamp(1, MAX_BUFFER_CAPACITY),
            use_tag_filter: value.pickup.use_tag_filter,
            layer_mask: value.pickup.layer_mask.unwrap_or(ALL_LAYERS),
            notify_minimap: value.minimap.notify,
            marker_disposal: value.minimap.marker_disposal,
            first_label: value.counters.first_label,
            second_label: value.counters.second_label,
        }
    }
}
