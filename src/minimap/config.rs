use bevy::prelude::*;
use serde::Deserialize;

use crate::core::config::load_or_default;

use super::projection::{MapOrigin, MapProjection};

const CONFIG_PATH: &str = "config/minimap.toml";

#[derive(Debug, Clone, Deserialize, Default)]
struct RawMinimapConfig {
    #[serde(default)]
    map: RawMap,
    #[serde(default)]
    frame: RawFrame,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
enum RawOrigin {
    Center,
    Corner,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawMap {
    world_width: f32,
    world_depth: f32,
    origin: RawOrigin,
    continuous: bool,
}

impl Default for RawMap {
    fn default() -> Self {
        Self {
            world_width: 125.0,
            world_depth: 125.0,
            origin: RawOrigin::Center,
            continuous: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawFrame {
    width: f32,
    height: f32,
}

impl Default for RawFrame {
    fn default() -> Self {
        Self {
            width: 220.0,
            height: 220.0,
        }
    }
}

/// Runtime minimap tuning derived from `config/minimap.toml`.
#[derive(Resource, Debug, Clone)]
pub struct MinimapSettings {
    pub projection: MapProjection,
    /// Project every frame; when off, only [`RefreshMinimap`](super::events::RefreshMinimap) does.
    pub continuous: bool,
    /// Frame size used until the UI layout reports one.
    pub frame_size: Vec2,
}

impl MinimapSettings {
    pub fn load_or_default() -> Self {
        load_or_default::<RawMinimapConfig>(CONFIG_PATH).into()
    }
}

impl Default for MinimapSettings {
    fn default() -> Self {
        RawMinimapConfig::default().into()
    }
}

impl From<RawMinimapConfig> for MinimapSettings {
    fn from(value: RawMinimapConfig) -> Self {
        let origin = match value.map.origin {
            RawOrigin::Center => MapOrigin::Center,
            RawOrigin::Corner => MapOrigin::Corner,
        };

        Self {
            projection: MapProjection::new(
                Vec2::new(value.map.world_width, value.map.world_depth),
                origin,
            ),
            continuous: value.map.continuous,
            frame_size: Vec2::new(value.frame.width.max(1.0), value.frame.height.max(1.0)),
        }
    }
}
