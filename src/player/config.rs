use bevy::prelude::*;
use serde::Deserialize;

use crate::core::config::load_or_default;

use super::components::{GroundSnap, SlopeLimit};

const CONFIG_PATH: &str = "config/movement.toml";

#[derive(Debug, Clone, Deserialize, Default)]
struct RawMovementConfig {
    #[serde(default)]
    speed: RawSpeed,
    #[serde(default)]
    direction: RawDirection,
    #[serde(default)]
    slope: RawSlope,
    #[serde(default)]
    ground_snap: RawGroundSnap,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawSpeed {
    current: f32,
    max: f32,
    step: f32,
}

impl Default for RawSpeed {
    fn default() -> Self {
        Self {
            current: 3.0,
            max: 12.0,
            step: 1.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawDirection {
    camera_relative: bool,
}

impl Default for RawDirection {
    fn default() -> Self {
        Self {
            camera_relative: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawSlope {
    enabled: bool,
    max_angle_degrees: f32,
    probe_forward: f32,
    probe_height: f32,
    probe_distance: f32,
}

impl Default for RawSlope {
    fn default() -> Self {
        Self {
            enabled: true,
            max_angle_degrees: 35.0,
            probe_forward: 0.6,
            probe_height: 0.5,
            probe_distance: 1.5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawGroundSnap {
    enabled: bool,
    probe_distance: f32,
    offset: f32,
    rise_speed: f32,
}

impl Default for RawGroundSnap {
    fn default() -> Self {
        Self {
            enabled: true,
            probe_distance: 2.0,
            offset: 0.9,
            rise_speed: 6.0,
        }
    }
}

/// Runtime movement tuning derived from `config/movement.toml`.
#[derive(Resource, Debug, Clone)]
pub struct MovementSettings {
    pub current_speed: f32,
    pub max_speed: f32,
    pub speed_step: f32,
    pub camera_relative: bool,
    pub slope: Option<SlopeLimit>,
    pub ground_snap: Option<GroundSnap>,
}

impl MovementSettings {
    pub fn load_or_default() -> Self {
        load_or_default::<RawMovementConfig>(CONFIG_PATH).into()
    }
}

impl Default for MovementSettings {
    fn default() -> Self {
        RawMovementConfig::default().into()
    }
}

impl From<RawMovementConfig> for MovementSettings {
    fn from(value: RawMovementConfig) -> Self {
        let max_speed = value.speed.max.max(0.0);

        let slope = value.slope.enabled.then(|| SlopeLimit {
            max_angle_degrees: value.slope.max_angle_degrees.clamp(0.0, 90.0),
            probe_forward: value.slope.probe_forward.max(0.0),
            probe_height: value.slope.probe_height.max(0.0),
            probe_distance: value.slope.probe_distance.max(0.01),
        });

        let ground_snap = value.ground_snap.enabled.then(|| GroundSnap {
            probe_distance: value.ground_snap.probe_distance.max(0.0),
            offset: value.ground_snap.offset.max(0.0),
            rise_speed: value.ground_snap.rise_speed.max(0.0),
        });

        Self {
            current_speed: value.speed.current.clamp(0.0, max_speed),
            max_speed,
            speed_step: value.speed.step.max(0.0),
            camera_relative: value.direction.camera_relative,
            slope,
            ground_snap,
        }
    }
}
