use bevy::prelude::*;
use serde::Deserialize;

use crate::core::config::load_or_default;

const CONFIG_PATH: &str = "config/camera.toml";

/// Steepest pitch the orbit may reach; `look_at` degenerates at the poles.
const PITCH_LIMIT_DEGREES: f32 = 89.0;

#[derive(Debug, Clone, Deserialize, Default)]
struct RawCameraConfig {
    #[serde(default)]
    orbit: RawOrbitSection,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
enum RawOrbitMode {
    Keys,
    Pointer,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawOrbitSection {
    mode: RawOrbitMode,
    key_rotate_speed_degrees: f32,
    pointer_sensitivity_degrees: f32,
    require_pointer_button: bool,
    min_pitch_degrees: f32,
    max_pitch_degrees: f32,
    smoothing_time: f32,
    default_distance: f32,
    default_height: f32,
}

impl Default for RawOrbitSection {
    fn default() -> Self {
        Self {
            mode: RawOrbitMode::Pointer,
            key_rotate_speed_degrees: 90.0,
            pointer_sensitivity_degrees: 0.15,
            require_pointer_button: true,
            min_pitch_degrees: -10.0,
            max_pitch_degrees: 70.0,
            smoothing_time: 0.08,
            default_distance: 5.0,
            default_height: 2.0,
        }
    }
}

/// How the orbit is driven.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrbitInput {
    /// Left/Right arrows turn the yaw at a constant rate (radians per second).
    Keys { rotate_speed: f32 },
    /// Mouse motion drives yaw and pitch (radians per pixel).
    Pointer {
        sensitivity: f32,
        require_button: bool,
    },
}

/// Runtime camera tuning derived from `config/camera.toml`. Angles are in radians.
#[derive(Resource, Debug, Clone)]
pub struct CameraSettings {
    pub input: OrbitInput,
    pub min_pitch: f32,
    pub max_pitch: f32,
    pub smoothing_time: f32,
    pub default_distance: f32,
    pub default_height: f32,
}

impl CameraSettings {
    pub fn load_or_default() -> Self {
        load_or_default::<RawCameraConfig>(CONFIG_PATH).into()
    }
}

impl Default for CameraSettings {
    fn default() -> Self {
        RawCameraConfig::default().into()
    }
}

impl From<RawCameraConfig> for CameraSettings {
    fn from(value: RawCameraConfig) -> Self {
        let orbit = value.orbit;

        let input = match orbit.mode {
            RawOrbitMode::Keys => OrbitInput::Keys {
                rotate_speed: orbit.key_rotate_speed_degrees.max(0.0).to_radians(),
            },
            RawOrbitMode::Pointer => OrbitInput::Pointer {
                sensitivity: orbit.pointer_sensitivity_degrees.max(0.0).to_radians(),
                require_button: orbit.require_pointer_button,
            },
        };

        let min_pitch = orbit
            .min_pitch_degrees
            .clamp(-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES);
        let max_pitch = orbit
            .max_pitch_degrees
            .clamp(-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES)
            .max(min_pitch);

        Self {
            input,
            min_pitch: min_pitch.to_radians(),
            max_pitch: max_pitch.to_radians(),
            smoothing_time: orbit.smoothing_time.max(0.0),
            default_distance: orbit.default_distance.max(0.5),
            default_height: orbit.default_height,
        }
    }
}
