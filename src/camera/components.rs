//! Orbit camera state: yaw/pitch around a followed entity at a fixed radius.
use bevy::prelude::*;

use super::config::{CameraSettings, OrbitInput};

/// Offsets shorter than this are treated as "camera sits on the target".
pub const MIN_ORBIT_OFFSET: f32 = 0.1;

/// Camera that circles a target entity and always looks at it.
#[derive(Component, Debug, Clone)]
pub struct OrbitCamera {
    target: Option<Entity>,
    pub input: OrbitInput,
    pub min_pitch: f32,
    pub max_pitch: f32,
    /// Time constant of the exponential smoothing; 0 snaps instantly.
    pub smoothing_time: f32,
    pub default_distance: f32,
    pub default_height: f32,
    yaw: f32,
    pitch: f32,
    target_yaw: f32,
    target_pitch: f32,
    radius: f32,
    initialized: bool,
}

impl OrbitCamera {
    pub fn from_settings(target: Option<Entity>, settings: &CameraSettings) -> Self {
        Self {
            target,
            input: settings.input,
            min_pitch: settings.min_pitch,
            max_pitch: settings.max_pitch,
            smoothing_time: settings.smoothing_time,
            default_distance: settings.default_distance,
            default_height: settings.default_height,
            yaw: 0.0,
            pitch: 0.0,
            target_yaw: 0.0,
            target_pitch: 0.0,
            radius: settings.default_distance,
            initialized: false,
        }
    }

    pub fn target(&self) -> Option<Entity> {
        self.target
    }

    /// Follows a different entity; the orbit is rebuilt from the new offset next frame.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn retarget(&mut self, target: Option<Entity>) {
        debug!("Orbit camera retargeted to {:?}", target);
        self.target = target;
        self.initialized = false;
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Adopts `offset` (camera minus target) as the current orbit.
    pub fn initialize(&mut self, offset: Vec3) {
        self.set_from_offset(offset);
        self.target_yaw = self.yaw;
        self.target_pitch = self.pitch;
        self.initialized = true;
    }

    fn set_from_offset(&mut self, offset: Vec3) {
        let radius = offset.length();
        if radius < MIN_ORBIT_OFFSET {
            return;
        }
        self.radius = radius;
        self.yaw = offset.x.atan2(offset.z);
        self.pitch = (offset.y / radius).clamp(-1.0, 1.0).asin();
    }

    /// Turns the orbit about the up axis, keeping pitch.
    ///
    /// The radius is re-derived from the rotated offset.
    pub fn rotate_yaw(&mut self, delta: f32) {
        let rotated = Quat::from_rotation_y(delta) * self.offset();
        self.set_from_offset(rotated);
        self.target_yaw = self.yaw;
        self.target_pitch = self.pitch;
    }

    /// Pushes the look targets by a pointer delta; pitch stays inside the limits.
    pub fn apply_pointer_delta(&mut self, delta: Vec2, sensitivity: f32) {
        self.target_yaw -= delta.x * sensitivity;
        self.target_pitch =
            (self.target_pitch + delta.y * sensitivity).clamp(self.min_pitch, self.max_pitch);
    }

    /// Moves yaw/pitch toward their targets.
    pub fn smooth(&mut self, delta_secs: f32) {
        let blend = if self.smoothing_time <= 0.0 {
            1.0
        } else {
            1.0 - (-delta_secs.max(0.0) / self.smoothing_time).exp()
        };
        self.yaw += (self.target_yaw - self.yaw) * blend;
        self.pitch += (self.target_pitch - self.pitch) * blend;
    }

    /// Camera position relative to the target for the current yaw/pitch/radius.
    pub fn offset(&self) -> Vec3 {
        Quat::from_euler(EulerRot::YXZ, self.yaw, -self.pitch, 0.0) * (Vec3::Z * self.radius)
    }

    /// Camera pose looking at `focus`.
    pub fn pose(&self, focus: Vec3) -> Transform {
        Transform::from_translation(focus + self.offset()).looking_at(focus, Vec3::Y)
    }
}

/// Picks the starting offset of the orbit.
///
/// Keeps the authored camera placement unless the camera sits on the target, in
/// which case it is moved behind the target's facing and raised.
pub fn resolve_initial_offset(
    camera: &Transform,
    target: &Transform,
    default_distance: f32,
    default_height: f32,
) -> Vec3 {
    let offset = camera.translation - target.translation;
    if offset.length() >= MIN_ORBIT_OFFSET {
        return offset;
    }

    let flatten = |v: Vec3| Vec3::new(v.x, 0.0, v.z).normalize_or_zero();
    let mut facing = flatten(target.forward().as_vec3());
    if facing == Vec3::ZERO {
        facing = flatten(camera.forward().as_vec3());
    }
    if facing == Vec3::ZERO {
        facing = Vec3::NEG_Z;
    }

    -facing * default_distance + Vec3::Y * default_height
}
