//! Pure movement math: input vector, direction basis, slope gate, and ground snap.
use bevy::prelude::*;

use crate::physics::RayCaster;

use super::components::{GroundSnap, PlayerMover, SlopeLimit};

/// Axes the 2D input vector is expressed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveBasis {
    /// `x` is world +X, `y` is world forward (-Z).
    World,
    /// Camera forward and right, flattened onto the horizontal plane.
    Camera { forward: Vec3, right: Vec3 },
}

impl MoveBasis {
    pub fn from_camera(camera: &Transform) -> Self {
        let forward = camera.forward().as_vec3();
        let right = camera.right().as_vec3();
        Self::Camera {
            forward: Vec3::new(forward.x, 0.0, forward.z).normalize_or_zero(),
            right: Vec3::new(right.x, 0.0, right.z).normalize_or_zero(),
        }
    }
}

/// Reads WASD into a vector that is either zero or unit length.
pub fn read_move_input(keyboard: &ButtonInput<KeyCode>) -> Vec2 {
    let mut input = Vec2::ZERO;
    if keyboard.pressed(KeyCode::KeyA) {
        input.x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        input.x += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        input.y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyW) {
        input.y += 1.0;
    }

    if input.length_squared() > 1.0 {
        input.normalize()
    } else {
        input
    }
}

/// Converts the input vector into a normalized horizontal direction.
pub fn movement_direction(input: Vec2, basis: MoveBasis) -> Option<Vec3> {
    if input.length_squared() <= 0.0 {
        return None;
    }

    let direction = match basis {
        MoveBasis::World => Vec3::new(input.x, 0.0, -input.y),
        MoveBasis::Camera { forward, right } => forward * input.y + right * input.x,
    };

    direction.try_normalize()
}

/// Speed multiplier for a slope of `angle_degrees`.
///
/// Steeper than the limit is rejected outright; otherwise the multiplier
/// falls linearly from 1 on flat ground to 0 exactly at the limit.
pub fn slope_multiplier(angle_degrees: f32, max_angle_degrees: f32) -> Option<f32> {
    if angle_degrees > max_angle_degrees {
        return None;
    }
    if max_angle_degrees <= 0.0 {
        return Some(1.0);
    }
    Some(1.0 - (angle_degrees / max_angle_degrees).clamp(0.0, 1.0))
}

/// Probes the ground ahead of `position` and returns the speed multiplier, or
/// `None` when the slope ahead is too steep to walk.
pub fn slope_gate(
    position: Vec3,
    direction: Vec3,
    limit: &SlopeLimit,
    caster: &impl RayCaster,
) -> Option<f32> {
    let origin = position + direction * limit.probe_forward + Vec3::Y * limit.probe_height;
    let Some(hit) = caster.cast_ray(Ray3d::new(origin, Dir3::NEG_Y), limit.probe_distance)
    else {
        return Some(1.0);
    };

    let angle = hit.normal.angle_between(Vec3::Y).to_degrees();
    slope_multiplier(angle, limit.max_angle_degrees)
}

/// Returns the corrected height after pushing the player out of the ground.
///
/// Only ever rises, capped at `rise_speed * delta_secs`, and stops exactly at
/// `ground + offset`.
pub fn snap_to_ground(
    position: Vec3,
    snap: &GroundSnap,
    delta_secs: f32,
    caster: &impl RayCaster,
) -> f32 {
    let origin = position + Vec3::Y * snap.offset;
    let reach = snap.offset + snap.probe_distance;
    let Some(hit) = caster.cast_ray(Ray3d::new(origin, Dir3::NEG_Y), reach) else {
        return position.y;
    };

    let desired = hit.point.y + snap.offset;
    if position.y >= desired {
        return position.y;
    }

    (position.y + snap.rise_speed * delta_secs.max(0.0)).min(desired)
}

/// Runs one frame of movement for `mover` and returns the new position.
pub fn step_player(
    position: Vec3,
    input: Vec2,
    basis: MoveBasis,
    mover: &PlayerMover,
    delta_secs: f32,
    caster: &impl RayCaster,
) -> Vec3 {
    let mut next = position;

    if let Some(direction) = movement_direction(input, basis) {
        let multiplier = match &mover.slope {
            Some(limit) => slope_gate(position, direction, limit, caster),
            None => Some(1.0),
        };
        if let Some(multiplier) = multiplier {
            next += direction * mover.current_speed() * multiplier * delta_secs;
        }
    }

    if let Some(snap) = &mover.ground_snap {
        next.y = snap_to_ground(next, snap, delta_secs, caster);
    }

    next
}
