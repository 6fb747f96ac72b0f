//! Components for the player avatar and its movement state.
use bevy::prelude::*;

use super::config::MovementSettings;

/// Marker component identifying the player entity.
#[derive(Component, Debug)]
pub struct Player;

/// Forward slope probe and the steepest walkable angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlopeLimit {
    /// Steepest walkable slope (degrees). Anything steeper blocks the move.
    pub max_angle_degrees: f32,
    /// How far ahead of the player the probe ray starts (world units).
    pub probe_forward: f32,
    /// Height above the player the probe ray starts from.
    pub probe_height: f32,
    /// Length of the downward probe.
    pub probe_distance: f32,
}

/// Keeps the player from sinking below the terrain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundSnap {
    /// Extra reach of the downward ray below the player's feet.
    pub probe_distance: f32,
    /// Desired height of the player origin above the ground.
    pub offset: f32,
    /// Maximum upward correction per second.
    pub rise_speed: f32,
}

/// Keyboard-driven walker with an adjustable speed.
///
/// Speed fields stay private outside `player` so every write goes through the clamping setters.
#[derive(Component, Debug, Clone)]
pub struct PlayerMover {
    pub(in crate::player) current_speed: f32,
    pub(in crate::player) max_speed: f32,
    pub(in crate::player) speed_step: f32,
    /// Move along the camera's flattened axes instead of world axes.
    pub camera_relative: bool,
    /// Camera used for camera-relative movement. `None` uses the orbit camera, if any.
    pub camera: Option<Entity>,
    pub slope: Option<SlopeLimit>,
    pub ground_snap: Option<GroundSnap>,
}

impl PlayerMover {
    pub fn new(current_speed: f32, max_speed: f32, speed_step: f32) -> Self {
        let max_speed = max_speed.max(0.0);
        Self {
            current_speed: current_speed.clamp(0.0, max_speed),
            max_speed,
            speed_step: speed_step.max(0.0),
            camera_relative: false,
            camera: None,
            slope: None,
            ground_snap: None,
        }
    }

    pub fn from_settings(settings: &MovementSettings) -> Self {
        Self {
            camera_relative: settings.camera_relative,
            slope: settings.slope,
            ground_snap: settings.ground_snap,
            ..Self::new(
                settings.current_speed,
                settings.max_speed,
                settings.speed_step,
            )
        }
    }

    pub fn current_speed(&self) -> f32 {
        self.current_speed
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn set_current_speed(&mut self, speed: f32) {
        self.current_speed = speed.clamp(0.0, self.max_speed);
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn min_speed(&self) -> f32 {
        0.0
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    /// Sets the ceiling; the current speed is pulled down if it now exceeds it.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn set_max_speed(&mut self, speed: f32) {
        self.max_speed = speed.max(0.0);
        self.current_speed = self.current_speed.min(self.max_speed);
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn speed_step(&self) -> f32 {
        self.speed_step
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn set_speed_step(&mut self, step: f32) {
        self.speed_step = step.max(0.0);
    }

    pub fn increase_speed(&mut self) {
        self.current_speed = (self.current_speed + self.speed_step).min(self.max_speed);
    }

    pub fn decrease_speed(&mut self) {
        self.current_speed = (self.current_speed - self.speed_step).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_adjustments_stay_within_bounds() {
        let mut mover = PlayerMover::new(3.0, 12.0, 2.5);
        for _ in 0..20 {
            mover.increase_speed();
            assert!(mover.current_speed() <= mover.max_speed());
        }
        assert_eq!(mover.current_speed(), 12.0);

        for _ in 0..20 {
            mover.decrease_speed();
            assert!(mover.current_speed() >= mover.min_speed());
        }
        assert_eq!(mover.current_speed(), 0.0);
    }

    #[test]
    fn setters_clamp_values() {
        let mut mover = PlayerMover::new(3.0, 12.0, 1.0);

        mover.set_current_speed(40.0);
        assert_eq!(mover.current_speed(), 12.0);
        mover.set_current_speed(-1.0);
        assert_eq!(mover.current_speed(), 0.0);

        mover.set_current_speed(10.0);
        mover.set_max_speed(6.0);
        assert_eq!(mover.current_speed(), 6.0);
        mover.set_max_speed(-3.0);
        assert_eq!(mover.max_speed(), 0.0);

        mover.set_speed_step(-1.0);
        assert_eq!(mover.speed_step(), 0.0);
    }

    #[test]
    fn constructor_clamps_initial_speed() {
        let mover = PlayerMover::new(20.0, 12.0, -1.0);
        assert_eq!(mover.current_speed(), 12.0);
        assert_eq!(mover.speed_step(), 0.0);
    }
}
