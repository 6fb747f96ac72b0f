//! Systems reading player input and moving the avatar.
use bevy::prelude::*;

use crate::{
    camera::components::OrbitCamera,
    core::plugin::SimulationClock,
    physics::SpatialQuery,
    player::{
        components::{Player, PlayerMover},
        movement::{read_move_input, step_player, MoveBasis},
    },
};

/// Up/Down arrows step the player's speed, clamped to `[0, max]`.
pub fn adjust_player_speed(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut movers: Query<&mut PlayerMover, With<Player>>,
) {
    let increase = keyboard.just_pressed(KeyCode::ArrowUp);
    let decrease = keyboard.just_pressed(KeyCode::ArrowDown);
    if !increase && !decrease {
        return;
    }

    for mut mover in movers.iter_mut() {
        if increase {
            mover.increase_speed();
        } else {
            mover.decrease_speed();
        }
        info!(
            "Player speed set to {:.1} (max {:.1})",
            mover.current_speed(),
            mover.max_speed()
        );
    }
}

/// Moves the player from WASD input, relative to the camera when configured.
pub fn move_player(
    keyboard: Res<ButtonInput<KeyCode>>,
    clock: Res<SimulationClock>,
    spatial: SpatialQuery,
    orbit_cameras: Query<Entity, With<OrbitCamera>>,
    camera_transforms: Query<&Transform, Without<Player>>,
    mut players: Query<(&mut Transform, &PlayerMover), With<Player>>,
) {
    let input = read_move_input(&keyboard);
    let delta = clock.delta_secs();

    for (mut transform, mover) in players.iter_mut() {
        let basis = if mover.camera_relative {
            mover
                .camera
                .or_else(|| orbit_cameras.iter().next())
                .and_then(|camera| camera_transforms.get(camera).ok())
                .map(MoveBasis::from_camera)
                .unwrap_or(MoveBasis::World)
        } else {
            MoveBasis::World
        };

        let next = step_player(transform.translation, input, basis, mover, delta, &spatial);
        if next != transform.translation {
            transform.translation = next;
        }
    }
}
