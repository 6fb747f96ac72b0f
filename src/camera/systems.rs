//! Systems driving the orbit camera from input and placing it after movement.
use bevy::{
    ecs::message::MessageReader,
    input::{mouse::MouseMotion, ButtonInput},
    prelude::*,
    window::{CursorGrabMode, CursorOptions},
};

use crate::{
    camera::{
        components::{resolve_initial_offset, OrbitCamera},
        config::OrbitInput,
    },
    core::plugin::SimulationClock,
};

/// Builds the orbit from the authored camera placement once a target is available.
pub fn initialize_orbit_cameras(
    targets: Query<&Transform, Without<OrbitCamera>>,
    mut cameras: Query<(&mut OrbitCamera, &mut Transform)>,
) {
    for (mut orbit, mut transform) in cameras.iter_mut() {
        if orbit.is_initialized() {
            continue;
        }
        let Some(target) = orbit.target() else {
            continue;
        };
        let Ok(target_transform) = targets.get(target) else {
            continue;
        };

        let offset = resolve_initial_offset(
            &transform,
            target_transform,
            orbit.default_distance,
            orbit.default_height,
        );
        orbit.initialize(offset);
        *transform = orbit.pose(target_transform.translation);

        info!(
            "Orbit camera following {:?} at radius {:.2} (yaw {:.1} deg, pitch {:.1} deg)",
            target,
            orbit.radius(),
            orbit.yaw().to_degrees(),
            orbit.pitch().to_degrees()
        );
    }
}

/// Locks the cursor while the look button is held.
pub fn update_cursor_grab(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut cursor_options: Single<&mut CursorOptions>,
) {
    if mouse_buttons.just_pressed(MouseButton::Right) {
        cursor_options.visible = false;
        cursor_options.grab_mode = CursorGrabMode::Locked;
    } else if mouse_buttons.just_released(MouseButton::Right) {
        cursor_options.visible = true;
        cursor_options.grab_mode = CursorGrabMode::None;
    }
}

/// Feeds arrow keys or mouse motion into the orbit angles.
pub fn orbit_camera_input(
    mut motion_events: MessageReader<MouseMotion>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    clock: Res<SimulationClock>,
    mut cameras: Query<&mut OrbitCamera>,
) {
    let mut cumulative_delta = Vec2::ZERO;
    for ev in motion_events.read() {
        cumulative_delta += ev.delta;
    }

    let mut yaw_input = 0.0;
    if keyboard.pressed(KeyCode::ArrowLeft) {
        yaw_input += 1.0;
    }
    if keyboard.pressed(KeyCode::ArrowRight) {
        yaw_input -= 1.0;
    }

    for mut orbit in cameras.iter_mut() {
        if !orbit.is_initialized() {
            continue;
        }

        match orbit.input {
            OrbitInput::Keys { rotate_speed } => {
                if yaw_input != 0.0 {
                    orbit.rotate_yaw(yaw_input * rotate_speed * clock.delta_secs());
                }
            }
            OrbitInput::Pointer {
                sensitivity,
                require_button,
            } => {
                if require_button && !mouse_buttons.pressed(MouseButton::Right) {
                    continue;
                }
                if cumulative_delta != Vec2::ZERO {
                    orbit.apply_pointer_delta(cumulative_delta, sensitivity);
                }
            }
        }
    }
}

/// Late update: smooths the angles and places each camera around its target's
/// final position for the frame.
pub fn place_orbit_cameras(
    clock: Res<SimulationClock>,
    targets: Query<&Transform, Without<OrbitCamera>>,
    mut cameras: Query<(&mut OrbitCamera, &mut Transform)>,
) {
    for (mut orbit, mut transform) in cameras.iter_mut() {
        if !orbit.is_initialized() {
            continue;
        }
        let Some(target_transform) = orbit.target().and_then(|target| targets.get(target).ok())
        else {
            continue;
        };

        orbit.smooth(clock.delta_secs());
        *transform = orbit.pose(target_transform.translation);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::camera::config::CameraSettings;

    fn orbit_app() -> App {
        let mut app = App::new();
        let mut clock = SimulationClock::default();
        clock.tick(Duration::from_secs_f32(0.5));
        app.insert_resource(clock)
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<ButtonInput<MouseButton>>()
            .add_message::<MouseMotion>()
            .add_systems(
                Update,
                (initialize_orbit_cameras, orbit_camera_input).chain(),
            )
            .add_systems(PostUpdate, place_orbit_cameras);
        app
    }

    fn key_settings() -> CameraSettings {
        CameraSettings {
            input: OrbitInput::Keys {
                rotate_speed: std::f32::consts::FRAC_PI_2,
            },
            ..CameraSettings::default()
        }
    }

    #[test]
    fn camera_follows_moved_target() {
        let mut app = orbit_app();
        let target = app.world_mut().spawn(Transform::default()).id();
        let camera = app
            .world_mut()
            .spawn((
                OrbitCamera::from_settings(Some(target), &key_settings()),
                Transform::from_xyz(0.0, 3.0, 4.0),
            ))
            .id();

        app.update();

        app.world_mut()
            .get_mut::<Transform>(target)
            .expect("target exists")
            .translation = Vec3::new(10.0, 0.0, 0.0);
        app.update();

        let transform = app.world().get::<Transform>(camera).expect("camera exists");
        assert!((transform.translation - Vec3::new(10.0, 3.0, 4.0)).length() < 1e-4);
    }

    #[test]
    fn arrow_keys_orbit_at_constant_rate() {
        let mut app = orbit_app();
        let target = app.world_mut().spawn(Transform::default()).id();
        let camera = app
            .world_mut()
            .spawn((
                OrbitCamera::from_settings(Some(target), &key_settings()),
                Transform::from_xyz(0.0, 0.0, 5.0),
            ))
            .id();
        app.update();

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::ArrowLeft);
        app.update();

        // Half a second at 90 deg/s swings the camera 45 degrees around the target.
        let orbit = app.world().get::<OrbitCamera>(camera).expect("camera exists");
        assert!((orbit.yaw() - std::f32::consts::FRAC_PI_4).abs() < 1e-4);
        assert!((orbit.radius() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn missing_target_leaves_camera_alone() {
        let mut app = orbit_app();
        let start = Transform::from_xyz(1.0, 2.0, 3.0);
        let camera = app
            .world_mut()
            .spawn((
                OrbitCamera::from_settings(None, &CameraSettings::default()),
                start,
            ))
            .id();

        app.update();

        let transform = app.world().get::<Transform>(camera).expect("camera exists");
        assert_eq!(transform.translation, start.translation);
        let orbit = app.world().get::<OrbitCamera>(camera).expect("camera exists");
        assert!(!orbit.is_initialized());
    }

    #[test]
    fn retarget_rebuilds_orbit_around_new_target() {
        let mut app = orbit_app();
        let first = app.world_mut().spawn(Transform::default()).id();
        let second = app.world_mut().spawn(Transform::from_xyz(0.0, 0.0, -20.0)).id();
        let camera = app
            .world_mut()
            .spawn((
                OrbitCamera::from_settings(Some(first), &key_settings()),
                Transform::from_xyz(0.0, 0.0, 6.0),
            ))
            .id();
        app.update();

        app.world_mut()
            .get_mut::<OrbitCamera>(camera)
            .expect("camera exists")
            .retarget(Some(second));
        app.update();

        let orbit = app.world().get::<OrbitCamera>(camera).expect("camera exists");
        assert_eq!(orbit.target(), Some(second));
        assert!((orbit.radius() - 26.0).abs() < 1e-3);
    }
}
