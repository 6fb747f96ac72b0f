//! CameraPlugin wires orbit input during the frame and placement in the late update.
use bevy::{prelude::*, transform::TransformSystems};

use crate::{
    camera::{
        config::{CameraSettings, OrbitInput},
        systems::{
            initialize_orbit_cameras, orbit_camera_input, place_orbit_cameras, update_cursor_grab,
        },
    },
    core::plugin::FrameSet,
};

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        let settings = CameraSettings::load_or_default();
        match settings.input {
            OrbitInput::Keys { rotate_speed } => info!(
                "Orbit camera configured for arrow keys at {:.0} deg/s",
                rotate_speed.to_degrees()
            ),
            OrbitInput::Pointer { sensitivity, .. } => info!(
                "Orbit camera configured for pointer look ({:.2} deg/px, pitch {:.0}..{:.0} deg, smoothing {:.2}s)",
                sensitivity.to_degrees(),
                settings.min_pitch.to_degrees(),
                settings.max_pitch.to_degrees(),
                settings.smoothing_time
            ),
        }

        app.insert_resource(settings)
            .add_systems(
                Update,
                (
                    update_cursor_grab,
                    initialize_orbit_cameras,
                    orbit_camera_input.after(initialize_orbit_cameras),
                )
                    .in_set(FrameSet::Input),
            )
            .add_systems(
                PostUpdate,
                place_orbit_cameras.before(TransformSystems::Propagate),
            );
    }
}
