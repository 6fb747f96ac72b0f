//! Player plugin wiring movement settings and systems.
use bevy::prelude::*;

use crate::{
    core::plugin::FrameSet,
    player::{
        config::MovementSettings,
        systems::{adjust_player_speed, move_player},
    },
};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        let settings = MovementSettings::load_or_default();
        info!(
            "Movement configured: speed {:.1}/{:.1} (step {:.1}), camera relative: {}, slope limit: {}, ground snap: {}",
            settings.current_speed,
            settings.max_speed,
            settings.speed_step,
            settings.camera_relative,
            settings
                .slope
                .map(|slope| format!("{:.0} deg", slope.max_angle_degrees))
                .unwrap_or_else(|| "off".to_string()),
            settings.ground_snap.is_some(),
        );

        app.insert_resource(settings)
            .add_systems(Update, adjust_player_speed.in_set(FrameSet::Input))
            .add_systems(Update, move_player.in_set(FrameSet::Motion));
    }
}
