// src/ui/hud/plugin.rs
//
// UiPlugin spawns the HUD once the world exists.

use bevy::prelude::*;

use crate::world::systems::spawn_world_environment;

use super::components::HudLayout;
use super::systems::spawn_hud;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        info!("UiPlugin registered");

        app.init_resource::<HudLayout>()
            .add_systems(Startup, spawn_hud.after(spawn_world_environment));
    }
}
