//! WorldPlugin spawns the level once every gameplay plugin has loaded its settings.
use bevy::prelude::*;

use crate::world::systems::spawn_world_environment;

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::srgb(0.01, 0.01, 0.02)))
            .add_systems(Startup, spawn_world_environment);
    }
}
