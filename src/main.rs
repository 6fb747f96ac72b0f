use bevy::prelude::*;

mod camera;
mod collector;
mod core;
mod minimap;
mod physics;
mod player;
mod ui;
mod world;

use crate::{
    camera::CameraPlugin, collector::CollectorPlugin, core::CorePlugin, minimap::MinimapPlugin,
    player::PlayerPlugin, ui::UiPlugin, world::WorldPlugin,
};

fn main() {
    App::new()
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Lunar Explorer".to_string(),
                    ..default()
                }),
                ..default()
            }),
            CorePlugin::default(),
            PlayerPlugin,
            CameraPlugin,
            MinimapPlugin,
            CollectorPlugin,
            WorldPlugin, // After the gameplay plugins so their settings exist at Startup
            UiPlugin,
        ))
        .run();
}
