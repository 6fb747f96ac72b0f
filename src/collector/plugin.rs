//! Collector plugin wiring pickup settings, tally and systems.
use bevy::prelude::*;

use crate::{
    collector::{
        components::CollectionTally,
        config::CollectorSettings,
        events::ItemCollected,
        systems::{collect_nearby_items, log_collected_items, update_counter_texts},
    },
    core::plugin::FrameSet,
    minimap::events::{RefreshMinimap, RemoveMapMarkers},
};

pub struct CollectorPlugin;

impl Plugin for CollectorPlugin {
    fn build(&self, app: &mut App) {
        let settings = CollectorSettings::load_or_default();
        info!(
            "Collector configured: radius {:.1}, buffer {}, tag filter: {}, minimap notify: {}",
            settings.radius,
            settings.buffer_capacity,
            settings.use_tag_filter,
            settings.notify_minimap,
        );

        // The minimap registers these too; registering twice is harmless.
        app.insert_resource(settings)
            .init_resource::<CollectionTally>()
            .add_message::<ItemCollected>()
            .add_message::<RemoveMapMarkers>()
            .add_message::<RefreshMinimap>()
            .add_systems(
                Update,
                (collect_nearby_items, log_collected_items)
                    .chain()
                    .in_set(FrameSet::Interaction),
            )
            .add_systems(Update, update_counter_texts.in_set(FrameSet::Presentation));
    }
}
