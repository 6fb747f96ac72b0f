// src/minimap/plugin.rs
//
// Plugin registration for the minimap.

use bevy::prelude::*;

use crate::core::plugin::FrameSet;

use super::{
    components::{MarkerIndex, MinimapTracking},
    config::MinimapSettings,
    events::{RefreshMinimap, RemoveMapMarkers},
    systems::{
        apply_anchored_positions, index_new_markers, prune_stale_markers, refresh_minimap,
        remove_map_markers, sync_frame_size,
    },
};

/// Projects the player and tracked entities onto a 2D map in the HUD.
///
/// # System Ordering
///
/// All systems run chained in `FrameSet::Presentation`, after movement and pickups:
/// index new markers, apply removals, prune, sync frame size, project, lay out icons.
pub struct MinimapPlugin;

impl Plugin for MinimapPlugin {
    fn build(&self, app: &mut App) {
        let settings = MinimapSettings::load_or_default();
        info!(
            "Minimap configured: {:.1} x {:.1} world units ({:?} origin), continuous: {}",
            settings.projection.extent().x,
            settings.projection.extent().y,
            settings.projection.origin(),
            settings.continuous,
        );

        app.insert_resource(settings)
            .init_resource::<MinimapTracking>()
            .init_resource::<MarkerIndex>()
            .add_message::<RemoveMapMarkers>()
            .add_message::<RefreshMinimap>()
            .add_systems(
                Update,
                (
                    index_new_markers,
                    remove_map_markers,
                    prune_stale_markers,
                    sync_frame_size,
                    refresh_minimap,
                    apply_anchored_positions,
                )
                    .chain()
                    .in_set(FrameSet::Presentation),
            );
    }
}
