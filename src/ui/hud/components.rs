// src/ui/hud/components.rs
//
// Layout settings for the HUD overlay.

use bevy::prelude::*;

/// Resource containing HUD layout settings.
#[derive(Resource, Debug)]
pub struct HudLayout {
    /// Distance of the minimap from the top-right window corner (pixels).
    pub minimap_margin: f32,

    /// Border around the map image (pixels).
    pub minimap_border: f32,

    /// Side of the player icon (pixels).
    pub player_icon_size: f32,

    /// Side of a collectible marker icon (pixels).
    pub marker_icon_size: f32,

    /// Font size of the counters.
    pub counter_font_size: f32,

    /// Font size of the controls hint.
    pub hint_font_size: f32,
}

impl Default for HudLayout {
    fn default() -> Self {
        Self {
            minimap_margin: 16.0,
            minimap_border: 2.0,
            player_icon_size: 10.0,
            marker_icon_size: 7.0,
            counter_font_size: 22.0,
            hint_font_size: 14.0,
        }
    }
}
