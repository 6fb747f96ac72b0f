// src/ui/hud/systems.rs
//
// Spawns the minimap frame, its icons and the pickup counters.

use bevy::prelude::*;

use crate::{
    collector::components::{Collectible, CounterSlot, CounterText, PickupCategory},
    minimap::{
        components::{map_icon, MapMarker, MinimapFrame, PlayerMapIcon},
        config::MinimapSettings,
    },
};

use super::components::HudLayout;

// Visual constants
const MAP_BACKGROUND: Color = Color::srgba(0.08, 0.08, 0.1, 0.85);
const MAP_BORDER: Color = Color::srgb(0.45, 0.45, 0.5);
const PLAYER_ICON_COLOR: Color = Color::srgb(0.3, 0.9, 0.4);
const REGOLITH_ICON_COLOR: Color = Color::srgb(0.95, 0.65, 0.3);
const ICE_ICON_COLOR: Color = Color::srgb(0.55, 0.85, 1.0);
const OTHER_ICON_COLOR: Color = Color::srgb(0.8, 0.8, 0.8);
const TEXT_COLOR: Color = Color::WHITE;
const HINT_COLOR: Color = Color::srgb(0.7, 0.7, 0.7);
const CONTROLS_HINT: &str =
    "WASD move | Up/Down speed | Space collect | Right mouse orbit";

/// Spawn the HUD: minimap with one marker per collectible, counters, hint.
///
/// Runs after the world is spawned so every collectible already exists.
pub fn spawn_hud(
    mut commands: Commands,
    layout: Res<HudLayout>,
    minimap: Res<MinimapSettings>,
    collectibles: Query<(Entity, &PickupCategory, Option<&Name>), With<Collectible>>,
) {
    let frame_size = minimap.frame_size;

    commands
        .spawn((
            Name::new("Minimap"),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(layout.minimap_margin),
                right: Val::Px(layout.minimap_margin),
                width: Val::Px(frame_size.x),
                height: Val::Px(frame_size.y),
                border: UiRect::all(Val::Px(layout.minimap_border)),
                overflow: Overflow::clip(),
                ..default()
            },
            BackgroundColor(MAP_BACKGROUND),
            BorderColor::from(MAP_BORDER),
            MinimapFrame::new(frame_size - Vec2::splat(2.0 * layout.minimap_border)),
        ))
        .with_children(|frame| {
            for (target, category, name) in collectibles.iter() {
                let color = match category.0 {
                    1 => REGOLITH_ICON_COLOR,
                    2 => ICE_ICON_COLOR,
                    _ => OTHER_ICON_COLOR,
                };
                let label = name.map(|name| name.as_str().to_string()).unwrap_or_default();
                frame.spawn((
                    map_icon(layout.marker_icon_size, color),
                    MapMarker::new(label, Some(target)),
                ));
            }

            // Player icon last so it draws above the markers
            frame.spawn((
                map_icon(layout.player_icon_size, PLAYER_ICON_COLOR),
                PlayerMapIcon,
            ));
        });

    commands
        .spawn((
            Name::new("Counters"),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(layout.minimap_margin),
                left: Val::Px(layout.minimap_margin),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                ..default()
            },
        ))
        .with_children(|panel| {
            for slot in [CounterSlot::First, CounterSlot::Second] {
                panel.spawn((
                    Text::default(),
                    TextFont {
                        font_size: layout.counter_font_size,
                        ..default()
                    },
                    TextColor(TEXT_COLOR),
                    CounterText(slot),
                ));
            }
        });

    commands.spawn((
        Text::new(CONTROLS_HINT),
        TextFont {
            font_size: layout.hint_font_size,
            ..default()
        },
        TextColor(HINT_COLOR),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(layout.minimap_margin),
            left: Val::Px(layout.minimap_margin),
            ..default()
        },
    ));

    info!(
        "HUD spawned: minimap {:.0}x{:.0} with {} marker(s)",
        frame_size.x,
        frame_size.y,
        collectibles.iter().count()
    );
}
